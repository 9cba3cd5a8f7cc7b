use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::Borders;

/// Политика скролла при изменении выбранной строки.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectorScrollPolicy {
    KeepInView,
    CenterOnSelect,
}

/// Визуальные настройки селектора.
#[derive(Clone)]
pub struct SelectorStyle<'a> {
    pub title: Option<Line<'a>>,
    pub block_style: Style,
    pub border_style: Style,
    pub highlight_style: Style,
    pub checked_style: Style,
    pub line_style: Style,
    pub highlight_symbol: &'a str,
    pub borders: Borders,
    pub scroll_policy: SelectorScrollPolicy,
}

impl Default for SelectorStyle<'_> {
    fn default() -> Self {
        Self {
            title: None,
            block_style: Style::default(),
            border_style: Style::default(),
            highlight_style: Style::default(),
            checked_style: Style::default(),
            line_style: Style::default(),
            highlight_symbol: ">> ",
            borders: Borders::ALL,
            scroll_policy: SelectorScrollPolicy::KeepInView,
        }
    }
}

/// Визуальные настройки таблицы сохранённых токенов.
#[derive(Clone)]
pub struct SavedTableStyle<'a> {
    pub title: Option<Line<'a>>,
    pub header: &'a str,
    pub header_style: Style,
    pub block_style: Style,
    pub border_style: Style,
    pub borders: Borders,
}

impl Default for SavedTableStyle<'_> {
    fn default() -> Self {
        Self {
            title: None,
            header: "Selected Items",
            header_style: Style::default(),
            block_style: Style::default(),
            border_style: Style::default(),
            borders: Borders::ALL,
        }
    }
}
