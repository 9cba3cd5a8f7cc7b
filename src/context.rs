use ratatui::style::Style;

#[derive(Clone, Copy)]
pub struct SelectorRowContext<'a> {
    pub level: u16,
    pub is_tail_stack: &'a [bool],
    pub is_checked: bool,
    pub draw_lines: bool,
    pub line_style: Style,
}
