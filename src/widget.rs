use ratatui::layout::{Constraint, Rect};
use ratatui::prelude::Buffer;
use ratatui::widgets::{
    Block, Borders, Cell, Row, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget,
    Table, Widget,
};

use crate::context::SelectorRowContext;
use crate::glyphs::{HierarchyLabels, SelectorGlyphs, SelectorLabelRenderer};
use crate::selection::SelectionModel;
use crate::state::{SelectorViewState, VisibleRow};
use crate::style::{SavedTableStyle, SelectorStyle};

/// Основной виджет селектора: дерево чекбоксов (table + stateful).
pub struct SelectorView<'a, L = HierarchyLabels>
where
    L: SelectorLabelRenderer,
{
    selection: &'a SelectionModel,
    label: &'a L,
    style: SelectorStyle<'a>,
    glyphs: SelectorGlyphs<'a>,
}

impl<'a, L> SelectorView<'a, L>
where
    L: SelectorLabelRenderer,
{
    pub const fn new(
        selection: &'a SelectionModel,
        label: &'a L,
        style: SelectorStyle<'a>,
    ) -> Self {
        Self {
            selection,
            label,
            style,
            glyphs: SelectorGlyphs::unicode(),
        }
    }

    pub const fn glyphs(mut self, glyphs: SelectorGlyphs<'a>) -> Self {
        self.glyphs = glyphs;
        self
    }

    #[inline]
    fn build_rows(&self, rows: &[VisibleRow], state: &SelectorViewState) -> Vec<Row<'a>> {
        let hierarchy = self.selection.hierarchy();
        let mut table_rows = Vec::with_capacity(rows.len());
        for row in rows {
            let is_checked = self.selection.is_selected(row.id);
            let ctx = SelectorRowContext {
                level: row.level,
                is_tail_stack: row.is_tail_stack.as_slice(),
                is_checked,
                draw_lines: state.draw_lines(),
                line_style: self.style.line_style,
            };
            let mut table_row =
                Row::new([self.label.cell(hierarchy, row.id, &ctx, &self.glyphs)]);
            if is_checked {
                table_row = table_row.style(self.style.checked_style);
            }
            table_rows.push(table_row);
        }
        table_rows
    }

    #[inline]
    fn render_scrollbar(
        area: Rect,
        buf: &mut Buffer,
        state: &SelectorViewState,
        inner_height: usize,
        scroll_rows: usize,
    ) {
        let scroll_len = scroll_rows.saturating_add(1);
        let position = state
            .list_state()
            .offset()
            .min(scroll_len.saturating_sub(1));
        let mut scrollbar_state = ScrollbarState::new(scroll_len)
            .position(position)
            .viewport_content_length(inner_height);
        Scrollbar::default()
            .orientation(ScrollbarOrientation::VerticalRight)
            .render(area, buf, &mut scrollbar_state);
    }
}

impl<L> StatefulWidget for SelectorView<'_, L>
where
    L: SelectorLabelRenderer,
{
    type State = SelectorViewState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        state.ensure_visible_rows(self.selection);

        let mut block = Block::default().borders(self.style.borders);
        if let Some(title) = self.style.title.clone() {
            block = block.title(title);
        }
        block = block
            .style(self.style.block_style)
            .border_style(self.style.border_style);

        let inner_height = usize::from(block.inner(area).height);
        state.ensure_selection_visible_with_policy(inner_height, self.style.scroll_policy);

        let rows = self.build_rows(state.visible_rows(), state);
        let scroll_rows = state.visible_len().saturating_sub(inner_height);

        let (table_area, table_block, scrollbar_area) = if scroll_rows > 0 && area.width > 0 {
            let table_area = Rect {
                width: area.width.saturating_sub(1),
                ..area
            };
            let scrollbar_area = Rect {
                x: area.x + area.width - 1,
                y: area.y,
                width: 1,
                height: area.height,
            };
            let mut table_borders = self.style.borders;
            table_borders.remove(Borders::RIGHT);
            (table_area, block.borders(table_borders), Some(scrollbar_area))
        } else {
            (area, block, None)
        };

        let table = Table::new(rows, [Constraint::Fill(1)])
            .style(self.style.block_style)
            .block(table_block)
            .row_highlight_style(self.style.highlight_style)
            .highlight_symbol(self.style.highlight_symbol);
        StatefulWidget::render(table, table_area, buf, state.list_state_mut());

        if let Some(scrollbar_area) = scrollbar_area {
            Self::render_scrollbar(scrollbar_area, buf, state, inner_height, scroll_rows);
        }
    }
}

/// "Selected Items" table listing saved tokens, newest rows kept in view.
///
/// Draws nothing while the table is empty.
pub struct SavedItemsTable<'a> {
    selection: &'a SelectionModel,
    style: SavedTableStyle<'a>,
}

impl<'a> SavedItemsTable<'a> {
    pub const fn new(selection: &'a SelectionModel, style: SavedTableStyle<'a>) -> Self {
        Self { selection, style }
    }
}

impl Widget for SavedItemsTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let items = self.selection.saved_items();
        if items.is_empty() {
            return;
        }

        let mut block = Block::default().borders(self.style.borders);
        if let Some(title) = self.style.title {
            block = block.title(title);
        }
        block = block
            .style(self.style.block_style)
            .border_style(self.style.border_style);

        // One line goes to the header.
        let body_height = usize::from(block.inner(area).height.saturating_sub(1));
        let start = items.len().saturating_sub(body_height);
        let rows = items[start..]
            .iter()
            .map(|token| Row::new([Cell::from(token.to_string())]));

        let table = Table::new(rows, [Constraint::Fill(1)])
            .header(Row::new([Cell::from(self.style.header)]).style(self.style.header_style))
            .style(self.style.block_style)
            .block(block);
        Widget::render(table, area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::{DepartmentKey, Hierarchy};

    fn buffer_lines(buffer: &Buffer) -> Vec<String> {
        let area = buffer.area;
        (area.y..area.y + area.height)
            .map(|y| {
                (area.x..area.x + area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect()
    }

    #[test]
    fn render_smoke_with_scrollbar() {
        let mut model = SelectionModel::default();
        model.toggle_department(DepartmentKey::new(1)).unwrap();
        let label = HierarchyLabels;
        let widget = SelectorView::new(&model, &label, SelectorStyle::default());
        let mut state = SelectorViewState::new();

        let area = Rect::new(0, 0, 24, 6);
        let mut buffer = Buffer::empty(area);

        widget.render(area, &mut buffer, &mut state);

        assert_eq!(state.visible_len(), 13);
    }

    #[test]
    fn renders_checked_rows_with_ascii_glyphs() {
        let mut model = SelectionModel::new(Hierarchy::generated(2, 1, 1).unwrap());
        model.toggle_department(DepartmentKey::new(2)).unwrap();
        let label = HierarchyLabels;
        let mut style = SelectorStyle::default();
        style.borders = Borders::NONE;
        style.highlight_symbol = "";
        let widget =
            SelectorView::new(&model, &label, style).glyphs(SelectorGlyphs::ascii());
        let mut state = SelectorViewState::new();

        let area = Rect::new(0, 0, 24, 3);
        let mut buffer = Buffer::empty(area);
        widget.render(area, &mut buffer, &mut state);

        let lines = buffer_lines(&buffer);
        assert!(lines[0].starts_with("[ ] Department 1"));
        assert!(lines[1].starts_with("[x] Department 2"));
        assert!(lines[2].starts_with("`--[ ] Class 1"));
    }

    #[test]
    fn saved_table_hidden_until_first_save() {
        let mut model = SelectionModel::default();
        let area = Rect::new(0, 0, 20, 5);

        let mut buffer = Buffer::empty(area);
        SavedItemsTable::new(&model, SavedTableStyle::default()).render(area, &mut buffer);
        assert_eq!(buffer, Buffer::empty(area));

        model.toggle_department(DepartmentKey::new(3)).unwrap();
        model.save();
        let mut style = SavedTableStyle::default();
        style.borders = Borders::NONE;
        SavedItemsTable::new(&model, style).render(area, &mut buffer);

        let lines = buffer_lines(&buffer);
        assert!(lines[0].starts_with("Selected Items"));
        assert!(lines[1].starts_with('3'));
    }

    #[test]
    fn saved_table_keeps_newest_rows() {
        let mut model = SelectionModel::default();
        for ordinal in 1..=4 {
            model.toggle_department(DepartmentKey::new(ordinal)).unwrap();
            model.save();
            model.toggle_department(DepartmentKey::new(ordinal)).unwrap();
        }
        let mut style = SavedTableStyle::default();
        style.borders = Borders::NONE;
        let area = Rect::new(0, 0, 10, 3);
        let mut buffer = Buffer::empty(area);

        SavedItemsTable::new(&model, style).render(area, &mut buffer);

        let lines = buffer_lines(&buffer);
        assert!(lines[1].starts_with('3'));
        assert!(lines[2].starts_with('4'));
    }
}
