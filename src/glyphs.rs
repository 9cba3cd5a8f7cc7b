use std::borrow::Cow;

use ratatui::text::{Line, Span};
use ratatui::widgets::Cell;

use crate::context::SelectorRowContext;
use crate::hierarchy::{Hierarchy, NodeId};

#[derive(Clone, Copy)]
pub struct SelectorGlyphs<'a> {
    pub indent: &'a str,
    pub branch_last: &'a str,
    pub branch: &'a str,
    pub vert: &'a str,
    pub empty: &'a str,
    pub checked: &'a str,
    pub unchecked: &'a str,
}

impl SelectorGlyphs<'static> {
    pub const fn unicode() -> Self {
        Self {
            indent: "   ",
            branch_last: "└──",
            branch: "├──",
            vert: "│  ",
            empty: "   ",
            checked: "☑",
            unchecked: "☐",
        }
    }

    pub const fn ascii() -> Self {
        Self {
            indent: "   ",
            branch_last: "`--",
            branch: "|--",
            vert: "|  ",
            empty: "   ",
            checked: "[x]",
            unchecked: "[ ]",
        }
    }
}

#[derive(Clone)]
pub struct SelectorLabelParts<'a> {
    pub name: &'a str,
    pub suffix: Option<Cow<'a, str>>,
}

pub trait SelectorLabelProvider {
    fn label_parts<'a>(&'a self, hierarchy: &'a Hierarchy, id: NodeId) -> SelectorLabelParts<'a>;
}

pub trait SelectorLabelRenderer {
    fn cell<'a>(
        &'a self,
        hierarchy: &'a Hierarchy,
        id: NodeId,
        ctx: &SelectorRowContext,
        glyphs: &SelectorGlyphs<'a>,
    ) -> Cell<'a>;
}

impl<P: SelectorLabelProvider> SelectorLabelRenderer for P {
    fn cell<'a>(
        &'a self,
        hierarchy: &'a Hierarchy,
        id: NodeId,
        ctx: &SelectorRowContext,
        glyphs: &SelectorGlyphs<'a>,
    ) -> Cell<'a> {
        let parts = self.label_parts(hierarchy, id);
        selector_name_cell(ctx, parts, glyphs)
    }
}

/// Labels straight from the hierarchy, no suffix.
#[derive(Clone, Copy, Debug, Default)]
pub struct HierarchyLabels;

impl SelectorLabelProvider for HierarchyLabels {
    fn label_parts<'a>(&'a self, hierarchy: &'a Hierarchy, id: NodeId) -> SelectorLabelParts<'a> {
        SelectorLabelParts {
            name: hierarchy.label(id).unwrap_or_default(),
            suffix: None,
        }
    }
}

pub fn selector_label_line<'a>(
    ctx: &SelectorRowContext<'_>,
    parts: SelectorLabelParts<'a>,
    glyphs: &SelectorGlyphs<'a>,
) -> Line<'a> {
    let SelectorLabelParts { name, suffix } = parts;
    let suffix = suffix.filter(|value| !value.is_empty());
    let checkbox = if ctx.is_checked {
        glyphs.checked
    } else {
        glyphs.unchecked
    };

    let mut spans = Vec::with_capacity(ctx.is_tail_stack.len().max(ctx.level as usize) + 5);

    if ctx.level == 0 || !ctx.draw_lines {
        for _ in 0..ctx.level {
            spans.push(Span::raw(glyphs.empty));
        }
    } else {
        for (l, is_last) in ctx.is_tail_stack.iter().enumerate() {
            let part = if l == (ctx.level as usize) - 1 {
                if *is_last {
                    glyphs.branch_last
                } else {
                    glyphs.branch
                }
            } else if *is_last {
                glyphs.indent
            } else {
                glyphs.vert
            };
            spans.push(Span::styled(part, ctx.line_style));
        }
    }

    spans.push(Span::raw(checkbox));
    spans.push(Span::raw(" "));
    spans.push(Span::raw(name));
    if let Some(suffix) = suffix {
        spans.push(Span::raw(" "));
        spans.push(Span::raw(suffix));
    }
    Line::from(spans)
}

pub fn selector_name_cell<'a>(
    ctx: &SelectorRowContext<'_>,
    parts: SelectorLabelParts<'a>,
    glyphs: &SelectorGlyphs<'a>,
) -> Cell<'a> {
    Cell::from(selector_label_line(ctx, parts, glyphs))
}
