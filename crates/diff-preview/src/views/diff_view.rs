//! Diff body: the disclosed files laid out as rows.
//!
//! Rows are computed from the parsed model once per frame and only the
//! rows inside the viewport are drawn.

use crate::theme::Theme;
use diff_pipeline::{DiffLine, FileDiff, LineKind, ViewType};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Widget};

/// One screen row of the diff body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Row<'a> {
    FileHeader(&'a FileDiff),
    HunkHeader(&'a str),
    Unified(&'a DiffLine),
    Split(Option<&'a DiffLine>, Option<&'a DiffLine>),
    Spacer,
}

/// Lay out every file as rows for the given view type.
///
/// In the split layout a deletion directly followed by an addition shares a
/// row; any other change gets a row with one empty side.
pub fn layout_rows(files: &[FileDiff], view_type: ViewType) -> Vec<Row<'_>> {
    let mut rows = Vec::new();

    for file in files {
        rows.push(Row::FileHeader(file));

        for hunk in &file.hunks {
            rows.push(Row::HunkHeader(&hunk.header));

            match view_type {
                ViewType::Unified => rows.extend(hunk.lines.iter().map(Row::Unified)),
                ViewType::Split => split_rows(&hunk.lines, &mut rows),
            }
        }

        rows.push(Row::Spacer);
    }

    rows
}

fn split_rows<'a>(lines: &'a [DiffLine], rows: &mut Vec<Row<'a>>) {
    let mut iter = lines.iter().peekable();

    while let Some(line) = iter.next() {
        let row = match line.kind {
            LineKind::Context => Row::Split(Some(line), Some(line)),
            LineKind::Addition => Row::Split(None, Some(line)),
            LineKind::Deletion => {
                let paired = iter.next_if(|next| next.kind == LineKind::Addition);
                Row::Split(Some(line), paired)
            }
        };
        rows.push(row);
    }
}

/// Number of digits needed for the widest line number in `files`.
pub fn line_no_width(files: &[FileDiff]) -> usize {
    let max = files.iter().map(FileDiff::max_line_no).max().unwrap_or(0);
    max.max(1).to_string().len()
}

/// Widget for the scrollable diff body.
pub struct DiffView<'a> {
    rows: &'a [Row<'a>],
    scroll: usize,
    hide_gutter: bool,
    line_no_width: usize,
    title: String,
    theme: &'a Theme,
}

impl<'a> DiffView<'a> {
    pub fn new(rows: &'a [Row<'a>], scroll: usize, theme: &'a Theme) -> Self {
        Self {
            rows,
            scroll,
            hide_gutter: false,
            line_no_width: 1,
            title: String::new(),
            theme,
        }
    }

    pub fn hide_gutter(mut self, hide: bool) -> Self {
        self.hide_gutter = hide;
        self
    }

    pub fn line_no_width(mut self, width: usize) -> Self {
        self.line_no_width = width;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

impl Widget for DiffView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.panel_border())
            .title(Span::styled(self.title.clone(), self.theme.panel_title()));

        let inner = block.inner(area);
        block.render(area, buf);

        if self.rows.is_empty() {
            let msg = "Nothing to show yet";
            let x = inner.x + (inner.width.saturating_sub(msg.len() as u16)) / 2;
            let y = inner.y + inner.height / 2;
            buf.set_string(x, y, msg, self.theme.muted());
            return;
        }

        let visible = self
            .rows
            .iter()
            .skip(self.scroll)
            .take(inner.height as usize);

        for (offset, row) in visible.enumerate() {
            let y = inner.y + offset as u16;
            let line_area = Rect::new(inner.x, y, inner.width, 1);
            match row {
                Row::FileHeader(file) => self.render_file_header(file, line_area, buf),
                Row::HunkHeader(header) => self.render_hunk_header(header, line_area, buf),
                Row::Unified(line) => self.render_unified(line, line_area, buf),
                Row::Split(left, right) => {
                    let half = line_area.width / 2;
                    let left_area = Rect::new(line_area.x, y, half, 1);
                    let right_area =
                        Rect::new(line_area.x + half, y, line_area.width - half, 1);
                    self.render_side(*left, Side::Old, left_area, buf);
                    self.render_side(*right, Side::New, right_area, buf);
                }
                Row::Spacer => {}
            }
        }
    }
}

#[derive(Clone, Copy)]
enum Side {
    Old,
    New,
}

impl DiffView<'_> {
    fn render_file_header(&self, file: &FileDiff, area: Rect, buf: &mut Buffer) {
        let line = Line::from(vec![
            Span::styled(format!("{} ", file.status.as_char()), self.theme.warning()),
            Span::styled(
                file.display_name(),
                self.theme.text().add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  +{}", file.additions), self.theme.success()),
            Span::styled(format!(" -{}", file.deletions), self.theme.error()),
        ]);
        buf.set_line(area.x, area.y, &line, area.width);
    }

    fn render_hunk_header(&self, header: &str, area: Rect, buf: &mut Buffer) {
        let style = Style::default()
            .fg(self.theme.accent_primary)
            .bg(self.theme.hunk_header_bg);
        buf.set_style(area, style);
        buf.set_stringn(area.x, area.y, header, area.width as usize, style);
    }

    fn render_unified(&self, line: &DiffLine, area: Rect, buf: &mut Buffer) {
        let style = self.line_style(line.kind);
        buf.set_style(area, style);

        let mut spans = Vec::new();
        if !self.hide_gutter {
            spans.push(Span::styled(
                format!(
                    "{} {} ",
                    self.format_line_no(line.old_line),
                    self.format_line_no(line.new_line)
                ),
                style.fg(self.theme.line_number_fg),
            ));
        }
        spans.push(self.prefix_span(line.kind, style));
        spans.push(Span::styled(line.content.as_str(), style));

        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }

    fn render_side(&self, line: Option<&DiffLine>, side: Side, area: Rect, buf: &mut Buffer) {
        let Some(line) = line else {
            buf.set_style(area, Style::default().bg(self.theme.bg_panel));
            return;
        };

        // Context lines appear on both sides; only changes are tinted.
        let style = self.line_style(line.kind);
        buf.set_style(area, style);

        let mut spans = Vec::new();
        if !self.hide_gutter {
            let line_no = match side {
                Side::Old => line.old_line,
                Side::New => line.new_line,
            };
            spans.push(Span::styled(
                format!("{} ", self.format_line_no(line_no)),
                style.fg(self.theme.line_number_fg),
            ));
        }
        spans.push(self.prefix_span(line.kind, style));
        spans.push(Span::styled(line.content.as_str(), style));

        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }

    fn line_style(&self, kind: LineKind) -> Style {
        match kind {
            LineKind::Addition => Style::default().bg(self.theme.addition_bg),
            LineKind::Deletion => Style::default().bg(self.theme.deletion_bg),
            LineKind::Context => Style::default(),
        }
    }

    fn prefix_span(&self, kind: LineKind, style: Style) -> Span<'static> {
        let style = match kind {
            LineKind::Addition => style.fg(Color::Green),
            LineKind::Deletion => style.fg(Color::Red),
            LineKind::Context => style,
        };
        Span::styled(kind.prefix().to_string(), style)
    }

    fn format_line_no(&self, line_no: Option<u32>) -> String {
        line_no
            .map(|n| format!("{:>width$}", n, width = self.line_no_width))
            .unwrap_or_else(|| " ".repeat(self.line_no_width))
    }
}
