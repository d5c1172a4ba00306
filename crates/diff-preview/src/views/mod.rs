//! Screen layout: header with toggles, diff body, status footer.

pub mod diff_view;

use crate::app::{App, StatusKind};
use crate::keymap::HINTS;
use crate::theme::Theme;
use diff_pipeline::{ParseDispatch, PipelineState};
use diff_view::{layout_rows, line_no_width, DiffView};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

const HEADER_HEIGHT: u16 = 1;
const FOOTER_HEIGHT: u16 = 1;
const BODY_BORDERS: u16 = 2;

/// Rows available to diff content for a terminal of the given height.
pub fn body_height(terminal_height: u16) -> usize {
    terminal_height.saturating_sub(HEADER_HEIGHT + FOOTER_HEIGHT + BODY_BORDERS) as usize
}

/// Rows the disclosed files take up in the current layout.
pub fn content_height(state: &PipelineState) -> usize {
    layout_rows(state.visible_files(), state.view_type).len()
}

pub fn render<D: ParseDispatch>(app: &App<D>, theme: &Theme, frame: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(frame.area());

    let state = app.orchestrator().state();

    frame.render_widget(
        Paragraph::new(header_line(state, app.orchestrator().is_parsing(), theme))
            .style(Style::default().bg(theme.bg_primary)),
        chunks[0],
    );

    let files = state.visible_files();
    let rows = layout_rows(files, state.view_type);
    let view = DiffView::new(&rows, app.scroll(), theme)
        .hide_gutter(state.hide_gutter)
        .line_no_width(line_no_width(files))
        .title(body_title(state));
    frame.render_widget(view, chunks[1]);

    frame.render_widget(
        Paragraph::new(footer_line(app, theme)).style(Style::default().bg(theme.bg_primary)),
        chunks[2],
    );
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}

fn header_line(state: &PipelineState, parsing: bool, theme: &Theme) -> Line<'static> {
    let mut spans = vec![
        Span::styled(" diff-preview ", theme.panel_title()),
        Span::styled(" zip ", theme.muted()),
        Span::styled(
            on_off(state.options.zip_nearby_sequences),
            theme.text(),
        ),
        Span::styled("  view ", theme.muted()),
        Span::styled(state.view_type.as_str(), theme.text()),
        Span::styled("  gutter ", theme.muted()),
        Span::styled(on_off(!state.hide_gutter), theme.text()),
    ];

    if parsing {
        spans.push(Span::styled("  parsing...", theme.warning()));
    }

    Line::from(spans)
}

fn body_title(state: &PipelineState) -> String {
    let shown = state.visible_files().len();
    let total = state.total_files();
    if state.has_more() {
        format!(" {}/{} files, scroll for more ", shown, total)
    } else {
        format!(
            " {} file(s)  +{} -{} ",
            total, state.parsed.total_additions, state.parsed.total_deletions
        )
    }
}

fn footer_line<D: ParseDispatch>(app: &App<D>, theme: &Theme) -> Line<'static> {
    let status = app.status();
    let status_style = match status.kind {
        StatusKind::Info => theme.text(),
        StatusKind::Success => theme.success(),
        StatusKind::Error => theme.error(),
    };

    let mut spans = vec![Span::styled(format!(" {} ", status.text), status_style)];
    for (key, description) in HINTS {
        spans.push(Span::styled(" │ ", theme.muted()));
        spans.push(Span::styled(*key, theme.key_hint()));
        spans.push(Span::styled(format!(" {}", description), theme.muted()));
    }

    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use diff_pipeline::{parse_unified_diff, DiffOptions, ParseOptions, ViewType};

    #[test]
    fn test_body_height_accounts_for_chrome() {
        assert_eq!(body_height(24), 20);
        assert_eq!(body_height(3), 0);
    }

    #[test]
    fn test_body_title_reports_progress() {
        let text = "diff --git a/x b/x\nindex 1..2 100644\n--- a/x\n+++ b/x\n@@ -1,1 +1,1 @@\n-a\n+b\ndiff --git a/y b/y\nindex 3..4 100644\n--- a/y\n+++ b/y\n@@ -1,1 +1,1 @@\n-a\n+b\n";
        let mut state = PipelineState::new(DiffOptions::default(), ViewType::Unified, false);
        state.install(parse_unified_diff(text, &ParseOptions::default()).unwrap());

        assert_eq!(body_title(&state), " 1/2 files, scroll for more ");
        assert_eq!(content_height(&state), 5);
    }

    #[test]
    fn test_header_shows_toggles() {
        let state = PipelineState::new(
            DiffOptions {
                zip_nearby_sequences: false,
            },
            ViewType::Split,
            true,
        );
        let line = header_line(&state, true, &Theme::default());
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();

        assert!(text.contains("zip off"));
        assert!(text.contains("view split"));
        assert!(text.contains("gutter off"));
        assert!(text.contains("parsing..."));
    }
}
