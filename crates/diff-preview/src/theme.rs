use ratatui::{prelude::*, style::palette::tailwind};

/// Colors used by the preview.
#[derive(Debug, Clone)]
pub struct Theme {
    // Backgrounds
    pub bg_primary: Color,
    pub bg_panel: Color,

    // Text
    pub text_primary: Color,
    pub text_muted: Color,

    // Accents
    pub accent_primary: Color,

    // Status
    pub status_success: Color,
    pub status_error: Color,
    pub status_warning: Color,

    // Diff lines
    pub addition_bg: Color,
    pub deletion_bg: Color,
    pub hunk_header_bg: Color,
    pub line_number_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            bg_primary: tailwind::SLATE.c950,
            bg_panel: tailwind::SLATE.c900,

            text_primary: tailwind::SLATE.c100,
            text_muted: tailwind::SLATE.c400,

            accent_primary: tailwind::CYAN.c400,

            status_success: tailwind::GREEN.c400,
            status_error: tailwind::RED.c400,
            status_warning: tailwind::YELLOW.c400,

            addition_bg: Color::Rgb(20, 40, 20),
            deletion_bg: Color::Rgb(40, 20, 20),
            hunk_header_bg: Color::Rgb(30, 30, 50),
            line_number_fg: tailwind::SLATE.c500,
        }
    }

    pub fn panel_border(&self) -> Style {
        Style::default().fg(self.text_muted)
    }

    pub fn panel_title(&self) -> Style {
        Style::default()
            .fg(self.accent_primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn key_hint(&self) -> Style {
        Style::default()
            .fg(self.accent_primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.text_muted)
    }

    pub fn text(&self) -> Style {
        Style::default().fg(self.text_primary)
    }

    pub fn error(&self) -> Style {
        Style::default()
            .fg(self.status_error)
            .add_modifier(Modifier::BOLD)
    }

    pub fn warning(&self) -> Style {
        Style::default().fg(self.status_warning)
    }

    pub fn success(&self) -> Style {
        Style::default().fg(self.status_success)
    }
}
