//! Key bindings for the preview.

use diff_pipeline::Preset;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key press asks the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    ScrollDown,
    ScrollUp,
    PageDown,
    PageUp,
    ScrollToTop,
    ToggleZip,
    ToggleGutter,
    ToggleViewType,
    LoadPreset(Preset),
    ReloadTexts,
}

/// Hints shown in the footer, in display order.
pub const HINTS: &[(&str, &str)] = &[
    ("j/k", "Scroll"),
    ("z", "Zip"),
    ("g", "Gutter"),
    ("v", "Split/Unified"),
    ("1/2/3", "Presets"),
    ("r", "Reload"),
    ("q", "Quit"),
];

pub fn command_for(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Command::Quit),
            KeyCode::Char('d') => Some(Command::PageDown),
            KeyCode::Char('u') => Some(Command::PageUp),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char('j') | KeyCode::Down => Some(Command::ScrollDown),
        KeyCode::Char('k') | KeyCode::Up => Some(Command::ScrollUp),
        KeyCode::PageDown | KeyCode::Char(' ') => Some(Command::PageDown),
        KeyCode::PageUp => Some(Command::PageUp),
        KeyCode::Home => Some(Command::ScrollToTop),
        KeyCode::Char('z') => Some(Command::ToggleZip),
        KeyCode::Char('g') => Some(Command::ToggleGutter),
        KeyCode::Char('v') => Some(Command::ToggleViewType),
        KeyCode::Char('1') => Some(Command::LoadPreset(Preset::Small)),
        KeyCode::Char('2') => Some(Command::LoadPreset(Preset::Medium)),
        KeyCode::Char('3') => Some(Command::LoadPreset(Preset::Large)),
        KeyCode::Char('r') => Some(Command::ReloadTexts),
        _ => None,
    }
}
