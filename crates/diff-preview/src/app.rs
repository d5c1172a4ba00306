//! Application state for the terminal preview.
//!
//! The app owns the orchestrator and is the only place actions are
//! dispatched from. Background work reports back over channels that the
//! main loop drains with [`App::pump`] before each frame.

use crate::cli::{InitialInput, TextSources};
use crate::keymap::Command;
use diff_pipeline::{
    Orchestrator, ParseDispatch, ParseOutcome, PipelineAction, PipelineEvent, Preset, PresetError,
    PresetLoader,
};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use tokio::runtime::Handle;

/// Rows from the bottom of the disclosed content at which one more file is
/// requested.
const LOAD_MORE_MARGIN: usize = 5;

/// Result of a preset fetch, sent back from the runtime.
#[derive(Debug)]
pub struct PresetMessage {
    pub preset: Preset,
    pub result: Result<String, PresetError>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    fn info(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            text: text.into(),
        }
    }

    fn success(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Success,
            text: text.into(),
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }
}

pub struct App<D> {
    orchestrator: Orchestrator<D>,
    outcomes: Receiver<ParseOutcome>,
    preset_tx: Sender<PresetMessage>,
    preset_rx: Receiver<PresetMessage>,
    loader: Arc<dyn PresetLoader>,
    runtime: Handle,
    text_sources: Option<TextSources>,
    loading_preset: Option<Preset>,
    scroll: usize,
    viewport_height: usize,
    status: StatusMessage,
    running: bool,
}

impl<D: ParseDispatch> App<D> {
    pub fn new(
        orchestrator: Orchestrator<D>,
        outcomes: Receiver<ParseOutcome>,
        loader: Arc<dyn PresetLoader>,
        runtime: Handle,
    ) -> Self {
        let (preset_tx, preset_rx) = channel();
        Self {
            orchestrator,
            outcomes,
            preset_tx,
            preset_rx,
            loader,
            runtime,
            text_sources: None,
            loading_preset: None,
            scroll: 0,
            viewport_height: 0,
            status: StatusMessage::info("Ready"),
            running: true,
        }
    }

    /// Files that `r` reads again, when comparing two texts.
    pub fn with_text_sources(mut self, sources: Option<TextSources>) -> Self {
        self.text_sources = sources;
        self
    }

    pub fn orchestrator(&self) -> &Orchestrator<D> {
        &self.orchestrator
    }

    pub fn into_orchestrator(self) -> Orchestrator<D> {
        self.orchestrator
    }

    pub fn status(&self) -> &StatusMessage {
        &self.status
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn loading_preset(&self) -> Option<Preset> {
        self.loading_preset
    }

    pub fn start(&mut self, input: InitialInput) {
        match input {
            InitialInput::Texts { old_text, new_text } => {
                self.dispatch(PipelineAction::SubmitTexts { old_text, new_text });
            }
            InitialInput::Diff(text) => {
                self.dispatch(PipelineAction::SetDiffText(text));
            }
            InitialInput::Preset(preset) => self.request_preset(preset),
        }
    }

    /// Fetch a preset on the runtime; the text arrives through [`App::pump`].
    pub fn request_preset(&mut self, preset: Preset) {
        log::info!("Loading {}", preset.label());
        self.loading_preset = Some(preset);
        self.status = StatusMessage::info(format!("Loading {}...", preset.label()));

        let loader = Arc::clone(&self.loader);
        let tx = self.preset_tx.clone();
        self.runtime.spawn(async move {
            let result = loader.load(preset).await;
            if tx.send(PresetMessage { preset, result }).is_err() {
                log::error!("Preset channel closed before {} arrived", preset);
            }
        });
    }

    /// Read the compared files again and submit them as new texts.
    pub fn reload_texts(&mut self) {
        let Some(sources) = &self.text_sources else {
            self.status = StatusMessage::info("Nothing to reload, start with --old and --new");
            return;
        };

        match sources.read() {
            Ok(input) => {
                log::info!(
                    "Reloading {} and {}",
                    sources.old.display(),
                    sources.new.display()
                );
                self.start(input);
            }
            Err(e) => {
                log::error!("{:#}", e);
                self.status = StatusMessage::error(format!("{:#}", e));
            }
        }
    }

    /// Drain finished background work. Returns true if anything arrived.
    pub fn pump(&mut self) -> bool {
        let mut changed = false;

        while let Ok(message) = self.preset_rx.try_recv() {
            changed = true;
            self.handle_preset(message);
        }

        while let Ok(outcome) = self.outcomes.try_recv() {
            changed = true;
            self.dispatch(PipelineAction::ParseFinished(outcome));
        }

        changed
    }

    pub fn handle_command(&mut self, command: Command) {
        match command {
            Command::Quit => self.running = false,
            Command::ScrollDown => self.scroll = self.scroll.saturating_add(1),
            Command::ScrollUp => self.scroll = self.scroll.saturating_sub(1),
            Command::PageDown => {
                self.scroll = self.scroll.saturating_add(self.viewport_height.max(1));
            }
            Command::PageUp => {
                self.scroll = self.scroll.saturating_sub(self.viewport_height.max(1));
            }
            Command::ScrollToTop => self.scroll = 0,
            Command::ToggleZip => {
                self.dispatch(PipelineAction::ToggleZipNearbySequences);
            }
            Command::ToggleGutter => {
                self.dispatch(PipelineAction::ToggleGutter);
            }
            Command::ToggleViewType => {
                self.dispatch(PipelineAction::ToggleViewType);
            }
            Command::LoadPreset(preset) => self.request_preset(preset),
            Command::ReloadTexts => self.reload_texts(),
        }
    }

    /// Keep the scroll position inside the content and disclose one more
    /// file once it gets close to the end of what is shown.
    pub fn sync_viewport(&mut self, content_height: usize, viewport_height: usize) {
        self.viewport_height = viewport_height;
        self.scroll = self
            .scroll
            .min(content_height.saturating_sub(viewport_height));

        let bottom = self.scroll + viewport_height + LOAD_MORE_MARGIN;
        if bottom >= content_height && self.orchestrator.state().has_more() {
            self.dispatch(PipelineAction::LoadMore);
        }
    }

    fn handle_preset(&mut self, message: PresetMessage) {
        let PresetMessage { preset, result } = message;
        if self.loading_preset == Some(preset) {
            self.loading_preset = None;
        }

        match result {
            Ok(text) => {
                // Same text and options as what is shown: no job, no events.
                if !self.dispatch(PipelineAction::PresetLoaded { preset, text }) {
                    self.status = StatusMessage::info(format!("{} unchanged", preset.label()));
                }
            }
            Err(e) => {
                log::error!("{}", e);
                self.status = StatusMessage::error(e.to_string());
            }
        }
    }

    /// Returns false if the action changed nothing.
    fn dispatch(&mut self, action: PipelineAction) -> bool {
        let events = self.orchestrator.dispatch(action);
        let changed = !events.is_empty();
        for event in events {
            self.observe(event);
        }
        changed
    }

    fn observe(&mut self, event: PipelineEvent) {
        match event {
            PipelineEvent::JobSubmitted { job_id, .. } => {
                self.status = StatusMessage::info(format!("Parsing ({})...", job_id));
            }
            PipelineEvent::ResultAccepted { files, .. } => {
                self.scroll = 0;
                self.status = StatusMessage::success(format!("Parsed {} file(s)", files));
            }
            PipelineEvent::ParseFailed { error, .. } => {
                self.status = StatusMessage::error(error.to_string());
            }
            PipelineEvent::ResultDiscarded { .. } | PipelineEvent::WindowAdvanced { .. } => {}
        }
    }
}
