//! Composition root: routes actions to the synthesizer, the coordinator and
//! the disclosure window.
//!
//! The orchestrator is the single writer of [`PipelineState`]. Every change
//! goes through [`Orchestrator::dispatch`], which takes `&mut self`, so the
//! pending token, the installed sequence and the window cannot be mutated
//! from anywhere else.

use crate::action::PipelineAction;
use crate::event::PipelineEvent;
use crate::job::{DiffOptions, ParseCoordinator, ParseDispatch, ParseOutcome, Resolution};
use crate::state::{should_submit, ParseInputs, PipelineState};
use crate::synth::synthesize;

pub struct Orchestrator<D> {
    state: PipelineState,
    coordinator: ParseCoordinator<D>,
}

impl<D: ParseDispatch> Orchestrator<D> {
    pub fn new(dispatcher: D, state: PipelineState) -> Self {
        Self {
            state,
            coordinator: ParseCoordinator::new(dispatcher),
        }
    }

    pub fn state(&self) -> &PipelineState {
        &self.state
    }

    pub fn coordinator(&self) -> &ParseCoordinator<D> {
        &self.coordinator
    }

    /// Give back the dispatcher, e.g. to shut the worker down.
    pub fn into_dispatcher(self) -> D {
        self.coordinator.into_dispatcher()
    }

    /// Whether a submitted job has not been answered yet.
    pub fn is_parsing(&self) -> bool {
        self.coordinator.pending().is_some()
    }

    /// Process one action and report what changed.
    pub fn dispatch(&mut self, action: PipelineAction) -> Vec<PipelineEvent> {
        let mut events = Vec::new();

        match action {
            PipelineAction::SubmitTexts { old_text, new_text } => {
                let diff_text = synthesize(&old_text, &new_text);
                self.update_inputs(Some(diff_text), None, &mut events);
            }
            PipelineAction::SetDiffText(diff_text) => {
                self.update_inputs(Some(diff_text), None, &mut events);
            }
            PipelineAction::PresetLoaded { preset, text } => {
                log::info!("Preset {} loaded ({} bytes)", preset, text.len());
                self.update_inputs(Some(text), None, &mut events);
            }
            PipelineAction::SetZipNearbySequences(zip) => {
                let options = DiffOptions {
                    zip_nearby_sequences: zip,
                };
                self.update_inputs(None, Some(options), &mut events);
            }
            PipelineAction::ToggleZipNearbySequences => {
                let options = DiffOptions {
                    zip_nearby_sequences: !self.state.options.zip_nearby_sequences,
                };
                self.update_inputs(None, Some(options), &mut events);
            }
            PipelineAction::ParseFinished(outcome) => {
                self.handle_outcome(outcome, &mut events);
            }
            PipelineAction::LoadMore => {
                self.load_more(&mut events);
            }
            PipelineAction::ToggleGutter => {
                self.state.hide_gutter = !self.state.hide_gutter;
            }
            PipelineAction::SetViewType(view_type) => {
                self.state.view_type = view_type;
            }
            PipelineAction::ToggleViewType => {
                self.state.view_type = self.state.view_type.toggled();
            }
        }

        events
    }

    /// Apply new parse inputs and submit a job if they differ from the
    /// current ones.
    fn update_inputs(
        &mut self,
        diff_text: Option<String>,
        options: Option<DiffOptions>,
        events: &mut Vec<PipelineEvent>,
    ) {
        let options = options.unwrap_or(self.state.options);
        let changed = {
            let next = ParseInputs {
                diff_text: diff_text.as_deref().unwrap_or(&self.state.raw_diff_text),
                options,
            };
            should_submit(&self.state.inputs(), &next)
        };
        if !changed {
            log::debug!("Parse inputs unchanged, no job submitted");
            return;
        }

        if let Some(diff_text) = diff_text {
            self.state.raw_diff_text = diff_text;
        }
        self.state.options = options;

        let job_id = self
            .coordinator
            .submit(self.state.raw_diff_text.clone(), options);
        events.push(PipelineEvent::JobSubmitted { job_id, options });
    }

    fn handle_outcome(&mut self, outcome: ParseOutcome, events: &mut Vec<PipelineEvent>) {
        match self.coordinator.resolve(outcome) {
            Resolution::Accepted { job_id, diff } => {
                let files = diff.len();
                log::info!("Accepted {} with {} file(s)", job_id, files);
                self.state.install(diff);
                events.push(PipelineEvent::ResultAccepted { job_id, files });
            }
            Resolution::Failed { job_id, error } => {
                log::warn!("{} failed, keeping previous diff: {}", job_id, error);
                self.state.last_error = Some(error.to_string());
                events.push(PipelineEvent::ParseFailed { job_id, error });
            }
            Resolution::Stale { job_id } => {
                log::debug!("Discarding result of superseded {}", job_id);
                events.push(PipelineEvent::ResultDiscarded { job_id });
            }
        }
    }

    fn load_more(&mut self, events: &mut Vec<PipelineEvent>) {
        let len = self.state.parsed.len();
        if !self.state.window.has_more(len) {
            return;
        }

        self.state.window = self.state.window.advance(len);
        events.push(PipelineEvent::WindowAdvanced {
            count: self.state.window.count(),
            has_more: self.state.window.has_more(len),
        });
    }
}
