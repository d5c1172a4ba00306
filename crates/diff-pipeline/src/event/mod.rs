//! Events emitted by the orchestrator.

mod pipeline_event;

pub use pipeline_event::PipelineEvent;
