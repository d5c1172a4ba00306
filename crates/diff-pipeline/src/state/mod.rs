//! State owned by the orchestrator.

mod pipeline_state;

pub use pipeline_state::{should_submit, ParseInputs, PipelineState, ViewType};
