/// Pipeline orchestration errors.
///
/// These never cross the pipeline boundary; the engine converts them into
/// `PipelineOutcome` variants before returning.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("{stage} stage failed: {reason}")]
    StageFailed { stage: &'static str, reason: String },
}
