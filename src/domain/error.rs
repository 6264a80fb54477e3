// Domain errors. Data-quality problems never surface here; they are
// dropped or defaulted by the pipeline instead.

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PipelineError {
    #[error("bucket interval must be positive, got {0} ms")]
    InvalidInterval(i64),
}
