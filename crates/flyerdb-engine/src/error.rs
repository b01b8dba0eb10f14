use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// The flyer's publication date could not be read. Every record from the
    /// flyer depends on it, so the whole flyer is rejected.
    #[error("unrecognized flyer date \"{text}\": {reason}")]
    DateFormat { text: String, reason: String },
}
