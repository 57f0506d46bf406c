use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Tag sequence and word sequence of a training pair differ in length.
    #[error("misaligned training pair #{index}: {tags} tags vs {words} words")]
    MisalignedTrainingPair {
        index: usize,
        tags: usize,
        words: usize,
    },
    #[error("corpus mismatch: {tags} tag lines vs {sentences} sentence lines")]
    CorpusMismatch { tags: usize, sentences: usize },
    #[error("model has no transitions out of the start tag")]
    UntrainedModel,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
