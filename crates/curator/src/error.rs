pub type Result<T> = std::result::Result<T, Error>;

/// Caller mistakes in task input. Backend trouble never surfaces here; it is
/// absorbed by the fallback path and reported through [`crate::Provenance`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("transcript is required")]
    EmptyTranscript,
    #[error("transcript has no usable sentences")]
    NoSegments,
    #[error("segment ends at {end_sec}s before it starts at {start_sec}s")]
    InvalidSegment { start_sec: u32, end_sec: u32 },
    #[error("at least {required} comments are required, got {found}")]
    TooFewComments { found: usize, required: usize },
    #[error("post is required")]
    EmptyPost,
    #[error("at least one comment is required")]
    NoComments,
}
