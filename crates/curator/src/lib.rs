mod backend;
mod error;
mod evidence;
pub mod fallback;
mod input;
pub mod normalize;
mod pipeline;
pub mod prompts;
mod types;

pub use backend::*;
pub use error::*;
pub use evidence::{Evidence, EvidenceMap, EvidenceMapBuilder};
pub use input::*;
pub use pipeline::{
    Task, produce_clusters, produce_drafts, produce_highlights, produce_share_card,
    produce_summary, run,
};
pub use types::*;

pub use curator_transcript::{Segment, TimeRange, align, segment_transcript};
