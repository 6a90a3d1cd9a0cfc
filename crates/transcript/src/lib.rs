mod align;
mod segment;
mod types;

pub use align::{CONTAINMENT_BONUS, align, align_index, match_score, normalize_for_match};
pub use segment::{MAX_SEGMENTS, segment_transcript, split_sentences};
pub use types::{Segment, TimeRange};
