use curator::{Segment, align as align_quote, check_segments, segment_transcript};
use serde::Deserialize;

use crate::GlobalArgs;
use crate::io::{print_json, read_json, read_text};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AlignRequest {
    segments: Vec<Segment>,
    #[serde(default)]
    quote: String,
    #[serde(default)]
    fallback_index: usize,
}

pub fn segment(global: &GlobalArgs) -> anyhow::Result<()> {
    let transcript = read_text(global)?;
    print_json(&segment_transcript(&transcript))
}

pub fn align(global: &GlobalArgs) -> anyhow::Result<()> {
    let request: AlignRequest = read_json(global)?;
    check_segments(&request.segments)?;
    print_json(&align_quote(
        &request.segments,
        &request.quote,
        request.fallback_index,
    ))
}
