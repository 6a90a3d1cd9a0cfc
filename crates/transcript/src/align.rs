use crate::types::{Segment, TimeRange};

/// Score added when one normalized string fully contains the other.
pub const CONTAINMENT_BONUS: u64 = 1000;

const STRIPPED_WIDE: &[char] = &[
    '，', '。', '！', '？', '、', '；', '：', '“', '”', '‘', '’', '（', '）', '《', '》', '【', '】',
    '…', '—', '·', '～',
];

fn is_stripped(c: char) -> bool {
    c.is_ascii_punctuation() || STRIPPED_WIDE.contains(&c)
}

/// Lowercase, drop punctuation and collapse whitespace runs to a single space.
pub fn normalize_for_match(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for c in text.chars().flat_map(char::to_lowercase) {
        if is_stripped(c) {
            continue;
        }
        if c.is_whitespace() {
            pending_space = !out.is_empty();
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        out.push(c);
    }

    out
}

/// Match score between an already-normalized quote and segment text.
///
/// Containment in either direction earns [`CONTAINMENT_BONUS`]; on top of that
/// every character of the quote found anywhere in the segment adds one,
/// including the single spaces normalization keeps. Repeated characters count
/// each time and nothing is normalized by length, so short quotes can score
/// well against long segments.
pub fn match_score(quote: &str, segment: &str) -> u64 {
    if quote.is_empty() || segment.is_empty() {
        return 0;
    }

    let bonus = if segment.contains(quote) || quote.contains(segment) {
        CONTAINMENT_BONUS
    } else {
        0
    };

    let overlap = quote
        .chars()
        .filter(|c| segment.contains(*c))
        .count() as u64;

    bonus + overlap
}

/// Index of the segment that best grounds `quote`.
///
/// The first segment with the strictly highest positive score wins. When no
/// segment scores above zero, `fallback_index` is used, clamped to the last
/// segment. Returns `None` only for an empty slice.
pub fn align_index(segments: &[Segment], quote: &str, fallback_index: usize) -> Option<usize> {
    let last = segments.len().checked_sub(1)?;
    let needle = normalize_for_match(quote);

    let mut best: Option<(usize, u64)> = None;
    for (index, segment) in segments.iter().enumerate() {
        let score = match_score(&needle, &normalize_for_match(&segment.text));
        if score > 0 && best.is_none_or(|(_, top)| score > top) {
            best = Some((index, score));
        }
    }

    Some(best.map_or(fallback_index.min(last), |(index, _)| index))
}

/// Time range of the segment that best grounds `quote`; `{0, 0}` when there
/// are no segments.
pub fn align(segments: &[Segment], quote: &str, fallback_index: usize) -> TimeRange {
    align_index(segments, quote, fallback_index)
        .map(|index| segments[index].range())
        .unwrap_or_default()
}
