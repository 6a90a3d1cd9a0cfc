use crate::types::Segment;

/// Upper bound on segments produced from one transcript.
pub const MAX_SEGMENTS: usize = 50;

const SEGMENT_STRIDE_SEC: u32 = 10;
const SEGMENT_SPAN_SEC: u32 = 9;

fn is_sentence_boundary(c: char) -> bool {
    matches!(c, '\n' | '。' | '！' | '？' | '!' | '?')
}

/// Sentence-sized chunks of `transcript`, trimmed, with empty chunks dropped.
pub fn split_sentences(transcript: &str) -> impl Iterator<Item = &str> {
    transcript
        .split(is_sentence_boundary)
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
}

/// Split a plain-text transcript into time-coded segments.
///
/// Text transcripts carry no timing, so chunk `i` is assigned the synthetic
/// range `[10i, 10i + 9]`. Only the first [`MAX_SEGMENTS`] chunks are kept.
pub fn segment_transcript(transcript: &str) -> Vec<Segment> {
    split_sentences(transcript)
        .take(MAX_SEGMENTS)
        .enumerate()
        .map(|(index, text)| {
            let start_sec = index as u32 * SEGMENT_STRIDE_SEC;
            Segment::new(start_sec, start_sec + SEGMENT_SPAN_SEC, text)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_full_width_punctuation() {
        let segments = segment_transcript("我们先对齐目标。再讨论执行路径。");

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].text, "我们先对齐目标");
        assert_eq!((segments[0].start_sec, segments[0].end_sec), (0, 9));
        assert_eq!(segments[1].text, "再讨论执行路径");
        assert_eq!((segments[1].start_sec, segments[1].end_sec), (10, 19));
    }

    #[test]
    fn splits_on_newlines_and_ascii_marks() {
        let texts: Vec<_> = split_sentences("first line\nreally? yes!  \n\n  last").collect();
        assert_eq!(texts, ["first line", "really", "yes", "last"]);
    }

    #[test]
    fn punctuation_only_transcript_has_no_segments() {
        assert!(segment_transcript("。！？\n  \n").is_empty());
    }

    #[test]
    fn caps_segment_count() {
        let transcript = "句子。".repeat(MAX_SEGMENTS + 10);
        let segments = segment_transcript(&transcript);

        assert_eq!(segments.len(), MAX_SEGMENTS);
        let last = segments.last().unwrap();
        assert_eq!(last.start_sec, (MAX_SEGMENTS as u32 - 1) * 10);
    }
}
