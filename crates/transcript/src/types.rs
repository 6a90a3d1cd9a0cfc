/// One sentence-sized slice of a transcript with its time range in whole seconds.
///
/// Segments are produced once per request (see [`crate::segment_transcript`]) and
/// never mutated afterwards; every grounded quotation borrows its range from one.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub start_sec: u32,
    pub end_sec: u32,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,
}

impl Segment {
    pub fn new(start_sec: u32, end_sec: u32, text: impl Into<String>) -> Self {
        Self {
            start_sec,
            end_sec: end_sec.max(start_sec),
            text: text.into(),
            speaker: None,
        }
    }

    pub fn with_speaker(mut self, speaker: impl Into<String>) -> Self {
        self.speaker = Some(speaker.into());
        self
    }

    pub fn range(&self) -> TimeRange {
        TimeRange {
            start_sec: self.start_sec,
            end_sec: self.end_sec,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeRange {
    pub start_sec: u32,
    pub end_sec: u32,
}
