/// Map a mime type (or a bare format name) to the audio format name the
/// transcription backend expects.
///
/// Bare names pass through lowercased; unknown `audio/*` types fall back to
/// their subtype.
pub fn audio_format(input: &str) -> String {
    let normalized = input
        .split(';')
        .next()
        .unwrap_or(input)
        .trim()
        .to_lowercase();

    if !normalized.contains('/') {
        return normalized;
    }

    let known = match normalized.as_str() {
        "audio/mpeg" | "audio/mp3" => Some("mp3"),
        "audio/wav" | "audio/wave" | "audio/x-wav" => Some("wav"),
        "audio/mp4" => Some("mp4"),
        "audio/m4a" | "audio/x-m4a" => Some("m4a"),
        "audio/webm" => Some("webm"),
        "audio/ogg" => Some("ogg"),
        _ => None,
    };

    match known {
        Some(format) => format.to_string(),
        None => normalized
            .strip_prefix("audio/")
            .unwrap_or(&normalized)
            .to_string(),
    }
}
