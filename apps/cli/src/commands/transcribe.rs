use serde_json::json;

use crate::GlobalArgs;
use crate::io::{print_json, read_bytes};
use crate::runtime::Runtime;

pub async fn run(runtime: &Runtime, global: &GlobalArgs, mime: &str) -> anyhow::Result<()> {
    let audio = read_bytes(global)?;
    anyhow::ensure!(!audio.is_empty(), "audio input is empty");

    let text = runtime.client.transcribe(&audio, mime).await?;
    tracing::info!(bytes = audio.len(), chars = text.chars().count(), "transcribed");
    print_json(&json!({ "text": text }))
}
