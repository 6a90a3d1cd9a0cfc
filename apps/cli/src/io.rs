use std::io::Read;

use anyhow::Context;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::GlobalArgs;

pub fn read_bytes(global: &GlobalArgs) -> anyhow::Result<Vec<u8>> {
    match &global.input {
        Some(path) => {
            std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))
        }
        None => {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

pub fn read_text(global: &GlobalArgs) -> anyhow::Result<String> {
    String::from_utf8(read_bytes(global)?).context("input is not valid UTF-8")
}

pub fn read_json<T: DeserializeOwned>(global: &GlobalArgs) -> anyhow::Result<T> {
    let bytes = read_bytes(global)?;
    serde_json::from_slice(&bytes).context("input is not a valid request")
}

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
