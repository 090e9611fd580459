use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{Local, Utc};

use crate::core::constants::EXPORT_FILE_STEM;
use crate::core::message::Message;

/// Renders the transcript as plain text, one `[HH:MM] label: content`
/// entry per message with a blank line between entries.
pub fn format_transcript(messages: &[Message]) -> String {
    messages
        .iter()
        .map(|msg| {
            let time = msg.timestamp.with_timezone(&Local).format("%H:%M");
            format!("[{}] {}: {}", time, msg.sender.label(), msg.content)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Writes the transcript to `gemini-chat-<date>.txt` under `dir` and
/// returns the path. Callers are expected to reject an empty history
/// before getting here.
pub fn export_transcript(
    messages: &[Message],
    dir: &Path,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let date = Utc::now().format("%Y-%m-%d");
    let path = dir.join(format!("{EXPORT_FILE_STEM}-{date}.txt"));

    let file = File::create(&path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(format_transcript(messages).as_bytes())?;
    writer.flush()?;

    Ok(path)
}
