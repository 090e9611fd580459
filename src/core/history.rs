use std::fs;
use std::path::PathBuf;

use tracing::warn;

use crate::core::message::Message;

/// File-backed store for the session history. The whole message list is
/// rewritten on every mutation; there is no incremental form.
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: PathBuf) -> Self {
        HistoryStore { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Loads the persisted history. A missing file is an empty session;
    /// unreadable or corrupt data resets to empty rather than failing, so
    /// a bad history file never blocks startup.
    pub fn load(&self) -> Vec<Message> {
        if !self.path.exists() {
            return Vec::new();
        }
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "could not read history file");
                return Vec::new();
            }
        };
        match serde_json::from_str(&contents) {
            Ok(messages) => messages,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "history file is corrupt, starting empty");
                Vec::new()
            }
        }
    }

    pub fn save(&self, messages: &[Message]) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string(messages)?;
        fs::write(&self.path, contents)?;
        Ok(())
    }
}
