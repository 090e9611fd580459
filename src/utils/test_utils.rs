#[cfg(test)]
use std::path::Path;

#[cfg(test)]
use crate::core::app::App;
#[cfg(test)]
use crate::core::history::HistoryStore;
#[cfg(test)]
use crate::voice::VoiceCapture;

/// Builds an app whose history lives under `dir`, with no recognizer
/// configured and a relay URL nothing in the tests ever dials.
#[cfg(test)]
pub fn create_test_app(dir: &Path) -> App {
    let history = HistoryStore::new(dir.join("history.json"));
    let voice = VoiceCapture::new(None, "vi-VN".to_string());
    App::new("http://127.0.0.1:9".to_string(), history, voice)
}
