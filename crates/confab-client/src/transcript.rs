//! Transcript export.
//!
//! Writes the visible conversation to a timestamped text file so a chat
//! can be kept after the terminal closes. Loading placeholders are
//! skipped; citations are listed under the message they belong to.

use crate::session::{Role, Session};
use chrono::Local;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Export the session transcript into `dir`.
///
/// Returns the path of the written file (`confab-YYYYMMDD_HHMMSS.txt`).
pub fn export_transcript(session: &Session, dir: &Path) -> Result<PathBuf, TranscriptError> {
    std::fs::create_dir_all(dir).map_err(TranscriptError::Io)?;

    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let path = dir.join(format!("confab-{timestamp}.txt"));

    std::fs::write(&path, render_transcript(session)).map_err(TranscriptError::Io)?;
    Ok(path)
}

/// Render the transcript as plain text.
pub fn render_transcript(session: &Session) -> String {
    let mut out = String::new();

    for message in session.messages() {
        let speaker = match message.role {
            Role::User => "You",
            Role::Assistant => "Assistant",
        };
        let _ = writeln!(out, "[{}] {speaker}: {}", message.time_str(), message.text);

        for citation in &message.citations {
            let _ = writeln!(out, "    source: {} <{}>", citation.label, citation.link);
        }
    }

    out
}

/// Errors that can occur exporting a transcript.
#[derive(Debug, thiserror::Error)]
pub enum TranscriptError {
    /// I/O error writing the transcript file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
