//! # Game records
//! Histories are persisted as plain text logs:
//!
//! ```text
//! # 2024-05-01 18:03:22
//! Pe2e4   Pe7e5
//! Ng1f3   Nb8c6
//! Bf1b5
//!
//! ```
//!
//! A header comment carries the local time the log was written at, then each
//! line holds one move of each side, White's padded to 8 columns. A blank line
//! closes the game. The same files are read back as move lists for playback:
//! blank lines and `#` comments are skipped, everything else is split on
//! whitespace.

use std::{
    fs::File,
    io::{self, BufRead, BufReader, Write},
    path::{Path, PathBuf},
};

use chrono::Local;
use thiserror::Error;

use crate::game::position::HistoryEntry;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("No game record at {0}")]
    Missing(PathBuf),
    #[error(transparent)]
    Io(#[from] io::Error),
}

fn current_datetime() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Writes a history as a game log.
pub fn write_log<W: Write>(mut writer: W, history: &[HistoryEntry]) -> io::Result<()> {
    writeln!(writer, "# {}", current_datetime())?;
    for pair in history.chunks(2) {
        match pair {
            [white, black] => writeln!(writer, "{:<8}{}", white.note.to_string(), black.note)?,
            [white] => writeln!(writer, "{}", white.note)?,
            _ => (),
        }
    }
    writeln!(writer)?;
    writer.flush()
}

/// Writes a history as the game log at `path`, replacing any previous log.
pub fn save(path: impl AsRef<Path>, history: &[HistoryEntry]) -> Result<(), RecordError> {
    write_log(File::create(path.as_ref())?, history)?;
    Ok(())
}

/// Reads the move tokens of a game log.
pub fn read_tokens<R: BufRead>(reader: R) -> io::Result<Vec<String>> {
    let mut tokens = vec![];
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        tokens.extend(line.split_whitespace().map(str::to_string));
    }
    Ok(tokens)
}

/// Reads the move tokens of the game log at `path`.
pub fn load(path: impl AsRef<Path>) -> Result<Vec<String>, RecordError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => RecordError::Missing(path.to_path_buf()),
        _ => RecordError::Io(err),
    })?;
    Ok(read_tokens(BufReader::new(file))?)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::game::notation::Note;

    fn entries(tokens: &[&str]) -> Vec<HistoryEntry> {
        tokens
            .iter()
            .map(|token| HistoryEntry::now(token.parse::<Note>().unwrap()))
            .collect()
    }

    #[test]
    fn log_layout() {
        let mut out = vec![];
        write_log(&mut out, &entries(&["Pe2e4", "Pe7e5", "Ng1f3"])).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert!(lines[0].starts_with("# "));
        assert_eq!(lines[1], "Pe2e4   Pe7e5");
        assert_eq!(lines[2], "Ng1f3");
        assert_eq!(lines[3], "");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn tokens_skip_comments() {
        let text = "# header\n\nPe2e4   Pe7e5\n tie  nope\n\n# another game\nPd2d4\n";
        let tokens = read_tokens(text.as_bytes()).unwrap();
        assert_eq!(tokens, ["Pe2e4", "Pe7e5", "tie", "nope", "Pd2d4"]);
    }

    #[test]
    fn save_replaces() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.log");
        save(&path, &entries(&["Pe2e4", "Pe7e5"])).unwrap();
        save(&path, &entries(&["Pd2d4"])).unwrap();
        assert_eq!(load(&path).unwrap(), ["Pd2d4"]);
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.matches('#').count(), 1);
    }

    #[test]
    fn missing_log() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nowhere.log");
        assert!(matches!(load(&path), Err(RecordError::Missing(missing)) if missing == path));
    }
}
