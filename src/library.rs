//! # Song Library
//!
//! A folder of `.song` files, one per score. File names carry the score kind
//! as a prefix:
//!
//! | Kind | File name |
//! |---|---|
//! | Melody | `MELODY_<name>.song` |
//! | DrumLoop | `DRUMLOOP_<name>.song` |
//! | Combined | `SONG_<name>.song` |
//! | Empty | `EMPTY_<name>.song` |
//!
//! A score's kind changes as it is edited, so saving removes any file with the
//! same name under a different prefix.

use crate::codec::{decode, encode, SONG_EXTENSION};
use crate::config::Config;
use crate::error::SongError;
use crate::score::{Score, ScoreKind};
use std::fs;
use std::path::{Path, PathBuf};

/// A song file found in the library folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongEntry {
    pub path: PathBuf,
    pub kind: ScoreKind,
    pub name: String,
}

/// File name for `name` saved as `kind`, e.g. `SONG_Groove.song`.
pub fn file_name(kind: ScoreKind, name: &str) -> String {
    format!("{}{}.{}", kind.file_prefix(), name, SONG_EXTENSION)
}

/// Split a file name into its kind and score name.
///
/// # Example
/// ```
/// use songbook::library::parse_file_name;
/// use songbook::ScoreKind;
///
/// assert_eq!(
///     parse_file_name("DRUMLOOP_Rock Beat.song"),
///     Some((ScoreKind::DrumLoop, "Rock Beat".to_string()))
/// );
/// assert_eq!(parse_file_name("notes.txt"), None);
/// ```
pub fn parse_file_name(file_name: &str) -> Option<(ScoreKind, String)> {
    let stem = file_name.strip_suffix(&format!(".{}", SONG_EXTENSION))?;
    ScoreKind::ALL.into_iter().find_map(|kind| {
        stem.strip_prefix(kind.file_prefix())
            .map(|name| (kind, name.to_string()))
    })
}

/// Read and decode a single `.song` file.
pub fn load_file(path: impl AsRef<Path>) -> Result<Score, SongError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|e| SongError::io(path, e))?;
    let score = decode(&source)?;
    log::debug!("loaded '{}' from {}", score.name(), path.display());
    Ok(score)
}

/// The songs folder.
#[derive(Debug, Clone)]
pub struct SongLibrary {
    dir: PathBuf,
}

impl SongLibrary {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.songs_dir.clone())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn file_name_for(&self, score: &Score) -> String {
        file_name(score.kind(), score.name())
    }

    pub fn path_for(&self, score: &Score) -> PathBuf {
        self.dir.join(self.file_name_for(score))
    }

    /// Write `score` to its file, creating the folder if needed.
    ///
    /// # Errors
    /// `InvalidState` for names that cannot be file names (empty, or
    /// containing a path separator); `Io` when the write fails.
    pub fn save(&self, score: &Score) -> Result<PathBuf, SongError> {
        validate_name(score.name())?;

        fs::create_dir_all(&self.dir).map_err(|e| SongError::io(&self.dir, e))?;

        let path = self.path_for(score);
        fs::write(&path, encode(score)).map_err(|e| SongError::io(&path, e))?;

        for kind in ScoreKind::ALL {
            if kind == score.kind() {
                continue;
            }
            let stale = self.dir.join(file_name(kind, score.name()));
            if stale.exists() {
                fs::remove_file(&stale).map_err(|e| SongError::io(&stale, e))?;
                log::debug!("removed stale {}", stale.display());
            }
        }

        log::debug!("saved '{}' to {}", score.name(), path.display());
        Ok(path)
    }

    pub fn load(&self, path: impl AsRef<Path>) -> Result<Score, SongError> {
        load_file(path)
    }

    pub fn load_named(&self, kind: ScoreKind, name: &str) -> Result<Score, SongError> {
        self.load(self.dir.join(file_name(kind, name)))
    }

    /// Every recognized `.song` file, sorted by file name.
    ///
    /// A missing folder is an empty library.
    pub fn list(&self) -> Result<Vec<SongEntry>, SongError> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let read_dir = fs::read_dir(&self.dir).map_err(|e| SongError::io(&self.dir, e))?;
        let mut entries = Vec::new();

        for item in read_dir {
            let item = item.map_err(|e| SongError::io(&self.dir, e))?;
            let path = item.path();
            if !path.is_file() {
                continue;
            }

            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            match parse_file_name(file_name) {
                Some((kind, name)) => entries.push(SongEntry {
                    path: path.clone(),
                    kind,
                    name,
                }),
                None => log::debug!("skipping {}", path.display()),
            }
        }

        entries.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));
        Ok(entries)
    }
}

fn validate_name(name: &str) -> Result<(), SongError> {
    if name.trim().is_empty() {
        return Err(SongError::InvalidState(
            "cannot save a score without a name".to_string(),
        ));
    }
    if name.contains(['/', '\\']) || name.contains(['\r', '\n']) {
        return Err(SongError::InvalidState(format!(
            "score name '{}' cannot be used as a file name",
            name
        )));
    }
    Ok(())
}
