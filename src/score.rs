//! # Score Container
//!
//! An ordered list of notes plus summary state that every mutation keeps
//! current before it returns:
//!
//! - melody / percussion note counts
//! - `kind`, a pure function of the two counts
//! - cached highest and lowest sounding pitch
//!
//! Adding a note folds its pitches into the cached extremes directly. Removing
//! or replacing the note that holds an extreme rescans the whole score for
//! that extreme.
//!
//! ## Example
//! ```rust
//! use songbook::{DurationBase, MelodyVoice, Note, Pitch, Score, ScoreKind};
//!
//! let mut score = Score::new("Scale");
//! for ordinal in [48, 50, 52] {
//!     let pitch = Pitch::from_ordinal(ordinal).unwrap();
//!     let voice = MelodyVoice::new(vec![pitch], 100, DurationBase::Quarter.into())?;
//!     score.add_note(Note::melody(voice, DurationBase::Quarter.into()));
//! }
//!
//! assert_eq!(score.kind(), ScoreKind::Melody);
//! assert_eq!(score.highest_pitch()?.ordinal(), 52);
//!
//! score.remove_note(2)?;
//! assert_eq!(score.highest_pitch()?.ordinal(), 50);
//! # Ok::<(), songbook::SongError>(())
//! ```

use crate::config::Config;
use crate::duration::TimeSignature;
use crate::error::SongError;
use crate::note::Note;
use crate::pitch::Pitch;
use serde::Serialize;

pub const DEFAULT_BPM: u32 = 120;

/// What a score contains, derived from its notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoreKind {
    Empty,    // 0
    Melody,   // 1
    DrumLoop, // 2
    Combined, // 3
}

impl ScoreKind {
    pub const ALL: [ScoreKind; 4] = [
        ScoreKind::Empty,
        ScoreKind::Melody,
        ScoreKind::DrumLoop,
        ScoreKind::Combined,
    ];

    pub fn from_counts(melody_count: usize, percussion_count: usize) -> Self {
        match (melody_count > 0, percussion_count > 0) {
            (true, true) => ScoreKind::Combined,
            (true, false) => ScoreKind::Melody,
            (false, true) => ScoreKind::DrumLoop,
            (false, false) => ScoreKind::Empty,
        }
    }

    pub fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        Self::ALL.get(ordinal as usize).copied()
    }

    /// File name prefix used in the songs folder.
    pub fn file_prefix(self) -> &'static str {
        match self {
            ScoreKind::Empty => "EMPTY_",
            ScoreKind::Melody => "MELODY_",
            ScoreKind::DrumLoop => "DRUMLOOP_",
            ScoreKind::Combined => "SONG_",
        }
    }
}

/// A named, tempo-tagged sequence of notes.
#[derive(Debug, Clone, PartialEq)]
pub struct Score {
    name: String,
    bpm: u32,
    time_signature: TimeSignature,
    notes: Vec<Note>,
    melody_count: usize,
    percussion_count: usize,
    highest: Option<Pitch>,
    lowest: Option<Pitch>,
    kind: ScoreKind,
}

impl Default for Score {
    fn default() -> Self {
        Self::new("")
    }
}

impl Score {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bpm: DEFAULT_BPM,
            time_signature: TimeSignature::default(),
            notes: Vec::new(),
            melody_count: 0,
            percussion_count: 0,
            highest: None,
            lowest: None,
            kind: ScoreKind::Empty,
        }
    }

    /// An empty score using the configured default tempo.
    pub fn with_config(name: impl Into<String>, config: &Config) -> Self {
        Self {
            bpm: config.default_bpm,
            ..Self::new(name)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bpm(&self) -> u32 {
        self.bpm
    }

    pub fn time_signature(&self) -> TimeSignature {
        self.time_signature
    }

    pub fn kind(&self) -> ScoreKind {
        self.kind
    }

    pub fn note_count(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn melody_count(&self) -> usize {
        self.melody_count
    }

    pub fn percussion_count(&self) -> usize {
        self.percussion_count
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Note> {
        self.notes.iter()
    }

    pub fn note(&self, index: usize) -> Result<&Note, SongError> {
        let len = self.notes.len();
        self.notes
            .get(index)
            .ok_or_else(|| index_error(index, len))
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Set the tempo. Zero is rejected because it has no timing.
    pub fn set_bpm(&mut self, bpm: u32) -> Result<(), SongError> {
        if bpm == 0 {
            return Err(SongError::InvalidState(
                "BPM must be greater than zero".to_string(),
            ));
        }
        self.bpm = bpm;
        Ok(())
    }

    pub fn set_time_signature(&mut self, time_signature: TimeSignature) {
        self.time_signature = time_signature;
    }

    /// Highest sounding pitch in the score.
    ///
    /// # Errors
    /// `InvalidState` when the score has no pitches (empty, drum loop, or rests only).
    pub fn highest_pitch(&self) -> Result<Pitch, SongError> {
        self.highest.ok_or_else(|| self.no_pitches())
    }

    /// Lowest sounding pitch in the score.
    ///
    /// # Errors
    /// `InvalidState` when the score has no pitches (empty, drum loop, or rests only).
    pub fn lowest_pitch(&self) -> Result<Pitch, SongError> {
        self.lowest.ok_or_else(|| self.no_pitches())
    }

    pub fn add_note(&mut self, note: Note) {
        self.count_in(&note);
        self.fold_extremes(note.highest_pitch(), note.lowest_pitch());
        self.notes.push(note);
        self.refresh_kind();
    }

    /// Remove and return the note at `index`.
    pub fn remove_note(&mut self, index: usize) -> Result<Note, SongError> {
        self.check_index(index)?;

        let removed = self.notes.remove(index);
        self.count_out(&removed);
        self.rescan_if_held(&removed);
        self.refresh_kind();
        Ok(removed)
    }

    /// Put `note` at `index` and return the note it replaced.
    pub fn replace_note(&mut self, note: Note, index: usize) -> Result<Note, SongError> {
        self.check_index(index)?;

        self.count_in(&note);
        let (high, low) = (note.highest_pitch(), note.lowest_pitch());
        let replaced = std::mem::replace(&mut self.notes[index], note);
        self.count_out(&replaced);
        // The incoming note already sits in `notes`, so a rescan covers it too.
        self.rescan_if_held(&replaced);
        self.fold_extremes(high, low);
        self.refresh_kind();
        Ok(replaced)
    }

    fn check_index(&self, index: usize) -> Result<(), SongError> {
        if index < self.notes.len() {
            return Ok(());
        }
        if cfg!(debug_assertions) {
            log::warn!(
                "note index {} out of bounds in score '{}' ({} notes)",
                index,
                self.name,
                self.notes.len()
            );
        }
        Err(index_error(index, self.notes.len()))
    }

    fn count_in(&mut self, note: &Note) {
        if note.has_melody() {
            self.melody_count += 1;
        }
        if note.has_percussion() {
            self.percussion_count += 1;
        }
    }

    fn count_out(&mut self, note: &Note) {
        if note.has_melody() {
            self.melody_count -= 1;
        }
        if note.has_percussion() {
            self.percussion_count -= 1;
        }
    }

    fn fold_extremes(&mut self, high: Option<Pitch>, low: Option<Pitch>) {
        if let Some(high) = high {
            if self.highest.map_or(true, |current| high > current) {
                self.highest = Some(high);
            }
        }
        if let Some(low) = low {
            if self.lowest.map_or(true, |current| low < current) {
                self.lowest = Some(low);
            }
        }
    }

    fn rescan_if_held(&mut self, outgoing: &Note) {
        if self.highest.is_some_and(|p| outgoing.contains_pitch(p)) {
            self.highest = self.notes.iter().filter_map(Note::highest_pitch).max();
        }
        if self.lowest.is_some_and(|p| outgoing.contains_pitch(p)) {
            self.lowest = self.notes.iter().filter_map(Note::lowest_pitch).min();
        }
    }

    fn refresh_kind(&mut self) {
        self.kind = ScoreKind::from_counts(self.melody_count, self.percussion_count);
    }

    fn no_pitches(&self) -> SongError {
        SongError::InvalidState(format!(
            "score '{}' ({:?}) has no pitches",
            self.name, self.kind
        ))
    }
}

fn index_error(index: usize, len: usize) -> SongError {
    SongError::IndexError { index, len }
}

impl<'a> IntoIterator for &'a Score {
    type Item = &'a Note;
    type IntoIter = std::slice::Iter<'a, Note>;

    fn into_iter(self) -> Self::IntoIter {
        self.notes.iter()
    }
}
