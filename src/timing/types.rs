//! Timeline type definitions
//!
//! These are the records handed to the playback scheduler and to lesson
//! key-hit extraction.

use crate::drum::Drum;
use crate::duration::TimeSignature;
use crate::pitch::Pitch;
use serde::Serialize;

/// One note of a score, placed at an absolute position.
///
/// # Fields
/// - `offset_samples`: Start in interleaved samples from the start of the score
/// - `offset_seconds`: The same start in seconds
/// - `length_samples`: Length of the melody voice (0 without a melody)
/// - `melody_pitches` / `melody_velocity`: Melody content, `None` when absent
/// - `percussion_hits` / `percussion_velocity`: Drum content, `None` when absent.
///   Only the last listed hi-hat state is kept (see `PercussionVoice::voiced_hits`)
/// - `has_hi_hat`: The hits include a hi-hat state
///
/// Entries with neither voice are silence that still advanced the offset.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    pub offset_samples: u64,
    pub offset_seconds: f64,
    pub length_samples: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub melody_pitches: Option<Vec<Pitch>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub melody_velocity: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percussion_hits: Option<Vec<Drum>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percussion_velocity: Option<u8>,
    pub has_hi_hat: bool,
}

impl TimelineEntry {
    pub fn is_silent(&self) -> bool {
        self.melody_pitches.is_none() && self.percussion_hits.is_none()
    }

    pub fn end_samples(&self) -> u64 {
        self.offset_samples + self.length_samples
    }
}

/// A single key to press in a lesson.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyHit {
    pub offset_samples: u64,
    pub offset_seconds: f64,
    pub pitch: Pitch,
    pub velocity: u8,
    pub length_samples: u64,
}

/// A score realized at a fixed tempo, signature and sample rate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    pub name: String,
    pub bpm: u32,
    pub sample_rate: u32,
    pub time_signature: TimeSignature,
    pub entries: Vec<TimelineEntry>,
}

impl Timeline {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TimelineEntry> {
        self.entries.iter()
    }

    /// Latest `end_samples` over all entries. A long early note can outlast
    /// the entries after it.
    pub fn total_samples(&self) -> u64 {
        self.entries
            .iter()
            .map(TimelineEntry::end_samples)
            .max()
            .unwrap_or(0)
    }

    pub fn duration_seconds(&self) -> f64 {
        super::samples_to_seconds(self.total_samples(), self.sample_rate)
    }

    /// Every sounding melody pitch as its own key hit, in timeline order.
    /// Rests are skipped.
    pub fn key_hits(&self) -> Vec<KeyHit> {
        self.entries
            .iter()
            .flat_map(|entry| {
                let velocity = entry.melody_velocity.unwrap_or(0);
                entry
                    .melody_pitches
                    .iter()
                    .flatten()
                    .filter(|p| !p.is_rest())
                    .map(move |&pitch| KeyHit {
                        offset_samples: entry.offset_samples,
                        offset_seconds: entry.offset_seconds,
                        pitch,
                        velocity,
                        length_samples: entry.length_samples,
                    })
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a TimelineEntry;
    type IntoIter = std::slice::Iter<'a, TimelineEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
