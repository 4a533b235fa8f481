//! Timeline generation engine
//!
//! Walks a score in order, accumulating each note's offset into an absolute
//! sample position.

use super::types::{Timeline, TimelineEntry};
use super::{CHANNELS, DEFAULT_SAMPLE_RATE};
use crate::duration::{Duration, TimeSignature};
use crate::note::{MelodyVoice, PercussionVoice};
use crate::score::Score;
use num_rational::Ratio;

fn widen(ratio: Ratio<u32>) -> Ratio<u64> {
    Ratio::new(*ratio.numer() as u64, *ratio.denom() as u64)
}

/// Number of interleaved samples `duration` lasts at `bpm` and `sample_rate`.
///
/// Returns 0 for `Duration::NONE`, and for a zero BPM or sample rate.
///
/// # Example
/// ```rust
/// use songbook::timing::samples_for_duration;
/// use songbook::{Duration, DurationBase, TimeSignature};
///
/// let six_eight = TimeSignature::new(6, DurationBase::Eighth);
/// let eighth = Duration::new(DurationBase::Eighth);
///
/// // In x/8 time the eighth note gets the beat
/// assert_eq!(samples_for_duration(120, 44100, &eighth, &six_eight), 44100);
/// ```
pub fn samples_for_duration(
    bpm: u32,
    sample_rate: u32,
    duration: &Duration,
    time_signature: &TimeSignature,
) -> u64 {
    if bpm == 0 || sample_rate == 0 || duration.is_none() {
        return 0;
    }

    let samples_per_beat = Ratio::new(
        CHANNELS as u64 * 60 * sample_rate as u64,
        bpm as u64,
    );
    let samples_per_quarter = samples_per_beat / widen(time_signature.quarter_notes_per_beat());

    (samples_per_quarter * widen(duration.ratio_to_quarter_note())).to_integer()
}

/// Convert an interleaved sample count to seconds.
pub fn samples_to_seconds(samples: u64, sample_rate: u32) -> f64 {
    if sample_rate == 0 {
        return 0.0;
    }
    samples as f64 / (CHANNELS as f64 * sample_rate as f64)
}

/// Build the timeline of `score` at the default 44100 Hz.
pub fn score_to_timeline(score: &Score) -> Timeline {
    score_to_timeline_at(score, DEFAULT_SAMPLE_RATE)
}

/// Build the timeline of `score` at `sample_rate`.
///
/// Each note's offset is converted and added to the running position before
/// the note is placed, so the first note starts at its own offset. Notes with
/// no voice still advance the position. Drum hits are exported as voiced, so
/// at most one hi-hat state sounds per entry.
///
/// # Example
/// ```rust
/// use songbook::timing::score_to_timeline_at;
///
/// let score = songbook::decode("Two\n1;120;4;3\n60;3;6;100\n62;3;3;100\n")?;
/// let timeline = score_to_timeline_at(&score, 48000);
///
/// assert_eq!(timeline.entries[0].offset_samples, 0);
/// assert_eq!(timeline.entries[1].offset_samples, 48000);
/// assert_eq!(timeline.entries[1].offset_seconds, 0.5);
/// # Ok::<(), songbook::SongError>(())
/// ```
pub fn score_to_timeline_at(score: &Score, sample_rate: u32) -> Timeline {
    let bpm = score.bpm();
    let time_signature = score.time_signature();
    let samples = |duration: &Duration| samples_for_duration(bpm, sample_rate, duration, &time_signature);

    let mut position = 0u64;
    let mut entries = Vec::with_capacity(score.note_count());

    for note in score.iter() {
        position += samples(&note.offset);

        let melody = note.melody.as_ref();
        let percussion = note.percussion.as_ref();

        entries.push(TimelineEntry {
            offset_samples: position,
            offset_seconds: samples_to_seconds(position, sample_rate),
            length_samples: melody.map_or(0, |m| samples(&m.duration)),
            melody_pitches: melody.map(|m| m.pitches.clone()),
            melody_velocity: melody.map(MelodyVoice::velocity),
            percussion_hits: percussion.map(PercussionVoice::voiced_hits),
            percussion_velocity: percussion.map(PercussionVoice::velocity),
            has_hi_hat: note.has_hi_hat(),
        });
    }

    log::debug!(
        "timeline for '{}': {} entries, {} samples at {} Hz",
        score.name(),
        entries.len(),
        position,
        sample_rate
    );

    Timeline {
        name: score.name().to_string(),
        bpm,
        sample_rate,
        time_signature,
        entries,
    }
}
