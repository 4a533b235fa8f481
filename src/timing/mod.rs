//! # Timing Module
//!
//! Convert symbolic durations into audio sample counts, and scores into a flat
//! timeline of absolute offsets for playback and lesson key-hit extraction.
//!
//! ## Sub-modules
//! - `types` - Timeline, TimelineEntry, KeyHit type definitions
//! - `engine` - Sample math and timeline generation
//!
//! ## Sample Math
//! ```text
//! samples_per_beat    = 2 * (60 / bpm) * sample_rate
//! samples_per_quarter = samples_per_beat / quarter_notes_per_beat
//! samples             = trunc(samples_per_quarter * ratio_to_quarter_note)
//! ```
//!
//! The factor 2 is the interleaved stereo stream: a "sample" here is one
//! interleaved slot, so one second at 44100 Hz is 88200 samples.
//!
//! `quarter_notes_per_beat` is 1 for x/4 signatures and 1/2 for x/8
//! signatures; any other base beat is timed like x/4.
//!
//! All arithmetic is exact (`num_rational`) and truncated once at the end, so
//! a dotted eighth is exactly three quarters of a quarter note.
//!
//! ## Example
//! ```rust
//! use songbook::timing::samples_for_duration;
//! use songbook::{Duration, DurationBase, TimeSignature};
//!
//! let four_four = TimeSignature::default();
//! let quarter = Duration::new(DurationBase::Quarter);
//! let whole = Duration::new(DurationBase::Whole);
//!
//! assert_eq!(samples_for_duration(120, 44100, &quarter, &four_four), 44100);
//! assert_eq!(samples_for_duration(120, 44100, &whole, &four_four), 176400);
//! ```
//!
//! ## Related Modules
//! - `score` - Source of notes, tempo and time signature
//! - `duration` - Ratios to a quarter note

mod engine;
mod types;

#[cfg(test)]
mod tests;

pub use engine::{
    samples_for_duration, samples_to_seconds, score_to_timeline, score_to_timeline_at,
};
pub use types::{KeyHit, Timeline, TimelineEntry};

/// Sample rate used when none is configured.
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;

/// Interleaved channels counted by every sample figure.
pub const CHANNELS: u32 = 2;
