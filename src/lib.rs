pub mod codec;
pub mod config;
pub mod drum;
pub mod duration;
pub mod error;
pub mod library;
pub mod note;
pub mod pitch;
pub mod score;
pub mod timing;

pub use codec::{decode, encode};
pub use config::Config;
pub use drum::Drum;
pub use duration::{Duration, DurationBase, TimeSignature};
pub use error::SongError;
pub use library::{SongEntry, SongLibrary};
pub use note::{MelodyVoice, Note, PercussionVoice};
pub use pitch::{Pitch, PitchClass};
pub use score::{Score, ScoreKind};
pub use timing::{score_to_timeline, KeyHit, Timeline, TimelineEntry};

/// Decode `.song` text and lay it out on a timeline at `sample_rate`.
/// This is the main entry point for playback.
pub fn song_to_timeline(source: &str, sample_rate: u32) -> Result<Timeline, SongError> {
    let score = decode(source)?;
    Ok(timing::score_to_timeline_at(&score, sample_rate))
}

/// Decode and re-encode `.song` text, giving its canonical form.
pub fn normalize(source: &str) -> Result<String, SongError> {
    let score = decode(source)?;
    Ok(encode(&score))
}
