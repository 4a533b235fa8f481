//! # `.song` Codec
//!
//! Reads and writes the line-oriented `.song` text format.
//!
//! ## Format
//! ```text
//! line 1: <name>
//! line 2: <kind>;<bpm>;<beatsPerMeasure>;<baseBeat>
//! line 3+: one note per line, layout chosen by <kind>
//! ```
//!
//! | Kind | Note line |
//! |---|---|
//! | Melody (1), Empty (0) | `p1,p2;<duration>;<offset>;<velocity>` |
//! | DrumLoop (2) | `d1,d2;<offset>;<velocity>` |
//! | Combined (3) | `p1,p2\|d1,d2;<duration>;<offset>;<melodyVelocity>\|<drumVelocity>` |
//!
//! - Pitches and drums are written as their ordinals
//! - An absent voice is written as `null`
//! - A plain duration is its base digit (`3` = quarter); a dotted or triplet
//!   duration is its 3-digit code (`310` = dotted quarter)
//!
//! Any malformed line fails the whole decode with `SongError::ParseError`.
//!
//! ## Example
//! ```rust
//! use songbook::{decode, encode, ScoreKind};
//!
//! let source = "Groove\n3;100;4;3\n48|0,6;3;4;100|90\n";
//! let score = decode(source)?;
//!
//! assert_eq!(score.kind(), ScoreKind::Combined);
//! assert_eq!(score.bpm(), 100);
//! assert_eq!(encode(&score), source);
//! # Ok::<(), songbook::SongError>(())
//! ```

mod decode;
mod encode;


pub use decode::decode;
pub use encode::encode;

/// Literal written in place of an absent voice.
pub const NULL_VOICE: &str = "null";
pub const FIELD_SEPARATOR: &str = ";";
pub const LIST_SEPARATOR: &str = ",";
pub const VOICE_SEPARATOR: &str = "|";
pub const SONG_EXTENSION: &str = "song";
