//! # Pitch Catalog
//!
//! Pitches are ordinals over 12 chromatic classes x 10 octaves, `C0` (0) to
//! `B9` (119), followed by the `REST` sentinel (120).
//!
//! ### Octave System
//! - `ordinal / 12` is the octave, `ordinal % 12` the chromatic class
//! - `C4` = ordinal 48 = MIDI note 60 (middle C)
//! - `REST` has no class and no octave; it never takes part in that arithmetic
//!
//! ## Example
//! ```rust
//! use songbook::{Pitch, PitchClass};
//!
//! let a4 = Pitch::from_name("A4").unwrap();
//! assert_eq!(a4.ordinal(), 57);
//! assert_eq!(a4.class(), Some(PitchClass::A));
//! assert_eq!(a4.midi_note(), Some(69));
//! assert_eq!(Pitch::REST.octave(), None);
//! ```

use serde::Serialize;
use std::fmt;

pub const OCTAVES: u8 = 10;
pub const PITCHED_COUNT: u8 = 12 * OCTAVES;

/// Chromatic pitch class, sharps spelling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PitchClass {
    C,
    CSharp,
    D,
    DSharp,
    E,
    F,
    FSharp,
    G,
    GSharp,
    A,
    ASharp,
    B,
}

impl PitchClass {
    pub const ALL: [PitchClass; 12] = [
        PitchClass::C,
        PitchClass::CSharp,
        PitchClass::D,
        PitchClass::DSharp,
        PitchClass::E,
        PitchClass::F,
        PitchClass::FSharp,
        PitchClass::G,
        PitchClass::GSharp,
        PitchClass::A,
        PitchClass::ASharp,
        PitchClass::B,
    ];

    pub fn semitone(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            PitchClass::C => "C",
            PitchClass::CSharp => "C#",
            PitchClass::D => "D",
            PitchClass::DSharp => "D#",
            PitchClass::E => "E",
            PitchClass::F => "F",
            PitchClass::FSharp => "F#",
            PitchClass::G => "G",
            PitchClass::GSharp => "G#",
            PitchClass::A => "A",
            PitchClass::ASharp => "A#",
            PitchClass::B => "B",
        }
    }

    /// Parse a class name. Accepts sharps (`C#`) and flats (`Db`).
    pub fn from_name(s: &str) -> Option<Self> {
        let class = match s {
            "C" | "B#" => PitchClass::C,
            "C#" | "Db" => PitchClass::CSharp,
            "D" => PitchClass::D,
            "D#" | "Eb" => PitchClass::DSharp,
            "E" | "Fb" => PitchClass::E,
            "F" | "E#" => PitchClass::F,
            "F#" | "Gb" => PitchClass::FSharp,
            "G" => PitchClass::G,
            "G#" | "Ab" => PitchClass::GSharp,
            "A" => PitchClass::A,
            "A#" | "Bb" => PitchClass::ASharp,
            "B" | "Cb" => PitchClass::B,
            _ => return None,
        };
        Some(class)
    }

    /// True for the five classes played on black keys.
    pub fn is_accidental(self) -> bool {
        matches!(
            self,
            PitchClass::CSharp
                | PitchClass::DSharp
                | PitchClass::FSharp
                | PitchClass::GSharp
                | PitchClass::ASharp
        )
    }
}

/// A chromatic pitch in C0..B9, or the rest sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Pitch(u8);

impl Pitch {
    /// Silence that still occupies time in a melody voice.
    pub const REST: Pitch = Pitch(PITCHED_COUNT);
    pub const LOWEST: Pitch = Pitch(0);
    pub const HIGHEST: Pitch = Pitch(PITCHED_COUNT - 1);
    pub const MIDDLE_C: Pitch = Pitch(48);

    /// Build a pitched value. Returns `None` for octaves above 9.
    pub fn new(class: PitchClass, octave: u8) -> Option<Self> {
        if octave >= OCTAVES {
            return None;
        }
        Some(Pitch(octave * 12 + class.semitone()))
    }

    /// Look up a pitch by ordinal; 120 is `REST`, anything above is invalid.
    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        if ordinal <= PITCHED_COUNT {
            Some(Pitch(ordinal))
        } else {
            None
        }
    }

    pub fn ordinal(self) -> u8 {
        self.0
    }

    pub fn is_rest(self) -> bool {
        self == Pitch::REST
    }

    pub fn class(self) -> Option<PitchClass> {
        if self.is_rest() {
            return None;
        }
        Some(PitchClass::ALL[(self.0 % 12) as usize])
    }

    pub fn octave(self) -> Option<u8> {
        if self.is_rest() {
            return None;
        }
        Some(self.0 / 12)
    }

    /// MIDI note number (C4 = 60). `None` for `REST`.
    pub fn midi_note(self) -> Option<u8> {
        if self.is_rest() {
            return None;
        }
        Some(self.0 + 12)
    }

    /// Name such as `"C#4"`, or `"REST"`.
    pub fn name(self) -> String {
        match (self.class(), self.octave()) {
            (Some(class), Some(octave)) => format!("{}{}", class.name(), octave),
            _ => "REST".to_string(),
        }
    }

    /// Parse a name such as `"C4"`, `"F#7"`, `"Bb2"` or `"REST"`.
    pub fn from_name(s: &str) -> Option<Self> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("rest") {
            return Some(Pitch::REST);
        }

        let split = trimmed.find(|c: char| c.is_ascii_digit())?;
        let (class_name, octave) = trimmed.split_at(split);
        let class = PitchClass::from_name(class_name)?;
        let octave: u8 = octave.parse().ok()?;

        // B#n and Cbn cross the octave boundary
        match class_name {
            "B#" => Pitch::new(class, octave.checked_add(1)?),
            "Cb" => Pitch::new(class, octave.checked_sub(1)?),
            _ => Pitch::new(class, octave),
        }
    }

    /// Every pitched value, lowest first. `REST` is not included.
    pub fn all_pitched() -> impl Iterator<Item = Pitch> {
        (0..PITCHED_COUNT).map(Pitch)
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}
