//! # Drum Catalog
//!
//! A fixed kit of 18 pieces in ordinal order. Three of them are hi-hat states
//! (closed, open, pedal); a hi-hat can only be in one state at a time, which is
//! why `PercussionVoice` exposes a single sounding hi-hat.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Drum {
    Kick,         // 0
    KickAlt,      // 1
    Snare,        // 2
    SnareRimshot, // 3
    SideStick,    // 4
    Clap,         // 5
    HiHatClosed,  // 6
    HiHatOpen,    // 7
    HiHatPedal,   // 8
    FloorTom,     // 9
    LowTom,       // 10
    MidTom,       // 11
    HighTom,      // 12
    Crash,        // 13
    Ride,         // 14
    RideBell,     // 15
    Splash,       // 16
    China,        // 17
}

impl Drum {
    pub const ALL: [Drum; 18] = [
        Drum::Kick,
        Drum::KickAlt,
        Drum::Snare,
        Drum::SnareRimshot,
        Drum::SideStick,
        Drum::Clap,
        Drum::HiHatClosed,
        Drum::HiHatOpen,
        Drum::HiHatPedal,
        Drum::FloorTom,
        Drum::LowTom,
        Drum::MidTom,
        Drum::HighTom,
        Drum::Crash,
        Drum::Ride,
        Drum::RideBell,
        Drum::Splash,
        Drum::China,
    ];

    pub fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        Self::ALL.get(ordinal as usize).copied()
    }

    pub fn is_hi_hat(self) -> bool {
        matches!(self, Drum::HiHatClosed | Drum::HiHatOpen | Drum::HiHatPedal)
    }

    /// General MIDI percussion key (channel 10).
    pub fn midi_note(self) -> u8 {
        match self {
            Drum::Kick => 36,
            Drum::KickAlt => 35,
            Drum::Snare => 38,
            Drum::SnareRimshot => 40,
            Drum::SideStick => 37,
            Drum::Clap => 39,
            Drum::HiHatClosed => 42,
            Drum::HiHatOpen => 46,
            Drum::HiHatPedal => 44,
            Drum::FloorTom => 41,
            Drum::LowTom => 45,
            Drum::MidTom => 47,
            Drum::HighTom => 50,
            Drum::Crash => 49,
            Drum::Ride => 51,
            Drum::RideBell => 53,
            Drum::Splash => 55,
            Drum::China => 52,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Drum::Kick => "KICK",
            Drum::KickAlt => "KICK_ALT",
            Drum::Snare => "SNARE",
            Drum::SnareRimshot => "SNARE_RIMSHOT",
            Drum::SideStick => "SIDE_STICK",
            Drum::Clap => "CLAP",
            Drum::HiHatClosed => "HI_HAT_CLOSED",
            Drum::HiHatOpen => "HI_HAT_OPEN",
            Drum::HiHatPedal => "HI_HAT_PEDAL",
            Drum::FloorTom => "FLOOR_TOM",
            Drum::LowTom => "LOW_TOM",
            Drum::MidTom => "MID_TOM",
            Drum::HighTom => "HIGH_TOM",
            Drum::Crash => "CRASH",
            Drum::Ride => "RIDE",
            Drum::RideBell => "RIDE_BELL",
            Drum::Splash => "SPLASH",
            Drum::China => "CHINA",
        }
    }

    /// Case-insensitive lookup by catalog name.
    pub fn from_name(s: &str) -> Option<Self> {
        let upper = s.trim().to_ascii_uppercase();
        Self::ALL.into_iter().find(|d| d.name() == upper)
    }
}

impl fmt::Display for Drum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
