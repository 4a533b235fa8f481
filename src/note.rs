//! # Note Aggregate
//!
//! A `Note` is one step of a score: what the melody plays, what the drums play,
//! and how long after the previous note it starts.
//!
//! ```text
//! Note
//!   ├── melody: Option<MelodyVoice>
//!   │     ├── pitches: Vec<Pitch>   (simultaneous; [REST] = timed silence)
//!   │     ├── velocity: u8
//!   │     └── duration: Duration
//!   ├── percussion: Option<PercussionVoice>
//!   │     ├── hits: Vec<Drum>       (simultaneous)
//!   │     └── velocity: u8
//!   └── offset: Duration            (from the previous note's start)
//! ```

use crate::drum::Drum;
use crate::duration::Duration;
use crate::error::SongError;
use crate::pitch::Pitch;

pub const MAX_VELOCITY: u8 = 127;

fn check_velocity(velocity: u8) -> Result<u8, SongError> {
    if velocity > MAX_VELOCITY {
        return Err(SongError::InvalidState(format!(
            "velocity {} exceeds {}",
            velocity, MAX_VELOCITY
        )));
    }
    Ok(velocity)
}

/// Simultaneous pitches sharing one velocity and duration.
///
/// Velocity is fixed at construction and never exceeds `MAX_VELOCITY`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MelodyVoice {
    pub pitches: Vec<Pitch>,
    velocity: u8,
    pub duration: Duration,
}

impl MelodyVoice {
    /// # Errors
    /// `SongError::InvalidState` when `velocity` is above `MAX_VELOCITY`.
    pub fn new(pitches: Vec<Pitch>, velocity: u8, duration: Duration) -> Result<Self, SongError> {
        Ok(Self {
            pitches,
            velocity: check_velocity(velocity)?,
            duration,
        })
    }

    /// A timed silence.
    pub fn rest(duration: Duration) -> Self {
        Self {
            pitches: vec![Pitch::REST],
            velocity: 0,
            duration,
        }
    }

    pub fn velocity(&self) -> u8 {
        self.velocity
    }

    pub fn is_rest(&self) -> bool {
        self.pitches.iter().all(|p| p.is_rest())
    }

    /// Pitches that actually sound, skipping `REST`.
    pub fn sounding(&self) -> impl Iterator<Item = Pitch> + '_ {
        self.pitches.iter().copied().filter(|p| !p.is_rest())
    }

    pub fn highest(&self) -> Option<Pitch> {
        self.sounding().max()
    }

    pub fn lowest(&self) -> Option<Pitch> {
        self.sounding().min()
    }
}

/// Simultaneous drum hits sharing one velocity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PercussionVoice {
    pub hits: Vec<Drum>,
    velocity: u8,
}

impl PercussionVoice {
    pub fn new(hits: Vec<Drum>, velocity: u8) -> Result<Self, SongError> {
        Ok(Self {
            hits,
            velocity: check_velocity(velocity)?,
        })
    }

    pub fn velocity(&self) -> u8 {
        self.velocity
    }

    pub fn has_hi_hat(&self) -> bool {
        self.hits.iter().any(|d| d.is_hi_hat())
    }

    /// The hi-hat state that sounds. When several are listed the last one wins,
    /// since one hi-hat cannot be open and closed at once.
    pub fn hi_hat(&self) -> Option<Drum> {
        self.hits.iter().rev().copied().find(|d| d.is_hi_hat())
    }

    /// Hits to voice independently: every non hi-hat piece plus the single
    /// sounding hi-hat, in listed order.
    pub fn voiced_hits(&self) -> Vec<Drum> {
        let hi_hat = self.hi_hat();
        let mut voiced = Vec::with_capacity(self.hits.len());
        for &drum in &self.hits {
            if !drum.is_hi_hat() {
                voiced.push(drum);
            } else if Some(drum) == hi_hat && !voiced.contains(&drum) {
                voiced.push(drum);
            }
        }
        voiced
    }
}

/// One step of a score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub melody: Option<MelodyVoice>,
    pub percussion: Option<PercussionVoice>,
    /// Distance from the previous note's start.
    pub offset: Duration,
}

impl Note {
    pub fn new(
        melody: Option<MelodyVoice>,
        percussion: Option<PercussionVoice>,
        offset: Duration,
    ) -> Self {
        Self {
            melody,
            percussion,
            offset,
        }
    }

    pub fn melody(melody: MelodyVoice, offset: Duration) -> Self {
        Self::new(Some(melody), None, offset)
    }

    pub fn drums(percussion: PercussionVoice, offset: Duration) -> Self {
        Self::new(None, Some(percussion), offset)
    }

    pub fn has_melody(&self) -> bool {
        self.melody.is_some()
    }

    pub fn has_percussion(&self) -> bool {
        self.percussion.is_some()
    }

    pub fn has_hi_hat(&self) -> bool {
        self.percussion.as_ref().is_some_and(|p| p.has_hi_hat())
    }

    pub fn highest_pitch(&self) -> Option<Pitch> {
        self.melody.as_ref().and_then(|m| m.highest())
    }

    pub fn lowest_pitch(&self) -> Option<Pitch> {
        self.melody.as_ref().and_then(|m| m.lowest())
    }

    /// True when `pitch` sounds in this note.
    pub fn contains_pitch(&self, pitch: Pitch) -> bool {
        self.melody
            .as_ref()
            .is_some_and(|m| m.sounding().any(|p| p == pitch))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duration::DurationBase;

    fn p(ordinal: u8) -> Pitch {
        Pitch::from_ordinal(ordinal).unwrap()
    }

    #[test]
    fn test_melody_extremes_skip_rest() {
        let voice = MelodyVoice::new(vec![p(60), Pitch::REST, p(52)], 100, DurationBase::Quarter.into()).unwrap();
        assert_eq!(voice.highest(), Some(p(60)));
        assert_eq!(voice.lowest(), Some(p(52)));
        assert!(!voice.is_rest());

        let rest = MelodyVoice::rest(DurationBase::Half.into());
        assert!(rest.is_rest());
        assert_eq!(rest.highest(), None);
    }

    #[test]
    fn test_hi_hat_exclusivity() {
        let voice = PercussionVoice::new(
            vec![Drum::HiHatClosed, Drum::Kick, Drum::HiHatOpen, Drum::Snare],
            90,
        )
        .unwrap();
        assert!(voice.has_hi_hat());
        assert_eq!(voice.hi_hat(), Some(Drum::HiHatOpen));
        assert_eq!(voice.voiced_hits(), vec![Drum::Kick, Drum::HiHatOpen, Drum::Snare]);

        let no_hat = PercussionVoice::new(vec![Drum::Kick, Drum::Crash], 90).unwrap();
        assert!(!no_hat.has_hi_hat());
        assert_eq!(no_hat.hi_hat(), None);
        assert_eq!(no_hat.voiced_hits(), vec![Drum::Kick, Drum::Crash]);
    }

    #[test]
    fn test_velocity_is_bounded() {
        let loud = MelodyVoice::new(vec![p(48)], MAX_VELOCITY, DurationBase::Quarter.into()).unwrap();
        assert_eq!(loud.velocity(), 127);

        assert!(matches!(
            MelodyVoice::new(vec![p(48)], 128, DurationBase::Quarter.into()),
            Err(SongError::InvalidState(_))
        ));
        assert!(matches!(
            PercussionVoice::new(vec![Drum::Kick], 200),
            Err(SongError::InvalidState(_))
        ));
        assert_eq!(MelodyVoice::rest(DurationBase::Half.into()).velocity(), 0);
    }

    #[test]
    fn test_repeated_hi_hat_is_voiced_once() {
        let voice = PercussionVoice::new(vec![Drum::HiHatPedal, Drum::HiHatPedal], 64).unwrap();
        assert_eq!(voice.voiced_hits(), vec![Drum::HiHatPedal]);
    }

    #[test]
    fn test_note_queries() {
        let note = Note::new(
            Some(MelodyVoice::new(vec![p(48), p(55)], 100, DurationBase::Quarter.into()).unwrap()),
            Some(PercussionVoice::new(vec![Drum::HiHatPedal], 80).unwrap()),
            Duration::NONE,
        );
        assert!(note.has_melody());
        assert!(note.has_percussion());
        assert!(note.has_hi_hat());
        assert!(note.contains_pitch(p(55)));
        assert!(!note.contains_pitch(Pitch::REST));
        assert_eq!(note.highest_pitch(), Some(p(55)));
        assert_eq!(note.lowest_pitch(), Some(p(48)));
    }
}
