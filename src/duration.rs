//! # Durations and Time Signatures
//!
//! Symbolic note lengths, independent of tempo.
//!
//! ## Duration Calculation
//! - **Base length** + **dot** + **triplet** = actual length
//! - Ratios are exact fractions of a quarter note (`num_rational::Ratio`)
//! - Example: Dotted quarter = `1 * 3/2 = 3/2`
//! - Example: Eighth triplet = `1/2 * 2/3 = 1/3`
//!
//! ## Equality
//! Two durations are equal when their ratios are equal, regardless of how they
//! are spelled. A dotted quarter triplet (`1 * 3/2 * 2/3`) equals a plain
//! quarter. Ordering and hashing follow the same rule.
//!
//! ## Text Code
//! Each duration has a 3-character code `"<base><dot><triplet>"`:
//! `"300"` is a quarter, `"210"` a dotted eighth, `"501"` a whole triplet.

use crate::error::SongError;
use num_rational::Ratio;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Base length class of a duration, in code-digit order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DurationBase {
    ThirtySecond, // 0
    Sixteenth,    // 1
    Eighth,       // 2
    #[default]
    Quarter,      // 3
    Half,         // 4
    Whole,        // 5
    None,         // 6
}

impl DurationBase {
    pub const ALL: [DurationBase; 7] = [
        DurationBase::ThirtySecond,
        DurationBase::Sixteenth,
        DurationBase::Eighth,
        DurationBase::Quarter,
        DurationBase::Half,
        DurationBase::Whole,
        DurationBase::None,
    ];

    /// Digit used for this base in `.song` files and duration codes.
    pub fn digit(self) -> u8 {
        self as u8
    }

    pub fn from_digit(digit: u8) -> Option<Self> {
        Self::ALL.get(digit as usize).copied()
    }

    /// Length of the undecorated base as a fraction of a quarter note.
    pub fn ratio_to_quarter_note(self) -> Ratio<u32> {
        match self {
            DurationBase::ThirtySecond => Ratio::new(1, 8),
            DurationBase::Sixteenth => Ratio::new(1, 4),
            DurationBase::Eighth => Ratio::new(1, 2),
            DurationBase::Quarter => Ratio::from_integer(1),
            DurationBase::Half => Ratio::from_integer(2),
            DurationBase::Whole => Ratio::from_integer(4),
            DurationBase::None => Ratio::from_integer(0),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DurationBase::ThirtySecond => "thirty-second",
            DurationBase::Sixteenth => "sixteenth",
            DurationBase::Eighth => "eighth",
            DurationBase::Quarter => "quarter",
            DurationBase::Half => "half",
            DurationBase::Whole => "whole",
            DurationBase::None => "none",
        }
    }
}

/// A symbolic note length: base class plus dot and triplet modifiers.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct Duration {
    pub base: DurationBase,
    pub dotted: bool,
    pub triplet: bool,
}

impl Duration {
    /// The empty duration, used for an offset of zero.
    pub const NONE: Duration = Duration::new(DurationBase::None);

    pub const fn new(base: DurationBase) -> Self {
        Self {
            base,
            dotted: false,
            triplet: false,
        }
    }

    pub const fn with_dot(self) -> Self {
        Self {
            dotted: true,
            ..self
        }
    }

    pub const fn with_triplet(self) -> Self {
        Self {
            triplet: true,
            ..self
        }
    }

    pub fn is_none(&self) -> bool {
        self.base == DurationBase::None
    }

    /// True when neither modifier is set.
    pub fn is_plain(&self) -> bool {
        !self.dotted && !self.triplet
    }

    /// Length as an exact fraction of a quarter note.
    pub fn ratio_to_quarter_note(&self) -> Ratio<u32> {
        let mut ratio = self.base.ratio_to_quarter_note();
        if self.dotted {
            ratio = ratio * Ratio::new(3, 2);
        }
        if self.triplet {
            ratio = ratio * Ratio::new(2, 3);
        }
        ratio
    }

    /// Length relative to one measure of `time_signature`.
    ///
    /// Computed as `ratio(self) * ratio(base beat) / beats_per_measure`.
    /// This is exact for quarter-based signatures; for other base beats the
    /// base-beat ratio scales the result rather than dividing it (see DESIGN.md).
    /// A signature with zero beats per measure yields zero.
    pub fn ratio_to_measure(&self, time_signature: &TimeSignature) -> Ratio<u32> {
        if time_signature.beats_per_measure == 0 {
            return Ratio::from_integer(0);
        }
        self.ratio_to_quarter_note()
            * Duration::new(time_signature.base_beat).ratio_to_quarter_note()
            / Ratio::from_integer(time_signature.beats_per_measure as u32)
    }

    /// The fixed 3-character code, e.g. `"310"` for a dotted quarter.
    pub fn to_code(&self) -> String {
        format!(
            "{}{}{}",
            self.base.digit(),
            self.dotted as u8,
            self.triplet as u8
        )
    }

    /// Parse a 3-character duration code.
    ///
    /// # Example
    /// ```
    /// use songbook::{Duration, DurationBase};
    ///
    /// let d = Duration::from_code("210").unwrap();
    /// assert_eq!(d.base, DurationBase::Eighth);
    /// assert!(d.dotted);
    /// assert!(Duration::from_code("21").is_err());
    /// ```
    pub fn from_code(code: &str) -> Result<Self, SongError> {
        parse_code(code).map_err(|message| SongError::parse(0, message))
    }
}

/// Code parser shared with the codec, which attaches its own line number.
pub(crate) fn parse_code(code: &str) -> Result<Duration, String> {
    let digits: Vec<u8> = code
        .chars()
        .map(|c| c.to_digit(10).map(|d| d as u8))
        .collect::<Option<_>>()
        .ok_or_else(|| format!("duration code '{}' is not numeric", code))?;

    if digits.len() != 3 {
        return Err(format!(
            "duration code '{}' must have exactly 3 digits",
            code
        ));
    }

    let base = DurationBase::from_digit(digits[0])
        .ok_or_else(|| format!("unknown duration base {} in '{}'", digits[0], code))?;
    let flag = |digit: u8| match digit {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(format!("duration flag must be 0 or 1, found {} in '{}'", other, code)),
    };

    Ok(Duration {
        base,
        dotted: flag(digits[1])?,
        triplet: flag(digits[2])?,
    })
}

impl From<DurationBase> for Duration {
    fn from(base: DurationBase) -> Self {
        Duration::new(base)
    }
}

impl PartialEq for Duration {
    fn eq(&self, other: &Self) -> bool {
        self.ratio_to_quarter_note() == other.ratio_to_quarter_note()
    }
}

impl Eq for Duration {}

impl PartialOrd for Duration {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Duration {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ratio_to_quarter_note()
            .cmp(&other.ratio_to_quarter_note())
    }
}

impl Hash for Duration {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ratio_to_quarter_note().hash(state);
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.dotted {
            write!(f, "dotted ")?;
        }
        write!(f, "{}", self.base.name())?;
        if self.triplet {
            write!(f, " triplet")?;
        }
        Ok(())
    }
}

impl FromStr for Duration {
    type Err = SongError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Duration::from_code(s)
    }
}

/// Time signature (e.g. 4/4, 3/4, 6/8)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSignature {
    pub beats_per_measure: u8,
    pub base_beat: DurationBase,
}

impl TimeSignature {
    pub fn new(beats_per_measure: u8, base_beat: DurationBase) -> Self {
        Self {
            beats_per_measure,
            base_beat,
        }
    }

    /// Quarter notes per beat: 1 for quarter-based, 1/2 for eighth-based.
    /// Any other base beat is timed as if it were a quarter.
    pub fn quarter_notes_per_beat(&self) -> Ratio<u32> {
        match self.base_beat {
            DurationBase::Eighth => Ratio::new(1, 2),
            _ => Ratio::from_integer(1),
        }
    }
}

impl Default for TimeSignature {
    fn default() -> Self {
        Self {
            beats_per_measure: 4,
            base_beat: DurationBase::Quarter,
        }
    }
}

impl fmt::Display for TimeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let denominator = match self.base_beat {
            DurationBase::Whole => "1",
            DurationBase::Half => "2",
            DurationBase::Quarter => "4",
            DurationBase::Eighth => "8",
            DurationBase::Sixteenth => "16",
            DurationBase::ThirtySecond => "32",
            DurationBase::None => "?",
        };
        write!(f, "{}/{}", self.beats_per_measure, denominator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_to_quarter_note() {
        assert_eq!(Duration::new(DurationBase::Quarter).ratio_to_quarter_note(), Ratio::from_integer(1));
        assert_eq!(Duration::new(DurationBase::Whole).ratio_to_quarter_note(), Ratio::from_integer(4));
        assert_eq!(Duration::new(DurationBase::ThirtySecond).ratio_to_quarter_note(), Ratio::new(1, 8));
        assert_eq!(Duration::NONE.ratio_to_quarter_note(), Ratio::from_integer(0));

        // Dotted eighth follows the general 3/2 rule
        let dotted_eighth = Duration::new(DurationBase::Eighth).with_dot();
        assert_eq!(dotted_eighth.ratio_to_quarter_note(), Ratio::new(3, 4));

        let eighth_triplet = Duration::new(DurationBase::Eighth).with_triplet();
        assert_eq!(eighth_triplet.ratio_to_quarter_note(), Ratio::new(1, 3));
    }

    #[test]
    fn test_equality_is_by_ratio() {
        let quarter = Duration::new(DurationBase::Quarter);
        let dotted_quarter_triplet = Duration::new(DurationBase::Quarter).with_dot().with_triplet();
        assert_eq!(quarter, dotted_quarter_triplet);
        assert_ne!(quarter, Duration::new(DurationBase::Half));

        // Whole triplet (8/3) and dotted half (3) are different
        let whole_triplet = Duration::new(DurationBase::Whole).with_triplet();
        let dotted_half = Duration::new(DurationBase::Half).with_dot();
        assert_ne!(whole_triplet, dotted_half);
        assert!(whole_triplet < dotted_half);
    }

    #[test]
    fn test_ordering() {
        let mut durations = vec![
            Duration::new(DurationBase::Whole),
            Duration::NONE,
            Duration::new(DurationBase::Eighth).with_dot(),
            Duration::new(DurationBase::Sixteenth),
            Duration::new(DurationBase::Quarter),
        ];
        durations.sort();
        let bases: Vec<DurationBase> = durations.iter().map(|d| d.base).collect();
        assert_eq!(
            bases,
            vec![
                DurationBase::None,
                DurationBase::Sixteenth,
                DurationBase::Eighth,
                DurationBase::Quarter,
                DurationBase::Whole,
            ]
        );
        assert!(Duration::new(DurationBase::Half) >= Duration::new(DurationBase::Quarter).with_dot());
        assert!(Duration::new(DurationBase::Eighth) <= Duration::new(DurationBase::Eighth));
    }

    #[test]
    fn test_code_round_trip_for_every_combination() {
        for base in DurationBase::ALL {
            for dotted in [false, true] {
                for triplet in [false, true] {
                    let d = Duration { base, dotted, triplet };
                    let parsed = Duration::from_code(&d.to_code()).unwrap();
                    assert_eq!(parsed.base, base);
                    assert_eq!(parsed.dotted, dotted);
                    assert_eq!(parsed.triplet, triplet);
                }
            }
        }
    }

    #[test]
    fn test_code_rejects_malformed_input() {
        assert!(Duration::from_code("").is_err());
        assert!(Duration::from_code("30").is_err());
        assert!(Duration::from_code("3000").is_err());
        assert!(Duration::from_code("3a0").is_err());
        assert!(Duration::from_code("700").is_err()); // no base 7
        assert!(Duration::from_code("320").is_err()); // flag must be 0/1
        assert!("410".parse::<Duration>().is_ok());

        let err = Duration::from_code("30").unwrap_err();
        assert!(matches!(err, SongError::ParseError { line: 0, .. }));
        assert_eq!(
            err.to_string(),
            "Parse error: duration code '30' must have exactly 3 digits"
        );
    }

    #[test]
    fn test_ratio_to_measure() {
        let four_four = TimeSignature::default();
        assert_eq!(Duration::new(DurationBase::Quarter).ratio_to_measure(&four_four), Ratio::new(1, 4));
        assert_eq!(Duration::new(DurationBase::Whole).ratio_to_measure(&four_four), Ratio::from_integer(1));

        let three_four = TimeSignature::new(3, DurationBase::Quarter);
        assert_eq!(Duration::new(DurationBase::Half).with_dot().ratio_to_measure(&three_four), Ratio::from_integer(1));

        let six_eight = TimeSignature::new(6, DurationBase::Eighth);
        assert_eq!(Duration::new(DurationBase::Quarter).ratio_to_measure(&six_eight), Ratio::new(1, 12));

        let degenerate = TimeSignature::new(0, DurationBase::Quarter);
        assert_eq!(Duration::new(DurationBase::Quarter).ratio_to_measure(&degenerate), Ratio::from_integer(0));
    }

    #[test]
    fn test_display() {
        assert_eq!(Duration::new(DurationBase::Quarter).with_dot().to_string(), "dotted quarter");
        assert_eq!(Duration::new(DurationBase::Eighth).with_triplet().to_string(), "eighth triplet");
        assert_eq!(TimeSignature::new(6, DurationBase::Eighth).to_string(), "6/8");
    }
}
