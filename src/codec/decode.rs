//! `.song` text to Score

use super::{FIELD_SEPARATOR, LIST_SEPARATOR, NULL_VOICE, VOICE_SEPARATOR};
use crate::drum::Drum;
use crate::duration::{parse_code, Duration, DurationBase, TimeSignature};
use crate::error::SongError;
use crate::note::{MelodyVoice, Note, PercussionVoice, MAX_VELOCITY};
use crate::pitch::Pitch;
use crate::score::{Score, ScoreKind};
use std::str::FromStr;

/// Parse `.song` text into a Score.
///
/// The whole input is validated before a score is returned; the first
/// malformed line aborts the decode.
///
/// # Errors
/// `SongError::ParseError` with the 1-based line number of the problem.
pub fn decode(source: &str) -> Result<Score, SongError> {
    let mut lines: Vec<&str> = source.lines().collect();
    while lines.len() > 2 && lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }

    let name = lines
        .first()
        .ok_or_else(|| SongError::parse(1, "missing score name"))?;
    let header = lines
        .get(1)
        .ok_or_else(|| SongError::parse(2, "missing header line"))?;

    let (kind, bpm, time_signature) = LineParser::new(2).header(header)?;

    let mut score = Score::new(*name);
    score
        .set_bpm(bpm)
        .map_err(|e| SongError::parse(2, e.to_string()))?;
    score.set_time_signature(time_signature);

    for (i, line) in lines.iter().enumerate().skip(2) {
        let note = LineParser::new(i + 1).note(line, kind)?;
        score.add_note(note);
    }

    if score.kind() != kind {
        log::debug!(
            "score '{}' declared as {:?} but its notes make it {:?}",
            score.name(),
            kind,
            score.kind()
        );
    }
    log::debug!(
        "decoded score '{}': {} notes, {:?}",
        score.name(),
        score.note_count(),
        score.kind()
    );

    Ok(score)
}

/// Field-level parsing for one line; every error carries the line number.
struct LineParser {
    line: usize,
}

impl LineParser {
    fn new(line: usize) -> Self {
        Self { line }
    }

    fn error(&self, message: impl Into<String>) -> SongError {
        SongError::parse(self.line, message)
    }

    fn fields<'a>(&self, line: &'a str, expected: usize, what: &str) -> Result<Vec<&'a str>, SongError> {
        let fields: Vec<&str> = line.split(FIELD_SEPARATOR).map(str::trim).collect();
        if fields.len() != expected {
            return Err(self.error(format!(
                "{} needs {} '{}'-separated fields, found {}",
                what,
                expected,
                FIELD_SEPARATOR,
                fields.len()
            )));
        }
        Ok(fields)
    }

    fn integer<T: FromStr>(&self, field: &str, what: &str) -> Result<T, SongError> {
        field
            .parse()
            .map_err(|_| self.error(format!("{} '{}' is not a valid integer", what, field)))
    }

    fn header(&self, line: &str) -> Result<(ScoreKind, u32, TimeSignature), SongError> {
        let fields = self.fields(line, 4, "header")?;

        let kind_ordinal: u8 = self.integer(fields[0], "score kind")?;
        let kind = ScoreKind::from_ordinal(kind_ordinal)
            .ok_or_else(|| self.error(format!("unknown score kind {}", kind_ordinal)))?;

        let bpm: u32 = self.integer(fields[1], "BPM")?;

        let beats_per_measure: u8 = self.integer(fields[2], "beats per measure")?;
        if beats_per_measure == 0 {
            return Err(self.error("beats per measure must be greater than zero"));
        }

        let base_digit: u8 = self.integer(fields[3], "base beat")?;
        let base_beat = DurationBase::from_digit(base_digit)
            .ok_or_else(|| self.error(format!("unknown base beat {}", base_digit)))?;

        Ok((kind, bpm, TimeSignature::new(beats_per_measure, base_beat)))
    }

    fn note(&self, line: &str, kind: ScoreKind) -> Result<Note, SongError> {
        match kind {
            ScoreKind::Empty | ScoreKind::Melody => {
                let fields = self.fields(line, 4, "melody note")?;
                let pitches = self.pitch_list(fields[0])?;
                let duration = self.duration(fields[1])?;
                let offset = self.duration(fields[2])?;
                let velocity = self.velocity(fields[3])?;

                let melody = self.melody_voice(pitches, velocity, duration)?;
                Ok(Note::new(melody, None, offset))
            }
            ScoreKind::DrumLoop => {
                let fields = self.fields(line, 3, "drum note")?;
                let hits = self.drum_list(fields[0])?;
                let offset = self.duration(fields[1])?;
                let velocity = self.velocity(fields[2])?;

                let percussion = self.percussion_voice(hits, velocity)?;
                Ok(Note::new(None, percussion, offset))
            }
            ScoreKind::Combined => {
                let fields = self.fields(line, 4, "combined note")?;
                let (pitch_field, drum_field) = self.voice_pair(fields[0], "voice lists")?;
                let (melody_velocity, drum_velocity) = self.voice_pair(fields[3], "velocities")?;

                let pitches = self.pitch_list(pitch_field)?;
                let hits = self.drum_list(drum_field)?;
                let duration = self.duration(fields[1])?;
                let offset = self.duration(fields[2])?;
                let melody_velocity = self.velocity(melody_velocity)?;
                let drum_velocity = self.velocity(drum_velocity)?;

                let melody = self.melody_voice(pitches, melody_velocity, duration)?;
                let percussion = self.percussion_voice(hits, drum_velocity)?;
                Ok(Note::new(melody, percussion, offset))
            }
        }
    }

    fn melody_voice(
        &self,
        pitches: Option<Vec<Pitch>>,
        velocity: u8,
        duration: Duration,
    ) -> Result<Option<MelodyVoice>, SongError> {
        pitches
            .map(|p| MelodyVoice::new(p, velocity, duration))
            .transpose()
            .map_err(|e| self.error(e.to_string()))
    }

    fn percussion_voice(
        &self,
        hits: Option<Vec<Drum>>,
        velocity: u8,
    ) -> Result<Option<PercussionVoice>, SongError> {
        hits.map(|h| PercussionVoice::new(h, velocity))
            .transpose()
            .map_err(|e| self.error(e.to_string()))
    }

    fn voice_pair<'a>(&self, field: &'a str, what: &str) -> Result<(&'a str, &'a str), SongError> {
        let parts: Vec<&str> = field.split(VOICE_SEPARATOR).map(str::trim).collect();
        match parts.as_slice() {
            [melody, drums] => Ok((*melody, *drums)),
            _ => Err(self.error(format!(
                "{} '{}' must be two '{}'-separated parts",
                what, field, VOICE_SEPARATOR
            ))),
        }
    }

    /// `None` for the null sentinel, otherwise the listed ordinals.
    fn ordinals<T>(
        &self,
        field: &str,
        what: &str,
        lookup: impl Fn(u8) -> Option<T>,
    ) -> Result<Option<Vec<T>>, SongError> {
        if field == NULL_VOICE {
            return Ok(None);
        }
        if field.is_empty() {
            return Ok(Some(Vec::new()));
        }

        field
            .split(LIST_SEPARATOR)
            .map(|item| {
                let ordinal: u8 = self.integer(item.trim(), what)?;
                lookup(ordinal).ok_or_else(|| self.error(format!("{} {} is out of range", what, ordinal)))
            })
            .collect::<Result<Vec<T>, SongError>>()
            .map(Some)
    }

    fn pitch_list(&self, field: &str) -> Result<Option<Vec<Pitch>>, SongError> {
        self.ordinals(field, "pitch", Pitch::from_ordinal)
    }

    fn drum_list(&self, field: &str) -> Result<Option<Vec<Drum>>, SongError> {
        self.ordinals(field, "drum", Drum::from_ordinal)
    }

    /// Accepts a single base digit or a full 3-digit duration code.
    fn duration(&self, field: &str) -> Result<Duration, SongError> {
        if field.len() == 1 {
            let digit: u8 = self.integer(field, "duration")?;
            return DurationBase::from_digit(digit)
                .map(Duration::new)
                .ok_or_else(|| self.error(format!("unknown duration {}", digit)));
        }
        parse_code(field).map_err(|message| self.error(message))
    }

    fn velocity(&self, field: &str) -> Result<u8, SongError> {
        let velocity: u8 = self.integer(field, "velocity")?;
        if velocity > MAX_VELOCITY {
            return Err(self.error(format!(
                "velocity {} exceeds {}",
                velocity, MAX_VELOCITY
            )));
        }
        Ok(velocity)
    }
}
