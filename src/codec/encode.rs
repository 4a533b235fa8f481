//! Score to `.song` text

use super::{FIELD_SEPARATOR, LIST_SEPARATOR, NULL_VOICE, VOICE_SEPARATOR};
use crate::duration::Duration;
use crate::note::{MelodyVoice, Note, PercussionVoice};
use crate::score::{Score, ScoreKind};

/// Convert a Score to `.song` text.
///
/// The layout of each note line follows `score.kind()`. Line breaks in the
/// score name are written as spaces, since the name occupies exactly one line.
pub fn encode(score: &Score) -> String {
    let mut out = String::new();

    out.push_str(&single_line(score.name()));
    out.push('\n');

    let ts = score.time_signature();
    out.push_str(&join_fields(&[
        score.kind().ordinal().to_string(),
        score.bpm().to_string(),
        ts.beats_per_measure.to_string(),
        ts.base_beat.digit().to_string(),
    ]));
    out.push('\n');

    for note in score.iter() {
        out.push_str(&note_line(note, score.kind()));
        out.push('\n');
    }

    out
}

fn note_line(note: &Note, kind: ScoreKind) -> String {
    let melody = note.melody.as_ref();
    let percussion = note.percussion.as_ref();

    match kind {
        ScoreKind::Empty | ScoreKind::Melody => join_fields(&[
            pitch_list(melody),
            melody_duration(melody),
            duration_field(&note.offset),
            melody_velocity(melody).to_string(),
        ]),
        ScoreKind::DrumLoop => join_fields(&[
            drum_list(percussion),
            duration_field(&note.offset),
            drum_velocity(percussion).to_string(),
        ]),
        ScoreKind::Combined => join_fields(&[
            format!("{}{}{}", pitch_list(melody), VOICE_SEPARATOR, drum_list(percussion)),
            melody_duration(melody),
            duration_field(&note.offset),
            format!(
                "{}{}{}",
                melody_velocity(melody),
                VOICE_SEPARATOR,
                drum_velocity(percussion)
            ),
        ]),
    }
}

/// Base digit for plain durations, full 3-digit code otherwise.
pub(super) fn duration_field(duration: &Duration) -> String {
    if duration.is_plain() {
        duration.base.digit().to_string()
    } else {
        duration.to_code()
    }
}

fn pitch_list(melody: Option<&MelodyVoice>) -> String {
    match melody {
        Some(voice) => join_list(voice.pitches.iter().map(|p| p.ordinal())),
        None => NULL_VOICE.to_string(),
    }
}

fn drum_list(percussion: Option<&PercussionVoice>) -> String {
    match percussion {
        Some(voice) => join_list(voice.hits.iter().map(|d| d.ordinal())),
        None => NULL_VOICE.to_string(),
    }
}

fn melody_duration(melody: Option<&MelodyVoice>) -> String {
    duration_field(&melody.map_or(Duration::NONE, |m| m.duration))
}

fn melody_velocity(melody: Option<&MelodyVoice>) -> u8 {
    melody.map_or(0, MelodyVoice::velocity)
}

fn drum_velocity(percussion: Option<&PercussionVoice>) -> u8 {
    percussion.map_or(0, PercussionVoice::velocity)
}

fn join_list(ordinals: impl Iterator<Item = u8>) -> String {
    ordinals
        .map(|o| o.to_string())
        .collect::<Vec<_>>()
        .join(LIST_SEPARATOR)
}

fn join_fields(fields: &[String]) -> String {
    fields.join(FIELD_SEPARATOR)
}

fn single_line(name: &str) -> String {
    name.replace(['\r', '\n'], " ")
}
