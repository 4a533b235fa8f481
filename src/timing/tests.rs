use super::*;
use crate::codec::decode;
use crate::drum::Drum;
use crate::duration::{Duration, DurationBase, TimeSignature};
use crate::note::{MelodyVoice, Note, PercussionVoice};
use crate::pitch::Pitch;
use crate::score::Score;

fn d(base: DurationBase) -> Duration {
    Duration::new(base)
}

fn every_sounding_duration() -> Vec<Duration> {
    let mut all = Vec::new();
    for base in DurationBase::ALL {
        if base == DurationBase::None {
            continue;
        }
        all.push(d(base));
        all.push(d(base).with_dot());
        all.push(d(base).with_triplet());
    }
    all
}

#[test]
fn test_quarter_and_whole_at_120() {
    let ts = TimeSignature::default();
    assert_eq!(samples_for_duration(120, 44100, &d(DurationBase::Quarter), &ts), 44100);
    assert_eq!(samples_for_duration(120, 44100, &d(DurationBase::Whole), &ts), 176400);
}

#[test]
fn test_every_base_at_120() {
    let ts = TimeSignature::default();
    let expected = [
        (DurationBase::ThirtySecond, 5512), // 44100 / 8, truncated
        (DurationBase::Sixteenth, 11025),
        (DurationBase::Eighth, 22050),
        (DurationBase::Quarter, 44100),
        (DurationBase::Half, 88200),
        (DurationBase::Whole, 176400),
        (DurationBase::None, 0),
    ];
    for (base, samples) in expected {
        assert_eq!(samples_for_duration(120, 44100, &d(base), &ts), samples, "{:?}", base);
    }
}

#[test]
fn test_dotted_variants_use_three_halves() {
    let ts = TimeSignature::default();
    assert_eq!(samples_for_duration(120, 44100, &d(DurationBase::Eighth).with_dot(), &ts), 33075);
    assert_eq!(samples_for_duration(120, 44100, &d(DurationBase::Quarter).with_dot(), &ts), 66150);
    assert_eq!(samples_for_duration(120, 44100, &d(DurationBase::Half).with_dot(), &ts), 132300);
    assert_eq!(samples_for_duration(120, 44100, &d(DurationBase::Whole).with_dot(), &ts), 264600);
}

#[test]
fn test_triplets_truncate_once() {
    let ts = TimeSignature::default();
    // 44100 * 2/3 = 29400 exactly
    assert_eq!(samples_for_duration(120, 44100, &d(DurationBase::Quarter).with_triplet(), &ts), 29400);
    // 44100 / 8 * 2/3 = 3675 exactly
    assert_eq!(samples_for_duration(120, 44100, &d(DurationBase::ThirtySecond).with_triplet(), &ts), 3675);
    // 88200 * 60/100 / 3 = 17640
    assert_eq!(samples_for_duration(100, 44100, &d(DurationBase::Eighth).with_triplet(), &ts), 17640);
}

#[test]
fn test_eighth_base_beat_doubles_quarter_length() {
    let six_eight = TimeSignature::new(6, DurationBase::Eighth);
    assert_eq!(samples_for_duration(120, 44100, &d(DurationBase::Eighth), &six_eight), 44100);
    assert_eq!(samples_for_duration(120, 44100, &d(DurationBase::Quarter), &six_eight), 88200);
}

#[test]
fn test_unsupported_base_beats_time_like_quarter() {
    let quarter = d(DurationBase::Quarter);
    let four_four = TimeSignature::default();
    for base in [DurationBase::Half, DurationBase::Whole, DurationBase::Sixteenth, DurationBase::None] {
        let ts = TimeSignature::new(4, base);
        assert_eq!(
            samples_for_duration(120, 44100, &quarter, &ts),
            samples_for_duration(120, 44100, &quarter, &four_four)
        );
    }
}

#[test]
fn test_degenerate_inputs_give_zero() {
    let ts = TimeSignature::default();
    assert_eq!(samples_for_duration(0, 44100, &d(DurationBase::Quarter), &ts), 0);
    assert_eq!(samples_for_duration(120, 0, &d(DurationBase::Quarter), &ts), 0);
    assert_eq!(samples_for_duration(120, 44100, &Duration::NONE, &ts), 0);
    assert_eq!(samples_for_duration(120, 44100, &Duration::NONE.with_dot(), &ts), 0);
}

#[test]
fn test_strictly_decreasing_in_bpm() {
    for ts in [TimeSignature::default(), TimeSignature::new(6, DurationBase::Eighth)] {
        for duration in every_sounding_duration() {
            let mut previous = u64::MAX;
            for bpm in 40..=240 {
                let samples = samples_for_duration(bpm, 44100, &duration, &ts);
                assert!(samples < previous, "{} at {} bpm", duration, bpm);
                previous = samples;
            }
        }
    }
}

#[test]
fn test_strictly_increasing_in_sample_rate() {
    let ts = TimeSignature::default();
    for duration in every_sounding_duration() {
        for bpm in [60, 120, 240] {
            let mut previous = 0;
            for sample_rate in (8000..=192000).step_by(100) {
                let samples = samples_for_duration(bpm, sample_rate, &duration, &ts);
                assert!(samples > previous, "{} at {} Hz", duration, sample_rate);
                previous = samples;
            }
        }
    }
}

#[test]
fn test_samples_to_seconds() {
    assert_eq!(samples_to_seconds(88200, 44100), 1.0);
    assert_eq!(samples_to_seconds(44100, 44100), 0.5);
    assert_eq!(samples_to_seconds(100, 0), 0.0);
}

fn lesson_score() -> Score {
    let mut score = Score::new("Lesson");
    let pitch = |o: u8| Pitch::from_ordinal(o).unwrap();
    score.add_note(Note::melody(
        MelodyVoice::new(vec![pitch(48), pitch(52)], 100, d(DurationBase::Quarter)).unwrap(),
        Duration::NONE,
    ));
    score.add_note(Note::new(
        Some(MelodyVoice::rest(d(DurationBase::Quarter))),
        Some(PercussionVoice::new(vec![Drum::Kick, Drum::HiHatPedal], 90).unwrap()),
        d(DurationBase::Quarter),
    ));
    score.add_note(Note::new(None, None, d(DurationBase::Quarter)));
    score.add_note(Note::melody(
        MelodyVoice::new(vec![pitch(55)], 80, d(DurationBase::Whole)).unwrap(),
        d(DurationBase::Half),
    ));
    score
}

#[test]
fn test_timeline_offsets_accumulate() {
    let timeline = score_to_timeline(&lesson_score());
    assert_eq!(timeline.sample_rate, 44100);
    assert_eq!(timeline.len(), 4);

    let offsets: Vec<u64> = timeline.iter().map(|e| e.offset_samples).collect();
    assert_eq!(offsets, vec![0, 44100, 88200, 176400]);

    let seconds: Vec<f64> = timeline.iter().map(|e| e.offset_seconds).collect();
    assert_eq!(seconds, vec![0.0, 0.5, 1.0, 2.0]);
}

#[test]
fn test_timeline_entry_contents() {
    let timeline = score_to_timeline(&lesson_score());

    let first = &timeline.entries[0];
    assert_eq!(first.length_samples, 44100);
    assert_eq!(first.melody_velocity, Some(100));
    assert_eq!(first.percussion_hits, None);
    assert!(!first.has_hi_hat);

    let second = &timeline.entries[1];
    assert_eq!(second.percussion_hits, Some(vec![Drum::Kick, Drum::HiHatPedal]));
    assert_eq!(second.percussion_velocity, Some(90));
    assert!(second.has_hi_hat);

    let silent = &timeline.entries[2];
    assert!(silent.is_silent());
    assert_eq!(silent.length_samples, 0);

    let last = &timeline.entries[3];
    assert_eq!(last.length_samples, 176400);
    assert_eq!(timeline.total_samples(), 176400 + 176400);
    assert_eq!(timeline.duration_seconds(), 4.0);
}

#[test]
fn test_first_note_starts_at_its_offset() {
    let score = decode("Late\n1;120;4;3\n60;3;4;100\n").unwrap();
    let timeline = score_to_timeline(&score);
    assert_eq!(timeline.entries[0].offset_samples, 88200);
}

#[test]
fn test_key_hits_skip_rests_and_split_chords() {
    let hits = score_to_timeline(&lesson_score()).key_hits();
    let summary: Vec<(u64, u8)> = hits.iter().map(|h| (h.offset_samples, h.pitch.ordinal())).collect();
    assert_eq!(summary, vec![(0, 48), (0, 52), (176400, 55)]);
    assert_eq!(hits[2].velocity, 80);
    assert_eq!(hits[2].length_samples, 176400);
}

#[test]
fn test_timeline_follows_tempo_changes() {
    let mut score = lesson_score();
    let slow = score_to_timeline(&score).total_samples();
    score.set_bpm(60).unwrap();
    let slower = score_to_timeline(&score).total_samples();
    assert_eq!(slower, slow * 2);
}

#[test]
fn test_empty_score_timeline() {
    let timeline = score_to_timeline_at(&Score::new("Nothing"), 48000);
    assert!(timeline.is_empty());
    assert_eq!(timeline.total_samples(), 0);
    assert!(timeline.key_hits().is_empty());
}

#[test]
fn test_only_one_hi_hat_state_reaches_playback() {
    // closed, kick, open in one step: the open hi-hat is the one that sounds
    let score = decode("Hats\n2;120;4;3\n6,0,7;6;90\n7,7;3;90\n").unwrap();
    let timeline = score_to_timeline(&score);

    let first = &timeline.entries[0];
    assert_eq!(first.percussion_hits, Some(vec![Drum::Kick, Drum::HiHatOpen]));
    assert!(first.has_hi_hat);

    let hi_hats = |entry: &TimelineEntry| {
        entry
            .percussion_hits
            .iter()
            .flatten()
            .filter(|d| d.is_hi_hat())
            .count()
    };
    assert!(timeline.iter().all(|e| hi_hats(e) <= 1));

    // the score itself keeps what was written
    assert_eq!(
        score.note(0).unwrap().percussion.as_ref().unwrap().hits,
        vec![Drum::HiHatClosed, Drum::Kick, Drum::HiHatOpen]
    );
}
