//! End-to-end tests for spelling pitches through the flow network.
//!
//! Each test exercises: pitches -> network -> minimum cut -> tendencies -> spellings.

use std::collections::BTreeMap;

use pitch_speller::{
    spell, Category, Error, LetterName, Modifier, Pitch, PitchClass, PitchSpeller, SpellerConfig,
    Spelling, Tendency, TendencyPair, Weighting, DEFAULT_PIVOT,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

// ============================================================================
// Helpers
// ============================================================================

fn pitches(notes: &[u8]) -> BTreeMap<usize, Pitch> {
    notes.iter().enumerate().map(|(i, &n)| (i, Pitch::from(n))).collect()
}

fn spelled_names(notes: &[u8], pivot: Spelling) -> Vec<String> {
    spell(&pitches(notes), pivot)
        .unwrap()
        .values()
        .map(|p| p.to_string())
        .collect()
}

/// Every spelling the network can produce for `class`.
fn candidates(class: PitchClass) -> Vec<Spelling> {
    TendencyPair::STATES
        .iter()
        .filter_map(|&pair| Category::of(class).spelling(class, pair))
        .collect()
}

/// Line-of-fifths distance to the pivot plus between every pair.
fn energy(spellings: &[Spelling], pivot: Spelling) -> i64 {
    let p: Vec<i64> = spellings.iter().map(|s| i64::from(s.line_of_fifths())).collect();
    let anchor = i64::from(pivot.line_of_fifths());
    let unary: i64 = p.iter().map(|x| (x - anchor).abs()).sum();
    let mut pairwise = 0;
    for i in 0..p.len() {
        for j in i + 1..p.len() {
            pairwise += (p[i] - p[j]).abs();
        }
    }
    unary + pairwise
}

fn brute_force_minimum(classes: &[PitchClass], pivot: Spelling) -> i64 {
    let mut best = i64::MAX;
    let options: Vec<Vec<Spelling>> = classes.iter().map(|&c| candidates(c)).collect();
    let mut choice = vec![0usize; classes.len()];
    loop {
        let chosen: Vec<Spelling> = choice.iter().zip(&options).map(|(&k, o)| o[k]).collect();
        best = best.min(energy(&chosen, pivot));

        let mut position = 0;
        loop {
            if position == choice.len() {
                return best;
            }
            choice[position] += 1;
            if choice[position] < options[position].len() {
                break;
            }
            choice[position] = 0;
            position += 1;
        }
    }
}

// ============================================================================
// 1. Single pitches against a pivot
// ============================================================================

#[test]
fn test_single_pitches_with_d_pivot() {
    assert_eq!(spelled_names(&[60], DEFAULT_PIVOT), ["C4"]);
    assert_eq!(spelled_names(&[63], DEFAULT_PIVOT), ["Eb4"]);
    assert_eq!(spelled_names(&[66], DEFAULT_PIVOT), ["F#4"]);
}

#[test]
fn test_g_sharp_or_a_flat_depends_on_pivot() {
    assert_eq!(spelled_names(&[68], Spelling::natural(LetterName::C)), ["Ab4"]);
    assert_eq!(spelled_names(&[68], Spelling::natural(LetterName::B)), ["G#4"]);
}

#[test]
fn test_pitch_class_inputs_spell_in_octave_minus_one() {
    assert_eq!(spelled_names(&[3], DEFAULT_PIVOT), ["Eb-1"]);
}

// ============================================================================
// 2. Chords
// ============================================================================

#[test]
fn test_major_triads() {
    assert_eq!(spelled_names(&[60, 64, 67], DEFAULT_PIVOT), ["C4", "E4", "G4"]);
    assert_eq!(spelled_names(&[68, 72, 75], DEFAULT_PIVOT), ["Ab4", "C5", "Eb5"]);
    assert_eq!(spelled_names(&[64, 68, 71], DEFAULT_PIVOT), ["E4", "G#4", "B4"]);
    assert_eq!(spelled_names(&[71, 75, 78], DEFAULT_PIVOT), ["B4", "D#5", "F#5"]);
}

#[test]
fn test_neighbors_decide_the_ambiguous_class() {
    assert_eq!(spelled_names(&[64, 68], DEFAULT_PIVOT), ["E4", "G#4"]);
    assert_eq!(spelled_names(&[60, 68], DEFAULT_PIVOT), ["C4", "Ab4"]);
}

#[test]
fn test_sparse_indices_are_preserved() {
    let input = BTreeMap::from([(4, Pitch::from(61)), (9, Pitch::from(65))]);
    let spelled = spell(&input, DEFAULT_PIVOT).unwrap();
    assert_eq!(spelled.keys().copied().collect::<Vec<_>>(), [4, 9]);
    assert_eq!(spelled[&4].spelling, Spelling::new(LetterName::D, Modifier::Flat));
    assert_eq!(spelled[&9].spelling, Spelling::natural(LetterName::F));
}

// ============================================================================
// 3. Weightings and configuration
// ============================================================================

#[test]
fn test_uniform_weighting_reaches_around_the_octave() {
    let config = SpellerConfig::default().with_weighting(Weighting::Uniform { capacity: 1 });
    let spelled = PitchSpeller::with_config(pitches(&[60]), config).unwrap().spell();
    assert_eq!(spelled[&0].to_string(), "B#3");
    assert_eq!(spelled[&0].octave, 3);
}

#[test]
fn test_config_from_json_sets_pivot() {
    let config = SpellerConfig::from_json(r#"{ "pivot": { "letter": "c", "modifier": "natural" } }"#).unwrap();
    let spelled = PitchSpeller::with_config(pitches(&[68]), config).unwrap().spell();
    assert_eq!(spelled[&0].to_string(), "Ab4");
}

#[test]
fn test_empty_config_is_default() {
    let config = SpellerConfig::from_json("{}").unwrap();
    assert_eq!(config.pivot, DEFAULT_PIVOT);
    assert!(matches!(config.weighting, Weighting::Parsimony { pivot_weight: 1, pairwise_weight: 1 }));
}

#[test]
fn test_invalid_config_is_an_error() {
    let err = SpellerConfig::from_json(r#"{ "weighting": { "kind": "quadratic" } }"#).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

// ============================================================================
// 4. Errors
// ============================================================================

#[test]
fn test_microtonal_pitch_is_rejected() {
    let input = BTreeMap::from([(0, Pitch::new(60.25))]);
    let err = spell(&input, DEFAULT_PIVOT).unwrap_err();
    assert!(matches!(err, Error::InvalidPitchClass { value } if value == 0.25));
    assert!(err.to_string().contains("0.25"));
}

#[test]
fn test_pairwise_weight_past_i64_max_is_a_capacity_error() {
    let config = SpellerConfig::from_json(
        r#"{ "weighting": { "kind": "parsimony", "pivot_weight": 1, "pairwise_weight": 18446744073709551615 } }"#,
    )
    .unwrap();
    let err = PitchSpeller::with_config(pitches(&[61, 65]), config).unwrap_err();
    assert!(matches!(err, Error::CapacityOverflow(_)));
}

#[test]
fn test_uniform_capacity_at_u64_max_is_a_capacity_error() {
    let config = SpellerConfig::from_json(
        r#"{ "weighting": { "kind": "uniform", "capacity": 18446744073709551615 } }"#,
    )
    .unwrap();
    let err = PitchSpeller::with_config(pitches(&[60]), config).unwrap_err();
    assert!(matches!(err, Error::CapacityOverflow(_)));
}

// ============================================================================
// 5. Properties
// ============================================================================

fn any_pivot() -> impl Strategy<Value = Spelling> {
    prop::sample::select(Spelling::all().collect::<Vec<_>>())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Spelling the same input twice gives the same answer.
    #[test]
    fn spelling_is_deterministic(notes in prop::collection::vec(0u8..128, 1..7), pivot in any_pivot()) {
        let first = spell(&pitches(&notes), pivot).unwrap();
        let second = spell(&pitches(&notes), pivot).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Every spelling sounds the pitch it was chosen for.
    #[test]
    fn spellings_keep_pitch_class(notes in prop::collection::vec(0u8..128, 1..7), pivot in any_pivot()) {
        let spelled = spell(&pitches(&notes), pivot).unwrap();
        for (index, &note) in notes.iter().enumerate() {
            let expected = PitchClass::wrapping(i64::from(note));
            prop_assert_eq!(spelled[&index].spelling.pitch_class(), expected);
        }
    }

    /// The cut never leaves an up node below its down node.
    #[test]
    fn down_up_pair_never_occurs(notes in prop::collection::vec(0u8..128, 1..7), pivot in any_pivot()) {
        let speller = PitchSpeller::new(pitches(&notes), pivot).unwrap();
        let excluded = TendencyPair::new(Tendency::Down, Tendency::Up);
        prop_assert!(speller.tendencies().values().all(|pair| *pair != excluded));
    }

    /// The cut finds the cheapest assignment of spellings.
    #[test]
    fn spelling_minimises_fifths_distance(notes in prop::collection::vec(0u8..128, 1..6), pivot in any_pivot()) {
        let spelled = spell(&pitches(&notes), pivot).unwrap();
        let chosen: Vec<Spelling> = spelled.values().map(|p| p.spelling).collect();
        let classes: Vec<PitchClass> = notes.iter().map(|&n| PitchClass::wrapping(i64::from(n))).collect();
        prop_assert_eq!(energy(&chosen, pivot), brute_force_minimum(&classes, pivot));
    }
}
