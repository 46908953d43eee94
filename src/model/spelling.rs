//! Letter names, accidentals, and spelled pitches.

use std::fmt;
use serde::{Deserialize, Serialize};
use super::{Category, Pitch, PitchClass, TendencyPair};

// ============================================================================
// Letter names
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LetterName {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl LetterName {
    pub const ALL: [LetterName; 7] = [
        LetterName::C,
        LetterName::D,
        LetterName::E,
        LetterName::F,
        LetterName::G,
        LetterName::A,
        LetterName::B,
    ];

    /// Pitch class of the natural.
    pub fn pitch_class(self) -> u8 {
        match self {
            LetterName::C => 0,
            LetterName::D => 2,
            LetterName::E => 4,
            LetterName::F => 5,
            LetterName::G => 7,
            LetterName::A => 9,
            LetterName::B => 11,
        }
    }

    /// The next letter up (B wraps to C).
    pub fn successor(self) -> Self {
        Self::ALL[(self as usize + 1) % 7]
    }

    /// The next letter down (C wraps to B).
    pub fn predecessor(self) -> Self {
        Self::ALL[(self as usize + 6) % 7]
    }

    /// Position of the natural on the line of fifths, with D at 0.
    pub fn line_of_fifths(self) -> i32 {
        match self {
            LetterName::F => -3,
            LetterName::C => -2,
            LetterName::G => -1,
            LetterName::D => 0,
            LetterName::A => 1,
            LetterName::E => 2,
            LetterName::B => 3,
        }
    }
}

impl fmt::Display for LetterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LetterName::C => "C",
            LetterName::D => "D",
            LetterName::E => "E",
            LetterName::F => "F",
            LetterName::G => "G",
            LetterName::A => "A",
            LetterName::B => "B",
        };
        f.write_str(name)
    }
}

// ============================================================================
// Modifiers
// ============================================================================

/// Accidental, from double flat to double sharp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    DoubleFlat,
    Flat,
    Natural,
    Sharp,
    DoubleSharp,
}

impl Modifier {
    pub fn semitones(self) -> i32 {
        match self {
            Modifier::DoubleFlat => -2,
            Modifier::Flat => -1,
            Modifier::Natural => 0,
            Modifier::Sharp => 1,
            Modifier::DoubleSharp => 2,
        }
    }

    pub fn from_semitones(semitones: i32) -> Option<Self> {
        match semitones {
            -2 => Some(Modifier::DoubleFlat),
            -1 => Some(Modifier::Flat),
            0 => Some(Modifier::Natural),
            1 => Some(Modifier::Sharp),
            2 => Some(Modifier::DoubleSharp),
            _ => None,
        }
    }

    pub fn is_flat(self) -> bool {
        self.semitones() < 0
    }

    pub fn is_sharp(self) -> bool {
        self.semitones() > 0
    }

    fn symbol(self) -> &'static str {
        match self {
            Modifier::DoubleFlat => "bb",
            Modifier::Flat => "b",
            Modifier::Natural => "",
            Modifier::Sharp => "#",
            Modifier::DoubleSharp => "##",
        }
    }
}

// ============================================================================
// Spelling
// ============================================================================

/// A letter name with an accidental, independent of octave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Spelling {
    pub letter: LetterName,
    pub modifier: Modifier,
}

impl Spelling {
    pub const fn new(letter: LetterName, modifier: Modifier) -> Self {
        Self { letter, modifier }
    }

    pub const fn natural(letter: LetterName) -> Self {
        Self::new(letter, Modifier::Natural)
    }

    /// Every spelling within a double accidental (35 of them).
    pub fn all() -> impl Iterator<Item = Spelling> {
        LetterName::ALL.into_iter().flat_map(|letter| {
            [
                Modifier::DoubleFlat,
                Modifier::Flat,
                Modifier::Natural,
                Modifier::Sharp,
                Modifier::DoubleSharp,
            ]
            .into_iter()
            .map(move |modifier| Spelling::new(letter, modifier))
        })
    }

    pub fn pitch_class(self) -> PitchClass {
        PitchClass::wrapping(i64::from(self.letter.pitch_class()) + i64::from(self.modifier.semitones()))
    }

    /// Position on the line of fifths (D = 0; each sharp adds 7).
    pub fn line_of_fifths(self) -> i32 {
        self.letter.line_of_fifths() + 7 * self.modifier.semitones()
    }

    pub fn category(self) -> Category {
        Category::of(self.pitch_class())
    }

    /// The tendency pair that decodes to this spelling.
    pub fn tendencies(self) -> TendencyPair {
        self.category()
            .tendencies(self)
            .expect("every spelling within a double accidental belongs to its category's table")
    }
}

impl fmt::Display for Spelling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.letter, self.modifier.symbol())
    }
}

// ============================================================================
// Spelled pitch
// ============================================================================

/// A pitch together with its chosen spelling and nominal octave.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpelledPitch {
    pub pitch: Pitch,
    pub spelling: Spelling,
    /// Octave number as written, which differs from the sounding octave for
    /// spellings that reach across the B/C boundary (Cb, B#).
    pub octave: i32,
}

impl SpelledPitch {
    pub fn new(pitch: Pitch, spelling: Spelling) -> Self {
        let mut octave = pitch.octave();
        if spelling.letter == LetterName::C && spelling.modifier.is_flat() {
            octave += 1;
        } else if spelling.letter == LetterName::B && spelling.modifier.is_sharp() {
            octave -= 1;
        }
        Self { pitch, spelling, octave }
    }
}

impl fmt::Display for SpelledPitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.spelling, self.octave)
    }
}
