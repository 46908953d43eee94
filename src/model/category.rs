//! # Spelling Categories
//!
//! Six fixed partitions of pitch-class space. Pitch classes in the same
//! category decode tendency pairs the same way:
//!
//! | Category           | Classes  | Spellings (down / neutral / up) |
//! |--------------------|----------|---------------------------------|
//! | `FlatwardNatural`  | 0, 5     | Dbb C B#, Gbb F E#              |
//! | `Sharp`            | 1, 6     | Db C# B##, Gb F# E##            |
//! | `Natural`          | 2, 7, 9  | Ebb D C##, Abb G F##, Bbb A G## |
//! | `Flat`             | 3, 10    | Fbb Eb D#, Cbb Bb A#            |
//! | `SharpwardNatural` | 4, 11    | Fb E D##, Cb B A##              |
//! | `Ambiguous`        | 8        | Ab / (none) / G#                |
//!
//! A spelling's letter is its class's neutral letter, moved one letter up
//! for `ModifierDirection::Down` and one letter down for `Up`. Class 8 has
//! no neutral letter: it is G for `Up` and A for `Down`.
//!
//! All tables are `const` data.

use serde::{Deserialize, Serialize};
use super::{LetterName, Modifier, ModifierDirection, PitchClass, Spelling, Tendency, TendencyPair};

pub type ModifierTable = [(TendencyPair, ModifierDirection)];

const THREE_WAY: &ModifierTable = &[
    (TendencyPair::new(Tendency::Up, Tendency::Down), ModifierDirection::Neutral),
    (TendencyPair::new(Tendency::Down, Tendency::Down), ModifierDirection::Down),
    (TendencyPair::new(Tendency::Up, Tendency::Up), ModifierDirection::Up),
];

/// Class 8 has no neutral spelling, so `(up, down)` is absent too.
const TWO_WAY: &ModifierTable = &[
    (TendencyPair::new(Tendency::Down, Tendency::Down), ModifierDirection::Down),
    (TendencyPair::new(Tendency::Up, Tendency::Up), ModifierDirection::Up),
];

const CATEGORIES: [Category; 12] = [
    Category::FlatwardNatural,
    Category::Sharp,
    Category::Natural,
    Category::Flat,
    Category::SharpwardNatural,
    Category::FlatwardNatural,
    Category::Sharp,
    Category::Natural,
    Category::Ambiguous,
    Category::Natural,
    Category::Flat,
    Category::SharpwardNatural,
];

const NEUTRAL_LETTERS: [Option<LetterName>; 12] = [
    Some(LetterName::C),
    Some(LetterName::C),
    Some(LetterName::D),
    Some(LetterName::E),
    Some(LetterName::E),
    Some(LetterName::F),
    Some(LetterName::F),
    Some(LetterName::G),
    None,
    Some(LetterName::A),
    Some(LetterName::B),
    Some(LetterName::B),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// C, F
    FlatwardNatural,
    /// C#, F#
    Sharp,
    /// D, G, A
    Natural,
    /// Eb, Bb
    Flat,
    /// E, B
    SharpwardNatural,
    /// G# / Ab
    Ambiguous,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::FlatwardNatural,
        Category::Sharp,
        Category::Natural,
        Category::Flat,
        Category::SharpwardNatural,
        Category::Ambiguous,
    ];

    pub fn of(class: PitchClass) -> Self {
        CATEGORIES[usize::from(class.value())]
    }

    /// `None` outside `0..=11`.
    pub fn for_pitch_class(value: i64) -> Option<Self> {
        PitchClass::new(value).map(Self::of)
    }

    pub fn pitch_classes(self) -> &'static [u8] {
        match self {
            Category::FlatwardNatural => &[0, 5],
            Category::Sharp => &[1, 6],
            Category::Natural => &[2, 7, 9],
            Category::Flat => &[3, 10],
            Category::SharpwardNatural => &[4, 11],
            Category::Ambiguous => &[8],
        }
    }

    pub fn contains(self, class: PitchClass) -> bool {
        Self::of(class) == self
    }

    pub fn modifier_table(self) -> &'static ModifierTable {
        match self {
            Category::Ambiguous => TWO_WAY,
            _ => THREE_WAY,
        }
    }

    /// `None` for combinations the flow network never produces.
    pub fn modifier_direction(self, pair: TendencyPair) -> Option<ModifierDirection> {
        self.modifier_table()
            .iter()
            .find(|(p, _)| *p == pair)
            .map(|(_, direction)| *direction)
    }

    /// Neutral letter of `class`, if it has one and belongs here.
    pub fn neutral_letter(self, class: PitchClass) -> Option<LetterName> {
        if !self.contains(class) {
            return None;
        }
        NEUTRAL_LETTERS[usize::from(class.value())]
    }

    fn letter(class: PitchClass, direction: ModifierDirection) -> Option<LetterName> {
        match (NEUTRAL_LETTERS[usize::from(class.value())], direction) {
            (Some(neutral), ModifierDirection::Neutral) => Some(neutral),
            (Some(neutral), ModifierDirection::Down) => Some(neutral.successor()),
            (Some(neutral), ModifierDirection::Up) => Some(neutral.predecessor()),
            (None, ModifierDirection::Up) => Some(LetterName::G),
            (None, ModifierDirection::Down) => Some(LetterName::A),
            (None, ModifierDirection::Neutral) => None,
        }
    }

    /// Decode a tendency pair into a spelling of `class`.
    pub fn spelling(self, class: PitchClass, pair: TendencyPair) -> Option<Spelling> {
        if !self.contains(class) {
            return None;
        }
        let direction = self.modifier_direction(pair)?;
        let letter = Self::letter(class, direction)?;
        let offset = (i32::from(class.value()) - i32::from(letter.pitch_class()) + 6).rem_euclid(12) - 6;
        Some(Spelling::new(letter, Modifier::from_semitones(offset)?))
    }

    /// Inverse of [`Category::spelling`].
    pub fn tendencies(self, spelling: Spelling) -> Option<TendencyPair> {
        let class = spelling.pitch_class();
        if !self.contains(class) {
            return None;
        }
        let direction = ModifierDirection::ALL
            .into_iter()
            .find(|&d| Self::letter(class, d) == Some(spelling.letter))?;
        self.modifier_table()
            .iter()
            .find(|(_, d)| *d == direction)
            .map(|(pair, _)| *pair)
    }
}
