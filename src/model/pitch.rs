//! Unspelled pitches and pitch classes.

use std::fmt;
use serde::{Deserialize, Serialize};
use crate::{Error, Result};

/// An unspelled pitch: a MIDI note number, possibly fractional.
///
/// 60.0 is middle C (C4).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Pitch(pub f64);

impl Pitch {
    pub fn new(note_number: f64) -> Self {
        Self(note_number)
    }

    pub fn note_number(self) -> f64 {
        self.0
    }

    /// Note number modulo 12, in `[0, 12)`. Fractional for microtones.
    pub fn pitch_class(self) -> f64 {
        self.0.rem_euclid(12.0)
    }

    /// The integral pitch class, or `InvalidPitchClass` for microtones.
    pub fn class(self) -> Result<PitchClass> {
        PitchClass::from_f64(self.pitch_class())
    }

    /// Octave number under the MIDI convention (note 60 is in octave 4).
    pub fn octave(self) -> i32 {
        (self.0 / 12.0).floor() as i32 - 1
    }
}

impl From<u8> for Pitch {
    fn from(note_number: u8) -> Self {
        Self(f64::from(note_number))
    }
}

/// A bare pitch class is a pitch in MIDI octave -1.
impl From<PitchClass> for Pitch {
    fn from(class: PitchClass) -> Self {
        Self(f64::from(class.value()))
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Pitch class: an integer in `0..=11` (C = 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PitchClass(u8);

impl PitchClass {
    pub fn new(value: i64) -> Option<Self> {
        (0..12).contains(&value).then_some(Self(value as u8))
    }

    /// Reduce any integer modulo 12.
    pub fn wrapping(value: i64) -> Self {
        Self(value.rem_euclid(12) as u8)
    }

    pub fn from_f64(value: f64) -> Result<Self> {
        if value.fract() != 0.0 || !(0.0..12.0).contains(&value) {
            return Err(Error::InvalidPitchClass { value });
        }
        Ok(Self(value as u8))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn all() -> impl Iterator<Item = PitchClass> {
        (0..12).map(PitchClass)
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
