//! # Pitch Spelling Model
//!
//! Plain data shared by the speller and the inverter: pitches, spellings,
//! tendencies, and the category tables that connect them.
//!
//! Design rule: nothing here knows about graphs or flow.
//! No I/O and no shared state.

pub mod pitch;
pub mod spelling;
pub mod tendency;
pub mod category;

pub use pitch::{Pitch, PitchClass};
pub use spelling::{LetterName, Modifier, Spelling, SpelledPitch};
pub use tendency::{ModifierDirection, Tendency, TendencyPair};
pub use category::Category;
