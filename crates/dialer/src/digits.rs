//! Digit values and the fixed-length digit sequence of a phone number.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Placeholder rendered for a slot that has no digit yet.
pub const EMPTY_SLOT: char = '-';

/// A single decimal digit, `0..=9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Digit(u8);

impl Digit {
    /// All ten digits in ascending order (the options of a digit selector).
    pub const ALL: [Digit; 10] = [
        Digit(0),
        Digit(1),
        Digit(2),
        Digit(3),
        Digit(4),
        Digit(5),
        Digit(6),
        Digit(7),
        Digit(8),
        Digit(9),
    ];

    pub fn new(value: u8) -> Option<Self> {
        (value <= 9).then_some(Self(value))
    }

    pub fn from_char(c: char) -> Option<Self> {
        c.to_digit(10).map(|d| Self(d as u8))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn as_char(self) -> char {
        char::from(b'0' + self.0)
    }
}

impl TryFrom<u8> for Digit {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Digit::new(value).ok_or_else(|| format!("{value} is not a decimal digit"))
    }
}

impl From<Digit> for u8 {
    fn from(digit: Digit) -> Self {
        digit.0
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ordered slots of optional digits.
///
/// The length is fixed at construction and follows the selected country's
/// digit count. A new country means a new sequence; slots are never resized
/// in place.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PhoneDigits {
    slots: Vec<Option<Digit>>,
}

impl PhoneDigits {
    /// An all-empty sequence of `len` slots.
    pub fn empty(len: usize) -> Self {
        Self {
            slots: vec![None; len],
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True for a zero-length sequence (never the case for a valid country).
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[Option<Digit>] {
        &self.slots
    }

    /// Digit at `index`; `None` when the index is past the end.
    pub fn get(&self, index: usize) -> Option<Option<Digit>> {
        self.slots.get(index).copied()
    }

    /// Copy of this sequence with slot `index` replaced.
    ///
    /// # Panics
    ///
    /// Panics when `index` is not below [`len`](Self::len). Callers derive the
    /// index from the sequence they render, so a miss is a caller bug.
    pub fn with_digit(&self, index: usize, value: Option<Digit>) -> Self {
        assert!(
            index < self.slots.len(),
            "digit index {index} out of range for a {}-digit number",
            self.slots.len()
        );
        let mut slots = self.slots.clone();
        slots[index] = value;
        Self { slots }
    }

    /// Every slot holds a digit. Computed on each call.
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    pub fn filled(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// The digits entered so far, `None` while any slot is empty.
    pub fn number(&self) -> Option<String> {
        self.slots
            .iter()
            .map(|slot| slot.map(Digit::as_char))
            .collect()
    }
}

impl fmt::Display for PhoneDigits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for slot in &self.slots {
            let c = slot.map(Digit::as_char).unwrap_or(EMPTY_SLOT);
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(v: u8) -> Option<Digit> {
        Digit::new(v)
    }

    #[test]
    fn digit_rejects_values_above_nine() {
        assert!(Digit::new(9).is_some());
        assert!(Digit::new(10).is_none());
        assert!(Digit::from_char('x').is_none());
        assert_eq!(Digit::from_char('7').map(Digit::value), Some(7));
    }

    #[test]
    fn digit_char_round_trip_covers_all() {
        for digit in Digit::ALL {
            assert_eq!(Digit::from_char(digit.as_char()), Some(digit));
        }
    }

    #[test]
    fn empty_sequence_is_incomplete() {
        let digits = PhoneDigits::empty(4);
        assert_eq!(digits.len(), 4);
        assert_eq!(digits.filled(), 0);
        assert!(!digits.is_complete());
        assert_eq!(digits.to_string(), "----");
    }

    #[test]
    fn with_digit_leaves_original_untouched() {
        let digits = PhoneDigits::empty(3);
        let next = digits.with_digit(1, d(5));
        assert_eq!(digits.get(1), Some(None));
        assert_eq!(next.get(1), Some(d(5)));
        assert_eq!(next.to_string(), "-5-");
    }

    #[test]
    fn completes_only_when_every_slot_is_filled() {
        let mut digits = PhoneDigits::empty(3);
        for i in 0..3 {
            assert!(!digits.is_complete());
            digits = digits.with_digit(i, d(i as u8));
        }
        assert!(digits.is_complete());
        assert_eq!(digits.number().as_deref(), Some("012"));

        let cleared = digits.with_digit(2, None);
        assert!(!cleared.is_complete());
        assert_eq!(cleared.number(), None);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn with_digit_past_the_end_panics() {
        let _ = PhoneDigits::empty(2).with_digit(2, d(1));
    }

    #[test]
    fn zero_length_sequence_is_trivially_complete() {
        let digits = PhoneDigits::default();
        assert!(digits.is_empty());
        assert!(digits.is_complete());
    }
}
