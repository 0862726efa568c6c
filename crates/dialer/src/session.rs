//! Session state of one mounted form and its form-level transitions.
//!
//! `SessionState` is a value: every transition borrows the current state and
//! returns the next one. Reset and submission live in `submission`, since
//! they need the message pools and an index source.

use tracing::debug;

use crate::behavior::{BehaviorFlags, BehaviorMode, Presentation};
use crate::country::Country;
use crate::digits::{Digit, PhoneDigits};
use crate::submission::DialogPhase;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeKind {
    /// Taunt after a reset.
    ResetTaunt,
    /// Excuse after a rejected submission (direct or confirmed).
    SubmissionExcuse,
    /// Fixed message after cancelling the confirmation dialog.
    CancelLie,
}

/// User-facing message. Its text survives hiding; only visibility toggles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    country: Country,
    digits: PhoneDigits,
    reset_counter: u64,
    notice: Option<Notice>,
    error_visible: bool,
    hovering: bool,
    swapped: bool,
    dialog: DialogPhase,
}

impl SessionState {
    /// Fresh session for a newly mounted form.
    pub fn new(country: Country) -> Self {
        let digits = PhoneDigits::empty(country.digit_count);
        Self {
            country,
            digits,
            reset_counter: 0,
            notice: None,
            error_visible: false,
            hovering: false,
            swapped: false,
            dialog: DialogPhase::Idle,
        }
    }

    pub fn country(&self) -> &Country {
        &self.country
    }

    pub fn digits(&self) -> &PhoneDigits {
        &self.digits
    }

    pub fn reset_counter(&self) -> u64 {
        self.reset_counter
    }

    pub fn behavior_mode(&self) -> BehaviorMode {
        BehaviorMode::from_counter(self.reset_counter)
    }

    pub fn is_complete(&self) -> bool {
        self.digits.is_complete()
    }

    pub fn error_visible(&self) -> bool {
        self.error_visible
    }

    /// Last message text, whether or not it is currently shown.
    pub fn error_message(&self) -> Option<&str> {
        self.notice.as_ref().map(|n| n.text.as_str())
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// The notice, but only while it is visible.
    pub fn visible_notice(&self) -> Option<&Notice> {
        self.notice.as_ref().filter(|_| self.error_visible)
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    pub fn is_swapped(&self) -> bool {
        self.swapped
    }

    pub fn dialog(&self) -> DialogPhase {
        self.dialog
    }

    pub fn dialog_open(&self) -> bool {
        self.dialog.is_pending()
    }

    pub fn flags(&self) -> BehaviorFlags {
        BehaviorFlags {
            complete: self.is_complete(),
            hovering: self.hovering,
            swapped: self.swapped,
        }
    }

    /// Layout of the action pair for the current counter and flags.
    pub fn presentation(&self) -> Presentation {
        Presentation::derive(self.behavior_mode(), self.flags())
    }

    /// Switch country. The digit sequence is replaced by an all-empty one of
    /// the new length, even when the same country is picked again.
    pub fn select_country(&self, country: Country) -> Self {
        debug!(country = %country.name, digits = country.digit_count, "country selected");
        Self {
            digits: PhoneDigits::empty(country.digit_count),
            country,
            ..self.clone()
        }
    }

    /// Write one slot. A non-empty value hides a visible notice but keeps its
    /// text.
    ///
    /// # Panics
    ///
    /// Panics when `index` is outside the current digit sequence.
    pub fn set_digit(&self, index: usize, value: Option<Digit>) -> Self {
        let digits = self.digits.with_digit(index, value);
        let error_visible = self.error_visible && value.is_none();
        Self {
            digits,
            error_visible,
            ..self.clone()
        }
    }

    /// Pointer entered the button container.
    ///
    /// Tracks presence in every mode; in swap mode a complete form also
    /// toggles the order of the controls.
    pub fn hover_enter(&self) -> Self {
        let swapped = match self.behavior_mode() {
            BehaviorMode::Swap if self.is_complete() => !self.swapped,
            _ => self.swapped,
        };
        Self {
            hovering: true,
            swapped,
            ..self.clone()
        }
    }

    /// Pointer left the button container. The swap order persists.
    pub fn hover_leave(&self) -> Self {
        Self {
            hovering: false,
            ..self.clone()
        }
    }

    pub(crate) fn with_dialog(&self, dialog: DialogPhase) -> Self {
        Self {
            dialog,
            ..self.clone()
        }
    }

    /// Step shared by reset and every rejection: bump the counter, clear the
    /// digits, undo any swap and show `notice`.
    pub(crate) fn advance(&self, notice: Notice) -> Self {
        let reset_counter = self.reset_counter + 1;
        debug!(
            reset_counter,
            mode = %BehaviorMode::from_counter(reset_counter),
            "behavior advanced"
        );
        Self {
            digits: PhoneDigits::empty(self.country.digit_count),
            reset_counter,
            notice: Some(notice),
            error_visible: true,
            swapped: false,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn norway() -> Country {
        Country::new("Norway", "🇳🇴", "+47", 8)
    }

    fn filled(mut state: SessionState) -> SessionState {
        for i in 0..state.digits().len() {
            state = state.set_digit(i, Digit::new((i % 10) as u8));
        }
        state
    }

    fn at_counter(n: u64) -> SessionState {
        let mut state = SessionState::new(norway());
        for _ in 0..n {
            state = state.advance(Notice::new(NoticeKind::ResetTaunt, "again"));
        }
        state
    }

    #[test]
    fn new_session_starts_clean() {
        let state = SessionState::new(norway());
        assert_eq!(state.reset_counter(), 0);
        assert_eq!(state.behavior_mode(), BehaviorMode::HorizontalCollapse);
        assert_eq!(state.digits(), &PhoneDigits::empty(8));
        assert!(!state.error_visible());
        assert_eq!(state.error_message(), None);
        assert!(!state.dialog_open());
    }

    #[test]
    fn select_country_resizes_and_clears() {
        let state = filled(SessionState::new(norway()));
        assert!(state.is_complete());

        let tuvalu = Country::new("Tuvalu", "🇹🇻", "+688", 5);
        let next = state.select_country(tuvalu.clone());
        assert_eq!(next.country(), &tuvalu);
        assert_eq!(next.digits(), &PhoneDigits::empty(5));
        assert_eq!(next.reset_counter(), state.reset_counter());

        let again = filled(next.clone()).select_country(tuvalu);
        assert_eq!(again.digits(), &PhoneDigits::empty(5));
    }

    #[test]
    fn select_country_keeps_notice_state() {
        let state = at_counter(1);
        let next = state.select_country(Country::new("Fiji", "🇫🇯", "+679", 7));
        assert!(next.error_visible());
        assert_eq!(next.error_message(), Some("again"));
    }

    #[test]
    fn non_empty_digit_hides_notice_but_keeps_text() {
        let state = at_counter(1);
        assert!(state.error_visible());

        let cleared = state.set_digit(0, None);
        assert!(cleared.error_visible());

        let typed = state.set_digit(0, Digit::new(4));
        assert!(!typed.error_visible());
        assert_eq!(typed.error_message(), Some("again"));
        assert_eq!(typed.visible_notice(), None);
        assert_eq!(typed.reset_counter(), 1);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn set_digit_outside_sequence_panics() {
        let _ = SessionState::new(norway()).set_digit(8, Digit::new(1));
    }

    #[test]
    fn hover_tracks_presence_in_every_mode() {
        for n in 0..3 {
            let state = at_counter(n);
            assert!(state.hover_enter().is_hovering());
            assert!(!state.hover_enter().hover_leave().is_hovering());
        }
    }

    #[test]
    fn swap_toggles_only_when_complete_in_swap_mode() {
        let incomplete = at_counter(1);
        assert!(!incomplete.hover_enter().is_swapped());

        let complete = filled(at_counter(1));
        let once = complete.hover_enter();
        assert!(once.is_swapped());
        let left = once.hover_leave();
        assert!(left.is_swapped(), "leaving keeps the swap");
        assert!(!left.hover_enter().is_swapped());

        for n in [0, 2] {
            assert!(!filled(at_counter(n)).hover_enter().is_swapped());
        }
    }

    #[test]
    fn advance_resets_form_and_swap() {
        let swapped = filled(at_counter(1)).hover_enter();
        assert!(swapped.is_swapped());

        let next = swapped.advance(Notice::new(NoticeKind::SubmissionExcuse, "nope"));
        assert_eq!(next.reset_counter(), 2);
        assert!(!next.is_swapped());
        assert_eq!(next.digits(), &PhoneDigits::empty(8));
        assert_eq!(
            next.visible_notice(),
            Some(&Notice::new(NoticeKind::SubmissionExcuse, "nope"))
        );
    }
}
