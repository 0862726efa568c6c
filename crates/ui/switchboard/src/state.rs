use dialer::{DialerResult, ReferenceData, SessionState};

/// Which part of the form receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Country,
    /// Slot index in the digit row.
    Digits(usize),
    /// Position in the button row, left to right. A swap moves the controls
    /// under a fixed cursor.
    Actions(usize),
}

pub struct State {
    pub session: SessionState,
    pub reference: ReferenceData,
    pub focus: Focus,
    pub show_counter: bool,
}

impl State {
    /// Mount the form. `country` picks the initial selection by name; the
    /// catalog default is used without it.
    pub fn new(
        reference: ReferenceData,
        country: Option<&str>,
        show_counter: bool,
    ) -> DialerResult<Self> {
        let initial = match country {
            Some(name) => reference.countries.resolve(name)?.clone(),
            None => reference.countries.default_country().clone(),
        };
        Ok(Self {
            session: SessionState::new(initial),
            reference,
            focus: Focus::Country,
            show_counter,
        })
    }

    pub fn next_focus(&self) -> Focus {
        match self.focus {
            Focus::Country => Focus::Digits(0),
            Focus::Digits(_) => Focus::Actions(0),
            Focus::Actions(_) => Focus::Country,
        }
    }

    pub fn prev_focus(&self) -> Focus {
        match self.focus {
            Focus::Country => Focus::Actions(0),
            Focus::Digits(_) => Focus::Country,
            Focus::Actions(_) => Focus::Digits(0),
        }
    }

    /// Keep the digit cursor inside the current sequence.
    pub fn clamp_focus(&mut self) {
        if let Focus::Digits(i) = self.focus {
            let last = self.session.digits().len().saturating_sub(1);
            self.focus = Focus::Digits(i.min(last));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dialer::{Country, EmbeddedReference, ReferenceProvider};
    use pretty_assertions::assert_eq;

    fn state(country: Option<&str>) -> DialerResult<State> {
        State::new(EmbeddedReference.load().unwrap(), country, false)
    }

    #[test]
    fn mounts_on_catalog_default() {
        let s = state(None).unwrap();
        assert_eq!(s.session.country().name, "Norway");
        assert_eq!(s.focus, Focus::Country);
    }

    #[test]
    fn mounts_on_named_country() {
        let s = state(Some("tuvalu")).unwrap();
        assert_eq!(s.session.country().name, "Tuvalu");
        assert_eq!(s.session.digits().len(), s.session.country().digit_count);
        assert!(state(Some("Atlantis")).is_err());
    }

    #[test]
    fn focus_cycles_through_rows() {
        let mut s = state(None).unwrap();
        let mut seen = Vec::new();
        for _ in 0..3 {
            s.focus = s.next_focus();
            seen.push(s.focus);
        }
        assert_eq!(seen, [Focus::Digits(0), Focus::Actions(0), Focus::Country]);
        assert_eq!(s.prev_focus(), Focus::Actions(0));
    }

    #[test]
    fn clamp_after_shorter_country() {
        let mut s = state(None).unwrap();
        s.focus = Focus::Digits(7);
        s.session = s.session.select_country(Country::new("Niue", "🇳🇺", "+683", 4));
        s.clamp_focus();
        assert_eq!(s.focus, Focus::Digits(3));
    }
}
