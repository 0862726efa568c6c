use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use dialer::{Digit, FormEvent};
use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    action::Action,
    components::{Component, PopupComponent},
    state::State,
    theme::{Theme, UiGroup},
    tui::{EventResponse, Frame},
};

use super::{centered_rect_fixed, draw_popup_frame, inner_rect};

/// Value list 0-9 for one digit slot.
pub struct DigitPicker {
    theme: Theme,
    index: usize,
    selected: usize,
}

impl DigitPicker {
    pub fn new(theme: Theme, index: usize, state: &State) -> Self {
        let selected = state
            .session
            .digits()
            .get(index)
            .flatten()
            .map(|d| d.value() as usize)
            .unwrap_or(0);
        Self {
            theme,
            index,
            selected,
        }
    }

    /// The slot may have vanished since the picker opened.
    fn choose(&self, digit: Option<Digit>, state: &State) -> Action {
        if self.index >= state.session.digits().len() {
            return Action::ClosePopup;
        }
        match digit {
            Some(value) => Action::Form(FormEvent::SetDigit {
                index: self.index,
                value: Some(value),
            }),
            None => Action::Update,
        }
    }
}

impl Component for DigitPicker {
    fn height_constraint(&self) -> Constraint {
        Constraint::Length(Digit::ALL.len() as u16 + 2)
    }

    fn handle_key_events(
        &mut self,
        key: KeyEvent,
        state: &State,
    ) -> Result<Option<EventResponse<Action>>> {
        let count = Digit::ALL.len();
        let action = match key.code {
            KeyCode::Up => {
                self.selected = (self.selected + count - 1) % count;
                Action::Update
            }
            KeyCode::Down => {
                self.selected = (self.selected + 1) % count;
                Action::Update
            }
            KeyCode::Enter => self.choose(Digit::new(self.selected as u8), state),
            KeyCode::Char(c) if c.is_ascii_digit() => self.choose(Digit::from_char(c), state),
            KeyCode::Esc => Action::ClosePopup,
            _ => return Ok(None),
        };
        Ok(Some(EventResponse::Stop(action)))
    }

    fn update(&mut self, action: Action, _state: &State) -> Result<Option<Action>> {
        match action {
            Action::Form(FormEvent::SetDigit { index, .. }) if index == self.index => {
                Ok(Some(Action::ClosePopup))
            }
            _ => Ok(None),
        }
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect, _state: &State) -> Result<()> {
        let height = Digit::ALL.len() as u16 + 2;
        let dialog = centered_rect_fixed(area, 11, height);
        let _ = draw_popup_frame(f, dialog, format!("#{}", self.index + 1), &self.theme);

        let lines: Vec<Line> = Digit::ALL
            .iter()
            .enumerate()
            .map(|(i, digit)| {
                let text = format!("  {digit}  ");
                if i == self.selected {
                    Line::from(Span::styled(text, self.theme.style(UiGroup::Selected)))
                } else {
                    Line::from(Span::raw(text))
                }
            })
            .collect();
        f.render_widget(Paragraph::new(lines).centered(), inner_rect(dialog));
        Ok(())
    }
}

impl PopupComponent for DigitPicker {}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use dialer::{EmbeddedReference, ReferenceProvider};
    use pretty_assertions::assert_eq;

    fn state() -> State {
        State::new(EmbeddedReference.load().unwrap(), None, false).unwrap()
    }

    fn press(picker: &mut DigitPicker, s: &State, code: KeyCode) -> Option<EventResponse<Action>> {
        picker
            .handle_key_events(KeyEvent::new(code, KeyModifiers::NONE), s)
            .unwrap()
    }

    #[test]
    fn up_wraps_to_nine() {
        let s = state();
        let mut picker = DigitPicker::new(Theme::default(), 2, &s);
        press(&mut picker, &s, KeyCode::Up);
        assert_eq!(
            press(&mut picker, &s, KeyCode::Enter),
            Some(EventResponse::Stop(Action::Form(FormEvent::SetDigit {
                index: 2,
                value: Digit::new(9),
            })))
        );
    }

    #[test]
    fn starts_on_current_value() {
        let mut s = state();
        s.session = s.session.set_digit(1, Digit::new(6));
        let mut picker = DigitPicker::new(Theme::default(), 1, &s);
        press(&mut picker, &s, KeyCode::Down);
        assert_eq!(
            press(&mut picker, &s, KeyCode::Enter),
            Some(EventResponse::Stop(Action::Form(FormEvent::SetDigit {
                index: 1,
                value: Digit::new(7),
            })))
        );
    }

    #[test]
    fn digit_key_picks_directly_and_closes() {
        let s = state();
        let mut picker = DigitPicker::new(Theme::default(), 0, &s);
        let Some(EventResponse::Stop(action)) = press(&mut picker, &s, KeyCode::Char('4')) else {
            panic!("digit key not handled");
        };
        assert_eq!(picker.update(action, &s).unwrap(), Some(Action::ClosePopup));
        assert_eq!(press(&mut picker, &s, KeyCode::Tab), None);
    }

    #[test]
    fn slot_gone_after_country_switch_only_closes() {
        let mut s = state();
        let mut picker = DigitPicker::new(Theme::default(), 7, &s);
        let tuvalu = s.reference.countries.resolve("Tuvalu").unwrap().clone();
        s.session = s.session.select_country(tuvalu);

        assert_eq!(
            press(&mut picker, &s, KeyCode::Enter),
            Some(EventResponse::Stop(Action::ClosePopup))
        );
        assert_eq!(
            press(&mut picker, &s, KeyCode::Char('4')),
            Some(EventResponse::Stop(Action::ClosePopup))
        );
    }
}
