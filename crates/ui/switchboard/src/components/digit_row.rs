use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use dialer::{Digit, FormEvent, EMPTY_SLOT};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::{
    action::Action,
    components::{mouse_position, Component},
    state::{Focus, State},
    theme::{Theme, UiGroup},
    tui::{EventResponse, Frame},
};

const SLOT_WIDTH: u16 = 3;

/// Calling-code prefix followed by one selector per digit.
pub struct DigitRow {
    theme: Theme,
    slots: Vec<Rect>,
}

impl DigitRow {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            slots: Vec::new(),
        }
    }
}

impl Component for DigitRow {
    fn height_constraint(&self) -> Constraint {
        Constraint::Length(4)
    }

    fn handle_key_events(
        &mut self,
        key: KeyEvent,
        state: &State,
    ) -> Result<Option<EventResponse<Action>>> {
        let Focus::Digits(index) = state.focus else {
            return Ok(None);
        };
        let last = state.session.digits().len().saturating_sub(1);
        let action = match key.code {
            KeyCode::Left => Some(Action::Focus(Focus::Digits(index.saturating_sub(1)))),
            KeyCode::Right => Some(Action::Focus(Focus::Digits((index + 1).min(last)))),
            KeyCode::Char(c) if c.is_ascii_digit() => Some(Action::Form(FormEvent::SetDigit {
                index,
                value: Digit::from_char(c),
            })),
            KeyCode::Backspace | KeyCode::Delete => Some(Action::Form(FormEvent::SetDigit {
                index,
                value: None,
            })),
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Down => {
                Some(Action::OpenDigitPicker(index))
            }
            _ => None,
        };
        Ok(action.map(EventResponse::Stop))
    }

    fn handle_mouse_events(
        &mut self,
        mouse: MouseEvent,
        state: &State,
    ) -> Result<Option<EventResponse<Action>>> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Ok(None);
        }
        let pos = mouse_position(&mouse);
        // Rects stammen vom letzten Frame, die Länge kann sich seitdem geändert haben
        let len = state.session.digits().len();
        Ok(self
            .slots
            .iter()
            .take(len)
            .position(|slot| slot.contains(pos))
            .map(|index| EventResponse::Stop(Action::OpenDigitPicker(index))))
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect, state: &State) -> Result<()> {
        let [label_area, row] =
            Layout::vertical([Constraint::Length(1), Constraint::Length(3)]).areas(area);
        f.render_widget(
            Paragraph::new("Phone Number").style(self.theme.style(UiGroup::Label)),
            label_area,
        );

        let code = &state.session.country().calling_code;
        let digits = state.session.digits();
        let mut constraints = vec![Constraint::Length(code.chars().count() as u16 + 2)];
        constraints.extend(std::iter::repeat(Constraint::Length(SLOT_WIDTH)).take(digits.len()));
        constraints.push(Constraint::Fill(1));
        let cells = Layout::horizontal(constraints).spacing(1).split(row);

        f.render_widget(
            Paragraph::new(code.as_str())
                .alignment(Alignment::Center)
                .style(self.theme.style(UiGroup::Prefix))
                .block(Block::default().borders(Borders::TOP | Borders::BOTTOM).border_style(
                    self.theme.style(UiGroup::Border),
                )),
            cells[0],
        );

        self.slots = cells[1..=digits.len()].to_vec();
        for (index, (slot, value)) in self.slots.iter().zip(digits.slots()).enumerate() {
            let focused = state.focus == Focus::Digits(index);
            let border = if focused {
                UiGroup::FocusBorder
            } else {
                UiGroup::Border
            };
            let (text, style) = match value {
                Some(d) => (d.as_char(), self.theme.style(UiGroup::Title)),
                None => (EMPTY_SLOT, self.theme.style(UiGroup::Dimmed)),
            };
            let widget = Paragraph::new(text.to_string())
                .alignment(Alignment::Center)
                .style(style)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .border_style(self.theme.style(border)),
                );
            f.render_widget(widget, *slot);
        }
        Ok(())
    }
}
