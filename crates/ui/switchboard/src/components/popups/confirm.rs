use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use dialer::FormEvent;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Paragraph, Wrap},
};

use crate::{
    action::Action,
    components::{mouse_position, Component, PopupComponent},
    state::State,
    theme::{Theme, UiGroup},
    tui::{EventResponse, Frame},
};

use super::{centered_rect_fixed, draw_popup_frame, inner_rect};

pub const TITLE: &str = "Confirm Submission?";
pub const DESCRIPTION: &str = "You are about to submit this phone number. This action may or may \
not be reversible, depending on factors beyond human comprehension.";
pub const BODY: &str = "By proceeding, you acknowledge that this phone number might be used for \
purposes that may or may not include contacting you at inconvenient times.";
pub const CANCEL_LABEL: &str = "Maybe";
pub const CONFIRM_LABEL: &str = "Proceed (But Maybe Don't)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    Cancel,
    Confirm,
}

/// The submission dialog. Both buttons are answers to the form, never a
/// plain close: the app closes it when the reducer says so.
///
/// - Left/Right or Tab/BackTab: switch selected button
/// - Enter: answer with the selected button
/// - Esc: counts as "Maybe"
pub struct ConfirmPopup {
    theme: Theme,
    selected: Choice,
    buttons: Vec<(Choice, Rect)>,
    min_width: u16,
    min_height: u16,
}

impl ConfirmPopup {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            selected: Choice::Confirm,
            buttons: Vec::new(),
            min_width: 72,
            min_height: 14,
        }
    }

    fn answer(choice: Choice) -> Action {
        match choice {
            Choice::Confirm => Action::Form(FormEvent::Confirm),
            Choice::Cancel => Action::Form(FormEvent::Cancel),
        }
    }

    fn toggle_selection(&mut self) {
        self.selected = match self.selected {
            Choice::Confirm => Choice::Cancel,
            Choice::Cancel => Choice::Confirm,
        };
    }

    fn label(choice: Choice) -> &'static str {
        match choice {
            Choice::Cancel => CANCEL_LABEL,
            Choice::Confirm => CONFIRM_LABEL,
        }
    }
}

impl Component for ConfirmPopup {
    fn height_constraint(&self) -> Constraint {
        Constraint::Min(self.min_height)
    }

    fn handle_key_events(
        &mut self,
        key: KeyEvent,
        _state: &State,
    ) -> Result<Option<EventResponse<Action>>> {
        let action = match key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab => {
                self.toggle_selection();
                Some(Action::Update)
            }
            KeyCode::Enter => Some(Self::answer(self.selected)),
            KeyCode::Esc => Some(Self::answer(Choice::Cancel)),
            _ => None,
        };
        Ok(action.map(EventResponse::Stop))
    }

    fn handle_mouse_events(
        &mut self,
        mouse: MouseEvent,
        _state: &State,
    ) -> Result<Option<EventResponse<Action>>> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Ok(None);
        }
        let pos = mouse_position(&mouse);
        Ok(self
            .buttons
            .iter()
            .find(|(_, rect)| rect.contains(pos))
            .map(|(choice, _)| EventResponse::Stop(Self::answer(*choice))))
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect, _state: &State) -> Result<()> {
        self.buttons.clear();
        if area.width < 5 || area.height < 5 {
            return Ok(());
        }

        let dialog = centered_rect_fixed(area, self.min_width, self.min_height);
        let _ = draw_popup_frame(f, dialog, TITLE, &self.theme);
        let [text_area, button_row, _, hint_row] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner_rect(dialog));

        let lines = vec![
            Line::from(Span::raw(DESCRIPTION)),
            Line::raw(""),
            Line::from(Span::styled(BODY, self.theme.style(UiGroup::Dimmed))),
        ];
        let para = Paragraph::new(Text::from(lines)).wrap(Wrap { trim: true });
        f.render_widget(para, text_area);

        // Buttons row (centered), Maybe first like the dialog footer
        let selected = self.theme.style(UiGroup::Selected);
        let unselected = self.theme.style(UiGroup::OutlineButton);
        let spacing = 3u16;
        let choices = [Choice::Cancel, Choice::Confirm];
        let widths = choices.map(|c| Self::label(c).chars().count() as u16 + 4);
        let total = widths[0] + spacing + widths[1];
        let mut x = button_row.x + button_row.width.saturating_sub(total) / 2;
        for (choice, width) in choices.into_iter().zip(widths) {
            let rect = Rect::new(x, button_row.y, width, 1).intersection(button_row);
            let style = if self.selected == choice {
                selected
            } else {
                unselected
            };
            f.render_widget(
                Paragraph::new(format!("[ {} ]", Self::label(choice))).style(style),
                rect,
            );
            self.buttons.push((choice, rect));
            x = x.saturating_add(width + spacing);
        }

        let key = self.theme.style(UiGroup::Label);
        let hints = Line::from(vec![
            Span::styled("←/→/Tab", key),
            Span::raw(": Select   "),
            Span::styled("Enter", key),
            Span::raw(": Answer   "),
            Span::styled("Esc", key),
            Span::raw(": Maybe"),
        ])
        .style(self.theme.style(UiGroup::Dimmed));
        f.render_widget(Paragraph::new(hints), hint_row);

        Ok(())
    }
}

impl PopupComponent for ConfirmPopup {
    fn submit_action(&mut self) -> Option<Action> {
        Some(Self::answer(self.selected))
    }

    fn cancel_action(&mut self) -> Option<Action> {
        Some(Self::answer(Choice::Cancel))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use dialer::{EmbeddedReference, ReferenceProvider};
    use pretty_assertions::assert_eq;
    use ratatui::{backend::TestBackend, Terminal};

    fn state() -> State {
        State::new(EmbeddedReference.load().unwrap(), None, false).unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn stop(action: Action) -> Option<EventResponse<Action>> {
        Some(EventResponse::Stop(action))
    }

    #[test]
    fn enter_answers_with_selection() {
        let s = state();
        let mut popup = ConfirmPopup::new(Theme::default());
        assert_eq!(
            popup.handle_key_events(key(KeyCode::Enter), &s).unwrap(),
            stop(Action::Form(FormEvent::Confirm))
        );
        popup.handle_key_events(key(KeyCode::Left), &s).unwrap();
        assert_eq!(
            popup.handle_key_events(key(KeyCode::Enter), &s).unwrap(),
            stop(Action::Form(FormEvent::Cancel))
        );
    }

    #[test]
    fn esc_means_maybe() {
        let s = state();
        let mut popup = ConfirmPopup::new(Theme::default());
        assert_eq!(
            popup.handle_key_events(key(KeyCode::Esc), &s).unwrap(),
            stop(Action::Form(FormEvent::Cancel))
        );
        assert_eq!(popup.cancel_action(), Some(Action::Form(FormEvent::Cancel)));
    }

    #[test]
    fn renders_title_and_both_buttons() {
        let s = state();
        let mut popup = ConfirmPopup::new(Theme::default());
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                popup.draw(f, area, &s).unwrap();
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let screen: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(screen.contains(TITLE));
        assert!(screen.contains("[ Maybe ]"));
        assert!(screen.contains("[ Proceed (But Maybe Don't) ]"));
        assert_eq!(popup.buttons.len(), 2);
    }
}
