use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use dialer::{Control, ControlLayout, FormEvent, Presentation, Scale};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::{
    action::Action,
    components::{mouse_position, popup::centered_rect_fixed, Component},
    state::{Focus, State},
    theme::{Theme, UiGroup},
    tui::{EventResponse, Frame},
};

/// The Reset/Submit pair inside its hover-sensitive container.
///
/// Widths, order and scale come straight from the session's `Presentation`.
/// Pointer presence over the container is reported as hover enter/leave, and
/// is synced before a click is looked at, so a click that arrives with the
/// pointer lands on the layout the hover produced.
pub struct ActionBar {
    theme: Theme,
    container: Rect,
    buttons: Vec<(Control, Rect)>,
}

fn control_event(control: Control) -> FormEvent {
    match control {
        Control::Reset => FormEvent::Reset,
        Control::Submit => FormEvent::Submit,
    }
}

impl ActionBar {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            container: Rect::default(),
            buttons: Vec::new(),
        }
    }

    fn activate(presentation: &Presentation, control: Control) -> Option<Action> {
        presentation
            .is_actionable(control)
            .then(|| Action::Form(control_event(control)))
    }

    fn button_style(&self, presentation: &Presentation, control: Control, focused: bool) -> Style {
        let group = match control {
            Control::Reset => UiGroup::OutlineButton,
            Control::Submit if presentation.submit_enabled => UiGroup::PrimaryButton,
            Control::Submit => UiGroup::DisabledButton,
        };
        let style = self.theme.style(group);
        if focused {
            style.add_modifier(Modifier::UNDERLINED)
        } else {
            style
        }
    }

    fn button_rect(cell: Rect, layout: ControlLayout) -> Rect {
        match layout.scale {
            Scale::Full => cell,
            Scale::Half => centered_rect_fixed(cell, (cell.width / 2).max(1), 1),
        }
    }
}

impl Component for ActionBar {
    fn height_constraint(&self) -> Constraint {
        Constraint::Length(3)
    }

    fn handle_key_events(
        &mut self,
        key: KeyEvent,
        state: &State,
    ) -> Result<Option<EventResponse<Action>>> {
        let Focus::Actions(pos) = state.focus else {
            return Ok(None);
        };
        let presentation = state.session.presentation();
        let action = match key.code {
            KeyCode::Left | KeyCode::Right => Some(Action::Focus(Focus::Actions(1 - pos.min(1)))),
            KeyCode::Enter | KeyCode::Char(' ') => {
                let control = presentation.order[pos.min(1)];
                Some(Self::activate(&presentation, control).unwrap_or(Action::Update))
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
        let pos = mouse_position(&mouse);
        let inside = self.container.contains(pos);
        if inside != state.session.is_hovering() {
            let event = if inside {
                FormEvent::HoverEnter
            } else {
                FormEvent::HoverLeave
            };
            return Ok(Some(EventResponse::Continue(Action::Form(event))));
        }

        if mouse.kind != MouseEventKind::Down(MouseButton::Left) || !inside {
            return Ok(None);
        }
        let presentation = state.session.presentation();
        let action = self
            .buttons
            .iter()
            .find(|(_, rect)| rect.contains(pos))
            .and_then(|(control, _)| Self::activate(&presentation, *control));
        Ok(Some(EventResponse::Stop(action.unwrap_or(Action::Update))))
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect, state: &State) -> Result<()> {
        self.container = area;
        self.buttons.clear();

        let presentation = state.session.presentation();
        let controls = presentation.controls();
        let cells = Layout::horizontal(
            controls.map(|(_, layout)| Constraint::Percentage(layout.width_percent)),
        )
        .split(area);

        let drawn = controls.into_iter().zip(cells.iter()).enumerate();
        for (index, ((control, layout), cell)) in drawn {
            if !layout.visible || cell.width == 0 {
                continue;
            }
            let focused = state.focus == Focus::Actions(index);
            let rect = Self::button_rect(*cell, layout);
            let style = self.button_style(&presentation, control, focused);
            let label = control.to_string();

            let widget = match layout.scale {
                Scale::Full => {
                    let border = if focused {
                        UiGroup::FocusBorder
                    } else {
                        UiGroup::Border
                    };
                    Paragraph::new(label).block(
                        Block::default()
                            .borders(Borders::ALL)
                            .border_type(BorderType::Rounded)
                            .border_style(self.theme.style(border)),
                    )
                }
                Scale::Half => Paragraph::new(format!("[{label}]")),
            };
            f.render_widget(widget.alignment(Alignment::Center).style(style), rect);
            self.buttons.push((control, rect));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use dialer::{Digit, EmbeddedReference, ReferenceProvider};
    use pretty_assertions::assert_eq;
    use ratatui::{backend::TestBackend, Terminal};

    fn complete_state() -> State {
        let mut state = State::new(EmbeddedReference.load().unwrap(), None, false).unwrap();
        for i in 0..state.session.digits().len() {
            state.session = state.session.set_digit(i, Digit::new(5));
        }
        state
    }

    fn render(bar: &mut ActionBar, state: &State) {
        let mut terminal = Terminal::new(TestBackend::new(40, 3)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                bar.draw(f, area, state).unwrap();
            })
            .unwrap();
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn split_layout_draws_both_controls() {
        let state = complete_state();
        let mut bar = ActionBar::new(Theme::default());
        render(&mut bar, &state);
        let rects: Vec<_> = bar.buttons.iter().map(|(c, r)| (*c, r.width)).collect();
        assert_eq!(rects, [(Control::Reset, 20), (Control::Submit, 20)]);
    }

    #[test]
    fn collapsed_submit_is_not_drawn() {
        let mut state = complete_state();
        state.session = state.session.hover_enter();
        let mut bar = ActionBar::new(Theme::default());
        render(&mut bar, &state);
        assert_eq!(bar.buttons.len(), 1);
        assert_eq!(bar.buttons[0].0, Control::Reset);
        assert_eq!(bar.buttons[0].1.width, 40);
    }

    #[test]
    fn pointer_entering_reports_hover_before_click() {
        let state = complete_state();
        let mut bar = ActionBar::new(Theme::default());
        render(&mut bar, &state);

        let click = mouse(MouseEventKind::Down(MouseButton::Left), 30, 1);
        let response = bar.handle_mouse_events(click, &state).unwrap();
        assert_eq!(
            response,
            Some(EventResponse::Continue(Action::Form(FormEvent::HoverEnter)))
        );

        let outside = mouse(MouseEventKind::Moved, 10, 10);
        assert_eq!(bar.handle_mouse_events(outside, &state).unwrap(), None);
    }

    #[test]
    fn click_lands_on_hover_layout() {
        let mut state = complete_state();
        state.session = state.session.hover_enter();
        let mut bar = ActionBar::new(Theme::default());
        render(&mut bar, &state);

        // right half would have been Submit before the collapse
        let click = mouse(MouseEventKind::Down(MouseButton::Left), 30, 1);
        assert_eq!(
            bar.handle_mouse_events(click, &state).unwrap(),
            Some(EventResponse::Stop(Action::Form(FormEvent::Reset)))
        );
    }

    #[test]
    fn swapped_pair_puts_submit_on_the_left() {
        let mut state = State::new(EmbeddedReference.load().unwrap(), None, false).unwrap();
        let mut indices = dialer::ScriptedIndices::default();
        state.session = dialer::submission::reset(
            &state.session,
            &state.reference.messages,
            &mut indices,
        );
        for i in 0..state.session.digits().len() {
            state.session = state.session.set_digit(i, Digit::new(1));
        }
        state.session = state.session.hover_enter();
        assert!(state.session.is_swapped());

        let mut bar = ActionBar::new(Theme::default());
        render(&mut bar, &state);
        let click = mouse(MouseEventKind::Down(MouseButton::Left), 5, 1);
        assert_eq!(
            bar.handle_mouse_events(click, &state).unwrap(),
            Some(EventResponse::Stop(Action::Form(FormEvent::Submit)))
        );
    }

    #[test]
    fn disabled_submit_ignores_keyboard() {
        let mut state = State::new(EmbeddedReference.load().unwrap(), None, false).unwrap();
        state.focus = Focus::Actions(1);
        let mut bar = ActionBar::new(Theme::default());
        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(
            bar.handle_key_events(enter, &state).unwrap(),
            Some(EventResponse::Stop(Action::Update))
        );

        state.focus = Focus::Actions(0);
        assert_eq!(
            bar.handle_key_events(enter, &state).unwrap(),
            Some(EventResponse::Stop(Action::Form(FormEvent::Reset)))
        );
    }
}
