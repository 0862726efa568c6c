use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::{
    action::Action,
    components::{mouse_position, Component},
    state::{Focus, State},
    theme::{Theme, UiGroup},
    tui::{EventResponse, Frame},
};

/// Selector trigger: shows the current country, opens the picker.
pub struct CountryField {
    theme: Theme,
    trigger: Rect,
}

impl CountryField {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            trigger: Rect::default(),
        }
    }
}

impl Component for CountryField {
    fn height_constraint(&self) -> Constraint {
        Constraint::Length(4)
    }

    fn handle_key_events(
        &mut self,
        key: KeyEvent,
        state: &State,
    ) -> Result<Option<EventResponse<Action>>> {
        if state.focus != Focus::Country {
            return Ok(None);
        }
        let action = match key.code {
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Down => Some(Action::OpenCountryPicker),
            _ => None,
        };
        Ok(action.map(EventResponse::Stop))
    }

    fn handle_mouse_events(
        &mut self,
        mouse: MouseEvent,
        _state: &State,
    ) -> Result<Option<EventResponse<Action>>> {
        if mouse.kind == MouseEventKind::Down(MouseButton::Left)
            && self.trigger.contains(mouse_position(&mouse))
        {
            return Ok(Some(EventResponse::Stop(Action::OpenCountryPicker)));
        }
        Ok(None)
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect, state: &State) -> Result<()> {
        let [label_area, trigger] =
            Layout::vertical([Constraint::Length(1), Constraint::Length(3)]).areas(area);
        self.trigger = trigger;

        f.render_widget(
            Paragraph::new("Country").style(self.theme.style(UiGroup::Label)),
            label_area,
        );

        let border = if state.focus == Focus::Country {
            UiGroup::FocusBorder
        } else {
            UiGroup::Border
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.style(border));

        let country = state.session.country();
        let line = Line::from(vec![
            Span::raw(format!("{} ", country.flag)),
            Span::raw(country.name.clone()),
            Span::raw(" "),
            Span::styled(country.calling_code.clone(), self.theme.style(UiGroup::Dimmed)),
        ]);
        let inner = block.inner(trigger);
        f.render_widget(block, trigger);

        let [text, chevron] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(2)]).areas(inner);
        f.render_widget(Paragraph::new(line), text);
        f.render_widget(
            Paragraph::new("⇅").style(self.theme.style(UiGroup::Dimmed)),
            chevron,
        );
        Ok(())
    }
}
