use color_eyre::Result;
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::layout::{Constraint, Rect};

use crate::{
    action::Action,
    state::State,
    tui::{Event, EventResponse, Frame},
};

pub mod action_bar;
pub mod country_field;
pub mod digit_row;
pub mod notice;
pub mod popup;
pub mod popups;

pub use popup::PopupComponent;

/// `Component` is a trait that represents a visual and interactive element of the user interface.
///
/// Components never mutate the form themselves: they read `State` and answer
/// with an `Action`, which the app turns into a reducer step.
pub trait Component {
    fn height_constraint(&self) -> Constraint;

    fn handle_events(&mut self, event: Event, state: &State) -> Result<Option<EventResponse<Action>>> {
        let r = match event {
            Event::Key(key_event) => self.handle_key_events(key_event, state)?,
            Event::Mouse(mouse_event) => self.handle_mouse_events(mouse_event, state)?,
            _ => None,
        };
        Ok(r)
    }

    fn handle_key_events(
        &mut self,
        _key: KeyEvent,
        _state: &State,
    ) -> Result<Option<EventResponse<Action>>> {
        Ok(None)
    }

    fn handle_mouse_events(
        &mut self,
        _mouse: MouseEvent,
        _state: &State,
    ) -> Result<Option<EventResponse<Action>>> {
        Ok(None)
    }

    fn update(&mut self, _action: Action, _state: &State) -> Result<Option<Action>> {
        Ok(None)
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect, state: &State) -> Result<()>;
}

/// Cell under the pointer of a mouse event.
pub(crate) fn mouse_position(mouse: &MouseEvent) -> ratatui::layout::Position {
    ratatui::layout::Position::new(mouse.column, mouse.row)
}
