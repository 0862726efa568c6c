use color_eyre::Result;
use ratatui::{
    layout::{Constraint, Rect},
    widgets::{Paragraph, Wrap},
};

use crate::{
    components::Component,
    state::State,
    theme::{Theme, UiGroup},
    tui::Frame,
};

/// The alert line below the digits. Empty while no notice is visible.
pub struct NoticeLine {
    theme: Theme,
}

impl NoticeLine {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }
}

impl Component for NoticeLine {
    fn height_constraint(&self) -> Constraint {
        Constraint::Length(2)
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect, state: &State) -> Result<()> {
        if let Some(notice) = state.session.visible_notice() {
            let para = Paragraph::new(notice.text.as_str())
                .style(self.theme.style(UiGroup::Notice))
                .wrap(Wrap { trim: true });
            f.render_widget(para, area);
        }
        Ok(())
    }
}

/// Debug readout of the reset counter, off unless configured.
pub struct CounterLine {
    theme: Theme,
}

impl CounterLine {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    pub fn text(state: &State) -> String {
        let session = &state.session;
        format!(
            "Reset count: {} (Behavior mode: {})",
            session.reset_counter(),
            session.behavior_mode().index() + 1
        )
    }
}

impl Component for CounterLine {
    fn height_constraint(&self) -> Constraint {
        Constraint::Length(1)
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect, state: &State) -> Result<()> {
        if state.show_counter {
            f.render_widget(
                Paragraph::new(Self::text(state)).style(self.theme.style(UiGroup::Dimmed)),
                area,
            );
        }
        Ok(())
    }
}
