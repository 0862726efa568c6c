use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use dialer::{Country, CountryGroup, FormEvent};
use ratatui::{
    layout::{Constraint, Layout, Position, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use tui_input::{Input, InputRequest};

use crate::{
    action::Action,
    components::{Component, PopupComponent},
    state::State,
    theme::{Theme, UiGroup},
    tui::{Event, EventResponse, Frame},
};

use super::{centered_rect_fixed, draw_popup_frame, inner_rect};

pub const EMPTY_TEXT: &str = "No country found.";

/// Searchable, grouped country list.
///
/// - Typing or pasting edits the filter; the selection jumps back to the first match
/// - Up/Down: move selection
/// - Enter: pick the country (nothing happens on an empty result)
/// - Esc: close without changes
pub struct CountryPicker {
    theme: Theme,
    input: Input,
    selected: usize,
    scroll: usize,
    min_width: u16,
    min_height: u16,
}

enum Row<'a> {
    Heading(CountryGroup),
    Entry(usize, &'a Country),
}

impl CountryPicker {
    /// Opens with the current country under the cursor.
    pub fn new(theme: Theme, state: &State) -> Self {
        let current = &state.session.country().name;
        let selected = state
            .reference
            .countries
            .iter()
            .position(|(_, c)| &c.name == current)
            .unwrap_or(0);
        Self {
            theme,
            input: Input::default(),
            selected,
            scroll: 0,
            min_width: 52,
            min_height: 20,
        }
    }

    #[cfg(test)]
    pub fn query(&self) -> &str {
        self.input.value()
    }

    fn matches<'a>(&self, state: &'a State) -> Vec<(CountryGroup, &'a Country)> {
        state.reference.countries.filter(self.input.value())
    }

    fn edit(&mut self, key: KeyEvent) -> bool {
        let request = match key.code {
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                InputRequest::DeleteLine
            }
            KeyCode::Char(c) => InputRequest::InsertChar(c),
            KeyCode::Backspace => InputRequest::DeletePrevChar,
            KeyCode::Delete => InputRequest::DeleteNextChar,
            KeyCode::Left => InputRequest::GoToPrevChar,
            KeyCode::Right => InputRequest::GoToNextChar,
            KeyCode::Home => InputRequest::GoToStart,
            KeyCode::End => InputRequest::GoToEnd,
            _ => return false,
        };
        self.input.handle(request);
        true
    }

    /// Pasted text lands in the filter as one line.
    fn paste(&mut self, text: &str) {
        for c in text.chars().filter(|c| !c.is_control()) {
            self.input.handle(InputRequest::InsertChar(c));
        }
        self.selected = 0;
        self.scroll = 0;
    }

    fn rows<'a>(matches: &[(CountryGroup, &'a Country)]) -> Vec<Row<'a>> {
        let mut rows = Vec::new();
        let mut last = None;
        for (i, (group, country)) in matches.iter().enumerate() {
            if last != Some(*group) {
                rows.push(Row::Heading(*group));
                last = Some(*group);
            }
            rows.push(Row::Entry(i, country));
        }
        rows
    }

    fn ensure_visible(&mut self, selected_row: usize, visible: usize) {
        let visible = visible.max(1);
        if selected_row < self.scroll {
            // Überschrift der ersten Gruppe mitnehmen
            self.scroll = selected_row.saturating_sub(1);
        } else if selected_row >= self.scroll + visible {
            self.scroll = selected_row + 1 - visible;
        }
    }
}

impl Component for CountryPicker {
    fn height_constraint(&self) -> Constraint {
        Constraint::Min(self.min_height)
    }

    fn handle_events(&mut self, event: Event, state: &State) -> Result<Option<EventResponse<Action>>> {
        match event {
            Event::Paste(text) => {
                self.paste(&text);
                Ok(Some(EventResponse::Stop(Action::Update)))
            }
            Event::Key(key) => self.handle_key_events(key, state),
            _ => Ok(None),
        }
    }

    fn handle_key_events(
        &mut self,
        key: KeyEvent,
        state: &State,
    ) -> Result<Option<EventResponse<Action>>> {
        let matches = self.matches(state);
        let action = match key.code {
            KeyCode::Up => {
                if !matches.is_empty() {
                    self.selected = self.selected.checked_sub(1).unwrap_or(matches.len() - 1);
                }
                Action::Update
            }
            KeyCode::Down => {
                if !matches.is_empty() {
                    self.selected = (self.selected + 1) % matches.len();
                }
                Action::Update
            }
            KeyCode::Enter => match matches.get(self.selected) {
                Some((_, country)) => Action::Form(FormEvent::SelectCountry((*country).clone())),
                None => Action::Update,
            },
            KeyCode::Esc => Action::ClosePopup,
            _ => {
                if self.edit(key) {
                    self.selected = 0;
                    self.scroll = 0;
                }
                Action::Update
            }
        };
        // Der Filter schluckt jede Taste
        Ok(Some(EventResponse::Stop(action)))
    }

    fn update(&mut self, action: Action, _state: &State) -> Result<Option<Action>> {
        match action {
            Action::Form(FormEvent::SelectCountry(_)) => Ok(Some(Action::ClosePopup)),
            _ => Ok(None),
        }
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect, state: &State) -> Result<()> {
        if area.width < 5 || area.height < 5 {
            return Ok(());
        }

        let dialog = centered_rect_fixed(area, self.min_width, self.min_height);
        let _ = draw_popup_frame(f, dialog, "Country", &self.theme);
        let [input_area, list_area, hint_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(inner_rect(dialog));

        // Filter input
        let input_block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.style(UiGroup::Border));
        let input_inner = input_block.inner(input_area);
        f.render_widget(input_block, input_area);
        let value = if self.input.value().is_empty() {
            Paragraph::new("Search country...").style(self.theme.style(UiGroup::Dimmed))
        } else {
            Paragraph::new(self.input.value())
        };
        f.render_widget(value, input_inner);
        let cursor = (self.input.visual_cursor() as u16).min(input_inner.width.saturating_sub(1));
        f.set_cursor_position(Position::new(input_inner.x + cursor, input_inner.y));

        // List
        let matches = self.matches(state);
        if matches.is_empty() {
            f.render_widget(
                Paragraph::new(EMPTY_TEXT)
                    .style(self.theme.style(UiGroup::Dimmed))
                    .centered(),
                list_area,
            );
        } else {
            self.selected = self.selected.min(matches.len() - 1);
            let rows = Self::rows(&matches);
            let selected_row = rows
                .iter()
                .position(|r| matches!(r, Row::Entry(i, _) if *i == self.selected))
                .unwrap_or(0);
            self.ensure_visible(selected_row, list_area.height as usize);

            let current = &state.session.country().name;
            let lines: Vec<Line> = rows
                .iter()
                .skip(self.scroll)
                .take(list_area.height as usize)
                .map(|row| match row {
                    Row::Heading(group) => Line::from(Span::styled(
                        group.to_string(),
                        self.theme.style(UiGroup::Label),
                    )),
                    Row::Entry(i, country) => {
                        let check = if &country.name == current { "✓ " } else { "  " };
                        let body = format!("{} {} ", country.flag, country.name);
                        let line = Line::from(vec![
                            Span::styled(check, self.theme.style(UiGroup::Check)),
                            Span::raw(body),
                            Span::styled(
                                country.calling_code.clone(),
                                self.theme.style(UiGroup::Dimmed),
                            ),
                        ]);
                        if *i == self.selected {
                            line.style(self.theme.style(UiGroup::Selected))
                        } else {
                            line
                        }
                    }
                })
                .collect();
            f.render_widget(Paragraph::new(lines), list_area);
        }

        let key = self.theme.style(UiGroup::Label);
        let hints = Line::from(vec![
            Span::styled("Up/Down", key),
            Span::raw(": Select   "),
            Span::styled("Enter", key),
            Span::raw(": Choose   "),
            Span::styled("Esc", key),
            Span::raw(": Cancel"),
        ])
        .style(self.theme.style(UiGroup::Dimmed));
        f.render_widget(Paragraph::new(hints), hint_area);

        Ok(())
    }
}

impl PopupComponent for CountryPicker {}
