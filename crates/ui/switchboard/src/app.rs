use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use dialer::{
    reduce, Effect, FormContext, FormEvent, IndexSource, ReferenceData, RngIndexSource, Transition,
};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    widgets::{Block, BorderType, Borders, Padding},
};
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::{
    action::Action,
    components::{
        action_bar::ActionBar,
        country_field::CountryField,
        digit_row::DigitRow,
        notice::{CounterLine, NoticeLine},
        popups::{render_backdrop, ConfirmPopup, CountryPicker, DigitPicker},
        Component, PopupComponent,
    },
    config::Config,
    state::{Focus, State},
    theme::{Theme, UiGroup},
    tui::{Event, EventResponse, Frame, Tui},
};

pub const TITLE: &str = "Phone Number Input";
const FORM_WIDTH: u16 = 64;

pub struct App {
    pub config: Config,
    pub state: State,
    pub theme: Theme,
    pub components: Vec<Box<dyn Component>>,
    pub popup: Option<Box<dyn PopupComponent>>,
    pub should_quit: bool,
    pub should_suspend: bool,
    indices: Box<dyn IndexSource>,
}

impl App {
    pub fn new(config: Config, reference: ReferenceData) -> Result<Self> {
        let indices: Box<dyn IndexSource> = match config.form.seed {
            Some(seed) => {
                info!(seed, "using seeded message picker");
                Box::new(RngIndexSource::seeded(seed))
            }
            None => Box::new(RngIndexSource::thread()),
        };
        Self::with_indices(config, reference, indices)
    }

    pub fn with_indices(
        config: Config,
        reference: ReferenceData,
        indices: Box<dyn IndexSource>,
    ) -> Result<Self> {
        let state = State::new(
            reference,
            config.form.default_country.as_deref(),
            config.form.show_counter,
        )?;
        let theme = Theme::from_env();
        let components: Vec<Box<dyn Component>> = vec![
            Box::new(CountryField::new(theme.clone())),
            Box::new(DigitRow::new(theme.clone())),
            Box::new(NoticeLine::new(theme.clone())),
            Box::new(ActionBar::new(theme.clone())),
            Box::new(CounterLine::new(theme.clone())),
        ];
        Ok(Self {
            config,
            state,
            theme,
            components,
            popup: None,
            should_quit: false,
            should_suspend: false,
            indices,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

        let mut tui = self.tui()?;
        tui.enter()?;
        info!(
            country = %self.state.session.country().name,
            mouse = self.config.form.mouse,
            "form mounted"
        );

        loop {
            if let Some(e) = tui.next_event().await {
                for action in self.handle_event(e)? {
                    action_tx.send(action)?;
                }
            }

            while let Ok(action) = action_rx.try_recv() {
                if action != Action::Tick && action != Action::Render {
                    debug!("{action:?}");
                }
                match action {
                    Action::Render => self.draw(&mut tui, &action_tx)?,
                    Action::Resize(w, h) => {
                        tui.resize(Rect::new(0, 0, w, h))?;
                        self.draw(&mut tui, &action_tx)?;
                    }
                    Action::ClearScreen => tui.terminal.clear()?,
                    action => {
                        for next in self.update(action)? {
                            action_tx.send(next)?;
                        }
                    }
                }
            }

            if self.should_suspend {
                // kehrt erst nach SIGCONT zurück
                tui.suspend()?;
                tui.resume()?;
                action_tx.send(Action::Resume)?;
                action_tx.send(Action::ClearScreen)?;
            } else if self.should_quit {
                tui.stop()?;
                break;
            }
        }
        tui.exit()?;
        info!(
            reset_counter = self.state.session.reset_counter(),
            "form unmounted"
        );
        Ok(())
    }

    fn tui(&self) -> Result<Tui> {
        Ok(Tui::new()?
            .tick_rate(self.config.form.tick_rate)
            .frame_rate(self.config.form.frame_rate)
            .mouse(self.config.form.mouse)
            .paste(true))
    }

    fn draw(&mut self, tui: &mut Tui, action_tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        let mut outcome = Ok(());
        tui.draw(|f| outcome = self.render(f))?;
        if let Err(err) = outcome {
            action_tx.send(Action::Error(format!("Failed to draw: {err:?}")))?;
        }
        Ok(())
    }

    /// Route one terminal event. The open popup sees it first; a modal popup
    /// keeps it from the form.
    pub fn handle_event(&mut self, event: Event) -> Result<Vec<Action>> {
        let mut actions = Vec::new();
        match &event {
            Event::Tick => return Ok(vec![Action::Tick]),
            Event::Render => return Ok(vec![Action::Render]),
            Event::Resize(w, h) => return Ok(vec![Action::Resize(*w, *h)]),
            Event::Quit => return Ok(vec![Action::Quit]),
            Event::Key(key) if is_ctrl(key, 'c') => return Ok(vec![Action::Quit]),
            _ => {}
        }

        let mut stop = false;
        if let Some(popup) = self.popup.as_mut() {
            match popup.handle_events(event.clone(), &self.state)? {
                Some(EventResponse::Continue(action)) => actions.push(action),
                Some(EventResponse::Stop(action)) => {
                    actions.push(action);
                    stop = true;
                }
                None => {
                    let fallback = match &event {
                        Event::Key(key) if key.code == KeyCode::Enter => popup.submit_action(),
                        Event::Key(key) if key.code == KeyCode::Esc => popup.cancel_action(),
                        _ => None,
                    };
                    if let Some(action) = fallback {
                        actions.push(action);
                        stop = true;
                    }
                }
            }
            stop = stop || (popup.is_modal() && !matches!(event, Event::Key(_)));
        }

        if !stop && self.popup.is_none() {
            // von unten nach oben, damit die Button-Leiste jede Mausbewegung sieht
            for component in self.components.iter_mut().rev() {
                match component.handle_events(event.clone(), &self.state)? {
                    Some(EventResponse::Continue(action)) => actions.push(action),
                    Some(EventResponse::Stop(action)) => {
                        actions.push(action);
                        stop = true;
                        break;
                    }
                    None => {}
                }
            }
        }

        if !stop {
            if let Event::Key(key) = event {
                actions.extend(self.global_key(key));
            }
        }
        Ok(actions)
    }

    fn global_key(&self, key: KeyEvent) -> Option<Action> {
        let with_popup = self.popup.is_some();
        match key.code {
            KeyCode::Char('q') => Some(Action::Quit),
            _ if with_popup => None,
            KeyCode::Char('z') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::Suspend)
            }
            KeyCode::Tab => Some(Action::FocusNext),
            KeyCode::BackTab => Some(Action::FocusPrev),
            _ => None,
        }
    }

    /// Apply one action. Returns follow-up actions for the queue.
    pub fn update(&mut self, action: Action) -> Result<Vec<Action>> {
        let mut follow_up = Vec::new();
        match &action {
            Action::Quit => self.should_quit = true,
            Action::Suspend => self.should_suspend = true,
            Action::Resume => self.should_suspend = false,
            Action::Error(msg) => error!("{msg}"),
            Action::FocusNext if self.popup.is_none() => self.state.focus = self.state.next_focus(),
            Action::FocusPrev if self.popup.is_none() => self.state.focus = self.state.prev_focus(),
            Action::Focus(focus) if self.popup.is_none() => {
                self.state.focus = *focus;
                self.state.clamp_focus();
            }
            Action::Form(event) => self.dispatch(event.clone()),
            Action::OpenCountryPicker if self.popup.is_none() => {
                self.state.focus = Focus::Country;
                self.popup = Some(Box::new(CountryPicker::new(self.theme.clone(), &self.state)));
            }
            Action::OpenDigitPicker(index) if *index >= self.state.session.digits().len() => {
                debug!(index, "no such digit slot, picker not opened");
            }
            Action::OpenDigitPicker(index) if self.popup.is_none() => {
                self.state.focus = Focus::Digits(*index);
                let picker = DigitPicker::new(self.theme.clone(), *index, &self.state);
                self.popup = Some(Box::new(picker));
            }
            Action::ClosePopup => {
                // Der Bestätigungsdialog schließt nur über den Reducer
                if !self.state.session.dialog_open() {
                    self.popup = None;
                }
            }
            _ => {}
        }

        if let Some(popup) = self.popup.as_mut() {
            if let Some(next) = popup.update(action, &self.state)? {
                follow_up.push(next);
            }
        }
        Ok(follow_up)
    }

    /// One reducer step, then the effects on the modal control.
    fn dispatch(&mut self, event: FormEvent) {
        let typed = match event {
            FormEvent::SetDigit {
                index,
                value: Some(_),
            } => Some(index),
            _ => None,
        };

        let mut ctx = FormContext::new(&self.state.reference.messages, self.indices.as_mut());
        let Transition { state, effects } = reduce(&self.state.session, event, &mut ctx);
        self.state.session = state;

        for effect in effects {
            debug!(?effect, "modal effect");
            match effect {
                Effect::OpenConfirmation => {
                    self.popup = Some(Box::new(ConfirmPopup::new(self.theme.clone())))
                }
                Effect::CloseConfirmation => self.popup = None,
            }
        }

        // nach einer Eingabe zum nächsten Feld springen
        if let (Some(index), Focus::Digits(current)) = (typed, self.state.focus) {
            if index == current && self.popup.is_none() {
                self.state.focus = Focus::Digits(index + 1);
            }
        }
        self.state.clamp_focus();
    }

    fn render(&mut self, frame: &mut Frame<'_>) -> Result<()> {
        let area = frame.area();
        let width = FORM_WIDTH.min(area.width);
        let column = Rect {
            x: area.x + (area.width - width) / 2,
            width,
            ..area
        };

        let block = Block::default()
            .title(format!(" {TITLE} "))
            .title_alignment(Alignment::Center)
            .title_style(self.theme.style(UiGroup::Title))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.style(UiGroup::Border))
            .padding(Padding::horizontal(1));
        let inner = block.inner(column);
        frame.render_widget(block, column);

        let constraints: Vec<Constraint> = self
            .components
            .iter()
            .map(|c| c.height_constraint())
            .chain([Constraint::Fill(1)])
            .collect();
        let rows = Layout::vertical(constraints).spacing(1).split(inner);
        for (component, row) in self.components.iter_mut().zip(rows.iter()) {
            component.draw(frame, *row, &self.state)?;
        }

        if let Some(popup) = self.popup.as_mut() {
            if self.state.session.dialog_open() {
                render_backdrop(frame, area, &self.theme);
            }
            popup.draw(frame, area, &self.state)?;
        }
        Ok(())
    }
}

fn is_ctrl(key: &KeyEvent, c: char) -> bool {
    key.code == KeyCode::Char(c) && key.modifiers.contains(KeyModifiers::CONTROL)
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
    use dialer::{
        BehaviorMode, EmbeddedReference, Pool, ReferenceProvider, ScriptedIndices, CANCEL_NOTICE,
    };
    use pretty_assertions::assert_eq;
    use ratatui::{backend::TestBackend, Terminal};

    fn app(script: &[usize]) -> App {
        let reference = EmbeddedReference.load().unwrap();
        let indices = Box::new(ScriptedIndices::new(script.to_vec()));
        App::with_indices(Config::default(), reference, indices).unwrap()
    }

    /// Deliver an event and drain the action queue, like the run loop does.
    fn send(app: &mut App, event: Event) {
        let mut queue: VecDeque<Action> = app.handle_event(event).unwrap().into();
        while let Some(action) = queue.pop_front() {
            queue.extend(app.update(action).unwrap());
        }
    }

    fn key(app: &mut App, code: KeyCode) {
        send(app, Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    fn type_number(app: &mut App) {
        app.state.focus = Focus::Digits(0);
        for _ in 0..app.state.session.digits().len() {
            key(app, KeyCode::Char('3'));
        }
    }

    fn screen(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|f| app.render(f).unwrap()).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn typing_digits_advances_the_cursor() {
        let mut app = app(&[]);
        type_number(&mut app);
        assert!(app.state.session.is_complete());
        assert_eq!(app.state.session.digits().number().as_deref(), Some("33333333"));
        assert_eq!(app.state.focus, Focus::Digits(7));

        key(&mut app, KeyCode::Backspace);
        assert!(!app.state.session.is_complete());
    }

    #[test]
    fn tab_cycles_focus_and_q_quits() {
        let mut app = app(&[]);
        key(&mut app, KeyCode::Tab);
        assert_eq!(app.state.focus, Focus::Digits(0));
        key(&mut app, KeyCode::Tab);
        assert_eq!(app.state.focus, Focus::Actions(0));
        key(&mut app, KeyCode::BackTab);
        assert_eq!(app.state.focus, Focus::Digits(0));
        key(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn reset_button_taunts_and_advances() {
        let mut app = app(&[3]);
        type_number(&mut app);
        app.state.focus = Focus::Actions(0);
        key(&mut app, KeyCode::Enter);

        let session = &app.state.session;
        assert_eq!(session.reset_counter(), 1);
        assert_eq!(session.behavior_mode(), BehaviorMode::Swap);
        let taunt = &app.state.reference.messages.pool(Pool::Taunt)[3];
        assert_eq!(session.error_message(), Some(taunt.as_str()));
        let opening: String = taunt.chars().take(20).collect();
        assert!(screen(&mut app).contains(&opening));
    }

    #[test]
    fn third_submission_goes_through_the_dialog() {
        let mut app = app(&[0, 0]);
        for _ in 0..2 {
            type_number(&mut app);
            app.state.focus = Focus::Actions(1);
            key(&mut app, KeyCode::Enter);
            assert!(app.popup.is_none());
        }
        assert_eq!(app.state.session.reset_counter(), 2);

        type_number(&mut app);
        app.state.focus = Focus::Actions(1);
        key(&mut app, KeyCode::Enter);
        assert!(app.state.session.dialog_open());
        assert!(app.popup.is_some());
        assert!(screen(&mut app).contains("Confirm Submission?"));

        // the form underneath is locked
        key(&mut app, KeyCode::Tab);
        assert!(app.state.session.dialog_open());

        key(&mut app, KeyCode::Esc);
        assert!(app.popup.is_none());
        assert_eq!(app.state.session.reset_counter(), 3);
        assert_eq!(app.state.session.error_message(), Some(CANCEL_NOTICE));
    }

    #[test]
    fn country_picker_round_trip() {
        let mut app = app(&[]);
        key(&mut app, KeyCode::Enter);
        assert!(app.popup.is_some());
        for c in "kiri".chars() {
            key(&mut app, KeyCode::Char(c));
        }
        assert!(!app.should_quit);
        key(&mut app, KeyCode::Enter);

        assert!(app.popup.is_none());
        assert_eq!(app.state.session.country().name, "Kiribati");
        assert_eq!(app.state.session.digits().len(), 5);
    }

    #[test]
    fn hover_collapses_submit_for_a_complete_form() {
        let mut app = app(&[]);
        type_number(&mut app);
        screen(&mut app);

        let inside = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Moved,
            column: 40,
            row: 16,
            modifiers: KeyModifiers::NONE,
        });
        send(&mut app, inside);
        assert!(app.state.session.is_hovering());
        assert!(!app.state.session.presentation().submit.visible);

        click(&mut app, 0, 0);
        assert!(!app.state.session.is_hovering());
    }

    fn click(app: &mut App, column: u16, row: u16) {
        let event = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        });
        send(app, event);
    }

    #[test]
    fn click_on_a_slot_from_the_previous_frame_is_ignored() {
        let mut app = app(&[]);
        screen(&mut app);

        key(&mut app, KeyCode::Enter);
        for c in "tuv".chars() {
            key(&mut app, KeyCode::Char(c));
        }
        key(&mut app, KeyCode::Enter);
        assert_eq!(app.state.session.digits().len(), 5);

        // the eighth Norway slot, still in the layout from the last draw
        click(&mut app, 45, 8);
        assert!(app.popup.is_none());

        screen(&mut app);
        key(&mut app, KeyCode::Char('4'));
        assert_eq!(app.state.session.digits().filled(), 0);
    }

    #[test]
    fn digit_picker_for_a_missing_slot_is_never_opened() {
        let mut app = app(&[]);
        app.update(Action::OpenDigitPicker(8)).unwrap();
        assert!(app.popup.is_none());

        app.update(Action::OpenDigitPicker(7)).unwrap();
        assert!(app.popup.is_some());
        assert_eq!(app.state.focus, Focus::Digits(7));
    }

    #[test]
    fn counter_line_follows_config() {
        let mut app = app(&[]);
        assert!(!screen(&mut app).contains("Reset count"));
        app.state.show_counter = true;
        assert!(screen(&mut app).contains("Reset count: 0 (Behavior mode: 1)"));
    }
}
