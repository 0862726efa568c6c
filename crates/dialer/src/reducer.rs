//! Event reducer for the form.
//!
//! One discrete user event in, the next session state plus presentation-layer
//! effects out. The function is synchronous and deterministic given the index
//! source, which is what lets the shell apply each event atomically and lets
//! tests assert exact messages.
//!
//! Policy:
//!   - While the confirmation dialog is pending only `Confirm` and `Cancel`
//!     are accepted; every other event leaves the state untouched.
//!   - Effects only describe what the modal control has to do; the state is
//!     the single source of truth for everything else.

use tracing::debug;

use crate::country::Country;
use crate::digits::Digit;
use crate::messages::MessagePools;
use crate::random::IndexSource;
use crate::session::SessionState;
use crate::submission::{self, SubmitOutcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    SelectCountry(Country),
    SetDigit { index: usize, value: Option<Digit> },
    HoverEnter,
    HoverLeave,
    Reset,
    Submit,
    Confirm,
    Cancel,
}

impl FormEvent {
    pub fn label(&self) -> &'static str {
        match self {
            FormEvent::SelectCountry(_) => "select-country",
            FormEvent::SetDigit { .. } => "set-digit",
            FormEvent::HoverEnter => "hover-enter",
            FormEvent::HoverLeave => "hover-leave",
            FormEvent::Reset => "reset",
            FormEvent::Submit => "submit",
            FormEvent::Confirm => "confirm",
            FormEvent::Cancel => "cancel",
        }
    }

    fn answers_dialog(&self) -> bool {
        matches!(self, FormEvent::Confirm | FormEvent::Cancel)
    }
}

/// Instruction for the modal control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    OpenConfirmation,
    CloseConfirmation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: SessionState,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn quiet(state: SessionState) -> Self {
        Self {
            state,
            effects: Vec::new(),
        }
    }
}

/// Read-only data and the randomness a transition may draw on.
pub struct FormContext<'a> {
    pub messages: &'a MessagePools,
    pub indices: &'a mut dyn IndexSource,
}

impl<'a> FormContext<'a> {
    pub fn new(messages: &'a MessagePools, indices: &'a mut dyn IndexSource) -> Self {
        Self { messages, indices }
    }
}

pub fn reduce(state: &SessionState, event: FormEvent, ctx: &mut FormContext<'_>) -> Transition {
    if state.dialog_open() && !event.answers_dialog() {
        debug!(event = event.label(), "ignored while confirmation is pending");
        return Transition::quiet(state.clone());
    }

    match event {
        FormEvent::SelectCountry(country) => Transition::quiet(state.select_country(country)),
        FormEvent::SetDigit { index, value } => Transition::quiet(state.set_digit(index, value)),
        FormEvent::HoverEnter => Transition::quiet(state.hover_enter()),
        FormEvent::HoverLeave => Transition::quiet(state.hover_leave()),
        FormEvent::Reset => {
            Transition::quiet(submission::reset(state, ctx.messages, &mut *ctx.indices))
        }
        FormEvent::Submit => match submission::submit(state, ctx.messages, &mut *ctx.indices) {
            SubmitOutcome::Inert => Transition::quiet(state.clone()),
            SubmitOutcome::Rejected(next) => Transition::quiet(next),
            SubmitOutcome::AwaitingConfirmation(next) => Transition {
                state: next,
                effects: vec![Effect::OpenConfirmation],
            },
        },
        FormEvent::Confirm | FormEvent::Cancel if !state.dialog_open() => {
            Transition::quiet(state.clone())
        }
        FormEvent::Confirm => Transition {
            state: submission::confirm(state, ctx.messages, &mut *ctx.indices),
            effects: vec![Effect::CloseConfirmation],
        },
        FormEvent::Cancel => Transition {
            state: submission::cancel(state),
            effects: vec![Effect::CloseConfirmation],
        },
    }
}
