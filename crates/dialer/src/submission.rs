//! Submission flow and the reset path.
//!
//! Submitting never succeeds. A complete form is either rejected on the spot
//! or, when the counter sits on the confirmation residue, sent through a
//! dialog whose two answers are both rejections. The dialog is a small state
//! machine per submission attempt, kept next to (not inside) the counter.

use tracing::{debug, info};

use crate::messages::{MessagePools, Pool, CANCEL_NOTICE};
use crate::random::IndexSource;
use crate::session::{Notice, NoticeKind, SessionState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DialogPhase {
    #[default]
    Idle,
    PendingConfirmation,
    Resolved(Resolution),
}

impl DialogPhase {
    pub fn is_pending(self) -> bool {
        self == DialogPhase::PendingConfirmation
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resolution {
    Confirmed,
    Cancelled,
}

/// What a submit attempt did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Form incomplete (or a dialog already pending); nothing changed.
    Inert,
    /// Rejected immediately with an excuse.
    Rejected(SessionState),
    /// Dialog opened; nothing else changed yet.
    AwaitingConfirmation(SessionState),
}

impl SubmitOutcome {
    pub fn into_state(self, previous: &SessionState) -> SessionState {
        match self {
            SubmitOutcome::Inert => previous.clone(),
            SubmitOutcome::Rejected(state) | SubmitOutcome::AwaitingConfirmation(state) => state,
        }
    }
}

/// Reset action: clear the digits, advance the behavior and taunt.
pub fn reset(
    state: &SessionState,
    messages: &MessagePools,
    indices: &mut dyn IndexSource,
) -> SessionState {
    let text = messages.draw(Pool::Taunt, indices);
    debug!(reset_counter = state.reset_counter(), "reset requested");
    state.advance(Notice::new(NoticeKind::ResetTaunt, text))
}

/// Submit action. The branch is decided by the counter at the moment of the
/// call.
pub fn submit(
    state: &SessionState,
    messages: &MessagePools,
    indices: &mut dyn IndexSource,
) -> SubmitOutcome {
    if !state.is_complete() || state.dialog_open() {
        return SubmitOutcome::Inert;
    }

    if state.behavior_mode().confirms_submission() {
        debug!(reset_counter = state.reset_counter(), "submission needs confirmation");
        return SubmitOutcome::AwaitingConfirmation(
            state.with_dialog(DialogPhase::PendingConfirmation),
        );
    }

    SubmitOutcome::Rejected(reject(state.with_dialog(DialogPhase::Idle), messages, indices))
}

/// "Proceed" in the dialog: close it and reject with an excuse.
/// Ignored unless the dialog is pending.
pub fn confirm(
    state: &SessionState,
    messages: &MessagePools,
    indices: &mut dyn IndexSource,
) -> SessionState {
    if !state.dialog_open() {
        return state.clone();
    }
    let closed = state.with_dialog(DialogPhase::Resolved(Resolution::Confirmed));
    reject(closed, messages, indices)
}

/// "Maybe" in the dialog: close it and claim it was submitted anyway.
/// Ignored unless the dialog is pending.
pub fn cancel(state: &SessionState) -> SessionState {
    if !state.dialog_open() {
        return state.clone();
    }
    info!(reset_counter = state.reset_counter(), "submission cancelled, pretending otherwise");
    state
        .with_dialog(DialogPhase::Resolved(Resolution::Cancelled))
        .advance(Notice::new(NoticeKind::CancelLie, CANCEL_NOTICE))
}

fn reject(
    state: SessionState,
    messages: &MessagePools,
    indices: &mut dyn IndexSource,
) -> SessionState {
    let text = messages.draw(Pool::Excuse, indices);
    info!(reset_counter = state.reset_counter(), excuse = text, "submission rejected");
    state.advance(Notice::new(NoticeKind::SubmissionExcuse, text))
}
