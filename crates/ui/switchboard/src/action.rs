use dialer::FormEvent;
use strum::Display;

use crate::state::Focus;

#[derive(Debug, Clone, PartialEq, Display)]
pub enum Action {
    Tick,
    Render,
    Resize(u16, u16),
    Suspend,
    Resume,
    Quit,
    ClearScreen,
    Error(String),
    Update,
    FocusNext,
    FocusPrev,
    Focus(Focus),
    /// One discrete event for the form reducer.
    Form(FormEvent),
    OpenCountryPicker,
    OpenDigitPicker(usize),
    ClosePopup,
}
