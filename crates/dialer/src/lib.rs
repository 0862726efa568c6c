//! Core of the Switchboard phone form.
//!
//! The form collects a country and a fixed-length run of digits and then
//! refuses every submission. All of it is modelled as an immutable
//! [`SessionState`] plus pure transitions, so the rendering layer only has to
//! forward discrete user events into [`reduce`] and draw what comes back.
//!
//! Layout of this crate:
//!   - `country` / `digits`  : reference entities and the digit sequence
//!   - `messages` / `random` : message pools and the injected index source
//!   - `reference`           : loading and validating the reference data
//!   - `behavior`            : counter -> presentation mode for the button pair
//!   - `session`             : the session value and its form transitions
//!   - `submission`          : reset, submit and the confirmation detour
//!   - `reducer`             : event dispatch returning state + effects

pub mod behavior;
pub mod country;
pub mod digits;
pub mod error;
pub mod messages;
pub mod random;
pub mod reducer;
pub mod reference;
pub mod session;
pub mod submission;

pub use behavior::{
    BehaviorFlags, BehaviorMode, Control, ControlLayout, HoverHandler, Presentation, Scale,
};
pub use country::{Country, CountryCatalog, CountryGroup};
pub use digits::{Digit, PhoneDigits, EMPTY_SLOT};
pub use error::{DialerError, DialerResult};
pub use messages::{MessagePools, Pool, CANCEL_NOTICE};
pub use random::{IndexSource, RngIndexSource, ScriptedIndices};
pub use reducer::{reduce, Effect, FormContext, FormEvent, Transition};
pub use reference::{EmbeddedReference, FileReference, ReferenceData, ReferenceProvider};
pub use session::{Notice, NoticeKind, SessionState};
pub use submission::{DialogPhase, Resolution, SubmitOutcome};
