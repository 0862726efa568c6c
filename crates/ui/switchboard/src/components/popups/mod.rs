pub mod confirm;
pub mod country_picker;
pub mod digit_picker;

pub use confirm::ConfirmPopup;
pub use country_picker::CountryPicker;
pub use digit_picker::DigitPicker;

pub use super::popup::{centered_rect_fixed, draw_popup_frame, inner_rect, render_backdrop};
