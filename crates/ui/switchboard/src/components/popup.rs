use ratatui::{
    layout::Rect,
    symbols,
    widgets::{Block, Borders, Clear},
};

use crate::{
    action::Action,
    components::Component,
    theme::{Theme, UiGroup},
    tui::Frame,
};

/// Popup components and helpers.
///
/// Intended usage:
/// 1) Draw the form as usual
/// 2) If a popup is active:
///    - call `render_backdrop(frame, area, theme)` for modal popups
///    - compute a centered rect with `centered_rect_fixed(area, width, height)`
///    - call `draw_popup_frame(frame, popup_area, "Title", theme)`
///    - draw your popup content inside `inner_rect(popup_area)`
pub trait PopupComponent: Component {
    /// Whether the popup blocks the form underneath. Defaults to true.
    fn is_modal(&self) -> bool {
        true
    }

    /// Action for Enter. Default closes the popup.
    fn submit_action(&mut self) -> Option<Action> {
        Some(Action::ClosePopup)
    }

    /// Action for Esc. Default closes the popup.
    fn cancel_action(&mut self) -> Option<Action> {
        Some(Action::ClosePopup)
    }
}

/// Dim overlay behind a modal popup. Terminals have no transparency, so this
/// is a solid dark background.
pub fn render_backdrop(frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    let backdrop = Block::default().style(theme.style(UiGroup::Backdrop));
    frame.render_widget(backdrop, area);
}

/// Centered rectangle of a fixed size, clamped to `area`.
pub fn centered_rect_fixed(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);

    let x = area.x.saturating_add((area.width.saturating_sub(w)) / 2);
    let y = area.y.saturating_add((area.height.saturating_sub(h)) / 2);

    Rect {
        x,
        y,
        width: w,
        height: h,
    }
}

/// Rounded, bordered popup shell with a title. Clears the area first.
pub fn draw_popup_frame(
    frame: &mut Frame<'_>,
    area: Rect,
    title: impl Into<String>,
    theme: &Theme,
) -> Rect {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {} ", title.into()))
        .borders(Borders::ALL)
        .border_set(symbols::border::ROUNDED)
        .border_style(theme.style(UiGroup::FocusBorder))
        .style(theme.style(UiGroup::Popup));

    frame.render_widget(block, area);
    area
}

/// Area inside the one-cell border.
pub fn inner_rect(area: Rect) -> Rect {
    Rect {
        x: area.x.saturating_add(1),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn centered_rect_is_clamped_and_centered() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(centered_rect_fixed(area, 40, 10), Rect::new(20, 7, 40, 10));
        assert_eq!(centered_rect_fixed(area, 120, 40), area);
    }

    #[test]
    fn inner_rect_strips_border() {
        assert_eq!(inner_rect(Rect::new(2, 3, 10, 5)), Rect::new(3, 4, 8, 3));
        assert_eq!(inner_rect(Rect::new(0, 0, 1, 1)).width, 0);
    }
}
