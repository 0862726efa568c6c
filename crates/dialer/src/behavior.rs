//! Behavior selector: maps the reset counter onto one of three presentation
//! modes for the Reset/Submit pair and derives the layout the renderer draws.
//!
//! Everything here is a pure function of the mode and a handful of flags,
//! so each mode can be checked on its own without driving the whole form.

use strum::{Display, EnumIter};

/// Presentation/interaction style of the action pair, chosen by
/// `reset_counter % 3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumIter)]
pub enum BehaviorMode {
    /// 50/50 split; hovering a complete form collapses Submit to nothing.
    #[default]
    HorizontalCollapse,
    /// 50/50 split; each qualifying hover-enter swaps the two controls.
    Swap,
    /// 50/50 split, both controls shrunk; hover is inert. Submitting here
    /// detours through the confirmation dialog.
    ScaleDown,
}

impl BehaviorMode {
    pub fn from_counter(counter: u64) -> Self {
        match counter % 3 {
            0 => BehaviorMode::HorizontalCollapse,
            1 => BehaviorMode::Swap,
            _ => BehaviorMode::ScaleDown,
        }
    }

    /// Zero-based index (`counter % 3`).
    pub fn index(self) -> u8 {
        match self {
            BehaviorMode::HorizontalCollapse => 0,
            BehaviorMode::Swap => 1,
            BehaviorMode::ScaleDown => 2,
        }
    }

    pub fn hover_handler(self) -> HoverHandler {
        match self {
            BehaviorMode::HorizontalCollapse => HoverHandler::Collapse,
            BehaviorMode::Swap => HoverHandler::Swap,
            BehaviorMode::ScaleDown => HoverHandler::Inert,
        }
    }

    /// Whether a submit attempt in this mode opens the confirmation dialog.
    ///
    /// Keyed off the same counter residue as [`BehaviorMode::ScaleDown`], so
    /// the two always coincide.
    pub fn confirms_submission(self) -> bool {
        self == BehaviorMode::ScaleDown
    }
}

/// Which hover reaction is wired to the button container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HoverHandler {
    Collapse,
    Swap,
    Inert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Control {
    Reset,
    Submit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scale {
    Full,
    Half,
}

/// Sizing of one control inside the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlLayout {
    /// Share of the container width, 0..=100.
    pub width_percent: u16,
    /// False when the control is collapsed to zero width/opacity.
    pub visible: bool,
    pub scale: Scale,
}

impl ControlLayout {
    const HALF: ControlLayout = ControlLayout {
        width_percent: 50,
        visible: true,
        scale: Scale::Full,
    };
    const FULL: ControlLayout = ControlLayout {
        width_percent: 100,
        visible: true,
        scale: Scale::Full,
    };
    const COLLAPSED: ControlLayout = ControlLayout {
        width_percent: 0,
        visible: false,
        scale: Scale::Full,
    };
    const SHRUNK: ControlLayout = ControlLayout {
        width_percent: 50,
        visible: true,
        scale: Scale::Half,
    };
}

/// Transient inputs of the selector besides the mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BehaviorFlags {
    pub complete: bool,
    pub hovering: bool,
    pub swapped: bool,
}

/// Presentation descriptor consumed by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Presentation {
    pub mode: BehaviorMode,
    pub hover: HoverHandler,
    pub reset: ControlLayout,
    pub submit: ControlLayout,
    /// Left-to-right order.
    pub order: [Control; 2],
    /// Submit trigger is enabled only for a complete form.
    pub submit_enabled: bool,
}

impl Presentation {
    pub fn derive(mode: BehaviorMode, flags: BehaviorFlags) -> Self {
        let (reset, submit, order) = match mode {
            BehaviorMode::HorizontalCollapse if flags.hovering && flags.complete => (
                ControlLayout::FULL,
                ControlLayout::COLLAPSED,
                [Control::Reset, Control::Submit],
            ),
            BehaviorMode::HorizontalCollapse => (
                ControlLayout::HALF,
                ControlLayout::HALF,
                [Control::Reset, Control::Submit],
            ),
            BehaviorMode::Swap => {
                let order = if flags.swapped {
                    [Control::Submit, Control::Reset]
                } else {
                    [Control::Reset, Control::Submit]
                };
                (ControlLayout::HALF, ControlLayout::HALF, order)
            }
            BehaviorMode::ScaleDown => (
                ControlLayout::SHRUNK,
                ControlLayout::SHRUNK,
                [Control::Reset, Control::Submit],
            ),
        };

        Self {
            mode,
            hover: mode.hover_handler(),
            reset,
            submit,
            order,
            submit_enabled: flags.complete,
        }
    }

    pub fn layout(&self, control: Control) -> ControlLayout {
        match control {
            Control::Reset => self.reset,
            Control::Submit => self.submit,
        }
    }

    /// Controls in display order, paired with their layout.
    pub fn controls(&self) -> [(Control, ControlLayout); 2] {
        self.order.map(|c| (c, self.layout(c)))
    }

    /// Whether activating `control` can do anything right now.
    pub fn is_actionable(&self, control: Control) -> bool {
        let layout = self.layout(control);
        match control {
            Control::Reset => layout.visible,
            Control::Submit => layout.visible && self.submit_enabled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    fn flags(complete: bool, hovering: bool, swapped: bool) -> BehaviorFlags {
        BehaviorFlags {
            complete,
            hovering,
            swapped,
        }
    }

    #[test]
    fn counter_residue_selects_mode() {
        for n in 0..30u64 {
            assert_eq!(BehaviorMode::from_counter(n).index() as u64, n % 3);
        }
        let modes: Vec<_> = BehaviorMode::iter().collect();
        assert_eq!(
            modes,
            [BehaviorMode::HorizontalCollapse, BehaviorMode::Swap, BehaviorMode::ScaleDown]
        );
    }

    #[test]
    fn only_scale_down_confirms() {
        assert!(!BehaviorMode::HorizontalCollapse.confirms_submission());
        assert!(!BehaviorMode::Swap.confirms_submission());
        assert!(BehaviorMode::ScaleDown.confirms_submission());
    }

    #[test]
    fn collapse_needs_hover_and_complete_form() {
        let mode = BehaviorMode::HorizontalCollapse;
        for (complete, hovering) in [(false, false), (false, true), (true, false)] {
            let p = Presentation::derive(mode, flags(complete, hovering, false));
            assert_eq!(p.reset.width_percent, 50);
            assert_eq!(p.submit.width_percent, 50);
            assert!(p.submit.visible);
        }

        let p = Presentation::derive(mode, flags(true, true, false));
        assert_eq!(p.reset, ControlLayout::FULL);
        assert_eq!(p.submit, ControlLayout::COLLAPSED);
        assert!(!p.is_actionable(Control::Submit));
        assert!(p.is_actionable(Control::Reset));
    }

    #[test]
    fn swap_mode_orders_by_flag_only() {
        let mode = BehaviorMode::Swap;
        let plain = Presentation::derive(mode, flags(true, true, false));
        let swapped = Presentation::derive(mode, flags(true, false, true));
        assert_eq!(plain.order, [Control::Reset, Control::Submit]);
        assert_eq!(swapped.order, [Control::Submit, Control::Reset]);
        assert_eq!(swapped.reset.width_percent, 50);
        assert_eq!(swapped.submit.width_percent, 50);
        assert_eq!(swapped.hover, HoverHandler::Swap);
    }

    #[test]
    fn scale_down_ignores_hover_and_swap() {
        let a = Presentation::derive(BehaviorMode::ScaleDown, flags(true, true, true));
        let b = Presentation::derive(BehaviorMode::ScaleDown, flags(true, false, false));
        assert_eq!(a, b);
        assert_eq!(a.reset.scale, Scale::Half);
        assert_eq!(a.submit.scale, Scale::Half);
        assert_eq!(a.hover, HoverHandler::Inert);
    }

    #[test]
    fn submit_is_disabled_until_complete() {
        for mode in BehaviorMode::iter() {
            let p = Presentation::derive(mode, flags(false, false, false));
            assert!(!p.submit_enabled);
            assert!(!p.is_actionable(Control::Submit));
            assert!(p.is_actionable(Control::Reset));
        }
    }

    #[test]
    fn controls_follow_order() {
        let p = Presentation::derive(BehaviorMode::Swap, flags(true, false, true));
        let [(first, _), (second, _)] = p.controls();
        assert_eq!((first, second), (Control::Submit, Control::Reset));
    }
}
