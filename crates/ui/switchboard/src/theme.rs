use std::env;

use ratatui::style::{Color, Modifier, Style};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorMode {
    TrueColor,
    Ansi256,
    Ansi16,
}

impl ColorMode {
    pub fn detect() -> Self {
        // Override via env if provided
        if let Some(mode) = env::var("SWITCHBOARD_COLOR_MODE")
            .ok()
            .and_then(|v| Self::parse(&v))
        {
            return mode;
        }

        if let Ok(v) = env::var("COLORTERM") {
            let l = v.to_ascii_lowercase();
            if l.contains("truecolor") || l.contains("24bit") {
                return ColorMode::TrueColor;
            }
        }
        if let Ok(v) = env::var("TERM") {
            if v.to_ascii_lowercase().contains("256color") {
                return ColorMode::Ansi256;
            }
        }
        ColorMode::Ansi16
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "24bit" | "truecolor" | "rgb" => Some(ColorMode::TrueColor),
            "256" | "ansi256" => Some(ColorMode::Ansi256),
            "16" | "ansi16" | "ansi" => Some(ColorMode::Ansi16),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UiGroup {
    Border,
    FocusBorder,
    Dimmed,
    Title,
    Label,
    Prefix,
    Notice,
    Check,
    PrimaryButton,
    OutlineButton,
    DisabledButton,
    Selected,
    Popup,
    Backdrop,
}

#[derive(Clone, Copy, Debug)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Clone, Debug)]
pub struct Palette {
    pub fg: Rgb,
    pub bg: Rgb,
    pub muted: Rgb,
    pub border: Rgb,
    pub focus: Rgb,
    pub primary: Rgb,
    pub error: Rgb,
    pub success: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        // hell auf dunkel, angelehnt an das Formular im Browser
        Self {
            fg: Rgb(226, 232, 240),
            bg: Rgb(15, 23, 42),
            muted: Rgb(100, 116, 139),
            border: Rgb(51, 65, 85),
            focus: Rgb(125, 207, 255),
            primary: Rgb(241, 245, 249),
            error: Rgb(220, 38, 38),
            success: Rgb(158, 206, 106),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Theme {
    pub mode: ColorMode,
    pub palette: Palette,
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(ColorMode::Ansi16)
    }
}

impl Theme {
    pub fn new(mode: ColorMode) -> Self {
        Self {
            mode,
            palette: Palette::default(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(ColorMode::detect())
    }

    pub fn style(&self, group: UiGroup) -> Style {
        let p = &self.palette;
        match group {
            UiGroup::Border => Style::default().fg(self.color(p.border)),
            UiGroup::FocusBorder => Style::default().fg(self.color(p.focus)),
            UiGroup::Dimmed => Style::default().fg(self.color(p.muted)),
            UiGroup::Title => Style::default()
                .fg(self.color(p.fg))
                .add_modifier(Modifier::BOLD),
            UiGroup::Label => Style::default()
                .fg(self.color(p.fg))
                .add_modifier(Modifier::BOLD),
            UiGroup::Prefix => Style::default()
                .fg(self.color(p.fg))
                .bg(self.color(p.border)),
            UiGroup::Notice => Style::default()
                .fg(self.color(p.error))
                .add_modifier(Modifier::BOLD),
            UiGroup::Check => Style::default().fg(self.color(p.success)),
            UiGroup::PrimaryButton => Style::default()
                .fg(self.color(p.bg))
                .bg(self.color(p.primary))
                .add_modifier(Modifier::BOLD),
            UiGroup::OutlineButton => Style::default().fg(self.color(p.fg)),
            UiGroup::DisabledButton => Style::default()
                .fg(self.color(p.muted))
                .add_modifier(Modifier::DIM),
            UiGroup::Selected => Style::default()
                .fg(self.color(p.bg))
                .bg(self.color(p.fg))
                .add_modifier(Modifier::BOLD),
            UiGroup::Popup => Style::default()
                .fg(self.color(p.fg))
                .bg(self.color(p.bg)),
            UiGroup::Backdrop => Style::default().bg(self.color(Rgb(0, 0, 0))),
        }
    }

    fn color(&self, rgb: Rgb) -> Color {
        match self.mode {
            ColorMode::TrueColor => Color::Rgb(rgb.0, rgb.1, rgb.2),
            ColorMode::Ansi256 => Color::Indexed(rgb_to_ansi256(rgb.0, rgb.1, rgb.2)),
            ColorMode::Ansi16 => ansi16_from_rgb(rgb.0, rgb.1, rgb.2),
        }
    }
}

fn rgb_to_ansi256(r: u8, g: u8, b: u8) -> u8 {
    // 6x6x6 Würfel oder Graustufenrampe, je nachdem was näher liegt
    let r_idx = (r as f32 / 255.0 * 5.0).round() as u8;
    let g_idx = (g as f32 / 255.0 * 5.0).round() as u8;
    let b_idx = (b as f32 / 255.0 * 5.0).round() as u8;
    let color_idx = 16 + 36 * r_idx + 6 * g_idx + b_idx;

    let avg = (r as u16 + g as u16 + b as u16) as f32 / 3.0;
    let gray_idx = (avg / 255.0 * 23.0).round() as u8;
    let gray_color = 232 + gray_idx;

    let cube = |idx: u8| idx as f32 * 255.0 / 5.0;
    let dcube = (cube(r_idx) - r as f32).abs()
        + (cube(g_idx) - g as f32).abs()
        + (cube(b_idx) - b as f32).abs();
    let gval = gray_idx as f32 * 255.0 / 23.0;
    let dgray = (gval - r as f32).abs() + (gval - g as f32).abs() + (gval - b as f32).abs();
    if dgray + 15.0 < dcube {
        gray_color
    } else {
        color_idx
    }
}

fn ansi16_from_rgb(r: u8, g: u8, b: u8) -> Color {
    let avg = (r as u16 + g as u16 + b as u16) / 3;
    let bright = avg > 128;
    let (base, _) = [
        (Color::Black, (0, 0, 0)),
        (Color::Red, (205, 0, 0)),
        (Color::Green, (0, 205, 0)),
        (Color::Yellow, (205, 205, 0)),
        (Color::Blue, (0, 0, 238)),
        (Color::Magenta, (205, 0, 205)),
        (Color::Cyan, (0, 205, 205)),
        (Color::Gray, (229, 229, 229)),
    ]
    .into_iter()
    .map(|(c, (cr, cg, cb)): (Color, (i32, i32, i32))| {
        let d = (cr - r as i32).abs() + (cg - g as i32).abs() + (cb - b as i32).abs();
        (c, d)
    })
    .min_by_key(|(_, d)| *d)
    .unwrap_or((Color::Gray, 0));

    match (base, bright) {
        (Color::Black, true) => Color::DarkGray,
        (Color::Red, true) => Color::LightRed,
        (Color::Green, true) => Color::LightGreen,
        (Color::Yellow, true) => Color::LightYellow,
        (Color::Blue, true) => Color::LightBlue,
        (Color::Magenta, true) => Color::LightMagenta,
        (Color::Cyan, true) => Color::LightCyan,
        (Color::Gray, true) => Color::White,
        (c, _) => c,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_color_mode_overrides() {
        assert_eq!(ColorMode::parse("TrueColor"), Some(ColorMode::TrueColor));
        assert_eq!(ColorMode::parse("256"), Some(ColorMode::Ansi256));
        assert_eq!(ColorMode::parse("ansi"), Some(ColorMode::Ansi16));
        assert_eq!(ColorMode::parse("sepia"), None);
    }

    #[test]
    fn truecolor_keeps_palette_values() {
        let theme = Theme::new(ColorMode::TrueColor);
        assert_eq!(
            theme.style(UiGroup::Notice).fg,
            Some(Color::Rgb(220, 38, 38))
        );
    }

    #[test]
    fn selection_inverts_the_popup_colors() {
        let theme = Theme::new(ColorMode::Ansi16);
        let popup = theme.style(UiGroup::Popup);
        let selected = theme.style(UiGroup::Selected);
        assert_eq!(selected.fg, popup.bg);
        assert_eq!(selected.bg, popup.fg);
        assert_eq!(selected.bg, Some(Color::White));
    }

    #[test]
    fn ansi_fallbacks_map_primaries() {
        assert_eq!(ansi16_from_rgb(220, 38, 38), Color::Red);
        assert_eq!(ansi16_from_rgb(250, 250, 250), Color::White);
        assert_eq!(rgb_to_ansi256(0, 0, 0), 16);
    }
}
