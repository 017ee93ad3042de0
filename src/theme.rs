use catppuccin::PALETTE;
use ratatui::style::Color;
use ratatui::widgets::BorderType;
use tracing::warn;

const fn catppuccin_to_color(c: &catppuccin::Color) -> Color {
    Color::Rgb(c.rgb.r, c.rgb.g, c.rgb.b)
}

/// Colors of the promo screens, expressed as roles rather than palette names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub background: Color,
    pub surface: Color,
    pub border: Color,
    pub border_focused: Color,
    pub text: Color,
    pub muted: Color,
    pub subtle: Color,
    /// Brand color used for titles and the submit button.
    pub accent: Color,
    /// Keys in help lines, podium places.
    pub highlight: Color,
    pub header: Color,
    pub success: Color,
    pub error: Color,
    pub info: Color,
    pub selection_bg: Color,
    pub border_type: BorderType,
}

impl Theme {
    const fn from_catppuccin(flavor: &catppuccin::Flavor) -> Self {
        let c = &flavor.colors;
        Self {
            background: catppuccin_to_color(&c.base),
            surface: catppuccin_to_color(&c.surface0),
            border: catppuccin_to_color(&c.surface1),
            border_focused: catppuccin_to_color(&c.lavender),
            text: catppuccin_to_color(&c.text),
            muted: catppuccin_to_color(&c.overlay1),
            subtle: catppuccin_to_color(&c.overlay0),
            accent: catppuccin_to_color(&c.mauve),
            highlight: catppuccin_to_color(&c.peach),
            header: catppuccin_to_color(&c.yellow),
            success: catppuccin_to_color(&c.green),
            error: catppuccin_to_color(&c.red),
            info: catppuccin_to_color(&c.blue),
            selection_bg: catppuccin_to_color(&c.surface1),
            border_type: BorderType::Rounded,
        }
    }

    #[must_use]
    pub fn catppuccin_mocha() -> Self {
        Self::from_catppuccin(&PALETTE.mocha)
    }

    #[must_use]
    pub fn catppuccin_macchiato() -> Self {
        Self::from_catppuccin(&PALETTE.macchiato)
    }

    #[must_use]
    pub fn catppuccin_frappe() -> Self {
        Self::from_catppuccin(&PALETTE.frappe)
    }

    #[must_use]
    pub fn catppuccin_latte() -> Self {
        Self::from_catppuccin(&PALETTE.latte)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::catppuccin_mocha()
    }
}

const THEMES: &[(&str, fn() -> Theme)] = &[
    ("Catppuccin Mocha", Theme::catppuccin_mocha),
    ("Catppuccin Macchiato", Theme::catppuccin_macchiato),
    ("Catppuccin Frappé", Theme::catppuccin_frappe),
    ("Catppuccin Latte", Theme::catppuccin_latte),
];

/// Look up a theme by name. Unknown names fall back to the default theme.
pub fn theme_from_name(name: &str) -> Theme {
    THEMES
        .iter()
        .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
        .map_or_else(
            || {
                warn!(name, "Unknown theme, using default");
                Theme::default()
            },
            |(_, build)| build(),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_lookup() {
        assert_eq!(theme_from_name("Catppuccin Latte"), Theme::catppuccin_latte());
        assert_eq!(theme_from_name("catppuccin frappé"), Theme::catppuccin_frappe());
        assert_eq!(theme_from_name("Solarized"), Theme::default());
    }
}
