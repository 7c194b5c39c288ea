// ABOUTME: Theme presets for generated decks
// ABOUTME: Color palettes, font faces and layout constants for the four built-in looks

use crate::errors::{DeckError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Name of one of the built-in themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    /// Technical, strategy and analysis content
    #[default]
    Dark,
    /// Education and report content
    Light,
    /// Business and proposal content
    Corporate,
    /// Simple and academic content
    Minimal,
}

impl ThemeName {
    pub const ALL: [ThemeName; 4] = [
        ThemeName::Dark,
        ThemeName::Light,
        ThemeName::Corporate,
        ThemeName::Minimal,
    ];

    pub fn theme(self) -> &'static Theme {
        match self {
            ThemeName::Dark => &DARK,
            ThemeName::Light => &LIGHT,
            ThemeName::Corporate => &CORPORATE,
            ThemeName::Minimal => &MINIMAL,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ThemeName::Dark => "dark",
            ThemeName::Light => "light",
            ThemeName::Corporate => "corporate",
            ThemeName::Minimal => "minimal",
        }
    }
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeName {
    type Err = DeckError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "dark" => Ok(ThemeName::Dark),
            "light" => Ok(ThemeName::Light),
            "corporate" => Ok(ThemeName::Corporate),
            "minimal" => Ok(ThemeName::Minimal),
            other => Err(DeckError::UnknownTheme(other.to_string())),
        }
    }
}

/// Hex colors without a leading `#`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SemanticColors {
    pub success: &'static str,
    pub warning: &'static str,
    pub error: &'static str,
    pub info: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtraColors {
    pub purple: &'static str,
    pub teal: &'static str,
    pub orange: &'static str,
    pub red: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: &'static str,
    pub surface: &'static str,
    pub surface_alt: &'static str,
    pub text: &'static str,
    pub text_muted: &'static str,
    pub text_faint: &'static str,
    pub accent1: &'static str,
    pub accent2: &'static str,
    pub accent3: &'static str,
    pub semantic: SemanticColors,
    pub extra: ExtraColors,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fonts {
    pub title: &'static str,
    pub body: &'static str,
    pub mono: &'static str,
    pub cjk: &'static str,
}

/// Layout constants, in inches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub margin: f64,
    pub gutter: f64,
    pub header_height: f64,
    pub footer_y: f64,
    pub slide_w: f64,
    pub slide_h: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub colors: Palette,
    pub fonts: Fonts,
    pub layout: Layout,
}

/// Single-level view of a palette, keyed the way deck scripts refer to colors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatColors {
    pub bg: &'static str,
    pub surface: &'static str,
    pub surface_alt: &'static str,
    pub text: &'static str,
    pub text_muted: &'static str,
    pub text_faint: &'static str,
    pub accent: &'static str,
    pub accent2: &'static str,
    pub accent3: &'static str,
    pub success: &'static str,
    pub warning: &'static str,
    pub error: &'static str,
    pub info: &'static str,
    pub purple: &'static str,
    pub teal: &'static str,
    pub orange: &'static str,
    pub red: &'static str,
}

impl Theme {
    pub fn flat(&self) -> FlatColors {
        let c = &self.colors;
        FlatColors {
            bg: c.background,
            surface: c.surface,
            surface_alt: c.surface_alt,
            text: c.text,
            text_muted: c.text_muted,
            text_faint: c.text_faint,
            accent: c.accent1,
            accent2: c.accent2,
            accent3: c.accent3,
            success: c.semantic.success,
            warning: c.semantic.warning,
            error: c.semantic.error,
            info: c.semantic.info,
            purple: c.extra.purple,
            teal: c.extra.teal,
            orange: c.extra.orange,
            red: c.extra.red,
        }
    }

    /// Usable content width between the left and right margins.
    pub fn content_width(&self) -> f64 {
        self.layout.slide_w - self.layout.margin * 2.0
    }
}

const FONTS: Fonts = Fonts {
    title: "Helvetica Neue",
    body: "Helvetica Neue",
    mono: "Courier New",
    cjk: "Hiragino Sans",
};

pub static DARK: Theme = Theme {
    name: "Dark",
    colors: Palette {
        background: "0D1B2A",
        surface: "1B2838",
        surface_alt: "1E3A5F",
        text: "FFFFFF",
        text_muted: "E8ECF0",
        text_faint: "8899AA",
        accent1: "00A8E8",
        accent2: "FFB800",
        accent3: "38A169",
        semantic: SemanticColors {
            success: "38A169",
            warning: "DD6B20",
            error: "E53E3E",
            info: "00A8E8",
        },
        extra: ExtraColors {
            purple: "805AD5",
            teal: "319795",
            orange: "DD6B20",
            red: "E53E3E",
        },
    },
    fonts: FONTS,
    layout: Layout {
        margin: 0.4,
        gutter: 0.15,
        header_height: 0.5,
        footer_y: 5.1,
        slide_w: 10.0,
        slide_h: 5.63,
    },
};

pub static LIGHT: Theme = Theme {
    name: "Light",
    colors: Palette {
        background: "FFFFFF",
        surface: "F7FAFC",
        surface_alt: "EDF2F7",
        text: "1A202C",
        text_muted: "4A5568",
        text_faint: "A0AEC0",
        accent1: "3182CE",
        accent2: "DD6B20",
        accent3: "38A169",
        semantic: SemanticColors {
            success: "38A169",
            warning: "D69E2E",
            error: "E53E3E",
            info: "3182CE",
        },
        extra: ExtraColors {
            purple: "805AD5",
            teal: "319795",
            orange: "DD6B20",
            red: "E53E3E",
        },
    },
    fonts: FONTS,
    layout: Layout {
        margin: 0.5,
        gutter: 0.15,
        header_height: 0.5,
        footer_y: 5.1,
        slide_w: 10.0,
        slide_h: 5.63,
    },
};

pub static CORPORATE: Theme = Theme {
    name: "Corporate",
    colors: Palette {
        background: "FFFFFF",
        surface: "F8F9FA",
        surface_alt: "0D1B2A",
        text: "1A202C",
        text_muted: "4A5568",
        text_faint: "A0AEC0",
        accent1: "0D1B2A",
        accent2: "C5960C",
        accent3: "2B6CB0",
        semantic: SemanticColors {
            success: "276749",
            warning: "C5960C",
            error: "C53030",
            info: "2B6CB0",
        },
        extra: ExtraColors {
            purple: "553C9A",
            teal: "285E61",
            orange: "C05621",
            red: "C53030",
        },
    },
    fonts: FONTS,
    layout: Layout {
        margin: 0.5,
        gutter: 0.2,
        header_height: 0.5,
        footer_y: 5.1,
        slide_w: 10.0,
        slide_h: 5.63,
    },
};

pub static MINIMAL: Theme = Theme {
    name: "Minimal",
    colors: Palette {
        background: "FFFFFF",
        surface: "FAFAFA",
        surface_alt: "F0F0F0",
        text: "111111",
        text_muted: "555555",
        text_faint: "999999",
        accent1: "111111",
        accent2: "E53E3E",
        accent3: "555555",
        semantic: SemanticColors {
            success: "276749",
            warning: "975A16",
            error: "9B2C2C",
            info: "2A4365",
        },
        extra: ExtraColors {
            purple: "553C9A",
            teal: "285E61",
            orange: "C05621",
            red: "9B2C2C",
        },
    },
    fonts: FONTS,
    layout: Layout {
        margin: 0.6,
        gutter: 0.2,
        header_height: 0.5,
        footer_y: 5.1,
        slide_w: 10.0,
        slide_h: 5.63,
    },
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_names_parse_case_insensitively() {
        assert_eq!("Dark".parse::<ThemeName>().unwrap(), ThemeName::Dark);
        assert_eq!(" CORPORATE ".parse::<ThemeName>().unwrap(), ThemeName::Corporate);
        assert!(matches!(
            "neon".parse::<ThemeName>(),
            Err(DeckError::UnknownTheme(name)) if name == "neon"
        ));
    }

    #[test]
    fn flat_colors_follow_the_palette() {
        let flat = ThemeName::Light.theme().flat();
        assert_eq!(flat.bg, "FFFFFF");
        assert_eq!(flat.accent, "3182CE");
        assert_eq!(flat.warning, "D69E2E");
        assert_eq!(flat.red, "E53E3E");
    }

    #[test]
    fn content_width_subtracts_both_margins() {
        let theme = ThemeName::Minimal.theme();
        assert!((theme.content_width() - 8.8).abs() < 1e-9);
    }
}
