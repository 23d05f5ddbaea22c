use iced::color;
use iced::theme::Palette;
use iced::{Color, Theme};

use crate::settings::Appearance;

/// Accent used for bounding boxes and their labels. Fixed fuchsia so the
/// boxes stay legible over camera imagery in every palette.
pub fn overlay_accent() -> Color {
    color!(0xc0, 0x26, 0xd3)
}

/// Resolve the iced Theme from appearance + high_contrast settings.
pub fn resolve_theme(appearance: Appearance, high_contrast: bool) -> Theme {
    let is_dark = match appearance {
        Appearance::Dark => true,
        Appearance::Light => false,
        Appearance::System => detect_system_dark_mode(),
    };

    let palette = match (is_dark, high_contrast) {
        (true, false) => dark_palette(),
        (false, false) => light_palette(),
        (true, true) => high_contrast_dark_palette(),
        (false, true) => high_contrast_light_palette(),
    };

    Theme::custom("AstraSafe", palette)
}

fn dark_palette() -> Palette {
    Palette {
        background: color!(0x0c, 0x0b, 0x1d),
        text: color!(0xd9, 0xd4, 0xf2),
        primary: color!(0xa8, 0x55, 0xf7),
        success: color!(0x30, 0xd1, 0x58),
        warning: color!(0xff, 0xcc, 0x00),
        danger: color!(0xef, 0x44, 0x44),
    }
}

fn light_palette() -> Palette {
    Palette {
        background: color!(0xf4, 0xf2, 0xfb),
        text: color!(0x1e, 0x1b, 0x2e),
        primary: color!(0x7c, 0x3a, 0xed),
        success: color!(0x16, 0xa3, 0x4a),
        warning: color!(0xd9, 0x77, 0x06),
        danger: color!(0xdc, 0x26, 0x26),
    }
}

fn high_contrast_dark_palette() -> Palette {
    Palette {
        background: color!(0x00, 0x00, 0x00),
        text: color!(0xff, 0xff, 0xff),
        primary: color!(0xc8, 0x84, 0xfc),
        success: color!(0x30, 0xd1, 0x58),
        warning: color!(0xff, 0xd6, 0x0a),
        danger: color!(0xff, 0x45, 0x3a),
    }
}

fn high_contrast_light_palette() -> Palette {
    Palette {
        background: color!(0xff, 0xff, 0xff),
        text: color!(0x00, 0x00, 0x00),
        primary: color!(0x5b, 0x21, 0xb6),
        success: color!(0x24, 0x8a, 0x3d),
        warning: color!(0xb2, 0x5c, 0x00),
        danger: color!(0xd7, 0x00, 0x15),
    }
}

fn detect_system_dark_mode() -> bool {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("defaults")
            .args(["read", "-g", "AppleInterfaceStyle"])
            .output()
            .map(|o| {
                String::from_utf8_lossy(&o.stdout)
                    .trim()
                    .eq_ignore_ascii_case("dark")
            })
            .unwrap_or(true)
    }
    #[cfg(not(target_os = "macos"))]
    {
        true
    }
}

/// Slightly raised panel background.
pub fn surface_color(theme: &Theme) -> Color {
    let p = theme.palette();
    Color {
        a: 0.06,
        ..p.text
    }
}

/// De-emphasized text color for placeholders and captions.
pub fn tertiary_color(theme: &Theme) -> Color {
    let p = theme.palette();
    Color { a: 0.55, ..p.text }
}

/// A very light panel border.
pub fn border_color(theme: &Theme) -> Color {
    let p = theme.palette();
    Color { a: 0.12, ..p.text }
}
