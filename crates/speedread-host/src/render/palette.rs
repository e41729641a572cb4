use crossterm::style::Color;
use speedread_core::render::{HighlightColor, Theme};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Palette {
    pub text: Color,
    pub muted: Color,
    pub pivot: Color,
}

const fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::Rgb { r, g, b }
}

/// Pivot colors are darker on the light theme so they keep contrast.
pub fn palette_for(theme: Theme, highlight: HighlightColor) -> Palette {
    let pivot = match (theme, highlight) {
        (Theme::Light, HighlightColor::Red) => rgb(220, 38, 38),
        (Theme::Light, HighlightColor::Orange) => rgb(234, 88, 12),
        (Theme::Light, HighlightColor::Yellow) => rgb(202, 138, 4),
        (Theme::Light, HighlightColor::Green) => rgb(22, 163, 74),
        (Theme::Light, HighlightColor::Blue) => rgb(37, 99, 235),
        (Theme::Dark, HighlightColor::Red) => rgb(248, 113, 113),
        (Theme::Dark, HighlightColor::Orange) => rgb(251, 146, 60),
        (Theme::Dark, HighlightColor::Yellow) => rgb(250, 204, 21),
        (Theme::Dark, HighlightColor::Green) => rgb(74, 222, 128),
        (Theme::Dark, HighlightColor::Blue) => rgb(96, 165, 250),
    };

    match theme {
        Theme::Light => Palette {
            text: rgb(17, 24, 39),
            muted: rgb(107, 114, 128),
            pivot,
        },
        Theme::Dark => Palette {
            text: rgb(243, 244, 246),
            muted: rgb(156, 163, 175),
            pivot,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_highlight_differs_per_theme() {
        for color in HighlightColor::ALL {
            assert_ne!(
                palette_for(Theme::Light, color).pivot,
                palette_for(Theme::Dark, color).pivot
            );
        }
    }
}
