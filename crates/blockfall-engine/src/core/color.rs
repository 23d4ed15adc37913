use serde::{Deserialize, Serialize};

/// Color tag carried by a piece and written into the grid when it locks.
///
/// Each [`PieceKind`](super::PieceKind) owns exactly one color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Cyan,
    Yellow,
    Purple,
    Green,
    Red,
    Blue,
    Orange,
}

impl Color {
    /// Returns the 8-bit RGB triple a renderer should paint this color with.
    #[must_use]
    pub const fn rgb(self) -> (u8, u8, u8) {
        match self {
            Color::Cyan => (0, 255, 255),
            Color::Yellow => (255, 255, 0),
            Color::Purple => (128, 0, 128),
            Color::Green => (0, 255, 0),
            Color::Red => (255, 0, 0),
            Color::Blue => (0, 0, 255),
            Color::Orange => (255, 165, 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_values_are_distinct() {
        let colors = [
            Color::Cyan,
            Color::Yellow,
            Color::Purple,
            Color::Green,
            Color::Red,
            Color::Blue,
            Color::Orange,
        ];
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a.rgb(), b.rgb(), "{a:?} and {b:?} share an RGB value");
            }
        }
    }

    #[test]
    fn test_color_serializes_as_snake_case() {
        assert_eq!(serde_json::to_string(&Color::Orange).unwrap(), "\"orange\"");
        let color: Color = serde_json::from_str("\"purple\"").unwrap();
        assert_eq!(color, Color::Purple);
    }
}
