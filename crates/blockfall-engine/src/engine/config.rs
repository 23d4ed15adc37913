use serde::{Deserialize, Serialize};

use crate::{ConfigError, PieceKind};

/// Tunable parameters of a game.
///
/// Every field has a default, so a config file only needs the fields it
/// changes:
///
/// ```
/// use blockfall_engine::EngineConfig;
///
/// let config: EngineConfig = serde_json::from_str(r#"{ "fall_interval_ms": 250 }"#).unwrap();
/// assert_eq!(config.width, 10);
/// assert_eq!(config.fall_interval_ms, 250);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Number of grid columns.
    pub width: usize,
    /// Number of grid rows.
    pub height: usize,
    /// Milliseconds between gravity steps.
    pub fall_interval_ms: u64,
    /// Score awarded per cleared line, regardless of how many clear at once.
    pub points_per_line: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT,
            fall_interval_ms: Self::DEFAULT_FALL_INTERVAL_MS,
            points_per_line: Self::DEFAULT_POINTS_PER_LINE,
        }
    }
}

impl EngineConfig {
    pub const DEFAULT_WIDTH: usize = 10;
    pub const DEFAULT_HEIGHT: usize = 20;
    pub const DEFAULT_FALL_INTERVAL_MS: u64 = 500;
    pub const DEFAULT_POINTS_PER_LINE: u64 = 100;

    /// Derives the grid size from a board's pixel dimensions and cell size.
    ///
    /// A 300×600 board with 30px cells gives the classic 10×20 grid.
    pub fn from_board_pixels(
        board_width_px: u32,
        board_height_px: u32,
        cell_px: u32,
    ) -> Result<Self, ConfigError> {
        if cell_px == 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        let config = Self {
            width: usize::try_from(board_width_px / cell_px).unwrap_or(usize::MAX),
            height: usize::try_from(board_height_px / cell_px).unwrap_or(usize::MAX),
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks that a game can be played with this config.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fall_interval_ms == 0 {
            return Err(ConfigError::ZeroFallInterval);
        }
        let min_width = PieceKind::ALL
            .iter()
            .map(|kind| kind.shape().cols())
            .max()
            .unwrap_or(1);
        let min_height = PieceKind::ALL
            .iter()
            .map(|kind| kind.shape().rows())
            .max()
            .unwrap_or(1);
        let fits_i32 = i32::try_from(self.width).is_ok() && i32::try_from(self.height).is_ok();
        if self.width < min_width || self.height < min_height || !fits_i32 {
            return Err(ConfigError::GridTooSmall {
                width: self.width,
                height: self.height,
                min_width,
                min_height,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_classic() {
        let config = EngineConfig::default();
        assert_eq!((config.width, config.height), (10, 20));
        assert_eq!(config.fall_interval_ms, 500);
        assert_eq!(config.points_per_line, 100);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_from_board_pixels() {
        let config = EngineConfig::from_board_pixels(300, 600, 30).unwrap();
        assert_eq!(config, EngineConfig::default());

        let config = EngineConfig::from_board_pixels(250, 410, 25).unwrap();
        assert_eq!((config.width, config.height), (10, 16));

        assert_eq!(
            EngineConfig::from_board_pixels(300, 600, 0),
            Err(ConfigError::ZeroCellSize)
        );
        assert!(matches!(
            EngineConfig::from_board_pixels(60, 600, 30),
            Err(ConfigError::GridTooSmall { width: 2, .. })
        ));
    }

    #[test]
    fn test_validate_rejects_zero_interval() {
        let config = EngineConfig {
            fall_interval_ms: 0,
            ..EngineConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroFallInterval));
    }

    #[test]
    fn test_validate_rejects_tiny_grid() {
        let config = EngineConfig {
            width: 3,
            height: 1,
            ..EngineConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::GridTooSmall {
                width: 3,
                height: 1,
                min_width: 3,
                min_height: 2,
            })
        );
    }

    #[test]
    fn test_deserialize_partial_and_unknown_fields() {
        let config: EngineConfig = serde_json::from_str(r#"{ "width": 12 }"#).unwrap();
        assert_eq!(config.width, 12);
        assert_eq!(config.height, 20);

        let result: Result<EngineConfig, _> = serde_json::from_str(r#"{ "speed": 3 }"#);
        assert!(result.is_err());
    }
}
