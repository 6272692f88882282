//! Tunable timing and geometry for a session.
//!
//! Defaults reproduce the built-in constants from the types crate. With the
//! `serde` feature enabled the struct (de)serializes with every field optional,
//! so partial config files work.

use crate::types::{
    ACCELERATED_FALL_MS, FALL_DELAYS_MS, FIELD_HEIGHT, FIELD_WIDTH, LEVEL_COUNT, LEVEL_DIVISOR,
    MOVE_DELAY_MS, ROTATE_DELAY_MS, SPAWN_COLUMN_OFFSET,
};

/// Narrowest field a piece can spawn into: layouts span columns 0..=1 before
/// the spawn offset.
pub const MIN_FIELD_WIDTH: u16 = SPAWN_COLUMN_OFFSET as u16 + 2;

/// Shortest field; the upright I needs four rows.
pub const MIN_FIELD_HEIGHT: u16 = 4;

/// Largest field edge accepted from a config file.
pub const MAX_FIELD_EDGE: u16 = 64;

/// Session tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    pub move_delay_ms: u32,
    pub rotate_delay_ms: u32,
    /// Fall delay while soft drop is held
    pub accelerated_fall_ms: u32,
    /// Fall delay per level, index = level
    pub fall_delays_ms: [u32; LEVEL_COUNT],
    /// Score per level step
    pub level_divisor: u32,
    pub field_width: u16,
    pub field_height: u16,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            move_delay_ms: MOVE_DELAY_MS,
            rotate_delay_ms: ROTATE_DELAY_MS,
            accelerated_fall_ms: ACCELERATED_FALL_MS,
            fall_delays_ms: FALL_DELAYS_MS,
            level_divisor: LEVEL_DIVISOR,
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
        }
    }
}

impl GameConfig {
    /// Fall threshold for `level`, or the accelerated one while soft dropping.
    pub fn fall_delay_ms(&self, level: u32, soft_drop: bool) -> u32 {
        if soft_drop {
            return self.accelerated_fall_ms;
        }
        let idx = (level as usize).min(LEVEL_COUNT - 1);
        self.fall_delays_ms[idx]
    }

    /// Repair values a hand-edited config could get wrong.
    ///
    /// Delays become at least 1ms, the fall table is forced non-increasing,
    /// the level divisor is at least 1 and the field is clamped between
    /// [`MIN_FIELD_WIDTH`]x[`MIN_FIELD_HEIGHT`] and [`MAX_FIELD_EDGE`] on
    /// either side.
    pub fn sanitized(mut self) -> Self {
        self.move_delay_ms = self.move_delay_ms.max(1);
        self.rotate_delay_ms = self.rotate_delay_ms.max(1);
        self.accelerated_fall_ms = self.accelerated_fall_ms.max(1);
        let mut ceiling = u32::MAX;
        for delay in &mut self.fall_delays_ms {
            *delay = (*delay).clamp(1, ceiling);
            ceiling = *delay;
        }
        self.level_divisor = self.level_divisor.max(1);
        self.field_width = self.field_width.clamp(MIN_FIELD_WIDTH, MAX_FIELD_EDGE);
        self.field_height = self.field_height.clamp(MIN_FIELD_HEIGHT, MAX_FIELD_EDGE);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fall_delay_follows_level_table() {
        let config = GameConfig::default();
        assert_eq!(config.fall_delay_ms(0, false), 400);
        assert_eq!(config.fall_delay_ms(9, false), 35);
        // Levels past the table reuse the last entry.
        assert_eq!(config.fall_delay_ms(42, false), 35);
    }

    #[test]
    fn test_soft_drop_overrides_level() {
        let config = GameConfig::default();
        for level in 0..10 {
            assert_eq!(config.fall_delay_ms(level, true), ACCELERATED_FALL_MS);
        }
    }

    #[test]
    fn test_sanitized_repairs_bad_values() {
        let config = GameConfig {
            move_delay_ms: 0,
            rotate_delay_ms: 0,
            accelerated_fall_ms: 0,
            fall_delays_ms: [400, 450, 400, 350, 300, 0, 200, 150, 100, 50],
            level_divisor: 0,
            field_width: 1,
            field_height: 2,
        }
        .sanitized();

        assert_eq!(config.move_delay_ms, 1);
        assert_eq!(config.rotate_delay_ms, 1);
        assert_eq!(config.accelerated_fall_ms, 1);
        assert_eq!(config.fall_delays_ms, [400, 400, 400, 350, 300, 1, 1, 1, 1, 1]);
        assert_eq!(config.level_divisor, 1);
        assert_eq!((config.field_width, config.field_height), (6, 4));
    }

    #[test]
    fn test_sanitized_field_leaves_room_to_spawn() {
        for width in [0, 4, 5] {
            let config = GameConfig {
                field_width: width,
                ..GameConfig::default()
            }
            .sanitized();
            assert_eq!(config.field_width, MIN_FIELD_WIDTH);
        }
        // Columns 4 and 5 hold every spawned layout.
        assert!(i32::from(MIN_FIELD_WIDTH) > SPAWN_COLUMN_OFFSET + 1);
    }

    #[test]
    fn test_sanitized_caps_huge_fields() {
        let config = GameConfig {
            field_width: 65530,
            field_height: u16::MAX,
            ..GameConfig::default()
        }
        .sanitized();
        assert_eq!(
            (config.field_width, config.field_height),
            (MAX_FIELD_EDGE, MAX_FIELD_EDGE)
        );
    }

    #[test]
    fn test_default_is_already_sane() {
        assert_eq!(GameConfig::default().sanitized(), GameConfig::default());
    }
}
