use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be positive")]
    NonPositive(&'static str),
    #[error("jump impulse must point upward (negative), got {0}")]
    JumpNotUpward(f32),
    #[error("{0} must be a probability in [0, 1], got {1}")]
    Probability(&'static str, f32),
    #[error("keep-range band is inverted: near {near} > far {far}")]
    InvertedBand { near: f32, far: f32 },
    #[error("melee thresholds must be non-decreasing: punch {punch} <= kick {kick} <= duck {duck}")]
    MeleeThresholds { punch: f32, kick: f32, duck: f32 },
    #[error("arena width {arena} cannot fit both fighters with spawn margin {margin}")]
    SpawnOutsideArena { arena: f32, margin: f32 },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Opponent AI tuning. Melee thresholds are cumulative: a roll below
/// `punch_threshold` punches, below `kick_threshold` kicks, below
/// `duck_threshold` ducks, anything else does nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub speed_factor: f32,
    pub ranged_mode_chance: f32,
    pub ranged_mode_ticks: u32,
    pub near_range: f32,
    pub far_range: f32,
    pub fireball_chance: f32,
    pub engage_range: f32,
    pub punch_threshold: f32,
    pub kick_threshold: f32,
    pub duck_threshold: f32,
    pub duck_hold_ticks: u32,
    pub kick_evade_range: f32,
    pub fireball_evade_range: f32,
    pub random_jump_chance: f32,
    pub max_decision_delay: u32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            speed_factor: AI_SPEED_FACTOR,
            ranged_mode_chance: AI_RANGED_MODE_CHANCE,
            ranged_mode_ticks: AI_RANGED_MODE_TICKS,
            near_range: AI_NEAR_RANGE,
            far_range: AI_FAR_RANGE,
            fireball_chance: AI_FIREBALL_CHANCE,
            engage_range: AI_ENGAGE_RANGE,
            punch_threshold: AI_PUNCH_THRESHOLD,
            kick_threshold: AI_KICK_THRESHOLD,
            duck_threshold: AI_DUCK_THRESHOLD,
            duck_hold_ticks: AI_DUCK_HOLD_TICKS,
            kick_evade_range: AI_KICK_EVADE_RANGE,
            fireball_evade_range: AI_FIREBALL_EVADE_RANGE,
            random_jump_chance: AI_RANDOM_JUMP_CHANCE,
            max_decision_delay: AI_MAX_DECISION_DELAY,
        }
    }
}

/// Tuning for one match. Fixed once the match controller is built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub arena_width: f32,
    pub arena_height: f32,
    pub ground_offset: f32,
    pub gravity: f32,
    pub jump_impulse: f32,
    pub move_speed: f32,
    pub fighter_width: f32,
    pub fighter_height: f32,
    pub max_health: u8,
    pub spawn_margin: f32,

    pub punch_damage: u8,
    pub kick_damage: u8,
    pub punch_cooldown_ticks: u32,
    pub kick_cooldown_ticks: u32,
    pub melee_range: f32,
    pub melee_knockback_scale: f32,
    pub melee_knockback_lift: f32,

    pub fireball_damage: u8,
    pub fireball_cooldown_ticks: u32,
    pub fireball_speed: f32,
    pub fireball_size: f32,
    pub fireball_knockback: f32,
    pub fireball_knockback_lift: f32,

    /// Ducking also refuses punch, kick and fireball.
    pub duck_blocks_attacks: bool,

    pub rounds_to_win: u8,
    pub fight_banner_delay_ticks: u32,
    pub round_over_delay_ticks: u32,
    pub round_intro_ticks: u32,
    pub match_over_delay_ticks: u32,

    pub ai: AiConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            ground_offset: GROUND_OFFSET,
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            move_speed: MOVE_SPEED,
            fighter_width: FIGHTER_WIDTH,
            fighter_height: FIGHTER_HEIGHT,
            max_health: MAX_HEALTH,
            spawn_margin: SPAWN_MARGIN,
            punch_damage: PUNCH_DAMAGE,
            kick_damage: KICK_DAMAGE,
            punch_cooldown_ticks: PUNCH_COOLDOWN_TICKS,
            kick_cooldown_ticks: KICK_COOLDOWN_TICKS,
            melee_range: MELEE_RANGE,
            melee_knockback_scale: MELEE_KNOCKBACK_SCALE,
            melee_knockback_lift: MELEE_KNOCKBACK_LIFT,
            fireball_damage: FIREBALL_DAMAGE,
            fireball_cooldown_ticks: FIREBALL_COOLDOWN_TICKS,
            fireball_speed: FIREBALL_SPEED,
            fireball_size: FIREBALL_SIZE,
            fireball_knockback: FIREBALL_KNOCKBACK,
            fireball_knockback_lift: FIREBALL_KNOCKBACK_LIFT,
            duck_blocks_attacks: false,
            rounds_to_win: ROUNDS_TO_WIN,
            fight_banner_delay_ticks: FIGHT_BANNER_DELAY_TICKS,
            round_over_delay_ticks: ROUND_OVER_DELAY_TICKS,
            round_intro_ticks: ROUND_INTRO_TICKS,
            match_over_delay_ticks: MATCH_OVER_DELAY_TICKS,
            ai: AiConfig::default(),
        }
    }
}

impl GameConfig {
    /// Y coordinate of the ground line (y grows downward).
    pub fn ground_y(&self) -> f32 {
        self.arena_height - self.ground_offset
    }

    /// Rightmost legal x for a fighter's left edge.
    pub fn max_fighter_x(&self) -> f32 {
        self.arena_width - self.fighter_width
    }

    /// Left edge of each side's spawn point: `[player1, player2]`.
    pub fn spawn_x(&self) -> [f32; 2] {
        [
            self.spawn_margin,
            self.arena_width - self.spawn_margin - self.fighter_width,
        ]
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positives = [
            ("arena_width", self.arena_width),
            ("arena_height", self.arena_height),
            ("gravity", self.gravity),
            ("move_speed", self.move_speed),
            ("fighter_width", self.fighter_width),
            ("fighter_height", self.fighter_height),
            ("melee_range", self.melee_range),
            ("fireball_speed", self.fireball_speed),
            ("fireball_size", self.fireball_size),
            ("ai.speed_factor", self.ai.speed_factor),
        ];
        for (name, value) in positives {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive(name));
            }
        }
        if self.max_health == 0 {
            return Err(ConfigError::NonPositive("max_health"));
        }
        if self.rounds_to_win == 0 {
            return Err(ConfigError::NonPositive("rounds_to_win"));
        }
        if self.ai.max_decision_delay == 0 {
            return Err(ConfigError::NonPositive("ai.max_decision_delay"));
        }
        if self.ai.ranged_mode_ticks == 0 {
            return Err(ConfigError::NonPositive("ai.ranged_mode_ticks"));
        }
        if self.ground_offset < 0.0 || self.ground_offset >= self.arena_height {
            return Err(ConfigError::NonPositive("arena_height - ground_offset"));
        }
        if !(self.jump_impulse < 0.0) {
            return Err(ConfigError::JumpNotUpward(self.jump_impulse));
        }

        let probabilities = [
            ("ai.ranged_mode_chance", self.ai.ranged_mode_chance),
            ("ai.fireball_chance", self.ai.fireball_chance),
            ("ai.punch_threshold", self.ai.punch_threshold),
            ("ai.kick_threshold", self.ai.kick_threshold),
            ("ai.duck_threshold", self.ai.duck_threshold),
            ("ai.random_jump_chance", self.ai.random_jump_chance),
        ];
        for (name, p) in probabilities {
            if !(0.0..=1.0).contains(&p) {
                return Err(ConfigError::Probability(name, p));
            }
        }
        let ai = &self.ai;
        if ai.punch_threshold > ai.kick_threshold || ai.kick_threshold > ai.duck_threshold {
            return Err(ConfigError::MeleeThresholds {
                punch: ai.punch_threshold,
                kick: ai.kick_threshold,
                duck: ai.duck_threshold,
            });
        }
        if ai.near_range > ai.far_range {
            return Err(ConfigError::InvertedBand {
                near: ai.near_range,
                far: ai.far_range,
            });
        }

        let [left, right] = self.spawn_x();
        if self.spawn_margin < 0.0 || right < left || right > self.max_fighter_x() {
            return Err(ConfigError::SpawnOutsideArena {
                arena: self.arena_width,
                margin: self.spawn_margin,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.ground_y(), 350.0);
        assert_eq!(config.spawn_x(), [100.0, 660.0]);
    }

    #[test]
    fn test_partial_json_overrides_defaults() {
        let config =
            GameConfig::from_json_str(r#"{ "melee_range": 75.0, "ai": { "duck_hold_ticks": 30 } }"#)
                .expect("partial config should parse");
        assert_eq!(config.melee_range, 75.0);
        assert_eq!(config.ai.duck_hold_ticks, 30);
        assert_eq!(config.punch_damage, PUNCH_DAMAGE);
        assert_eq!(config.ai.near_range, AI_NEAR_RANGE);
    }

    #[test]
    fn test_rejects_inverted_band() {
        let mut config = GameConfig::default();
        config.ai.near_range = 250.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvertedBand { .. })
        ));
    }

    #[test]
    fn test_rejects_bad_probability() {
        let mut config = GameConfig::default();
        config.ai.fireball_chance = 1.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Probability("ai.fireball_chance", _))
        ));
    }

    #[test]
    fn test_rejects_downward_jump() {
        let config = GameConfig {
            jump_impulse: 3.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::JumpNotUpward(_))));
    }

    #[test]
    fn test_rejects_unordered_melee_thresholds() {
        let mut config = GameConfig::default();
        config.ai.kick_threshold = 0.1;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MeleeThresholds { .. })
        ));
    }

    #[test]
    fn test_rejects_spawn_outside_arena() {
        let config = GameConfig {
            spawn_margin: 500.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SpawnOutsideArena { .. })
        ));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        assert!(matches!(
            GameConfig::from_json_str("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
