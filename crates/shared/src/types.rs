use serde::{Deserialize, Serialize};

use crate::config::GameConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player1,
    Player2,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Player1, Side::Player2];

    pub fn index(self) -> usize {
        match self {
            Side::Player1 => 0,
            Side::Player2 => 1,
        }
    }

    pub fn opponent(self) -> Side {
        match self {
            Side::Player1 => Side::Player2,
            Side::Player2 => Side::Player1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    /// -1.0 for left, 1.0 for right.
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    pub fn from_sign(value: f32) -> Option<Facing> {
        if value > 0.0 {
            Some(Facing::Right)
        } else if value < 0.0 {
            Some(Facing::Left)
        } else {
            None
        }
    }
}

/// Dominant pose of a fighter, for drawing. Ducking can overlap with an
/// attack or a jump; the snapshot carries the individual flags as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionState {
    Idle,
    Ducking,
    Punching,
    Kicking,
    Jumping,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    StartScreen,
    InRound,
    RoundOver,
    MatchOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchMode {
    /// Two humans on one keyboard.
    Versus,
    /// Player2 is driven by the opponent AI.
    VsComputer,
    /// Both sides are AI; used for headless runs.
    Demo,
}

impl MatchMode {
    pub fn is_ai(self, side: Side) -> bool {
        match self {
            MatchMode::Versus => false,
            MatchMode::VsComputer => side == Side::Player2,
            MatchMode::Demo => true,
        }
    }
}

/// Centre-screen text shown by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Banner {
    Round(u32),
    Fight,
    Knockout,
    Winner(Side),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SoundCue {
    PunchThrown,
    KickThrown,
    FireballLaunched,
    HitLanded,
    Knockout,
    RoundStart,
    Fight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    Sound { cue: SoundCue },
    RoundStarted { round: u32 },
    RoundOver { round: u32, winner: Side },
    MatchOver { winner: Side },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FighterSnapshot {
    pub side: Side,
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub width: f32,
    pub height: f32,
    pub health: u8,
    pub facing: Facing,
    pub action: ActionState,
    pub ducking: bool,
    pub punching: bool,
    pub kicking: bool,
    pub airborne: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileSnapshot {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub speed: f32,
    pub owner: Side,
}

/// Everything the presentation layer needs to draw one frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayFrame {
    pub tick: u64,
    pub phase: Phase,
    pub paused: bool,
    pub round: u32,
    pub wins: [u8; 2],
    pub banner: Option<Banner>,
    pub fighters: [FighterSnapshot; 2],
    pub projectiles: Vec<ProjectileSnapshot>,
    /// Events emitted since the previous recorded frame.
    pub events: Vec<GameEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Replay {
    pub config: MatchConfig,
    pub frames: Vec<ReplayFrame>,
    pub result: MatchResult,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchConfig {
    pub seed: u64,
    pub p1_name: String,
    pub p2_name: String,
    pub max_ticks: u32,
    pub frame_interval: u32,
    pub game: GameConfig,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            p1_name: crate::DEFAULT_P1_NAME.into(),
            p2_name: crate::DEFAULT_P2_NAME.into(),
            max_ticks: crate::MAX_TICKS,
            frame_interval: crate::FRAME_INTERVAL,
            game: GameConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    Player1Win,
    Player2Win,
    /// The tick cap was hit before either side won enough rounds.
    Unfinished,
}

impl MatchOutcome {
    pub fn from_winner(winner: Option<Side>) -> Self {
        match winner {
            Some(Side::Player1) => MatchOutcome::Player1Win,
            Some(Side::Player2) => MatchOutcome::Player2Win,
            None => MatchOutcome::Unfinished,
        }
    }

    pub fn winner(self) -> Option<Side> {
        match self {
            MatchOutcome::Player1Win => Some(Side::Player1),
            MatchOutcome::Player2Win => Some(Side::Player2),
            MatchOutcome::Unfinished => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    pub outcome: MatchOutcome,
    pub rounds_played: u32,
    pub wins: [u8; 2],
    pub final_tick: u64,
    pub stats: MatchStats,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideStats {
    pub punches_thrown: u32,
    pub kicks_thrown: u32,
    pub melee_hits: u32,
    pub fireballs_launched: u32,
    pub fireball_hits: u32,
    /// Incoming hits that would have landed but for ducking.
    pub attacks_evaded: u32,
    pub damage_dealt: u32,
}

impl SideStats {
    pub fn hits(&self) -> u32 {
        self.melee_hits + self.fireball_hits
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchStats {
    pub player1: SideStats,
    pub player2: SideStats,
}

impl MatchStats {
    pub fn side(&self, side: Side) -> &SideStats {
        match side {
            Side::Player1 => &self.player1,
            Side::Player2 => &self.player2,
        }
    }

    pub fn side_mut(&mut self, side: Side) -> &mut SideStats {
        match side {
            Side::Player1 => &mut self.player1,
            Side::Player2 => &mut self.player2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_opponent_and_index() {
        assert_eq!(Side::Player1.opponent(), Side::Player2);
        assert_eq!(Side::Player2.opponent(), Side::Player1);
        assert_eq!(Side::Player1.index(), 0);
        assert_eq!(Side::Player2.index(), 1);
    }

    #[test]
    fn test_facing_from_sign() {
        assert_eq!(Facing::from_sign(3.0), Some(Facing::Right));
        assert_eq!(Facing::from_sign(-0.5), Some(Facing::Left));
        assert_eq!(Facing::from_sign(0.0), None);
    }

    #[test]
    fn test_mode_ai_sides() {
        assert!(!MatchMode::Versus.is_ai(Side::Player2));
        assert!(MatchMode::VsComputer.is_ai(Side::Player2));
        assert!(!MatchMode::VsComputer.is_ai(Side::Player1));
        assert!(MatchMode::Demo.is_ai(Side::Player1));
    }

    #[test]
    fn test_sound_cue_wire_names() {
        let json = serde_json::to_string(&GameEvent::Sound {
            cue: SoundCue::FireballLaunched,
        })
        .unwrap();
        assert_eq!(json, r#"{"type":"sound","cue":"fireball-launched"}"#);
    }
}
