// Tick rate (one simulation tick per display frame)
pub const TICK_RATE: u32 = 60;

// Arena
pub const ARENA_WIDTH: f32 = 800.0;
pub const ARENA_HEIGHT: f32 = 400.0;
pub const GROUND_OFFSET: f32 = 50.0; // ground line sits this far above the bottom edge
pub const GRAVITY: f32 = 0.5;

// Fighter
pub const FIGHTER_WIDTH: f32 = 40.0;
pub const FIGHTER_HEIGHT: f32 = 80.0;
pub const MAX_HEALTH: u8 = 100;
pub const JUMP_IMPULSE: f32 = -12.0;
pub const MOVE_SPEED: f32 = 5.0;
pub const SPAWN_MARGIN: f32 = 100.0;

// Melee
pub const PUNCH_DAMAGE: u8 = 10;
pub const KICK_DAMAGE: u8 = 15;
pub const PUNCH_COOLDOWN_TICKS: u32 = 20;
pub const KICK_COOLDOWN_TICKS: u32 = 30;
pub const MELEE_RANGE: f32 = 60.0;
pub const MELEE_KNOCKBACK_SCALE: f32 = 0.8;
pub const MELEE_KNOCKBACK_LIFT: f32 = 2.0;

// Fireballs
pub const FIREBALL_DAMAGE: u8 = 20;
pub const FIREBALL_COOLDOWN_TICKS: u32 = 45;
pub const FIREBALL_SPEED: f32 = 8.0;
pub const FIREBALL_SIZE: f32 = 20.0;
pub const FIREBALL_KNOCKBACK: f32 = 12.0;
pub const FIREBALL_KNOCKBACK_LIFT: f32 = 4.0;

// Match flow
pub const ROUNDS_TO_WIN: u8 = 2;
pub const FIGHT_BANNER_DELAY_TICKS: u32 = 90; // 1.5s
pub const ROUND_OVER_DELAY_TICKS: u32 = 120; // 2s
pub const ROUND_INTRO_TICKS: u32 = 90; // 1.5s
pub const MATCH_OVER_DELAY_TICKS: u32 = 120; // 2s

// Display names
pub const DEFAULT_P1_NAME: &str = "Player 1";
pub const DEFAULT_P2_NAME: &str = "Player 2";
pub const COMPUTER_NAME: &str = "Computer";

// Opponent AI
pub const AI_SPEED_FACTOR: f32 = 0.85;
pub const AI_RANGED_MODE_CHANCE: f32 = 0.3;
pub const AI_RANGED_MODE_TICKS: u32 = 120;
pub const AI_NEAR_RANGE: f32 = 150.0;
pub const AI_FAR_RANGE: f32 = 200.0;
pub const AI_FIREBALL_CHANCE: f32 = 0.3;
pub const AI_ENGAGE_RANGE: f32 = 80.0;
pub const AI_PUNCH_THRESHOLD: f32 = 0.25;
pub const AI_KICK_THRESHOLD: f32 = 0.40;
pub const AI_DUCK_THRESHOLD: f32 = 0.50;
pub const AI_DUCK_HOLD_TICKS: u32 = 15;
pub const AI_KICK_EVADE_RANGE: f32 = 70.0;
pub const AI_FIREBALL_EVADE_RANGE: f32 = 100.0;
pub const AI_RANDOM_JUMP_CHANCE: f32 = 0.05;
pub const AI_MAX_DECISION_DELAY: u32 = 3;

// Headless runs
pub const MAX_TICKS: u32 = TICK_RATE * 60 * 5; // 5 minutes
pub const FRAME_INTERVAL: u32 = 2; // every 2nd tick = 30fps
