use stickbrawl_shared::*;

use crate::command::Command;
use crate::fighter::Fighter;
use crate::projectile::Projectile;
use crate::rng::RandomSource;

/// Scripted opponent. Alternates between a melee mode that closes in and
/// trades blows, and a ranged mode that holds a distance band and throws
/// fireballs. Decisions are spaced out by a short random delay so it reads
/// as human-ish rather than frame-perfect.
///
/// All state is per round; the match controller builds a fresh controller
/// whenever a round starts.
#[derive(Debug, Clone)]
pub struct OpponentController {
    side: Side,
    config: AiConfig,
    decision_delay: u32,
    action_duration: u32,
    ranged_mode: bool,
    ranged_mode_timer: u32,
}

impl OpponentController {
    pub fn new(side: Side, config: &AiConfig) -> Self {
        Self {
            side,
            config: *config,
            decision_delay: 0,
            action_duration: 0,
            ranged_mode: false,
            ranged_mode_timer: 0,
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn is_ranged_mode(&self) -> bool {
        self.ranged_mode
    }

    pub fn decision_delay(&self) -> u32 {
        self.decision_delay
    }

    pub fn action_duration(&self) -> u32 {
        self.action_duration
    }

    /// Decide this tick's commands for `me`.
    pub fn update(
        &mut self,
        me: &Fighter,
        opponent: &Fighter,
        projectiles: &[Projectile],
        rng: &mut dyn RandomSource,
    ) -> Vec<Command> {
        let mut commands = Vec::new();

        // Timers run every tick, even while a decision is pending
        if self.ranged_mode_timer == 0 {
            self.ranged_mode = rng.next_unit() < self.config.ranged_mode_chance;
            self.ranged_mode_timer = self.config.ranged_mode_ticks.max(1);
        }
        self.ranged_mode_timer -= 1;
        if self.action_duration > 0 {
            self.action_duration -= 1;
        }

        if self.decision_delay > 0 {
            self.decision_delay -= 1;
            return commands;
        }

        let my_x = me.position().x;
        let their_x = opponent.position().x;
        let distance = (my_x - their_x).abs();
        let toward = if my_x > their_x { Facing::Left } else { Facing::Right };
        let away = if my_x < their_x { Facing::Left } else { Facing::Right };
        let in_band = distance >= self.config.near_range && distance <= self.config.far_range;

        commands.push(self.movement(distance, toward, away));

        if self.action_duration == 0 {
            let roll = rng.next_unit();

            if self.ranged_mode {
                if in_band && roll < self.config.fireball_chance {
                    commands.push(Command::Shoot);
                }
            } else if distance < self.config.engage_range {
                if roll < self.config.punch_threshold {
                    commands.push(Command::Punch);
                } else if roll < self.config.kick_threshold {
                    commands.push(Command::Kick);
                } else if roll < self.config.duck_threshold {
                    commands.push(Command::DuckFor(self.config.duck_hold_ticks));
                    self.action_duration = self.config.duck_hold_ticks;
                }
            }

            if self.should_jump(me, opponent, projectiles, distance, roll) {
                commands.push(Command::Jump);
            }
        }

        let max_delay = self.config.max_decision_delay.max(1);
        let delay = (rng.next_unit() * max_delay as f32).floor() as u32 + 1;
        self.decision_delay = delay.min(max_delay);

        commands
    }

    fn movement(&self, distance: f32, toward: Facing, away: Facing) -> Command {
        let speed_scale = self.config.speed_factor;
        if !self.ranged_mode {
            return Command::Walk {
                direction: toward,
                speed_scale,
            };
        }
        if distance < self.config.near_range {
            Command::Walk {
                direction: away,
                speed_scale,
            }
        } else if distance > self.config.far_range {
            Command::Walk {
                direction: toward,
                speed_scale,
            }
        } else {
            Command::Halt
        }
    }

    fn should_jump(
        &self,
        me: &Fighter,
        opponent: &Fighter,
        projectiles: &[Projectile],
        distance: f32,
        roll: f32,
    ) -> bool {
        let kick_incoming = opponent.is_kicking() && distance < self.config.kick_evade_range;
        let fireball_incoming = projectiles.iter().any(|p| {
            p.owner() != self.side
                && (p.position().x - me.position().x).abs() < self.config.fireball_evade_range
        });
        kick_incoming || fireball_incoming || roll < self.config.random_jump_chance
    }
}
