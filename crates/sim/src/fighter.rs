use glam::Vec2;
use stickbrawl_shared::*;

use crate::physics::Body;
use crate::projectile::Projectile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attack {
    Punch,
    Kick,
}

/// Duck state. Keyboard ducking is held until released; AI ducking carries
/// its own deadline so both paths clear the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Duck {
    Standing,
    Held,
    Timed(u32),
}

#[derive(Debug, Clone)]
pub struct Fighter {
    side: Side,
    config: GameConfig,
    body: Body,
    health: u8,
    facing: Facing,
    attack: Option<Attack>,
    attack_cooldown: u32,
    fireball_cooldown: u32,
    duck: Duck,
}

impl Fighter {
    /// Fighter standing at its side's spawn point, facing the middle.
    pub fn new(side: Side, config: &GameConfig) -> Self {
        Self::at(side, config.spawn_x()[side.index()], config)
    }

    /// Fighter standing on the ground with its left edge at `x`.
    pub fn at(side: Side, x: f32, config: &GameConfig) -> Self {
        let facing = match side {
            Side::Player1 => Facing::Right,
            Side::Player2 => Facing::Left,
        };
        let x = x.clamp(0.0, config.max_fighter_x().max(0.0));
        Self {
            side,
            config: *config,
            body: Body::standing_at(x, config),
            health: config.max_health,
            facing,
            attack: None,
            attack_cooldown: 0,
            fireball_cooldown: 0,
            duck: Duck::Standing,
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn health(&self) -> u8 {
        self.health
    }

    pub fn is_knocked_out(&self) -> bool {
        self.health == 0
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.body.velocity
    }

    pub fn width(&self) -> f32 {
        self.body.size.x
    }

    pub fn height(&self) -> f32 {
        self.body.size.y
    }

    pub fn center_x(&self) -> f32 {
        self.body.center_x()
    }

    pub fn is_airborne(&self) -> bool {
        self.body.airborne
    }

    pub fn is_ducking(&self) -> bool {
        self.duck != Duck::Standing
    }

    pub fn is_punching(&self) -> bool {
        self.attack == Some(Attack::Punch)
    }

    pub fn is_kicking(&self) -> bool {
        self.attack == Some(Attack::Kick)
    }

    pub fn attack_cooldown(&self) -> u32 {
        self.attack_cooldown
    }

    pub fn fireball_cooldown(&self) -> u32 {
        self.fireball_cooldown
    }

    pub fn action_state(&self) -> ActionState {
        match self.attack {
            Some(Attack::Punch) => ActionState::Punching,
            Some(Attack::Kick) => ActionState::Kicking,
            None if self.body.airborne => ActionState::Jumping,
            None if self.is_ducking() => ActionState::Ducking,
            None => ActionState::Idle,
        }
    }

    /// Walk in `direction` at `speed_scale` times the configured move speed.
    pub fn walk(&mut self, direction: Facing, speed_scale: f32) {
        self.body.velocity.x = direction.sign() * self.config.move_speed * speed_scale;
        self.facing = direction;
    }

    /// Stop walking, but only if still moving in `direction`.
    pub fn stop_walking(&mut self, direction: Facing) {
        if Facing::from_sign(self.body.velocity.x) == Some(direction) {
            self.body.velocity.x = 0.0;
        }
    }

    pub fn halt(&mut self) {
        self.body.velocity.x = 0.0;
    }

    pub fn jump(&mut self) -> bool {
        if self.body.airborne {
            return false;
        }
        self.body.velocity.y = self.config.jump_impulse;
        self.body.airborne = true;
        true
    }

    pub fn punch(&mut self) -> bool {
        self.start_attack(Attack::Punch, self.config.punch_cooldown_ticks)
    }

    pub fn kick(&mut self) -> bool {
        self.start_attack(Attack::Kick, self.config.kick_cooldown_ticks)
    }

    fn start_attack(&mut self, attack: Attack, cooldown: u32) -> bool {
        if self.attack_cooldown > 0 || !self.can_attack() {
            return false;
        }
        self.attack = Some(attack);
        self.attack_cooldown = cooldown;
        true
    }

    fn can_attack(&self) -> bool {
        !(self.config.duck_blocks_attacks && self.is_ducking())
    }

    /// Launch a fireball from the front edge, moving the way we face.
    pub fn shoot_fireball(&mut self) -> Option<Projectile> {
        if self.fireball_cooldown > 0 || !self.can_attack() {
            return None;
        }
        self.fireball_cooldown = self.config.fireball_cooldown_ticks;

        let front_x = match self.facing {
            Facing::Right => self.body.position.x + self.body.size.x,
            Facing::Left => self.body.position.x,
        };
        let y = self.body.position.y - self.body.size.y / 2.0;
        Some(Projectile::new(
            Vec2::new(front_x, y),
            self.facing,
            self.side,
            &self.config,
        ))
    }

    pub fn hold_duck(&mut self) {
        self.duck = Duck::Held;
    }

    pub fn release_duck(&mut self) {
        self.duck = Duck::Standing;
    }

    /// Duck for exactly `ticks` fighter ticks.
    pub fn duck_for(&mut self, ticks: u32) {
        if ticks > 0 {
            self.duck = Duck::Timed(ticks);
        }
    }

    /// Apply damage and knockback. Returns true if this knocked us out.
    pub fn take_hit(&mut self, damage: u8, knockback: Vec2) -> bool {
        self.health = self.health.saturating_sub(damage);
        self.body.velocity = knockback;
        self.health == 0
    }

    /// Advance one tick: physics first, then cooldowns, duck deadline and facing.
    pub fn tick(&mut self) {
        self.body.step(&self.config);

        if self.attack_cooldown > 0 {
            self.attack_cooldown -= 1;
            if self.attack_cooldown == 0 {
                self.attack = None;
            }
        }
        if self.fireball_cooldown > 0 {
            self.fireball_cooldown -= 1;
        }
        if let Duck::Timed(remaining) = self.duck {
            self.duck = if remaining <= 1 {
                Duck::Standing
            } else {
                Duck::Timed(remaining - 1)
            };
        }
        if let Some(facing) = Facing::from_sign(self.body.velocity.x) {
            self.facing = facing;
        }

        debug_assert!(self.health <= self.config.max_health);
        debug_assert!(
            self.body.position.x >= 0.0
                && self.body.position.x <= self.config.max_fighter_x().max(0.0)
        );
        debug_assert!(self.body.position.y <= self.config.ground_y());
    }

    pub fn snapshot(&self) -> FighterSnapshot {
        FighterSnapshot {
            side: self.side,
            x: self.body.position.x,
            y: self.body.position.y,
            vx: self.body.velocity.x,
            vy: self.body.velocity.y,
            width: self.body.size.x,
            height: self.body.size.y,
            health: self.health,
            facing: self.facing,
            action: self.action_state(),
            ducking: self.is_ducking(),
            punching: self.is_punching(),
            kicking: self.is_kicking(),
            airborne: self.body.airborne,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fighter() -> Fighter {
        Fighter::new(Side::Player1, &GameConfig::default())
    }

    #[test]
    fn test_spawn_positions_and_facing() {
        let config = GameConfig::default();
        let p1 = Fighter::new(Side::Player1, &config);
        let p2 = Fighter::new(Side::Player2, &config);
        assert_eq!(p1.position(), Vec2::new(100.0, 350.0));
        assert_eq!(p2.position(), Vec2::new(660.0, 350.0));
        assert_eq!(p1.facing(), Facing::Right);
        assert_eq!(p2.facing(), Facing::Left);
        assert_eq!(p1.health(), MAX_HEALTH);
    }

    #[test]
    fn test_punch_starts_cooldown_and_blocks_until_expired() {
        let mut f = fighter();
        assert!(f.punch());
        assert!(f.is_punching());
        assert_eq!(f.attack_cooldown(), PUNCH_COOLDOWN_TICKS);
        assert!(!f.punch());
        assert!(!f.kick(), "punch and kick share one cooldown");

        for _ in 0..PUNCH_COOLDOWN_TICKS - 1 {
            f.tick();
            assert!(!f.punch());
        }
        f.tick();
        assert_eq!(f.attack_cooldown(), 0);
        assert!(!f.is_punching(), "cooldown expiry clears the attack pose");
        assert!(f.punch());
    }

    #[test]
    fn test_kick_cooldown_longer_than_punch() {
        let mut f = fighter();
        assert!(f.kick());
        assert!(f.is_kicking());
        assert_eq!(f.attack_cooldown(), KICK_COOLDOWN_TICKS);
        assert!(KICK_COOLDOWN_TICKS > PUNCH_COOLDOWN_TICKS);
    }

    #[test]
    fn test_fireball_cooldown_independent_of_melee() {
        let mut f = fighter();
        assert!(f.punch());
        let fireball = f.shoot_fireball().expect("fireball ready");
        assert_eq!(fireball.owner(), Side::Player1);
        assert_eq!(fireball.position().x, 140.0, "spawns at the right edge");
        assert_eq!(fireball.position().y, 310.0);
        assert!(fireball.speed() > 0.0);
        assert_eq!(f.fireball_cooldown(), FIREBALL_COOLDOWN_TICKS);
        assert!(f.shoot_fireball().is_none());

        for _ in 0..FIREBALL_COOLDOWN_TICKS {
            f.tick();
        }
        assert!(f.shoot_fireball().is_some());
    }

    #[test]
    fn test_fireball_leaves_from_left_edge_when_facing_left() {
        let config = GameConfig::default();
        let mut f = Fighter::new(Side::Player2, &config);
        let fireball = f.shoot_fireball().unwrap();
        assert_eq!(fireball.position().x, 660.0);
        assert!(fireball.speed() < 0.0);
    }

    #[test]
    fn test_jump_is_noop_while_airborne() {
        let mut f = fighter();
        assert!(f.jump());
        f.tick();
        assert!(f.is_airborne());
        let vy = f.velocity().y;
        assert!(!f.jump());
        assert_eq!(f.velocity().y, vy);
    }

    #[test]
    fn test_facing_follows_velocity_and_persists_at_rest() {
        let mut f = fighter();
        f.walk(Facing::Left, 1.0);
        f.tick();
        assert_eq!(f.facing(), Facing::Left);
        f.halt();
        f.tick();
        assert_eq!(f.facing(), Facing::Left);
    }

    #[test]
    fn test_stop_walking_only_cancels_matching_direction() {
        let mut f = fighter();
        f.walk(Facing::Right, 1.0);
        f.stop_walking(Facing::Left);
        assert_eq!(f.velocity().x, MOVE_SPEED);
        f.stop_walking(Facing::Right);
        assert_eq!(f.velocity().x, 0.0);
    }

    #[test]
    fn test_timed_duck_expires_after_exact_tick_count() {
        let mut f = fighter();
        f.duck_for(3);
        assert!(f.is_ducking());
        f.tick();
        f.tick();
        assert!(f.is_ducking());
        f.tick();
        assert!(!f.is_ducking());
    }

    #[test]
    fn test_held_duck_persists_until_released() {
        let mut f = fighter();
        f.hold_duck();
        for _ in 0..100 {
            f.tick();
        }
        assert!(f.is_ducking());
        assert_eq!(f.action_state(), ActionState::Ducking);
        f.release_duck();
        assert!(!f.is_ducking());
    }

    #[test]
    fn test_ducking_does_not_block_attacks_by_default() {
        let mut f = fighter();
        f.hold_duck();
        assert!(f.punch());
        assert!(f.shoot_fireball().is_some());
    }

    #[test]
    fn test_duck_blocks_attacks_when_configured() {
        let config = GameConfig {
            duck_blocks_attacks: true,
            ..Default::default()
        };
        let mut f = Fighter::new(Side::Player1, &config);
        f.hold_duck();
        assert!(!f.punch());
        assert!(!f.kick());
        assert!(f.shoot_fireball().is_none());
        assert_eq!(f.attack_cooldown(), 0);
        assert_eq!(f.fireball_cooldown(), 0);
    }

    #[test]
    fn test_take_hit_floors_health_at_zero() {
        let mut f = fighter();
        assert!(!f.take_hit(90, Vec2::new(3.0, -2.0)));
        assert_eq!(f.health(), 10);
        assert_eq!(f.velocity(), Vec2::new(3.0, -2.0));
        assert!(f.take_hit(25, Vec2::ZERO));
        assert_eq!(f.health(), 0);
        assert!(f.is_knocked_out());
    }

    #[test]
    fn test_x_stays_in_arena_under_sustained_walking() {
        let config = GameConfig::default();
        let mut f = fighter();
        f.walk(Facing::Left, 1.0);
        for _ in 0..200 {
            f.tick();
            assert!(f.position().x >= 0.0);
        }
        f.walk(Facing::Right, 1.0);
        for _ in 0..400 {
            f.tick();
            assert!(f.position().x <= config.max_fighter_x());
        }
    }
}
