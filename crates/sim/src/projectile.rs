use glam::Vec2;
use stickbrawl_shared::*;

use crate::fighter::Fighter;

/// A fireball in flight. `position` is the top-left corner of its square box.
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    position: Vec2,
    size: f32,
    speed: f32,
    owner: Side,
    arena_width: f32,
    evaded: bool,
}

impl Projectile {
    pub fn new(position: Vec2, direction: Facing, owner: Side, config: &GameConfig) -> Self {
        Self {
            position,
            size: config.fireball_size,
            speed: config.fireball_speed * direction.sign(),
            owner,
            arena_width: config.arena_width,
            evaded: false,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    /// Signed horizontal speed; the sign is the travel direction.
    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn direction(&self) -> Facing {
        if self.speed < 0.0 {
            Facing::Left
        } else {
            Facing::Right
        }
    }

    pub fn owner(&self) -> Side {
        self.owner
    }

    /// Move one tick. Returns true once the projectile has left the arena.
    pub fn tick(&mut self) -> bool {
        self.position.x += self.speed;
        self.position.x < 0.0 || self.position.x > self.arena_width
    }

    /// Note that the target ducked under us. True only the first time.
    pub fn mark_evaded(&mut self) -> bool {
        !std::mem::replace(&mut self.evaded, true)
    }

    /// Box overlap against the fighter's standing body, from `y - height` to
    /// `y`. Ducking is not considered here.
    pub fn collides_with(&self, fighter: &Fighter) -> bool {
        let f = fighter.position();
        self.position.x < f.x + fighter.width()
            && self.position.x + self.size > f.x
            && self.position.y < f.y
            && self.position.y + self.size > f.y - fighter.height()
    }

    pub fn snapshot(&self) -> ProjectileSnapshot {
        ProjectileSnapshot {
            x: self.position.x,
            y: self.position.y,
            size: self.size,
            speed: self.speed,
            owner: self.owner,
        }
    }
}
