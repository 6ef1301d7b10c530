use glam::Vec2;
use stickbrawl_shared::GameConfig;

/// Kinematic state shared by every fighter. `position` is the left edge and
/// the feet: y grows downward and the body extends `size.y` above it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: Vec2,
    pub airborne: bool,
}

impl Body {
    pub fn standing_at(x: f32, config: &GameConfig) -> Self {
        Self {
            position: Vec2::new(x, config.ground_y()),
            velocity: Vec2::ZERO,
            size: Vec2::new(config.fighter_width, config.fighter_height),
            airborne: false,
        }
    }

    pub fn center_x(&self) -> f32 {
        self.position.x + self.size.x / 2.0
    }

    /// Advance one tick: gravity, ground clamp, horizontal move, wall clamp.
    pub fn step(&mut self, config: &GameConfig) {
        self.velocity.y += config.gravity;
        self.position.y += self.velocity.y;

        let ground = config.ground_y();
        if self.position.y > ground {
            self.position.y = ground;
            self.velocity.y = 0.0;
            self.airborne = false;
        }

        self.position.x += self.velocity.x;
        self.position.x = self
            .position
            .x
            .clamp(0.0, (config.arena_width - self.size.x).max(0.0));
    }
}
