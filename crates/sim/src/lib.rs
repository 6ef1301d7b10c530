pub mod physics;
pub mod fighter;
pub mod projectile;
pub mod combat;
pub mod command;
pub mod rng;
pub mod opponent;
pub mod schedule;
pub mod input;
pub mod match_controller;
pub mod match_loop;
pub mod analyzer;

pub use combat::*;
pub use command::*;
pub use fighter::*;
pub use input::*;
pub use match_controller::*;
pub use match_loop::*;
pub use opponent::*;
pub use physics::*;
pub use projectile::*;
pub use rng::*;
