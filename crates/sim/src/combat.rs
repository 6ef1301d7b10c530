use glam::Vec2;
use stickbrawl_shared::GameConfig;

use crate::fighter::Fighter;
use crate::projectile::Projectile;

/// Result of resolving one attack against one defender.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Out of range or no overlap.
    Miss,
    /// Would have connected, but the defender was ducking. Nothing applied.
    Evaded,
    Landed { damage: u8, knockout: bool },
}

impl HitOutcome {
    pub fn landed(self) -> bool {
        matches!(self, HitOutcome::Landed { .. })
    }

    pub fn knockout(self) -> bool {
        matches!(self, HitOutcome::Landed { knockout: true, .. })
    }
}

/// Punch or kick: lands when the centres are closer than the melee range and
/// the defender is standing. Knockback scales with damage, away from the attacker.
pub fn resolve_melee_hit(
    config: &GameConfig,
    attacker: &Fighter,
    defender: &mut Fighter,
    damage: u8,
) -> HitOutcome {
    let attacker_center = attacker.center_x();
    let defender_center = defender.center_x();
    let distance = (attacker_center - defender_center).abs();

    if distance >= config.melee_range {
        return HitOutcome::Miss;
    }
    if defender.is_ducking() {
        return HitOutcome::Evaded;
    }

    let direction = if attacker_center < defender_center { 1.0 } else { -1.0 };
    let knockback = Vec2::new(
        damage as f32 * config.melee_knockback_scale * direction,
        -config.melee_knockback_lift,
    );
    let knockout = defender.take_hit(damage, knockback);
    HitOutcome::Landed { damage, knockout }
}

/// Fireball against its target. The caller removes the projectile when this
/// returns `Landed`; an evaded fireball keeps flying.
pub fn resolve_projectile_hit(
    config: &GameConfig,
    projectile: &Projectile,
    target: &mut Fighter,
) -> HitOutcome {
    if !projectile.collides_with(target) {
        return HitOutcome::Miss;
    }
    if target.is_ducking() {
        return HitOutcome::Evaded;
    }

    let knockback = Vec2::new(
        config.fireball_knockback * projectile.direction().sign(),
        -config.fireball_knockback_lift,
    );
    let damage = config.fireball_damage;
    let knockout = target.take_hit(damage, knockback);
    HitOutcome::Landed { damage, knockout }
}
