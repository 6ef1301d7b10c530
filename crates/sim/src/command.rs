use stickbrawl_shared::Facing;

/// One fighter operation, issued either by a key event or by the opponent AI.
/// The match controller applies both through the same path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Walk { direction: Facing, speed_scale: f32 },
    StopWalking(Facing),
    Halt,
    Jump,
    Punch,
    Kick,
    Shoot,
    HoldDuck,
    ReleaseDuck,
    DuckFor(u32),
}
