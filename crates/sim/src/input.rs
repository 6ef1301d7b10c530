use stickbrawl_shared::{Facing, Side};

use crate::command::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    MoveLeft,
    MoveRight,
    Jump,
    Duck,
    Punch,
    Kick,
    Shoot,
}

impl Control {
    /// Command issued when the control is pressed.
    pub fn on_press(self) -> Command {
        match self {
            Control::MoveLeft => Command::Walk {
                direction: Facing::Left,
                speed_scale: 1.0,
            },
            Control::MoveRight => Command::Walk {
                direction: Facing::Right,
                speed_scale: 1.0,
            },
            Control::Jump => Command::Jump,
            Control::Duck => Command::HoldDuck,
            Control::Punch => Command::Punch,
            Control::Kick => Command::Kick,
            Control::Shoot => Command::Shoot,
        }
    }

    /// Command issued when the control is released, if any.
    pub fn on_release(self) -> Option<Command> {
        match self {
            Control::MoveLeft => Some(Command::StopWalking(Facing::Left)),
            Control::MoveRight => Some(Command::StopWalking(Facing::Right)),
            Control::Duck => Some(Command::ReleaseDuck),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    Player(Side, Control),
    Pause,
}

/// Keyboard layout: Player1 on `a d w s z x c`, Player2 on the arrows plus
/// `, . /`, Escape pauses. Key names follow the DOM `KeyboardEvent.key` values.
pub fn default_binding(key: &str) -> Option<Binding> {
    let binding = match key {
        "a" => Binding::Player(Side::Player1, Control::MoveLeft),
        "d" => Binding::Player(Side::Player1, Control::MoveRight),
        "w" => Binding::Player(Side::Player1, Control::Jump),
        "s" => Binding::Player(Side::Player1, Control::Duck),
        "z" => Binding::Player(Side::Player1, Control::Punch),
        "x" => Binding::Player(Side::Player1, Control::Kick),
        "c" => Binding::Player(Side::Player1, Control::Shoot),
        "ArrowLeft" => Binding::Player(Side::Player2, Control::MoveLeft),
        "ArrowRight" => Binding::Player(Side::Player2, Control::MoveRight),
        "ArrowUp" => Binding::Player(Side::Player2, Control::Jump),
        "ArrowDown" => Binding::Player(Side::Player2, Control::Duck),
        "," => Binding::Player(Side::Player2, Control::Punch),
        "." => Binding::Player(Side::Player2, Control::Kick),
        "/" => Binding::Player(Side::Player2, Control::Shoot),
        "Escape" => Binding::Pause,
        _ => return None,
    };
    Some(binding)
}
