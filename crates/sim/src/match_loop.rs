use stickbrawl_shared::*;

use crate::match_controller::MatchController;
use crate::rng::SeededRandom;

/// Run a deterministic computer-vs-computer match.
///
/// Frames are recorded every `frame_interval` ticks, each carrying the events
/// emitted since the previous frame. The run ends once the winner banner is
/// up, or at `max_ticks` with an `Unfinished` outcome.
pub fn run_match(config: &MatchConfig) -> Replay {
    let mut controller =
        MatchController::new(config.game, Box::new(SeededRandom::new(config.seed)));
    controller.start_match(MatchMode::Demo, &config.p1_name, &config.p2_name);

    let frame_interval = config.frame_interval.max(1) as u64;
    let mut frames = Vec::new();

    // Capture initial frame
    frames.push(capture(&mut controller));

    for _ in 0..config.max_ticks {
        controller.tick();

        if matches!(controller.banner(), Some(Banner::Winner(_))) {
            frames.push(capture(&mut controller));
            break;
        }
        if controller.clock() % frame_interval == 0 {
            frames.push(capture(&mut controller));
        }
    }

    // Events after the last recorded frame still belong in the replay
    if frames
        .last()
        .is_some_and(|frame| frame.tick != controller.clock())
    {
        frames.push(capture(&mut controller));
    }

    Replay {
        config: config.clone(),
        frames,
        result: controller.result(),
    }
}

fn capture(controller: &mut MatchController) -> ReplayFrame {
    let mut frame = controller.snapshot();
    frame.events = controller.drain_events();
    frame
}
