use stickbrawl_shared::*;

/// Aggregate metrics describing how a match played out.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchMetrics {
    /// Rounds that ended in a knockout.
    pub rounds_played: u32,
    /// Mean length of completed rounds in seconds, from round start to knockout.
    pub mean_round_secs: Option<f32>,
    /// Seconds until the first knockout, or None if nobody was knocked out.
    pub time_to_first_ko: Option<f32>,
    /// Winner took every round.
    pub sweep: bool,
    /// Winner lost the first round.
    pub comeback: bool,
    /// Landed hits / attacks thrown (punches, kicks and fireballs).
    pub hit_rate: f32,
    /// Share of landed hits that were fireballs.
    pub fireball_share: f32,
    /// Evaded attacks / attacks that would otherwise have landed.
    pub evasion_rate: f32,
    /// 1.0 if the match produced a winner, 0.0 if it hit the tick cap.
    pub decided_rate: f32,
}

/// Analyze a replay and compute match metrics.
pub fn analyze(replay: &Replay) -> MatchMetrics {
    let result = &replay.result;

    // --- Round timing, from the recorded events ---
    let mut round_lengths = Vec::new();
    let mut round_start = None;
    let mut first_round_winner = None;
    let mut first_ko_tick = None;

    for frame in &replay.frames {
        for event in &frame.events {
            match *event {
                GameEvent::RoundStarted { .. } => round_start = Some(frame.tick),
                GameEvent::RoundOver { winner, .. } => {
                    if let Some(start) = round_start.take() {
                        round_lengths.push(frame.tick.saturating_sub(start));
                    }
                    first_round_winner.get_or_insert(winner);
                    first_ko_tick.get_or_insert(frame.tick);
                }
                _ => {}
            }
        }
    }

    let to_secs = |ticks: u64| ticks as f32 / TICK_RATE as f32;
    let mean_round_secs = if round_lengths.is_empty() {
        None
    } else {
        let total: u64 = round_lengths.iter().sum();
        Some(to_secs(total) / round_lengths.len() as f32)
    };
    let time_to_first_ko = first_ko_tick.map(to_secs);

    // --- Match shape ---
    let winner = result.outcome.winner();
    let sweep = winner.is_some_and(|w| result.wins[w.opponent().index()] == 0);
    let comeback = match (winner, first_round_winner) {
        (Some(w), Some(first)) => w != first,
        _ => false,
    };

    // --- Attack rates ---
    let stats = [result.stats.player1, result.stats.player2];
    let thrown: u32 = stats
        .iter()
        .map(|s| s.punches_thrown + s.kicks_thrown + s.fireballs_launched)
        .sum();
    let hits: u32 = stats.iter().map(SideStats::hits).sum();
    let fireball_hits: u32 = stats.iter().map(|s| s.fireball_hits).sum();
    let evaded: u32 = stats.iter().map(|s| s.attacks_evaded).sum();

    let ratio = |num: u32, den: u32| if den > 0 { num as f32 / den as f32 } else { 0.0 };

    MatchMetrics {
        rounds_played: result.rounds_played,
        mean_round_secs,
        time_to_first_ko,
        sweep,
        comeback,
        hit_rate: ratio(hits, thrown),
        fireball_share: ratio(fireball_hits, hits),
        evasion_rate: ratio(evaded, hits + evaded),
        decided_rate: if winner.is_some() { 1.0 } else { 0.0 },
    }
}
