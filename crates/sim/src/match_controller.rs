use stickbrawl_shared::*;
use tracing::{debug, info, trace};

use crate::combat::{resolve_melee_hit, resolve_projectile_hit, HitOutcome};
use crate::command::Command;
use crate::fighter::Fighter;
use crate::input::{default_binding, Binding, Control};
use crate::opponent::OpponentController;
use crate::projectile::Projectile;
use crate::rng::RandomSource;
use crate::schedule::{DeferredAction, Scheduler};

/// Owns one match: both fighters, the projectile list, the opponent AI and
/// the round/match state machine.
///
/// `StartScreen -> InRound -> RoundOver -> (InRound | MatchOver)`. Call
/// [`tick`](Self::tick) once per frame; key events go through
/// [`key_down`](Self::key_down) / [`key_up`](Self::key_up) (or
/// [`handle_key`](Self::handle_key) with the default layout).
pub struct MatchController {
    config: GameConfig,
    mode: MatchMode,
    names: [String; 2],
    fighters: [Fighter; 2],
    projectiles: Vec<Projectile>,
    opponents: [Option<OpponentController>; 2],
    rng: Box<dyn RandomSource>,

    phase: Phase,
    paused: bool,
    round: u32,
    wins: [u8; 2],
    winner: Option<Side>,
    banner: Option<Banner>,

    clock: u64,
    epoch: u64,
    scheduler: Scheduler,
    events: Vec<GameEvent>,
    stats: MatchStats,
}

impl MatchController {
    pub fn new(config: GameConfig, rng: Box<dyn RandomSource>) -> Self {
        Self {
            config,
            mode: MatchMode::Versus,
            names: [DEFAULT_P1_NAME.to_string(), DEFAULT_P2_NAME.to_string()],
            fighters: [
                Fighter::new(Side::Player1, &config),
                Fighter::new(Side::Player2, &config),
            ],
            projectiles: Vec::new(),
            opponents: [None, None],
            rng,
            phase: Phase::StartScreen,
            paused: false,
            round: 0,
            wins: [0, 0],
            winner: None,
            banner: None,
            clock: 0,
            epoch: 0,
            scheduler: Scheduler::new(),
            events: Vec::new(),
            stats: MatchStats::default(),
        }
    }

    // Match flow

    /// Start a fresh best-of match. Blank names fall back to the defaults;
    /// against the computer, Player2 is always "Computer".
    pub fn start_match(&mut self, mode: MatchMode, p1_name: &str, p2_name: &str) {
        self.mode = mode;
        self.names = [
            display_name(p1_name, DEFAULT_P1_NAME),
            match mode {
                MatchMode::VsComputer => COMPUTER_NAME.to_string(),
                _ => display_name(p2_name, DEFAULT_P2_NAME),
            },
        ];
        self.wins = [0, 0];
        self.winner = None;
        self.stats = MatchStats::default();
        self.paused = false;
        self.round = 1;
        self.epoch += 1;
        self.reset_round();
        self.phase = Phase::InRound;

        info!(
            mode = ?mode,
            p1 = %self.names[0],
            p2 = %self.names[1],
            "match started"
        );

        self.banner = Some(Banner::Round(1));
        self.emit_sound(SoundCue::RoundStart);
        self.events.push(GameEvent::RoundStarted { round: 1 });
        self.scheduler.schedule(
            self.clock + self.config.fight_banner_delay_ticks as u64,
            self.epoch,
            DeferredAction::ShowFight,
        );
    }

    /// Play again with the same mode and names.
    pub fn restart(&mut self) {
        if self.phase == Phase::StartScreen {
            return;
        }
        let [p1, p2] = self.names.clone();
        self.start_match(self.mode, &p1, &p2);
    }

    /// Abandon the match and go back to the start screen.
    pub fn exit_to_menu(&mut self) {
        self.epoch += 1;
        self.scheduler.clear();
        self.phase = Phase::StartScreen;
        self.paused = false;
        self.round = 0;
        self.wins = [0, 0];
        self.winner = None;
        self.banner = None;
        self.reset_round();
        self.opponents = [None, None];
        info!("returned to start screen");
    }

    /// Pause or resume. Only meaningful while a match is running.
    pub fn toggle_pause(&mut self) {
        if matches!(self.phase, Phase::StartScreen | Phase::MatchOver) {
            return;
        }
        self.paused = !self.paused;
        debug!(paused = self.paused, "pause toggled");
    }

    /// Advance the simulation by one tick. Frozen while paused or on the
    /// start screen.
    pub fn tick(&mut self) {
        if self.paused || self.phase == Phase::StartScreen {
            return;
        }
        self.clock += 1;

        for deferred in self.scheduler.take_due(self.clock) {
            if deferred.epoch != self.epoch {
                trace!(
                    action = ?deferred.action,
                    scheduled_epoch = deferred.epoch,
                    current_epoch = self.epoch,
                    "discarding stale deferred action"
                );
                continue;
            }
            self.run_deferred(deferred.action);
        }

        if self.phase == Phase::InRound {
            self.step_round();
        }
    }

    // Input

    pub fn key_down(&mut self, side: Side, control: Control) {
        if self.accepts_input(side) {
            self.apply_command(side, control.on_press());
        }
    }

    pub fn key_up(&mut self, side: Side, control: Control) {
        if !self.accepts_input(side) {
            return;
        }
        if let Some(command) = control.on_release() {
            self.apply_command(side, command);
        }
    }

    /// Route a named key through [`default_binding`].
    pub fn handle_key(&mut self, key: &str, pressed: bool) {
        match default_binding(key) {
            Some(Binding::Pause) if pressed => self.toggle_pause(),
            Some(Binding::Player(side, control)) if pressed => self.key_down(side, control),
            Some(Binding::Player(side, control)) => self.key_up(side, control),
            _ => {}
        }
    }

    fn accepts_input(&self, side: Side) -> bool {
        !self.paused && self.phase == Phase::InRound && !self.mode.is_ai(side)
    }

    // Outputs

    /// Read-only view of the current state. `events` is left empty; pair with
    /// [`drain_events`](Self::drain_events).
    pub fn snapshot(&self) -> ReplayFrame {
        ReplayFrame {
            tick: self.clock,
            phase: self.phase,
            paused: self.paused,
            round: self.round,
            wins: self.wins,
            banner: self.banner,
            fighters: [self.fighters[0].snapshot(), self.fighters[1].snapshot()],
            projectiles: self.projectiles.iter().map(Projectile::snapshot).collect(),
            events: Vec::new(),
        }
    }

    /// Events emitted since the last call, in emission order.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn result(&self) -> MatchResult {
        MatchResult {
            outcome: MatchOutcome::from_winner(self.winner),
            rounds_played: self.wins.iter().map(|&w| w as u32).sum(),
            wins: self.wins,
            final_tick: self.clock,
            stats: self.stats,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn name(&self, side: Side) -> &str {
        &self.names[side.index()]
    }

    pub fn fighter(&self, side: Side) -> &Fighter {
        &self.fighters[side.index()]
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn opponent(&self, side: Side) -> Option<&OpponentController> {
        self.opponents[side.index()].as_ref()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn wins(&self) -> [u8; 2] {
        self.wins
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    pub fn banner(&self) -> Option<Banner> {
        self.banner
    }

    pub fn clock(&self) -> u64 {
        self.clock
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn stats(&self) -> &MatchStats {
        &self.stats
    }

    // Round internals

    /// Per-round state back to its initial values. Wins, names and the round
    /// counter are left alone.
    fn reset_round(&mut self) {
        self.fighters = [
            Fighter::new(Side::Player1, &self.config),
            Fighter::new(Side::Player2, &self.config),
        ];
        self.projectiles.clear();
        for side in Side::BOTH {
            self.opponents[side.index()] = self
                .mode
                .is_ai(side)
                .then(|| OpponentController::new(side, &self.config.ai));
        }
    }

    fn step_round(&mut self) {
        for fighter in &mut self.fighters {
            fighter.tick();
        }

        for side in Side::BOTH {
            let Some(ai) = self.opponents[side.index()].as_mut() else {
                continue;
            };
            let commands = ai.update(
                &self.fighters[side.index()],
                &self.fighters[side.opponent().index()],
                &self.projectiles,
                self.rng.as_mut(),
            );
            for command in commands {
                self.apply_command(side, command);
            }
        }

        let mut i = 0;
        while i < self.projectiles.len() && self.phase == Phase::InRound {
            let left_arena = self.projectiles[i].tick();
            let owner = self.projectiles[i].owner();
            let target = &mut self.fighters[owner.opponent().index()];
            let outcome = resolve_projectile_hit(&self.config, &self.projectiles[i], target);

            match outcome {
                HitOutcome::Evaded => {
                    if self.projectiles[i].mark_evaded() {
                        self.stats.side_mut(owner.opponent()).attacks_evaded += 1;
                    }
                }
                HitOutcome::Landed { damage, knockout } => {
                    let stats = self.stats.side_mut(owner);
                    stats.fireball_hits += 1;
                    stats.damage_dealt += damage as u32;
                    debug!(attacker = ?owner, damage, "fireball landed");
                    self.emit_sound(SoundCue::HitLanded);
                    if knockout {
                        self.end_round(owner);
                    }
                }
                HitOutcome::Miss => {}
            }

            if outcome.landed() || left_arena {
                self.projectiles.remove(i);
            } else {
                i += 1;
            }
        }
    }

    /// Single path for human and AI commands.
    fn apply_command(&mut self, side: Side, command: Command) {
        if self.phase != Phase::InRound {
            return;
        }
        let [p1, p2] = &mut self.fighters;
        let (me, them) = match side {
            Side::Player1 => (p1, p2),
            Side::Player2 => (p2, p1),
        };

        match command {
            Command::Walk {
                direction,
                speed_scale,
            } => me.walk(direction, speed_scale),
            Command::StopWalking(direction) => me.stop_walking(direction),
            Command::Halt => me.halt(),
            Command::Jump => {
                me.jump();
            }
            Command::HoldDuck => me.hold_duck(),
            Command::ReleaseDuck => me.release_duck(),
            Command::DuckFor(ticks) => me.duck_for(ticks),
            Command::Punch => {
                if me.punch() {
                    let outcome = resolve_melee_hit(&self.config, me, them, self.config.punch_damage);
                    self.stats.side_mut(side).punches_thrown += 1;
                    self.emit_sound(SoundCue::PunchThrown);
                    self.record_melee(side, outcome);
                }
            }
            Command::Kick => {
                if me.kick() {
                    let outcome = resolve_melee_hit(&self.config, me, them, self.config.kick_damage);
                    self.stats.side_mut(side).kicks_thrown += 1;
                    self.emit_sound(SoundCue::KickThrown);
                    self.record_melee(side, outcome);
                }
            }
            Command::Shoot => {
                if let Some(fireball) = me.shoot_fireball() {
                    debug!(side = ?side, x = fireball.position().x, "fireball launched");
                    self.projectiles.push(fireball);
                    self.stats.side_mut(side).fireballs_launched += 1;
                    self.emit_sound(SoundCue::FireballLaunched);
                }
            }
        }
    }

    fn record_melee(&mut self, attacker: Side, outcome: HitOutcome) {
        match outcome {
            HitOutcome::Miss => {}
            HitOutcome::Evaded => {
                self.stats.side_mut(attacker.opponent()).attacks_evaded += 1;
            }
            HitOutcome::Landed { damage, knockout } => {
                let stats = self.stats.side_mut(attacker);
                stats.melee_hits += 1;
                stats.damage_dealt += damage as u32;
                debug!(attacker = ?attacker, damage, "melee hit landed");
                self.emit_sound(SoundCue::HitLanded);
                if knockout {
                    self.end_round(attacker);
                }
            }
        }
    }

    fn end_round(&mut self, winner: Side) {
        if self.phase != Phase::InRound {
            return;
        }
        self.phase = Phase::RoundOver;
        let wins = &mut self.wins[winner.index()];
        *wins = wins.saturating_add(1);
        let wins = *wins;

        self.banner = Some(Banner::Knockout);
        self.emit_sound(SoundCue::Knockout);
        self.events.push(GameEvent::RoundOver {
            round: self.round,
            winner,
        });
        info!(
            round = self.round,
            winner = ?winner,
            wins = ?self.wins,
            tick = self.clock,
            "round over"
        );

        if wins >= self.config.rounds_to_win {
            self.phase = Phase::MatchOver;
            self.winner = Some(winner);
            self.events.push(GameEvent::MatchOver { winner });
            self.scheduler.schedule(
                self.clock + self.config.match_over_delay_ticks as u64,
                self.epoch,
                DeferredAction::ShowWinner(winner),
            );
            info!(
                winner = %self.names[winner.index()],
                wins = ?self.wins,
                "match over"
            );
        } else {
            let announce_at = self.clock + self.config.round_over_delay_ticks as u64;
            self.scheduler.schedule(
                announce_at,
                self.epoch,
                DeferredAction::AnnounceRound(self.round + 1),
            );
            self.scheduler.schedule(
                announce_at + self.config.round_intro_ticks as u64,
                self.epoch,
                DeferredAction::StartNextRound,
            );
        }
    }

    fn run_deferred(&mut self, action: DeferredAction) {
        match action {
            DeferredAction::ShowFight => {
                // A knockout inside the intro keeps its banner
                if self.phase == Phase::InRound {
                    self.banner = Some(Banner::Fight);
                    self.emit_sound(SoundCue::Fight);
                }
            }
            DeferredAction::AnnounceRound(round) => {
                self.banner = Some(Banner::Round(round));
                self.emit_sound(SoundCue::RoundStart);
            }
            DeferredAction::StartNextRound => {
                self.round += 1;
                self.epoch += 1;
                self.reset_round();
                self.phase = Phase::InRound;
                self.banner = Some(Banner::Fight);
                self.emit_sound(SoundCue::Fight);
                self.events.push(GameEvent::RoundStarted { round: self.round });
                info!(round = self.round, wins = ?self.wins, "round started");
            }
            DeferredAction::ShowWinner(side) => {
                self.banner = Some(Banner::Winner(side));
            }
        }
    }

    fn emit_sound(&mut self, cue: SoundCue) {
        self.events.push(GameEvent::Sound { cue });
    }
}

fn display_name(input: &str, fallback: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{ScriptedRandom, SeededRandom};

    /// Versus match with the fighters spawned `gap` apart (left edges).
    fn versus_with(gap: f32, tweak: impl FnOnce(&mut GameConfig)) -> MatchController {
        let margin = (ARENA_WIDTH - FIGHTER_WIDTH - gap) / 2.0;
        let mut config = GameConfig {
            spawn_margin: margin,
            ..Default::default()
        };
        tweak(&mut config);
        assert!(config.validate().is_ok());
        let mut mc = MatchController::new(config, Box::new(SeededRandom::new(1)));
        mc.start_match(MatchMode::Versus, "Ann", "Bob");
        mc
    }

    fn versus_with_gap(gap: f32) -> MatchController {
        versus_with(gap, |_| {})
    }

    /// Fighters in punching range, and one punch is a knockout.
    fn one_punch_match() -> MatchController {
        versus_with(30.0, |c| c.punch_damage = MAX_HEALTH)
    }

    fn sounds(events: &[GameEvent]) -> Vec<SoundCue> {
        events
            .iter()
            .filter_map(|e| match e {
                GameEvent::Sound { cue } => Some(*cue),
                _ => None,
            })
            .collect()
    }

    fn knock_out_player2(mc: &mut MatchController) {
        mc.key_down(Side::Player1, Control::Punch);
        assert_ne!(mc.phase(), Phase::InRound);
    }

    fn tick_n(mc: &mut MatchController, n: u32) {
        for _ in 0..n {
            mc.tick();
        }
    }

    #[test]
    fn test_start_match_enters_first_round() {
        let mut mc = MatchController::new(GameConfig::default(), Box::new(SeededRandom::new(0)));
        assert_eq!(mc.phase(), Phase::StartScreen);
        mc.tick();
        assert_eq!(mc.clock(), 0, "start screen does not advance the clock");

        mc.start_match(MatchMode::Versus, "Ann", "Bob");
        assert_eq!(mc.phase(), Phase::InRound);
        assert_eq!(mc.round(), 1);
        assert_eq!(mc.banner(), Some(Banner::Round(1)));
        assert_eq!(mc.name(Side::Player1), "Ann");
        assert!(mc.opponent(Side::Player2).is_none());
        assert_eq!(
            mc.drain_events(),
            vec![
                GameEvent::Sound {
                    cue: SoundCue::RoundStart
                },
                GameEvent::RoundStarted { round: 1 },
            ]
        );
        assert!(mc.drain_events().is_empty());
    }

    #[test]
    fn test_names_default_and_computer_opponent() {
        let mut mc = MatchController::new(GameConfig::default(), Box::new(SeededRandom::new(0)));
        mc.start_match(MatchMode::Versus, "  ", "");
        assert_eq!(mc.name(Side::Player1), DEFAULT_P1_NAME);
        assert_eq!(mc.name(Side::Player2), DEFAULT_P2_NAME);

        mc.start_match(MatchMode::VsComputer, "Ann", "ignored");
        assert_eq!(mc.name(Side::Player2), COMPUTER_NAME);
        assert!(mc.opponent(Side::Player2).is_some());
        assert!(mc.opponent(Side::Player1).is_none());
    }

    #[test]
    fn test_fight_banner_after_intro_delay() {
        let mut mc = versus_with_gap(500.0);
        mc.drain_events();
        tick_n(&mut mc, FIGHT_BANNER_DELAY_TICKS - 1);
        assert_eq!(mc.banner(), Some(Banner::Round(1)));
        mc.tick();
        assert_eq!(mc.banner(), Some(Banner::Fight));
        assert_eq!(sounds(&mc.drain_events()), vec![SoundCue::Fight]);
    }

    #[test]
    fn test_key_punch_lands_and_emits_sounds() {
        let mut mc = versus_with_gap(30.0);
        mc.drain_events();
        mc.key_down(Side::Player1, Control::Punch);
        assert_eq!(mc.fighter(Side::Player2).health(), MAX_HEALTH - PUNCH_DAMAGE);
        assert!(mc.fighter(Side::Player2).velocity().x > 0.0);
        assert_eq!(
            sounds(&mc.drain_events()),
            vec![SoundCue::PunchThrown, SoundCue::HitLanded]
        );
        assert_eq!(mc.stats().player1.punches_thrown, 1);
        assert_eq!(mc.stats().player1.melee_hits, 1);
        assert_eq!(mc.stats().player1.damage_dealt, PUNCH_DAMAGE as u32);
    }

    #[test]
    fn test_ducking_defender_counts_evasion() {
        let mut mc = versus_with_gap(30.0);
        mc.key_down(Side::Player2, Control::Duck);
        mc.key_down(Side::Player1, Control::Kick);
        assert_eq!(mc.fighter(Side::Player2).health(), MAX_HEALTH);
        assert_eq!(mc.stats().player2.attacks_evaded, 1);
        mc.key_up(Side::Player2, Control::Duck);
        assert!(!mc.fighter(Side::Player2).is_ducking());
    }

    #[test]
    fn test_input_ignored_while_paused_or_for_ai_side() {
        let mut mc = versus_with_gap(30.0);
        mc.handle_key("Escape", true);
        assert!(mc.is_paused());
        mc.handle_key("z", true);
        assert!(!mc.fighter(Side::Player1).is_punching());
        mc.handle_key("Escape", true);
        assert!(!mc.is_paused());

        let mut mc = MatchController::new(GameConfig::default(), Box::new(SeededRandom::new(0)));
        mc.start_match(MatchMode::VsComputer, "Ann", "");
        mc.key_down(Side::Player2, Control::Shoot);
        assert!(mc.projectiles().is_empty());
        mc.key_down(Side::Player1, Control::Shoot);
        assert_eq!(mc.projectiles().len(), 1);
    }

    #[test]
    fn test_key_release_stops_only_matching_direction() {
        let mut mc = versus_with_gap(500.0);
        mc.handle_key("d", true);
        mc.handle_key("a", false);
        assert_eq!(mc.fighter(Side::Player1).velocity().x, MOVE_SPEED);
        mc.handle_key("d", false);
        assert_eq!(mc.fighter(Side::Player1).velocity().x, 0.0);
    }

    #[test]
    fn test_pause_freezes_clock_and_fighters() {
        let mut mc = versus_with_gap(500.0);
        mc.key_down(Side::Player1, Control::MoveRight);
        mc.toggle_pause();
        let x = mc.fighter(Side::Player1).position().x;
        tick_n(&mut mc, 200);
        assert_eq!(mc.clock(), 0);
        assert_eq!(mc.fighter(Side::Player1).position().x, x);
        assert_eq!(mc.banner(), Some(Banner::Round(1)));
        mc.toggle_pause();
        mc.tick();
        assert_eq!(mc.clock(), 1);
        assert!(mc.fighter(Side::Player1).position().x > x);
    }

    #[test]
    fn test_knockout_ends_round_and_next_round_resets() {
        let mut mc = one_punch_match();
        knock_out_player2(&mut mc);
        assert_eq!(mc.phase(), Phase::RoundOver);
        assert_eq!(mc.wins(), [1, 0]);
        assert_eq!(mc.fighter(Side::Player2).health(), 0);
        assert_eq!(mc.banner(), Some(Banner::Knockout));
        let events = mc.drain_events();
        assert!(events.contains(&GameEvent::RoundOver {
            round: 1,
            winner: Side::Player1
        }));
        assert!(sounds(&events).contains(&SoundCue::Knockout));

        // input is dead between rounds
        mc.key_down(Side::Player1, Control::MoveRight);
        assert_eq!(mc.fighter(Side::Player1).velocity().x, 0.0);

        tick_n(&mut mc, ROUND_OVER_DELAY_TICKS);
        assert_eq!(mc.banner(), Some(Banner::Round(2)));
        assert_eq!(mc.phase(), Phase::RoundOver);
        tick_n(&mut mc, ROUND_INTRO_TICKS);
        assert_eq!(mc.phase(), Phase::InRound);
        assert_eq!(mc.round(), 2);
        assert_eq!(mc.banner(), Some(Banner::Fight));
        assert_eq!(mc.fighter(Side::Player2).health(), MAX_HEALTH);
        assert_eq!(mc.fighter(Side::Player1).attack_cooldown(), 0);
        assert_eq!(mc.wins(), [1, 0], "wins persist across rounds");
        assert!(mc
            .drain_events()
            .contains(&GameEvent::RoundStarted { round: 2 }));
    }

    #[test]
    fn test_match_over_at_two_round_wins() {
        let mut mc = one_punch_match();
        knock_out_player2(&mut mc);
        tick_n(&mut mc, ROUND_OVER_DELAY_TICKS + ROUND_INTRO_TICKS);
        assert_eq!(mc.phase(), Phase::InRound);
        knock_out_player2(&mut mc);

        assert_eq!(mc.phase(), Phase::MatchOver);
        assert_eq!(mc.winner(), Some(Side::Player1));
        assert_eq!(mc.result().outcome, MatchOutcome::Player1Win);
        assert_eq!(mc.result().rounds_played, 2);
        assert!(mc.drain_events().contains(&GameEvent::MatchOver {
            winner: Side::Player1
        }));

        tick_n(&mut mc, MATCH_OVER_DELAY_TICKS);
        assert_eq!(mc.banner(), Some(Banner::Winner(Side::Player1)));
        mc.toggle_pause();
        assert!(!mc.is_paused(), "no pausing after match over");
        tick_n(&mut mc, 1000);
        assert_eq!(mc.round(), 2);
    }

    #[test]
    fn test_restart_discards_stale_fight_banner() {
        let mut mc = versus_with_gap(500.0);
        tick_n(&mut mc, 50);
        mc.restart();
        assert_eq!(mc.round(), 1);
        // the first match's ShowFight comes due here and must be ignored
        tick_n(&mut mc, FIGHT_BANNER_DELAY_TICKS - 50);
        assert_eq!(mc.banner(), Some(Banner::Round(1)));
        tick_n(&mut mc, 50);
        assert_eq!(mc.banner(), Some(Banner::Fight));
    }

    #[test]
    fn test_exit_to_menu_resets_everything() {
        let mut mc = one_punch_match();
        knock_out_player2(&mut mc);
        mc.exit_to_menu();
        assert_eq!(mc.phase(), Phase::StartScreen);
        assert_eq!(mc.wins(), [0, 0]);
        assert_eq!(mc.banner(), None);
        tick_n(&mut mc, ROUND_OVER_DELAY_TICKS + ROUND_INTRO_TICKS);
        assert_eq!(mc.phase(), Phase::StartScreen);
        mc.restart();
        assert_eq!(mc.phase(), Phase::StartScreen);
    }

    #[test]
    fn test_fireball_crosses_arena_and_is_removed() {
        let mut mc = versus_with_gap(500.0);
        mc.key_down(Side::Player1, Control::Shoot);
        assert_eq!(mc.projectiles().len(), 1);
        assert_eq!(mc.stats().player1.fireballs_launched, 1);

        // Player2 ducks under it the whole way
        mc.key_down(Side::Player2, Control::Duck);
        let mut ticks = 0;
        while !mc.projectiles().is_empty() {
            mc.tick();
            ticks += 1;
            assert!(ticks < 200);
        }
        assert_eq!(mc.fighter(Side::Player2).health(), MAX_HEALTH);
        assert_eq!(mc.stats().player2.attacks_evaded, 1);
        assert_eq!(mc.stats().player1.fireball_hits, 0);
    }

    #[test]
    fn test_fireball_hit_removes_projectile() {
        let mut mc = versus_with_gap(200.0);
        mc.key_down(Side::Player1, Control::Shoot);
        let mut ticks = 0;
        while !mc.projectiles().is_empty() {
            mc.tick();
            ticks += 1;
            assert!(ticks < 100);
        }
        assert_eq!(mc.fighter(Side::Player2).health(), MAX_HEALTH - FIREBALL_DAMAGE);
        assert!(mc.fighter(Side::Player2).velocity().x > 0.0);
        assert_eq!(mc.stats().player1.fireball_hits, 1);
    }

    #[test]
    fn test_ai_duck_holds_for_configured_ticks() {
        let config = GameConfig {
            spawn_margin: 350.0,
            ..Default::default()
        };
        let rng = ScriptedRandom::new([0.9, 0.45, 0.0]);
        let mut mc = MatchController::new(config, Box::new(rng));
        mc.start_match(MatchMode::VsComputer, "Ann", "");
        for tick in 1..=AI_DUCK_HOLD_TICKS {
            mc.tick();
            assert!(
                mc.fighter(Side::Player2).is_ducking(),
                "computer should still duck at tick {tick}"
            );
        }
    }

    #[test]
    fn test_demo_keeps_invariants() {
        let config = GameConfig::default();
        let mut mc = MatchController::new(config, Box::new(SeededRandom::new(42)));
        mc.start_match(MatchMode::Demo, "", "");
        for _ in 0..5_000 {
            mc.tick();
            for side in Side::BOTH {
                let f = mc.fighter(side);
                assert!(f.health() <= MAX_HEALTH);
                assert!(f.position().x >= 0.0 && f.position().x <= config.max_fighter_x());
            }
        }
    }

    #[test]
    fn test_unvalidated_zero_ai_timer_keeps_running() {
        let mut config = GameConfig::default();
        config.ai.ranged_mode_ticks = 0;
        let mut mc = MatchController::new(config, Box::new(SeededRandom::new(1)));
        mc.start_match(MatchMode::VsComputer, "Ann", "");
        tick_n(&mut mc, 120);
        assert_eq!(mc.clock(), 120);
        assert!(mc.fighter(Side::Player2).health() <= MAX_HEALTH);
    }
}
