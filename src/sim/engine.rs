//! Match engine
//!
//! Owns the simulation state and drives it through the match phases:
//! menu -> spawning -> playing -> winner -> (spawning | champion).
//! The host feeds elapsed time through `advance` and reads snapshots and
//! events between calls.

use glam::Vec2;
use serde::Serialize;

use super::entity::EntityStatus;
use super::state::{GameState, MatchPhase, Viewport};
use super::tick::tick;
use crate::consts::*;
use crate::error::{EngineError, EngineResult};
use crate::ranking::{RankingEntry, Rankings};
use crate::roster::{Participant, Roster};
use crate::schedule::{FrameClock, FrameLoop, LoopHandle, Scheduler, TimerKind};
use crate::settings::{DegenerateRoundPolicy, Settings};

/// Result of a round start request
#[derive(Debug, Clone, PartialEq)]
pub enum StartOutcome {
    /// Entities spawned; the spawning phase is running
    Started { entities: usize },
    /// Viewport not laid out yet; the round starts once it is
    Deferred,
    /// A single participant was selected and won by default
    TrivialWin(RoundWinner),
}

/// The last entity standing in a round
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundWinner {
    pub id: u32,
    pub code: String,
    pub name: String,
    pub round: u32,
}

/// Notifications for UI collaborators, drained on every `advance`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum EngineEvent {
    PhaseChanged { from: MatchPhase, to: MatchPhase },
    RoundStarted {
        round: u32,
        entities: usize,
        arena_radius: f32,
    },
    Eliminated { id: u32, code: String },
    /// Entities still standing (HUD counter)
    LiveCount(usize),
    RoundEnded(RoundWinner),
    ChampionReached(RankingEntry),
    /// Seconds left before the next round
    CountdownTick(u32),
}

/// Render data for one entity
#[derive(Debug, Clone, Serialize)]
pub struct EntitySnapshot {
    pub id: u32,
    pub code: String,
    pub name: String,
    pub pos: Vec2,
    pub radius: f32,
    pub status: EntityStatus,
    pub z_order: u32,
}

/// Read-only view of the simulation between frames
#[derive(Debug, Clone, Serialize)]
pub struct FrameSnapshot {
    pub phase: MatchPhase,
    pub round: u32,
    pub arena_center: Vec2,
    pub arena_radius: f32,
    pub gap_start: f32,
    pub gap_width: f32,
    pub live_count: usize,
    pub countdown: Option<u32>,
    /// Sorted by z-order, back to front
    pub entities: Vec<EntitySnapshot>,
}

pub struct Engine {
    settings: Settings,
    state: GameState,
    roster: Roster,
    group_filter: Option<String>,
    rankings: Rankings,
    scheduler: Scheduler,
    frame_loop: FrameLoop,
    clock: FrameClock,
    /// Selection waiting for a usable viewport
    pending: Option<Vec<Participant>>,
    countdown: Option<u32>,
    last_winner: Option<RoundWinner>,
    champion: Option<RankingEntry>,
    events: Vec<EngineEvent>,
    last_standing: usize,
}

impl Engine {
    /// Create an engine in the menu phase, seeded from entropy
    pub fn new(settings: Settings, roster: Roster) -> EngineResult<Self> {
        let settings = settings.validated()?;
        let state = GameState::new(&settings);
        Ok(Self::with_state(settings, roster, state))
    }

    /// Create an engine with a fixed seed
    pub fn seeded(settings: Settings, roster: Roster, seed: u64) -> EngineResult<Self> {
        let settings = settings.validated()?;
        let state = GameState::seeded(&settings, seed);
        Ok(Self::with_state(settings, roster, state))
    }

    fn with_state(settings: Settings, roster: Roster, state: GameState) -> Self {
        Self {
            settings,
            state,
            roster,
            group_filter: None,
            rankings: Rankings::new(),
            scheduler: Scheduler::new(),
            frame_loop: FrameLoop::default(),
            clock: FrameClock::new(),
            pending: None,
            countdown: None,
            last_winner: None,
            champion: None,
            events: Vec::new(),
            last_standing: 0,
        }
    }

    pub fn phase(&self) -> MatchPhase {
        self.state.phase
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn rankings(&self) -> &Rankings {
        &self.rankings
    }

    pub fn last_winner(&self) -> Option<&RoundWinner> {
        self.last_winner.as_ref()
    }

    pub fn champion(&self) -> Option<&RankingEntry> {
        self.champion.as_ref()
    }

    pub fn countdown(&self) -> Option<u32> {
        self.countdown
    }

    /// Entities not yet eliminated in the current round (live + frozen)
    pub fn standing_count(&self) -> usize {
        self.state.standing_count()
    }

    /// Whether a round start is waiting on the viewport
    pub fn is_deferred(&self) -> bool {
        self.pending.is_some()
    }

    /// Handle of the running frame loop, if any
    pub fn loop_handle(&self) -> Option<LoopHandle> {
        self.frame_loop.handle()
    }

    /// Restrict future selections to one roster group (`None` = everyone)
    pub fn set_group_filter(&mut self, group: Option<String>) {
        self.group_filter = group;
    }

    /// Replace the settings; takes effect on the next frame
    pub fn apply_settings(&mut self, settings: Settings) -> EngineResult<()> {
        let settings = settings.validated()?;
        if settings.flag_size != self.settings.flag_size {
            for entity in &mut self.state.entities {
                if entity.status != EntityStatus::Dead {
                    entity.radius = settings.flag_size;
                }
            }
        }
        self.settings = settings;
        Ok(())
    }

    /// Report the host viewport size. Starts a deferred round once usable.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.state.viewport = Viewport::new(width, height);
        if self.pending.is_some() {
            self.retry_deferred();
        }
    }

    /// Start a new round with a fresh selection from the roster.
    ///
    /// Any running round is superseded: its timers and frame loop are
    /// cancelled before entity state is replaced.
    pub fn start_round(&mut self) -> EngineResult<StartOutcome> {
        if self.state.phase == MatchPhase::Champion {
            return Err(EngineError::MatchOver);
        }

        let participants = self.roster.select(
            self.group_filter.as_deref(),
            self.settings.max_participants,
            self.state.rng(),
        );
        match participants.len() {
            0 => return Err(EngineError::NoParticipants),
            1 if self.settings.degenerate_round == DegenerateRoundPolicy::Reject => {
                return Err(EngineError::NotEnoughParticipants { available: 1 });
            }
            _ => {}
        }

        self.scheduler.cancel_all();
        self.frame_loop.stop();
        self.countdown = None;
        self.pending = None;

        if !self.state.viewport.is_ready() {
            log::info!(
                "Viewport {:?} not ready, deferring round start",
                self.state.viewport
            );
            self.pending = Some(participants);
            self.scheduler
                .repeating(TimerKind::DeferredStart, DEFERRED_START_RETRY_SECS);
            return Ok(StartOutcome::Deferred);
        }

        Ok(self.launch(participants))
    }

    /// Clear the match: rankings, champion and timers. Leftover entities
    /// keep drifting in the menu.
    pub fn reset(&mut self) {
        self.scheduler.cancel_all();
        self.pending = None;
        self.countdown = None;
        self.rankings.clear();
        self.champion = None;
        self.last_winner = None;
        self.set_phase(MatchPhase::Menu);
        log::info!("Match reset");
    }

    /// Advance by `dt` seconds of host time, returning events raised since
    /// the last call
    pub fn advance(&mut self, dt: f32) -> Vec<EngineEvent> {
        if dt.is_finite() && dt > 0.0 {
            self.run_timers(dt.min(MAX_HOST_DT));
        }

        if self.frame_loop.is_running() {
            for _ in 0..self.clock.frames_due(dt) {
                self.frame();
            }
        }

        self.take_events()
    }

    /// Run exactly one frame (and one frame of timer time)
    pub fn step_frame(&mut self) -> Vec<EngineEvent> {
        self.run_timers(FRAME_DT);
        if self.frame_loop.is_running() {
            self.frame();
        }
        self.take_events()
    }

    /// Drain pending events without advancing
    pub fn take_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        let mut entities: Vec<EntitySnapshot> = self
            .state
            .entities
            .iter()
            .map(|e| EntitySnapshot {
                id: e.id,
                code: e.code.clone(),
                name: e.name.clone(),
                pos: e.pos,
                radius: e.radius,
                status: e.status,
                z_order: e.z_order,
            })
            .collect();
        entities.sort_by_key(|e| e.z_order);

        let arena = &self.state.arena;
        FrameSnapshot {
            phase: self.state.phase,
            round: self.state.round,
            arena_center: arena.center,
            arena_radius: arena.radius,
            gap_start: arena.gap.start,
            gap_width: arena.gap.width,
            live_count: self.state.standing_count(),
            countdown: self.countdown,
            entities,
        }
    }

    fn launch(&mut self, participants: Vec<Participant>) -> StartOutcome {
        self.frame_loop.start();
        self.clock.reset();
        self.last_winner = None;

        self.state.spawn_round(&participants, &self.settings);
        let count = self.state.entities.len();
        self.set_phase(MatchPhase::Spawning);

        log::info!(
            "Round {} started with {} participants (arena radius {:.1})",
            self.state.round,
            count,
            self.state.arena.radius
        );
        self.events.push(EngineEvent::RoundStarted {
            round: self.state.round,
            entities: count,
            arena_radius: self.state.arena.radius,
        });
        self.last_standing = count;
        self.events.push(EngineEvent::LiveCount(count));

        if count == 1 {
            self.state.entities[0].freeze();
            return StartOutcome::TrivialWin(self.finish_round(0));
        }

        self.scheduler
            .once(TimerKind::SpawnPhaseEnd, self.settings.spawn_delay_secs);
        StartOutcome::Started { entities: count }
    }

    fn retry_deferred(&mut self) {
        if !self.state.viewport.is_ready() {
            return;
        }
        self.scheduler.cancel(TimerKind::DeferredStart);
        if let Some(participants) = self.pending.take() {
            log::info!("Viewport ready, starting deferred round");
            self.launch(participants);
        }
    }

    fn run_timers(&mut self, dt: f32) {
        for fired in self.scheduler.advance(dt) {
            // An earlier timer in this batch may have superseded the round
            if self.scheduler.is_current(fired) {
                self.handle_timer(fired.kind);
            }
        }
    }

    fn handle_timer(&mut self, kind: TimerKind) {
        match kind {
            TimerKind::SpawnPhaseEnd => {
                if self.state.phase == MatchPhase::Spawning {
                    self.set_phase(MatchPhase::Playing);
                }
            }
            TimerKind::CountdownTick => {
                let Some(remaining) = self.countdown.filter(|&n| n > 0) else {
                    return;
                };
                let remaining = remaining - 1;
                self.countdown = Some(remaining);
                self.events.push(EngineEvent::CountdownTick(remaining));
                if remaining == 0 {
                    self.scheduler.cancel(TimerKind::CountdownTick);
                    self.scheduler
                        .once(TimerKind::RoundRestart, RESTART_GRACE_SECS);
                }
            }
            TimerKind::RoundRestart => {
                self.countdown = None;
                if self.state.phase != MatchPhase::Winner {
                    return;
                }
                if let Err(e) = self.start_round() {
                    log::warn!("Auto-restart failed: {e}");
                    self.set_phase(MatchPhase::Menu);
                }
            }
            TimerKind::DeferredStart => self.retry_deferred(),
        }
    }

    fn frame(&mut self) {
        let report = tick(&mut self.state, &self.settings);

        for &idx in &report.eliminated {
            let entity = &self.state.entities[idx];
            // The last one out of a simultaneous exit is frozen, not dead
            if entity.status == EntityStatus::Dead {
                self.events.push(EngineEvent::Eliminated {
                    id: entity.id,
                    code: entity.code.clone(),
                });
            }
        }

        if report.standing != self.last_standing {
            self.last_standing = report.standing;
            self.events.push(EngineEvent::LiveCount(report.standing));
        }

        if let Some(idx) = report.survivor {
            self.finish_round(idx);
        }
    }

    fn finish_round(&mut self, idx: usize) -> RoundWinner {
        let entity = &self.state.entities[idx];
        let winner = RoundWinner {
            id: entity.id,
            code: entity.code.clone(),
            name: entity.name.clone(),
            round: self.state.round,
        };

        self.scheduler.cancel(TimerKind::SpawnPhaseEnd);
        self.set_phase(MatchPhase::Winner);

        let entry = self.rankings.record_win(&winner.code, &winner.name);
        log::info!(
            "Round {} won by {} ({} wins)",
            winner.round,
            winner.name,
            entry.wins
        );
        self.events.push(EngineEvent::RoundEnded(winner.clone()));
        self.last_winner = Some(winner.clone());

        let champion = match self.champion {
            None => self.rankings.champion(self.settings.points_to_win).cloned(),
            Some(_) => None,
        };
        if let Some(champion) = champion {
            log::info!("{} is champion with {} wins", champion.name, champion.wins);
            self.champion = Some(champion.clone());
            self.set_phase(MatchPhase::Champion);
            self.events.push(EngineEvent::ChampionReached(champion));
        } else if self.settings.auto_restart {
            self.countdown = Some(AUTO_RESTART_COUNTDOWN);
            self.events
                .push(EngineEvent::CountdownTick(AUTO_RESTART_COUNTDOWN));
            self.scheduler.repeating(TimerKind::CountdownTick, 1.0);
        }

        winner
    }

    fn set_phase(&mut self, to: MatchPhase) {
        let from = self.state.phase;
        if from == to {
            return;
        }
        log::debug!("Phase {} -> {}", from.as_str(), to.as_str());
        self.state.phase = to;
        self.events.push(EngineEvent::PhaseChanged { from, to });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::EliminationPolicy;

    fn roster(n: usize) -> Roster {
        Roster::new(
            (0..n)
                .map(|i| {
                    Participant::new(format!("c{i}"), format!("Country {i}"))
                        .in_group(if i % 2 == 0 { "even" } else { "odd" })
                })
                .collect(),
        )
    }

    fn engine(n: usize, settings: Settings) -> Engine {
        let mut engine = Engine::seeded(settings, roster(n), 7).unwrap();
        engine.set_viewport(800.0, 600.0);
        engine
    }

    /// Step frames until `phase` is reached, collecting every event
    fn run_until(engine: &mut Engine, phase: MatchPhase, max_frames: usize) -> Vec<EngineEvent> {
        let mut events = Vec::new();
        for _ in 0..max_frames {
            events.extend(engine.step_frame());
            if engine.phase() == phase {
                break;
            }
        }
        events
    }

    fn fast_settings() -> Settings {
        Settings {
            gap_size: 0.3,
            ..Settings::default()
        }
        .with_auto_restart(false)
    }

    #[test]
    fn test_start_spawns_and_enters_spawning() {
        let mut engine = engine(6, Settings::default());
        let outcome = engine.start_round().unwrap();
        assert_eq!(outcome, StartOutcome::Started { entities: 6 });
        assert_eq!(engine.phase(), MatchPhase::Spawning);
        assert!(engine.loop_handle().is_some());

        let events = engine.take_events();
        assert!(events.contains(&EngineEvent::PhaseChanged {
            from: MatchPhase::Menu,
            to: MatchPhase::Spawning,
        }));
        assert!(events.contains(&EngineEvent::LiveCount(6)));
    }

    #[test]
    fn test_spawning_turns_into_playing_after_delay() {
        let mut engine = engine(4, Settings::default());
        engine.start_round().unwrap();
        for _ in 0..140 {
            engine.step_frame();
        }
        assert_eq!(engine.phase(), MatchPhase::Spawning);
        for _ in 0..20 {
            engine.step_frame();
        }
        assert_eq!(engine.phase(), MatchPhase::Playing);
    }

    #[test]
    fn test_deferred_until_viewport_is_set() {
        let mut engine = Engine::seeded(Settings::default(), roster(4), 1).unwrap();
        assert_eq!(engine.start_round().unwrap(), StartOutcome::Deferred);
        assert!(engine.is_deferred());
        assert_eq!(engine.phase(), MatchPhase::Menu);

        // Retries keep failing on a collapsed layout
        engine.set_viewport(0.0, 0.0);
        engine.advance(0.1);
        engine.advance(0.1);
        assert_eq!(engine.phase(), MatchPhase::Menu);

        engine.set_viewport(1024.0, 768.0);
        assert!(!engine.is_deferred());
        assert_eq!(engine.phase(), MatchPhase::Spawning);
        assert_eq!(engine.state().entities.len(), 4);
    }

    #[test]
    fn test_deferred_retry_timer_picks_up_layout() {
        let mut engine = Engine::seeded(Settings::default(), roster(3), 1).unwrap();
        engine.start_round().unwrap();
        // Layout arrives without a notification
        engine.state.viewport = Viewport::new(640.0, 480.0);
        engine.advance(0.05);
        engine.advance(0.06);
        assert_eq!(engine.phase(), MatchPhase::Spawning);
        assert!(!engine.is_deferred());
    }

    #[test]
    fn test_empty_selection_is_an_error() {
        let mut engine = engine(4, Settings::default());
        engine.set_group_filter(Some("nobody".to_string()));
        assert!(matches!(
            engine.start_round(),
            Err(EngineError::NoParticipants)
        ));
        assert_eq!(engine.phase(), MatchPhase::Menu);
    }

    #[test]
    fn test_single_participant_rejected_by_default() {
        let mut engine = engine(1, Settings::default());
        assert!(matches!(
            engine.start_round(),
            Err(EngineError::NotEnoughParticipants { available: 1 })
        ));
        assert!(engine.loop_handle().is_none());
    }

    #[test]
    fn test_single_participant_trivial_win() {
        let settings =
            Settings::default().with_degenerate_round(DegenerateRoundPolicy::TrivialWin);
        let mut engine = engine(1, settings);
        let outcome = engine.start_round().unwrap();

        let winner = match outcome {
            StartOutcome::TrivialWin(winner) => winner,
            other => panic!("expected trivial win, got {other:?}"),
        };
        assert_eq!(winner.code, "c0");
        assert_eq!(engine.phase(), MatchPhase::Winner);
        assert_eq!(engine.rankings().wins_for("c0"), 1);
        assert_eq!(engine.state().entities[0].status, EntityStatus::Frozen);
    }

    #[test]
    fn test_group_filter_limits_selection() {
        let mut engine = engine(6, Settings::default());
        engine.set_group_filter(Some("odd".to_string()));
        engine.start_round().unwrap();
        assert_eq!(engine.state().entities.len(), 3);
        for e in &engine.state().entities {
            let n: usize = e.code[1..].parse().unwrap();
            assert_eq!(n % 2, 1);
        }
    }

    #[test]
    fn test_round_ends_with_winner_event() {
        let mut engine = engine(5, fast_settings());
        engine.start_round().unwrap();
        let events = run_until(&mut engine, MatchPhase::Winner, 200_000);
        assert_eq!(engine.phase(), MatchPhase::Winner);

        let winner = events
            .iter()
            .find_map(|e| match e {
                EngineEvent::RoundEnded(w) => Some(w.clone()),
                _ => None,
            })
            .expect("round should end");
        let survivor = engine.state().survivor().unwrap();
        assert_eq!(engine.state().entities[survivor].code, winner.code);
        assert_eq!(engine.last_winner(), Some(&winner));

        let eliminated = events
            .iter()
            .filter(|e| matches!(e, EngineEvent::Eliminated { .. }))
            .count();
        assert_eq!(eliminated, 4);
    }

    #[test]
    fn test_countdown_then_restart() {
        let settings = fast_settings().with_auto_restart(true);
        let mut engine = engine(3, settings);
        engine.start_round().unwrap();
        let events = run_until(&mut engine, MatchPhase::Winner, 200_000);
        assert!(events.contains(&EngineEvent::CountdownTick(AUTO_RESTART_COUNTDOWN)));
        assert_eq!(engine.countdown(), Some(AUTO_RESTART_COUNTDOWN));

        // 4 seconds of countdown plus the grace second
        let mut ticks = Vec::new();
        for _ in 0..(60 * 6) {
            for event in engine.advance(FRAME_DT) {
                if let EngineEvent::CountdownTick(n) = event {
                    ticks.push(n);
                }
            }
            if engine.phase() == MatchPhase::Spawning {
                break;
            }
        }
        assert_eq!(ticks, vec![3, 2, 1, 0]);
        assert_eq!(engine.phase(), MatchPhase::Spawning);
        assert_eq!(engine.state().round, 2);
        assert_eq!(engine.countdown(), None);
    }

    #[test]
    fn test_no_countdown_without_auto_restart() {
        let mut engine = engine(3, fast_settings());
        engine.start_round().unwrap();
        run_until(&mut engine, MatchPhase::Winner, 200_000);
        for _ in 0..600 {
            engine.step_frame();
        }
        assert_eq!(engine.phase(), MatchPhase::Winner);
        assert_eq!(engine.countdown(), None);
    }

    #[test]
    fn test_champion_blocks_new_rounds_until_reset() {
        let settings = fast_settings()
            .with_points_to_win(1)
            .with_degenerate_round(DegenerateRoundPolicy::TrivialWin);
        let mut engine = engine(1, settings);
        engine.start_round().unwrap();
        assert_eq!(engine.phase(), MatchPhase::Champion);

        let champions = engine
            .take_events()
            .into_iter()
            .filter(|e| matches!(e, EngineEvent::ChampionReached(_)))
            .count();
        assert_eq!(champions, 1);
        assert!(matches!(engine.start_round(), Err(EngineError::MatchOver)));

        engine.reset();
        assert_eq!(engine.phase(), MatchPhase::Menu);
        assert!(engine.rankings().is_empty());
        assert!(engine.champion().is_none());
        // Leftovers keep animating in the menu
        assert!(engine.loop_handle().is_some());
        assert!(engine.start_round().is_ok());
    }

    #[test]
    fn test_existing_leader_crowned_when_threshold_lowered() {
        let mut engine = engine(2, fast_settings().with_points_to_win(5));
        engine.start_round().unwrap();
        for _ in 0..3 {
            engine.rankings.record_win("alpha", "Alpha");
        }
        engine.apply_settings(fast_settings().with_points_to_win(2)).unwrap();
        engine.take_events();

        let winner = engine.finish_round(1);
        assert_ne!(winner.code, "alpha");
        assert_eq!(engine.phase(), MatchPhase::Champion);
        assert_eq!(engine.champion().map(|e| e.code.as_str()), Some("alpha"));

        let crowned: Vec<RankingEntry> = engine
            .take_events()
            .into_iter()
            .filter_map(|e| match e {
                EngineEvent::ChampionReached(entry) => Some(entry),
                _ => None,
            })
            .collect();
        assert_eq!(crowned.len(), 1);
        assert_eq!(crowned[0].code, "alpha");
        assert_eq!(crowned[0].wins, 3);
        assert_eq!(engine.rankings().wins_for(&winner.code), 1);
    }

    #[test]
    fn test_restart_supersedes_pending_timers() {
        let mut engine = engine(4, Settings::default());
        engine.start_round().unwrap();
        let first = engine.loop_handle().unwrap();
        for _ in 0..100 {
            engine.step_frame();
        }
        engine.start_round().unwrap();
        assert_ne!(engine.loop_handle(), Some(first));

        // The first round's spawn timer would have fired here
        for _ in 0..100 {
            engine.step_frame();
        }
        assert_eq!(engine.phase(), MatchPhase::Spawning);
    }

    #[test]
    fn test_apply_settings_resizes_standing_entities() {
        let mut engine = engine(3, Settings::default());
        engine.start_round().unwrap();
        engine.state.entities[0].status = EntityStatus::Dead;

        let bigger = Settings {
            flag_size: 30.0,
            ..Settings::default()
        };
        engine.apply_settings(bigger).unwrap();
        assert_eq!(engine.state().entities[0].radius, 18.75);
        assert_eq!(engine.state().entities[1].radius, 30.0);
        assert_eq!(engine.state().entities[2].radius, 30.0);

        let broken = Settings {
            game_speed: f32::NAN,
            ..Settings::default()
        };
        assert!(engine.apply_settings(broken).is_err());
        assert_eq!(engine.settings().flag_size, 30.0);
    }

    #[test]
    fn test_coin_flip_round_still_ends() {
        let settings = fast_settings().with_elimination_policy(EliminationPolicy::CollisionCoinFlip);
        let mut engine = engine(8, settings);
        engine.start_round().unwrap();
        run_until(&mut engine, MatchPhase::Winner, 200_000);
        assert_eq!(engine.phase(), MatchPhase::Winner);
        assert_eq!(engine.standing_count(), 1);
    }

    #[test]
    fn test_snapshot_orders_by_z() {
        let mut engine = engine(4, Settings::default());
        engine.start_round().unwrap();
        engine.state.entities[2].status = EntityStatus::Dead;
        engine.state.entities[2].z_order = ELIMINATION_Z_BASE;

        let snapshot = engine.snapshot();
        assert_eq!(snapshot.phase, MatchPhase::Spawning);
        assert_eq!(snapshot.entities.len(), 4);
        assert_eq!(snapshot.entities[0].id, 2);
        assert_eq!(snapshot.live_count, 3);
        assert!(
            snapshot
                .entities
                .windows(2)
                .all(|w| w[0].z_order <= w[1].z_order)
        );
        assert!(serde_json::to_string(&snapshot).is_ok());
    }
}
