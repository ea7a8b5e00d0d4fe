//! Game session: the top-level state machine.
//!
//! A session owns both accounts, the clocks, the liquidation controller, and
//! the trade logs for one game on one trajectory. It moves only through
//! `start`, `pause`, `advance`, `advance_micro`, and `trade`. Each call either
//! applies fully or leaves the session untouched.
//!
//! Per market step (`advance`):
//!
//! 1. Tick the market clock and refresh the market point
//! 2. Mark both accounts to the new price
//! 3. Catch the micro clock up, decaying zeta once per micro step
//! 4. Check liquidation entry
//! 5. Liquidation step for both participants, or else the AI decision
//! 6. Check termination (broke, then time up)

use crate::config::{ConfigError, GameConfig};
use crate::domain::{
    Account, MarketPoint, Participant, TradeKind, TradeRecord, Trajectory, TrajectoryError,
};
use crate::engine::executor::TradeExecutor;
use crate::engine::friction::FULL_DECAY;
use crate::engine::liquidation::LiquidationController;
use crate::engine::policy::AiPolicy;
use crate::engine::snapshot::{AccountSnapshot, SessionSnapshot};
use crate::engine::SimulationClock;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Fatal session errors. A session that fails to build is never started.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("trajectory error: {0}")]
    Trajectory(#[from] TrajectoryError),

    #[error("trajectory {id} has {len} point(s); at least two are needed to play")]
    TrajectoryTooShort { id: String, len: usize },
}

/// Why the game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOverReason {
    /// Player wealth reached zero or below.
    Broke,
    /// Market time reached the terminal time.
    TimeUp,
}

impl fmt::Display for GameOverReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOverReason::Broke => write!(f, "broke"),
            GameOverReason::TimeUp => write!(f, "time_up"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "reason", rename_all = "snake_case")]
pub enum Lifecycle {
    NotStarted,
    Running,
    Paused,
    Over(GameOverReason),
}

/// Direction of a player order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeDirection {
    Buy,
    Sell,
}

impl TradeDirection {
    pub fn sign(self) -> f64 {
        match self {
            TradeDirection::Buy => 1.0,
            TradeDirection::Sell => -1.0,
        }
    }
}

/// Why a trade was not filled. Rejections never mutate the session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    /// The session is not running (not started, paused, or over).
    NotRunning,
    /// Manual trading is closed during liquidation.
    LiquidationPhase,
    /// Too few micro steps since the previous player trade.
    RateLimited { elapsed: usize, required: usize },
    /// Every micro step up to the next market step is already used.
    MicroBudgetSpent { micro_time: usize },
    /// Rule A: wealth after the trade would be negative.
    InsufficientWealth { post_trade_wealth: f64 },
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::NotRunning => write!(f, "session is not running"),
            RejectionReason::LiquidationPhase => write!(f, "liquidation phase"),
            RejectionReason::RateLimited { elapsed, required } => {
                write!(f, "rate limited ({elapsed}/{required} micro steps)")
            }
            RejectionReason::MicroBudgetSpent { micro_time } => {
                write!(f, "no micro step left before the next market step (micro {micro_time})")
            }
            RejectionReason::InsufficientWealth { post_trade_wealth } => {
                write!(f, "wealth would drop to {post_trade_wealth:.4}")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TradeOutcome {
    Filled(TradeRecord),
    Rejected(RejectionReason),
}

impl TradeOutcome {
    pub fn is_filled(&self) -> bool {
        matches!(self, TradeOutcome::Filled(_))
    }
}

/// What happened during one `advance()`.
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    pub time: usize,
    pub micro_time: usize,
    /// True only on the tick where the liquidation phase began.
    pub entered_liquidation: bool,
    pub ai_trade: Option<TradeRecord>,
    pub liquidation_trades: Vec<(Participant, TradeRecord)>,
    pub game_over: Option<GameOverReason>,
}

#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    trajectory: Arc<Trajectory>,
    clock: SimulationClock,
    market: MarketPoint,
    player: Account,
    ai: Account,
    policy: AiPolicy,
    liquidation: LiquidationController,
    player_log: Vec<TradeRecord>,
    ai_log: Vec<TradeRecord>,
    /// Micro time of the player's last fill.
    last_player_trade_micro: Option<usize>,
    /// Window in which the AI last filled.
    last_ai_window: Option<usize>,
    lifecycle: Lifecycle,
    warnings: Vec<String>,
}

impl GameSession {
    /// Build a session in the `NotStarted` state.
    ///
    /// A requested terminal time beyond the data is clamped to the trajectory's
    /// last time and reported in [`GameSession::warnings`].
    pub fn new(config: GameConfig, trajectory: Arc<Trajectory>) -> Result<Self, SessionError> {
        config.validate()?;
        if trajectory.len() < 2 {
            return Err(SessionError::TrajectoryTooShort {
                id: trajectory.id().to_string(),
                len: trajectory.len(),
            });
        }

        let mut warnings = Vec::new();
        let available = trajectory.last_time();
        let terminal_time = if config.terminal_time > available {
            let msg = format!(
                "terminal time {} exceeds available data for {}; clamped to {}",
                config.terminal_time,
                trajectory.id(),
                available
            );
            warn!("{msg}");
            warnings.push(msg);
            available
        } else {
            config.terminal_time
        };

        let market = *trajectory.point(0)?;
        let player = Account::new(config.initial_cash, config.initial_inventory, market.price);
        let ai = Account::new(config.initial_cash, config.initial_inventory, market.price);

        debug!(
            trajectory = %trajectory.id(),
            hash = trajectory.hash().short(),
            terminal_time,
            "session created"
        );

        Ok(Self {
            clock: SimulationClock::new(terminal_time, config.zeta_steps_per_market_step),
            liquidation: LiquidationController::new(terminal_time, config.liquidation_horizon),
            policy: AiPolicy::new(config.ai),
            config,
            trajectory,
            market,
            player,
            ai,
            player_log: Vec::new(),
            ai_log: Vec::new(),
            last_player_trade_micro: None,
            last_ai_window: None,
            lifecycle: Lifecycle::NotStarted,
            warnings,
        })
    }

    /// Start over on a new trajectory with the same configuration.
    ///
    /// On error the current session is left as it was.
    pub fn reset(&mut self, trajectory: Arc<Trajectory>) -> Result<(), SessionError> {
        *self = Self::new(self.config.clone(), trajectory)?;
        Ok(())
    }

    /// `NotStarted`/`Paused` → `Running`. Returns whether the session is now running.
    pub fn start(&mut self) -> bool {
        match self.lifecycle {
            Lifecycle::NotStarted | Lifecycle::Paused => {
                self.lifecycle = Lifecycle::Running;
                info!(t = self.clock.market_time(), "session running");
                true
            }
            Lifecycle::Running => true,
            Lifecycle::Over(_) => false,
        }
    }

    /// `Running` → `Paused`. Returns whether the session is now paused.
    pub fn pause(&mut self) -> bool {
        match self.lifecycle {
            Lifecycle::Running => {
                self.lifecycle = Lifecycle::Paused;
                true
            }
            Lifecycle::Paused => true,
            Lifecycle::NotStarted | Lifecycle::Over(_) => false,
        }
    }

    /// One market step. Returns `None` when nothing happened (not running or at the horizon).
    pub fn advance(&mut self) -> Result<Option<StepReport>, SessionError> {
        if self.lifecycle != Lifecycle::Running {
            return Ok(None);
        }
        let Some(t) = self.clock.tick_market() else {
            return Ok(None);
        };

        self.market = *self
            .trajectory
            .point(t.min(self.clock.terminal_time()))?;
        self.player.mark(self.market.price);
        self.ai.mark(self.market.price);

        while self.clock.micro_steps_behind() > 0 {
            self.clock.tick_micro();
            self.decay_both();
        }

        let entered_liquidation =
            self.liquidation
                .maybe_enter(t, self.player.inventory, self.ai.inventory);

        let mut report = StepReport {
            time: t,
            micro_time: self.clock.micro_time(),
            entered_liquidation,
            ai_trade: None,
            liquidation_trades: Vec::new(),
            game_over: None,
        };

        if self.liquidation.is_liquidating() {
            // the entry tick only fixes the schedules
            if !entered_liquidation {
                for who in [Participant::Player, Participant::Ai] {
                    if let Some(record) = self.liquidate(who) {
                        report.liquidation_trades.push((who, record));
                    }
                }
            }
        } else {
            report.ai_trade = self.run_ai()?;
        }

        report.game_over = self.check_termination();
        Ok(Some(report))
    }

    /// One tick of the fast micro clock: decay only, no trading.
    ///
    /// Never runs the micro clock past the next market step. Returns whether it ticked.
    pub fn advance_micro(&mut self) -> bool {
        if self.lifecycle != Lifecycle::Running || !self.clock.can_tick_micro() {
            return false;
        }
        self.clock.tick_micro();
        self.decay_both();
        true
    }

    /// Player order of one `player_trade_size` unit in `direction`.
    pub fn trade(&mut self, direction: TradeDirection) -> TradeOutcome {
        match self.try_trade(direction) {
            Ok(record) => TradeOutcome::Filled(record),
            Err(reason) => {
                debug!(?direction, %reason, "player trade rejected");
                TradeOutcome::Rejected(reason)
            }
        }
    }

    fn try_trade(&mut self, direction: TradeDirection) -> Result<TradeRecord, RejectionReason> {
        if self.lifecycle != Lifecycle::Running {
            return Err(RejectionReason::NotRunning);
        }
        if self.liquidation.is_liquidating() {
            return Err(RejectionReason::LiquidationPhase);
        }
        let required = self.config.min_micro_steps_between_trades;
        if let Some(last) = self.last_player_trade_micro {
            let elapsed = self.clock.micro_elapsed_since(last);
            if elapsed < required {
                return Err(RejectionReason::RateLimited { elapsed, required });
            }
        }
        if !self.clock.can_tick_micro() {
            return Err(RejectionReason::MicroBudgetSpent {
                micro_time: self.clock.micro_time(),
            });
        }

        let action = direction.sign() * self.config.player_trade_size;
        let MarketPoint {
            price,
            depth,
            resilience,
            ..
        } = self.market;
        let quote = self
            .player
            .friction()
            .preview(action, depth, resilience, FULL_DECAY);
        if !TradeExecutor::validate(
            self.player.cash,
            self.player.inventory,
            action,
            price,
            quote.cost,
        ) {
            return Err(RejectionReason::InsufficientWealth {
                post_trade_wealth: TradeExecutor::post_trade_wealth(
                    self.player.cash,
                    self.player.inventory,
                    action,
                    price,
                    quote.cost,
                ),
            });
        }

        TradeExecutor::apply(&mut self.player, action, price, quote);
        // the trade consumes the current micro step; the AI still decays through it
        let micro_time = self.clock.micro_time();
        self.clock.tick_micro();
        let scale = self.clock.micro_decay_scale();
        self.ai.friction_mut().decay(resilience, scale);

        let record = TradeRecord {
            time: self.clock.market_time(),
            micro_time,
            action,
            price,
            friction_cost: quote.cost,
            kind: TradeKind::Manual,
        };
        self.last_player_trade_micro = Some(micro_time);
        self.player_log.push(record.clone());
        debug!(
            t = record.time,
            micro = micro_time,
            action,
            cost = quote.cost,
            zeta = quote.zeta,
            "player fill"
        );

        if self.player.wealth() <= 0.0 {
            self.finish(GameOverReason::Broke);
        }
        Ok(record)
    }

    fn decay_both(&mut self) {
        let scale = self.clock.micro_decay_scale();
        let resilience = self.market.resilience;
        self.player.friction_mut().decay(resilience, scale);
        self.ai.friction_mut().decay(resilience, scale);
    }

    /// AI decision for the current step, at most one fill per window.
    fn run_ai(&mut self) -> Result<Option<TradeRecord>, SessionError> {
        let window = self.clock.window(self.config.points_per_window);
        if self.last_ai_window == Some(window) {
            return Ok(None);
        }
        let deviation = self.trajectory.price_deviation(self.market.time)?;
        let action = self.policy.decide(deviation, self.market.depth);
        if action == 0.0 {
            return Ok(None);
        }

        let MarketPoint {
            price,
            depth,
            resilience,
            ..
        } = self.market;
        let quote = self
            .ai
            .friction()
            .preview(action, depth, resilience, FULL_DECAY);
        if !TradeExecutor::validate(self.ai.cash, self.ai.inventory, action, price, quote.cost) {
            debug!(action, "ai trade rejected: insufficient wealth");
            return Ok(None);
        }
        TradeExecutor::apply(&mut self.ai, action, price, quote);
        self.last_ai_window = Some(window);

        let record = TradeRecord {
            time: self.clock.market_time(),
            micro_time: self.clock.micro_time(),
            action,
            price,
            friction_cost: quote.cost,
            kind: TradeKind::Policy,
        };
        self.ai_log.push(record.clone());
        debug!(t = record.time, action, cost = quote.cost, "ai fill");
        Ok(Some(record))
    }

    /// Scheduled unwind for one participant. Bypasses Rule A but still pays friction.
    fn liquidate(&mut self, who: Participant) -> Option<TradeRecord> {
        let inventory = self.account(who).inventory;
        let action = self.liquidation.next_action(who, inventory)?;

        let MarketPoint {
            price,
            depth,
            resilience,
            ..
        } = self.market;
        let time = self.clock.market_time();
        let micro_time = self.clock.micro_time();

        let (account, log) = match who {
            Participant::Player => (&mut self.player, &mut self.player_log),
            Participant::Ai => (&mut self.ai, &mut self.ai_log),
        };
        let quote = account
            .friction()
            .preview(action, depth, resilience, FULL_DECAY);
        TradeExecutor::apply(account, action, price, quote);

        let record = TradeRecord {
            time,
            micro_time,
            action,
            price,
            friction_cost: quote.cost,
            kind: TradeKind::Liquidation,
        };
        log.push(record.clone());
        debug!(%who, t = time, action, inventory = account.inventory, "liquidation fill");
        Some(record)
    }

    fn check_termination(&mut self) -> Option<GameOverReason> {
        let reason = if self.player.wealth() <= 0.0 {
            GameOverReason::Broke
        } else if self.clock.is_exhausted() {
            GameOverReason::TimeUp
        } else {
            return None;
        };
        self.finish(reason);
        Some(reason)
    }

    fn finish(&mut self, reason: GameOverReason) {
        self.lifecycle = Lifecycle::Over(reason);
        info!(
            %reason,
            t = self.clock.market_time(),
            player_wealth = self.player.wealth(),
            ai_wealth = self.ai.wealth(),
            "game over"
        );
    }

    // ── Read access ──────────────────────────────────────────────────

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn trajectory(&self) -> &Arc<Trajectory> {
        &self.trajectory
    }

    pub fn time(&self) -> usize {
        self.clock.market_time()
    }

    pub fn micro_time(&self) -> usize {
        self.clock.micro_time()
    }

    pub fn terminal_time(&self) -> usize {
        self.clock.terminal_time()
    }

    pub fn market(&self) -> &MarketPoint {
        &self.market
    }

    pub fn player(&self) -> &Account {
        &self.player
    }

    pub fn ai(&self) -> &Account {
        &self.ai
    }

    pub fn account(&self, who: Participant) -> &Account {
        match who {
            Participant::Player => &self.player,
            Participant::Ai => &self.ai,
        }
    }

    pub fn trade_log(&self, who: Participant) -> &[TradeRecord] {
        match who {
            Participant::Player => &self.player_log,
            Participant::Ai => &self.ai_log,
        }
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_running(&self) -> bool {
        self.lifecycle == Lifecycle::Running
    }

    pub fn is_over(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Over(_))
    }

    pub fn game_over_reason(&self) -> Option<GameOverReason> {
        match self.lifecycle {
            Lifecycle::Over(reason) => Some(reason),
            _ => None,
        }
    }

    pub fn is_in_liquidation_phase(&self) -> bool {
        self.liquidation.is_liquidating()
    }

    pub fn liquidation(&self) -> &LiquidationController {
        &self.liquidation
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Read-only view for the presentation layer.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            trajectory_id: self.trajectory.id(),
            dataset_hash: self.trajectory.hash().clone(),
            time: self.time(),
            terminal_time: self.terminal_time(),
            micro_time: self.micro_time(),
            market: self.market,
            phase: self.liquidation.phase(),
            in_liquidation: self.is_in_liquidation_phase(),
            lifecycle: self.lifecycle,
            is_running: self.is_running(),
            game_over: self.game_over_reason(),
            player: AccountSnapshot::capture(&self.player, &self.player_log),
            ai: AccountSnapshot::capture(&self.ai, &self.ai_log),
            warnings: self.warnings.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TrajectoryId;

    /// Flat market: price 100, depth 5, no resilience.
    fn flat(len: usize) -> Arc<Trajectory> {
        let triples = vec![(100.0, 5.0, 0.0); len];
        Arc::new(Trajectory::from_triples(TrajectoryId(0), &triples, 100.0).unwrap())
    }

    fn quiet_config(terminal_time: usize) -> GameConfig {
        GameConfig {
            terminal_time,
            ai: crate::engine::policy::AiParams {
                c0: 0.0,
                ..Default::default()
            },
            ..GameConfig::default()
        }
    }

    #[test]
    fn new_session_is_not_started() {
        let session = GameSession::new(quiet_config(10), flat(11)).unwrap();
        assert_eq!(session.lifecycle(), Lifecycle::NotStarted);
        assert_eq!(session.time(), 0);
        assert_eq!(session.terminal_time(), 10);
        assert!(session.warnings().is_empty());
    }

    #[test]
    fn advance_before_start_is_noop() {
        let mut session = GameSession::new(quiet_config(10), flat(11)).unwrap();
        assert_eq!(session.advance().unwrap(), None);
        assert_eq!(session.time(), 0);
    }

    #[test]
    fn terminal_time_is_clamped_with_warning() {
        let session = GameSession::new(quiet_config(50), flat(11)).unwrap();
        assert_eq!(session.terminal_time(), 10);
        assert_eq!(session.warnings().len(), 1);
        assert!(session.warnings()[0].contains("clamped to 10"));
    }

    #[test]
    fn single_point_trajectory_is_fatal() {
        let err = GameSession::new(quiet_config(10), flat(1)).err().unwrap();
        assert!(matches!(err, SessionError::TrajectoryTooShort { len: 1, .. }));
    }

    #[test]
    fn invalid_config_is_fatal() {
        let config = GameConfig {
            liquidation_horizon: 2.0,
            ..GameConfig::default()
        };
        assert!(matches!(
            GameSession::new(config, flat(11)),
            Err(SessionError::Config(_))
        ));
    }

    #[test]
    fn buy_matches_worked_example() {
        let mut session = GameSession::new(quiet_config(10), flat(11)).unwrap();
        session.start();
        let outcome = session.trade(TradeDirection::Buy);
        let TradeOutcome::Filled(record) = outcome else {
            panic!("expected fill, got {outcome:?}");
        };
        assert!((record.friction_cost - 0.2).abs() < 1e-12);
        assert!((session.player().cash - (1000.0 - 100.2)).abs() < 1e-9);
        assert_eq!(session.player().inventory, 1.0);
        assert!((session.player().friction().zeta() - 0.2).abs() < 1e-12);
        assert_eq!(record.micro_time, 0);
        assert_eq!(session.micro_time(), 1);
    }

    #[test]
    fn trade_gap_counts_micro_steps() {
        let config = GameConfig {
            min_micro_steps_between_trades: 2,
            ..quiet_config(10)
        };
        let mut session = GameSession::new(config, flat(11)).unwrap();
        session.start();
        assert!(session.trade(TradeDirection::Buy).is_filled());
        assert_eq!(
            session.trade(TradeDirection::Buy),
            TradeOutcome::Rejected(RejectionReason::RateLimited {
                elapsed: 1,
                required: 2
            })
        );
        assert!(session.advance_micro());
        assert!(session.trade(TradeDirection::Sell).is_filled());
    }

    #[test]
    fn back_to_back_trades_stop_at_the_micro_budget() {
        let mut session = GameSession::new(quiet_config(10), flat(11)).unwrap();
        session.start();
        let zeta_steps = session.config().zeta_steps_per_market_step;

        for step in 0..3 {
            let mut fills = Vec::new();
            while let TradeOutcome::Filled(record) = session.trade(TradeDirection::Buy) {
                fills.push(record.micro_time);
            }
            let first = step * zeta_steps;
            assert_eq!(fills, (first..first + zeta_steps).collect::<Vec<_>>());
            assert_eq!(session.micro_time(), (step + 1) * zeta_steps);
            assert_eq!(
                session.trade(TradeDirection::Buy),
                TradeOutcome::Rejected(RejectionReason::MicroBudgetSpent {
                    micro_time: (step + 1) * zeta_steps
                })
            );
            assert!(!session.advance_micro());

            session.advance().unwrap();
            assert_eq!(session.micro_time(), session.time() * zeta_steps);
        }
    }

    #[test]
    fn trade_while_paused_is_rejected() {
        let mut session = GameSession::new(quiet_config(10), flat(11)).unwrap();
        assert_eq!(
            session.trade(TradeDirection::Buy),
            TradeOutcome::Rejected(RejectionReason::NotRunning)
        );
        session.start();
        session.pause();
        assert_eq!(
            session.trade(TradeDirection::Buy),
            TradeOutcome::Rejected(RejectionReason::NotRunning)
        );
    }

    #[test]
    fn advance_catches_up_micro_clock() {
        let mut session = GameSession::new(quiet_config(10), flat(11)).unwrap();
        session.start();
        let report = session.advance().unwrap().unwrap();
        assert_eq!(report.time, 1);
        assert_eq!(report.micro_time, 4);
        // four decay-only steps per participant on top of the initial value
        assert_eq!(session.player().friction().history().len(), 5);
    }

    #[test]
    fn runs_to_time_up() {
        let mut session = GameSession::new(quiet_config(5), flat(11)).unwrap();
        session.start();
        let mut last = None;
        while let Some(report) = session.advance().unwrap() {
            last = Some(report);
        }
        let last = last.unwrap();
        assert_eq!(last.time, 5);
        assert_eq!(last.game_over, Some(GameOverReason::TimeUp));
        assert_eq!(session.game_over_reason(), Some(GameOverReason::TimeUp));
        assert!(!session.start());
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut session = GameSession::new(quiet_config(10), flat(11)).unwrap();
        session.start();
        session.trade(TradeDirection::Buy);
        session.advance().unwrap();

        session.reset(flat(21)).unwrap();
        assert_eq!(session.time(), 0);
        assert_eq!(session.micro_time(), 0);
        assert!(!session.is_running());
        assert_eq!(session.player().cash, 1000.0);
        assert_eq!(session.player().inventory, 0.0);
        assert_eq!(session.player().friction().zeta(), 0.0);
        assert!(session.trade_log(Participant::Player).is_empty());
        assert!(session.trade_log(Participant::Ai).is_empty());
        assert_eq!(session.terminal_time(), 10);
    }

    #[test]
    fn failed_reset_keeps_session() {
        let mut session = GameSession::new(quiet_config(10), flat(11)).unwrap();
        session.start();
        session.advance().unwrap();
        assert!(session.reset(flat(1)).is_err());
        assert_eq!(session.time(), 1);
        assert!(session.is_running());
    }
}
