//! Liquidation controller: forced unwind near the end of the horizon.
//!
//! **Core Rule:** once the phase flips to `Liquidation` it never flips back,
//! and an unwind step may reach flat but never cross into the opposite side.

use crate::domain::Participant;
use serde::Serialize;
use tracing::info;

/// Session phase with respect to forced liquidation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Accumulation,
    Liquidation,
}

/// Linear unwind schedule for one participant.
///
/// Fixed at phase entry; only `steps_elapsed` moves afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LiquidationSchedule {
    start_time: usize,
    inventory_at_start: f64,
    rate_per_step: f64,
    steps_elapsed: usize,
}

impl LiquidationSchedule {
    /// Schedule unwinding `inventory` between `start_time` and `terminal_time`.
    ///
    /// A non-positive remaining period yields a zero rate: nothing is traded.
    pub fn new(start_time: usize, terminal_time: usize, inventory: f64) -> Self {
        let rate_per_step = if terminal_time > start_time {
            -inventory / (terminal_time - start_time) as f64
        } else {
            0.0
        };
        Self {
            start_time,
            inventory_at_start: inventory,
            rate_per_step,
            steps_elapsed: 0,
        }
    }

    pub fn start_time(&self) -> usize {
        self.start_time
    }

    pub fn inventory_at_start(&self) -> f64 {
        self.inventory_at_start
    }

    pub fn rate_per_step(&self) -> f64 {
        self.rate_per_step
    }

    pub fn steps_elapsed(&self) -> usize {
        self.steps_elapsed
    }

    /// Inventory the schedule aims for after `steps_elapsed` steps.
    pub fn target(&self) -> f64 {
        self.inventory_at_start + self.rate_per_step * self.steps_elapsed as f64
    }

    /// Advance one step and return the unwind order, if any.
    ///
    /// `desired = round(target - inventory)`. If applying it would flip the sign
    /// of the inventory, the order is clamped to `-inventory`.
    pub fn next_action(&mut self, inventory: f64) -> Option<f64> {
        self.steps_elapsed += 1;
        if self.rate_per_step == 0.0 || inventory == 0.0 {
            return None;
        }
        let desired = (self.target() - inventory).round();
        if desired == 0.0 {
            return None;
        }
        let after = inventory + desired;
        if after != 0.0 && after.signum() != inventory.signum() {
            Some(-inventory)
        } else {
            Some(desired)
        }
    }
}

/// Time at which liquidation starts: `floor(terminal_time * horizon_fraction)`.
pub fn trigger_time(terminal_time: usize, horizon_fraction: f64) -> usize {
    (terminal_time as f64 * horizon_fraction).floor() as usize
}

/// Two-state machine: Accumulation → Liquidation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiquidationController {
    terminal_time: usize,
    trigger_time: usize,
    phase: Phase,
    player: Option<LiquidationSchedule>,
    ai: Option<LiquidationSchedule>,
}

impl LiquidationController {
    pub fn new(terminal_time: usize, horizon_fraction: f64) -> Self {
        Self {
            terminal_time,
            trigger_time: trigger_time(terminal_time, horizon_fraction),
            phase: Phase::Accumulation,
            player: None,
            ai: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_liquidating(&self) -> bool {
        self.phase == Phase::Liquidation
    }

    pub fn trigger_time(&self) -> usize {
        self.trigger_time
    }

    /// Enter liquidation if `t` has reached the trigger. Returns `true` only on
    /// the tick where the transition happens.
    pub fn maybe_enter(&mut self, t: usize, player_inventory: f64, ai_inventory: f64) -> bool {
        if self.is_liquidating() || t < self.trigger_time {
            return false;
        }
        self.phase = Phase::Liquidation;
        self.player = Some(LiquidationSchedule::new(
            t,
            self.terminal_time,
            player_inventory,
        ));
        self.ai = Some(LiquidationSchedule::new(t, self.terminal_time, ai_inventory));
        info!(
            t,
            player_inventory, ai_inventory, "entering liquidation phase"
        );
        true
    }

    pub fn schedule(&self, who: Participant) -> Option<&LiquidationSchedule> {
        match who {
            Participant::Player => self.player.as_ref(),
            Participant::Ai => self.ai.as_ref(),
        }
    }

    /// Next unwind order for `who`. `None` outside the liquidation phase.
    pub fn next_action(&mut self, who: Participant, inventory: f64) -> Option<f64> {
        let schedule = match who {
            Participant::Player => self.player.as_mut(),
            Participant::Ai => self.ai.as_mut(),
        }?;
        schedule.next_action(inventory)
    }
}
