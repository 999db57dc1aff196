//! Seeded craps sessions.
//!
//! A [Simulator] plays a fixed strategy of standing bets against a
//! [CrapsTable], rolling dice from a seeded [ChaCha8Rng] so the same
//! configuration always plays out the same way.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rollsim_execution::craps::{CrapsTable, ResolutionError};
use rollsim_types::craps::{
    Bet, Credits, Disposition, ResolutionReport, RollId, RollOutcome, TablePhase, MAX_DIE,
    MIN_DIE,
};
use serde::Serialize;
use tracing::{debug, info, warn};

mod config;
pub use config::{Config, ConfigError, PayoutConfig, StandingBet, ValidatedConfig, Wager};

/// Running totals for a session.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SessionStats {
    pub rolls: u64,
    /// Rounds ended by a point made or a seven out.
    pub rounds: u64,
    pub naturals: u64,
    pub craps: u64,
    pub points_set: u64,
    pub points_made: u64,
    pub seven_outs: u64,
    pub wins: u64,
    pub losses: u64,
    pub pushes: u64,
    pub moves: u64,
    /// Units put down from the bank.
    pub wagered: u64,
    /// Stakes and winnings credited back to the bank.
    pub returned: Credits,
}

impl SessionStats {
    fn record(&mut self, report: &ResolutionReport) {
        self.rolls += 1;
        if report.outcome.ends_round() {
            self.rounds += 1;
        }
        match report.outcome {
            RollOutcome::Natural => self.naturals += 1,
            RollOutcome::Craps => self.craps += 1,
            RollOutcome::PointSet(_) => self.points_set += 1,
            RollOutcome::PointMade(_) => self.points_made += 1,
            RollOutcome::SevenOut => self.seven_outs += 1,
            RollOutcome::Normal => {}
        }
        for resolution in &report.resolutions {
            match resolution.disposition {
                Disposition::Win(_) => self.wins += 1,
                Disposition::Lose => self.losses += 1,
                Disposition::Push => self.pushes += 1,
                Disposition::Move(_) => self.moves += 1,
                Disposition::Unresolved => {}
            }
        }
        self.returned += report.total_returned();
    }
}

/// End-of-session summary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub seed: u64,
    pub starting_bank: Credits,
    pub final_bank: Credits,
    /// Units still on the layout.
    pub on_table: u64,
    /// `final_bank + on_table - starting_bank`
    pub net: Credits,
    pub phase: TablePhase,
    pub last_roll_id: Option<RollId>,
    pub active_bets: Vec<Bet>,
    pub stats: SessionStats,
}

pub struct Simulator {
    table: CrapsTable,
    rng: ChaCha8Rng,
    seed: u64,
    starting_bank: Credits,
    bank: Credits,
    strategy: Vec<Wager>,
    rolls: u64,
    resignal: bool,
    next_roll_id: RollId,
    stats: SessionStats,
}

impl Simulator {
    pub fn new(config: ValidatedConfig) -> Self {
        let table =
            CrapsTable::with_payouts(config.payouts).with_replay_window(config.replay_window);
        let bank = Credits::from_units(config.bank);
        Self {
            table,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            seed: config.seed,
            starting_bank: bank,
            bank,
            strategy: config.strategy,
            rolls: config.rolls,
            resignal: config.resignal,
            next_roll_id: 1,
            stats: SessionStats::default(),
        }
    }

    pub fn table(&self) -> &CrapsTable {
        &self.table
    }

    pub fn bank(&self) -> Credits {
        self.bank
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Put down every standing bet that is legal, absent and affordable.
    pub fn place_strategy(&mut self) {
        for wager in &self.strategy {
            if self.table.state().find(wager.kind).is_some()
                || !self.table.can_place(wager.kind)
                || !self.bank.covers(wager.amount)
            {
                continue;
            }
            match self.table.place(wager.kind, wager.amount, self.bank) {
                Ok(_) => {
                    self.bank -= Credits::from_units(wager.amount);
                    self.stats.wagered = self.stats.wagered.saturating_add(wager.amount);
                }
                Err(err) => warn!(kind = %wager.kind, ?err, "standing bet rejected"),
            }
        }
    }

    /// Resolve `(die1, die2)` under the next roll id and settle with the bank.
    pub fn roll(&mut self, die1: u8, die2: u8) -> Result<ResolutionReport, ResolutionError> {
        let id = self.next_roll_id;
        let report = self.table.resolve(id, die1, die2)?;
        self.next_roll_id += 1;
        if self.resignal {
            // The duplicate must come back unchanged and settle nothing.
            let replay = self.table.resolve(id, die1, die2)?;
            debug_assert_eq!(replay, report);
        }
        self.bank += report.total_returned();
        self.stats.record(&report);
        debug!(
            id,
            outcome = %report.outcome,
            bank = %self.bank,
            on_table = self.table.state().total_wagered(),
            "settled roll"
        );
        Ok(report)
    }

    /// Place the strategy and roll once.
    pub fn step(&mut self) -> Result<ResolutionReport, ResolutionError> {
        self.place_strategy();
        let die1 = self.rng.gen_range(MIN_DIE..=MAX_DIE);
        let die2 = self.rng.gen_range(MIN_DIE..=MAX_DIE);
        self.roll(die1, die2)
    }

    /// No bets are working and none of the strategy can be afforded.
    pub fn exhausted(&self) -> bool {
        self.table.state().is_empty()
            && !self
                .strategy
                .iter()
                .any(|wager| self.bank.covers(wager.amount))
    }

    /// Step until the roll budget is spent or the bank is exhausted.
    pub fn run(&mut self) -> Result<Summary, ResolutionError> {
        while self.stats.rolls < self.rolls {
            if self.exhausted() {
                info!(rolls = self.stats.rolls, bank = %self.bank, "bank exhausted");
                break;
            }
            self.step()?;
        }
        let summary = self.summary();
        info!(
            rolls = summary.stats.rolls,
            final_bank = %summary.final_bank,
            net = %summary.net,
            "session complete"
        );
        Ok(summary)
    }

    pub fn summary(&self) -> Summary {
        let on_table = self.table.state().total_wagered();
        Summary {
            seed: self.seed,
            starting_bank: self.starting_bank,
            final_bank: self.bank,
            on_table,
            net: self.bank + Credits::from_units(on_table) - self.starting_bank,
            phase: self.table.current_phase(),
            last_roll_id: self.table.last_roll_id(),
            active_bets: self.table.active_bets(),
            stats: self.stats.clone(),
        }
    }
}
