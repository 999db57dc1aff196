use rollsim_execution::craps::PayoutTable;
use rollsim_types::craps::{
    BetKind, ParseBetKindError, RuleGroup, DEFAULT_REPLAY_WINDOW, MAX_BET_AMOUNT,
    MAX_PAYOUT_TO_ONE, STARTING_BANK,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;
use tracing::Level;

/// Configuration for a [crate::Simulator] session.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Config {
    /// Starting bankroll in whole units.
    #[serde(default = "default_bank")]
    pub bank: u64,
    pub seed: u64,
    pub rolls: u64,
    pub log_level: String,
    #[serde(default)]
    pub json_logs: bool,
    /// Resolve every roll twice under the same id.
    #[serde(default)]
    pub resignal: bool,
    #[serde(default = "default_replay_window")]
    pub replay_window: usize,
    #[serde(default)]
    pub payouts: PayoutConfig,
    #[serde(default)]
    pub strategy: Vec<StandingBet>,
}

/// House-configurable payouts, as `N` to 1.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PayoutConfig {
    #[serde(default = "default_any_seven")]
    pub any_seven: u64,
    #[serde(default = "default_field_twelve")]
    pub field_twelve: u64,
}

impl Default for PayoutConfig {
    fn default() -> Self {
        Self {
            any_seven: default_any_seven(),
            field_twelve: default_field_twelve(),
        }
    }
}

/// A bet the bettor keeps on the layout whenever it can.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct StandingBet {
    /// Area id, e.g. `pass-line`, `place-6`, `hard-8`.
    pub bet: String,
    pub amount: u64,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid log level: {value}")]
    InvalidLogLevel { value: String },
    #[error("{field} must be > 0 (got {value})")]
    InvalidNonZero { field: &'static str, value: u64 },
    #[error("invalid strategy bet: {value}")]
    InvalidBet {
        value: String,
        #[source]
        source: ParseBetKindError,
    },
    #[error("{kind} cannot be placed directly")]
    UnplaceableBet { kind: BetKind },
    #[error("{kind} appears more than once in the strategy")]
    DuplicateBet { kind: BetKind },
    #[error("{field} must be <= {max} (got {value})")]
    TooLarge {
        field: &'static str,
        value: u64,
        max: u64,
    },
}

/// A validated standing bet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Wager {
    pub kind: BetKind,
    pub amount: u64,
}

#[derive(Clone, Debug)]
pub struct ValidatedConfig {
    pub bank: u64,
    pub seed: u64,
    pub rolls: u64,
    pub log_level: Level,
    pub json_logs: bool,
    pub resignal: bool,
    pub replay_window: usize,
    pub payouts: PayoutTable,
    pub strategy: Vec<Wager>,
}

fn default_bank() -> u64 {
    STARTING_BANK
}

fn default_replay_window() -> usize {
    DEFAULT_REPLAY_WINDOW
}

fn default_any_seven() -> u64 {
    4
}

fn default_field_twelve() -> u64 {
    3
}

fn parse_wager(standing: &StandingBet) -> Result<Wager, ConfigError> {
    let kind = BetKind::from_str(&standing.bet).map_err(|source| ConfigError::InvalidBet {
        value: standing.bet.clone(),
        source,
    })?;
    if kind.group() == RuleGroup::ComePoint {
        return Err(ConfigError::UnplaceableBet { kind });
    }
    if standing.amount == 0 {
        return Err(ConfigError::InvalidNonZero {
            field: "strategy.amount",
            value: 0,
        });
    }
    if standing.amount > MAX_BET_AMOUNT {
        return Err(ConfigError::TooLarge {
            field: "strategy.amount",
            value: standing.amount,
            max: MAX_BET_AMOUNT,
        });
    }
    Ok(Wager {
        kind,
        amount: standing.amount,
    })
}

impl Config {
    pub fn validate(self) -> Result<ValidatedConfig, ConfigError> {
        if self.replay_window == 0 {
            return Err(ConfigError::InvalidNonZero {
                field: "replay_window",
                value: 0,
            });
        }
        if self.payouts.any_seven == 0 {
            return Err(ConfigError::InvalidNonZero {
                field: "payouts.any_seven",
                value: 0,
            });
        }
        if self.payouts.field_twelve == 0 {
            return Err(ConfigError::InvalidNonZero {
                field: "payouts.field_twelve",
                value: 0,
            });
        }
        for (field, value) in [
            ("payouts.any_seven", self.payouts.any_seven),
            ("payouts.field_twelve", self.payouts.field_twelve),
        ] {
            if value > MAX_PAYOUT_TO_ONE {
                return Err(ConfigError::TooLarge {
                    field,
                    value,
                    max: MAX_PAYOUT_TO_ONE,
                });
            }
        }

        let log_level =
            Level::from_str(&self.log_level).map_err(|_| ConfigError::InvalidLogLevel {
                value: self.log_level.clone(),
            })?;

        let mut strategy: Vec<Wager> = Vec::with_capacity(self.strategy.len());
        for standing in &self.strategy {
            let wager = parse_wager(standing)?;
            if strategy.iter().any(|w| w.kind == wager.kind) {
                return Err(ConfigError::DuplicateBet { kind: wager.kind });
            }
            strategy.push(wager);
        }

        let payouts = PayoutTable::standard()
            .with_any_seven(self.payouts.any_seven)
            .with_field_twelve(self.payouts.field_twelve);

        Ok(ValidatedConfig {
            bank: self.bank,
            seed: self.seed,
            rolls: self.rolls,
            log_level,
            json_logs: self.json_logs,
            resignal: self.resignal,
            replay_window: self.replay_window,
            payouts,
            strategy,
        })
    }
}
