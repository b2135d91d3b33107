//! Scenario files: a genesis config plus a list of labelled steps.
//!
//! Accounts are written as `"@label"` anywhere a command expects an
//! account, and as a bare label in `caller`. Labels map to ids through
//! [`AccountId::named`], so the same file always produces the same ids.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tradepost_settlement::{MarketSnapshot, Marketplace};
use tradepost_types::{AccountId, Command, CurrencyConfig, EventRecord, MarketConfig, Outcome};

const LABEL_PREFIX: char = '@';

fn default_admin() -> String {
    "admin".to_string()
}

fn default_engine() -> String {
    "engine".to_string()
}

/// A scenario as read from disk.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    #[serde(default = "default_admin")]
    pub admin: String,
    #[serde(default = "default_engine")]
    pub engine: String,
    #[serde(default)]
    pub currency: CurrencyConfig,
    pub steps: Vec<Step>,
}

/// One command and the label of the account issuing it.
#[derive(Debug, Clone, Deserialize)]
pub struct Step {
    pub caller: String,
    /// A [`Command`] with `"@label"` placeholders for accounts. Numbers keep
    /// full `u128` precision (`arbitrary_precision`).
    pub command: Value,
}

/// A step the market refused.
#[derive(Debug, Clone, Serialize)]
pub struct Rejection {
    pub step: usize,
    pub op: &'static str,
    pub code: &'static str,
    pub error: String,
}

/// Result of a replay.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub applied: usize,
    pub rejected: Vec<Rejection>,
    /// Every label the scenario mentioned, with its account id.
    pub accounts: BTreeMap<String, AccountId>,
    pub snapshot: MarketSnapshot,
    /// Committed events, in order.
    pub events: Vec<EventRecord>,
}

impl Scenario {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("parsing scenario")
    }

    #[must_use]
    pub fn config(&self) -> MarketConfig {
        MarketConfig {
            currency: self.currency.clone(),
            genesis_admin: AccountId::named(&self.admin),
            engine_account: AccountId::named(&self.engine),
        }
    }

    /// Run every step. Rejected steps are logged and recorded; the replay
    /// carries on with the next one.
    pub fn replay(&self) -> Result<Report> {
        let mut market = Marketplace::new(self.config()).context("invalid market config")?;
        let mut accounts = BTreeMap::new();
        accounts.insert(self.admin.clone(), AccountId::named(&self.admin));
        accounts.insert(self.engine.clone(), AccountId::named(&self.engine));

        let mut applied = 0;
        let mut rejected = Vec::new();
        for (index, step) in self.steps.iter().enumerate() {
            let caller = AccountId::named(&step.caller);
            accounts.insert(step.caller.clone(), caller);
            let command = resolve_command(&step.command, &mut accounts)
                .with_context(|| format!("step {index}: bad command"))?;
            let op = command.name();

            match market.execute(caller, command) {
                Ok(outcome) => {
                    applied += 1;
                    if let Outcome::Minted(item) = outcome {
                        tracing::info!(step = index, caller = %step.caller, item = %item, "Minted");
                    } else {
                        tracing::debug!(step = index, caller = %step.caller, op, "Applied");
                    }
                }
                Err(err) => {
                    tracing::warn!(
                        step = index,
                        caller = %step.caller,
                        op,
                        code = err.code(),
                        error = %err,
                        "Step rejected"
                    );
                    rejected.push(Rejection {
                        step: index,
                        op,
                        code: err.code(),
                        error: err.to_string(),
                    });
                }
            }
        }

        market
            .verify_supply()
            .context("supply invariant broken after replay")?;

        Ok(Report {
            applied,
            rejected,
            accounts,
            snapshot: market.snapshot(),
            events: market.events().records().to_vec(),
        })
    }
}

/// Swap `"@label"` strings for account ids, then decode the command.
fn resolve_command(raw: &Value, accounts: &mut BTreeMap<String, AccountId>) -> Result<Command> {
    let resolved = resolve_labels(raw.clone(), accounts);
    Ok(serde_json::from_value(resolved)?)
}

fn resolve_labels(value: Value, accounts: &mut BTreeMap<String, AccountId>) -> Value {
    match value {
        Value::String(s) => match s.strip_prefix(LABEL_PREFIX) {
            Some(label) => {
                let id = AccountId::named(label);
                accounts.insert(label.to_string(), id);
                Value::String(id.0.to_string())
            }
            None => Value::String(s),
        },
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|v| resolve_labels(v, accounts))
                .collect(),
        ),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k, resolve_labels(v, accounts)))
                .collect(),
        ),
        other => other,
    }
}
