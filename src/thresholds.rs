use std::collections::HashMap;

use crate::error::ConfigError;
use crate::State;

/// Ready-job counts separating OK from WARNING and WARNING from CRITICAL.
///
/// `crit` is always strictly larger than `warn`, [ThresholdPair::new] refuses anything else.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThresholdPair {
    warn: u64,
    crit: u64,
}

impl ThresholdPair {
    pub fn new(warn: u64, crit: u64) -> Result<Self, ConfigError> {
        if crit <= warn {
            return Err(ConfigError::InvalidThresholds { warn, crit });
        }
        Ok(ThresholdPair { warn, crit })
    }

    pub fn warn(&self) -> u64 {
        self.warn
    }

    pub fn crit(&self) -> u64 {
        self.crit
    }

    /// Determines the state of a tube holding `ready` ready jobs.
    ///
    /// A count equal to `warn` is already a warning, a count equal to `crit` is critical.
    ///
    /// ```rust
    /// # use check_beanstalkd::{State, ThresholdPair};
    /// let pair = ThresholdPair::new(15, 30).unwrap();
    /// assert_eq!(pair.evaluate(14), State::Ok);
    /// assert_eq!(pair.evaluate(15), State::Warning);
    /// assert_eq!(pair.evaluate(30), State::Critical);
    /// ```
    pub fn evaluate(&self, ready: u64) -> State {
        if ready < self.warn {
            State::Ok
        } else if ready < self.crit {
            State::Warning
        } else {
            State::Critical
        }
    }
}

/// See [ThresholdPair::evaluate].
pub fn evaluate(ready: u64, thresholds: ThresholdPair) -> State {
    thresholds.evaluate(ready)
}

/// Parses a single `name=warn,crit` override.
pub fn parse_override(arg: &str) -> Result<(String, ThresholdPair), ConfigError> {
    let malformed = |reason: &str| ConfigError::MalformedOverride {
        arg: arg.to_owned(),
        reason: reason.to_owned(),
    };

    let (name, values) = arg.split_once('=').ok_or_else(|| malformed("missing '='"))?;
    if name.is_empty() {
        return Err(malformed("empty tube name"));
    }

    let (warn, crit) = values
        .split_once(',')
        .ok_or_else(|| malformed("missing ','"))?;
    let warn: u64 = warn
        .parse()
        .map_err(|_| malformed("warn is not a non-negative integer"))?;
    let crit: u64 = crit
        .parse()
        .map_err(|_| malformed("crit is not a non-negative integer"))?;

    let pair = ThresholdPair::new(warn, crit).map_err(|_| ConfigError::InvalidOverride {
        name: name.to_owned(),
        warn,
        crit,
    })?;

    Ok((name.to_owned(), pair))
}

/// Per-tube thresholds for one run, falling back to the global defaults.
#[derive(Clone, Debug)]
pub struct ThresholdTable {
    defaults: ThresholdPair,
    tubes: HashMap<String, ThresholdPair>,
}

impl ThresholdTable {
    pub fn new(defaults: ThresholdPair) -> Self {
        ThresholdTable {
            defaults,
            tubes: HashMap::new(),
        }
    }

    /// Builds the table from `name=warn,crit` arguments. Later arguments for the same tube
    /// replace earlier ones.
    pub fn from_overrides<I, S>(args: I, defaults: ThresholdPair) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = ThresholdTable::new(defaults);
        for arg in args {
            let (name, pair) = parse_override(arg.as_ref())?;
            table.insert(name, pair);
        }
        Ok(table)
    }

    pub fn insert(&mut self, name: String, pair: ThresholdPair) {
        if let Some(previous) = self.tubes.insert(name.clone(), pair) {
            tracing::debug!(tube = %name, ?previous, replacement = ?pair, "threshold override replaced");
        }
    }

    pub fn get(&self, name: &str) -> Option<ThresholdPair> {
        self.tubes.get(name).copied()
    }

    /// Returns the thresholds of `name`, remembering the defaults for tubes without an override.
    pub fn resolve(&mut self, name: &str) -> ThresholdPair {
        let defaults = self.defaults;
        *self.tubes.entry(name.to_owned()).or_insert(defaults)
    }

    /// Number of tubes with known thresholds, overridden or already resolved.
    pub(crate) fn len(&self) -> usize {
        self.tubes.len()
    }
}
