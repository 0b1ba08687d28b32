use std::cmp::Ordering;
use std::fmt;

/// Represents a service state from nagios.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl State {
    /// Returns the corresponding nagios exit code to signal the service state of self.
    pub fn exit_code(&self) -> i32 {
        match self {
            State::Ok => 0,
            State::Warning => 1,
            State::Critical => 2,
            State::Unknown => 3,
        }
    }

    /// Returns the more severe of both states. Once critical, always critical.
    pub fn worst(self, other: State) -> State {
        std::cmp::max(self, other)
    }

    /// The label printed in front of every tube in the report.
    ///
    /// The mixed casing is part of the output format existing service definitions parse.
    pub fn label(&self) -> &'static str {
        match self {
            State::Ok => " OK ",
            State::Warning => " warning ",
            State::Critical => " Critical ",
            State::Unknown => " UNKNOWN ",
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            State::Ok => "OK",
            State::Warning => "WARNING",
            State::Critical => "CRITICAL",
            State::Unknown => "UNKNOWN",
        };
        f.write_str(s)
    }
}

impl Ord for State {
    fn cmp(&self, other: &State) -> Ordering {
        let f = |state: &State| match state {
            State::Ok => 0,
            State::Warning => 1,
            State::Critical => 2,
            State::Unknown => 3,
        };

        f(self).cmp(&f(other))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &State) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::State;

    #[test]
    fn test_state() {
        assert_eq!(State::Ok.exit_code(), 0);
        assert_eq!(State::Warning.exit_code(), 1);
        assert_eq!(State::Critical.exit_code(), 2);
        assert_eq!(State::Unknown.exit_code(), 3);

        assert_eq!(&State::Ok.to_string(), "OK");
        assert_eq!(&State::Warning.to_string(), "WARNING");
        assert_eq!(&State::Critical.to_string(), "CRITICAL");
        assert_eq!(&State::Unknown.to_string(), "UNKNOWN");
    }

    #[test]
    fn test_labels() {
        assert_eq!(State::Ok.label(), " OK ");
        assert_eq!(State::Warning.label(), " warning ");
        assert_eq!(State::Critical.label(), " Critical ");
        assert_eq!(State::Unknown.label(), " UNKNOWN ");
    }

    #[test]
    fn test_worst_wins_regardless_of_order() {
        let sequences = [
            (vec![State::Ok, State::Warning, State::Critical], State::Critical),
            (vec![State::Critical, State::Warning, State::Ok], State::Critical),
            (vec![State::Warning, State::Ok, State::Ok], State::Warning),
            (vec![State::Ok, State::Critical, State::Warning], State::Critical),
            (vec![State::Ok, State::Ok], State::Ok),
            (vec![], State::Ok),
        ];

        for (states, expected) in sequences {
            let merged = states.iter().fold(State::Ok, |acc, st| acc.worst(*st));
            assert_eq!(merged, expected, "{states:?}");
        }
    }

    #[test]
    fn test_ordering() {
        assert!(State::Ok < State::Warning);
        assert!(State::Warning < State::Critical);
        assert!(State::Critical < State::Unknown);
    }
}
