use crate::State;

/// Invalid thresholds or command line input. Always raised before the server is contacted.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("crit ({crit}) must be larger than warn ({warn})")]
    InvalidThresholds { warn: u64, crit: u64 },
    #[error("malformed threshold override {arg:?}: {reason}, expected name=warn,crit")]
    MalformedOverride { arg: String, reason: String },
    #[error("tube {name:?}: crit ({crit}) must be larger than warn ({warn})")]
    InvalidOverride { name: String, warn: u64, crit: u64 },
}

#[derive(Debug, thiserror::Error)]
#[error("could not connect to {addr}: {source}")]
pub struct ConnectionError {
    pub addr: String,
    #[source]
    pub source: std::io::Error,
}

/// The server answered something we cannot turn into a tube list or tube stats.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("connection closed by server")]
    Closed,
    #[error("unexpected response to {command:?}: {line:?}")]
    UnexpectedResponse { command: String, line: String },
    #[error("tube {0:?} not found")]
    NotFound(String),
    #[error("could not decode {what}: {reason}; payload: {payload:?}")]
    Decode {
        what: &'static str,
        reason: String,
        payload: String,
    },
}

impl ProtocolError {
    pub(crate) fn decode(what: &'static str, reason: impl Into<String>, payload: &[u8]) -> Self {
        ProtocolError::Decode {
            what,
            reason: reason.into(),
            payload: String::from_utf8_lossy(payload).into_owned(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Connection(#[from] ConnectionError),
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),
}

impl CheckError {
    /// None of these errors lets us determine the tube states, so all of them are unknown.
    pub fn state(&self) -> State {
        match self {
            CheckError::Config(_) | CheckError::Connection(_) | CheckError::Protocol(_) => {
                State::Unknown
            }
        }
    }
}
