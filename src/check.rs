use crate::client::{Connection, QueueServer};
use crate::error::{CheckError, ConnectionError};
use crate::report::{check_tubes, Report};
use crate::{ThresholdPair, ThresholdTable};

/// Everything a single run of the check needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckConfig {
    pub host: String,
    pub port: u16,
    pub warn: u64,
    pub crit: u64,
    /// Raw `name=warn,crit` arguments.
    pub overrides: Vec<String>,
    pub perfdata: bool,
}

impl Default for CheckConfig {
    fn default() -> Self {
        CheckConfig {
            host: "127.0.0.1".to_owned(),
            port: 11300,
            warn: 100,
            crit: 1000,
            overrides: Vec::new(),
            perfdata: false,
        }
    }
}

/// Runs the check against a beanstalkd server reached over TCP.
pub fn check(config: &CheckConfig) -> Result<Report, CheckError> {
    run_check(config, Connection::connect)
}

/// Runs the check with a custom way of reaching the server.
///
/// Thresholds are validated before `connect` is called, so a bad configuration never
/// touches the network. The server handle is dropped, and thereby released, before returning.
pub fn run_check<Q, F>(config: &CheckConfig, connect: F) -> Result<Report, CheckError>
where
    Q: QueueServer,
    F: FnOnce(&str, u16) -> Result<Q, ConnectionError>,
{
    let defaults = ThresholdPair::new(config.warn, config.crit)?;
    let mut table = ThresholdTable::from_overrides(&config.overrides, defaults)?;
    tracing::debug!(overrides = table.len(), ?defaults, "thresholds loaded");

    let mut server = connect(&config.host, config.port)?;

    let names = server.list_tubes()?;
    tracing::debug!(tubes = names.len(), "listed tubes");

    let report = check_tubes(&mut server, &mut table, &names, config.perfdata)?;
    tracing::info!(tubes = report.results().len(), state = %report.state(), "check finished");

    Ok(report)
}
