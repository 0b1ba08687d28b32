use std::process;

use crate::client::QueueServer;
use crate::error::ProtocolError;
use crate::perfdata::ToPerfString;
use crate::{State, ThresholdPair, ThresholdTable};

/// The evaluated state of one tube.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TubeResult {
    pub name: String,
    pub ready: u64,
    pub thresholds: ThresholdPair,
    pub state: State,
}

impl TubeResult {
    pub fn new(name: &str, ready: u64, thresholds: ThresholdPair) -> Self {
        TubeResult {
            name: name.to_owned(),
            ready,
            thresholds,
            state: thresholds.evaluate(ready),
        }
    }

    /// The text printed for this tube, e.g. `" warning orders Jobs Ready:42;;  "`.
    pub fn fragment(&self) -> String {
        format!(
            "{}{} Jobs Ready:{};;  ",
            self.state.label(),
            self.name,
            self.ready
        )
    }
}

/// The outcome of a check: one result per tube plus the state derived from them.
///
/// ```rust
/// # use check_beanstalkd::{Report, State, ThresholdPair, TubeResult};
/// let thresholds = ThresholdPair::new(100, 1000).unwrap();
/// let mut report = Report::new(false);
/// report.push(TubeResult::new("default", 5, thresholds));
/// assert_eq!(report.state(), State::Ok);
/// assert_eq!(&report.to_nagios_string(), " OK default Jobs Ready:5;;  ");
/// ```
#[derive(Clone, Debug, Default)]
pub struct Report {
    results: Vec<TubeResult>,
    perfdata: bool,
}

impl Report {
    /// With `perfdata` set, nagios performance data is appended to the output.
    pub fn new(perfdata: bool) -> Report {
        Report {
            results: Vec::new(),
            perfdata,
        }
    }

    pub fn push(&mut self, result: TubeResult) {
        self.results.push(result)
    }

    pub fn results(&self) -> &[TubeResult] {
        &self.results
    }

    /// The worst state of all tubes. A report without tubes is OK.
    pub fn state(&self) -> State {
        let mut state = State::Ok;
        for result in self.results.iter() {
            state = state.worst(result.state);
        }
        state
    }

    /// Returns the line printed for nagios.
    pub fn to_nagios_string(&self) -> String {
        let mut s: String = self.results.iter().map(TubeResult::fragment).collect();

        if self.perfdata && !self.results.is_empty() {
            s.push('|');
            for result in self.results.iter() {
                s.push_str(&format!(" {}", result.to_perf_string()));
            }
        }

        s
    }

    pub fn exit_code(&self) -> i32 {
        self.state().exit_code()
    }

    /// Will print Self::to_nagios_string and exit with the exit code from Self::exit_code
    pub fn print_and_exit(&self) -> ! {
        println!("{}", self.to_nagios_string());
        process::exit(self.exit_code());
    }
}

/// Evaluates every tube in `names` against its thresholds.
///
/// The first tube whose stats can't be fetched aborts the whole check.
pub fn check_tubes<Q>(
    server: &mut Q,
    table: &mut ThresholdTable,
    names: &[String],
    perfdata: bool,
) -> Result<Report, ProtocolError>
where
    Q: QueueServer + ?Sized,
{
    let mut report = Report::new(perfdata);

    for name in names {
        let thresholds = table.resolve(name);
        let stats = server.stats_tube(name)?;
        let result = TubeResult::new(name, stats.current_jobs_ready, thresholds);

        tracing::debug!(
            tube = %name,
            ready = result.ready,
            warn = thresholds.warn(),
            crit = thresholds.crit(),
            state = %result.state,
            "evaluated tube"
        );
        report.push(result);
    }

    Ok(report)
}
