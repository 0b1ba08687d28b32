//! A nagios/icinga check for beanstalkd.
//!
//! Every tube of the server is checked for the number of jobs ready for processing, compared
//! against global or per tube thresholds. The worst tube decides the state of the check.
//!
//! ```rust
//! # use check_beanstalkd::{check_tubes, QueueServer, QueueStats, ProtocolError, State,
//! #     ThresholdPair, ThresholdTable};
//! struct Server;
//!
//! impl QueueServer for Server {
//!     fn list_tubes(&mut self) -> Result<Vec<String>, ProtocolError> {
//!         Ok(vec!["default".to_owned(), "orders".to_owned()])
//!     }
//!
//!     fn stats_tube(&mut self, name: &str) -> Result<QueueStats, ProtocolError> {
//!         let ready = if name == "orders" { 42 } else { 5 };
//!         Ok(QueueStats { name: name.to_owned(), current_jobs_ready: ready, ..Default::default() })
//!     }
//! }
//!
//! let defaults = ThresholdPair::new(100, 1000).unwrap();
//! let mut table = ThresholdTable::from_overrides(["orders=10,50"], defaults).unwrap();
//! let mut server = Server;
//! let names = server.list_tubes().unwrap();
//! let report = check_tubes(&mut server, &mut table, &names, false).unwrap();
//!
//! assert_eq!(report.state(), State::Warning);
//! assert_eq!(
//!     &report.to_nagios_string(),
//!     " OK default Jobs Ready:5;;   warning orders Jobs Ready:42;;  "
//! );
//! ```

#[macro_use]
mod macros;

mod check;
pub mod cli;
mod client;
pub mod config_generator;
mod error;
pub mod perfdata;
mod report;
mod runner;
mod state;
mod stats;
pub mod telemetry;
mod thresholds;

pub use crate::check::{check, run_check, CheckConfig};
pub use crate::client::{Connection, QueueServer};
pub use crate::error::{CheckError, ConfigError, ConnectionError, ProtocolError};
pub use crate::report::{check_tubes, Report, TubeResult};
pub use crate::runner::{Runner, RunnerResult};
pub use crate::state::State;
pub use crate::stats::{decode_stats, parse_tube_list, QueueStats};
pub use crate::thresholds::{evaluate, parse_override, ThresholdPair, ThresholdTable};
