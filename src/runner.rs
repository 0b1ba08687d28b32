use std::fmt::Display;

use crate::{Report, State};

/// Maps a failed check to a service state and turns either outcome into plugin output.
pub struct Runner<E> {
    on_error: Option<Box<dyn FnOnce(&E) -> State>>,
}

impl<E: Display> Runner<E> {
    pub fn new() -> Self {
        Self { on_error: None }
    }

    pub fn on_error(mut self, f: impl FnOnce(&E) -> State + 'static) -> Self {
        self.on_error = Some(Box::new(f));
        self
    }

    /// Runs the check. Errors are mapped by the handler given to [Runner::on_error], or to
    /// [State::Unknown] when there is none: a failed check could not determine any state.
    pub fn safe_run(self, f: impl FnOnce() -> Result<Report, E>) -> RunnerResult<E> {
        match f() {
            Ok(report) => RunnerResult::Ok(report),
            Err(err) => {
                let state = self
                    .on_error
                    .map(|f| f(&err))
                    .unwrap_or(State::Unknown);

                RunnerResult::Err(state, err)
            }
        }
    }
}

impl<E: Display> Default for Runner<E> {
    fn default() -> Self {
        Self::new()
    }
}

pub enum RunnerResult<E> {
    Ok(Report),
    Err(State, E),
}

impl<E: Display> RunnerResult<E> {
    pub fn state(&self) -> State {
        match self {
            RunnerResult::Ok(report) => report.state(),
            RunnerResult::Err(state, _) => *state,
        }
    }

    /// The line printed for nagios.
    pub fn output(&self) -> String {
        match self {
            RunnerResult::Ok(report) => report.to_nagios_string(),
            RunnerResult::Err(state, err) => format!("{}: {}", state, err),
        }
    }

    pub fn print_and_exit(self) -> ! {
        if let RunnerResult::Err(state, ref err) = self {
            tracing::error!(%state, %err, "check failed");
        }
        println!("{}", self.output());
        std::process::exit(self.state().exit_code());
    }
}
