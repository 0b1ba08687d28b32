use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

use check_beanstalkd::cli::Cli;
use check_beanstalkd::config_generator::print_icinga_command_config_if_env_and_exit;
use check_beanstalkd::{check, telemetry, CheckConfig, CheckError, Runner, State};

fn main() {
    if let Err(err) = print_icinga_command_config_if_env_and_exit("beanstalkd", &Cli::command()) {
        eprintln!("error generating icinga command: {err}");
        std::process::exit(State::Unknown.exit_code());
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // clap exits with 2 on usage errors, which nagios would read as CRITICAL
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => State::Unknown.exit_code(),
            };
            let _ = err.print();
            std::process::exit(code);
        }
    };

    telemetry::init_tracing(cli.verbose);
    let config = CheckConfig::from(cli);

    Runner::new()
        .on_error(CheckError::state)
        .safe_run(|| check(&config))
        .print_and_exit()
}
