use clap::Parser;

use crate::CheckConfig;

/// Checks the number of ready jobs in every beanstalkd tube.
///
/// Thresholds apply to all tubes unless overridden per tube with trailing
/// `tube-name=warn,crit` arguments, e.g. `orders=10,50`.
#[derive(Debug, Parser)]
#[command(name = "check_beanstalkd", version)]
pub struct Cli {
    /// Host or IP of the beanstalkd server
    #[arg(long, env = "BEANSTALKD_HOST", default_value = "127.0.0.1")]
    pub host: String,
    /// Port of the beanstalkd server
    #[arg(long, env = "BEANSTALKD_PORT", default_value_t = 11300)]
    pub port: u16,
    /// This many ready jobs in a tube is a warning
    #[arg(long, default_value_t = 100)]
    pub warn: u64,
    /// This many ready jobs in a tube is critical
    #[arg(long, default_value_t = 1000)]
    pub crit: u64,
    /// Append nagios performance data to the output
    #[arg(long)]
    pub perfdata: bool,
    /// Log more to stderr, repeat for even more
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
    /// Per tube thresholds as tube-name=warn,crit
    #[arg(value_name = "TUBE=WARN,CRIT")]
    pub overrides: Vec<String>,
}

impl From<Cli> for CheckConfig {
    fn from(cli: Cli) -> Self {
        CheckConfig {
            host: cli.host,
            port: cli.port,
            warn: cli.warn,
            crit: cli.crit,
            overrides: cli.overrides,
            perfdata: cli.perfdata,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["check_beanstalkd"]).unwrap();
        let config = CheckConfig::from(cli);
        // env fallbacks may be set on the machine running the tests
        if std::env::var_os("BEANSTALKD_HOST").is_none() {
            assert_eq!(config.host, "127.0.0.1");
        }
        if std::env::var_os("BEANSTALKD_PORT").is_none() {
            assert_eq!(config.port, 11300);
        }
        assert_eq!(config.warn, 100);
        assert_eq!(config.crit, 1000);
        assert!(config.overrides.is_empty());
        assert!(!config.perfdata);
    }

    #[test]
    fn test_flags_and_overrides() {
        let cli = Cli::try_parse_from([
            "check_beanstalkd",
            "--host",
            "10.0.0.5",
            "--port",
            "11301",
            "--warn",
            "5",
            "--crit",
            "10",
            "--perfdata",
            "-vv",
            "orders=10,50",
            "mail=1,2",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        let config = CheckConfig::from(cli);
        assert_eq!(config.host, "10.0.0.5");
        assert_eq!(config.port, 11301);
        assert_eq!(config.warn, 5);
        assert_eq!(config.crit, 10);
        assert!(config.perfdata);
        assert_eq!(config.overrides, vec!["orders=10,50", "mail=1,2"]);
    }

    #[test]
    fn test_rejects_bad_numbers() {
        assert!(Cli::try_parse_from(["check_beanstalkd", "--warn", "many"]).is_err());
        assert!(Cli::try_parse_from(["check_beanstalkd", "--port", "70000"]).is_err());
    }
}
