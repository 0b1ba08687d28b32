//! Generates an Icinga 2 `CheckCommand` object from the clap definition of the check.

use clap::ArgAction;

pub struct CommandDescription {
    arguments: Vec<ArgumentDescription>,
}

enum ArgumentKind {
    Value,
    Flag,
    Positional,
}

struct ArgumentDescription {
    key: String,
    var: String,
    description: Option<String>,
    kind: ArgumentKind,
    default_value: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ToIcingaCommandError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid executable path")]
    InvalidExecutablePath,
}

impl CommandDescription {
    /// Describes every argument of `cmd`. Icinga custom variables are named `<var_prefix>_<arg>`.
    pub fn from_command(cmd: &clap::Command, var_prefix: &str) -> Self {
        let mut arguments = Vec::new();

        for arg in cmd.get_arguments() {
            let id = arg.get_id().as_str();

            let (key, kind) = match arg.get_long() {
                _ if arg.is_positional() => (id.to_owned(), ArgumentKind::Positional),
                Some(long) => {
                    let kind = match arg.get_action() {
                        ArgAction::Help
                        | ArgAction::HelpShort
                        | ArgAction::HelpLong
                        | ArgAction::Version => continue,
                        ArgAction::SetTrue | ArgAction::Count => ArgumentKind::Flag,
                        _ => ArgumentKind::Value,
                    };
                    (format!("--{long}"), kind)
                }
                // short-only options can't be expressed as named icinga arguments
                None => continue,
            };

            let var = format!("{}_{}", var_prefix, id.replace('-', "_"));
            let description = arg.get_help().map(|s| s.to_string());

            // flags are toggled through set_if, a default would always enable them
            let default_value = match kind {
                ArgumentKind::Flag => None,
                _ => arg
                    .get_default_values()
                    .first()
                    .and_then(|v| v.to_str())
                    .map(|s| s.to_string()),
            };

            arguments.push(ArgumentDescription {
                key,
                var,
                description,
                kind,
                default_value,
            });
        }

        CommandDescription { arguments }
    }

    pub fn to_icinga_command(&self, name: &str, executable: &str) -> String {
        let mut out = format!("object CheckCommand \"{name}\" {{\n");

        out.push_str(&format!("  command = [ \"{}\" ]\n", escape_string(executable)));
        out.push_str("  arguments = {\n");
        for arg in &self.arguments {
            out.push_str(&format!("    \"{}\" = {{\n", arg.key));

            match arg.kind {
                ArgumentKind::Flag => out.push_str(&format!("      set_if = \"${}$\"\n", arg.var)),
                ArgumentKind::Value => out.push_str(&format!("      value = \"${}$\"\n", arg.var)),
                ArgumentKind::Positional => {
                    out.push_str(&format!("      value = \"${}$\"\n", arg.var));
                    out.push_str("      skip_key = true\n");
                    out.push_str("      order = 1\n");
                }
            }

            if let Some(description) = &arg.description {
                out.push_str(&format!(
                    "      description = \"{}\"\n",
                    escape_string(description)
                ));
            }

            out.push_str("    }\n");
        }
        out.push_str("  }\n");

        let defaults: Vec<_> = self
            .arguments
            .iter()
            .filter_map(|arg| arg.default_value.as_ref().map(|v| (&arg.var, v)))
            .collect();
        if !defaults.is_empty() {
            out.push('\n');
        }
        for (var, default_value) in defaults {
            out.push_str(&format!(
                "  vars.{} = \"{}\"\n",
                var,
                escape_string(default_value)
            ));
        }

        out.push_str("}\n");
        out
    }
}

fn escape_string(s: &str) -> String {
    ["\"", "$"]
        .iter()
        .fold(s.to_string(), |acc, c| acc.replace(c, &format!("\\{}", c)))
}

/// Print the Icinga command configuration if the GENERATE_ICINGA_COMMAND environment variable is set
/// and exit the process.
pub fn print_icinga_command_config_if_env_and_exit(
    name: &str,
    cmd: &clap::Command,
) -> Result<(), ToIcingaCommandError> {
    if std::env::var_os("GENERATE_ICINGA_COMMAND").is_none() {
        return Ok(());
    }

    let executable = std::env::current_exe()?
        .to_str()
        .ok_or(ToIcingaCommandError::InvalidExecutablePath)?
        .to_owned();

    let description = CommandDescription::from_command(cmd, name);
    let out = description.to_icinga_command(name, &executable);

    println!("{}", out.trim());
    std::process::exit(0);
}
