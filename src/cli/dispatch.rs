// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Command dispatch and execution.

use console::style;
use serde_json::Value;
use std::io::Read;
use std::path::Path;

use crate::config::ValidataConfig;
use crate::engine::{ValidationEngine, Validator};
use crate::error::{ConfigError, DataError, Result, ResultExt, ValidataError};

use super::args::{CheckArgs, Cli, Commands, ExpandArgs, InitArgs};

/// Name of the file written by `validata init`.
const INIT_FILE: &str = "validata.toml";

/// Run the CLI with the given arguments.
pub fn run(cli: Cli) -> Result<()> {
    match &cli.command {
        Commands::Check(args) => run_check(&cli, &load(&cli)?, args),
        Commands::Expand(args) => run_expand(&cli, &load(&cli)?, args),
        Commands::Rules => run_rules(&cli),
        Commands::Version => run_version(),
        Commands::Init(args) => run_init(args),
    }
}

fn load(cli: &Cli) -> Result<ValidataConfig> {
    match &cli.config {
        Some(config_path) => ValidataConfig::load_from(config_path),
        None => ValidataConfig::load(),
    }
}

fn validator(config: &ValidataConfig, group: Option<&str>, data: Value) -> Validator {
    let validator = Validator::from_config(config.clone()).with(data);
    match group {
        Some(group) => validator.group(group),
        None => validator,
    }
}

/// Run the check command.
fn run_check(cli: &Cli, config: &ValidataConfig, args: &CheckArgs) -> Result<()> {
    tracing::debug!("Running check command with args: {:?}", args);

    let data = read_data(&args.data)?;
    let validator = validator(config, args.group.as_deref(), data);

    if args.strict {
        return match validator.validate_or_fail() {
            Ok(result) => {
                result.print(cli.format);
                Ok(())
            }
            Err(ValidataError::Validation(failure)) => {
                failure.print(cli.format);
                Err(ValidataError::Validation(failure))
            }
            Err(e) => Err(e),
        };
    }

    let result = validator.validate()?;
    result.print(cli.format);

    if result.is_valid() {
        Ok(())
    } else {
        Err(ValidataError::WithContext {
            context: "check".to_string(),
            message: result.summary(),
        })
    }
}

/// Run the expand command.
fn run_expand(cli: &Cli, config: &ValidataConfig, args: &ExpandArgs) -> Result<()> {
    tracing::debug!("Running expand command with args: {:?}", args);

    let data = match &args.data {
        Some(path) => read_data(path)?,
        None => Value::Object(Default::default()),
    };
    let validator = validator(config, args.group.as_deref(), data);
    let rules = validator.rules()?;

    if cli.is_json() {
        let json = serde_json::to_string_pretty(&rules).map_err(DataError::Serialize)?;
        println!("{}", json);
        return Ok(());
    }

    println!(
        "{} {}",
        style("Group").bold(),
        style(validator.group_name()).cyan()
    );
    for (field, tokens) in &rules {
        println!("  {} {}", style(field).cyan(), tokens.join("|"));
    }

    Ok(())
}

/// Run the rules command.
fn run_rules(cli: &Cli) -> Result<()> {
    let engine = ValidationEngine::new();
    let names = engine.registry().names();

    if cli.is_json() {
        let json = serde_json::to_string_pretty(&names).map_err(DataError::Serialize)?;
        println!("{}", json);
    } else {
        for name in names {
            println!("{}", name);
        }
    }

    Ok(())
}

/// Run the version command.
fn run_version() -> Result<()> {
    println!("validata {}", crate::version::version_string());

    if let Some(sha) = crate::version::GIT_SHA {
        println!("git commit: {}", sha);
    }
    if let Some(date) = crate::version::GIT_COMMIT_DATE {
        println!("commit date: {}", date);
    }

    Ok(())
}

/// Run the init command.
fn run_init(args: &InitArgs) -> Result<()> {
    use crate::config::default::example_config;

    tracing::debug!("Running init command with args: {:?}", args);

    let config_path = Path::new(INIT_FILE);

    if config_path.exists() && !args.force {
        return Err(ValidataError::Config(ConfigError::AlreadyExists {
            path: config_path.to_path_buf(),
        }));
    }

    std::fs::write(config_path, example_config()).context("Failed to write configuration")?;

    println!("{} Created {}", style("✓").green().bold(), INIT_FILE);

    Ok(())
}

/// Read JSON data from a file, or from stdin when the path is `-`.
fn read_data(path: &Path) -> Result<Value> {
    let content = if path == Path::new("-") {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read data from stdin")?;
        content
    } else {
        std::fs::read_to_string(path).context(format!("Failed to read {}", path.display()))?
    };

    parse_data(&content)
}

fn parse_data(content: &str) -> Result<Value> {
    serde_json::from_str(content).map_err(|e| {
        ValidataError::Data(DataError::Parse {
            message: e.to_string(),
        })
    })
}
