use std::fs;
use std::path::PathBuf;

use clap::Subcommand;
use detect_environment::{Detect, DetectError, EnvironmentMatcher, MatcherConfig, ReadEnv};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Detect(#[from] DetectError),

    #[error("Failed to read config file {path}: {source}")]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print the captured (lower-cased) value of the variable
    Value,
    /// Print the standard environment the variable names exactly
    Name,
    /// Check whether the variable selects a logical environment
    Is {
        /// Logical environment name, any casing
        name: String,
    },
    /// Evaluate a predicate such as `isProduction` or `is_production`
    Query {
        /// The predicate to evaluate
        predicate: String,
    },
    /// Print the logical environment the variable selects
    Which,
    /// List configured logical environments and their expected values
    List,
}

/// Where the effective configuration comes from, in increasing precedence.
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    pub file: Option<PathBuf>,
    pub variable: Option<String>,
    pub no_defaults: bool,
    pub environments: Vec<(String, String)>,
}

/// Lines to print on stdout and whether the process should exit successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub lines: Vec<String>,
    pub success: bool,
}

impl Report {
    fn line(line: impl Into<String>) -> Self {
        Self {
            lines: vec![line.into()],
            success: true,
        }
    }

    fn flag(value: bool) -> Self {
        Self {
            lines: vec![value.to_string()],
            success: value,
        }
    }
}

pub fn load_config(sources: &ConfigSources) -> Result<MatcherConfig, CliError> {
    let mut config = match &sources.file {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|source| CliError::ConfigFile {
                path: path.clone(),
                source,
            })?;
            MatcherConfig::from_toml_str(&text)?
        }
        None => MatcherConfig::default(),
    };

    if sources.no_defaults {
        config = config.without_defaults();
    }
    if let Some(variable) = &sources.variable {
        config = config.with_variable(variable.clone());
    }
    for (name, value) in &sources.environments {
        config = config.with_environment(name.clone(), value.clone());
    }

    config.validate()?;
    Ok(config)
}

pub fn run<E: ReadEnv>(
    command: &Commands,
    config: &MatcherConfig,
    source: E,
) -> Result<Report, CliError> {
    debug!(?command, variable = %config.variable, "running command");

    let report = match command {
        Commands::Value => {
            let matcher = EnvironmentMatcher::from_config(config, source)?;
            Report::line(matcher.value())
        }
        Commands::Name => {
            let environment = Detect::with_source(source, config.variable.clone()).detect()?;
            Report::line(environment.name())
        }
        Commands::Is { name } => {
            let matcher = EnvironmentMatcher::from_config(config, source)?;
            Report::flag(matcher.matches(name)?)
        }
        Commands::Query { predicate } => {
            let matcher = EnvironmentMatcher::from_config(config, source)?;
            Report::flag(matcher.is(predicate)?)
        }
        Commands::Which => {
            let matcher = EnvironmentMatcher::from_config(config, source)?;
            match matcher.current() {
                Some(name) => Report::line(name),
                None => Report {
                    lines: vec![],
                    success: false,
                },
            }
        }
        Commands::List => Report {
            lines: config
                .environments
                .iter()
                .map(|(name, value)| format!("{}={}", name, value))
                .collect(),
            success: true,
        },
    };

    Ok(report)
}

/// Parses a `NAME=VALUE` pair given on the command line.
pub fn parse_mapping(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected NAME=VALUE, got '{}'", s)),
    }
}
