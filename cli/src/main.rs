mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use commands::{load_config, parse_mapping, run, Commands, ConfigSources};
use detect_environment::SystemEnv;

#[derive(Parser)]
#[command(name = "detect-env")]
#[command(about = "Detect the application's deployment environment from an environment variable")]
struct Cli {
    /// Environment variable to read (default: APP_ENV, or the config file's `variable`)
    #[arg(long, global = true)]
    var: Option<String>,
    /// TOML file with a `variable` key and an `[environments]` table
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    /// Add a logical environment as NAME=VALUE (repeatable)
    #[arg(short, long = "env", value_parser = parse_mapping, global = true)]
    environments: Vec<(String, String)>,
    /// Clear the configured environments before applying --env
    #[arg(long, global = true)]
    no_defaults: bool,
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn config_sources(&self) -> ConfigSources {
        ConfigSources {
            file: self.config.clone(),
            variable: self.var.clone(),
            no_defaults: self.no_defaults,
            environments: self.environments.clone(),
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = load_config(&cli.config_sources())
        .and_then(|config| run(&cli.command, &config, SystemEnv));

    match result {
        Ok(report) => {
            for line in &report.lines {
                println!("{}", line);
            }
            if report.success {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Err(e) => {
            eprintln!("detect-env: {}", e);
            ExitCode::from(2)
        }
    }
}
