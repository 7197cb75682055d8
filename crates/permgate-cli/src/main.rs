//! permgate CLI - access checks against a stored session.
//!
//! # Configuration
//!
//! Configuration is loaded from multiple sources with priority:
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`PERMGATE_*`)
//! 3. Explicit `--config` file
//! 4. Project config (`.permgate/config.toml` in the project root)
//! 5. Global config (`~/.permgate/config.toml`)
//! 6. Default values (lowest priority)
//!
//! # Output
//!
//! Results go to stdout, logs to stderr.
//!
//! | Command | stdout | exit |
//! |---------|--------|------|
//! | `is-admin`, `has`, `any`, `all` | `allowed` / `denied` | 0 / 1 |
//! | `guard` | `render` / `waiting` / `redirect <path>` | 0 / 1 / 1 |
//! | any, on configuration error | (nothing) | 2 |
//!
//! Without `--session` nothing is known about the user yet: checks deny and
//! `guard` prints `waiting`.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use permgate_auth::{PermissionGate, RequirementKeys};
use permgate_runtime::auth::{DefaultGate, SessionContext};
use permgate_runtime::config::{ConfigLoader, ConfigResolver, GateConfig};
use permgate_runtime::guard::{GuardOutcome, GuardProps, RouteGuard};
use permgate_runtime::session;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Exit status for a denial, a redirect or a pending bootstrap.
const EXIT_DENIED: u8 = 1;

/// Exit status for configuration and usage errors.
const EXIT_ERROR: u8 = 2;

/// permgate - declarative permission checks
#[derive(Parser, Debug)]
#[command(name = "permgate")]
#[command(version, about, long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Project root directory (defaults to current directory)
    #[arg(short = 'C', long, global = true)]
    project: Option<PathBuf>,

    /// Extra config file, layered above the project config
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Stored session file (JSON)
    #[arg(long, global = true, value_name = "FILE")]
    session: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Is the current user an administrator?
    IsAdmin,

    /// Is KEY granted?
    Has {
        key: String,
    },

    /// Is at least one KEY granted?
    Any {
        #[arg(required = true)]
        keys: Vec<String>,
    },

    /// Is every KEY granted?
    All {
        #[arg(required = true)]
        keys: Vec<String>,
    },

    /// Evaluate a route guard
    Guard {
        /// Single permission key
        #[arg(long)]
        permission: Option<String>,

        /// Comma-separated permission keys
        #[arg(long, value_delimiter = ',')]
        permissions: Option<Vec<String>>,

        /// Require every key in --permissions instead of any
        #[arg(long)]
        require_all: bool,

        /// Require an administrator
        #[arg(long)]
        require_admin: bool,

        /// Redirect target on failure (defaults to the fallback route)
        #[arg(long, value_name = "PATH")]
        redirect_to: Option<String>,
    },
}

/// CLI-based configuration resolver.
///
/// Loads file/env config via [`ConfigLoader`] and applies CLI argument
/// overrides as the highest-priority layer.
struct CliConfigResolver {
    project_root: PathBuf,
    config_file: Option<PathBuf>,
    debug: bool,
}

impl CliConfigResolver {
    fn from_args(args: &Args) -> Self {
        let project_root = args.project.clone().unwrap_or_else(|| {
            std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
        });

        Self {
            project_root,
            config_file: args.config.clone(),
            debug: args.debug,
        }
    }

    fn resolve(&self) -> Result<GateConfig> {
        let mut loader = ConfigLoader::new().with_project_root(&self.project_root);
        if let Some(ref path) = self.config_file {
            loader = loader.with_config_file(path);
        }

        let mut config = loader.load().context("failed to load configuration")?;
        self.apply(&mut config);
        Ok(config)
    }
}

impl ConfigResolver for CliConfigResolver {
    fn apply(&self, config: &mut GateConfig) {
        if self.debug {
            config.debug = true;
        }
    }
}

fn init_tracing(config: &GateConfig) {
    // stderr only; stdout carries results.
    let filter = if config.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(layer.with_filter(filter))
        .init();
}

fn verdict(allowed: bool) -> ExitCode {
    if allowed {
        println!("allowed");
        ExitCode::SUCCESS
    } else {
        println!("denied");
        ExitCode::from(EXIT_DENIED)
    }
}

fn guard_verdict(outcome: &GuardOutcome) -> ExitCode {
    match outcome {
        GuardOutcome::Render => {
            println!("render");
            ExitCode::SUCCESS
        }
        GuardOutcome::Waiting => {
            println!("waiting");
            ExitCode::from(EXIT_DENIED)
        }
        GuardOutcome::Redirect(redirect) => {
            println!("redirect {}", redirect.to);
            ExitCode::from(EXIT_DENIED)
        }
    }
}

fn run(args: Args) -> Result<ExitCode> {
    let resolver = CliConfigResolver::from_args(&args);
    let config = resolver.resolve()?;
    init_tracing(&config);

    debug!(
        project = %resolver.project_root.display(),
        login = %config.routes.login,
        fallback = %config.routes.fallback,
        "configuration resolved"
    );

    let ctx = Arc::new(SessionContext::new());
    if let Some(ref path) = args.session {
        session::restore_session(&ctx, path);
    }

    let gate = DefaultGate::new(Arc::clone(&ctx));
    let allowed = match args.command {
        Command::IsAdmin => gate.is_admin(),
        Command::Has { key } => gate.has_permission(&key),
        Command::Any { keys } => gate.has_any_permission(&RequirementKeys::from(keys)),
        Command::All { keys } => gate.has_all_permissions(&RequirementKeys::from(keys)),
        Command::Guard {
            permission,
            permissions,
            require_all,
            require_admin,
            redirect_to,
        } => {
            let props = GuardProps {
                permission,
                permissions: permissions.map(RequirementKeys::from),
                require_all,
                require_admin,
                redirect_to,
            };
            let guard = RouteGuard::new(ctx, config.routes);
            return Ok(guard_verdict(&guard.evaluate(&props)));
        }
    };
    Ok(verdict(allowed))
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}
