//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use orgchain_core::{Hierarchy, parse_employee_records};
use orgchain_shared::{
    AppConfig, InputFormat, NameMatching, OrgChainError, OutputStyle, RedeclarationPolicy,
    init_config, load_config, load_config_from,
};
use tracing::{info, warn};

use crate::render;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// orgchain: find the chain of command between two employees.
#[derive(Parser)]
#[command(
    name = "orgchain",
    version,
    about = "Print the management chain connecting two employees of an organisation.",
    long_about = None,
    args_conflicts_with_subcommands = true,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file to use instead of ~/.orgchain/orgchain.toml.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub query: QueryArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Arguments of the default chain query.
#[derive(Args, Debug)]
pub(crate) struct QueryArgs {
    /// Hierarchy file.
    pub file: Option<PathBuf>,

    /// First employee name.
    pub first: Option<String>,

    /// Second employee name.
    pub second: Option<String>,

    #[command(flatten)]
    pub input: InputArgs,

    /// Compare names exactly instead of ignoring case and extra spaces.
    #[arg(long)]
    pub exact_names: bool,

    /// Output style.
    #[arg(short, long)]
    pub output: Option<OutputArg>,
}

/// How to read the hierarchy file. Unset flags fall back to the config file.
#[derive(Args, Debug)]
pub(crate) struct InputArgs {
    /// File layout.
    #[arg(long)]
    pub format: Option<FormatArg>,

    /// Field separator for the delimited layout.
    #[arg(long)]
    pub delimiter: Option<char>,

    /// What to do when an employee is listed twice with different managers.
    #[arg(long)]
    pub on_redeclaration: Option<PolicyArg>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub(crate) enum FormatArg {
    Auto,
    Delimited,
    Table,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub(crate) enum PolicyArg {
    LastWriteWins,
    FirstWriteWins,
    Reject,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub(crate) enum OutputArg {
    Arrows,
    Plain,
    Json,
}

impl From<FormatArg> for InputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Auto => Self::Auto,
            FormatArg::Delimited => Self::Delimited,
            FormatArg::Table => Self::Table,
        }
    }
}

impl From<PolicyArg> for RedeclarationPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::LastWriteWins => Self::LastWriteWins,
            PolicyArg::FirstWriteWins => Self::FirstWriteWins,
            PolicyArg::Reject => Self::Reject,
        }
    }
}

impl From<OutputArg> for OutputStyle {
    fn from(arg: OutputArg) -> Self {
        match arg {
            OutputArg::Arrows => Self::Arrows,
            OutputArg::Plain => Self::Plain,
            OutputArg::Json => Self::Json,
        }
    }
}

/// Subcommands besides the default chain query.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Build a hierarchy file and report its shape without querying it.
    Check {
        /// Hierarchy file.
        file: PathBuf,

        #[command(flatten)]
        input: InputArgs,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. Logs go to stderr so stdout stays
/// reserved for chains.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = format!("orgchain={level},orgchain_core={level},orgchain_shared={level}");

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    let config = match cli.config.as_deref() {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };

    match cli.command {
        Some(Command::Check { file, input }) => cmd_check(&file, &apply_input(config, &input)?),
        Some(Command::Config { action }) => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(&config),
        },
        None => cmd_chain(cli.query, config),
    }
}

/// Layer input flags over the loaded config.
fn apply_input(mut config: AppConfig, input: &InputArgs) -> Result<AppConfig> {
    if let Some(format) = input.format {
        config.input.format = format.into();
    }
    if let Some(delimiter) = input.delimiter {
        config.input.delimiter = delimiter;
    }
    if let Some(policy) = input.on_redeclaration {
        config.hierarchy.on_redeclaration = policy.into();
    }
    config.validate()?;
    Ok(config)
}

fn load_hierarchy(file: &Path, config: &AppConfig) -> Result<Hierarchy> {
    let content = std::fs::read_to_string(file).map_err(|e| OrgChainError::io(file, e))?;
    let records = parse_employee_records(&content, &config.input)?;
    let hierarchy = Hierarchy::from_records(&records, config.hierarchy.on_redeclaration)?;

    info!(
        file = %file.display(),
        employees = hierarchy.len(),
        "hierarchy loaded"
    );
    Ok(hierarchy)
}

fn cmd_chain(query: QueryArgs, config: AppConfig) -> Result<()> {
    let (Some(file), Some(first), Some(second)) = (query.file, query.first, query.second) else {
        return Err(eyre!(
            "expected a hierarchy file and two employee names: orgchain <FILE> <FIRST> <SECOND>"
        ));
    };

    let mut config = apply_input(config, &query.input)?;
    if query.exact_names {
        config.query.name_matching = NameMatching::Exact;
    }
    if let Some(output) = query.output {
        config.output.style = output.into();
    }

    let hierarchy = load_hierarchy(&file, &config)?;
    let chains = hierarchy.chains_between_names(&first, &second, config.query.name_matching)?;

    info!(first = %first, second = %second, chains = chains.len(), "communication chains found");
    println!("{}", render::render_chains(&chains, config.output.style)?);
    Ok(())
}

fn cmd_check(file: &Path, config: &AppConfig) -> Result<()> {
    let hierarchy = load_hierarchy(file, config)?;
    let report = hierarchy.validate()?;

    if !report.is_single_tree() {
        warn!(roots = ?report.roots, "hierarchy has more than one root");
    }
    if !report.placeholders.is_empty() {
        warn!(
            managers = ?report.placeholders,
            "managers referenced without their own record"
        );
    }

    println!("{}", render::render_report(&report));
    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(config: &AppConfig) -> Result<()> {
    let toml_str = toml::to_string_pretty(config)?;
    println!("{toml_str}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn positional_query_parses() {
        let cli = Cli::try_parse_from([
            "orgchain",
            "org.txt",
            "Batman",
            "Super Ted",
            "--on-redeclaration",
            "reject",
            "--output",
            "json",
        ])
        .expect("parse");
        assert!(cli.command.is_none());
        assert_eq!(cli.query.second.as_deref(), Some("Super Ted"));
        assert!(matches!(cli.query.input.on_redeclaration, Some(PolicyArg::Reject)));
        assert!(matches!(cli.query.output, Some(OutputArg::Json)));
    }

    #[test]
    fn check_subcommand_parses() {
        let cli = Cli::try_parse_from(["orgchain", "check", "org.txt", "-vv", "--format", "table"])
            .expect("parse");
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Some(Command::Check { file, input }) => {
                assert_eq!(file, PathBuf::from("org.txt"));
                assert!(matches!(input.format, Some(FormatArg::Table)));
            }
            _ => panic!("expected check subcommand"),
        }
    }

    #[test]
    fn flags_override_config() {
        let input = InputArgs {
            format: Some(FormatArg::Delimited),
            delimiter: Some(';'),
            on_redeclaration: None,
        };
        let config = apply_input(AppConfig::default(), &input).unwrap();
        assert_eq!(config.input.format, InputFormat::Delimited);
        assert_eq!(config.input.delimiter, ';');
        assert_eq!(config.hierarchy.on_redeclaration, RedeclarationPolicy::LastWriteWins);
    }

    #[test]
    fn reserved_delimiter_flag_is_rejected() {
        let input = InputArgs {
            format: None,
            delimiter: Some('|'),
            on_redeclaration: None,
        };
        assert!(apply_input(AppConfig::default(), &input).is_err());
    }

    #[test]
    fn fixture_loads_through_cli_path() {
        let config = AppConfig::default();
        let hierarchy =
            load_hierarchy(Path::new("../../fixtures/hierarchy/superheroes.txt"), &config)
                .expect("load fixture");
        assert_eq!(hierarchy.len(), 9);
    }
}
