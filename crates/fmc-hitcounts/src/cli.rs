//! Clap derive structures for the `fmc-hitcounts` CLI.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// fmc-hitcounts -- rule hit counts from a Firepower Management Center
#[derive(Debug, Parser)]
#[command(
    name = "fmc-hitcounts",
    version,
    about = "Query rule hit counts from a Firepower Management Center",
    long_about = "Query, refresh and reset access rule hit counts on a Firepower\n\
        Management Center (6.4 or later), scoped to a device or to\n\
        prefilter policies.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
#[allow(clippy::struct_excessive_bools)]
pub struct GlobalOpts {
    /// Management center profile to use
    #[arg(long, short = 'p', env = "FMC_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Management center URL (overrides profile)
    #[arg(long, env = "FMC_HOST", global = true)]
    pub host: Option<String>,

    /// API username (overrides profile)
    #[arg(long, short = 'u', env = "FMC_USERNAME", global = true)]
    pub username: Option<String>,

    /// API password
    #[arg(long, env = "FMC_PASSWORD", global = true, hide_env_values = true)]
    pub password: Option<String>,

    /// Domain name, e.g. Global/Branch
    #[arg(long, env = "FMC_DOMAIN", global = true)]
    pub domain: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "FMC_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation for destructive commands
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "FMC_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "FMC_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Print the request that would be sent instead of sending it
    #[arg(long, env = "FMC_DRY_RUN", global = true)]
    pub dry_run: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one rule id per line (scripting)
    Plain,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show hit counts for the rules of an access control policy
    #[command(alias = "ls")]
    Get(FilterArgs),

    /// Ask the management center to recompute hit counts
    Refresh(FilterArgs),

    /// Reset hit counts to zero
    Clear(FilterArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Criteria shared by every hit-count command.
#[derive(Debug, Args)]
pub struct FilterArgs {
    /// Access control policy id
    #[arg(long, conflicts_with = "acp_name", required_unless_present = "acp_name")]
    pub acp_id: Option<String>,

    /// Access control policy name
    #[arg(long)]
    pub acp_name: Option<String>,

    /// Device id to scope counts to
    #[arg(long, conflicts_with = "device_name")]
    pub device_id: Option<String>,

    /// Device name to scope counts to
    #[arg(long)]
    pub device_name: Option<String>,

    /// Prefilter policy id (repeatable)
    #[arg(long = "prefilter-id", value_name = "ID")]
    pub prefilter_ids: Vec<String>,

    /// Prefilter policy name (repeatable)
    #[arg(long = "prefilter-name", value_name = "NAME")]
    pub prefilter_names: Vec<String>,

    /// Include rules that were never hit
    #[arg(long)]
    pub zero_hits: bool,

    /// Page size (defaults to the profile's limit)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub limit: Option<u32>,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
