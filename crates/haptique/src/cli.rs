//! Clap derive structures for the `haptique` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// haptique -- drive a Haptique IR/RF hub from the command line
#[derive(Debug, Parser)]
#[command(
    name = "haptique",
    version,
    about = "Control a Haptique IR/RF hub from the command line",
    long_about = "Polls a Haptique IR/RF hub (KinCony KC868-AG) over its local HTTP API,\n\
        renders its state, and sends RF/IR codes or saved commands.",
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
pub struct GlobalOpts {
    /// Hub profile to use
    #[arg(long, short = 'p', env = "HAPTIQUE_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Hub address, e.g. 192.168.1.100 (overrides profile)
    #[arg(long, short = 'H', env = "HAPTIQUE_HOST", global = true)]
    pub host: Option<String>,

    /// Bearer token from the hub's /api/token page
    #[arg(long, env = "HAPTIQUE_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "HAPTIQUE_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "HAPTIQUE_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

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
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate a hub and store it as a profile
    Setup(SetupArgs),

    /// Poll the hub once and show its sensors
    #[command(alias = "st")]
    Status,

    /// List commands saved on the hub
    #[command(alias = "ls")]
    Saved(SavedArgs),

    /// Keep polling and print every update until interrupted
    Watch(WatchArgs),

    /// Send, learn, and delete RF (433 MHz) commands
    Rf(RfArgs),

    /// Send, learn, and delete IR commands
    Ir(IrArgs),

    /// Fallback access point control
    Ap(ApArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Setup ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SetupArgs {
    /// Profile name to store the hub under
    #[arg(long, default_value = "default")]
    pub name: String,

    /// Store the name of an environment variable holding the token
    /// instead of the token itself
    #[arg(long)]
    pub token_env: Option<String>,

    /// Make this the default profile
    #[arg(long)]
    pub set_default: bool,
}

// ── Saved / Watch ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum BandArg {
    Rf,
    Ir,
}

#[derive(Debug, Args)]
pub struct SavedArgs {
    /// Only list one band
    #[arg(long, short = 'b')]
    pub band: Option<BandArg>,
}

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Seconds between polls (overrides profile)
    #[arg(long, short = 'i')]
    pub interval: Option<u64>,
}

// ── RF ───────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct RfArgs {
    #[command(subcommand)]
    pub command: RfCommand,
}

#[derive(Debug, Subcommand)]
pub enum RfCommand {
    /// Transmit a raw RF code
    SendCode {
        /// Decimal code value
        code: u64,
        /// Bit length [default: 24]
        #[arg(long)]
        bits: Option<u32>,
        /// RC-switch protocol number [default: 1]
        #[arg(long)]
        protocol: Option<u32>,
        /// Transmission repeats [default: 8]
        #[arg(long)]
        repeat: Option<u32>,
    },

    /// Transmit a saved RF command
    Send { name: String },

    /// Save the last received RF signal under a name
    Save { name: String },

    /// Delete a saved RF command
    #[command(alias = "rm")]
    Delete { name: String },
}

// ── IR ───────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct IrArgs {
    #[command(subcommand)]
    pub command: IrCommand,
}

#[derive(Debug, Subcommand)]
pub enum IrCommand {
    /// Transmit a raw IR pulse train
    SendCode {
        /// Pulse/space durations in microseconds
        #[arg(value_delimiter = ',', num_args = 0..)]
        raw: Vec<u32>,
        /// Carrier frequency in Hz [default: 38000]
        #[arg(long)]
        frequency: Option<u32>,
        /// Carrier duty cycle in percent [default: 33]
        #[arg(long)]
        duty: Option<u32>,
    },

    /// Transmit a saved IR command
    Send { name: String },

    /// Save the last received IR signal under a name
    Save { name: String },

    /// Delete a saved IR command
    #[command(alias = "rm")]
    Delete { name: String },
}

// ── Access point ─────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ApArgs {
    #[command(subcommand)]
    pub command: ApCommand,
}

#[derive(Debug, Subcommand)]
pub enum ApCommand {
    /// Turn off the hub's fallback access point
    Disable,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the resolved configuration (tokens redacted)
    Show,

    /// Print the config file path
    Path,

    /// List configured profiles
    Profiles,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
