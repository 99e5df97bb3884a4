use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use knotes_core::{ExposureMode, VERSION};

/// Knotes - seal and open note content with the confidentiality engine
#[derive(Parser)]
#[command(name = "knotes")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the config file
    #[arg(short, long, global = true, env = "KNOTES_CONFIG")]
    pub config: Option<String>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Encode note content into an envelope file
    Seal(SealArgs),

    /// Decode an envelope file
    Open(OpenArgs),

    /// Show envelope metadata without decrypting
    Inspect(InspectArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Public,
    Private,
    PasswordShared,
}

impl From<ModeArg> for ExposureMode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Public => ExposureMode::Public,
            ModeArg::Private => ExposureMode::Private,
            ModeArg::PasswordShared => ExposureMode::PasswordShared,
        }
    }
}

/// Password source shared by `seal` and `open`
#[derive(Args)]
pub struct PasswordArgs {
    /// Read the note password from this environment variable
    #[arg(long, value_name = "VAR")]
    pub password_env: Option<String>,

    /// Prompt for the note password
    #[arg(long = "prompt", conflicts_with = "password_env")]
    pub prompt: bool,
}

/// Arguments for the `seal` command
#[derive(Args)]
pub struct SealArgs {
    /// Owner id as issued by the identity provider (anonymous when omitted)
    #[arg(long, value_name = "ID")]
    pub owner: Option<String>,

    /// Exposure mode (defaults to private for identified owners)
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Note content (overrides --input and stdin)
    #[arg(long)]
    pub body: Option<String>,

    /// Read note content from a file
    #[arg(long, value_name = "FILE", conflicts_with = "body")]
    pub input: Option<String>,

    /// Write the envelope here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub out: Option<String>,

    #[command(flatten)]
    pub password: PasswordArgs,
}

/// Arguments for the `open` command
#[derive(Args)]
pub struct OpenArgs {
    /// Envelope file
    #[arg(value_name = "FILE")]
    pub path: String,

    /// Requester id (anonymous when omitted)
    #[arg(long = "as", value_name = "ID")]
    pub requester: Option<String>,

    #[command(flatten)]
    pub password: PasswordArgs,
}

/// Arguments for the `inspect` command
#[derive(Args)]
pub struct InspectArgs {
    /// Envelope file
    #[arg(value_name = "FILE")]
    pub path: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
