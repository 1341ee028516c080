use crate::api::constants::DEFAULT_API_URL;
use crate::config::DEFAULT_CONFIG_FILE;
use crate::wipe::{MessageSource, WipeMode};
use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "slack-wipe", version)]
#[command(about = "Bulk-delete or redact your own messages and files in one Slack conversation")]
pub struct Cli {
    /// Channel name (without '#'), conversation ID, or @user for a direct message
    #[arg(long, value_name = "CHANNEL")]
    pub channel: Option<String>,

    /// API token (a user token, xoxp-...)
    #[arg(long, help = "API token [default: $SLACK_API_TOKEN]")]
    pub token: Option<String>,

    /// JSON config file; values in it override flags
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// .env file whose SLACK_API_TOKEN is used instead of the environment
    #[arg(long, value_name = "PATH")]
    pub env_file: Option<PathBuf>,

    /// Wipe messages
    #[arg(
        long,
        value_name = "BOOL",
        default_value_t = true,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub messages: bool,

    /// Wipe files
    #[arg(
        long,
        value_name = "BOOL",
        default_value_t = false,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub files: bool,

    /// What to do with messages
    #[arg(long, value_enum, default_value_t = WipeMode::Delete)]
    pub mode: WipeMode,

    /// Marker glyph used by --mode redact (U+2588, 0x2588, 9608, or the character itself)
    #[arg(long, value_name = "CODEPOINT", default_value = "U+2588")]
    pub replacement_char: String,

    /// How to find your messages
    #[arg(long, value_enum, default_value_t = MessageSource::History)]
    pub source: MessageSource,

    /// Also wipe your replies inside threads
    #[arg(long)]
    pub threads: bool,

    /// Number of wipe calls in flight at once
    #[arg(long, default_value_t = 4)]
    pub concurrency: usize,

    /// Do not ask for confirmation
    #[arg(long)]
    pub auto_approve: bool,

    /// Collect and list content without changing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Disable log output
    #[arg(long, short)]
    pub quiet: bool,

    /// Debug log output
    #[arg(long, short, conflicts_with = "quiet")]
    pub verbose: bool,

    #[arg(long, hide = true, default_value = DEFAULT_API_URL)]
    pub api_url: String,
}
