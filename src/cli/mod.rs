use clap::Parser;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{name} {version}\n\
{about-with-newline}\n\
USAGE:\n    {usage}\n\
\nOPTIONS:\n{options}\n";

#[derive(Parser)]
#[command(name = "n8n-relay")]
#[command(version = crate::VERSION)]
#[command(about = "Relay service for copying n8n workflows between two instances")]
#[command(help_template = HELP_TEMPLATE)]
#[command(
    after_long_help = "Requires SOURCE_N8N_URL, SOURCE_API_KEY, DESTINATION_N8N_URL, and DESTINATION_API_KEY in the environment or a .env file."
)]
pub struct Args {
    /// Address the relay listens on
    #[arg(long, default_value = "127.0.0.1:8000", value_name = "ADDR")]
    pub bind: String,

    /// Directory holding the operator UI assets (index.html, script.js, style.css)
    #[arg(long, value_name = "DIR")]
    pub assets_dir: Option<PathBuf>,

    /// Default log level when RUST_LOG is not set
    #[arg(long, default_value = "info", value_name = "LEVEL")]
    pub log_level: String,
}
