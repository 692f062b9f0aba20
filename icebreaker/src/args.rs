use std::{borrow::Cow, fmt, io::IsTerminal, path::PathBuf, str::FromStr};

use clap::{Parser, Subcommand, ValueEnum};
use logforth::filter::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "icebreaker", version, about = "Conversation practice from your terminal")]
pub struct Args {
    /// Path to the TOML configuration file
    #[arg(long, short, env = "ICEBREAKER_CONFIG_PATH", default_value = "./icebreaker.toml")]
    pub config: PathBuf,

    /// Set the logging level
    #[arg(long = "log", env = "ICEBREAKER_LOG", default_value_t = LogLevel::default())]
    pub log_level: LogLevel,

    /// Set the style of log output
    #[arg(long, env = "ICEBREAKER_LOG_STYLE", default_value_t = LogStyle::default())]
    pub log_style: LogStyle,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate conversation sparks for a situation and audience
    Sparks(SparksArgs),
    /// Run an interactive training dialogue against a persona
    Train(TrainArgs),
    /// Print one practical conversation tip for today
    Tip(LocaleArgs),
    /// Suggest light conversation topics
    Topics(TopicsArgs),
    /// List the training scenarios and personas
    Personas,
}

#[derive(Debug, clap::Args)]
pub struct SparksArgs {
    /// Where the conversation happens, e.g. "Date — First coffee date".
    /// Picked from the preset catalog when omitted.
    #[arg(long)]
    pub situation: Option<String>,

    /// Who you are talking to, e.g. "Date — Thoughtful book-lover".
    /// Picked from the preset catalog when omitted.
    #[arg(long)]
    pub audience: Option<String>,

    #[arg(long, default_value = "en")]
    pub locale: String,

    /// Optional tone hint, e.g. "playful"
    #[arg(long)]
    pub tone: Option<String>,

    /// Optional length hint, e.g. "one-liners"
    #[arg(long)]
    pub length: Option<String>,
}

#[derive(Debug, clap::Args)]
pub struct TrainArgs {
    /// Persona id from the catalog; picked at random when omitted
    #[arg(long)]
    pub persona: Option<String>,

    #[arg(long, default_value = "en")]
    pub locale: String,
}

#[derive(Debug, clap::Args)]
pub struct LocaleArgs {
    #[arg(long, default_value = "en")]
    pub locale: String,
}

#[derive(Debug, clap::Args)]
pub struct TopicsArgs {
    /// How many topics to suggest
    #[arg(long, default_value_t = 4)]
    pub count: usize,

    #[arg(long, default_value = "en")]
    pub locale: String,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub(crate) enum LogStyle {
    /// Colorized text, used as the default with TTY output
    Color,
    /// Standard text, used as the default with non-TTY output
    Text,
    /// JSON objects
    Json,
}

impl Default for LogStyle {
    fn default() -> Self {
        if std::io::stdout().is_terminal() {
            LogStyle::Color
        } else {
            LogStyle::Text
        }
    }
}

impl AsRef<str> for LogStyle {
    fn as_ref(&self) -> &str {
        match self {
            LogStyle::Color => "color",
            LogStyle::Text => "text",
            LogStyle::Json => "json",
        }
    }
}

impl fmt::Display for LogStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub(crate) enum LogLevel {
    /// Disable logging
    Off,
    /// Only log errors
    Error,
    /// Log errors, and warnings
    #[default]
    Warn,
    /// Log errors, warnings, and info messages
    Info,
    /// Log errors, warnings, info, and debug messages
    Debug,
    /// Log errors, warnings, info, debug, and trace messages
    Trace,
}

impl LogLevel {
    pub fn env_filter(self) -> EnvFilter {
        let filter_str = match self {
            LogLevel::Off => Cow::Borrowed("off"),
            // For other levels, set the default to 'warn' for all crates,
            // but use the selected level for workspace crates
            level => Cow::Owned(format!("warn,icebreaker={level},coach={level},config={level}")),
        };

        EnvFilter::from_str(&filter_str).expect("These all are valid env filters.")
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_ref().fmt(f)
    }
}

impl AsRef<str> for LogLevel {
    fn as_ref(&self) -> &str {
        match self {
            LogLevel::Off => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}
