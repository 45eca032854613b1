//! Command-line arguments of the demo.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use toastline_core::{Position, StackingMode, ToasterOptions, theme};

/// Log verbosity for the log file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Convert to tracing filter string.
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Toaster anchor, as typed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PositionArg {
    TopLeft,
    TopCenter,
    TopRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl From<PositionArg> for Position {
    fn from(arg: PositionArg) -> Self {
        match arg {
            PositionArg::TopLeft => Position::TopLeft,
            PositionArg::TopCenter => Position::TopCenter,
            PositionArg::TopRight => Position::TopRight,
            PositionArg::BottomLeft => Position::BottomLeft,
            PositionArg::BottomCenter => Position::BottomCenter,
            PositionArg::BottomRight => Position::BottomRight,
        }
    }
}

#[derive(Parser, Debug, Default)]
#[command(name = "toastline-demo")]
#[command(author, version)]
#[command(about = "Interactive demo of toastline toast notifications", long_about = None)]
pub struct Cli {
    /// Toaster options file (TOML)
    #[arg(long, short = 'c', value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Built-in theme to start from (minimal, monochrome)
    #[arg(long, short = 't', value_name = "NAME")]
    pub theme: Option<String>,

    /// Where toasts appear
    #[arg(long, short = 'p', value_enum)]
    pub position: Option<PositionArg>,

    /// Keep up to N toasts on screen instead of one
    #[arg(long, value_name = "N")]
    pub stack: Option<usize>,

    /// Show close buttons on dismissible toasts
    #[arg(long)]
    pub close_button: bool,

    /// Write logs to this file
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Log level for --log-file (overridden by RUST_LOG)
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}

impl Cli {
    /// Builds toaster options: config file or theme first, then flags.
    pub fn toaster_options(&self) -> Result<ToasterOptions> {
        let mut options = match (&self.config, &self.theme) {
            (Some(path), _) => {
                let source = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                ToasterOptions::from_toml_str(&source)
                    .with_context(|| format!("Invalid toaster options in {}", path.display()))?
            }
            (None, Some(name)) => {
                let Some(theme) = theme::by_name(name) else {
                    let known: Vec<_> = theme::themes().iter().map(|t| t.name).collect();
                    anyhow::bail!("Unknown theme '{}' (available: {})", name, known.join(", "));
                };
                theme.options
            }
            (None, None) => ToasterOptions::default(),
        };

        if let Some(position) = self.position {
            options = options.with_position(position.into());
        }
        if let Some(count) = self.stack {
            options = options
                .with_stacking(StackingMode::Stack)
                .with_visible_toasts(count);
        }
        if self.close_button {
            options = options.with_close_button(true);
        }
        Ok(options)
    }
}
