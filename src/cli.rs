use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Verbosity accepted by `--debug-level`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No output at all
    Off,
    Error,
    Warn,
    /// Phase timings and render summary
    Info,
    /// Config resolution and texture loads
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments structure using clap derive macros
#[derive(Parser, Debug)]
#[command(name = "diorama")]
#[command(about = "A Whitted-style ray tracer rendering a textured block diorama")]
pub struct Args {
    /// TOML configuration file; built-in defaults are used when it is missing
    #[arg(short, long, default_value = "diorama.toml")]
    pub config: String,

    /// Set the logging level (defaults to "info")
    #[arg(long, default_value = "info", help = "Set the logging level")]
    pub debug_level: LogLevel,

    /// Image width in pixels
    #[arg(long, help = "Image width in pixels (overrides the config file)")]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(long, help = "Image height in pixels (overrides the config file)")]
    pub height: Option<u32>,

    /// Recursion depth for reflection and refraction rays
    #[arg(long, short = 'd', help = "Maximum reflection/refraction depth (overrides the config file)")]
    pub max_depth: Option<u32>,

    /// Output file path (.png for 8-bit clamped, .exr for linear f32)
    #[arg(short, long, help = "Output file path (.png for 8-bit clamped, .exr for linear f32)")]
    pub output: Option<String>,
}
