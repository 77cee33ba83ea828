//! CLI argument definitions for the bean log.

use std::path::PathBuf;

use beanlog_model::{OriginType, RoastType, ShotOrder};
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "beanlog",
    version,
    about = "Log coffee beans and the espresso shots pulled from them",
    long_about = "Log coffee beans and the espresso shots pulled from them.\n\n\
                  Tracks every shot's recipe and rating, finds each bean's best\n\
                  shot, and exports or restores the whole log as a JSON backup."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Settings file (default: platform config directory).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the bean log (overrides settings).
    #[arg(long = "data-dir", value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Keep everything in memory; nothing is read from or written to disk.
    #[arg(long = "ephemeral", global = true, conflicts_with = "data_dir")]
    pub ephemeral: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// List all beans with their shot count and average rating.
    Beans,

    /// Add, edit, show or delete a bean.
    #[command(subcommand)]
    Bean(BeanCommand),

    /// Log or delete a shot.
    #[command(subcommand)]
    Shot(ShotCommand),

    /// Write a dated JSON backup of the whole log.
    Export(ExportArgs),

    /// Replace the whole log with a JSON backup.
    Import(ImportArgs),

    /// Inspect the settings file.
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Subcommand)]
pub enum BeanCommand {
    /// Add a new bean.
    Add(BeanFields),

    /// Change a bean's details. Unset fields keep their value.
    Edit {
        /// Bean id or unique id prefix.
        #[arg(value_name = "BEAN")]
        bean: String,

        #[command(flatten)]
        fields: BeanEditFields,
    },

    /// Show a bean with its best shot and shot log.
    Show {
        /// Bean id or unique id prefix.
        #[arg(value_name = "BEAN")]
        bean: String,

        /// Order of the shot log (default from settings).
        #[arg(long = "sort", value_enum)]
        sort: Option<ShotOrderArg>,
    },

    /// Delete a bean and all of its shots.
    Delete {
        /// Bean id or unique id prefix.
        #[arg(value_name = "BEAN")]
        bean: String,

        #[command(flatten)]
        confirm: ConfirmArgs,
    },
}

#[derive(Args)]
pub struct BeanFields {
    #[arg(long = "roaster")]
    pub roaster: String,

    #[arg(long = "name")]
    pub name: String,

    #[arg(long = "origin", value_enum, default_value = "single-origin")]
    pub origin: OriginArg,

    #[arg(long = "roast", value_enum, default_value = "medium")]
    pub roast: RoastArg,

    /// Free-text tasting notes.
    #[arg(long = "notes", default_value = "")]
    pub notes: String,

    /// Encoded thumbnail, stored as given.
    #[arg(long = "image", value_name = "DATA")]
    pub image: Option<String>,
}

#[derive(Args)]
pub struct BeanEditFields {
    #[arg(long = "roaster")]
    pub roaster: Option<String>,

    #[arg(long = "name")]
    pub name: Option<String>,

    #[arg(long = "origin", value_enum)]
    pub origin: Option<OriginArg>,

    #[arg(long = "roast", value_enum)]
    pub roast: Option<RoastArg>,

    #[arg(long = "notes")]
    pub notes: Option<String>,

    #[arg(long = "image", value_name = "DATA", conflicts_with = "clear_image")]
    pub image: Option<String>,

    /// Remove the bean's thumbnail.
    #[arg(long = "clear-image")]
    pub clear_image: bool,
}

#[derive(Subcommand)]
pub enum ShotCommand {
    /// Log a shot. Recipe fields default to the bean's latest shot.
    Add(ShotFields),

    /// Delete a single shot.
    Delete {
        /// Shot id or unique id prefix.
        #[arg(value_name = "SHOT")]
        shot: String,

        #[command(flatten)]
        confirm: ConfirmArgs,
    },
}

#[derive(Args)]
pub struct ShotFields {
    /// Bean id or unique id prefix.
    #[arg(value_name = "BEAN")]
    pub bean: String,

    /// Rating from 1 to 10.
    #[arg(long = "rating", value_parser = clap::value_parser!(u8).range(1..=10))]
    pub rating: Option<u8>,

    /// Grams in.
    #[arg(long = "dose")]
    pub dose: Option<f64>,

    /// Grams out.
    #[arg(long = "yield")]
    pub yield_g: Option<f64>,

    /// Extraction time in seconds.
    #[arg(long = "time", value_parser = clap::value_parser!(u32).range(1..))]
    pub time: Option<u32>,

    #[arg(long = "grind")]
    pub grind: Option<String>,

    #[arg(long = "notes", default_value = "")]
    pub notes: String,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Output directory (default from settings, else the current directory).
    #[arg(long = "dir", value_name = "DIR")]
    pub dir: Option<PathBuf>,
}

#[derive(Args)]
pub struct ImportArgs {
    /// Backup file written by `beanlog export`.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[command(flatten)]
    pub confirm: ConfirmArgs,
}

#[derive(Args)]
pub struct ConfirmArgs {
    /// Do not ask for confirmation.
    #[arg(short = 'y', long = "yes")]
    pub yes: bool,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the settings file location.
    Path,
    /// Print the effective settings.
    Show,
    /// Write the default settings file.
    Init {
        /// Overwrite an existing file.
        #[arg(long = "force")]
        force: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OriginArg {
    SingleOrigin,
    Blend,
}

impl From<OriginArg> for OriginType {
    fn from(arg: OriginArg) -> Self {
        match arg {
            OriginArg::SingleOrigin => Self::SingleOrigin,
            OriginArg::Blend => Self::Blend,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum RoastArg {
    Light,
    LightMedium,
    Medium,
    MediumDark,
    Dark,
}

impl From<RoastArg> for RoastType {
    fn from(arg: RoastArg) -> Self {
        match arg {
            RoastArg::Light => Self::Light,
            RoastArg::LightMedium => Self::LightMedium,
            RoastArg::Medium => Self::Medium,
            RoastArg::MediumDark => Self::MediumDark,
            RoastArg::Dark => Self::Dark,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ShotOrderArg {
    Rating,
    Recent,
}

impl From<ShotOrderArg> for ShotOrder {
    fn from(arg: ShotOrderArg) -> Self {
        match arg {
            ShotOrderArg::Rating => Self::Rating,
            ShotOrderArg::Recent => Self::Recent,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_shot_add() {
        let cli = Cli::try_parse_from([
            "beanlog", "shot", "add", "8d0f", "--rating", "9", "--dose", "18.5", "--yield", "40",
        ])
        .unwrap();
        let Command::Shot(ShotCommand::Add(fields)) = cli.command else {
            panic!("expected shot add");
        };
        assert_eq!(fields.bean, "8d0f");
        assert_eq!(fields.rating, Some(9));
        assert_eq!(fields.yield_g, Some(40.0));
        assert!(fields.time.is_none());
    }

    #[test]
    fn test_rating_range_enforced() {
        assert!(Cli::try_parse_from(["beanlog", "shot", "add", "b", "--rating", "11"]).is_err());
        assert!(Cli::try_parse_from(["beanlog", "shot", "add", "b", "--rating", "0"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["beanlog", "beans", "--ephemeral", "--log-format", "json"])
            .unwrap();
        assert!(cli.ephemeral);
        assert!(matches!(cli.log_format, LogFormatArg::Json));
    }

    #[test]
    fn test_roast_value_names() {
        let cli = Cli::try_parse_from([
            "beanlog", "bean", "add", "--roaster", "Acme", "--name", "House", "--roast",
            "medium-dark",
        ])
        .unwrap();
        let Command::Bean(BeanCommand::Add(fields)) = cli.command else {
            panic!("expected bean add");
        };
        assert_eq!(RoastType::from(fields.roast), RoastType::MediumDark);
        assert_eq!(OriginType::from(fields.origin), OriginType::SingleOrigin);
    }
}
