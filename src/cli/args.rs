//! CLI argument definitions for `vcounsel`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use virtual_counselor::config::ConfigOverrides;
use virtual_counselor::engine::grading::{GradeScale, ThresholdPreset};
use virtual_counselor::logger::Level;
use virtual_counselor::report::ReportFormat;

/// CLI log level argument
///
/// Converts to lowercase strings for config storage and to [`Level`] for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(Level::from(*self).as_str())
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    Get {
        /// Optional configuration key (e.g., `level`, `scale`, `base_credits`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Restore one configuration value to its default.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum PlanSubcommand {
    /// Import a plan file (.json or .csv) into the plan store.
    Import {
        /// Plan file to import
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Show the stored plan.
    Show {
        /// Print the plan as JSON instead of a term listing
        #[arg(long)]
        json: bool,
    },
    /// Export the stored plan to a .json or .csv file.
    Export {
        /// Destination file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Clear all courses and declared programs from the stored plan.
    Reset,
    /// Remove every stored key (plan, course list, gradebooks).
    Clear,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Compute GPA and credit totals for a plan file.
    Gpa {
        /// Plan file (.json or .csv)
        #[arg(value_name = "PLAN")]
        plan: PathBuf,

        /// Grade-point scale (standard, no-d-minus); defaults to config
        #[arg(long, value_name = "SCALE")]
        scale: Option<GradeScale>,

        /// GPA already on the transcript
        #[arg(long, value_name = "GPA", requires = "prior_credits")]
        prior_gpa: Option<f64>,

        /// Credits behind the prior GPA
        #[arg(long, value_name = "CREDITS", requires = "prior_gpa")]
        prior_credits: Option<f32>,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the current grade and the score needed for a target letter.
    Grade {
        /// Gradebook file (.toml or .json)
        #[arg(value_name = "GRADEBOOK")]
        gradebook: PathBuf,

        /// Target letter grade (defaults to the gradebook's target, then A)
        #[arg(short, long, value_name = "LETTER")]
        target: Option<String>,

        /// Index of the ungraded category to project (0-based)
        #[arg(short, long, value_name = "INDEX")]
        category: Option<usize>,

        /// Letter thresholds (standard, inline); defaults to config
        #[arg(long, value_name = "PRESET")]
        thresholds: Option<ThresholdPreset>,

        /// Also save the gradebook to the plan store
        #[arg(long)]
        save: bool,
    },
    /// Classify requirement text into UCORE, CS, technical and general electives.
    Classify {
        /// Footnote or slot text to classify
        #[arg(value_name = "TEXT")]
        text: String,

        /// Plan file whose courses are excluded from elective filters
        #[arg(long, value_name = "PLAN")]
        plan: Option<PathBuf>,

        /// Match keywords and course codes case-sensitively
        #[arg(long)]
        exact_case: bool,
    },
    /// Show which courses could count toward more than one program.
    Overlap {
        /// Plan file (.json or .csv)
        #[arg(value_name = "PLAN")]
        plan: PathBuf,

        /// Match "elective" and " or " case-sensitively
        #[arg(long)]
        exact_case: bool,
    },
    /// Manage the stored degree plan.
    Plan {
        #[command(subcommand)]
        subcommand: PlanSubcommand,
    },
    /// Generate a plan summary report.
    Report {
        /// Plan file (.json or .csv)
        #[arg(value_name = "PLAN")]
        plan: PathBuf,

        /// Output file path (defaults to `reports_dir`/<plan name>.<ext>)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Report format: markdown (md) or html
        #[arg(short, long, value_name = "FORMAT", default_value = "markdown")]
        format: ReportFormat,

        /// Grade-point scale (standard, no-d-minus); defaults to config
        #[arg(long, value_name = "SCALE")]
        scale: Option<GradeScale>,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "vcounsel",
    about = "Virtual Counselor degree planning CLI",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override config grade-point scale
    #[arg(long = "config-scale", value_name = "SCALE")]
    pub config_scale: Option<GradeScale>,

    /// Override config letter thresholds
    #[arg(long = "config-thresholds", value_name = "PRESET")]
    pub config_thresholds: Option<ThresholdPreset>,

    /// Override config plan store directory
    #[arg(long = "config-data-dir", value_name = "DIR")]
    pub config_data_dir: Option<PathBuf>,

    /// Override config plan store directory (short form)
    #[arg(long = "data-dir", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override config reports directory
    #[arg(long = "config-reports-dir", value_name = "DIR")]
    pub config_reports_dir: Option<PathBuf>,

    /// Override config reports directory (short form)
    #[arg(long = "reports-dir", value_name = "DIR")]
    pub reports_dir: Option<PathBuf>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

fn path_string(path: Option<&PathBuf>) -> Option<String> {
    path.map(|p| p.to_string_lossy().to_string())
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// Short-form flags (e.g., `--data-dir`) take precedence over long-form
    /// flags (e.g., `--config-data-dir`) when both are provided.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: path_string(self.config_log_file.as_ref()),
            verbose: self.config_verbose,
            scale: self.config_scale.map(|s| s.to_string()),
            thresholds: self.config_thresholds.map(|t| t.to_string()),
            data_dir: path_string(self.data_dir.as_ref())
                .or_else(|| path_string(self.config_data_dir.as_ref())),
            reports_dir: path_string(self.reports_dir.as_ref())
                .or_else(|| path_string(self.config_reports_dir.as_ref())),
        }
    }
}
