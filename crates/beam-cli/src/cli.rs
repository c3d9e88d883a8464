//! CLI definition using clap

use beam_domain::model::BuildingType;
use beam_types::OutputFormat;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use crate::logging::{LogConfig, LogFormat};

#[derive(Parser)]
#[command(name = "beam")]
#[command(author = "yuuji")]
#[command(version)]
#[command(about = "Embodied carbon accounting for building materials")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Ledger document to operate on
    #[arg(long, short = 'l', global = true, default_value = "beam_ledger.json")]
    pub ledger: PathBuf,

    /// Config file override
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

impl Cli {
    pub fn log_config(&self) -> LogConfig {
        LogConfig::from_verbosity(self.verbose).with_format(self.log_format)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new ledger document
    Init {
        /// Start with every component empty
        #[arg(long)]
        empty: bool,

        /// Overwrite an existing ledger document
        #[arg(long)]
        force: bool,
    },

    /// Set project information
    Project {
        /// Project name
        #[arg(long)]
        name: Option<String>,

        /// Building type (office, residential, school, hospital)
        #[arg(long)]
        building_type: Option<BuildingType>,

        /// Floor area (m²)
        #[arg(long)]
        floor_area: Option<f64>,

        /// Project ID
        #[arg(long)]
        id: Option<String>,

        /// Remove project information
        #[arg(long)]
        clear: bool,
    },

    /// List the rows of a component
    Rows {
        /// Component label or slug (e.g., "Footings & Slabs", "roof")
        component: String,
    },

    /// Replace a component's rows from a CSV file
    Import {
        /// Component label or slug
        component: String,

        /// CSV file with Material,Category,Quantity,Unit,Emission Factor columns
        csv: PathBuf,
    },

    /// Append a row to a component
    Add {
        /// Component label or slug
        component: String,

        #[arg(long)]
        material: String,

        #[arg(long, default_value = "")]
        category: String,

        #[arg(long)]
        quantity: String,

        #[arg(long, default_value = "")]
        unit: String,

        /// Emission factor (kg CO2e per unit)
        #[arg(long)]
        factor: String,
    },

    /// Remove a row from a component
    Remove {
        /// Component label or slug
        component: String,

        /// 1-based row number as shown by `rows`
        row: usize,
    },

    /// Show a component's total emissions
    Total {
        /// Component label or slug
        component: String,
    },

    /// Show emissions by material and the grand total
    Summary,

    /// Export the ledger and summary to Excel
    Export {
        /// Output Excel file path
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// List the building components
    Components,

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Seed new ledgers with the default entry set
        #[arg(long)]
        set_seed_defaults: Option<bool>,

        /// Set the default report directory
        #[arg(long)]
        set_report_dir: Option<PathBuf>,

        /// Set the default report file name
        #[arg(long)]
        set_report_file: Option<String>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}
