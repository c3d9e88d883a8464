//! Command handlers

use crate::cli::{Cli, Commands};
use crate::output::{output_components, output_rows, output_total};
use beam_app::config::Config;
use beam_app::session::Session;
use beam_domain::model::{BuildingType, ProjectInfo, RowInput};
use beam_domain::service::{component_totals, generate_summary_report};
use beam_types::{Cell, Component, ConfigError, Error, LedgerError, OutputFormat, Result};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Execute CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let config = match cli.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let output_format = cli.format.unwrap_or(config.output_format);

    let result = match &cli.command {
        Commands::Init { empty, force } => {
            cmd_init(&cli.ledger, !empty && config.seed_defaults, *force)
        }

        Commands::Project {
            name,
            building_type,
            floor_area,
            id,
            clear,
        } => cmd_project(
            &cli.ledger,
            name.clone(),
            *building_type,
            *floor_area,
            id.clone(),
            *clear,
            output_format,
        ),

        Commands::Rows { component } => cmd_rows(&cli.ledger, component, output_format),

        Commands::Import { component, csv } => cmd_import(&cli.ledger, component, csv),

        Commands::Add {
            component,
            material,
            category,
            quantity,
            unit,
            factor,
        } => {
            let row = RowInput::new(
                material.as_str(),
                category.as_str(),
                Cell::from_text(quantity),
                unit.as_str(),
                Cell::from_text(factor),
            );
            cmd_add(&cli.ledger, component, row)
        }

        Commands::Remove { component, row } => cmd_remove(&cli.ledger, component, *row),

        Commands::Total { component } => cmd_total(&cli.ledger, component, output_format),

        Commands::Summary => cmd_summary(&cli.ledger, output_format),

        Commands::Export { output } => cmd_export(&cli.ledger, &config, output.clone()),

        Commands::Components => cmd_components(&cli.ledger, output_format),

        Commands::Config {
            show,
            set_output,
            set_seed_defaults,
            set_report_dir,
            set_report_file,
            reset,
        } => cmd_config(
            cli.config.as_deref(),
            *show,
            *set_output,
            *set_seed_defaults,
            set_report_dir.clone(),
            set_report_file.clone(),
            *reset,
        ),
    };

    if let Err(Error::Ledger(LedgerError::InvalidRow { ref issues })) = result {
        for issue in issues {
            warn!(row = issue.row + 1, field = %issue.field, problem = %issue.problem, "row rejected");
        }
    }
    result
}

/// Component names come in as free text; unknown names surface here
fn parse_component(name: &str) -> Result<Component> {
    Ok(name.parse::<Component>()?)
}

fn cmd_init(ledger_path: &Path, seed: bool, force: bool) -> Result<()> {
    let session = Session::create(ledger_path, seed, force)?;
    println!(
        "Created ledger: {} ({} rows)",
        session.path().display(),
        session.ledger.row_count()
    );
    Ok(())
}

fn cmd_project(
    ledger_path: &Path,
    name: Option<String>,
    building_type: Option<BuildingType>,
    floor_area: Option<f64>,
    id: Option<String>,
    clear: bool,
    output_format: OutputFormat,
) -> Result<()> {
    let mut session = Session::open(ledger_path)?;

    if clear {
        session.project = None;
        session.save()?;
        println!("Project information removed");
        return Ok(());
    }

    let modified =
        name.is_some() || building_type.is_some() || floor_area.is_some() || id.is_some();
    let mut project = session.project.clone().unwrap_or_default();

    if let Some(name) = name {
        project.name = name;
    }
    if let Some(building_type) = building_type {
        project.building_type = building_type;
    }
    if let Some(area) = floor_area {
        project.floor_area_m2 = area;
    }
    if let Some(id) = id {
        project.project_id = id;
    }

    if modified {
        project.validate()?;
        session.project = Some(project.clone());
        session.save()?;
        println!("Project information updated");
    }

    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&project)?),
        OutputFormat::Table => print_project(&project, session.project.is_some()),
    }
    Ok(())
}

fn print_project(project: &ProjectInfo, saved: bool) {
    println!("\nProject");
    println!("=======");
    println!("Name:           {}", project.name);
    println!("Building type:  {}", project.building_type);
    println!("Floor area:     {:.1} m²", project.floor_area_m2);
    println!("Project ID:     {}", project.project_id);
    if !saved {
        println!("\n(defaults shown; not yet saved to the ledger)");
    }
}

fn cmd_rows(ledger_path: &Path, component: &str, output_format: OutputFormat) -> Result<()> {
    let session = Session::open(ledger_path)?;
    let component = parse_component(component)?;
    output_rows(
        output_format,
        component,
        session.ledger.get_rows(component),
        session.ledger.component_total(component),
    )
}

fn cmd_import(ledger_path: &Path, component: &str, csv_path: &Path) -> Result<()> {
    if !csv_path.exists() {
        return Err(Error::FileNotFound(format!(
            "CSV file not found: {}",
            csv_path.display()
        )));
    }

    let component = parse_component(component)?;
    let mut session = Session::open(ledger_path)?;
    let count = session.import_csv(component, csv_path)?;
    session.save()?;

    println!("Imported {} rows into {}", count, component.label());
    println!(
        "  Total: {:.1} kg CO2e",
        session.ledger.component_total(component)
    );
    Ok(())
}

fn cmd_add(ledger_path: &Path, component: &str, row: RowInput) -> Result<()> {
    let component = parse_component(component)?;
    let mut session = Session::open(ledger_path)?;

    let item = session.ledger.add_row(component, row)?;
    println!(
        "Added {} to {}: {:.1} kg CO2e",
        item.material(),
        component.label(),
        item.emissions()
    );

    session.save()
}

fn cmd_remove(ledger_path: &Path, component: &str, row: usize) -> Result<()> {
    let component = parse_component(component)?;
    let mut session = Session::open(ledger_path)?;

    let removed = row
        .checked_sub(1)
        .and_then(|index| session.ledger.remove_row(component, index))
        .ok_or_else(|| {
            Error::InvalidInput(format!(
                "{} has no row {} ({} rows)",
                component.label(),
                row,
                session.ledger.get_rows(component).len()
            ))
        })?;

    session.save()?;
    println!("Removed {} from {}", removed.material(), component.label());
    Ok(())
}

fn cmd_total(ledger_path: &Path, component: &str, output_format: OutputFormat) -> Result<()> {
    let session = Session::open(ledger_path)?;
    let component = parse_component(component)?;
    output_total(
        output_format,
        component,
        session.ledger.component_total(component),
    )
}

fn cmd_summary(ledger_path: &Path, output_format: OutputFormat) -> Result<()> {
    let session = Session::open(ledger_path)?;
    let report = session.report();

    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Table => {
            let text =
                generate_summary_report(&session.ledger, &report.summary, report.project.as_ref());
            println!("{}", text);
        }
    }
    Ok(())
}

fn cmd_export(ledger_path: &Path, config: &Config, output: Option<PathBuf>) -> Result<()> {
    let session = Session::open(ledger_path)?;
    let output_path = output.unwrap_or_else(|| config.default_report_path());

    session.save_report(&output_path)?;

    println!("Exported to: {}", output_path.display());
    Ok(())
}

fn cmd_components(ledger_path: &Path, output_format: OutputFormat) -> Result<()> {
    let session = Session::open(ledger_path)?;
    output_components(output_format, &component_totals(&session.ledger))
}

fn cmd_config(
    config_path: Option<&Path>,
    show: bool,
    set_output: Option<OutputFormat>,
    set_seed_defaults: Option<bool>,
    set_report_dir: Option<PathBuf>,
    set_report_file: Option<String>,
    reset: bool,
) -> Result<()> {
    let config_path = match config_path {
        Some(path) => path.to_path_buf(),
        None => Config::config_path()?,
    };

    if reset {
        let config = Config::default();
        config.save_to(&config_path)?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load_from(&config_path)?;
    let mut modified = false;

    if let Some(output_format) = set_output {
        config.output_format = output_format;
        modified = true;
    }

    if let Some(seed) = set_seed_defaults {
        config.seed_defaults = seed;
        modified = true;
    }

    if let Some(dir) = set_report_dir {
        config.report_dir = Some(dir);
        modified = true;
    }

    if let Some(file_name) = set_report_file {
        if file_name.trim().is_empty() {
            return Err(ConfigError::SaveError("report file name is empty".to_string()).into());
        }
        config.report_file_name = file_name;
        modified = true;
    }

    if modified {
        config.save_to(&config_path)?;
        println!("Configuration updated");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}
