use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use env_logger::Env;
use toothmap::{DEFAULT_CHART_PATH, LabelConfig, LabelReport};

mod color;

#[derive(Parser)]
#[command(name = "toothmap")]
#[command(about = "Assign tooth-N ids to the paths of a dental chart SVG", long_about = None)]
#[command(version)]
struct Cli {
    /// Chart SVG to label in place
    #[arg(value_hint = clap::ValueHint::FilePath, default_value = DEFAULT_CHART_PATH)]
    file: PathBuf,

    /// Write the labeled chart here instead of overwriting FILE
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    output: Option<PathBuf>,

    /// Print the assignments without writing anything
    #[arg(long)]
    dry_run: bool,
}

impl From<Cli> for LabelConfig {
    fn from(cli: Cli) -> Self {
        Self {
            input: cli.file,
            output: cli.output,
            dry_run: cli.dry_run,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    color::init_color();

    // Initialize logger with default level (overridden by RUST_LOG)
    let env = Env::default().default_filter_or("warn");
    env_logger::Builder::from_env(env).init();

    let config = LabelConfig::from(cli);
    let chart = toothmap::label_chart(&config)?;
    print_report(&chart.report);
    chart.save(&config)?;

    if config.dry_run {
        eprintln!("{}", "Dry run, chart not written".yellow());
    } else {
        eprintln!(
            "{} Saved labeled chart to {:?}",
            "✓".green(),
            config.output_path()
        );
    }
    Ok(())
}

fn print_report(report: &LabelReport) {
    println!("Found {} paths.", report.path_count);

    for warning in &report.warnings {
        eprintln!("{} {}", "Warning:".yellow().bold(), warning);
    }

    for assignment in &report.assignments {
        let previous = assignment.previous_id.as_deref().unwrap_or("(no id)");
        println!(
            "{} -> {} ({} row, x: {:.1}, y: {:.1})",
            previous,
            assignment.tooth.to_string().bold(),
            assignment.row,
            assignment.position.x,
            assignment.position.y
        );
    }
}
