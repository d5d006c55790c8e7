use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use dialoguer::Input;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use plantwise::analysis::{self, AnalysisParams, DEFAULT_CLUSTERS};
use plantwise::cluster::DEFAULT_MAX_ITER;
use plantwise::condition::OPTIMAL_THRESHOLD;
use plantwise::{io, Feature, MatchResult, PlantDatabase, PlantRange, Point, Report};

#[derive(Parser)]
#[command(name = "plantwise")]
#[command(about = "Cluster sensor readings and recommend a plant for the conditions")]
#[command(version)]
struct Cli {
    /// Temperature readings, one per line
    #[arg(long, default_value = "temp.txt")]
    temperature: PathBuf,
    /// Light level readings, one per line
    #[arg(long, default_value = "light.txt")]
    light: PathBuf,
    /// Moisture readings, one per line
    #[arg(long, default_value = "moisture.txt")]
    moisture: PathBuf,
    /// Plant range table
    #[arg(long, default_value = "plantdb.txt")]
    plants: PathBuf,
    /// Plant to compare against; prompts when omitted
    #[arg(long)]
    plant: Option<String>,
    /// Number of clusters
    #[arg(short = 'k', long = "clusters", default_value_t = DEFAULT_CLUSTERS)]
    clusters: usize,
    /// K-means iteration cap
    #[arg(long, default_value_t = DEFAULT_MAX_ITER)]
    max_iterations: usize,
    /// Distance to the centroid under which a reading is optimal
    #[arg(long, default_value_t = OPTIMAL_THRESHOLD)]
    threshold: f64,
    /// Seed for reproducible clustering
    #[arg(long)]
    seed: Option<u64>,
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn capitalize(name: &str) -> String {
    let lower = name.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Ask until the user names a species present in `db`.
fn prompt_for_plant(db: &PlantDatabase) -> Result<String> {
    println!("Available plants:");
    for plant in db {
        println!("- {}", capitalize(&plant.species));
    }
    let name: String = Input::new()
        .with_prompt("Enter the plant name (choose from the list above)")
        .validate_with(|input: &String| -> std::result::Result<(), &'static str> {
            if db.get(input).is_some() {
                Ok(())
            } else {
                Err("Plant not found. Please choose a valid plant from the list.")
            }
        })
        .interact_text()
        .context("failed to read plant name")?;
    Ok(name)
}

fn print_table(report: &Report) {
    println!("\nEnvironmental conditions with clusters and conditions:");
    println!(
        "{:>3}  {:>11}  {:>11}  {:>9}  {:>7}  {:<11}",
        "#", "temperature", "light_level", "moisture", "cluster", "condition"
    );
    for (i, row) in report.rows.iter().enumerate() {
        println!(
            "{:>3}  {:>11.2}  {:>11.2}  {:>9.2}  {:>7}  {:<11}",
            i,
            row.point.temperature,
            row.point.light,
            row.point.moisture,
            row.cluster,
            row.condition
        );
    }
}

fn print_summary(report: &Report) {
    println!("\nMedian and standard deviation of environmental conditions:");
    for (label, feature) in [
        ("Temperature", Feature::Temperature),
        ("Light Level", Feature::Light),
        ("Moisture", Feature::Moisture),
    ] {
        let s = report.summary.get(feature);
        println!("{label} - Median: {}, Std Dev: {:.4}", s.median, s.std_dev);
    }
}

fn print_ranges(heading: &str, plant: &PlantRange, score: &MatchResult) {
    println!(
        "\nOptimal conditions for {heading} ({}), penalty {:.2}:",
        capitalize(&plant.species),
        score.distance
    );
    println!("Temperature: {}", plant.temperature);
    println!("Light Level: {}", plant.light);
    println!("Moisture: {}", plant.moisture);
}

/// Current medians against each optimal range, as text rows rather than charts.
fn print_comparison(plant: &PlantRange, medians: &Point) {
    println!(
        "\nCurrent conditions vs optimal ranges for {}:",
        capitalize(&plant.species)
    );
    for (feature, fit) in plant.fit(medians) {
        let range = plant.range(feature);
        println!(
            "  {:<12} current {:>8.2}  optimal {:>10}  {}",
            feature.name(),
            medians.get(feature),
            range,
            fit.display_text()
        );
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let dataset = io::load_dataset(&cli.temperature, &cli.light, &cli.moisture)
        .context("failed to load sensor readings")?;
    let db = io::load_plant_database(&cli.plants)
        .with_context(|| format!("failed to load plant table {}", cli.plants.display()))?;
    if db.is_empty() {
        anyhow::bail!("No plant data available in {}", cli.plants.display());
    }

    let plant = match cli.plant {
        Some(name) => name,
        None => prompt_for_plant(&db)?,
    };

    let params = AnalysisParams {
        k: cli.clusters,
        max_iter: cli.max_iterations,
        threshold: cli.threshold,
        seed: cli.seed,
    };
    let report = analysis::run(&dataset, &db, Some(&plant), &params)?;
    let medians = report.summary.medians();

    print_table(&report);
    print_summary(&report);

    if let Some(selected) = &report.selected {
        let plant = db.resolve(&selected.species)?;
        print_ranges("selected plant", plant, selected);
        print_comparison(plant, &medians);
    }

    let best = db.resolve(&report.best.species)?;
    println!(
        "\nThe closest matching plant for the current environmental conditions is: {}",
        capitalize(&best.species)
    );
    print_ranges("best plant", best, &report.best);
    print_comparison(best, &medians);

    Ok(())
}
