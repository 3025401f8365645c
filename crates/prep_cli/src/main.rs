use std::path::{Path, PathBuf};
use std::process::exit;

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use prep_core::pipeline::{run_pipeline, PipelineConfig, PipelineReport};
use prep_core::PipelineError;

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "prep",
    about = "Preprocessing pipeline for tabular record files",
    long_about = "Loads a delimited record file, imputes missing values, extracts the\n\
                  embedded profile column, derives bucketed features, aggregates\n\
                  per-department statistics, and writes the results to disk."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a single input file
    Run {
        /// Input CSV file
        #[arg(long)]
        input: PathBuf,
        /// Directory receiving the output files
        #[arg(long, default_value = "output")]
        output_dir: PathBuf,
        /// Also write the transformed table as Parquet
        #[arg(long)]
        parquet: bool,
    },
    /// Process many input files as independent, isolated runs
    Batch {
        /// Input CSV files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        /// Directory receiving one output subdirectory per input file
        #[arg(long, default_value = "output")]
        output_dir: PathBuf,
        /// Number of worker threads (rayon default when omitted)
        #[arg(long)]
        jobs: Option<usize>,
        /// Also write the transformed tables as Parquet
        #[arg(long)]
        parquet: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            input,
            output_dir,
            parquet,
        } => run_single(&input, &output_dir, parquet),
        Commands::Batch {
            inputs,
            output_dir,
            jobs,
            parquet,
        } => run_batch(&inputs, &output_dir, jobs, parquet),
    }
}

// ── helpers ────────────────────────────────────────────────────────

fn step(label: &str) {
    eprintln!("\n=== {label} ===");
}

fn pipeline_config(input: &Path, output_dir: &Path, parquet: bool) -> PipelineConfig {
    let mut config = PipelineConfig::new(input, output_dir);
    config.parquet_output = parquet;
    config
}

/// Output subdirectory for one batch input, named after the file stem.
fn batch_output_dir(output_dir: &Path, input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "input".to_string());
    output_dir.join(stem)
}

fn print_report(report: &PipelineReport) {
    let missing = &report.missing_before_cleaning;
    println!(
        "missing before cleaning: age={} salary={} department={} profile={}",
        missing.age, missing.salary, missing.department, missing.profile
    );
    println!(
        "processed {} rows across {} departments ({} duplicate rows)",
        report.rows_processed, report.departments, report.quality.duplicate_rows
    );
    for path in &report.outputs {
        println!("wrote {}", path.display());
    }
}

// ── commands ───────────────────────────────────────────────────────

fn run_single(input: &Path, output_dir: &Path, parquet: bool) {
    step(&format!("processing {}", input.display()));
    match run_pipeline(&pipeline_config(input, output_dir, parquet)) {
        Ok(report) => print_report(&report),
        Err(error) => fail(&error),
    }
}

fn run_batch(inputs: &[PathBuf], output_dir: &Path, jobs: Option<usize>, parquet: bool) {
    step(&format!("processing {} input files", inputs.len()));

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .expect("progress template is static")
            .progress_chars("#>-"),
    );

    let pool = build_pool(jobs);
    let results: Vec<(&PathBuf, Result<PipelineReport, PipelineError>)> = pool.install(|| {
        inputs
            .par_iter()
            .map(|input| {
                let config =
                    pipeline_config(input, &batch_output_dir(output_dir, input), parquet);
                let result = run_pipeline(&config);
                pb.inc(1);
                (input, result)
            })
            .collect()
    });
    pb.finish_with_message("Completed");

    let mut failures = 0;
    for (input, result) in &results {
        match result {
            Ok(report) => println!(
                "{}: {} rows, {} departments",
                input.display(),
                report.rows_processed,
                report.departments
            ),
            Err(error) => {
                failures += 1;
                eprintln!(
                    "{}: failed at {} stage: {error}",
                    input.display(),
                    error.stage()
                );
            }
        }
    }

    if failures > 0 {
        eprintln!("{failures} of {} runs failed", results.len());
        exit(1);
    }
}

fn build_pool(jobs: Option<usize>) -> rayon::ThreadPool {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(threads) = jobs {
        builder = builder.num_threads(threads);
    }
    match builder.build() {
        Ok(pool) => pool,
        Err(error) => {
            eprintln!("cannot create thread pool: {error}");
            exit(1);
        }
    }
}

fn fail(error: &PipelineError) -> ! {
    eprintln!("pipeline failed at {} stage: {error}", error.stage());
    exit(1);
}
