use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

use cv_generator::generator::{DEFAULT_OUTPUT_DIR, DEFAULT_YAML_FILE};
use cv_generator::setup::{self, SetupOptions, SetupOutcome};
use cv_generator::{verify, CvGenerator, GeneratorOptions, Identity};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

const LOG_FILE: &str = "cv_generation.log";

#[derive(Parser)]
#[command(name = "cv-generator")]
#[command(about = "Generate a CV document from YAML data")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Path to YAML file containing CV data
    #[arg(long, default_value = DEFAULT_YAML_FILE)]
    yaml_file: PathBuf,

    /// Output directory for generated CV
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Settings file with identity fields (CV_NAME, CV_EMAIL, ...)
    #[arg(long, default_value = ".env")]
    env_file: PathBuf,
}

#[derive(Subcommand)]
enum Command {
    /// Create the CV data file from the bundled example
    Init {
        /// Overwrite an existing data file
        #[arg(short, long)]
        force: bool,

        /// Name to put in the generated settings file
        #[arg(long)]
        name: Option<String>,

        /// Email to put in the generated settings file
        #[arg(long)]
        email: Option<String>,
    },
    /// Check a generated .docx for the standard CV sections
    Verify {
        /// Document to inspect (defaults to the newest .docx in the output directory)
        file: Option<PathBuf>,
    },
}

fn init_logging() -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(LOG_FILE)
        .with_context(|| format!("Failed to open log file {}", LOG_FILE))?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .json()
                .with_writer(file)
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(fmt::layer().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    Ok(())
}

fn run(cli: Cli) -> Result<bool> {
    match cli.command {
        Some(Command::Init { force, name, email }) => {
            let options = SetupOptions {
                yaml_file: cli.yaml_file,
                env_file: cli.env_file,
                output_dir: cli.output_dir,
                name,
                email,
                force,
            };
            match setup::init_workspace(&options)? {
                SetupOutcome::Created(files) => info!("Created {} file(s)", files.len()),
                SetupOutcome::Preserved(path) => {
                    info!("Setup cancelled, existing {} is preserved", path.display())
                }
            }
            Ok(true)
        }
        Some(Command::Verify { file }) => {
            let file = match file {
                Some(file) => file,
                None => verify::latest_docx(&cli.output_dir)?,
            };
            info!("Verifying {}", file.display());
            let report = verify::verify_docx(&file)?;
            if report.passed() {
                info!("All checks passed for {}", file.display());
            } else {
                error!(
                    "Only {}/{} expected sections found in {}",
                    report.found_sections.len(),
                    verify::EXPECTED_SECTIONS.len(),
                    file.display()
                );
            }
            Ok(report.passed())
        }
        None => {
            let identity = Identity::load(Some(&cli.env_file))?;
            let options = GeneratorOptions::default()
                .with_yaml_file(cli.yaml_file)
                .with_output_dir(cli.output_dir);

            let generated = CvGenerator::new(options, identity).generate()?;
            info!("CV written to {}", generated.docx_path.display());
            if let Some(pdf) = &generated.pdf_path {
                info!("PDF written to {}", pdf.display());
            }
            Ok(true)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging() {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
            .init();
        error!("File logging disabled: {:#}", e);
    }

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("CV generation failed: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
