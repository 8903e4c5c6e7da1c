use anyhow::{bail, Context, Result};
use std::env;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::info;

// Use library instead of local modules
use course_catalog::{ingest_csv, ingest_json, logging, IngestConfig};

const USAGE: &str = "usage: catalog-normalize <rows.csv|rows.json> [--skip-invalid] [--config <config.json>] [--verbose]";

struct Args {
    input: PathBuf,
    config: Option<PathBuf>,
    skip_invalid: bool,
    verbose: bool,
}

fn main() -> Result<()> {
    let args = parse_args(env::args().skip(1))?;
    logging::init_logging(args.verbose)?;

    run(&args)
}

fn parse_args(mut raw: impl Iterator<Item = String>) -> Result<Args> {
    let mut input = None;
    let mut config = None;
    let mut skip_invalid = false;
    let mut verbose = false;

    while let Some(arg) = raw.next() {
        match arg.as_str() {
            "--skip-invalid" => skip_invalid = true,
            "--verbose" | "-v" => verbose = true,
            "--config" => {
                let path = raw.next().context("--config needs a path")?;
                config = Some(PathBuf::from(path));
            }
            "--help" | "-h" => {
                println!("{}", USAGE);
                std::process::exit(0);
            }
            other if other.starts_with('-') => bail!("unknown option {}\n{}", other, USAGE),
            other => input = Some(PathBuf::from(other)),
        }
    }

    let input = match input {
        Some(input) => input,
        None => bail!("missing input file\n{}", USAGE),
    };

    Ok(Args {
        input,
        config,
        skip_invalid,
        verbose,
    })
}

fn load_config(args: &Args) -> Result<IngestConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config {}", path.display()))?;
            IngestConfig::from_json_reader(BufReader::new(file)).context("Failed to parse config")?
        }
        None => IngestConfig::default(),
    };

    if args.skip_invalid {
        config.skip_invalid_rows = true;
    }

    Ok(config)
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| ext.eq_ignore_ascii_case("json"))
}

fn run(args: &Args) -> Result<()> {
    let config = load_config(args)?;

    info!("Reading rows from {}", args.input.display());
    let file = File::open(&args.input)
        .with_context(|| format!("Failed to open {}", args.input.display()))?;
    let reader = BufReader::new(file);

    let report = if is_json(&args.input) {
        ingest_json(reader, &config)
    } else {
        ingest_csv(reader, &config)
    }
    .context("Failed to ingest catalog rows")?;

    let groups = report.catalog.into_groups();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, &groups).context("Failed to write output")?;
    writeln!(out)?;

    Ok(())
}
