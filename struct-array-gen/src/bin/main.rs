use std::io::Write;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use struct_array_gen::merge::MAX_WORKERS;
use struct_array_gen::{FileSink, Generator, Manifest};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(
    name = "struct-array-gen",
    about = "Generate fixed-capacity struct array types from a manifest",
    version
)]
pub struct Cli {
    /// Manifest listing the `[[struct_array]]` types to generate
    #[clap(default_value = "StructArrays.toml")]
    manifest: PathBuf,
    /// Directory to write the generated file to, overriding `[generator] out_dir`
    #[clap(short, long, env = "STRUCT_ARRAY_OUT_DIR")]
    out_dir: Option<PathBuf>,
    /// Number of synthesis threads, overriding `[generator] workers`
    #[clap(short, long, value_parser = parse_jobs)]
    jobs: Option<usize>,
    /// Print the generated document instead of writing it
    #[clap(long, conflicts_with = "out_dir")]
    stdout: bool,
    /// Increase log verbosity (-v for debug, -vv for trace)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_jobs(value: &str) -> Result<usize> {
    let jobs: usize = value.parse()?;
    if !(1..=MAX_WORKERS).contains(&jobs) {
        return Err(anyhow!("expected a value in 1..={MAX_WORKERS}"));
    }
    Ok(jobs)
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

pub fn entry(opts: Cli) -> Result<()> {
    let manifest = Manifest::load(&opts.manifest)?;

    let mut generator = Generator::from_config(&manifest.generator);
    if let Some(jobs) = opts.jobs {
        generator = generator.workers(jobs);
    }

    if opts.stdout {
        if let Some(document) = generator.generate(&manifest)? {
            std::io::stdout()
                .lock()
                .write_all(document.as_bytes())
                .context("failed to write to stdout")?;
        }
        return Ok(());
    }

    let out_dir = opts.out_dir.unwrap_or_else(|| manifest.out_dir());
    let mut sink = FileSink::new(out_dir);
    generator
        .run(&manifest, &mut sink)
        .with_context(|| format!("generation from `{}` failed", opts.manifest.display()))?;
    Ok(())
}

fn main() -> Result<()> {
    let opts = Cli::parse();
    init_tracing(opts.verbose);
    entry(opts)
}
