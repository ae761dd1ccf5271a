use clap::Parser;
use imgfit::config::{ConfigError, OutputFormat, ProcessingConfig, Quality, SkipPolicy};
use imgfit::{output, walk};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "imgfit")]
#[command(about = "Normalize images in a directory tree, in place")]
#[command(long_about = "\
Normalize images in a directory tree, in place.

Every image under ROOT is rewritten as true-color RGB in the target format,
resized so its longer edge fits --max-size (aspect preserved). Files already
matching the target are left byte-for-byte untouched; non-image files are
ignored. Originals in another format are deleted once their replacement is
written.

With --upscaler, images smaller than the bound on both edges are first grown
through the external tool, invoked as `<exe> -i <input> -o <output>`. The
tool's exit code is ignored; imgfit checks that the output file exists.

Skip policies:
  bounded  skip once both dimensions fit within the bound (default)
  exact    skip only once one dimension sits exactly on the bound

Per-file failures are reported and the walk continues. The exit code is
non-zero only for configuration errors (bad root, missing upscaler).")]
#[command(version)]
struct Cli {
    /// Root directory to process recursively
    root: PathBuf,

    /// Bounding dimension in pixels, applied to the longer edge
    #[arg(long, default_value_t = 1024)]
    max_size: u32,

    /// Output container format
    #[arg(long, value_enum, default_value_t = OutputFormat::Jpeg)]
    format: OutputFormat,

    /// Lossy encoding quality (0-100)
    #[arg(long, default_value_t = 90)]
    quality: u8,

    /// External super-resolution executable
    #[arg(long)]
    upscaler: Option<PathBuf>,

    /// When to leave a file untouched
    #[arg(long, value_enum, default_value_t = SkipPolicy::Bounded)]
    skip_policy: SkipPolicy,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), ConfigError> {
    let config = ProcessingConfig {
        max_size: cli.max_size,
        format: cli.format,
        quality: Quality::new(cli.quality),
        upscaler: cli.upscaler,
        skip_policy: cli.skip_policy,
    };
    config.validate(&cli.root)?;

    let mut summary = output::RunSummary::default();
    for report in walk::walk(&cli.root, &config) {
        output::print_report(&report);
        summary.record(&report.outcome);
    }
    println!("{summary}");
    Ok(())
}
