//! Command-line entry point for the reticle icon generator.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use reticle_icons::{GeneratorConfig, IconGenerator, OutputFormat};
use tracing_subscriber::EnvFilter;

/// Generate reticle icons at several pixel sizes
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON config file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory to write icons into
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Icon size in pixels (repeat for several sizes)
    #[arg(short, long = "size", value_name = "PIXELS")]
    sizes: Vec<u32>,

    /// Output file format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Rotate every theme color's hue by this many degrees
    #[arg(long, value_name = "DEGREES", allow_negative_numbers = true)]
    hue: Option<f32>,

    /// Print the draw commands as JSON instead of writing files
    #[arg(long)]
    dump_commands: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", error_chain(&err));
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> reticle_icons::Result<()> {
    let config = build_config(&args)?;
    let generator = IconGenerator::new(config);

    if args.dump_commands {
        for size in generator.config().validated_sizes()? {
            let commands = generator.commands(size.get())?;
            println!("{}", serde_json::to_string(&commands)?);
        }
        return Ok(());
    }

    generator.generate_with(|path| println!("Generated {}", path.display()))?;
    Ok(())
}

fn build_config(args: &Args) -> reticle_icons::Result<GeneratorConfig> {
    let mut config = match &args.config {
        Some(path) => GeneratorConfig::load(path)?,
        None => GeneratorConfig::default(),
    };

    if let Some(dir) = &args.output_dir {
        config.output_dir = dir.clone();
    }
    if !args.sizes.is_empty() {
        config.sizes = args.sizes.clone();
    }
    if let Some(format) = args.format {
        config.format = format;
    }
    if let Some(degrees) = args.hue {
        config.theme = config.theme.hue_rotated(degrees);
    }

    config.validate()?;
    Ok(config)
}

/// Joins an error with its sources, outermost first.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
