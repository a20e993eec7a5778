use anyhow::Result;
use clap::Parser;
use php7ize::Converter;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Rewrites PHPDoc @param/@return annotations into native PHP 7 type
/// declarations.
#[derive(Parser, Debug)]
#[command(name = "php7ize")]
#[command(version)]
struct Cli {
    /// PHP source file to convert
    source: PathBuf,

    /// Write the converted source to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the converted source to stdout even when --output is given
    /// (the default when no output file is set)
    #[arg(short, long)]
    echo: bool,

    /// Suppress warnings
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let echo = cli.echo || cli.output.is_none();

    Converter::new(cli.source)
        .output_file(cli.output)
        .echo(echo)
        .quiet(cli.quiet)
        .convert()?;
    Ok(())
}
