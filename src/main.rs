use anyhow::{anyhow, Context};
use clap::Parser;
use std::path::PathBuf;

use imgix_resolve::{ParamValue, ResolutionRequest, SourceRegistry, UrlResolver};

/// imgix-resolve - Resolve image paths into signed imgix delivery URLs
#[derive(Parser, Debug)]
#[command(name = "imgix-resolve")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to settings file
    #[arg(short, long, default_value = "imgix.yaml")]
    config: PathBuf,

    /// Named source to resolve against (default source when omitted)
    #[arg(short, long, default_value = "")]
    source: String,

    /// Alias preset to apply
    #[arg(short, long)]
    alias: Option<String>,

    /// Rendering parameter as key=value (repeatable)
    #[arg(short = 'p', long = "param", value_parser = parse_param)]
    params: Vec<(String, ParamValue)>,

    /// Image path, or a full URL for web proxy sources
    path: String,
}

fn parse_param(raw: &str) -> Result<(String, ParamValue), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", raw))?;
    if key.is_empty() {
        return Err(format!("empty parameter name in '{}'", raw));
    }
    Ok((key.to_string(), ParamValue::parse_lossy(value)))
}

fn main() -> anyhow::Result<()> {
    // Initialize logging subsystem
    imgix_resolve::logging::init_subscriber()
        .map_err(|e| anyhow!("Failed to initialize logging subsystem: {}", e))?;

    let args = Args::parse();

    let registry = SourceRegistry::from_file(&args.config).with_context(|| {
        format!("Failed to load settings from {}", args.config.display())
    })?;

    tracing::info!(
        config_file = %args.config.display(),
        sources = ?registry.snapshot().source_names(),
        "Settings loaded successfully"
    );

    let resolver = UrlResolver::new(registry.into());

    let mut request = ResolutionRequest::new(args.path).source(args.source);
    if let Some(alias) = args.alias {
        request = request.alias(alias);
    }
    for (key, value) in args.params {
        request = request.param(key, value);
    }

    let url = resolver.resolve(&request)?;
    println!("{}", url);

    Ok(())
}
