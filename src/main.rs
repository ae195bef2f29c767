use anyhow::{bail, Context};
use clap::Parser;
use std::path::PathBuf;

use imgproxy_uri::config::Config;
use imgproxy_uri::directive::{
    map_directive, Area, FocusArea, ProcessingConfiguration, SizeValue, SourceMetadata,
};
use imgproxy_uri::logging::LogFormat;
use imgproxy_uri::uri::ImgProxyUri;

/// Build signed imgproxy URLs from transformation parameters
#[derive(Parser, Debug)]
#[command(name = "imgproxy-uri")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Absolute URL of the source image
    #[arg(short, long)]
    source: Option<String>,

    /// Target width: `300`, `300m` (fit within) or `300c` (cover)
    #[arg(long)]
    width: Option<SizeValue>,

    /// Target height: `200`, `200m` (fit within) or `200c` (cover)
    #[arg(long)]
    height: Option<SizeValue>,

    #[arg(long)]
    min_width: Option<u32>,

    #[arg(long)]
    min_height: Option<u32>,

    #[arg(long)]
    max_width: Option<u32>,

    #[arg(long)]
    max_height: Option<u32>,

    /// Crop rectangle in pixels: `width,height,left,top`
    #[arg(long, value_parser = parse_crop)]
    crop: Option<Area>,

    /// Focus area in relative units: `left,top,width,height`
    #[arg(long, value_parser = parse_focus)]
    focus: Option<Area>,

    /// Device pixel ratio
    #[arg(long)]
    dpr: Option<f64>,

    /// Override the configured log format
    #[arg(long, value_enum)]
    log_format: Option<LogFormat>,

    /// Print the URL and directive as JSON
    #[arg(long)]
    json: bool,

    /// Test configuration and exit
    #[arg(long)]
    test: bool,
}

fn parse_numbers(value: &str) -> Result<[f64; 4], String> {
    let parts = value
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid number in '{}': {}", value, e))?;

    <[f64; 4]>::try_from(parts).map_err(|_| format!("expected 4 comma-separated numbers, got '{}'", value))
}

fn parse_crop(value: &str) -> Result<Area, String> {
    let [width, height, left, top] = parse_numbers(value)?;
    Ok(Area::new(left, top, width, height))
}

fn parse_focus(value: &str) -> Result<Area, String> {
    let [left, top, width, height] = parse_numbers(value)?;
    Ok(Area::new(left, top, width, height))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = Config::from_file(&args.config).with_context(|| {
        format!(
            "Failed to load configuration from {}",
            args.config.display()
        )
    })?;

    if let Some(format) = args.log_format {
        config.logging.format = format;
    }

    imgproxy_uri::logging::init_subscriber(&config.logging)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging subsystem: {}", e))?;

    config.validate().context("Invalid configuration")?;
    let endpoint = config.imgproxy.endpoint_config()?;

    tracing::info!(
        config_file = %args.config.display(),
        endpoint = %endpoint.endpoint(),
        signed = endpoint.is_signing_enabled(),
        encrypted = endpoint.is_encryption_enabled(),
        "Configuration loaded successfully"
    );

    if args.test {
        println!("configuration {} is valid", args.config.display());
        return Ok(());
    }

    let Some(source) = args.source else {
        bail!("--source is required");
    };

    let request = ProcessingConfiguration {
        width: args.width,
        height: args.height,
        min_width: args.min_width,
        min_height: args.min_height,
        max_width: args.max_width,
        max_height: args.max_height,
        crop: args.crop,
        focus_area: args.focus.map(FocusArea::relative),
        dpr: args.dpr,
    };

    let directive = map_directive(&request, &SourceMetadata::default());

    let mut uri = ImgProxyUri::new(&endpoint);
    uri.set_source(source).apply(&directive);
    let url = uri.build()?;

    if args.json {
        let output = serde_json::json!({
            "url": url,
            "directive": directive,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", url);
    }

    Ok(())
}
