use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pixelbin_url::config::{Config, DEFAULT_EXPIRY_SECONDS};
use pixelbin_url::logging::{self, LogFormat};
use pixelbin_url::security::sign_url;
use pixelbin_url::url::{obj_to_url, url_to_obj, UrlDescriptor};

/// Pixelbin URL tool - parse, build and sign Pixelbin CDN URLs
#[derive(Parser, Debug)]
#[command(name = "pixelbin-url")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log filter directive (RUST_LOG takes precedence)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    /// Log output format: text or json
    #[arg(long, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the descriptor of a URL as JSON
    Parse {
        url: String,

        /// Parse with the custom-domain grammar
        #[arg(long)]
        custom_domain: bool,
    },

    /// Build a URL from a JSON descriptor (file path, or stdin when omitted or `-`)
    Build { input: Option<PathBuf> },

    /// Append a time-limited signature to a URL
    Sign {
        url: String,

        /// Lifetime in seconds
        #[arg(long)]
        expiry: Option<i64>,

        #[arg(long)]
        access_key: Option<String>,

        #[arg(long)]
        token: Option<String>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_subscriber(&args.log_level, args.log_format)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    let config = load_config(args.config.as_deref())?;

    match args.command {
        Command::Parse { url, custom_domain } => {
            let mut url_config = config.url.clone();
            url_config.is_custom_domain |= custom_domain;

            let descriptor = url_to_obj(&url, &url_config)?;
            println!("{}", serde_json::to_string_pretty(&descriptor)?);
        }
        Command::Build { input } => {
            let json = read_input(input.as_deref())?;
            let descriptor: UrlDescriptor =
                serde_json::from_str(&json).context("Failed to parse descriptor JSON")?;
            println!("{}", obj_to_url(&descriptor, &config.url)?);
        }
        Command::Sign {
            url,
            expiry,
            access_key,
            token,
        } => {
            let signing = config.signing.as_ref();
            let access_key = access_key
                .or_else(|| signing.map(|s| s.access_key.clone()))
                .context("No access key: pass --access-key or set signing.access_key")?;
            let token = token
                .or_else(|| signing.map(|s| s.token.clone()))
                .context("No token: pass --token or set signing.token")?;
            let expiry = expiry
                .or_else(|| signing.map(|s| s.expiry_seconds))
                .unwrap_or(DEFAULT_EXPIRY_SECONDS);

            println!("{}", sign_url(&url, expiry, &access_key, &token)?);
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };

    let config = Config::from_file(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
    config.validate().context("Invalid configuration")?;

    tracing::debug!(
        config_file = %path.display(),
        custom_domain = config.url.is_custom_domain,
        signing = config.signing.is_some(),
        "Configuration loaded"
    );

    Ok(config)
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read descriptor from stdin")?;
            Ok(buf)
        }
    }
}
