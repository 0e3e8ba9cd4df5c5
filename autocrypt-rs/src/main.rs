//! autocrypt-rs: inspect and produce Autocrypt headers
//!
//! # Usage
//!
//! ```bash
//! # Decode the Autocrypt header of a message
//! autocrypt-rs decode message.eml
//! cat message.eml | autocrypt-rs decode --json
//!
//! # Build a header from a binary public key (gpg --export alice@example.org)
//! autocrypt-rs encode --to alice@example.org --key alice.pgp --prefer-encrypted
//! ```

use anyhow::{anyhow, Context};
use autocrypt_rs::config::{Config, OutputFormat};
use autocrypt_rs::message::extract_address;
use autocrypt_rs::{AutocryptHeader, HeaderMap, KeyCodec, OpenPgpKey};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "autocrypt-rs")]
#[command(about = "Decode and encode Autocrypt email headers", long_about = None)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode the Autocrypt header of a message
    Decode {
        /// Message file, or "-" for stdin
        #[arg(default_value = "-")]
        path: String,
        /// Print JSON regardless of the configured output format
        #[arg(long)]
        json: bool,
    },
    /// Build an Autocrypt header
    Encode {
        /// Recipient address the header applies to
        #[arg(long)]
        to: String,
        /// Binary OpenPGP public key file
        #[arg(long)]
        key: PathBuf,
        /// Advertise a preference for encrypted mail
        #[arg(long)]
        prefer_encrypted: bool,
        /// Extra non-critical attribute as _name=value (repeatable)
        #[arg(long = "attr")]
        attrs: Vec<String>,
    },
}

fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match config.logging.format.as_str() {
        "json" => builder.json().init(),
        "compact" => builder.compact().init(),
        _ => builder.pretty().init(),
    }
}

fn read_input(path: &str) -> anyhow::Result<Vec<u8>> {
    let mut buf = Vec::new();
    if path == "-" {
        std::io::stdin()
            .read_to_end(&mut buf)
            .context("Failed to read message from stdin")?;
    } else {
        buf = std::fs::read(path).with_context(|| format!("Failed to read {}", path))?;
    }
    Ok(buf)
}

fn decode(path: &str, format: OutputFormat) -> anyhow::Result<()> {
    let message = read_input(path)?;
    let headers = HeaderMap::parse(&message);
    debug!("Read {} header field(s) from {}", headers.len(), path);

    let header: AutocryptHeader<OpenPgpKey> = AutocryptHeader::from_headers(&headers)?;

    if let Some(from) = headers.get("from") {
        let sender = extract_address(from);
        if !header.is_addressed_to(sender) {
            warn!(
                "Autocrypt header is for '{}' but the message is from '{}'",
                header.recipient, sender
            );
        }
    }

    let summary = header.summary();
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Text => print!("{}", summary),
    }

    Ok(())
}

fn encode(to: String, key_path: &Path, prefer_encrypted: bool, attrs: &[String]) -> anyhow::Result<()> {
    let bytes = std::fs::read(key_path)
        .with_context(|| format!("Failed to read key {}", key_path.display()))?;

    if bytes.starts_with(b"-----BEGIN") {
        return Err(anyhow!(
            "{} is ASCII armored; export the key in binary form (gpg --export)",
            key_path.display()
        ));
    }

    let key = OpenPgpKey::decode(&bytes)?;
    info!(
        "Loaded {:?} key with {} user id(s)",
        key.algorithm(),
        key.user_ids().len()
    );

    let mut header = AutocryptHeader::new(to, key).with_prefer_encrypted(prefer_encrypted);
    for attr in attrs {
        let (name, value) = attr
            .split_once('=')
            .ok_or_else(|| anyhow!("Attribute '{}' is not of the form _name=value", attr))?;
        header = header.with_uncritical(name, value)?;
    }

    println!("{}", header.to_header_string()?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match cli.config {
        Some(ref path) => Config::from_file(path)?,
        None => Config::default(),
    };

    init_logging(&config);

    match cli.command {
        Commands::Decode { path, json } => {
            let format = if json {
                OutputFormat::Json
            } else {
                config.output.format
            };
            decode(&path, format)
        }
        Commands::Encode {
            to,
            key,
            prefer_encrypted,
            attrs,
        } => encode(to, &key, prefer_encrypted, &attrs),
    }
}
