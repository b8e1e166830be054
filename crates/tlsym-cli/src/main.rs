//! tlsym: symmetric cipher command-line tool
//!
//! Commands:
//!   info <algorithm>   - key/IV/block/tag shape and backend support
//!   encrypt            - encrypt a file or stdin, print a JSON envelope
//!   decrypt            - decrypt raw ciphertext or a JSON envelope
//!   config show        - display the effective configuration

mod engine;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

use engine::{decode_b64, random_iv, CipherHandle, Envelope};
use tlsym_core::{Algorithm, TlsymConfig};
use tlsym_crypto::backend;

// ── CLI structure ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "tlsym",
    version,
    about = "Symmetric encryption with AES, ChaCha20-Poly1305 and 3DES",
    long_about = "tlsym: encrypt and decrypt with a chosen algorithm; keys, IVs, AAD and tags \
                  travel as base64"
)]
struct Cli {
    /// Path to tlsym.toml configuration file
    #[arg(long, short = 'c', env = "TLSYM_CONFIG", default_value = "tlsym.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error); overrides [log] level
    #[arg(long, env = "TLSYM_LOG")]
    log: Option<String>,

    /// Log format; overrides [log] format
    #[arg(long, env = "TLSYM_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Debug, ValueEnum, PartialEq)]
enum LogFormat {
    Json,
    Text,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the parameter shape of an algorithm
    Info {
        /// Canonical algorithm name, e.g. aes-256-gcm
        algorithm: Algorithm,
    },

    /// Encrypt a file (or stdin)
    ///
    /// Prints a JSON envelope with the base64 IV, tag and ciphertext. With
    /// --output the raw ciphertext goes to that file and the envelope omits it;
    /// decrypt such a pair with `--envelope --ciphertext <file>`.
    Encrypt(EncryptArgs),

    /// Decrypt raw ciphertext (or a JSON envelope with --envelope)
    Decrypt(DecryptArgs),

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Args, Debug)]
struct KeyArgs {
    /// Algorithm (default: [cipher] algorithm from the config file)
    #[arg(long, short = 'a')]
    algorithm: Option<Algorithm>,

    /// Key, base64
    #[arg(long, short = 'k', env = "TLSYM_KEY", hide_env_values = true)]
    key: String,

    /// Associated data, base64 (AEAD algorithms only)
    #[arg(long)]
    aad: Option<String>,

    /// Input file (default: stdin)
    #[arg(long, short = 'i')]
    input: Option<PathBuf>,

    /// Output file
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct EncryptArgs {
    #[command(flatten)]
    common: KeyArgs,

    /// IV / nonce, base64 (default: random). Never reuse one under the same key.
    #[arg(long)]
    iv: Option<String>,
}

#[derive(Args, Debug)]
struct DecryptArgs {
    #[command(flatten)]
    common: KeyArgs,

    /// IV / nonce, base64 (required unless --envelope)
    #[arg(long, required_unless_present = "envelope")]
    iv: Option<String>,

    /// Authentication tag, base64 (AEAD algorithms)
    #[arg(long)]
    tag: Option<String>,

    /// Read the input as a JSON envelope produced by `tlsym encrypt`
    #[arg(long, conflicts_with_all = ["iv", "tag"])]
    envelope: bool,

    /// Ciphertext file for an envelope written with `encrypt --output`
    #[arg(long, requires = "envelope")]
    ciphertext: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the active configuration (merged defaults + config file)
    Show,
}

// ── Entry point ────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_found = cli.config.exists();
    let config = if config_found {
        TlsymConfig::load(&cli.config)
            .with_context(|| format!("loading config {}", cli.config.display()))?
    } else {
        TlsymConfig::default()
    };

    let level = cli.log.clone().unwrap_or_else(|| config.log.level.clone());
    let format = match cli.log_format.clone() {
        Some(format) => format,
        None => LogFormat::from_str(&config.log.format, true)
            .map_err(|e| anyhow::anyhow!("config [log] format: {e}"))?,
    };
    init_logging(&level, &format);

    if !config_found {
        warn!(
            "config file not found: {}  (using defaults)",
            cli.config.display()
        );
    }
    debug!(
        version = env!("CARGO_PKG_VERSION"),
        config = %cli.config.display(),
        "tlsym starting"
    );

    match cli.command {
        Commands::Info { algorithm } => cmd_info(algorithm),
        Commands::Encrypt(args) => cmd_encrypt(&config, &args),
        Commands::Decrypt(args) => cmd_decrypt(&config, &args),
        Commands::Config {
            action: ConfigAction::Show,
        } => cmd_config_show(&config, &cli.config),
    }
}

fn init_logging(level: &str, format: &LogFormat) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // logs go to stderr so stdout stays clean for envelopes and plaintext
    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}

// ── Commands ───────────────────────────────────────────────────────────────────

fn cmd_info(algorithm: Algorithm) -> Result<()> {
    println!("algorithm:  {algorithm}");
    println!("key:        {} bytes", algorithm.key_len());
    println!("iv:         {} bytes", algorithm.iv_len());
    println!("block:      {} bytes", algorithm.block_size());
    match algorithm.tag_len() {
        Some(n) => println!("aead:       yes ({n}-byte tag)"),
        None => println!("aead:       no"),
    }
    println!(
        "supported:  {}",
        if backend::supports(algorithm) { "yes" } else { "no" }
    );
    Ok(())
}

fn cmd_encrypt(config: &TlsymConfig, args: &EncryptArgs) -> Result<()> {
    let common = &args.common;
    let algorithm = common.algorithm.unwrap_or(config.cipher.algorithm);
    let handle = CipherHandle::for_algorithm(algorithm)?;
    let key = decode_key(&common.key)?;
    let iv = match &args.iv {
        Some(iv) => decode_b64("--iv", iv)?,
        None => random_iv(algorithm.iv_len()),
    };
    let aad = common.aad.as_deref().map(|a| decode_b64("--aad", a)).transpose()?;
    let plaintext = Zeroizing::new(read_input(common.input.as_deref())?);

    let enc = handle.encrypt(&plaintext, &key, &iv, aad.as_deref())?;
    info!(%algorithm, bytes = plaintext.len(), "encrypted");

    if let Some(path) = &common.output {
        std::fs::write(path, &enc.ciphertext)
            .with_context(|| format!("writing {}", path.display()))?;
    }
    let envelope = Envelope::new(handle.algorithm(), &iv, &enc, common.output.is_none());
    println!("{}", serde_json::to_string_pretty(&envelope)?);
    Ok(())
}

fn cmd_decrypt(config: &TlsymConfig, args: &DecryptArgs) -> Result<()> {
    let common = &args.common;
    let input = read_input(common.input.as_deref())?;

    let (algorithm, iv, tag, ciphertext) = if args.envelope {
        let envelope: Envelope =
            serde_json::from_slice(&input).context("parsing JSON envelope")?;
        if let Some(alg) = common.algorithm {
            anyhow::ensure!(
                alg == envelope.algorithm,
                "--algorithm {alg} does not match envelope algorithm {}",
                envelope.algorithm
            );
        }
        (
            envelope.algorithm,
            envelope.iv()?,
            envelope.tag()?,
            envelope.ciphertext(args.ciphertext.as_deref())?,
        )
    } else {
        let iv = args.iv.as_deref().context("--iv is required")?;
        (
            common.algorithm.unwrap_or(config.cipher.algorithm),
            decode_b64("--iv", iv)?,
            args.tag.as_deref().map(|t| decode_b64("--tag", t)).transpose()?,
            input,
        )
    };

    let handle = CipherHandle::for_algorithm(algorithm)?;
    let key = decode_key(&common.key)?;
    let aad = common.aad.as_deref().map(|a| decode_b64("--aad", a)).transpose()?;

    let plaintext = Zeroizing::new(handle.decrypt(
        &ciphertext,
        &key,
        &iv,
        aad.as_deref(),
        tag.as_deref(),
    )?);
    info!(%algorithm, bytes = plaintext.len(), "decrypted");

    match &common.output {
        Some(path) => std::fs::write(path, plaintext.as_slice())
            .with_context(|| format!("writing {}", path.display()))?,
        None => std::io::stdout()
            .write_all(&plaintext)
            .context("writing plaintext to stdout")?,
    }
    Ok(())
}

fn cmd_config_show(config: &TlsymConfig, path: &Path) -> Result<()> {
    println!("# config: {}", path.display());
    print!("{}", config.to_toml_string()?);
    Ok(())
}

// ── Helpers ────────────────────────────────────────────────────────────────────

fn decode_key(key: &str) -> Result<Zeroizing<Vec<u8>>> {
    decode_b64("--key", key).map(Zeroizing::new)
}

fn read_input(path: Option<&Path>) -> Result<Vec<u8>> {
    match path {
        Some(path) => std::fs::read(path).with_context(|| format!("reading {}", path.display())),
        None => {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .context("reading stdin")?;
            Ok(buf)
        }
    }
}
