use anyhow::Context;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use clap::{Parser, Subcommand, ValueEnum};
use lumen_anchors::{Anchor, AnchorsConfig, TrustAnchors};
use lumen_block::Block;
use std::{
    fmt::Write as _,
    path::{Path, PathBuf},
};


/// The Lumen block core CLI.
#[derive(Parser, Clone, Debug)]
#[command(version, about)]
pub struct Args {
    /// Specify a path to the `anchors.yml` configuration.
    ///
    /// This specifies the genesis block, the checkpoint block with its total work, and the old
    /// checkpoint hashes.
    ///
    /// If no configuration is specified, defaults to the `AnchorsConfig::default()` implementation.
    #[arg(long, global = true)]
    anchors: Option<PathBuf>,
    /// Disable the tracing subscriber.
    #[arg(long, global = true)]
    disable_tracing: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Clone, Debug)]
enum Command {
    /// Resolve the trust anchors and print them.
    Anchors,
    /// Decode a block and print its fields and hash.
    Decode {
        /// The encoded block.
        block: String,
        /// The text encoding of the block bytes.
        #[arg(long, default_value_t = Encoding::Base64, value_enum)]
        encoding: Encoding,
    },
    /// Print the canonical encoding of an anchor block.
    Export {
        /// The anchor to export.
        #[arg(value_enum)]
        anchor: AnchorKind,
        /// The text encoding of the block bytes.
        #[arg(long, default_value_t = Encoding::Base64, value_enum)]
        encoding: Encoding,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Encoding {
    /// Standard padded base64.
    Base64,
    /// Lowercase hex.
    Hex,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum AnchorKind {
    /// The genesis block.
    Genesis,
    /// The checkpoint block.
    Checkpoint,
}

impl Encoding {
    fn encode(self, bytes: &[u8]) -> String {
        match self {
            Self::Base64 => STANDARD.encode(bytes),
            Self::Hex => hex::encode(bytes),
        }
    }

    fn decode(self, s: &str) -> anyhow::Result<Vec<u8>> {
        let s = s.trim();
        let bytes = match self {
            Self::Base64 => STANDARD.decode(s).context("invalid base64")?,
            Self::Hex => hex::decode(s).context("invalid hex")?,
        };
        Ok(bytes)
    }
}

#[cfg(feature = "tracing")]
fn init_tracing_subscriber() {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(tracing_subscriber::filter::LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .try_init();
}

/// Load the anchors configuration from the yml file at the given path, or produce the default if
/// no path is given.
fn load_anchors_or_default(path: Option<&Path>) -> anyhow::Result<AnchorsConfig> {
    match path {
        None => Ok(AnchorsConfig::default()),
        Some(path) => {
            let anchors_str = std::fs::read_to_string(path)
                .context("failed to read anchors configuration from path")?;
            serde_yaml::from_str(&anchors_str)
                .context("failed to deserialize anchors configuration from YAML string")
        }
    }
}

/// Run the Lumen CLI, printing the command's output to stdout.
pub async fn run(args: Args) -> anyhow::Result<()> {
    // Initialise tracing.
    if !args.disable_tracing {
        #[cfg(feature = "tracing")]
        init_tracing_subscriber()
    }
    let out = output(args).await?;
    print!("{out}");
    Ok(())
}

/// Produce the output of the command described by `args`.
async fn output(args: Args) -> anyhow::Result<String> {
    let config = load_anchors_or_default(args.anchors.as_deref())?;
    let anchors = TrustAnchors::init(config)
        .await
        .context("failed to resolve trust anchors")?;
    #[cfg(feature = "tracing")]
    tracing::debug!("Trust anchors resolved");

    match args.command {
        Command::Anchors => describe_anchors(&anchors),
        Command::Decode { block, encoding } => {
            let bytes = encoding.decode(&block)?;
            let block = Block::from_bytes(&bytes).context("failed to decode block")?;
            describe_block(&block, &anchors).await
        }
        Command::Export { anchor, encoding } => {
            let anchor: &Anchor = match anchor {
                AnchorKind::Genesis => anchors.genesis().anchor(),
                AnchorKind::Checkpoint => anchors.checkpoint().anchor(),
            };
            Ok(format!("{}\n", encoding.encode(anchor.serialize().as_bytes())))
        }
    }
}

fn describe_anchors(anchors: &TrustAnchors) -> anyhow::Result<String> {
    let mut s = String::new();
    let genesis = anchors.genesis();
    writeln!(s, "genesis:")?;
    writeln!(s, "  height: {}", genesis.height())?;
    writeln!(s, "  hash: {}", genesis.hash())?;
    let checkpoint = anchors.checkpoint();
    writeln!(s, "checkpoint:")?;
    writeln!(s, "  height: {}", checkpoint.height())?;
    if let Some(hash) = checkpoint.hash() {
        writeln!(s, "  hash: {hash}")?;
    }
    writeln!(s, "  total_work: {}", checkpoint.total_work())?;
    writeln!(s, "old_checkpoints:")?;
    for hash in anchors.old_checkpoints() {
        writeln!(s, "  - {hash}")?;
    }
    Ok(s)
}

async fn describe_block(block: &Block, anchors: &TrustAnchors) -> anyhow::Result<String> {
    let hash = block.hash().await?;
    let mut s = String::new();
    writeln!(s, "hash: {hash}")?;
    writeln!(s, "trusted: {}", anchors.is_checkpoint(&hash))?;
    writeln!(s, "height: {}", block.height())?;
    writeln!(s, "timestamp: {}", block.timestamp())?;
    writeln!(s, "prev_hash: {}", block.prev_hash())?;
    writeln!(s, "body_hash: {}", block.body_hash())?;
    writeln!(s, "accounts_hash: {}", block.accounts_hash())?;
    writeln!(s, "n_bits: {:#010x}", block.n_bits())?;
    writeln!(s, "difficulty: {}", block.difficulty())?;
    writeln!(s, "nonce: {}", block.nonce())?;
    writeln!(s, "miner_addr: {}", block.miner_addr())?;
    writeln!(s, "transactions: {}", block.transaction_count())?;
    writeln!(s, "size: {}", block.serialized_size())?;
    Ok(s)
}
