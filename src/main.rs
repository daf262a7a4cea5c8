#![forbid(unsafe_code)]

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use allowlist_merkle::artifacts::{self, PROOFS_FILE};
use allowlist_merkle::config::Config;
use allowlist_merkle::source::{FileMembers, MemberSource};
use allowlist_merkle::{build_whitelist_with, verify_proof_with, HashAlgorithm, Proof, Root};

#[derive(Parser, Debug)]
#[command(name = "allowlist")]
#[command(about = "Build Merkle allowlists, extract and verify member proofs", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build the tree from a member file and write root.json / proofs.json
    Build(BuildArgs),
    /// Print one member's proof from a proofs.json
    Prove(ProveArgs),
    /// Check a member proof against a root
    Verify(VerifyArgs),
}

#[derive(Args, Debug)]
struct BuildArgs {
    /// Member file, one identity per line (falls back to ALLOWLIST_INPUT)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output directory for artifacts (falls back to ALLOWLIST_OUT_DIR)
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Tree hash: keccak256, sha3-256 or blake3 (falls back to ALLOWLIST_HASH)
    #[arg(long)]
    hash: Option<String>,

    /// Worker threads when built with the `rayon` feature
    #[arg(short = 'j', long)]
    threads: Option<usize>,
}

#[derive(Args, Debug)]
struct ProveArgs {
    /// Path to proofs.json
    #[arg(short, long, default_value = PROOFS_FILE)]
    proofs: PathBuf,

    /// Member identity (any case)
    #[arg(short, long)]
    member: String,
}

#[derive(Args, Debug)]
struct VerifyArgs {
    /// Member identity (any case)
    #[arg(short, long)]
    member: String,

    /// Root hex (with or without 0x)
    #[arg(short, long)]
    root: String,

    /// Comma-separated sibling digests
    #[arg(long, value_delimiter = ',', conflicts_with = "proofs")]
    proof: Vec<String>,

    /// Take the member's proof from a proofs.json instead
    #[arg(long)]
    proofs: Option<PathBuf>,

    /// Tree hash the root was built with
    #[arg(long, default_value = "keccak256")]
    hash: String,
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = Config::from_env().context("Failed to load configuration")?;

    match cli.command {
        Commands::Build(args) => build(args, cfg).map(|()| ExitCode::SUCCESS),
        Commands::Prove(args) => prove(&args).map(|()| ExitCode::SUCCESS),
        Commands::Verify(args) => verify(&args),
    }
}

fn build(args: BuildArgs, mut cfg: Config) -> Result<()> {
    if let Some(name) = &args.hash {
        cfg.hash = name
            .parse::<HashAlgorithm>()
            .with_context(|| format!("Invalid --hash {name}"))?;
    }
    if args.threads.is_some() {
        cfg.pool.num_threads = args.threads;
    }
    let input = match args.input.or(cfg.input.clone()) {
        Some(p) => p,
        None => bail!("No member file given (use --input or set ALLOWLIST_INPUT)"),
    };
    let out_dir = args.out_dir.unwrap_or_else(|| cfg.out_dir.clone());

    let source = FileMembers::new(&input);
    let members = source
        .fetch()
        .with_context(|| format!("Failed to read members from {}", input.display()))?;
    info!(source = source.name(), entries = members.len(), "members loaded");

    let hash = cfg.hash;
    let result = cfg
        .pool
        .install(|| build_whitelist_with(&members, hash))?
        .context("Failed to build allowlist")?;

    let paths = artifacts::write_artifacts(&out_dir, &result).context("Failed to write artifacts")?;

    println!("root: {}", result.root());
    println!("members: {}", result.len());
    println!("wrote {} and {}", paths.root.display(), paths.proofs.display());
    Ok(())
}

fn prove(args: &ProveArgs) -> Result<()> {
    let proofs = artifacts::load_proofs(&args.proofs)
        .with_context(|| format!("Failed to load {}", args.proofs.display()))?;
    let proof = artifacts::find_proof(&proofs, &args.member)
        .with_context(|| format!("{} is not in {}", args.member, args.proofs.display()))?;
    println!("{}", serde_json::to_string_pretty(proof)?);
    Ok(())
}

fn verify(args: &VerifyArgs) -> Result<ExitCode> {
    let hash: HashAlgorithm = args.hash.parse().context("Invalid --hash")?;
    let root: Root = args.root.parse().context("Invalid --root")?;

    let proof = match &args.proofs {
        Some(path) => {
            let proofs = artifacts::load_proofs(path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            match artifacts::find_proof(&proofs, &args.member) {
                Some(p) => p.clone(),
                // Unknown member: verify the empty proof, which fails unless
                // the member is the sole leaf.
                None => Proof::default(),
            }
        }
        None => Proof::from_hex(args.proof.as_slice()).context("Invalid --proof")?,
    };

    let ok = verify_proof_with(hash, &args.member, &proof, &root);
    println!("{ok}");
    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
