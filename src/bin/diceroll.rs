use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "diceroll", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Roll dice and write the result as an image.
    Roll(RollArgs),
    /// List die-face files missing from an asset directory.
    Audit(AuditArgs),
}

#[derive(Parser, Debug)]
struct RollArgs {
    /// Dice in `XdY` notation, e.g. `3d6` or `d20`.
    notation: String,

    /// JSON render config.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding `D{sides}_{face}.png` files.
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Font file for the header and total.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Output format: png, bmp or tiff.
    #[arg(long)]
    format: Option<String>,

    /// Seed for reproducible rolls.
    #[arg(long)]
    seed: Option<u64>,

    /// Output image path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct AuditArgs {
    /// JSON render config.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory to check.
    #[arg(long)]
    assets: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Roll(args) => cmd_roll(args),
        Command::Audit(args) => cmd_audit(args),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<diceroll::RenderConfig> {
    let mut cfg = match path {
        Some(p) => diceroll::RenderConfig::from_path(p)?,
        None => diceroll::RenderConfig::default(),
    };
    cfg.apply_env_overrides()?;
    Ok(cfg)
}

fn cmd_roll(args: RollArgs) -> anyhow::Result<()> {
    let (sides, count) = diceroll::parse_notation(&args.notation)
        .with_context(|| format!("'{}' is not dice notation like 3d6", args.notation))?;

    let mut cfg = load_config(args.config.as_deref())?;
    if let Some(assets) = args.assets {
        cfg.asset_root = assets;
    }
    if let Some(font) = args.font {
        cfg.font_path = font;
    }
    if let Some(format) = args.format.as_deref() {
        cfg.format = diceroll::OutputFormat::parse(format)?;
    }

    let renderer = diceroll::DiceRenderer::from_config(cfg)?;
    let rendered = match args.seed {
        Some(seed) => renderer.roll_and_render_with(
            sides,
            count,
            &mut diceroll::RngRollSource::seeded(seed),
        )?,
        None => renderer.roll_and_render(sides, count)?,
    };

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, &rendered.bytes)
        .with_context(|| format!("write {} '{}'", rendered.format, args.out.display()))?;

    println!(
        "{}: {:?} {}",
        rendered.header, rendered.rolls, rendered.footer
    );
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_audit(args: AuditArgs) -> anyhow::Result<()> {
    let mut cfg = load_config(args.config.as_deref())?;
    if let Some(assets) = args.assets {
        cfg.asset_root = assets;
    }

    let audit = diceroll::audit_asset_root(&cfg.asset_root);
    for key in &audit.missing {
        println!("{}", cfg.asset_root.join(key.file_name()).display());
    }
    if !audit.is_complete() {
        anyhow::bail!(
            "{} of {} die-face files missing under '{}'",
            audit.missing.len(),
            audit.checked,
            cfg.asset_root.display()
        );
    }
    eprintln!(
        "all {} die-face files present under '{}'",
        audit.checked,
        cfg.asset_root.display()
    );
    Ok(())
}
