use std::{
    fs::File,
    io::{BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{ArgAction, Parser, Subcommand};
use nftforge::{
    AssetRegistry, AssetUploads, GenerationConfig, MAX_ITEM_COUNT, Probability, RegistryBuild,
    TraitCategory, ZipSink,
};

#[derive(Parser, Debug)]
#[command(name = "nftforge", version)]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a batch and pack it into a zip archive.
    Generate(GenerateArgs),
    /// Load an asset directory and report what the registry sees.
    Inspect(InspectArgs),
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Asset directory: background.png, body.png and one subdirectory per trait.
    #[arg(long)]
    assets: PathBuf,

    /// Output zip path.
    #[arg(long)]
    out: PathBuf,

    /// JSON generation config. Flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of items to generate.
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=i64::from(MAX_ITEM_COUNT)))]
    count: Option<u32>,

    /// Probability that an item attempts a full matching set.
    #[arg(long, value_parser = parse_probability)]
    full_set_prob: Option<Probability>,

    /// Probability that an item's weapon is shiny (when a variant exists).
    #[arg(long, value_parser = parse_probability)]
    shiny_prob: Option<Probability>,

    /// Random seed for a reproducible batch.
    #[arg(long)]
    seed: Option<u64>,

    /// Directory receiving preview PNGs of the first items.
    #[arg(long)]
    preview_dir: Option<PathBuf>,

    /// Number of preview images.
    #[arg(long)]
    preview_count: Option<usize>,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Asset directory to load.
    #[arg(long)]
    assets: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Generate(args) => cmd_generate(args),
        Command::Inspect(args) => cmd_inspect(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn parse_probability(s: &str) -> Result<Probability, String> {
    let p: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a number"))?;
    Probability::new(p).map_err(|err| err.to_string())
}

fn load_registry(assets: &Path) -> anyhow::Result<RegistryBuild> {
    let uploads = AssetUploads::from_dir(assets)
        .with_context(|| format!("collect assets from '{}'", assets.display()))?;
    let built = AssetRegistry::build(&uploads).context("load asset registry")?;
    for rejected in &built.rejected {
        eprintln!(
            "skipped {}/{}: {}",
            rejected.slot, rejected.file, rejected.reason
        );
    }
    Ok(built)
}

fn resolve_config(args: &GenerateArgs) -> anyhow::Result<GenerationConfig> {
    let mut cfg = match &args.config {
        Some(path) => GenerationConfig::from_json_file(path)?,
        None => GenerationConfig::default(),
    };
    if let Some(count) = args.count {
        cfg.count = count;
    }
    if let Some(p) = args.full_set_prob {
        cfg.full_set_probability = p;
    }
    if let Some(p) = args.shiny_prob {
        cfg.shiny_probability = p;
    }
    if let Some(seed) = args.seed {
        cfg.seed = Some(seed);
    }
    if let Some(n) = args.preview_count {
        cfg.preview_count = n;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let cfg = resolve_config(&args)?;
    let built = load_registry(&args.assets)?;
    let batch = nftforge::generate_batch(&built.registry, &cfg)?;

    nftforge::ensure_parent_dir(&args.out)?;
    let file = File::create(&args.out)
        .with_context(|| format!("create archive '{}'", args.out.display()))?;
    let mut sink = ZipSink::new(BufWriter::new(file));
    let written = nftforge::write_batch(&batch, &cfg.collection, &mut sink)
        .map_err(anyhow::Error::from)
        .and_then(|()| {
            let mut w = sink.into_inner()?;
            w.flush().context("flush archive")?;
            Ok(())
        });
    if let Err(err) = written {
        let _ = std::fs::remove_file(&args.out);
        return Err(err.context(format!("write archive '{}'", args.out.display())));
    }

    if let Some(dir) = &args.preview_dir {
        let previews = nftforge::write_previews(&batch, &cfg.collection, dir, cfg.preview_count)?;
        for path in previews {
            eprintln!("preview {}", path.display());
        }
    }

    eprintln!(
        "wrote {} ({} items, {} rare, {} shiny, seed {})",
        args.out.display(),
        batch.len(),
        batch.rare_count(),
        batch.shiny_count(),
        batch
            .seed()
            .map_or_else(|| "external".to_string(), |s| s.to_string())
    );
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let built = load_registry(&args.assets)?;
    let registry = &built.registry;

    let (w, h) = registry.canvas_size();
    println!("canvas: {w}x{h}");
    for category in TraitCategory::ALL {
        let layers = registry.layers(category);
        println!("{category}: {} layer(s)", layers.len());
        for key in layers.keys() {
            println!("  {key}");
        }
    }
    println!("shiny_weapon: {} variant(s)", registry.shiny_weapons().len());

    let sets: Vec<&str> = registry.available_sets().iter().map(String::as_str).collect();
    if sets.is_empty() {
        println!("available sets: (none)");
    } else {
        println!("available sets: {}", sets.join(", "));
    }
    println!("rejected: {}", built.rejected.len());
    Ok(())
}
