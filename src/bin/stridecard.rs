use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use stridecard::{Configuration, RenderPipeline, Sampler};

#[derive(Parser, Debug)]
#[command(name = "stridecard", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a summary card image.
    Render(RenderArgs),
    /// Write a starter config JSON with the reference defaults.
    Init(InitArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Config JSON; omit to render from built-in defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output image path (format follows the extension).
    #[arg(long, default_value = "card.png")]
    out: PathBuf,

    /// Override the template image path.
    #[arg(long)]
    template: Option<PathBuf>,

    /// Override the map image path.
    #[arg(long)]
    map: Option<PathBuf>,

    /// Override the avatar image path.
    #[arg(long)]
    avatar: Option<PathBuf>,

    /// Override the username.
    #[arg(long)]
    username: Option<String>,

    /// Override the date (YYYY/MM/DD, or "today").
    #[arg(long)]
    date: Option<String>,

    /// Override the end time (HH:MM or HH:MM:SS, or "now").
    #[arg(long)]
    end_time: Option<String>,

    /// Seed the sampler for reproducible draws.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Parser, Debug)]
struct InitArgs {
    /// Where to write the config document.
    #[arg(long, default_value = "config.json")]
    out: PathBuf,

    /// Overwrite an existing file.
    #[arg(long)]
    force: bool,
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Init(args) => cmd_init(args),
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let (mut config, assets_root) = match &args.config {
        Some(path) => {
            let config = Configuration::load(path)
                .with_context(|| format!("load config '{}'", path.display()))?;
            let root = path.parent().unwrap_or(Path::new(".")).to_path_buf();
            (config, root)
        }
        None => (Configuration::default(), PathBuf::from(".")),
    };

    if let Some(v) = args.template {
        config.template = v;
    }
    if let Some(v) = args.map {
        config.map = v;
    }
    if let Some(v) = args.avatar {
        config.avatar = v;
    }
    if let Some(v) = args.username {
        config.username = v;
    }
    if let Some(v) = args.date {
        config.date = v;
    }
    if let Some(v) = args.end_time {
        config.end_time = v;
    }

    let mut sampler = match args.seed {
        Some(seed) => Sampler::seeded(seed),
        None => Sampler::new(),
    };

    let pipeline = RenderPipeline::new(config, assets_root);
    pipeline.render_to_path(&mut sampler, &args.out)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_init(args: InitArgs) -> anyhow::Result<()> {
    if args.out.exists() && !args.force {
        anyhow::bail!(
            "'{}' already exists (pass --force to overwrite)",
            args.out.display()
        );
    }
    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create config dir '{}'", parent.display()))?;
    }
    Configuration::default().save(&args.out)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
