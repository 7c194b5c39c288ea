// ABOUTME: Main entry point for the deck-blocks program.
// ABOUTME: Provides CLI interface and executes commands from the library.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use deck_blocks::{Config, IconCatalog, ThemeName, WatchConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a PPTX file from a deck description
    Build(BuildArgs),

    /// Print one icon as an SVG data URI, or list a family's icons
    Icon(IconArgs),

    /// List the built-in themes and their colors
    Themes,

    /// Rebuild a deck whenever its description or icons change
    Watch(WatchArgs),
}

#[derive(Args)]
struct DeckOptions {
    /// Theme to use instead of the deck's own (dark, light, corporate, minimal)
    #[arg(long)]
    theme: Option<ThemeName>,

    /// Footer brand for slides that do not set one
    #[arg(long)]
    brand: Option<String>,

    /// Presentation title stored in the document properties
    #[arg(long)]
    title: Option<String>,

    /// Directory of <family>.json icon files layered over the bundled ones
    #[arg(long)]
    icons: Option<PathBuf>,
}

impl DeckOptions {
    /// Flags win over the environment.
    fn apply(&self, config: &mut Config) {
        if self.theme.is_some() {
            config.theme = self.theme;
        }
        if let Some(brand) = &self.brand {
            config.brand = Some(brand.clone());
        }
        if let Some(title) = &self.title {
            config.title = Some(title.clone());
        }
        if let Some(icons) = &self.icons {
            config.icon_dir = Some(icons.clone());
        }
    }
}

#[derive(Args)]
struct BuildArgs {
    /// Path to the deck description (JSON)
    #[arg(short, long)]
    input: PathBuf,

    /// Path to output PPTX file
    #[arg(short, long)]
    output: PathBuf,

    #[command(flatten)]
    options: DeckOptions,
}

#[derive(Args)]
struct IconArgs {
    /// Icon family key
    #[arg(short, long, default_value = "hi")]
    family: String,

    /// Icon name; lists the family when omitted
    #[arg(short, long)]
    name: Option<String>,

    /// Fill and stroke color
    #[arg(short, long, default_value = "#000000")]
    color: String,

    /// Print the raw SVG markup instead of a data URI
    #[arg(long)]
    svg: bool,

    /// Directory of <family>.json icon files layered over the bundled ones
    #[arg(long)]
    icons: Option<PathBuf>,
}

#[derive(Args)]
struct WatchArgs {
    /// Path to the deck description (JSON)
    #[arg(short, long)]
    input: PathBuf,

    /// Path to output PPTX file
    #[arg(short, long)]
    output: PathBuf,

    /// Debounce time in milliseconds
    #[arg(long)]
    debounce: Option<u64>,

    #[command(flatten)]
    options: DeckOptions,
}

fn run_build(args: &BuildArgs, mut config: Config) -> anyhow::Result<()> {
    args.options.apply(&mut config);
    let count = deck_blocks::generate_deck(&args.input, &args.output, &config)?;
    println!("PPTX generated successfully: {:?} ({} slides)", args.output, count);
    Ok(())
}

fn run_icon(args: &IconArgs, config: Config) -> anyhow::Result<()> {
    let icon_dir = args.icons.clone().or(config.icon_dir);
    let catalog = IconCatalog::with_overrides(icon_dir.as_deref())?;

    let Some(name) = &args.name else {
        let names = catalog
            .icon_names(&args.family)
            .with_context(|| format!("Icon family '{}' is not available", args.family))?;
        for name in names {
            println!("{}", name);
        }
        return Ok(());
    };

    let doc = catalog.extract(&args.family, name)?;
    let markup = deck_blocks::serialize(&doc, &args.color);
    if args.svg {
        println!("{}", markup);
    } else {
        println!("{}", deck_blocks::to_data_uri(&markup));
    }
    Ok(())
}

fn run_themes() -> anyhow::Result<()> {
    for name in ThemeName::ALL {
        let colors = serde_json::to_string(&name.theme().flat())?;
        println!("{}\t{}", name, colors);
    }
    Ok(())
}

fn run_watch(args: &WatchArgs, mut config: Config) -> anyhow::Result<()> {
    args.options.apply(&mut config);
    if let Some(ms) = args.debounce {
        config.debounce_ms = ms;
    }
    let watch_config = WatchConfig::new(args.input.clone(), args.output.clone(), &config);
    deck_blocks::watch_deck(watch_config, &config)?;
    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = Config::from_env()
        .map_err(anyhow::Error::from)
        .and_then(|config| match &cli.command {
            Some(Commands::Build(args)) => run_build(args, config),
            Some(Commands::Icon(args)) => run_icon(args, config),
            Some(Commands::Themes) => run_themes(),
            Some(Commands::Watch(args)) => run_watch(args, config),
            None => {
                println!("No command specified. Use --help for usage information.");
                Ok(())
            }
        });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
