use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use card_sorter::cards::Catalog;
use card_sorter::core::{Basket, SorterConfig};
use card_sorter::logging::init_logging;
use card_sorter::matching::NameMatcher;
use card_sorter::ocr::{normalize, DirectoryTextSource};
use card_sorter::routing::{
    eject_into, DryRunActuator, RoutingCoordinator, SortOutcome, SortSession,
};
use card_sorter::rules::BasketRules;
use card_sorter::simulate::{evaluate_accuracy, OcrNoise};

#[derive(Parser)]
#[command(name = "card-sorter")]
#[command(about = "Identify cards from OCR text and route them to baskets")]
#[command(version)]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Catalog file (native JSON, legacy properties JSON, or .bin snapshot)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Legacy names file; selects the two-file catalog format
    #[arg(long, global = true)]
    names: Option<PathBuf>,

    /// Basket 0 rule
    #[arg(long, global = true)]
    b0c: Option<String>,

    /// Basket 1 rule
    #[arg(long, global = true)]
    b1c: Option<String>,

    /// Basket 2 rule
    #[arg(long, global = true)]
    b2c: Option<String>,

    /// Fold look-alike glyphs before matching
    #[arg(long, global = true)]
    fold_glyphs: bool,

    /// Append-only log file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Route one OCR text file and print the decision
    Route {
        /// File holding the raw OCR output
        #[arg(long)]
        text: PathBuf,
    },
    /// Print the closest catalog name for a text
    Match {
        /// OCR text or card name
        text: String,
    },
    /// Compile the basket rules and evaluate them for one card
    CheckRules {
        /// Card to test against (default: first catalog entry)
        #[arg(long)]
        card: Option<String>,
    },
    /// Sort one card per OCR text file with a dry-run actuator
    Sort {
        /// Directory of .txt OCR outputs, read in file name order
        #[arg(long)]
        ocr_dir: PathBuf,
        /// Stop after this many cards
        #[arg(long)]
        repeat: Option<usize>,
    },
    /// Eject cards straight into one basket with a dry-run actuator
    Eject {
        /// Target basket (0-3)
        #[arg(long, default_value_t = 3)]
        basket: u8,
        /// Number of cards
        #[arg(long, default_value_t = 1)]
        repeat: usize,
    },
    /// Estimate matcher accuracy on synthetic OCR noise
    Simulate {
        #[arg(long, default_value_t = 1000)]
        samples: usize,
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Multiply the default noise rates
        #[arg(long, default_value_t = 1.0)]
        noise_scale: f64,
    },
    /// Write a binary snapshot of the catalog
    Snapshot {
        #[arg(long)]
        out: PathBuf,
    },
}

impl Cli {
    /// File configuration with command line overrides applied.
    fn resolve_config(&self) -> Result<SorterConfig> {
        let mut config = match &self.config {
            Some(path) => SorterConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => SorterConfig::default(),
        };

        if let Some(path) = &self.catalog {
            config = config.with_catalog(path.clone());
        }
        if let Some(names) = &self.names {
            config.catalog.names = Some(names.clone());
        }
        if let Some(rule) = &self.b0c {
            config.rules.basket0 = rule.clone();
        }
        if let Some(rule) = &self.b1c {
            config.rules.basket1 = rule.clone();
        }
        if let Some(rule) = &self.b2c {
            config.rules.basket2 = rule.clone();
        }
        if self.fold_glyphs {
            config = config.with_fold_glyphs(true);
        }
        if let Some(file) = &self.log_file {
            config = config.with_log_file(file.clone());
        }
        Ok(config)
    }
}

fn load_catalog(config: &SorterConfig) -> Result<Catalog> {
    Catalog::load(&config.catalog)
        .with_context(|| format!("loading catalog {}", config.catalog.path.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;
    let _guard = init_logging(&config.logging).context("initializing logging")?;

    match &cli.command {
        Commands::Route { text } => {
            let raw = fs::read(text).with_context(|| format!("reading {}", text.display()))?;
            let raw = String::from_utf8_lossy(&raw);

            let coordinator = RoutingCoordinator::from_config(&config, load_catalog(&config)?)?;
            let decision = coordinator.route(&raw)?;

            println!("candidate: {}", decision.candidate.text());
            println!("matched:   {}", decision.matched.matched_name());
            println!("distance:  {}", decision.matched.distance);
            match decision.rule {
                Some(i) => println!("basket:    {} (rule {})", decision.basket.index(), i),
                None => println!("basket:    {} (fallback)", decision.basket.index()),
            }
            println!("file stem: {}", decision.entry().file_stem());
        }

        Commands::Match { text } => {
            let catalog = load_catalog(&config)?;
            let matcher = NameMatcher::from_config(&config.matcher);
            let candidate = normalize(text)?.text();
            let result = matcher.best_match(&candidate, &catalog)?;
            println!("{}\t{}", result.matched_name(), result.distance);
        }

        Commands::CheckRules { card } => {
            let rules = BasketRules::from_config(&config.rules)?;
            let catalog = load_catalog(&config)?;
            let entry = match card {
                Some(name) => catalog
                    .get(name)
                    .with_context(|| format!("card {:?} is not in the catalog", name))?,
                None => catalog.entry_at(0).context("catalog is empty")?,
            };

            println!("card: {}", entry.name);
            for rule in rules.iter() {
                println!("{}: {} -> {}", rule.basket(), rule.source(), rule.matches(&entry.attributes));
            }
            let (basket, _) = rules.classify(&entry.attributes);
            println!("=> {}", basket);
        }

        Commands::Sort { ocr_dir, repeat } => {
            let coordinator = RoutingCoordinator::from_config(&config, load_catalog(&config)?)?;
            let source = DirectoryTextSource::open(ocr_dir)?;
            info!("sorting {} OCR captures from {}", source.remaining(), ocr_dir.display());

            let mut session =
                SortSession::from_config(&coordinator, DryRunActuator::new(), source, &config.session)?
                    .with_max_cards(*repeat);
            let summary = session.run()?;

            for record in &summary.records {
                match &record.outcome {
                    SortOutcome::Routed {
                        matched_name,
                        distance,
                        ..
                    } => println!(
                        "#{} {} ({}) -> {}",
                        record.card,
                        matched_name,
                        distance,
                        record.basket.index()
                    ),
                    SortOutcome::Deferred { reason } => println!(
                        "#{} deferred ({}) -> {}",
                        record.card,
                        reason,
                        record.basket.index()
                    ),
                }
            }
            println!(
                "sorted {} cards, {} deferred, per basket {:?}",
                summary.sorted(),
                summary.deferred(),
                summary.per_basket()
            );
        }

        Commands::Eject { basket, repeat } => {
            let Some(target) = Basket::try_new(*basket) else {
                bail!("--basket must be between 0 and {}", Basket::COUNT - 1);
            };
            let mut actuator = DryRunActuator::new();
            eject_into(&mut actuator, target, *repeat)?;
            println!("ejected {} cards into {}", actuator.ejected(), target);
        }

        Commands::Simulate {
            samples,
            seed,
            noise_scale,
        } => {
            if !noise_scale.is_finite() || *noise_scale < 0.0 {
                bail!("--noise-scale must be a non-negative number");
            }
            let catalog = load_catalog(&config)?;
            let matcher = NameMatcher::from_config(&config.matcher);
            let noise = OcrNoise::default().scaled(*noise_scale);
            let report = evaluate_accuracy(&catalog, &matcher, &noise, *samples, *seed)?;
            println!("{}", report);
        }

        Commands::Snapshot { out } => {
            let catalog = load_catalog(&config)?;
            catalog
                .save_snapshot(out)
                .with_context(|| format!("writing snapshot {}", out.display()))?;
            println!("wrote {} entries to {}", catalog.len(), out.display());
        }
    }

    Ok(())
}
