//! Paires Minimales - minimal-pair listening practice
//!
//! Terminal front-end for the round controller.

use anyhow::{Context, Result};
use clap::Parser;
use paires::assets::{default_assets_dir, AssetResolver};
use paires::audio::SoundEngine;
use paires::commands::{self, Command};
use paires::journal::{journal_path, Journal};
use paires::settings::settings_path;
use paires::terminal::TerminalSink;
use paires::{Catalog, Outcome, PairsError, RoundController, Setting, SettingsStore, SkipReason};
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

type Controller = RoundController<TerminalSink>;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Directory holding images/ and sounds/
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Settings file (defaults to the per-user config directory)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Category to start with, e.g. p_b
    #[arg(short, long)]
    category: Option<String>,

    /// List categories and exit
    #[arg(long)]
    list: bool,

    /// Report missing pictures and sounds and exit
    #[arg(long)]
    check_assets: bool,

    /// Append finished rounds to the journal
    #[arg(long)]
    journal: bool,

    /// Seed for reproducible sessions
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Setup logging; stdout belongs to the session
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let catalog = Catalog::builtin();

    if args.list {
        print_categories(&catalog);
        return Ok(());
    }

    let assets = AssetResolver::new(args.assets.clone().unwrap_or_else(default_assets_dir));

    if args.check_assets {
        let missing = assets.missing_assets(&catalog);
        for path in &missing {
            println!("missing: {}", path.display());
        }
        println!(
            "{} missing file(s) under {}",
            missing.len(),
            assets.root().display()
        );
        return Ok(());
    }

    info!("👂 Paires Minimales v{} starting...", env!("CARGO_PKG_VERSION"));

    let store = SettingsStore::load(args.settings.clone().unwrap_or_else(settings_path));

    let (tx, mut completions) = mpsc::unbounded_channel();
    let engine = match SoundEngine::new(tx.clone()) {
        Ok(engine) => Some(engine),
        Err(e) => {
            warn!("🔇 Sound disabled: {}", e);
            None
        }
    };

    let mut sink = TerminalSink::new(assets.clone(), engine, tx);
    if args.journal {
        sink = sink.with_journal(Journal::new(journal_path()));
    }

    let mut controller = RoundController::new(store, sink).with_success_pool(assets.success_pool());
    if let Some(seed) = args.seed {
        controller = controller.with_seed(seed);
    }

    let first = catalog
        .categories()
        .first()
        .map(|c| c.label.clone())
        .context("Catalog is empty")?;
    let label = args.category.clone().unwrap_or_else(|| first.clone());
    if let Err(e) = controller.select_category(&catalog, &label) {
        println!("{}", e);
        controller.select_category(&catalog, &first)?;
    }

    println!("{}", commands::HELP);
    prompt(&controller);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let Some(cmd) = commands::parse(&line) else {
                    prompt(&controller);
                    continue;
                };
                if cmd == Command::Quit {
                    break;
                }
                handle(&mut controller, &catalog, cmd);
                prompt(&controller);
            }
            Some(ticket) = completions.recv() => {
                if controller.feedback_finished(ticket) {
                    prompt(&controller);
                }
            }
        }
    }

    controller.end_session();
    if let Some(engine) = controller.sink().engine() {
        let _ = engine.stop();
    }
    info!("👋 Bye");
    Ok(())
}

fn handle(controller: &mut Controller, catalog: &Catalog, cmd: Command) {
    let result = match cmd {
        Command::Choose(side) => {
            let word = controller.round().map(|r| {
                if side == 1 {
                    r.word_a().to_string()
                } else {
                    r.word_b().to_string()
                }
            });
            match word {
                Some(word) => answer(controller, &word),
                None => Err(PairsError::NoActiveRound),
            }
        }
        Command::Answer(word) => answer(controller, &word),
        Command::Listen => controller.listen().map(|_| ()),
        Command::Next => {
            if controller.settings().hide_next_button {
                println!("The next control is hidden (s hide_next_button to show it).");
                Ok(())
            } else {
                controller.advance().map(|_| ())
            }
        }
        Command::Restart => controller.restart().map(|_| ()),
        Command::Category(label) => controller.select_category(catalog, &label).map(|_| ()),
        Command::Pair(n) => controller.select_pair(n - 1).map(|_| ()),
        Command::Toggle(setting) => {
            let value = !controller.settings().get(setting);
            controller.update_setting(setting, value).map(|_| {
                println!("{} = {}", setting.key(), value);
            })
        }
        Command::Categories => {
            print_categories(catalog);
            Ok(())
        }
        Command::Pairs => {
            let current = controller.current_index();
            for (i, pair) in controller.pairs().iter().enumerate() {
                let marker = if current == Some(i) { "*" } else { " " };
                println!(" {} {:>2}. {}", marker, i + 1, pair);
            }
            Ok(())
        }
        Command::Settings => {
            for setting in Setting::ALL {
                println!("  {:<18} {}", setting.key(), controller.settings().get(setting));
            }
            Ok(())
        }
        Command::Help => {
            println!("{}", commands::HELP);
            Ok(())
        }
        Command::Unknown(text) => {
            println!("Unknown command: {}", text);
            Ok(())
        }
        Command::Quit => Ok(()),
    };

    match result {
        Err(e) if e.is_silent() => debug!("Ignored: {}", e),
        Err(e) => println!("{}", e),
        Ok(()) => {}
    }
}

fn answer(controller: &mut Controller, word: &str) -> paires::PairsResult<()> {
    let report = controller.submit_answer(word);
    match report.outcome {
        Outcome::Correct => println!("Bravo !"),
        Outcome::Incorrect => println!("Non, écoute bien..."),
        Outcome::Skipped(SkipReason::NotInRound) => {
            println!("'{}' is not one of the two pictures.", word)
        }
        Outcome::Skipped(SkipReason::FeedbackInProgress) => return Err(PairsError::FeedbackInProgress),
        Outcome::Skipped(SkipReason::NoActiveRound) => return Err(PairsError::NoActiveRound),
    }
    Ok(())
}

fn print_categories(catalog: &Catalog) {
    for category in catalog.categories() {
        println!(
            "  {:<6} {:<10} {} pairs",
            category.label,
            category.display_name(),
            category.pairs.len()
        );
    }
}

fn prompt(controller: &Controller) {
    if matches!(controller.phase(), paires::Phase::PlayingFeedback { .. }) {
        return;
    }
    let next = if controller.settings().hide_next_button {
        ""
    } else {
        ", n"
    };
    print!("[{}] 1, 2, l{}, h > ", controller.category().unwrap_or("-"), next);
    let _ = std::io::stdout().flush();
}
