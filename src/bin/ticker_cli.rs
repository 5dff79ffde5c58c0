// src/bin/ticker_cli.rs
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

use ticker_selector::filters::{FormatValidator, Ranker};
use ticker_selector::picker::{KeyOutcome, TickerPicker};
use ticker_selector::render::{Messages, RenderAdapter, SelectionView};
use ticker_selector::selection::NavigationKey;
use ticker_selector::symbols::{CatalogIndex, POPULAR_QUICK_PICKS, PRESETS};
use ticker_selector::{load_catalog, SelectionLimits, SelectorConfig};

#[derive(Parser)]
#[command(name = "ticker-cli")]
#[command(about = "Search the ticker catalog and build a bounded selection", long_about = None)]
struct Cli {
    /// JSON catalog to use instead of the built-in one
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,
    #[arg(long, global = true)]
    min: Option<usize>,
    #[arg(long, global = true)]
    max: Option<usize>,
    /// Message language (en, es)
    #[arg(long, global = true, default_value = "en")]
    lang: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Search {
        query: String,
        #[arg(short, long)]
        limit: Option<usize>,
    },
    Validate {
        symbol: String,
    },
    Select {
        #[arg(short, long)]
        preset: Option<String>,
        symbols: Vec<String>,
    },
    Presets,
    Interactive,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("❌ Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = SelectorConfig::from_env()?;
    if cli.catalog.is_some() {
        config.catalog_path = cli.catalog.clone();
    }
    if cli.min.is_some() || cli.max.is_some() {
        config.limits = SelectionLimits::new(
            cli.min.unwrap_or(config.limits.min_selection()),
            cli.max.unwrap_or(config.limits.max_selection()),
        )?;
    }
    let catalog = load_catalog(&config)?;
    let messages = Messages::for_language(&cli.lang);

    match cli.command {
        Commands::Search { query, limit } => {
            let results = Ranker::search(&query, &catalog, limit.unwrap_or(config.search_limit));
            if results.is_empty() {
                println!("{}", messages.no_results);
            }
            for candidate in results {
                println!(
                    "{:>5}  {:<15} {}",
                    candidate.score, candidate.symbol, candidate.display_name
                );
            }
        }
        Commands::Validate { symbol } => match FormatValidator::validate(&symbol) {
            Ok(normalized) => {
                let known = if catalog.contains(&normalized) { "in catalog" } else { "free text" };
                println!("✅ {} ({})", normalized, known);
            }
            Err(reason) => {
                println!("❌ {}", messages.format_error(&reason));
                std::process::exit(2);
            }
        },
        Commands::Select { preset, symbols } => {
            let mut picker = TickerPicker::new(catalog.clone(), &config);
            let mut adapter = adapter(messages, &config);
            let now = Instant::now();

            if let Some(key) = preset {
                picker.load_preset(&key)?;
            }
            for symbol in symbols {
                if let Err(err) = picker.pick(&symbol) {
                    adapter.flash_add_error(&err, &config.limits, now);
                    println!("⚠️  {}", adapter.messages().add_error(&err, &config.limits));
                }
            }
            print_view(&adapter.render(&picker.selection().snapshot(), &catalog, now));
        }
        Commands::Presets => {
            for preset in PRESETS {
                println!("{:<8} {} ({} symbols)", preset.key, preset.label, preset.symbols.len());
            }
        }
        Commands::Interactive => {
            let picker = TickerPicker::new(catalog.clone(), &config);
            interactive(picker, adapter(messages, &config), &catalog)?;
        }
    }
    Ok(())
}

fn adapter(messages: Messages, config: &SelectorConfig) -> RenderAdapter {
    RenderAdapter::new(
        messages,
        POPULAR_QUICK_PICKS.iter().map(|s| s.to_string()).collect(),
        config.notice_duration,
    )
}

fn interactive(
    mut picker: TickerPicker,
    mut adapter: RenderAdapter,
    catalog: &CatalogIndex,
) -> anyhow::Result<()> {
    println!("Type to search.");
    println!("Commands: :up :down :enter :esc :pick SYM :rm SYM :preset KEY :submit :quit");
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim_end_matches(['\r', '\n']);
        let now = Instant::now();
        let limits = picker.selection().limits();

        let Some(command) = line.strip_prefix(':') else {
            picker.set_query(line);
            print_suggestions(&picker, adapter.messages());
            continue;
        };

        let (verb, arg) = command.split_once(' ').unwrap_or((command, ""));
        match verb {
            "quit" | "q" => break,
            "pick" => match picker.pick(arg) {
                Ok(_) => adapter.clear_notice(),
                Err(err) => adapter.flash_add_error(&err, &limits, now),
            },
            "rm" => {
                if picker.remove(arg) {
                    adapter.clear_notice();
                }
            }
            "preset" => match picker.load_preset(arg) {
                Ok(report) => {
                    adapter.clear_notice();
                    println!("Loaded {} ({} dropped)", report.loaded.len(), report.rejected.len());
                }
                Err(e) => println!("❌ {}", e),
            },
            "submit" => match picker.selection().validate_submission() {
                Ok(tickers) => {
                    println!("✅ {}", tickers.join(", "));
                    break;
                }
                Err(err) => adapter.flash_submission_error(&err, &limits, now),
            },
            key => match NavigationKey::parse(key) {
                Some(key) => match picker.press(key) {
                    KeyOutcome::Highlighted(_) => {
                        print_suggestions(&picker, adapter.messages());
                        continue;
                    }
                    KeyOutcome::Added(_) => adapter.clear_notice(),
                    KeyOutcome::Rejected(err) => adapter.flash_add_error(&err, &limits, now),
                    KeyOutcome::Dismissed | KeyOutcome::Ignored => {}
                },
                None => {
                    println!("Unknown command :{}", key);
                    continue;
                }
            },
        }

        print_view(&adapter.render(&picker.selection().snapshot(), catalog, now));
    }
    Ok(())
}

fn print_suggestions(picker: &TickerPicker, messages: &Messages) {
    let suggestions = picker.suggestions();
    if suggestions.is_empty() {
        if !picker.query().trim().is_empty() {
            println!("  {}", messages.no_results);
        }
        return;
    }
    for (i, candidate) in suggestions.candidates().iter().enumerate() {
        let marker = if suggestions.highlighted_index() == Some(i) { "▶" } else { " " };
        println!("{} {:<15} {}", marker, candidate.symbol, candidate.display_name);
    }
}

fn print_view(view: &SelectionView) {
    println!("\n📋 {} · {}", view.counter_text, view.status_text);
    match &view.empty_text {
        Some(text) => println!("   {}", text),
        None => {
            for chip in &view.chips {
                match &chip.display_name {
                    Some(name) => println!("   [{} ✕] {}", chip.symbol, name),
                    None => println!("   [{} ✕]", chip.symbol),
                }
            }
        }
    }
    let picks: Vec<String> = view
        .quick_picks
        .iter()
        .map(|pick| if pick.enabled { pick.symbol.clone() } else { format!("({})", pick.symbol) })
        .collect();
    println!("   Quick picks: {}", picks.join(" "));
    if !view.input_enabled {
        println!("   {}", view.input_placeholder);
    }
    println!("   Value: {}", view.hidden_value);
    println!("   Submit: {}", if view.submit_enabled { "ready" } else { "blocked" });
}
