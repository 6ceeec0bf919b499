use std::path::PathBuf;
use std::{error, io};

use clap::{Arg, Command};
use log::debug;
use qchess::agent::{LearningStore, StateActionKey, StorePaths};
use qchess::AgentSettings;

type DynError = Box<dyn error::Error + Send + Sync>;

pub fn main() -> Result<(), DynError> {
    let matches = Command::new("qchess store inspector")
        .version("0.1")
        .about("Summarises the tables learned by a qchess agent")
        .arg(
            Arg::new("qFile")
                .long("q-file")
                .env("QCHESS_Q_FILE")
                .value_name("q_values.json")
                .help("Utility table to read")
                .num_args(1)
                .global(true),
        )
        .arg(
            Arg::new("nFile")
                .long("n-file")
                .env("QCHESS_N_FILE")
                .value_name("visit_counts.json")
                .help("Visit count table to read")
                .num_args(1)
                .global(true),
        )
        .arg(
            Arg::new("logfile")
                .short('l')
                .long("logfile")
                .env("LOGFILE")
                .value_name("qstore.log")
                .help("Name of debug logfile")
                .num_args(1)
                .global(true),
        )
        .subcommand_required(true)
        .subcommand(Command::new("stats").about("Print table sizes and utility statistics"))
        .subcommand(
            Command::new("top")
                .about("List the most visited state-action pairs")
                .arg(
                    Arg::new("count")
                        .short('n')
                        .long("count")
                        .help("Number of pairs to list")
                        .num_args(1)
                        .default_value("10")
                        .value_parser(clap::value_parser!(usize)),
                ),
        )
        .get_matches();

    let log_dispatcher = fern::Dispatch::new().format(|out, message, record| {
        out.finish(format_args!(
            "{}[{}][{}] {}",
            chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
            record.target(),
            record.level(),
            message
        ))
    });

    if let Some(log_file) = matches.get_one::<String>("logfile") {
        log_dispatcher
            .chain(
                fern::Dispatch::new()
                    .level(log::LevelFilter::Debug)
                    .chain(fern::log_file(log_file)?),
            )
            .chain(
                fern::Dispatch::new()
                    .level(log::LevelFilter::Warn)
                    .chain(io::stderr()),
            )
            .apply()?
    } else {
        log_dispatcher
            .level(log::LevelFilter::Warn)
            .chain(io::stderr())
            .apply()?
    }

    let default_paths = StorePaths::default();
    let paths = StorePaths {
        utilities: matches
            .get_one::<String>("qFile")
            .map(PathBuf::from)
            .unwrap_or(default_paths.utilities),
        visits: matches
            .get_one::<String>("nFile")
            .map(PathBuf::from)
            .unwrap_or(default_paths.visits),
    };
    debug!("Reading tables from {:?}", paths);
    let store = LearningStore::load(&paths)?;

    match matches.subcommand() {
        Some(("stats", _)) => print_stats(&store),
        Some(("top", top_matches)) => {
            let count = *top_matches.get_one::<usize>("count").unwrap();
            print_most_visited(&store, count)
        }
        _ => unreachable!(),
    }
    Ok(())
}

fn print_stats(store: &LearningStore) {
    let threshold = AgentSettings::default().get_exploration_threshold();
    let terminal_entries = store.utilities().filter(|(key, _)| key.is_terminal()).count();
    let total_visits: u64 = store.visit_counts().map(|(_, visits)| visits as u64).sum();
    let explored = store
        .visit_counts()
        .filter(|(_, visits)| *visits >= threshold)
        .count();
    let mut states: Vec<_> = store.utilities().map(|(key, _)| key.occupied()).collect();
    states.sort_by_key(|occupied| occupied.board);
    states.dedup();

    println!("Utilities:         {}", store.num_utilities());
    println!("  terminal:        {}", terminal_entries);
    println!("  distinct states: {}", states.len());
    println!("Visited pairs:     {}", store.num_visited());
    println!("  total visits:    {}", total_visits);
    println!("  explored (>={}): {}", threshold, explored);

    let min = store.utilities().map(|(_, u)| u).fold(f64::INFINITY, f64::min);
    let max = store
        .utilities()
        .map(|(_, u)| u)
        .fold(f64::NEG_INFINITY, f64::max);
    if store.num_utilities() > 0 {
        println!(
            "Utility mean {:.4}, min {:.4}, max {:.4}",
            store.utility_estimate(),
            min,
            max
        );
    }
}

fn print_most_visited(store: &LearningStore, count: usize) {
    let mut pairs: Vec<(&StateActionKey, u32)> = store.visit_counts().collect();
    pairs.sort_by(|(_, a), (_, b)| b.cmp(a));

    println!("{:>8} {:>12} {:>10} {:>7} {:>9}", "visits", "utility", "move", "pieces", "material");
    for (key, visits) in pairs.into_iter().take(count) {
        let action = key
            .action()
            .map_or_else(|| "-".to_string(), |mv| mv.to_string());
        println!(
            "{:>8} {:>12.4} {:>10} {:>7} {:>9}",
            visits,
            store.utility(key),
            action,
            key.occupied().count(),
            key.total_value()
        );
    }
}
