// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! Interactive shell for experimenting with key-value collections

use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use kv_collections::{AnyCollection, Collection, CollectionType, Config, DuplicatePolicy};
use rustyline::DefaultEditor;
use std::io::{self, BufRead, IsTerminal, Write};
use tracing_subscriber::{
    filter::{EnvFilter, LevelFilter},
    prelude::*,
    registry::Registry,
};

macro_rules! die {
    ($fmt:literal, $($arg:tt)*) => {{
        eprintln!($fmt, $($arg)*);
        std::process::exit(1);
    }};

    ($msg:literal) => {{
        eprintln!($msg);
        std::process::exit(1);
    }};
}

#[allow(unused_imports)]
use tracing::{debug, error, info, trace, warn};

fn init_tracing(quiet: bool, verbose: u8) -> LevelFilter {
    let level_filter = if quiet {
        LevelFilter::ERROR
    } else {
        match verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    };

    // Bridge log crate macros to tracing (for library code that uses log::*)
    if tracing_log::LogTracer::init().is_err() {
        die!("INTERNAL ERROR: setting log tracer failed");
    }

    let registry = Registry::default();

    let env_filter = EnvFilter::builder()
        .with_default_directive(level_filter.into())
        .with_env_var("KVC_LOG")
        .from_env_lossy()
        .add_directive(
            "rustyline=warn"
                .parse()
                .expect("Failed to parse rustyline directive"),
        );

    let subscriber = registry.with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .compact(),
    );

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        die!("INTERNAL ERROR: setting default tracing::subscriber failed");
    }

    let prev_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        tracing_panic::panic_hook(info);
        prev_hook(info); // daisy-chain to old panic hook
    }));

    level_filter
}

fn parse_collection_type(s: &str) -> Result<CollectionType, String> {
    CollectionType::try_from(s).map_err(|()| format!("unknown store type: {s}"))
}

fn parse_duplicate_policy(s: &str) -> Result<DuplicatePolicy, String> {
    DuplicatePolicy::try_from(s).map_err(|()| format!("unknown duplicate policy: {s}"))
}

fn parse_load_factor(s: &str) -> Result<f64, String> {
    match s.parse::<f64>() {
        Ok(ratio) if ratio.is_finite() && ratio > 0.0 => Ok(ratio),
        Ok(_) => Err("load factor must be finite and positive".into()),
        Err(e) => Err(e.to_string()),
    }
}

/// Interactive shell for experimenting with key-value collections
#[derive(Parser, Debug)]
#[command(name = "kvc")]
#[command(about = "Interactive shell for experimenting with key-value collections")]
struct ToolArgs {
    /// Suppress all output except for errors. This overrides the -v flag.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Turn on verbose output. Supply -v multiple times to increase verbosity.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Storage strategy ("bin-search" or "hash-table")
    #[arg(
        short, long,
        default_value = "hash-table",
        value_parser = parse_collection_type,
        value_name = "TYPE",
    )]
    store: CollectionType,

    /// Initial number of buckets (or preallocated entries)
    #[arg(
        short, long,
        default_value_t = kv_collections::config::DEFAULT_INITIAL_CAPACITY,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..),
    )]
    capacity: usize,

    /// Load factor at which a hash table grows
    #[arg(
        short, long,
        default_value_t = kv_collections::config::DEFAULT_LOAD_FACTOR_THRESHOLD,
        value_parser = parse_load_factor,
    )]
    load_factor: f64,

    /// What to do when a key is added twice ("shadow", "overwrite" or "reject")
    #[arg(
        short, long,
        default_value = "shadow",
        value_parser = parse_duplicate_policy,
        value_name = "POLICY",
    )]
    duplicates: DuplicatePolicy,
}

// Internal shell commands
#[derive(Parser, Debug)]
#[command(name = "")]
#[command(no_binary_name = true)]
#[command(disable_version_flag = true)]
#[command(help_template = "
Available Commands:

{subcommands}

Use `help COMMAND` or `COMMAND --help` for more details.

")]
struct ShellArgs {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand, Debug, Clone)]
enum ShellCommand {
    /// Add a key-value pair
    #[command(visible_alias = "set")]
    Add {
        /// The key to add
        key: String,
        /// The value to store
        value: String,
    },
    /// Remove a key
    #[command(visible_alias = "del")]
    Remove {
        /// The key to remove
        key: String,
    },
    /// Get the value for a key
    #[command(visible_alias = "get")]
    Find {
        /// The key to look up
        key: String,
    },
    /// List keys in a range [start, end]
    Range {
        /// Start of the range (inclusive)
        start: String,
        /// End of the range (inclusive)
        end: String,
    },
    /// List all keys in storage order
    #[command(visible_alias = "ls")]
    Keys,
    /// List all keys in ascending order
    Sort,
    /// Count the number of entries
    #[command(visible_alias = "count")]
    Size,
    /// Show collection statistics
    #[command(visible_alias = "info")]
    Stats,
    /// Exit the current shell
    #[command(visible_alias = "quit")]
    Exit,
}

struct Session {
    collection: AnyCollection<String, String>,
}

impl Session {
    fn open(config: Config) -> Self {
        Self {
            collection: config.open(),
        }
    }
}

fn print_keys(keys: &[String]) {
    for key in keys {
        println!("{key}");
    }
    println!("({} keys)", keys.len());
}

fn print_stats(session: &Session) {
    match &session.collection {
        AnyCollection::BinSearch(coll) => {
            println!("Type: bin-search");
            println!("Entries: {}", coll.size());
            println!("Duplicates: {:?}", coll.duplicate_policy());
        }
        AnyCollection::HashTable(table) => {
            let stats = table.chain_stats();

            println!("Type: hash-table");
            println!("Entries: {}", table.size());
            println!("Duplicates: {:?}", table.duplicate_policy());
            println!("Buckets: {}", table.bucket_count());
            println!("Load factor: {:.4}", table.load_factor());
            println!(
                "Chain length: min={}, max={}, avg={:.4}",
                stats.min, stats.max, stats.avg
            );
        }
    }
}

fn handle_add(session: &mut Session, key: String, value: String) {
    match session.collection.add(key, value) {
        Ok(()) => println!("OK"),
        Err(e) => eprintln!("Error: {e}"),
    }
}

fn handle_remove(session: &mut Session, key: &String) {
    match session.collection.remove(key) {
        Some(_) => println!("OK (removed)"),
        None => println!("(not found)"),
    }
}

fn handle_find(session: &Session, key: &String) {
    match session.collection.find(key) {
        Some(value) => println!("{value}"),
        None => println!("(not found)"),
    }
}

/// Result of executing a command
enum CommandResult {
    Continue,
    Exit,
}

/// Execute a parsed command
fn execute_command(session: &mut Session, cmd: ShellCommand) -> CommandResult {
    match cmd {
        ShellCommand::Add { key, value } => handle_add(session, key, value),
        ShellCommand::Remove { key } => handle_remove(session, &key),
        ShellCommand::Find { key } => handle_find(session, &key),
        ShellCommand::Range { start, end } => {
            print_keys(&session.collection.find_range(&start, &end));
        }
        ShellCommand::Keys => print_keys(&session.collection.keys()),
        ShellCommand::Sort => print_keys(&session.collection.sort()),
        ShellCommand::Size => println!("{}", session.collection.size()),
        ShellCommand::Stats => print_stats(session),
        ShellCommand::Exit => return CommandResult::Exit,
    }
    CommandResult::Continue
}

/// Parse and run a shell command line
fn run_shell_command(session: &mut Session, line: &str) -> CommandResult {
    let line = line.trim();
    if line.is_empty() {
        return CommandResult::Continue;
    }

    let tokens = match shlex::split(line) {
        Some(t) if !t.is_empty() => t,
        Some(_) => return CommandResult::Continue,
        None => {
            eprintln!("error: unclosed quote");
            return CommandResult::Continue;
        }
    };

    match ShellArgs::try_parse_from(&tokens) {
        Ok(args) => execute_command(session, args.command),
        Err(e) => {
            // Print clap's error message
            eprintln!("{e}");
            CommandResult::Continue
        }
    }
}

fn run_shell(session: &mut Session) {
    if io::stdin().is_terminal() {
        run_shell_interactive(session);
    } else {
        run_shell_non_interactive(session);
    }
}

fn run_shell_interactive(session: &mut Session) {
    println!("Welcome to the kvc shell");
    println!("Type 'help' for available commands, 'exit' to quit.\n");

    let mut rl = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(e) => {
            eprintln!("Error initializing line editor: {e}");
            return;
        }
    };

    loop {
        match rl.readline("kvc> ") {
            Ok(line) => {
                let _ = rl.add_history_entry(&line);
                if let CommandResult::Exit = run_shell_command(session, &line) {
                    break;
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                // Ignore Ctrl+C, just show a new prompt
                continue;
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!();
                break;
            }
            Err(e) => {
                eprintln!("Error reading input: {e}");
                break;
            }
        }
    }
}

fn run_shell_non_interactive(session: &mut Session) {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        if stdout.flush().is_err() {
            die!("can't flush stdout");
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => {
                // EOF
                break;
            }
            Ok(_) => {
                if let CommandResult::Exit = run_shell_command(session, &line) {
                    break;
                }
            }
            Err(e) => {
                die!("Error reading input: {}", e);
            }
        }
    }
}

fn main() {
    let args = ToolArgs::parse();
    let level_filter = init_tracing(args.quiet, args.verbose);

    let cmd = ToolArgs::command();

    info!(
        "starting {} ({} {}), log level: {level_filter}",
        cmd.get_name(),
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::new(args.store)
        .initial_capacity(args.capacity)
        .load_factor_threshold(args.load_factor)
        .duplicate_policy(args.duplicates);

    debug!("opening collection with {config:?}");

    let mut session = Session::open(config);
    run_shell(&mut session);
}
