//! Build a small tree and print its level-order dump.
//!
//! ```bash
//! cargo run --bin rbdump -- A B C D E F
//! RBDUMP_LOG=trace cargo run --bin rbdump
//! ```

use std::env;
use std::process::ExitCode;

use log::{error, info, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use rbstore::RbTree;

const DEFAULT_KEYS: [&str; 6] = ["A", "B", "C", "D", "E", "F"];

fn log_level() -> LevelFilter {
    env::var("RBDUMP_LOG")
        .ok()
        .and_then(|level| level.parse().ok())
        .unwrap_or(LevelFilter::Warn)
}

fn main() -> ExitCode {
    if let Err(err) = TermLogger::init(
        log_level(),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("logger setup failed: {}", err);
    }

    let args: Vec<String> = env::args().skip(1).collect();
    let keys: Vec<String> = if args.is_empty() {
        DEFAULT_KEYS.iter().map(|k| k.to_string()).collect()
    } else {
        args
    };

    let mut tree = RbTree::new();
    for key in keys {
        if !tree.insert(key.clone(), key.clone()) {
            info!("skipping duplicate key {}", key);
        }
    }

    println!("{}", tree.render());

    match tree.validate() {
        Ok(black_height) => {
            info!("{} keys, black-height {}, {}", tree.len(), black_height, tree.stats());
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("tree is invalid: {}", err);
            ExitCode::FAILURE
        }
    }
}
