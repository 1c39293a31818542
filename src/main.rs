use std::io::{self, Read, Write};
use std::path::Path;
use std::process;

use clap::Parser;
use followtrack::cli::{Cli, Command};
use followtrack::config::Config;
use followtrack::ingest;
use followtrack::report;
use followtrack::store::{diff, Store};

fn open_store(db_flag: Option<std::path::PathBuf>) -> Store {
    let config = match Config::resolve(db_flag) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    match Store::open(&config) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error opening database: {e}");
            process::exit(1);
        }
    }
}

/// Read the archive from a file, or from stdin when the path is '-'.
fn read_archive(path: &Path) -> (Vec<u8>, Option<String>) {
    if path.as_os_str() == "-" {
        let mut bytes = Vec::new();
        if let Err(e) = io::stdin().read_to_end(&mut bytes) {
            eprintln!("Error reading archive from stdin: {e}");
            process::exit(1);
        }
        (bytes, None)
    } else {
        match std::fs::read(path) {
            Ok(bytes) => {
                let label = path.file_name().map(|n| n.to_string_lossy().to_string());
                (bytes, label)
            }
            Err(e) => {
                eprintln!("Error reading {}: {e}", path.display());
                process::exit(1);
            }
        }
    }
}

fn confirm_wipe() -> bool {
    print!("This will erase all snapshots permanently. Type 'yes' to continue: ");
    if io::stdout().flush().is_err() {
        return false;
    }

    let mut line = String::new();
    if io::stdin().read_line(&mut line).is_err() {
        return false;
    }

    line.trim() == "yes"
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Import(args) => {
            let (bytes, label) = read_archive(&args.archive);
            let mut store = open_store(cli.db);

            match ingest::import_archive(&mut store, &bytes, label.as_deref()) {
                Ok(summary) => {
                    println!(
                        "Imported: {} followers, {} following",
                        summary.follower_count, summary.following_count
                    );

                    if args.verbose {
                        println!("snapshot: {}", summary.snapshot_id);
                        println!(
                            "import completed in {:.2}s",
                            summary.duration_ms as f64 / 1000.0
                        );
                        if let Some(mem) = summary.peak_memory_bytes {
                            println!("peak memory: {:.1} MB", mem as f64 / 1_024_f64 / 1_024_f64);
                        }
                    }

                    report::print_diagnostics(&summary.diagnostics, args.verbose);
                }
                Err(e) => {
                    eprintln!("Import failed: {e}");
                    process::exit(1);
                }
            }
        }
        Command::Snapshots(args) => {
            let store = open_store(cli.db);

            match store.list_snapshots() {
                Ok(snapshots) => {
                    if args.json {
                        println!("{}", report::json::render(&snapshots));
                    } else {
                        print!("{}", report::table::snapshots(&snapshots));
                    }
                }
                Err(e) => {
                    eprintln!("Error listing snapshots: {e}");
                    process::exit(1);
                }
            }
        }
        Command::Unfollowers(args) => {
            let store = open_store(cli.db);

            match diff::lost_followers(&store) {
                Ok(rows) => {
                    if args.json {
                        println!("{}", report::json::render(&rows));
                    } else if args.csv {
                        println!("{}", report::csv::lost_followers(&rows));
                    } else {
                        print!("{}", report::table::lost_followers(&rows));
                    }
                }
                Err(e) => {
                    eprintln!("Error computing lost followers: {e}");
                    process::exit(1);
                }
            }
        }
        Command::NotBack(args) => {
            let store = open_store(cli.db);

            match diff::not_following_back(&store) {
                Ok(rows) => {
                    if args.json {
                        println!("{}", report::json::render(&rows));
                    } else if args.csv {
                        println!("{}", report::csv::not_following_back(&rows));
                    } else {
                        print!("{}", report::table::not_following_back(&rows));
                    }
                }
                Err(e) => {
                    eprintln!("Error computing not-following-back: {e}");
                    process::exit(1);
                }
            }
        }
        Command::Wipe(args) => {
            if !args.yes && !confirm_wipe() {
                println!("Aborted.");
                return;
            }

            let mut store = open_store(cli.db);
            match store.wipe_all() {
                Ok(()) => println!("All snapshots erased."),
                Err(e) => {
                    eprintln!("Error wiping data: {e}");
                    process::exit(1);
                }
            }
        }
    }
}
