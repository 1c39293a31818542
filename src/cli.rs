use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "followtrack")]
#[command(about = "Track follower changes from social-media export archives")]
#[command(version)]
pub struct Cli {
    /// Database file to use instead of the configured location
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Import an export archive as a new snapshot
    Import(ImportArgs),

    /// List stored snapshots, newest first
    Snapshots(SnapshotsArgs),

    /// Accounts that unfollowed since the previous snapshot
    Unfollowers(UnfollowersArgs),

    /// Accounts you follow that do not follow back
    NotBack(NotBackArgs),

    /// Erase all stored snapshots
    Wipe(WipeArgs),
}

#[derive(Parser)]
pub struct ImportArgs {
    /// Archive file to import ('-' reads from stdin)
    pub archive: PathBuf,

    /// Show detailed output including diagnostics and timings
    #[arg(long, short = 'v', default_value_t = false)]
    pub verbose: bool,
}

#[derive(Parser)]
pub struct SnapshotsArgs {
    /// Output as JSON instead of table
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Parser)]
pub struct UnfollowersArgs {
    /// Output as JSON instead of table
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Output as CSV (header: username,last_seen)
    #[arg(long, default_value_t = false)]
    pub csv: bool,
}

#[derive(Parser)]
pub struct NotBackArgs {
    /// Output as JSON instead of table
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Output as CSV (header: username,followed_at)
    #[arg(long, default_value_t = false)]
    pub csv: bool,
}

#[derive(Parser)]
pub struct WipeArgs {
    /// Skip confirmation and erase immediately
    #[arg(long, default_value_t = false)]
    pub yes: bool,
}
