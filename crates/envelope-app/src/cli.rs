use clap::Parser;

/// Envelope: open the invitation.
#[derive(Parser, Debug)]
#[command(name = "envelope", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Log level override (e.g. `envelope=debug`).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Keep the "already tracked" flag in memory instead of on disk.
    #[arg(long)]
    pub ephemeral: bool,

    /// Print the effective config as JSON and exit.
    #[arg(long)]
    pub print_config: bool,
}

pub fn parse() -> Args {
    Args::parse()
}
