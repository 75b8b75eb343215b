mod cli;

use crate::cli::{App, Prompt, Role};
use anyhow::{Context, Result};
use cinemadb::{Cinema, CinemaConfig};
use clap::Parser;
use std::io::{self, IsTerminal};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cinemadb")]
#[command(about = "Cinema management over flat-file tables")]
struct Cli {
    /// Directory holding the table files
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Minutes kept free between showtimes in one auditorium
    #[arg(long)]
    buffer_minutes: Option<i64>,

    /// Skip the main menu and open one role directly
    #[arg(long, value_enum)]
    role: Option<Role>,

    /// Create missing tables and auditoriums, then exit
    #[arg(long)]
    init: bool,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn load_config(&self) -> Result<CinemaConfig> {
        let mut config = match &self.config {
            Some(path) => CinemaConfig::from_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => CinemaConfig::default(),
        };
        if let Some(dir) = &self.data_dir {
            config = config.data_dir(dir);
        }
        if let Some(minutes) = self.buffer_minutes {
            config = config.buffer_minutes(minutes);
        }
        Ok(config)
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .target(env_logger::Target::Stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.load_config()?;
    let data_dir = config.data_dir.clone();
    let mut cinema = Cinema::open(config)
        .with_context(|| format!("failed to open data directory {}", data_dir.display()))?;
    let created = cinema
        .initialize()
        .with_context(|| format!("failed to initialize {}", data_dir.display()))?;

    if cli.init {
        for table in &created {
            println!("created {}", table.file_name());
        }
        println!("{} ready", data_dir.display());
        return Ok(());
    }

    let stdout = io::stdout();
    let styled = stdout.is_terminal();
    let prompt = Prompt::new(io::stdin().lock(), stdout.lock()).styled(styled);
    App::new(cinema, prompt).run(cli.role)
}
