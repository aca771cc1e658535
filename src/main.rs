use anyhow::Context as _;
use clap::Parser;

use cantik::audio::Silent;
use cantik::cli::{Cli, Command};
use cantik::headless::{describe, run_realtime, simulate, timeline_document};
use cantik::logging::init_logging;
use cantik::{AssetCatalog, Session, ShowConfig};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.verbose);

    let config = cli.config();
    match &cli.cmd {
        Command::Play(_) => play(&config),
        Command::Run(_) => {
            config.validate_assets()?;
            let catalog = config.catalog();
            for photo in catalog.missing() {
                println!("missing {} ({photo:?}), it will be hidden", photo.file_name());
            }
            let mut session = Session::new(config.rng())?;
            run_realtime(&mut session, &mut Silent, config.fps, |report| print!("{}", describe(report)))?;
            Ok(())
        }
        Command::Simulate(args) => {
            config.validate()?;
            let mut session = Session::new(config.rng())?;
            for report in simulate(&mut session, config.fps, config.until) {
                if args.json {
                    println!("{}", serde_json::to_string(&report)?);
                } else {
                    print!("{}", describe(&report));
                }
            }
            Ok(())
        }
        Command::Timeline => {
            let catalog = if config.assets_dir.is_dir() { config.catalog() } else { AssetCatalog::empty() };
            let doc = timeline_document(catalog);
            println!("{}", serde_json::to_string_pretty(&doc).context("serializing timeline")?);
            Ok(())
        }
    }
}

#[cfg(feature = "player")]
fn play(config: &ShowConfig) -> anyhow::Result<()> {
    cantik::player::run(config).with_context(|| format!("playing from {}", config.assets_dir.display()))
}

#[cfg(not(feature = "player"))]
fn play(_config: &ShowConfig) -> anyhow::Result<()> {
    anyhow::bail!("this build has no window; rebuild with `--features player`, or use `run` / `simulate`")
}
