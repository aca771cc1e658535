use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::config::ShowConfig;
use crate::constants::*;
use crate::logging::LogFormat;

#[derive(Parser, Debug)]
#[command(name = "cantik", version, about = "A timed greeting: spinning photo card, lyric captions and photo cards over a 52 second song")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,

    /// Directory holding the six photos (foto1 .. foto6) and the song.
    #[arg(long, global = true, env = "CANTIK_ASSETS", default_value = "assets")]
    pub assets: PathBuf,

    /// Song to play (defaults to song.mp3 in the assets directory).
    #[arg(long, global = true)]
    pub audio: Option<PathBuf>,

    /// Seed for caption placement and entrance styles.
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// More logging (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Human)]
    pub log_format: LogFormat,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Open the show in a window (build with the `player` feature).
    Play(PlayArgs),
    /// Run the show in real time without a window, logging what appears.
    Run(RunArgs),
    /// Run the show on a synthetic clock and print every change.
    Simulate(SimulateArgs),
    /// Print the fixed lyric and card timeline as JSON.
    Timeline,
}

#[derive(Parser, Debug)]
pub struct PlayArgs {
    /// Also record the show to an MP4 (requires `ffmpeg` on PATH).
    #[arg(long)]
    pub record: Option<PathBuf>,

    #[arg(long, default_value_t = FPS)]
    pub fps: u32,
}

#[derive(Parser, Debug)]
pub struct RunArgs {
    #[arg(long, default_value_t = FPS)]
    pub fps: u32,
}

#[derive(Parser, Debug)]
pub struct SimulateArgs {
    #[arg(long, default_value_t = FPS)]
    pub fps: u32,

    /// Show clock time to stop at, in seconds.
    #[arg(long, default_value_t = SHOW_LENGTH)]
    pub until: f32,

    /// Print one JSON object per change instead of text.
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    pub fn config(&self) -> ShowConfig {
        let (fps, record, until) = match &self.cmd {
            Command::Play(args) => (args.fps, args.record.clone(), SHOW_LENGTH),
            Command::Run(args) => (args.fps, None, SHOW_LENGTH),
            Command::Simulate(args) => (args.fps, None, args.until),
            Command::Timeline => (FPS, None, SHOW_LENGTH),
        };
        ShowConfig {
            assets_dir: self.assets.clone(),
            audio: self.audio.clone(),
            seed: self.seed,
            fps,
            record,
            until,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn play_with_recording() {
        let cli = Cli::try_parse_from(["cantik", "play", "--record", "out.mp4", "--assets", "photos"]).unwrap();
        let config = cli.config();
        assert_eq!(config.record, Some(PathBuf::from("out.mp4")));
        assert_eq!(config.assets_dir, PathBuf::from("photos"));
        assert_eq!(config.fps, FPS);
    }

    #[test]
    fn simulate_defaults_to_the_whole_song() {
        let cli = Cli::try_parse_from(["cantik", "simulate", "--seed", "9", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config().seed, Some(9));
        match cli.cmd {
            Command::Simulate(args) => {
                assert_eq!(args.until, SHOW_LENGTH);
                assert!(!args.json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn infinite_until_parses_but_fails_validation() {
        let cli = Cli::try_parse_from(["cantik", "simulate", "--until", "inf"]).unwrap();
        let config = cli.config();
        assert!(config.until.is_infinite());
        assert!(config.validate().is_err());
    }
}
