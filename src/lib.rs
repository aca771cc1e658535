//! A timed greeting: a spinning photo card, lyric captions and photo cards choreographed
//! against a 52 second song.
//!
//! [`Session::tick`] advances everything from the show clock reading, so the same code
//! runs under the raylib player, the headless drivers and the tests.

pub mod assets;
pub mod audio;
pub mod card;
pub mod cli;
pub mod clock;
pub mod config;
pub mod constants;
pub mod ease;
pub mod error;
pub mod ffmpeg;
pub mod headless;
pub mod logging;
pub mod lyrics;
pub mod scene;
pub mod schedule;
pub mod session;
pub mod state;

#[cfg(feature = "player")]
pub mod player;
#[cfg(feature = "player")]
mod texture_loader;

pub use assets::{AssetCatalog, Photo};
pub use card::{CardPhase, CardPose, SpinningCard};
pub use clock::ShowClock;
pub use config::ShowConfig;
pub use error::{ShowError, ShowResult};
pub use lyrics::{Caption, Entrance, LyricCue, LyricPlayer, Zone};
pub use scene::Scene;
pub use schedule::{CardKind, ScheduledEvent, Scheduler, ShowAction};
pub use session::{Session, TickReport};
