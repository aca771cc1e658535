//! Drivers that need no window: a synthetic-clock simulation, a real-time run and the
//! timeline dump.

use std::fmt::Write as _;
use std::thread;
use std::time::{Duration, Instant};

use rand::Rng;
use serde::Serialize;

use crate::assets::AssetCatalog;
use crate::audio::{AudioOutput, start_audio};
use crate::error::ShowResult;
use crate::lyrics::{LyricCue, standard_cues};
use crate::schedule::{ScheduledEvent, ShowAction, standard_events};
use crate::session::{Session, TickReport};
use crate::state::{Curtain, ShowState};

/// Ticks `session` at a fixed frame rate from 0 up to `until` seconds and returns every
/// tick that changed something.
pub fn simulate<R: Rng>(session: &mut Session<R>, fps: u32, until: f32) -> Vec<TickReport> {
    let fps = fps.max(1);
    let frames = (until.max(0.0) * fps as f32).ceil() as u64;
    (0..=frames)
        .map(|frame| session.tick(frame as f32 / fps as f32))
        .filter(|report| !report.is_quiet())
        .collect()
}

/// Plays the show against the wall clock, one tick per frame, until the song is over.
/// Every change is passed to `on_change`.
pub fn run_realtime<R: Rng>(
    session: &mut Session<R>,
    audio: &mut dyn AudioOutput,
    fps: u32,
    mut on_change: impl FnMut(&TickReport),
) -> ShowResult<()> {
    let frame_time = Duration::from_secs_f32(1.0 / fps.max(1) as f32);
    let mut curtain = Curtain::new();

    curtain.press(Instant::now());
    start_audio(audio);

    loop {
        let frame_start = Instant::now();
        match curtain.update(frame_start) {
            ShowState::Welcome | ShowState::Entering => {}
            ShowState::Playing => {
                if let Some(elapsed) = curtain.elapsed(frame_start) {
                    let report = session.tick(elapsed);
                    if !report.is_quiet() {
                        on_change(&report);
                    }
                }
            }
            ShowState::Finished => break,
        }
        if let Some(rest) = frame_time.checked_sub(frame_start.elapsed()) {
            thread::sleep(rest);
        }
    }
    Ok(())
}

/// One line per change, e.g. `13.00s  present landscape-pair`.
pub fn describe(report: &TickReport) -> String {
    let mut out = String::new();
    for action in &report.actions {
        let (verb, card) = match action {
            ShowAction::Present(card) => ("present", card),
            ShowAction::Dismiss(card) => ("dismiss", card),
            ShowAction::Remove(card) => ("remove", card),
        };
        let _ = writeln!(out, "{:6.2}s  {verb} {}", report.at, kebab(card));
    }
    if let Some(caption) = &report.caption {
        let mark = if caption.highlight { "*" } else { " " };
        let _ = writeln!(
            out,
            "{:6.2}s  lyric {:>2}{mark} [{} / {}] {}",
            report.at,
            caption.index,
            kebab(&caption.zone),
            kebab(&caption.entrance),
            caption.text
        );
    }
    if let Some(phase) = &report.card_phase {
        let _ = writeln!(out, "{:6.2}s  card {}", report.at, kebab(phase));
    }
    out
}

fn kebab<T: Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(s)) => s,
        Ok(other) => other.to_string(),
        Err(_) => String::from("?"),
    }
}

#[derive(Debug, Serialize)]
pub struct TimelineDocument {
    pub lyrics: Vec<LyricCue>,
    pub events: Vec<ScheduledEvent>,
    pub assets: AssetCatalog,
}

pub fn timeline_document(assets: AssetCatalog) -> TimelineDocument {
    TimelineDocument { lyrics: standard_cues(), events: standard_events(), assets }
}
