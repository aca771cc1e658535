//! Timed lyric captions.
//!
//! A [`LyricPlayer`] walks an ascending list of [`LyricCue`]s against the show clock and
//! keeps exactly one [`Caption`] on screen. Each call to [`LyricPlayer::tick`] fires at most
//! one cue, so a late frame catches up over the following frames instead of skipping.

use rand::Rng;
use serde::Serialize;

use crate::constants::*;
use crate::ease::{cubic_out, lerp, progress};
use crate::error::{ShowError, ShowResult};

/// Screen band a caption is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Zone {
    Top,
    Center,
    Bottom,
}

pub const ZONES: [Zone; 3] = [Zone::Top, Zone::Center, Zone::Bottom];

impl Zone {
    /// Vertical anchor of the band as a fraction of the page height.
    pub fn anchor_y(self) -> f32 {
        match self {
            Zone::Top => 0.15,
            Zone::Center => 0.5,
            Zone::Bottom => 0.85,
        }
    }
}

/// Caption entrance animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Entrance {
    Up,
    Left,
    Right,
    Zoom,
    Float,
    Blur,
}

pub const ENTRANCES: [Entrance; 6] = [
    Entrance::Up,
    Entrance::Left,
    Entrance::Right,
    Entrance::Zoom,
    Entrance::Float,
    Entrance::Blur,
];

/// Transform applied to a caption while it enters.
/// Offsets are fractions of the page size, blur is in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntranceFrame {
    pub dx: f32,
    pub dy: f32,
    pub scale: f32,
    pub alpha: f32,
    pub blur: f32,
}

impl EntranceFrame {
    pub const SETTLED: EntranceFrame = EntranceFrame { dx: 0.0, dy: 0.0, scale: 1.0, alpha: 1.0, blur: 0.0 };
}

impl Entrance {
    /// Transform `age` seconds after the caption was shown.
    pub fn sample(self, age: f32) -> EntranceFrame {
        let t = cubic_out(progress(age, ENTRANCE_DURATION));
        let mut frame = EntranceFrame { alpha: t, ..EntranceFrame::SETTLED };
        match self {
            Entrance::Up => frame.dy = lerp(0.05, 0.0, t),
            Entrance::Left => frame.dx = lerp(-0.1, 0.0, t),
            Entrance::Right => frame.dx = lerp(0.1, 0.0, t),
            Entrance::Zoom => frame.scale = lerp(0.5, 1.0, t),
            Entrance::Float => {
                frame.dy = lerp(0.03, 0.0, t);
                frame.scale = lerp(0.95, 1.0, t);
            }
            Entrance::Blur => frame.blur = lerp(10.0, 0.0, t),
        }
        frame
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LyricCue {
    pub text: String,
    pub trigger_time: f32,
    pub highlight: bool,
    pub is_final: bool,
}

impl LyricCue {
    pub fn new(text: impl Into<String>, trigger_time: f32) -> Self {
        Self { text: text.into(), trigger_time, highlight: false, is_final: false }
    }

    pub fn highlighted(mut self) -> Self {
        self.highlight = true;
        self
    }

    pub fn last(mut self) -> Self {
        self.is_final = true;
        self
    }
}

/// The song's captions, cut to the 52 second track.
pub fn standard_cues() -> Vec<LyricCue> {
    vec![
        LyricCue::new("🎵 Bukan karena make up di...", 2.0),
        LyricCue::new("...wajahmu atau lipstik merah itu 💄", 6.0),
        LyricCue::new("Lembut hati tutur kata...", 12.0),
        LyricCue::new("...terciptalah cinta yang ku puja 💕", 16.0),
        LyricCue::new("Tak perduli...", 21.0),
        LyricCue::new("...langit menertawakanku 🌙", 25.0),
        LyricCue::new("Kau mencuri...", 29.0),
        LyricCue::new("...hatiku, mimpiku, semua rinduku 💘", 34.0),
        LyricCue::new("Karena kamu cantik 🤍", 39.0).highlighted(),
        LyricCue::new("Kan kuberi segalanya apa yang kupunya 💕", 43.0).highlighted(),
        LyricCue::new("Sempurnalah duniaku saat kau di sisiku 🤍", 48.0).highlighted().last(),
    ]
}

/// A cue as it is displayed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Caption {
    pub index: usize,
    pub text: String,
    pub highlight: bool,
    pub is_final: bool,
    pub zone: Zone,
    pub entrance: Entrance,
    pub shown_at: f32,
}

impl Caption {
    pub fn entrance_at(&self, elapsed: f32) -> EntranceFrame {
        self.entrance.sample(elapsed - self.shown_at)
    }
}

fn in_center_window(elapsed: f32) -> bool {
    (elapsed >= CENTER_WINDOW.0 && elapsed <= CENTER_WINDOW.1) || elapsed >= CENTER_FROM
}

/// Zone for cue `index` displayed at `elapsed`.
///
/// While the photo cards own the middle of the page ([15, 27] and from 50 on) captions
/// go to the center whatever their index. Cue 7 is the only one placed at random.
/// Cues shown on time inside those windows (3 to 5) are centered anyway, so the override
/// only changes a placement when captions catch up after a stall.
pub fn place<R: Rng + ?Sized>(index: usize, elapsed: f32, rng: &mut R) -> Zone {
    if in_center_window(elapsed) {
        return Zone::Center;
    }
    match index {
        0 => Zone::Bottom,
        1 => Zone::Top,
        2..=6 => Zone::Center,
        7 => ZONES[rng.random_range(0..ZONES.len())],
        _ => Zone::Bottom,
    }
}

pub fn pick_entrance<R: Rng + ?Sized>(rng: &mut R) -> Entrance {
    ENTRANCES[rng.random_range(0..ENTRANCES.len())]
}

pub struct LyricPlayer {
    cues: Vec<LyricCue>,
    next: usize,
    current: Option<Caption>,
}

impl LyricPlayer {
    pub fn new(cues: Vec<LyricCue>) -> ShowResult<Self> {
        let mut previous = 0.0_f32;
        for (i, cue) in cues.iter().enumerate() {
            if cue.text.trim().is_empty() {
                return Err(ShowError::timeline(format!("lyric cue {i} has no text")));
            }
            if !cue.trigger_time.is_finite() || cue.trigger_time < 0.0 {
                return Err(ShowError::timeline(format!(
                    "lyric cue {i} has invalid trigger time {}",
                    cue.trigger_time
                )));
            }
            if cue.trigger_time < previous {
                return Err(ShowError::timeline(format!(
                    "lyric cue {i} at {}s comes before the previous cue at {previous}s",
                    cue.trigger_time
                )));
            }
            previous = cue.trigger_time;
        }
        Ok(Self { cues, next: 0, current: None })
    }

    pub fn standard() -> Self {
        Self { cues: standard_cues(), next: 0, current: None }
    }

    pub fn cues(&self) -> &[LyricCue] {
        &self.cues
    }

    /// Number of cues fired so far.
    pub fn fired(&self) -> usize {
        self.next
    }

    pub fn is_exhausted(&self) -> bool {
        self.next >= self.cues.len()
    }

    pub fn current(&self) -> Option<&Caption> {
        self.current.as_ref()
    }

    /// Fires the next cue if its time has come and returns the caption that replaced the
    /// previous one. Keeps returning `None` once every cue has fired.
    pub fn tick<R: Rng + ?Sized>(&mut self, elapsed: f32, rng: &mut R) -> Option<&Caption> {
        let cue = self.cues.get(self.next)?;
        if elapsed.is_nan() || elapsed < cue.trigger_time {
            return None;
        }

        let entrance = pick_entrance(rng);
        let zone = place(self.next, elapsed, rng);
        let caption = Caption {
            index: self.next,
            text: cue.text.clone(),
            highlight: cue.highlight,
            is_final: cue.is_final,
            zone,
            entrance,
            shown_at: elapsed,
        };
        tracing::info!(
            index = caption.index,
            at = elapsed,
            ?zone,
            ?entrance,
            highlight = caption.highlight,
            "lyric: {}",
            caption.text
        );

        self.next += 1;
        self.current = Some(caption);
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn standard_table_is_valid() {
        let player = LyricPlayer::new(standard_cues()).unwrap();
        assert_eq!(player.cues().len(), 11);
        assert!(player.cues().last().unwrap().is_final);
        assert_eq!(player.cues().iter().filter(|c| c.highlight).count(), 3);
    }

    #[test]
    fn rejects_out_of_order_cues() {
        let err = LyricPlayer::new(vec![LyricCue::new("b", 5.0), LyricCue::new("a", 1.0)])
            .err()
            .unwrap();
        assert!(err.to_string().contains("comes before"));
    }

    #[test]
    fn rejects_empty_text_and_bad_times() {
        assert!(LyricPlayer::new(vec![LyricCue::new("  ", 1.0)]).is_err());
        assert!(LyricPlayer::new(vec![LyricCue::new("x", f32::NAN)]).is_err());
        assert!(LyricPlayer::new(vec![LyricCue::new("x", -1.0)]).is_err());
    }

    #[test]
    fn fixed_zones_by_index() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(place(0, 2.0, &mut rng), Zone::Bottom);
        assert_eq!(place(1, 6.0, &mut rng), Zone::Top);
        for i in 2..=6 {
            assert_eq!(place(i, 12.0, &mut rng), Zone::Center);
        }
        assert_eq!(place(8, 39.0, &mut rng), Zone::Bottom);
        assert_eq!(place(10, 48.0, &mut rng), Zone::Bottom);
    }

    #[test]
    fn center_window_overrides_index() {
        let mut rng = StdRng::seed_from_u64(2);
        assert_eq!(place(0, 15.0, &mut rng), Zone::Center);
        assert_eq!(place(1, 27.0, &mut rng), Zone::Center);
        assert_eq!(place(7, 20.0, &mut rng), Zone::Center);
        assert_eq!(place(9, 50.0, &mut rng), Zone::Center);
        assert_eq!(place(9, 27.5, &mut rng), Zone::Bottom);
    }

    #[test]
    fn cue_seven_picks_some_zone() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(place(7, 34.0, &mut rng));
        }
        assert_eq!(seen.len(), ZONES.len());
    }

    #[test]
    fn entrance_settles_after_duration() {
        for entrance in ENTRANCES {
            let start = entrance.sample(0.0);
            assert_eq!(start.alpha, 0.0);
            assert_eq!(entrance.sample(ENTRANCE_DURATION), EntranceFrame::SETTLED);
        }
        assert_eq!(Entrance::Zoom.sample(0.0).scale, 0.5);
        assert!(Entrance::Left.sample(0.0).dx < 0.0);
        assert!(Entrance::Right.sample(0.0).dx > 0.0);
    }

    #[test]
    fn one_cue_per_tick_when_catching_up() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut player = LyricPlayer::standard();
        assert_eq!(player.tick(30.0, &mut rng).map(|c| c.index), Some(0));
        assert_eq!(player.tick(30.0, &mut rng).map(|c| c.index), Some(1));
        assert_eq!(player.fired(), 2);
        assert_eq!(player.current().unwrap().index, 1);
    }

    #[test]
    fn keeps_polling_after_the_last_cue() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut player = LyricPlayer::new(vec![LyricCue::new("only", 1.0).last()]).unwrap();
        assert!(player.tick(0.5, &mut rng).is_none());
        assert!(player.tick(1.0, &mut rng).is_some());
        assert!(player.is_exhausted());
        assert!(player.tick(100.0, &mut rng).is_none());
        assert_eq!(player.current().unwrap().text, "only");
    }
}
