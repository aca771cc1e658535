//! One viewing session: the lyric player, the event scheduler and the spinning card,
//! advanced together by one `tick` per frame.

use rand::Rng;
use serde::Serialize;

use crate::card::{CardPhase, SpinningCard};
use crate::error::ShowResult;
use crate::lyrics::{Caption, LyricCue, LyricPlayer};
use crate::scene::Scene;
use crate::schedule::{ScheduledEvent, Scheduler, ShowAction};

/// Everything that changed during one tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TickReport {
    pub at: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<Caption>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<ShowAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_phase: Option<CardPhase>,
}

impl TickReport {
    pub fn is_quiet(&self) -> bool {
        self.caption.is_none() && self.actions.is_empty() && self.card_phase.is_none()
    }
}

pub struct Session<R: Rng> {
    lyrics: LyricPlayer,
    scheduler: Scheduler,
    card: SpinningCard,
    scene: Scene,
    rng: R,
    last_tick: f32,
}

impl<R: Rng> Session<R> {
    /// Session over the song's own lyric and card tables.
    pub fn new(rng: R) -> ShowResult<Self> {
        Ok(Self::assemble(LyricPlayer::standard(), Scheduler::standard()?, rng))
    }

    pub fn with_timeline(cues: Vec<LyricCue>, events: Vec<ScheduledEvent>, rng: R) -> ShowResult<Self> {
        Ok(Self::assemble(LyricPlayer::new(cues)?, Scheduler::new(events)?, rng))
    }

    fn assemble(lyrics: LyricPlayer, scheduler: Scheduler, rng: R) -> Self {
        Self {
            lyrics,
            scheduler,
            card: SpinningCard::new(),
            scene: Scene::new(),
            rng,
            last_tick: 0.0,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn lyrics(&self) -> &LyricPlayer {
        &self.lyrics
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn card(&self) -> &SpinningCard {
        &self.card
    }

    /// Advances the show to `elapsed` seconds on the show clock. A timestamp earlier than
    /// the previous tick is treated as the previous tick.
    pub fn tick(&mut self, elapsed: f32) -> TickReport {
        let at = if elapsed.is_nan() { self.last_tick } else { elapsed.max(self.last_tick) };
        self.last_tick = at;

        let mut report = TickReport { at, ..TickReport::default() };

        for event in self.scheduler.tick(at) {
            self.scene.apply(event.action, at);
            report.actions.push(event.action);
        }

        if let Some(caption) = self.lyrics.tick(at, &mut self.rng) {
            report.caption = Some(caption.clone());
            self.scene.caption = Some(caption.clone());
        }

        if !self.card.is_done() {
            report.card_phase = self.card.update(at);
            self.scene.card_phase = self.card.phase();
            self.scene.card_pose = self.card.pose();
        }
        self.scene.card_opacity = self.card.opacity(at);

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::CardKind;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn quiet_before_the_first_cue() {
        let mut session = Session::new(StdRng::seed_from_u64(7)).unwrap();
        let report = session.tick(0.5);
        assert!(report.is_quiet());
        assert!(session.scene().caption.is_none());
    }

    #[test]
    fn clock_going_backwards_is_ignored() {
        let mut session = Session::new(StdRng::seed_from_u64(7)).unwrap();
        session.tick(14.0);
        let report = session.tick(3.0);
        assert_eq!(report.at, 14.0);
        assert!(session.scene().slot(CardKind::LandscapePair).is_on_page());
    }

    #[test]
    fn custom_timeline_is_validated() {
        let result = Session::with_timeline(
            vec![LyricCue::new("x", 2.0), LyricCue::new("y", 1.0)],
            Vec::new(),
            StdRng::seed_from_u64(1),
        );
        assert!(result.is_err());
    }
}
