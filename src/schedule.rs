//! One-shot card events bound to fixed show clock offsets.

use serde::Serialize;

use crate::assets::Photo;
use crate::constants::*;
use crate::error::{ShowError, ShowResult};

/// The flat photo cards that come and go during the show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CardKind {
    /// Two landscape photos swiping in from the left and the right.
    LandscapePair,
    /// Portrait photo floating in the gap between the lyrics.
    Intermediate,
    /// Captioned photo that closes the show and stays.
    Final,
}

pub const CARD_KINDS: [CardKind; 3] = [CardKind::LandscapePair, CardKind::Intermediate, CardKind::Final];

impl CardKind {
    pub fn photos(self) -> &'static [Photo] {
        match self {
            CardKind::LandscapePair => &[Photo::LandscapeLeft, Photo::LandscapeRight],
            CardKind::Intermediate => &[Photo::Intermediate],
            CardKind::Final => &[Photo::Final],
        }
    }

    pub fn caption(self) -> Option<&'static str> {
        match self {
            CardKind::Final => Some("Untuk Putri 💕"),
            _ => None,
        }
    }

    pub fn overlay(self) -> Option<&'static str> {
        match self {
            CardKind::Final => Some("🤍"),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "card", rename_all = "kebab-case")]
pub enum ShowAction {
    /// Card enters the page.
    Present(CardKind),
    /// Card starts its exit transition.
    Dismiss(CardKind),
    /// Exit transition is over; the card leaves the page.
    Remove(CardKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScheduledEvent {
    pub at: f32,
    pub action: ShowAction,
}

impl ScheduledEvent {
    pub fn new(at: f32, action: ShowAction) -> Self {
        Self { at, action }
    }
}

/// Card introductions with their exits relative to the introduction.
pub fn standard_events() -> Vec<ScheduledEvent> {
    let landscape_exit = LANDSCAPE_AT + LANDSCAPE_DWELL;
    let intermediate_exit = INTERMEDIATE_AT + INTERMEDIATE_DWELL;
    vec![
        ScheduledEvent::new(LANDSCAPE_AT, ShowAction::Present(CardKind::LandscapePair)),
        ScheduledEvent::new(landscape_exit, ShowAction::Dismiss(CardKind::LandscapePair)),
        ScheduledEvent::new(landscape_exit + REMOVE_AFTER, ShowAction::Remove(CardKind::LandscapePair)),
        ScheduledEvent::new(INTERMEDIATE_AT, ShowAction::Present(CardKind::Intermediate)),
        ScheduledEvent::new(intermediate_exit, ShowAction::Dismiss(CardKind::Intermediate)),
        ScheduledEvent::new(intermediate_exit + REMOVE_AFTER, ShowAction::Remove(CardKind::Intermediate)),
        ScheduledEvent::new(FINAL_AT, ShowAction::Present(CardKind::Final)),
    ]
}

pub struct Scheduler {
    events: Vec<ScheduledEvent>,
    next: usize,
}

impl Scheduler {
    /// Orders `events` by offset. Offsets must be finite, non-negative and distinct.
    pub fn new(mut events: Vec<ScheduledEvent>) -> ShowResult<Self> {
        if let Some(bad) = events.iter().find(|e| !e.at.is_finite() || e.at < 0.0) {
            return Err(ShowError::timeline(format!(
                "{:?} has invalid offset {}",
                bad.action, bad.at
            )));
        }
        events.sort_by(|a, b| a.at.total_cmp(&b.at));
        if let Some(pair) = events.windows(2).find(|w| w[0].at == w[1].at) {
            return Err(ShowError::timeline(format!(
                "{:?} and {:?} are both scheduled at {}s",
                pair[0].action, pair[1].action, pair[0].at
            )));
        }
        Ok(Self { events, next: 0 })
    }

    pub fn standard() -> ShowResult<Self> {
        Self::new(standard_events())
    }

    pub fn events(&self) -> &[ScheduledEvent] {
        &self.events
    }

    pub fn fired(&self) -> usize {
        self.next
    }

    pub fn is_exhausted(&self) -> bool {
        self.next >= self.events.len()
    }

    /// Fires, in offset order, every event whose offset `elapsed` has reached.
    pub fn tick(&mut self, elapsed: f32) -> &[ScheduledEvent] {
        let start = self.next;
        while let Some(event) = self.events.get(self.next) {
            if elapsed.is_nan() || elapsed < event.at {
                break;
            }
            tracing::info!(at = event.at, fired_at = elapsed, action = ?event.action, "scheduled event");
            self.next += 1;
        }
        &self.events[start..self.next]
    }
}
