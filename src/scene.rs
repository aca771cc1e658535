//! What is on the page at a given instant. The session writes it, drawers read it.

use serde::Serialize;

use crate::card::{CardPhase, CardPose};
use crate::constants::*;
use crate::ease::progress;
use crate::lyrics::Caption;
use crate::schedule::{CARD_KINDS, CardKind, ShowAction};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SlotStage {
    Absent,
    Visible,
    Exiting,
    Removed,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CardSlot {
    pub kind: CardKind,
    pub stage: SlotStage,
    pub changed_at: f32,
}

impl CardSlot {
    pub fn new(kind: CardKind) -> Self {
        Self { kind, stage: SlotStage::Absent, changed_at: 0.0 }
    }

    pub fn is_on_page(&self) -> bool {
        matches!(self.stage, SlotStage::Visible | SlotStage::Exiting)
    }

    /// How far the current transition has run: 0 when it starts, 1 once settled.
    pub fn transition(&self, now: f32) -> f32 {
        progress(now - self.changed_at, CARD_TRANSITION)
    }

    pub fn opacity(&self, now: f32) -> f32 {
        match self.stage {
            SlotStage::Visible => self.transition(now),
            SlotStage::Exiting => 1.0 - self.transition(now),
            SlotStage::Absent | SlotStage::Removed => 0.0,
        }
    }

    fn advance(&mut self, stage: SlotStage, at: f32) {
        if stage <= self.stage {
            tracing::warn!(kind = ?self.kind, from = ?self.stage, to = ?stage, "ignoring backwards card change");
            return;
        }
        self.stage = stage;
        self.changed_at = at;
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Scene {
    pub caption: Option<Caption>,
    pub slots: [CardSlot; 3],
    pub card_phase: CardPhase,
    pub card_pose: CardPose,
    pub card_opacity: f32,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self {
            caption: None,
            slots: CARD_KINDS.map(CardSlot::new),
            card_phase: CardPhase::Rising,
            card_pose: CardPose::START,
            card_opacity: 1.0,
        }
    }

    pub fn slot(&self, kind: CardKind) -> &CardSlot {
        let index = CARD_KINDS.iter().position(|k| *k == kind).unwrap_or_default();
        &self.slots[index]
    }

    pub fn apply(&mut self, action: ShowAction, at: f32) {
        let (kind, stage) = match action {
            ShowAction::Present(kind) => (kind, SlotStage::Visible),
            ShowAction::Dismiss(kind) => (kind, SlotStage::Exiting),
            ShowAction::Remove(kind) => (kind, SlotStage::Removed),
        };
        if let Some(slot) = self.slots.iter_mut().find(|s| s.kind == kind) {
            slot.advance(stage, at);
        }
    }
}
