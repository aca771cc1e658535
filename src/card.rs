//! The 3D portrait card that opens the show.
//!
//! The card rises from below, spins for a fixed stretch of clock time, then flies up and
//! fades. Rising and exiting advance by a fixed step per frame, so their length follows
//! the display's frame rate; the spin is gated on the show clock and does not.

use std::f32::consts::PI;

use serde::Serialize;

use crate::constants::*;
use crate::ease::{cubic_out, progress};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CardPhase {
    Rising,
    Spinning,
    Exiting,
    Done,
}

/// Card placement in scene units and radians. The camera looks at the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CardPose {
    pub y: f32,
    pub rot_x: f32,
    pub rot_y: f32,
}

impl CardPose {
    pub const START: CardPose = CardPose { y: RISE_FROM_Y, rot_x: 0.0, rot_y: 0.0 };
}

pub struct SpinningCard {
    phase: CardPhase,
    pose: CardPose,
    rise_progress: f32,
    spin_angle: f32,
    spin_started: f32,
    exit_progress: f32,
    done_at: Option<f32>,
    frames: u64,
}

impl Default for SpinningCard {
    fn default() -> Self {
        Self::new()
    }
}

impl SpinningCard {
    pub fn new() -> Self {
        Self {
            phase: CardPhase::Rising,
            pose: CardPose::START,
            rise_progress: 0.0,
            spin_angle: 0.0,
            spin_started: 0.0,
            exit_progress: 0.0,
            done_at: None,
            frames: 0,
        }
    }

    pub fn phase(&self) -> CardPhase {
        self.phase
    }

    pub fn pose(&self) -> CardPose {
        self.pose
    }

    pub fn is_done(&self) -> bool {
        self.phase == CardPhase::Done
    }

    /// Frames the card has been updated for; each one is rendered once.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Show clock time the spin started, once it has.
    pub fn done_at(&self) -> Option<f32> {
        self.done_at
    }

    /// Advances one frame at show clock time `now`. Returns the phase entered on this
    /// frame, if any. Does nothing once the card is done.
    pub fn update(&mut self, now: f32) -> Option<CardPhase> {
        if self.is_done() {
            return None;
        }
        self.frames += 1;

        let entered = match self.phase {
            CardPhase::Rising => {
                self.rise_progress += RISE_STEP;
                self.pose.y = RISE_FROM_Y - RISE_FROM_Y * cubic_out(self.rise_progress);
                self.pose.rot_y = (self.rise_progress * PI).sin() * RISE_SWAY;

                if self.rise_progress >= 1.0 {
                    // Per-frame steps drift, land exactly on center.
                    self.pose.y = 0.0;
                    self.spin_started = now;
                    Some(CardPhase::Spinning)
                } else {
                    None
                }
            }
            CardPhase::Spinning => {
                self.spin_angle -= SPIN_STEP;
                self.pose.rot_y = self.spin_angle;
                self.pose.y = (self.spin_angle * 0.5).sin() * SPIN_BOB;

                if now - self.spin_started >= SPIN_DURATION {
                    Some(CardPhase::Exiting)
                } else {
                    None
                }
            }
            CardPhase::Exiting => {
                self.exit_progress += EXIT_STEP;
                self.pose.y = self.exit_progress * EXIT_RISE;
                self.pose.rot_x = -self.exit_progress * EXIT_TILT;

                if self.exit_progress >= 1.0 {
                    self.done_at = Some(now);
                    Some(CardPhase::Done)
                } else {
                    None
                }
            }
            CardPhase::Done => None,
        };

        if let Some(phase) = entered {
            tracing::info!(?phase, at = now, frame = self.frames, "card phase");
            self.phase = phase;
        }
        tracing::trace!(y = self.pose.y, rot_x = self.pose.rot_x, rot_y = self.pose.rot_y, "card pose");
        entered
    }

    /// Opacity at show clock time `now`; fades out after the card is done.
    pub fn opacity(&self, now: f32) -> f32 {
        match self.done_at {
            Some(done_at) => 1.0 - progress(now - done_at, CARD_FADE_OUT),
            None => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Face {
    Front,
    Back,
}

/// Where the card lands in its viewport, as fractions of the viewport size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardProjection {
    pub center_x: f32,
    pub center_y: f32,
    pub width: f32,
    pub height: f32,
    pub face: Face,
}

pub const CARD_WIDTH: f32 = 2.2;
pub const CARD_HEIGHT: f32 = 3.0;
pub const CAMERA_Z: f32 = 5.0;
pub const CAMERA_FOV_Y: f32 = 50.0;
pub const VIEWPORT_ASPECT: f32 = 300.0 / 400.0;

/// Projects `pose` through the fixed perspective camera. Rotation shows up as
/// foreshortening of the card's width (around Y) and height (around X).
pub fn project(pose: CardPose) -> CardProjection {
    let half_height = (CAMERA_FOV_Y.to_radians() * 0.5).tan() * CAMERA_Z;
    let half_width = half_height * VIEWPORT_ASPECT;

    let (cos_x, cos_y) = (pose.rot_x.cos(), pose.rot_y.cos());
    let face = if cos_x * cos_y >= 0.0 { Face::Front } else { Face::Back };

    CardProjection {
        center_x: 0.5,
        center_y: 0.5 - pose.y / (2.0 * half_height),
        width: CARD_WIDTH / (2.0 * half_width) * cos_y.abs(),
        height: CARD_HEIGHT / (2.0 * half_height) * cos_x.abs(),
        face,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_rising_below_center() {
        let card = SpinningCard::new();
        assert_eq!(card.phase(), CardPhase::Rising);
        assert_eq!(card.pose(), CardPose::START);
        assert!(card.done_at().is_none());
    }

    #[test]
    fn rising_snaps_to_center() {
        let mut card = SpinningCard::new();
        let mut frames = 0;
        while card.phase() == CardPhase::Rising {
            card.update(frames as f32 * FRAME_TIME);
            frames += 1;
            assert!(frames < 100);
        }
        assert_eq!(card.pose().y, 0.0);
        assert!((49..=51).contains(&frames));
    }

    #[test]
    fn update_is_inert_when_done() {
        let mut card = SpinningCard::new();
        let mut now = 0.0;
        while !card.is_done() {
            card.update(now);
            now += FRAME_TIME;
        }
        let frames = card.frames();
        let pose = card.pose();
        assert!(card.update(now + 1.0).is_none());
        assert_eq!(card.frames(), frames);
        assert_eq!(card.pose(), pose);
    }

    #[test]
    fn fades_after_done() {
        let mut card = SpinningCard::new();
        let mut now = 0.0;
        while !card.is_done() {
            card.update(now);
            now += FRAME_TIME;
        }
        let done_at = card.done_at().unwrap();
        assert_eq!(card.opacity(done_at), 1.0);
        assert!((card.opacity(done_at + CARD_FADE_OUT * 0.5) - 0.5).abs() < 1e-4);
        assert_eq!(card.opacity(done_at + CARD_FADE_OUT), 0.0);
    }

    #[test]
    fn projection_at_rest_faces_front_and_centers() {
        let p = project(CardPose { y: 0.0, rot_x: 0.0, rot_y: 0.0 });
        assert_eq!(p.face, Face::Front);
        assert!((p.center_y - 0.5).abs() < 1e-6);
        assert!(p.height > 0.6 && p.height < 0.7);
        assert!(p.width > 0.6 && p.width < 0.65);
    }

    #[test]
    fn projection_shows_back_after_half_turn() {
        let p = project(CardPose { y: 0.0, rot_x: 0.0, rot_y: -PI });
        assert_eq!(p.face, Face::Back);
        let edge_on = project(CardPose { y: 0.0, rot_x: 0.0, rot_y: PI / 2.0 });
        assert!(edge_on.width < 1e-3);
    }

    #[test]
    fn projection_moves_up_with_y() {
        let below = project(CardPose::START);
        let above = project(CardPose { y: 15.0, rot_x: -0.5, rot_y: 0.0 });
        assert!(below.center_y > 1.0);
        assert!(above.center_y < 0.0);
    }
}
