use std::time::{Duration, Instant};

use crate::clock::ShowClock;
use crate::constants::*;
use crate::ease::progress;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ShowState {
    Welcome,  // Welcome page, waiting for the press
    Entering, // Welcome page fading out, song starting
    Playing,  // Show clock running
    Finished, // Song over, last frame stays up
}

/// Page-level flow around the show: welcome page, the press, the fade into the show
/// and the end of the song.
#[derive(Debug)]
pub struct Curtain {
    state: ShowState,
    pressed_at: Option<Instant>,
    clock: Option<ShowClock>,
}

impl Default for Curtain {
    fn default() -> Self {
        Self::new()
    }
}

impl Curtain {
    pub fn new() -> Self {
        Self { state: ShowState::Welcome, pressed_at: None, clock: None }
    }

    pub fn state(&self) -> ShowState {
        self.state
    }

    pub fn clock(&self) -> Option<ShowClock> {
        self.clock
    }

    /// The one input of the show. Only the first press counts.
    pub fn press(&mut self, now: Instant) -> bool {
        if self.state != ShowState::Welcome {
            return false;
        }
        tracing::info!("entering the show");
        self.pressed_at = Some(now);
        self.state = ShowState::Entering;
        true
    }

    pub fn update(&mut self, now: Instant) -> ShowState {
        match self.state {
            ShowState::Welcome | ShowState::Finished => {}
            ShowState::Entering => {
                if let Some(pressed_at) = self.pressed_at {
                    let origin = pressed_at + Duration::from_secs_f32(ENTER_DELAY);
                    if now >= origin {
                        self.clock = Some(ShowClock::started_at(origin));
                        self.state = ShowState::Playing;
                        tracing::info!("show clock started");
                    }
                }
            }
            ShowState::Playing => {
                if self.elapsed(now).is_some_and(|t| t >= SHOW_LENGTH) {
                    self.state = ShowState::Finished;
                    tracing::info!("song finished");
                }
            }
        }
        self.state
    }

    /// Show clock reading, once the show has started.
    pub fn elapsed(&self, now: Instant) -> Option<f32> {
        self.clock.map(|clock| clock.elapsed_at(now))
    }

    /// Opacity of the welcome page, fading out over the enter delay.
    pub fn welcome_opacity(&self, now: Instant) -> f32 {
        match (self.state, self.pressed_at) {
            (ShowState::Welcome, _) => 1.0,
            (ShowState::Entering, Some(pressed_at)) => {
                1.0 - progress(now.saturating_duration_since(pressed_at).as_secs_f32(), ENTER_DELAY)
            }
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_starts_after_the_enter_delay() {
        let t0 = Instant::now();
        let mut curtain = Curtain::new();
        assert_eq!(curtain.update(t0), ShowState::Welcome);
        assert!(curtain.press(t0));
        assert!(!curtain.press(t0));

        assert_eq!(curtain.update(t0 + Duration::from_millis(500)), ShowState::Entering);
        assert!(curtain.elapsed(t0 + Duration::from_millis(500)).is_none());
        assert!((curtain.welcome_opacity(t0 + Duration::from_millis(500)) - 0.5).abs() < 1e-3);

        assert_eq!(curtain.update(t0 + Duration::from_millis(1200)), ShowState::Playing);
        let elapsed = curtain.elapsed(t0 + Duration::from_millis(3000)).unwrap();
        assert!((elapsed - 2.0).abs() < 1e-3);
    }

    #[test]
    fn finishes_with_the_song() {
        let t0 = Instant::now();
        let mut curtain = Curtain::new();
        curtain.press(t0);
        curtain.update(t0 + Duration::from_secs(1));
        assert_eq!(curtain.update(t0 + Duration::from_secs(52)), ShowState::Playing);
        assert_eq!(curtain.update(t0 + Duration::from_secs(53)), ShowState::Finished);
        assert_eq!(curtain.welcome_opacity(t0 + Duration::from_secs(53)), 0.0);
    }
}
