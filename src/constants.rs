pub const RENDER_WIDTH: i32 = 1080;           // Width of the render texture (portrait phone page)
pub const RENDER_HEIGHT: i32 = 1920;          // Height of the render texture
pub const FPS: u32 = 60;                      // Frames per second
pub const FRAME_TIME: f32 = 1.0 / FPS as f32; // Time per frame (seconds)

pub const SHOW_LENGTH: f32 = 52.0;            // Length of the song the show is cut to (seconds)
pub const ENTER_DELAY: f32 = 1.0;             // Welcome page fade before the show clock starts (seconds)

pub const ENTRANCE_DURATION: f32 = 0.8;       // Caption entrance animation (seconds)
pub const CARD_TRANSITION: f32 = 1.0;         // Photo card slide/fade in and out (seconds)
pub const CARD_FADE_OUT: f32 = 0.5;           // Spinning card fade after its exit (seconds)

// Spinning card, per-frame steps
pub const RISE_STEP: f32 = 0.02;
pub const SPIN_STEP: f32 = 0.015;
pub const EXIT_STEP: f32 = 0.04;
pub const SPIN_DURATION: f32 = 10.0;          // Clock time spent spinning (seconds)
pub const RISE_FROM_Y: f32 = -10.0;           // Scene units below center
pub const EXIT_RISE: f32 = 15.0;              // Scene units travelled while exiting
pub const EXIT_TILT: f32 = 0.5;               // Radians of forward tilt while exiting
pub const RISE_SWAY: f32 = 0.5;               // Radians of sway while rising
pub const SPIN_BOB: f32 = 0.1;                // Scene units of bob while spinning

// Photo card schedule (seconds since the show clock started)
pub const LANDSCAPE_AT: f32 = 13.0;
pub const LANDSCAPE_DWELL: f32 = 12.0;
pub const INTERMEDIATE_AT: f32 = 30.0;
pub const INTERMEDIATE_DWELL: f32 = 15.0;
pub const FINAL_AT: f32 = 50.0;
pub const REMOVE_AFTER: f32 = 1.0;            // Exit transition length before a card is removed

// Caption zone override windows
pub const CENTER_WINDOW: (f32, f32) = (15.0, 27.0);
pub const CENTER_FROM: f32 = 50.0;
