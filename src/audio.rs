use crate::error::ShowResult;

/// Something that can start the show's song.
pub trait AudioOutput {
    fn play(&mut self) -> ShowResult<()>;
}

/// Output for runs without a sound device.
#[derive(Debug, Default)]
pub struct Silent;

impl AudioOutput for Silent {
    fn play(&mut self) -> ShowResult<()> {
        tracing::debug!("no audio device, playing silently");
        Ok(())
    }
}

/// Starts playback. A refusal is logged and the show continues without sound, the
/// visuals follow the show clock either way.
pub fn start_audio(output: &mut dyn AudioOutput) -> bool {
    match output.play() {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("audio playback blocked: {e}");
            false
        }
    }
}
