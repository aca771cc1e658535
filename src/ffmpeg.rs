use std::io::Write;
use std::path::Path;
use std::process::{Child, ChildStdin, Command, Stdio};

use crate::error::{ShowError, ShowResult};

/// Streams raw RGBA frames into a system `ffmpeg` process that encodes an MP4.
pub struct Ffmpeg {
    process: Child,
    stdin: Option<ChildStdin>,
    width: usize,
    height: usize,
    frames: u64,
}

impl Ffmpeg {
    pub fn new(width: i32, height: i32, fps: u32, video_name: &Path) -> ShowResult<Ffmpeg> {
        if width <= 0 || height <= 0 {
            return Err(ShowError::encoder(format!("invalid frame size {width}x{height}")));
        }
        let mut process = Command::new("ffmpeg")
            .stdin(Stdio::piped())
            .args(["-loglevel", "error"])
            .arg("-y")
            .args(["-f", "rawvideo"])
            .args(["-pixel_format", "rgba"])
            .args(["-video_size", &format!("{}x{}", width, height)])
            .args(["-framerate", &format!("{}", fps)])
            .args(["-i", "-"])
            .args(["-c:v", "libx264"])
            .args(["-pix_fmt", "yuv420p"])
            .arg(video_name)
            .spawn()
            .map_err(|e| ShowError::encoder(format!("failed to start ffmpeg: {e}")))?;
        let stdin = process
            .stdin
            .take()
            .ok_or_else(|| ShowError::encoder("failed to open ffmpeg stdin"))?;
        tracing::info!(path = %video_name.display(), width, height, fps, "recording");
        Ok(Ffmpeg { process, stdin: Some(stdin), width: width as usize, height: height as usize, frames: 0 })
    }

    /// Writes one frame given bottom-up RGBA rows, as read back from a GPU render target.
    pub fn write_bottom_up(&mut self, rgba: &[u8]) -> ShowResult<()> {
        let flipped = flip_rows(rgba, self.width, self.height)?;
        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| ShowError::encoder("ffmpeg stdin already closed"))?;
        stdin
            .write_all(&flipped)
            .map_err(|e| ShowError::encoder(format!("failed to write frame {}: {e}", self.frames)))?;
        self.frames += 1;
        Ok(())
    }

    /// Closes the pipe and waits for ffmpeg to finish the file.
    pub fn finish(mut self) -> ShowResult<()> {
        self.stdin = None;
        let status = self.process.wait()?;
        if !status.success() {
            return Err(ShowError::encoder(format!("ffmpeg exited with {status}")));
        }
        tracing::info!(frames = self.frames, "recording finished");
        Ok(())
    }
}

impl Drop for Ffmpeg {
    fn drop(&mut self) {
        if self.stdin.take().is_some() {
            if let Err(e) = self.process.wait() {
                tracing::warn!("failed to wait for ffmpeg: {e}");
            }
        }
    }
}

/// Reverses the row order of a tightly packed RGBA frame.
pub fn flip_rows(rgba: &[u8], width: usize, height: usize) -> ShowResult<Vec<u8>> {
    let stride = width * 4;
    if rgba.len() != stride * height {
        return Err(ShowError::encoder(format!(
            "frame is {} bytes, expected {} for {width}x{height}",
            rgba.len(),
            stride * height
        )));
    }
    let mut out = Vec::with_capacity(rgba.len());
    for row in rgba.chunks_exact(stride).rev() {
        out.extend_from_slice(row);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flips_rows_top_to_bottom() {
        let frame: Vec<u8> = (0..16).collect();
        let flipped = flip_rows(&frame, 2, 2).unwrap();
        assert_eq!(&flipped[..8], &frame[8..]);
        assert_eq!(&flipped[8..], &frame[..8]);
    }

    #[test]
    fn rejects_short_frames() {
        assert!(flip_rows(&[0; 10], 2, 2).is_err());
    }
}
