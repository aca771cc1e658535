//! The windowed show: welcome page, song, and every scene element drawn with raylib.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use raylib::core::text::measure_text;
use raylib::prelude::*;

use crate::assets::Photo;
use crate::audio::{AudioOutput, start_audio};
use crate::card::{Face, project};
use crate::config::ShowConfig;
use crate::constants::*;
use crate::ease::cubic_out;
use crate::error::{ShowError, ShowResult};
use crate::ffmpeg::Ffmpeg;
use crate::lyrics::Caption;
use crate::scene::{CardSlot, Scene, SlotStage};
use crate::schedule::CardKind;
use crate::session::Session;
use crate::state::{Curtain, ShowState};
use crate::texture_loader::load_textures;

const BACKGROUND: Color = Color { r: 24, g: 12, b: 28, a: 255 };
const CAPTION: Color = Color { r: 255, g: 255, b: 255, a: 255 };
const HIGHLIGHT: Color = Color { r: 255, g: 182, b: 213, a: 255 };
const FRAME: Color = Color { r: 255, g: 250, b: 245, a: 255 };

// Card viewport: 300x400 page pixels, scaled to the render texture.
const VIEWPORT_SCALE: f32 = 2.5;

struct RaylibSong<'a> {
    music: Option<Music<'a>>,
}

impl AudioOutput for RaylibSong<'_> {
    fn play(&mut self) -> ShowResult<()> {
        let music = self.music.as_ref().ok_or_else(|| ShowError::audio("song could not be opened"))?;
        music.play_stream();
        Ok(())
    }
}

fn with_alpha(color: Color, alpha: f32) -> Color {
    Color { a: (color.a as f32 * alpha.clamp(0.0, 1.0)) as u8, ..color }
}

pub fn run(config: &ShowConfig) -> ShowResult<()> {
    config.validate_assets()?;
    let catalog = config.catalog();
    let mut session = Session::new(config.rng())?;

    let (mut rl, thread) = raylib::init()
        .size(RENDER_WIDTH / 3, RENDER_HEIGHT / 3)
        .title("Untuk Putri")
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(config.fps);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    let textures = load_textures(&mut rl, &thread, &catalog);

    let device = match RaylibAudio::init_audio_device() {
        Ok(device) => Some(device),
        Err(e) => {
            tracing::warn!("no audio device: {e}");
            None
        }
    };
    let audio_path = config.audio_path();
    let music = device.as_ref().and_then(|device| {
        device
            .new_music(&audio_path.to_string_lossy())
            .map_err(|e| tracing::warn!(path = %audio_path.display(), "cannot open song: {e}"))
            .ok()
    });
    let mut song = RaylibSong { music };

    let mut recorder = match &config.record {
        Some(path) => Some(Ffmpeg::new(RENDER_WIDTH, RENDER_HEIGHT, config.fps, path)?),
        None => None,
    };

    let mut framebuffer = rl
        .load_render_texture(&thread, RENDER_WIDTH as u32, RENDER_HEIGHT as u32)
        .map_err(|e| ShowError::asset(format!("failed to create render texture: {e}")))?;

    let mut curtain = Curtain::new();
    let started = Instant::now();
    let frame_time = Duration::from_secs_f32(config.frame_time());
    let mut frame: u32 = 0;

    // --- Main Loop ---
    while !rl.window_should_close() {
        // Recording runs on a fixed frame time so the video keeps the show's pace.
        let now = if recorder.is_some() { started + frame_time * frame } else { Instant::now() };
        frame = frame.saturating_add(1);

        let pressed = recorder.is_some()
            || rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT)
            || rl.is_key_pressed(KeyboardKey::KEY_ENTER)
            || rl.is_key_pressed(KeyboardKey::KEY_SPACE);
        if pressed && curtain.press(now) {
            start_audio(&mut song);
        }
        if let Some(music) = &song.music {
            music.update_stream();
        }

        let state = curtain.update(now);
        let elapsed = curtain.elapsed(now);
        if let (ShowState::Playing | ShowState::Finished, Some(elapsed)) = (state, elapsed) {
            session.tick(elapsed);
        }
        let welcome = curtain.welcome_opacity(now);

        rl.draw_texture_mode(&thread, &mut framebuffer, |mut tmd| {
            let mut d = tmd.begin_drawing(&thread);
            d.clear_background(BACKGROUND);
            if let Some(elapsed) = elapsed {
                draw_scene(&mut d, session.scene(), &textures, elapsed);
            }
            if welcome > 0.0 {
                draw_welcome(&mut d, welcome);
            }
        });

        let mut d = rl.begin_drawing(&thread);
        let sw = d.get_screen_width() as f32;
        let sh = d.get_screen_height() as f32;
        d.draw_texture_pro(
            &framebuffer,
            Rectangle::new(0.0, 0.0, framebuffer.width() as f32, -(framebuffer.height() as f32)),
            Rectangle::new(0.0, 0.0, sw, sh),
            Vector2::new(0.0, 0.0),
            0.0,
            Color::WHITE,
        );
        drop(d);

        if let Some(ffmpeg) = recorder.as_mut() {
            let image = framebuffer
                .load_image()
                .map_err(|e| ShowError::encoder(format!("failed to read back frame: {e}")))?;
            let rgba: Vec<u8> = image.get_image_data().iter().flat_map(|c| [c.r, c.g, c.b, c.a]).collect();
            ffmpeg.write_bottom_up(&rgba)?;
            if state == ShowState::Finished {
                break;
            }
        }
    }

    if let Some(ffmpeg) = recorder {
        ffmpeg.finish()?;
    }
    Ok(())
}

fn draw_welcome(d: &mut impl RaylibDraw, opacity: f32) {
    let w = RENDER_WIDTH as f32;
    let h = RENDER_HEIGHT as f32;
    d.draw_rectangle(0, 0, RENDER_WIDTH, RENDER_HEIGHT, with_alpha(BACKGROUND, opacity));

    let title = "Untuk Putri";
    let size = 96;
    d.draw_text(title, ((w - measure_text(title, size) as f32) * 0.5) as i32, (h * 0.38) as i32, size, with_alpha(HIGHLIGHT, opacity));

    let button = Rectangle::new(w * 0.3, h * 0.52, w * 0.4, 120.0);
    d.draw_rectangle_rounded(button, 0.5, 16, with_alpha(HIGHLIGHT, opacity));
    let label = "Buka";
    let label_size = 56;
    d.draw_text(
        label,
        (button.x + (button.width - measure_text(label, label_size) as f32) * 0.5) as i32,
        (button.y + (button.height - label_size as f32) * 0.5) as i32,
        label_size,
        with_alpha(BACKGROUND, opacity),
    );
}

fn draw_scene(d: &mut impl RaylibDraw, scene: &Scene, textures: &HashMap<Photo, Texture2D>, now: f32) {
    draw_spinning_card(d, scene, textures);
    for slot in scene.slots.iter().filter(|s| s.is_on_page()) {
        draw_slot(d, slot, textures, now);
    }
    if let Some(caption) = &scene.caption {
        draw_caption(d, caption, now);
    }
}

fn draw_spinning_card(d: &mut impl RaylibDraw, scene: &Scene, textures: &HashMap<Photo, Texture2D>) {
    if scene.card_opacity <= 0.0 {
        return;
    }
    let vw = 300.0 * VIEWPORT_SCALE;
    let vh = 400.0 * VIEWPORT_SCALE;
    let vx = (RENDER_WIDTH as f32 - vw) * 0.5;
    let vy = (RENDER_HEIGHT as f32 - vh) * 0.5;

    let p = project(scene.card_pose);
    let dest = Rectangle::new(vx + p.center_x * vw, vy + p.center_y * vh, p.width * vw, p.height * vh);
    let origin = Vector2::new(dest.width * 0.5, dest.height * 0.5);
    let tint = with_alpha(Color::WHITE, scene.card_opacity);

    let photo = match p.face {
        Face::Front => Photo::PortraitFront,
        Face::Back => Photo::PortraitBack,
    };
    match textures.get(&photo) {
        Some(texture) => {
            let tw = texture.width() as f32;
            // The back face is seen mirrored.
            let source_width = if p.face == Face::Back { -tw } else { tw };
            d.draw_texture_pro(texture, Rectangle::new(0.0, 0.0, source_width, texture.height() as f32), dest, origin, 0.0, tint);
        }
        None => d.draw_rectangle_pro(dest, origin, 0.0, with_alpha(FRAME, scene.card_opacity)),
    }
}

fn draw_photo(d: &mut impl RaylibDraw, texture: Option<&Texture2D>, center: Vector2, width: f32, alpha: f32) {
    let aspect = texture.map_or(0.75, |t| t.height() as f32 / t.width().max(1) as f32);
    let height = width * aspect;
    let border = 24.0;
    let frame = Rectangle::new(center.x - width * 0.5 - border, center.y - height * 0.5 - border, width + border * 2.0, height + border * 2.0);
    d.draw_rectangle_rounded(frame, 0.06, 8, with_alpha(FRAME, alpha));

    if let Some(texture) = texture {
        d.draw_texture_pro(
            texture,
            Rectangle::new(0.0, 0.0, texture.width() as f32, texture.height() as f32),
            Rectangle::new(center.x - width * 0.5, center.y - height * 0.5, width, height),
            Vector2::new(0.0, 0.0),
            0.0,
            with_alpha(Color::WHITE, alpha),
        );
    }
}

fn draw_slot(d: &mut impl RaylibDraw, slot: &CardSlot, textures: &HashMap<Photo, Texture2D>, now: f32) {
    let w = RENDER_WIDTH as f32;
    let h = RENDER_HEIGHT as f32;
    let alpha = slot.opacity(now);
    let eased = cubic_out(slot.transition(now));
    // 0 when settled, 1 when fully off to the side.
    let away = match slot.stage {
        SlotStage::Visible => 1.0 - eased,
        SlotStage::Exiting => eased,
        SlotStage::Absent | SlotStage::Removed => 1.0,
    };

    match slot.kind {
        CardKind::LandscapePair => {
            let shift = away * w * 0.8;
            draw_photo(d, textures.get(&Photo::LandscapeLeft), Vector2::new(w * 0.5 - shift, h * 0.3), w * 0.8, alpha);
            draw_photo(d, textures.get(&Photo::LandscapeRight), Vector2::new(w * 0.5 + shift, h * 0.7), w * 0.8, alpha);
        }
        CardKind::Intermediate => {
            let rise = away * h * 0.05;
            draw_photo(d, textures.get(&Photo::Intermediate), Vector2::new(w * 0.5, h * 0.5 + rise), w * 0.6, alpha);
        }
        CardKind::Final => {
            let center = Vector2::new(w * 0.5, h * 0.45 + away * h * 0.05);
            let width = w * 0.65;
            draw_photo(d, textures.get(&Photo::Final), center, width, alpha);
            if let Some(caption) = slot.kind.caption() {
                let size = 64;
                let y = center.y + width * 0.7 + 40.0;
                d.draw_text(caption, ((w - measure_text(caption, size) as f32) * 0.5) as i32, y as i32, size, with_alpha(HIGHLIGHT, alpha));
            }
            if let Some(overlay) = slot.kind.overlay() {
                d.draw_text(overlay, (center.x + width * 0.5 - 60.0) as i32, (center.y - width * 0.6) as i32, 72, with_alpha(CAPTION, alpha));
            }
        }
    }
}

fn draw_caption(d: &mut impl RaylibDraw, caption: &Caption, now: f32) {
    let w = RENDER_WIDTH as f32;
    let h = RENDER_HEIGHT as f32;
    let entrance = caption.entrance_at(now);

    let base = if caption.highlight { 72.0 } else { 56.0 };
    let size = (base * entrance.scale).round() as i32;
    // No blur filter here, fade harder instead.
    let alpha = entrance.alpha * (1.0 - entrance.blur / 20.0);
    let color = if caption.highlight { HIGHLIGHT } else { CAPTION };

    let width = measure_text(&caption.text, size) as f32;
    let x = (w - width) * 0.5 + entrance.dx * w;
    let y = caption.zone.anchor_y() * h + entrance.dy * h - size as f32 * 0.5;
    d.draw_text(&caption.text, x as i32, y as i32, size, with_alpha(color, alpha));
}
