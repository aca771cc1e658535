use std::collections::HashMap;
use std::fs;

use raylib::prelude::*;

use crate::assets::{AssetCatalog, Photo, PhotoAsset};
use crate::error::{ShowError, ShowResult};

// --- Load Image, Apply EXIF Rotation, Create Texture ---
pub fn load_texture_with_exif_rotation(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    asset: &PhotoAsset,
) -> ShowResult<Texture2D> {
    let file_bytes = fs::read(&asset.path)?;
    let extension = asset.path.extension().and_then(|s| s.to_str()).unwrap_or("").to_lowercase();

    let mut image = Image::load_image_from_mem(&format!(".{extension}"), &file_bytes)
        .map_err(|e| ShowError::asset(format!("failed to decode {}: {e}", asset.path.display())))?;

    // 1 = normal, 3 = 180 deg, 6 = 90 deg CW, 8 = 90 deg CCW. Flipped variants are left as is.
    match asset.orientation() {
        3 => {
            image.rotate_cw();
            image.rotate_cw();
        }
        6 => image.rotate_cw(),
        8 => image.rotate_ccw(),
        _ => {}
    }

    rl.load_texture_from_image(thread, &image)
        .map_err(|e| ShowError::asset(format!("failed to create texture for {}: {e}", asset.path.display())))
}

/// Textures for every photo that probed ready. A photo that fails here is left out, and
/// its element is drawn without it.
pub fn load_textures(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    catalog: &AssetCatalog,
) -> HashMap<Photo, Texture2D> {
    let mut textures = HashMap::new();
    for asset in catalog.photos.iter().filter(|a| a.is_ready()) {
        match load_texture_with_exif_rotation(rl, thread, asset) {
            Ok(texture) => {
                textures.insert(asset.photo, texture);
            }
            Err(e) => tracing::warn!(photo = ?asset.photo, "hiding photo: {e}"),
        }
    }
    textures
}
