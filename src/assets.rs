use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use exif::{In, Reader, Tag, Value};
use serde::Serialize;

/// The six photos the show references by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Photo {
    PortraitFront,
    PortraitBack,
    Intermediate,
    LandscapeLeft,
    Final,
    LandscapeRight,
}

pub const PHOTOS: [Photo; 6] = [
    Photo::PortraitFront,
    Photo::PortraitBack,
    Photo::Intermediate,
    Photo::LandscapeLeft,
    Photo::Final,
    Photo::LandscapeRight,
];

impl Photo {
    pub fn file_name(self) -> &'static str {
        match self {
            Photo::PortraitFront => "foto1.jpg",
            Photo::PortraitBack => "foto2.jpg",
            Photo::Intermediate => "foto3.jpg",
            Photo::LandscapeLeft => "foto4.png",
            Photo::Final => "foto5.png",
            Photo::LandscapeRight => "foto6.jpg",
        }
    }
}

pub const DEFAULT_AUDIO: &str = "song.mp3";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum AssetStatus {
    /// File is there. `orientation` is the EXIF orientation tag (1 when absent).
    Ready { orientation: u16 },
    /// File is absent or unreadable; its element is hidden.
    Missing,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhotoAsset {
    pub photo: Photo,
    pub path: PathBuf,
    pub status: AssetStatus,
}

impl PhotoAsset {
    pub fn is_ready(&self) -> bool {
        matches!(self.status, AssetStatus::Ready { .. })
    }

    pub fn orientation(&self) -> u16 {
        match self.status {
            AssetStatus::Ready { orientation } => orientation,
            AssetStatus::Missing => 1,
        }
    }
}

/// Resolved show assets. Probing never fails: anything that cannot be read is marked
/// missing and the show carries on without it.
#[derive(Debug, Clone, Serialize)]
pub struct AssetCatalog {
    pub photos: Vec<PhotoAsset>,
    pub audio: PathBuf,
    pub audio_present: bool,
}

impl AssetCatalog {
    pub fn probe(dir: &Path, audio: &Path) -> AssetCatalog {
        let photos = PHOTOS
            .iter()
            .map(|&photo| {
                let path = dir.join(photo.file_name());
                let status = probe_image(&path);
                if status == AssetStatus::Missing {
                    tracing::warn!(path = %path.display(), ?photo, "photo unavailable, its element will be hidden");
                } else {
                    tracing::debug!(path = %path.display(), ?photo, ?status, "photo ready");
                }
                PhotoAsset { photo, path, status }
            })
            .collect();

        let audio_present = audio.is_file();
        if !audio_present {
            tracing::warn!(path = %audio.display(), "audio track not found, the show will run silent");
        }

        AssetCatalog { photos, audio: audio.to_path_buf(), audio_present }
    }

    /// Catalog with every asset missing, for runs that draw nothing.
    pub fn empty() -> AssetCatalog {
        AssetCatalog {
            photos: PHOTOS
                .iter()
                .map(|&photo| PhotoAsset {
                    photo,
                    path: PathBuf::from(photo.file_name()),
                    status: AssetStatus::Missing,
                })
                .collect(),
            audio: PathBuf::from(DEFAULT_AUDIO),
            audio_present: false,
        }
    }

    pub fn get(&self, photo: Photo) -> Option<&PhotoAsset> {
        self.photos.iter().find(|p| p.photo == photo)
    }

    pub fn missing(&self) -> impl Iterator<Item = Photo> + '_ {
        self.photos.iter().filter(|p| !p.is_ready()).map(|p| p.photo)
    }
}

fn probe_image(path: &Path) -> AssetStatus {
    if !path.is_file() {
        return AssetStatus::Missing;
    }
    match read_orientation(path) {
        Ok(orientation) => AssetStatus::Ready { orientation },
        Err(e) => {
            tracing::warn!(path = %path.display(), "cannot open photo: {e}");
            AssetStatus::Missing
        }
    }
}

/// EXIF orientation of a JPEG; 1 (no rotation) for other formats or when the tag is
/// absent or unreadable.
pub fn read_orientation(path: &Path) -> std::io::Result<u16> {
    let file = File::open(path)?;

    let extension = path.extension().and_then(|s| s.to_str()).unwrap_or("").to_lowercase();
    if extension != "jpg" && extension != "jpeg" {
        return Ok(1);
    }

    match Reader::new().read_from_container(&mut BufReader::new(file)) {
        Ok(exif) => {
            if let Some(field) = exif.get_field(Tag::Orientation, In::PRIMARY) {
                if let Value::Short(values) = &field.value {
                    if let Some(&orientation) = values.first() {
                        return Ok(orientation);
                    }
                }
            }
            Ok(1)
        }
        Err(e) => {
            tracing::debug!(path = %path.display(), "no EXIF data: {e}");
            Ok(1)
        }
    }
}
