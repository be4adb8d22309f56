use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use raylib::prelude::*;
use exif::{In, Reader, Tag, Value};
use thiserror::Error;
use tracing::{debug, warn};

use crate::slider::SliderImage;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {path:?}: {reason}")]
    Decode { path: PathBuf, reason: String },
    #[error("failed to upload texture for {path:?}: {reason}")]
    Upload { path: PathBuf, reason: String },
}

/// EXIF orientation of a JPEG, 1 (upright) when absent or unreadable.
fn read_orientation(path: &Path, bytes: &[u8]) -> u16 {
    match Reader::new().read_from_container(&mut Cursor::new(bytes)) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| match &field.value {
                Value::Short(values) => values.first().copied(),
                _ => None,
            })
            .unwrap_or(1),
        Err(e) => {
            warn!(?path, error = %e, "could not read EXIF data");
            1
        }
    }
}

fn file_extension(path: &Path) -> String {
    path.extension().and_then(|s| s.to_str()).unwrap_or("").to_lowercase()
}

/// Loads a slider image from disk into a texture, applying its EXIF rotation.
pub fn load_slider_texture(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    image: &SliderImage,
) -> Result<Texture2D, LoadError> {
    let path = PathBuf::from(&image.url);
    let file_bytes = fs::read(&path).map_err(|source| LoadError::Read { path: path.clone(), source })?;

    let extension = file_extension(&path);
    let orientation = if extension == "jpg" || extension == "jpeg" {
        read_orientation(&path, &file_bytes)
    } else {
        1
    };

    let mut decoded = Image::load_image_from_mem(&format!(".{extension}"), &file_bytes)
        .map_err(|e| LoadError::Decode { path: path.clone(), reason: e.to_string() })?;

    // 3 = 180 deg, 6 = 90 deg clockwise, 8 = 90 deg counter-clockwise; flips are ignored
    match orientation {
        3 => {
            decoded.rotate_cw();
            decoded.rotate_cw();
        }
        6 => decoded.rotate_cw(),
        8 => decoded.rotate_ccw(),
        _ => {}
    }
    debug!(?path, orientation, width = decoded.width(), height = decoded.height(), "decoded image");

    rl.load_texture_from_image(thread, &decoded)
        .map_err(|e| LoadError::Upload { path, reason: e.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_lowercased() {
        assert_eq!(file_extension(Path::new("photos/Before.JPG")), "jpg");
        assert_eq!(file_extension(Path::new("no_extension")), "");
    }

    #[test]
    fn garbage_has_upright_orientation() {
        assert_eq!(read_orientation(Path::new("x.jpg"), b"not a jpeg"), 1);
    }

    #[test]
    fn read_error_names_the_file() {
        let err = fs::read("/nonexistent/after.jpg")
            .map_err(|source| LoadError::Read { path: PathBuf::from("/nonexistent/after.jpg"), source })
            .unwrap_err();
        assert!(err.to_string().contains("after.jpg"));
    }
}
