use std::fs;
use std::io::Cursor;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use exif::{In, Reader, Tag, Value};
use raylib::prelude::*;
use tracing::{debug, warn};

/// Quarter turns needed to display an image upright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    None,
    Half,
    Clockwise,
    CounterClockwise,
}

impl Rotation {
    /// Maps an EXIF orientation tag. Mirrored orientations are shown unrotated.
    pub fn from_orientation(orientation: u16) -> Self {
        match orientation {
            3 => Rotation::Half,
            6 => Rotation::Clockwise,
            8 => Rotation::CounterClockwise,
            _ => Rotation::None,
        }
    }
}

/// EXIF orientation of a JPEG, 1 when absent or unreadable.
pub fn read_orientation(bytes: &[u8]) -> u16 {
    match Reader::new().read_from_container(&mut Cursor::new(bytes)) {
        Ok(exif) => match exif.get_field(Tag::Orientation, In::PRIMARY).map(|f| &f.value) {
            Some(Value::Short(values)) => values.first().copied().unwrap_or(1),
            _ => 1,
        },
        Err(err) => {
            debug!(%err, "no usable EXIF data");
            1
        }
    }
}

/// Loads an image, turns it upright and uploads it as a texture.
pub fn load_texture_with_exif_rotation(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    image_path: &Path,
) -> Result<Texture2D> {
    let file_bytes = fs::read(image_path).with_context(|| format!("Failed to read {}", image_path.display()))?;

    let extension = image_path.extension().and_then(|s| s.to_str()).unwrap_or("").to_lowercase();
    let rotation = if extension == "jpg" || extension == "jpeg" {
        Rotation::from_orientation(read_orientation(&file_bytes))
    } else {
        Rotation::None
    };

    let mut image = Image::load_image_from_mem(&format!(".{extension}"), &file_bytes)
        .map_err(|e| anyhow!("Failed to decode {}: {e}", image_path.display()))?;

    match rotation {
        Rotation::Half => {
            image.rotate_cw();
            image.rotate_cw();
        }
        Rotation::Clockwise => image.rotate_cw(),
        Rotation::CounterClockwise => image.rotate_ccw(),
        Rotation::None => {}
    }
    if rotation != Rotation::None {
        debug!(?rotation, path = %image_path.display(), "applied EXIF rotation");
    }

    let texture = rl
        .load_texture_from_image(thread, &image)
        .map_err(|e| anyhow!("Failed to create texture for {}: {e}", image_path.display()))?;
    Ok(texture)
}

/// Like [`load_texture_with_exif_rotation`] but logs and yields `None` on failure.
pub fn load_optional(rl: &mut RaylibHandle, thread: &RaylibThread, image_path: &Path) -> Option<Texture2D> {
    match load_texture_with_exif_rotation(rl, thread, image_path) {
        Ok(texture) => Some(texture),
        Err(err) => {
            warn!("{err:#}; continuing without it");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_mapping() {
        assert_eq!(Rotation::from_orientation(1), Rotation::None);
        assert_eq!(Rotation::from_orientation(3), Rotation::Half);
        assert_eq!(Rotation::from_orientation(6), Rotation::Clockwise);
        assert_eq!(Rotation::from_orientation(8), Rotation::CounterClockwise);
        assert_eq!(Rotation::from_orientation(2), Rotation::None);
    }

    #[test]
    fn test_garbage_reads_as_upright() {
        assert_eq!(read_orientation(b"not an image"), 1);
        assert_eq!(read_orientation(&[]), 1);
    }
}
