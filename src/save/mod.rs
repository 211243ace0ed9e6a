mod error;

pub use error::SaveError;

use image::{DynamicImage, ImageFormat};
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// Picks the raster format from the file extension, PNG when there is none.
pub fn format_for(path: &Path) -> Result<ImageFormat, SaveError> {
    let Some(ext) = path.extension() else {
        return Ok(ImageFormat::Png);
    };

    ImageFormat::from_extension(ext).ok_or_else(|| SaveError::UnsupportedFormat {
        path: path.to_path_buf(),
        extension: ext.to_string_lossy().into_owned(),
    })
}

/// Writes `image` to `path`, replacing any existing file.
///
/// The image is encoded into a temporary file next to `path` and renamed
/// into place, so a failure never leaves a partial file behind.
pub fn save_image(image: &DynamicImage, path: &Path) -> Result<(), SaveError> {
    let format = format_for(path)?;
    let write_err = |source| SaveError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    debug!(tmp = %tmp.path().display(), ?format, "encoding image");

    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        image
            .write_to(&mut writer, format)
            .map_err(|source| match source {
                image::ImageError::IoError(e) => write_err(e),
                source => SaveError::Image {
                    path: path.to_path_buf(),
                    format,
                    source,
                },
            })?;
        writer.flush().map_err(write_err)?;
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))
            .map_err(write_err)?;
    }

    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};
    use std::fs;
    use tempfile::TempDir;

    fn sample(side: u32) -> DynamicImage {
        DynamicImage::ImageLuma8(GrayImage::from_pixel(side, side, Luma([0u8])))
    }

    #[test]
    fn format_follows_extension() {
        assert_eq!(format_for(Path::new("a.png")).unwrap(), ImageFormat::Png);
        assert_eq!(format_for(Path::new("a.JPG")).unwrap(), ImageFormat::Jpeg);
        assert_eq!(format_for(Path::new("dir/a.bmp")).unwrap(), ImageFormat::Bmp);
        assert_eq!(format_for(Path::new("noext")).unwrap(), ImageFormat::Png);
    }

    #[test]
    fn unknown_extension_is_rejected_before_writing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("qr.nope");

        let err = save_image(&sample(4), &path).unwrap_err();
        assert!(matches!(err, SaveError::UnsupportedFormat { .. }));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn writes_readable_png() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("qr.png");

        save_image(&sample(7), &path).unwrap();

        let back = image::open(&path).unwrap();
        assert_eq!(back.width(), 7);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("qr.png");
        fs::write(&path, b"stale").unwrap();

        save_image(&sample(5), &path).unwrap();
        save_image(&sample(9), &path).unwrap();

        assert_eq!(image::open(&path).unwrap().width(), 9);
    }

    #[test]
    fn missing_directory_is_a_write_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing/qr.png");

        let err = save_image(&sample(3), &path).unwrap_err();
        assert!(matches!(err, SaveError::Write { .. }));
        assert!(err.to_string().contains("missing"));
        assert!(!path.exists());
    }

    #[test]
    fn failed_encode_leaves_existing_file_untouched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("qr.ico");
        fs::write(&path, b"previous").unwrap();

        // ICO cannot hold images wider than 256 pixels.
        let err = save_image(&sample(300), &path).unwrap_err();

        assert!(matches!(err, SaveError::Image { .. }), "{err}");
        assert_eq!(fs::read(&path).unwrap(), b"previous");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn output_is_world_readable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("qr.png");
        save_image(&sample(2), &path).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }
}
