use crate::error::AppError;
use crate::services::platform::PlatformConventions;
use crate::services::scan_service::{has_extension, VIDEO_EXTENSIONS};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageReader};
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

pub const PREVIEW_MAX_WIDTH: u32 = 150;
pub const PREVIEW_MAX_HEIGHT: u32 = 150;
const PREVIEW_QUALITY: u8 = 85;

/// Extensions the preview pipeline will hand to the decoder. Raw formats
/// (arw/raw) are deliberately absent: the decoder can't read them, so they
/// degrade to "no preview" just like any other unsupported type.
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "webp", "tiff", "tif"];

/// Resolve the vendor thumbnail paired with a clip: the derived
/// THMBNL/<stem>T01.JPG sibling, but only if it actually exists on disk.
pub fn resolve_clip_thumbnail(
    conventions: PlatformConventions,
    video: &Path,
) -> Option<PathBuf> {
    let candidate = conventions.thumbnail_sibling_path(video)?;
    candidate.is_file().then_some(candidate)
}

/// Render a bounded JPEG preview for a photo or video asset.
///
/// Videos route through their vendor thumbnail; a clip without one gets no
/// preview (the video container is never decoded). Decode and encode
/// failures degrade to `None` so a broken file renders as an empty
/// placeholder, never an error.
pub fn render_preview(
    conventions: PlatformConventions,
    path: &Path,
    max_width: u32,
    max_height: u32,
) -> Option<Vec<u8>> {
    let source = if has_extension(path, VIDEO_EXTENSIONS) {
        match resolve_clip_thumbnail(conventions, path) {
            Some(thumb) => thumb,
            None => {
                log::debug!("no vendor thumbnail for {}", path.display());
                return None;
            }
        }
    } else if has_extension(path, IMAGE_EXTENSIONS) {
        path.to_path_buf()
    } else {
        return None;
    };

    match render_scaled_jpeg(&source, max_width, max_height) {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            log::warn!("preview for {} failed: {}", source.display(), e);
            None
        }
    }
}

/// Decode, downscale to the bounding box (aspect preserved, never
/// upscaled), fix EXIF orientation, encode JPEG. The reader is scoped to
/// this call, so the file handle is released on every path out.
fn render_scaled_jpeg(path: &Path, max_width: u32, max_height: u32) -> Result<Vec<u8>, AppError> {
    let orientation = read_orientation(path);

    let mut img = ImageReader::open(path)?.decode()?;
    // `thumbnail` scales to fill the box in both directions, so guard it
    // to keep already-small images at their native size.
    if img.width() > max_width || img.height() > max_height {
        img = img.thumbnail(max_width, max_height);
    }
    // Rotating after the resize is safe: the bounding box is square, so
    // the scale factor is the same either way.
    if orientation != 1 {
        img = apply_orientation(img, orientation);
    }

    // JPEG carries no alpha channel.
    let rgb = DynamicImage::ImageRgb8(img.into_rgb8());
    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, PREVIEW_QUALITY);
    rgb.write_with_encoder(encoder)?;
    Ok(buffer.into_inner())
}

/// Read the EXIF orientation from the file header, defaulting to 1.
/// Only the first 128KB is read; that covers any sane EXIF block.
fn read_orientation(path: &Path) -> u32 {
    let file = match std::fs::File::open(path) {
        Ok(f) => f,
        Err(_) => return 1,
    };

    let mut header = Vec::with_capacity(128 * 1024);
    if file.take(128 * 1024).read_to_end(&mut header).is_err() {
        return 1;
    }

    let exif = match exif::Reader::new().read_from_container(&mut Cursor::new(&header)) {
        Ok(e) => e,
        Err(_) => return 1,
    };

    match exif.get_field(exif::Tag::Orientation, exif::In::PRIMARY) {
        Some(field) => match field.value {
            exif::Value::Short(ref v) => *v.first().unwrap_or(&1) as u32,
            exif::Value::Long(ref v) => *v.first().unwrap_or(&1),
            _ => 1,
        },
        None => 1,
    }
}

fn apply_orientation(img: DynamicImage, orientation: u32) -> DynamicImage {
    match orientation {
        2 => img.fliph(),
        3 => img.rotate180(),
        4 => img.flipv(),
        5 => img.fliph().rotate90(),
        6 => img.rotate90(),
        7 => img.fliph().rotate270(),
        8 => img.rotate270(),
        _ => img,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::platform::{join_subdir, CLIP_SUBDIR};
    use std::fs;

    const POSIX: PlatformConventions = PlatformConventions::Posix;

    fn write_test_image(path: &Path, width: u32, height: u32) {
        let img = DynamicImage::ImageRgb8(image::RgbImage::new(width, height));
        img.save(path).unwrap();
    }

    #[test]
    fn clip_thumbnail_resolves_when_present() {
        let card = tempfile::tempdir().unwrap();
        let clip_dir = join_subdir(card.path(), CLIP_SUBDIR);
        let thumb_dir = join_subdir(card.path(), &["PRIVATE", "M4ROOT", "THMBNL"]);
        fs::create_dir_all(&clip_dir).unwrap();
        fs::create_dir_all(&thumb_dir).unwrap();
        fs::write(clip_dir.join("C0012.MP4"), b"mp4").unwrap();
        write_test_image(&thumb_dir.join("C0012T01.JPG"), 160, 90);

        let resolved = resolve_clip_thumbnail(POSIX, &clip_dir.join("C0012.MP4")).unwrap();
        assert_eq!(resolved, thumb_dir.join("C0012T01.JPG"));
    }

    #[test]
    fn clip_thumbnail_absent_resolves_to_none() {
        let card = tempfile::tempdir().unwrap();
        let clip_dir = join_subdir(card.path(), CLIP_SUBDIR);
        fs::create_dir_all(&clip_dir).unwrap();
        fs::write(clip_dir.join("C0012.MP4"), b"mp4").unwrap();

        assert!(resolve_clip_thumbnail(POSIX, &clip_dir.join("C0012.MP4")).is_none());
    }

    #[test]
    fn preview_respects_bounds_and_aspect() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("large.jpg");
        write_test_image(&src, 1600, 1200);

        let bytes = render_preview(POSIX, &src, 150, 150).unwrap();
        let out = image::load_from_memory(&bytes).unwrap();
        assert_eq!(out.width(), 150);
        // 4:3 scaled into a 150 box: height within a pixel of 112.5.
        assert!((112..=113).contains(&out.height()), "height {}", out.height());
    }

    #[test]
    fn small_image_is_not_upscaled() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("small.png");
        write_test_image(&src, 60, 40);

        let bytes = render_preview(POSIX, &src, 150, 150).unwrap();
        let out = image::load_from_memory(&bytes).unwrap();
        assert_eq!((out.width(), out.height()), (60, 40));
    }

    #[test]
    fn video_preview_uses_vendor_thumbnail() {
        let card = tempfile::tempdir().unwrap();
        let clip_dir = join_subdir(card.path(), CLIP_SUBDIR);
        let thumb_dir = join_subdir(card.path(), &["PRIVATE", "M4ROOT", "THMBNL"]);
        fs::create_dir_all(&clip_dir).unwrap();
        fs::create_dir_all(&thumb_dir).unwrap();
        fs::write(clip_dir.join("C0100.MP4"), b"not decodable").unwrap();
        write_test_image(&thumb_dir.join("C0100T01.JPG"), 320, 180);

        let bytes = render_preview(POSIX, &clip_dir.join("C0100.MP4"), 150, 150).unwrap();
        let out = image::load_from_memory(&bytes).unwrap();
        assert!(out.width() <= 150 && out.height() <= 150);
    }

    #[test]
    fn video_without_thumbnail_has_no_preview() {
        let card = tempfile::tempdir().unwrap();
        let clip_dir = join_subdir(card.path(), CLIP_SUBDIR);
        fs::create_dir_all(&clip_dir).unwrap();
        fs::write(clip_dir.join("C0200.MP4"), b"mp4").unwrap();

        assert!(render_preview(POSIX, &clip_dir.join("C0200.MP4"), 150, 150).is_none());
    }

    #[test]
    fn non_image_extension_has_no_preview() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("notes.txt");
        fs::write(&src, b"text").unwrap();

        assert!(render_preview(POSIX, &src, 150, 150).is_none());
    }

    #[test]
    fn corrupt_image_degrades_to_none() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("broken.jpg");
        fs::write(&src, b"definitely not a jpeg").unwrap();

        assert!(render_preview(POSIX, &src, 150, 150).is_none());
    }
}
