// Input acquisition: produce encoded image bytes from either a local file
// ("upload") or a remote URL. Uploads are forwarded untouched; URL content
// is decoded and re-encoded as JPEG before it reaches the classifier.

use crate::error::InputError;
use image::codecs::jpeg::JpegEncoder;
use image::ImageFormat;
use reqwest::blocking::Client;
use std::fmt;
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Extensions accepted for uploads.
pub const UPLOAD_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Quality used when re-encoding fetched images.
pub const JPEG_QUALITY: u8 = 75;

/// Where an image comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    Upload(PathBuf),
    Url(String),
}

/// Encoded image bytes for a single interaction.
#[derive(Debug, Clone)]
pub struct ImageInput {
    pub source: ImageSource,
    pub bytes: Vec<u8>,
}

/// What the terminal shows in place of the image itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePreview {
    pub caption: &'static str,
    pub format: Option<ImageFormat>,
    pub dimensions: Option<(u32, u32)>,
    pub size: usize,
}

impl ImageSource {
    /// Produce the bytes that will be sent to the classifier.
    pub fn acquire(&self, http: &Client) -> Result<ImageInput, InputError> {
        let bytes = match self {
            ImageSource::Upload(path) => read_upload(path)?,
            ImageSource::Url(url) => fetch_as_jpeg(http, url).map_err(|cause| {
                tracing::warn!(%url, %cause, "failed to load image from URL");
                InputError::UrlLoad
            })?,
        };
        Ok(ImageInput {
            source: self.clone(),
            bytes,
        })
    }

    pub fn caption(&self) -> &'static str {
        match self {
            ImageSource::Upload(_) => "Uploaded Image",
            ImageSource::Url(_) => "Image URL",
        }
    }
}

impl ImageInput {
    /// Probe format and dimensions. A failed probe leaves the fields empty.
    pub fn preview(&self) -> ImagePreview {
        let (format, dimensions) =
            match image::io::Reader::new(Cursor::new(self.bytes.as_slice())).with_guessed_format() {
                Ok(reader) => {
                    let format = reader.format();
                    (format, reader.into_dimensions().ok())
                }
                Err(_) => (None, None),
            };
        ImagePreview {
            caption: self.source.caption(),
            format,
            dimensions,
            size: self.bytes.len(),
        }
    }
}

impl fmt::Display for ImagePreview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.caption)?;
        if let Some(format) = self.format {
            write!(f, " {:?}", format)?;
        }
        if let Some((w, h)) = self.dimensions {
            write!(f, " {}x{}", w, h)?;
        }
        write!(f, ", {} bytes", self.size)
    }
}

fn read_upload(path: &Path) -> Result<Vec<u8>, InputError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    if !UPLOAD_EXTENSIONS.contains(&ext.as_str()) {
        return Err(InputError::UnsupportedType(path.display().to_string()));
    }
    let bytes = std::fs::read(path).map_err(|source| InputError::Read {
        path: path.display().to_string(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "read upload");
    Ok(bytes)
}

/// Fetch, decode and re-encode. Errors are boxed; the caller flattens them.
fn fetch_as_jpeg(http: &Client, url: &str) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let body = http.get(url).send()?.error_for_status()?.bytes()?;
    let decoded = image::load_from_memory(&body)?;
    tracing::debug!(
        %url,
        width = decoded.width(),
        height = decoded.height(),
        "decoded fetched image"
    );
    Ok(reencode_jpeg(&decoded)?)
}

/// JPEG has no alpha channel, so the image is flattened to RGB first.
pub fn reencode_jpeg(img: &image::DynamicImage) -> image::ImageResult<Vec<u8>> {
    let rgb = img.to_rgb8();
    let mut out = Vec::new();
    {
        let mut encoder = JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY);
        encoder.encode_image(&rgb)?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgba, RgbaImage};

    fn checkerboard() -> DynamicImage {
        let mut img = RgbaImage::new(32, 24);
        for (x, y, px) in img.enumerate_pixels_mut() {
            let on = (x / 4 + y / 4) % 2 == 0;
            *px = if on {
                Rgba([200, 40, 40, 255])
            } else {
                Rgba([20, 20, 180, 128])
            };
        }
        DynamicImage::ImageRgba8(img)
    }

    #[test]
    fn reencoded_jpeg_decodes_with_same_dimensions() {
        let jpeg = reencode_jpeg(&checkerboard()).unwrap();
        assert_eq!(image::guess_format(&jpeg).unwrap(), ImageFormat::Jpeg);
        let back = image::load_from_memory(&jpeg).unwrap();
        assert_eq!((back.width(), back.height()), (32, 24));
    }

    #[test]
    fn rejects_unsupported_upload_extension() {
        let err = read_upload(Path::new("notes.txt")).unwrap_err();
        assert!(matches!(err, InputError::UnsupportedType(_)));
    }

    #[test]
    fn missing_upload_is_read_error() {
        let err = read_upload(Path::new("/definitely/not/here.JPG")).unwrap_err();
        assert!(matches!(err, InputError::Read { .. }));
    }

    #[test]
    fn preview_reports_format_and_size() {
        let jpeg = reencode_jpeg(&checkerboard()).unwrap();
        let input = ImageInput {
            source: ImageSource::Url("http://example.test/dog.png".into()),
            bytes: jpeg.clone(),
        };
        let preview = input.preview();
        assert_eq!(preview.caption, "Image URL");
        assert_eq!(preview.format, Some(ImageFormat::Jpeg));
        assert_eq!(preview.dimensions, Some((32, 24)));
        assert_eq!(preview.size, jpeg.len());
        assert!(preview.to_string().starts_with("[Image URL] Jpeg 32x24"));
    }

    #[test]
    fn preview_of_garbage_has_no_dimensions() {
        let input = ImageInput {
            source: ImageSource::Upload("x.png".into()),
            bytes: b"hello".to_vec(),
        };
        let preview = input.preview();
        assert_eq!(preview.dimensions, None);
        assert_eq!(preview.to_string(), "[Uploaded Image], 5 bytes");
    }
}
