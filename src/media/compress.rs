//! Image downscale/recompress
//!
//! Takes an image reference (http(s) URL or `data:` URL), decodes it,
//! downsamples it to a maximum pixel width and re-encodes it as a
//! compressed `data:` URL. WebP is preferred; JPEG is the fallback when
//! the WebP encoder rejects the image. Any failure yields the original
//! reference unchanged, so compression can never lose an image.

use std::sync::Arc;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use futures::future::join_all;
use image::DynamicImage;
use image::imageops::FilterType;

use crate::config::MediaConfig;
use crate::data::NewspaperData;
use crate::error::AppError;
use crate::metrics::IMAGE_COMPRESSIONS_TOTAL;

/// Image compression service
pub struct ImageCompressor {
    http_client: Arc<reqwest::Client>,
    max_width: u32,
    jpeg_quality: u8,
}

impl ImageCompressor {
    /// Create a new compressor
    ///
    /// # Arguments
    /// * `http_client` - Shared HTTP client for fetching remote references
    /// * `config` - Maximum width and JPEG quality
    pub fn new(http_client: Arc<reqwest::Client>, config: &MediaConfig) -> Self {
        Self {
            http_client,
            max_width: config.max_width,
            jpeg_quality: config.jpeg_quality,
        }
    }

    /// Compress one image reference
    ///
    /// Returns the compressed `data:` URL, or the original reference
    /// unchanged when fetching, decoding, or encoding fails.
    pub async fn compress_url(&self, url: &str) -> String {
        match self.try_compress(url).await {
            Ok(data_url) => {
                IMAGE_COMPRESSIONS_TOTAL.with_label_values(&["success"]).inc();
                data_url
            }
            Err(error) => {
                tracing::warn!(url, %error, "Image compression failed; keeping original");
                IMAGE_COMPRESSIONS_TOTAL.with_label_values(&["fallback"]).inc();
                url.to_string()
            }
        }
    }

    /// Compress every non-embedded image of a newspaper concurrently
    ///
    /// Already-embedded `data:` references are left untouched. Each task
    /// writes back to its own image slot; individual failures keep the
    /// original reference, so the article count and image count are
    /// always preserved.
    pub async fn compress_newspaper(&self, newspaper: &mut NewspaperData) {
        let mut targets = Vec::new();
        for (article_index, article) in newspaper.articles.iter().enumerate() {
            for (image_index, image) in article.images.iter().enumerate() {
                if !image.url.is_empty() && !image.url.starts_with("data:") {
                    targets.push((article_index, image_index, image.url.clone()));
                }
            }
        }

        let compressed = join_all(
            targets
                .iter()
                .map(|(_, _, url)| self.compress_url(url)),
        )
        .await;

        for ((article_index, image_index, _), url) in targets.into_iter().zip(compressed) {
            newspaper.articles[article_index].images[image_index].url = url;
        }
    }

    async fn try_compress(&self, url: &str) -> Result<String, AppError> {
        let bytes = if url.starts_with("data:") {
            decode_data_url(url)?
        } else {
            self.fetch(url).await?
        };

        let decoded = image::load_from_memory(&bytes)
            .map_err(|e| AppError::Media(format!("failed to decode image: {}", e)))?;
        let scaled = downscale(decoded, self.max_width);

        // Try WebP first, fall back to JPEG
        let (mime_type, encoded) = match encode_webp(&scaled) {
            Ok(encoded) => ("image/webp", encoded),
            Err(error) => {
                tracing::debug!(%error, "WebP encoding unavailable; falling back to JPEG");
                ("image/jpeg", encode_jpeg(&scaled, self.jpeg_quality)?)
            }
        };

        Ok(format!("data:{};base64,{}", mime_type, BASE64.encode(encoded)))
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>, AppError> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::Media(format!("failed to fetch {}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Media(format!(
                "fetch of {} returned HTTP {}",
                url, status
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::Media(format!("failed to read {}: {}", url, e)))?;
        Ok(bytes.to_vec())
    }
}

/// Scale down to the maximum width, preserving aspect ratio.
/// Images at or under the limit pass through unscaled.
fn downscale(image: DynamicImage, max_width: u32) -> DynamicImage {
    if image.width() <= max_width {
        return image;
    }

    let height = ((image.height() as u64 * max_width as u64) / image.width() as u64).max(1) as u32;
    image.resize_exact(max_width, height, FilterType::Triangle)
}

fn encode_webp(image: &DynamicImage) -> Result<Vec<u8>, image::ImageError> {
    let mut buffer = Vec::new();
    let encoder = image::codecs::webp::WebPEncoder::new_lossless(&mut buffer);
    // The WebP encoder only accepts 8-bit RGB(A)
    DynamicImage::ImageRgba8(image.to_rgba8()).write_with_encoder(encoder)?;
    Ok(buffer)
}

fn encode_jpeg(image: &DynamicImage, quality: u8) -> Result<Vec<u8>, AppError> {
    let mut buffer = Vec::new();
    let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, quality);
    // JPEG has no alpha channel
    encoder
        .encode_image(&image.to_rgb8())
        .map_err(|e| AppError::Media(format!("failed to encode JPEG: {}", e)))?;
    Ok(buffer)
}

/// Decode a base64 `data:` URL into raw bytes
fn decode_data_url(url: &str) -> Result<Vec<u8>, AppError> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| AppError::Media("not a data URL".to_string()))?;
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| AppError::Media("malformed data URL".to_string()))?;

    if !meta.ends_with(";base64") {
        return Err(AppError::Media("data URL is not base64-encoded".to_string()));
    }

    BASE64
        .decode(payload)
        .map_err(|e| AppError::Media(format!("invalid base64 payload: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Article, ArticleImage};

    fn test_compressor() -> ImageCompressor {
        ImageCompressor {
            http_client: Arc::new(reqwest::Client::new()),
            max_width: 600,
            jpeg_quality: 70,
        }
    }

    /// A solid-color PNG as a base64 data URL
    fn png_data_url(width: u32, height: u32) -> String {
        let mut buffer = Vec::new();
        let image = DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
            width,
            height,
            image::Rgba([120, 180, 240, 255]),
        ));
        image
            .write_to(
                &mut std::io::Cursor::new(&mut buffer),
                image::ImageFormat::Png,
            )
            .unwrap();
        format!("data:image/png;base64,{}", BASE64.encode(buffer))
    }

    fn decode_output(data_url: &str) -> DynamicImage {
        let bytes = decode_data_url(data_url).unwrap();
        image::load_from_memory(&bytes).unwrap()
    }

    #[tokio::test]
    async fn oversized_image_is_downscaled_to_max_width() {
        let compressor = test_compressor();
        let input = png_data_url(1200, 900);

        let output = compressor.compress_url(&input).await;
        assert!(output.starts_with("data:image/"));

        let decoded = decode_output(&output);
        assert_eq!(decoded.width(), 600);
        assert_eq!(decoded.height(), 450);
    }

    #[tokio::test]
    async fn small_image_keeps_its_dimensions() {
        let compressor = test_compressor();
        let input = png_data_url(200, 150);

        let output = compressor.compress_url(&input).await;
        let decoded = decode_output(&output);
        assert_eq!(decoded.width(), 200);
        assert_eq!(decoded.height(), 150);
    }

    #[tokio::test]
    async fn undecodable_reference_is_returned_unchanged() {
        let compressor = test_compressor();

        let garbage = "data:image/png;base64,bm90LWFuLWltYWdl";
        assert_eq!(compressor.compress_url(garbage).await, garbage);

        // Unfetchable scheme fails without touching the network
        let bad_url = "not-a-url";
        assert_eq!(compressor.compress_url(bad_url).await, bad_url);
    }

    #[tokio::test]
    async fn batch_skips_embedded_references_and_keeps_failures() {
        let compressor = test_compressor();
        let embedded = png_data_url(1200, 900);

        let mut newspaper = NewspaperData {
            title: "Test".to_string(),
            subtitle: "Test".to_string(),
            date_range: None,
            articles: vec![
                test_article("a", &embedded),
                test_article("b", "not-a-url"),
            ],
        };

        compressor.compress_newspaper(&mut newspaper).await;

        // Already-embedded data URL untouched, even though it is oversized
        assert_eq!(newspaper.articles[0].images[0].url, embedded);
        // Failed fetch keeps the original reference
        assert_eq!(newspaper.articles[1].images[0].url, "not-a-url");
        // Nothing dropped
        assert_eq!(newspaper.articles.len(), 2);
    }

    #[test]
    fn downscale_keeps_aspect_ratio() {
        let image = DynamicImage::ImageRgba8(image::RgbaImage::new(1000, 400));
        let scaled = downscale(image, 600);
        assert_eq!(scaled.width(), 600);
        assert_eq!(scaled.height(), 240);
    }

    #[test]
    fn decode_data_url_rejects_non_base64() {
        assert!(decode_data_url("data:text/plain,hello").is_err());
        assert!(decode_data_url("http://example.com/a.png").is_err());
    }

    fn test_article(id: &str, image_url: &str) -> Article {
        Article {
            id: id.to_string(),
            headline: "Headline!".to_string(),
            body_text: "Body.".to_string(),
            images: vec![ArticleImage {
                url: image_url.to_string(),
                alt: "alt".to_string(),
            }],
            border_color: "border-green-500".to_string(),
            headline_color: "text-green-700".to_string(),
            page: 1,
            position: 1,
            featured: false,
            row: None,
            col_span: None,
        }
    }
}
