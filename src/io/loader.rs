//! Resolve image sources to RGBA pixels.
//!
//! - URL: fetched with reqwest
//! - Data URI: base64 payload decoded in memory
//! - File: read with tokio
//!
//! Decoding is CPU-bound and runs on the blocking pool. Several sources are
//! loaded concurrently by [`load_all`], which stops at the first failure.

use super::source::ImageSource;
use crate::error::{Error, Result};
use base64::{engine::general_purpose, Engine as _};
use image::RgbaImage;
use tokio::task::JoinSet;

/// Load a single source.
///
/// `client` is only used for URL sources; without one a client is built on
/// demand.
pub async fn load_image(
    source: ImageSource,
    client: Option<&reqwest::Client>,
) -> Result<RgbaImage> {
    let label = source.label();

    let bytes = match source {
        ImageSource::Decoded(img) => return Ok(img),
        ImageSource::Bytes(bytes) => bytes,
        ImageSource::Url(url) => {
            let client = match client {
                Some(client) => client.clone(),
                None => http_client(&label)?,
            };
            fetch_url(&url, &client)
                .await
                .map_err(|e| Error::image_load(&label, e))?
        }
        ImageSource::DataUri(uri) => {
            decode_data_uri(&uri).map_err(|reason| Error::image_load(&label, reason))?
        }
        ImageSource::File(path) => tokio::fs::read(&path)
            .await
            .map_err(|e| Error::image_load(&label, e))?,
    };

    log::debug!("Decoding {} ({} bytes)", label, bytes.len());

    let decode_label = label.clone();
    tokio::task::spawn_blocking(move || {
        image::load_from_memory(&bytes)
            .map(|img| img.to_rgba8())
            .map_err(|e| Error::image_load(decode_label, e))
    })
    .await
    .map_err(|e| Error::image_load(&label, format!("decoder task failed: {}", e)))?
}

fn http_client(label: &str) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .build()
        .map_err(|e| Error::image_load(label, format!("cannot create HTTP client: {}", e)))
}

async fn fetch_url(url: &str, client: &reqwest::Client) -> reqwest::Result<Vec<u8>> {
    log::info!("Downloading {}", url.split('?').next().unwrap_or(url));
    let response = client.get(url).send().await?.error_for_status()?;
    Ok(response.bytes().await?.to_vec())
}

/// Extract the payload of a `data:[<mime>][;base64],<payload>` URI.
///
/// Only base64 payloads are accepted; images are never sent percent-encoded.
pub(crate) fn decode_data_uri(uri: &str) -> std::result::Result<Vec<u8>, String> {
    let rest = uri
        .get(..5)
        .filter(|scheme| scheme.eq_ignore_ascii_case("data:"))
        .map(|_| &uri[5..])
        .ok_or_else(|| "not a data URI".to_string())?;

    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| "data URI has no ',' separator".to_string())?;

    if !header
        .split(';')
        .any(|param| param.trim().eq_ignore_ascii_case("base64"))
    {
        return Err("data URI is not base64-encoded".to_string());
    }

    let payload: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    general_purpose::STANDARD
        .decode(payload.as_bytes())
        .map_err(|e| format!("invalid base64 payload: {}", e))
}

/// Load every source concurrently, preserving input order.
///
/// The first failure aborts all outstanding loads and is returned as-is.
pub async fn load_all(sources: Vec<ImageSource>) -> Result<Vec<RgbaImage>> {
    let client = match sources.iter().find(|s| matches!(s, ImageSource::Url(_))) {
        Some(first_url) => Some(http_client(&first_url.label())?),
        None => None,
    };
    let count = sources.len();

    let mut tasks = JoinSet::new();
    for (index, source) in sources.into_iter().enumerate() {
        let client = client.clone();
        tasks.spawn(async move { (index, load_image(source, client.as_ref()).await) });
    }

    let mut slots: Vec<Option<RgbaImage>> = (0..count).map(|_| None).collect();
    while let Some(joined) = tasks.join_next().await {
        let (index, result) = match joined {
            Ok(done) => done,
            Err(e) => {
                tasks.abort_all();
                return Err(Error::image_load("image loader task", e));
            }
        };

        match result {
            Ok(img) => slots[index] = Some(img),
            Err(err) => {
                log::warn!("Aborting {} pending image loads: {}", tasks.len(), err);
                tasks.abort_all();
                return Err(err);
            }
        }
    }

    slots
        .into_iter()
        .enumerate()
        .map(|(index, slot)| {
            slot.ok_or_else(|| {
                Error::image_load(format!("source #{}", index), "load never completed")
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba};
    use std::io::Cursor;

    fn png_bytes(img: &RgbaImage) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_decode_data_uri() {
        let uri = "data:text/plain;base64,aGVsbG8=";
        assert_eq!(decode_data_uri(uri).unwrap(), b"hello");
    }

    #[test]
    fn test_decode_data_uri_rejects_plain_text() {
        assert!(decode_data_uri("data:text/plain,hello").is_err());
        assert!(decode_data_uri("data:image/png;base64").is_err());
        assert!(decode_data_uri("image/png;base64,AAAA").is_err());
    }

    #[tokio::test]
    async fn test_load_bytes_and_data_uri() {
        let img = RgbaImage::from_pixel(3, 2, Rgba([1, 2, 3, 255]));
        let png = png_bytes(&img);
        let uri = format!(
            "data:image/png;base64,{}",
            general_purpose::STANDARD.encode(&png)
        );

        let from_bytes = load_image(ImageSource::Bytes(png), None).await.unwrap();
        let from_uri = load_image(ImageSource::parse(&uri), None).await.unwrap();

        assert_eq!(from_bytes, img);
        assert_eq!(from_uri, img);
    }

    #[tokio::test]
    async fn test_corrupt_bytes_name_the_source() {
        let err = load_image(ImageSource::Bytes(vec![0, 1, 2, 3]), None)
            .await
            .unwrap_err();

        match err {
            Error::ImageLoad { label, .. } => assert_eq!(label, "<4 encoded bytes>"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_url_without_client_builds_one() {
        // No host: the request fails before any network access.
        let err = load_image(ImageSource::Url("http://".to_string()), None)
            .await
            .unwrap_err();

        match err {
            Error::ImageLoad { label, .. } => assert_eq!(label, "http://"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_load_all_keeps_order() {
        let a = RgbaImage::from_pixel(1, 1, Rgba([255, 0, 0, 255]));
        let b = RgbaImage::from_pixel(2, 2, Rgba([0, 255, 0, 255]));

        let loaded = load_all(vec![
            ImageSource::Bytes(png_bytes(&a)),
            ImageSource::Decoded(b.clone()),
        ])
        .await
        .unwrap();

        assert_eq!(loaded, vec![a, b]);
    }

    #[tokio::test]
    async fn test_load_all_fails_fast() {
        let good = RgbaImage::new(1, 1);
        let missing = std::env::temp_dir().join("nanopixel_definitely_missing.png");

        let err = load_all(vec![
            ImageSource::Decoded(good),
            ImageSource::File(missing.clone()),
        ])
        .await
        .unwrap_err();

        match err {
            Error::ImageLoad { label, .. } => assert_eq!(label, missing.display().to_string()),
            other => panic!("unexpected error: {other}"),
        }
    }
}
