//! Sprite sheet loading
//!
//! The web shell fetches every sheet in [`SheetId::ALL`] before the first
//! frame; the game never starts with a partial set.

use std::collections::HashMap;

use crate::error::AssetError;
use crate::sim::SheetId;

/// Decoded RGBA8 pixels ready for GPU upload
#[derive(Debug, Clone)]
pub struct ImageData {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl ImageData {
    /// Decode a PNG (or any format the `image` build supports)
    pub fn from_bytes(path: &str, bytes: &[u8]) -> Result<Self, AssetError> {
        let img = image::load_from_memory(bytes).map_err(|source| AssetError::DecodeFailed {
            path: path.to_string(),
            source,
        })?;

        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        log::debug!("Decoded {} ({}x{})", path, width, height);

        Ok(Self {
            data: rgba.into_raw(),
            width,
            height,
        })
    }

    /// A flat color image
    #[cfg(test)]
    pub fn solid_color(width: u32, height: u32, color: [u8; 4]) -> Self {
        let pixel_count = (width * height) as usize;
        let mut data = Vec::with_capacity(pixel_count * 4);
        for _ in 0..pixel_count {
            data.extend_from_slice(&color);
        }
        Self {
            data,
            width,
            height,
        }
    }
}

/// Loaded sheets, keyed by id
#[derive(Debug, Default)]
pub struct AssetStore {
    images: HashMap<SheetId, ImageData>,
}

impl AssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, sheet: SheetId, image: ImageData) {
        self.images.insert(sheet, image);
    }

    pub fn get(&self, sheet: SheetId) -> Result<&ImageData, AssetError> {
        self.images
            .get(&sheet)
            .ok_or_else(|| AssetError::NotLoaded(sheet.path().to_string()))
    }

    /// True once every sheet in the manifest is present
    pub fn is_ready(&self) -> bool {
        SheetId::ALL.iter().all(|s| self.images.contains_key(s))
    }

    /// Fetch and decode every sheet in the manifest
    #[cfg(target_arch = "wasm32")]
    pub async fn load_all() -> Result<Self, AssetError> {
        let mut store = Self::new();
        for sheet in SheetId::ALL {
            let path = sheet.path();
            let bytes = fetch::bytes(path).await?;
            store.insert(sheet, ImageData::from_bytes(path, &bytes)?);
            log::info!("Loaded {}", path);
        }
        Ok(store)
    }
}

/// Browser `fetch` helpers
#[cfg(target_arch = "wasm32")]
pub mod fetch {
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::Response;

    use crate::error::AssetError;

    fn failed(path: &str, err: JsValue) -> AssetError {
        AssetError::FetchFailed {
            path: path.to_string(),
            reason: format!("{:?}", err),
        }
    }

    async fn response(path: &str) -> Result<Response, AssetError> {
        let window = web_sys::window().ok_or_else(|| AssetError::FetchFailed {
            path: path.to_string(),
            reason: "no window".to_string(),
        })?;
        let value = JsFuture::from(window.fetch_with_str(path))
            .await
            .map_err(|e| failed(path, e))?;
        value.dyn_into::<Response>().map_err(|e| failed(path, e))
    }

    /// Response body as bytes; any non-2xx status is an error
    pub async fn bytes(path: &str) -> Result<Vec<u8>, AssetError> {
        let resp = response(path).await?;
        if !resp.ok() {
            return Err(AssetError::BadStatus {
                path: path.to_string(),
                status: resp.status(),
            });
        }
        let promise = resp.array_buffer().map_err(|e| failed(path, e))?;
        let buffer = JsFuture::from(promise).await.map_err(|e| failed(path, e))?;
        Ok(js_sys::Uint8Array::new(&buffer).to_vec())
    }

    /// Response body as text, or `None` when the file does not exist
    pub async fn optional_text(path: &str) -> Result<Option<String>, AssetError> {
        let resp = response(path).await?;
        if resp.status() == 404 {
            return Ok(None);
        }
        if !resp.ok() {
            return Err(AssetError::BadStatus {
                path: path.to_string(),
                status: resp.status(),
            });
        }
        let promise = resp.text().map_err(|e| failed(path, e))?;
        let text = JsFuture::from(promise).await.map_err(|e| failed(path, e))?;
        Ok(text.as_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_ready_only_when_complete() {
        let mut store = AssetStore::new();
        assert!(!store.is_ready());
        store.insert(SheetId::Ships, ImageData::solid_color(4, 4, [255; 4]));
        store.insert(SheetId::Space, ImageData::solid_color(4, 4, [0, 0, 0, 255]));
        assert!(!store.is_ready());
        assert!(matches!(
            store.get(SheetId::Asteroids),
            Err(AssetError::NotLoaded(path)) if path == "img/asteroids.png"
        ));
        store.insert(SheetId::Asteroids, ImageData::solid_color(4, 4, [128; 4]));
        assert!(store.is_ready());
        assert_eq!(store.get(SheetId::Ships).unwrap().data.len(), 4 * 4 * 4);
    }

    #[test]
    fn test_decode_failure_names_the_file() {
        let err = ImageData::from_bytes("img/space.png", b"not a png").unwrap_err();
        assert!(matches!(err, AssetError::DecodeFailed { ref path, .. } if path == "img/space.png"));
        assert!(err.to_string().contains("img/space.png"));
    }
}
