//! Asset loading for the thumbnail renderer.
//!
//! Difficulty icons and the logo are cached for the lifetime of the store,
//! one entry per key, never evicted. The cache locks are only held for the
//! map access itself, so two requests missing the same key at once both
//! load it and the later insert wins. Both loads produce the same image.

use crate::{
    error::{AppError, AppResult},
    layout::{ICON_SIZE, LOGO_SIZE},
    params::Difficulty,
};
use base64::{Engine, engine::general_purpose::STANDARD};
use image::{RgbaImage, imageops};
use image_compositor::{decode_image, rasterize_svg};
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
    time::Duration,
};

pub const LOGO_FILE: &str = "icon.png";
pub const DIFFICULTY_ICONS_DIR: &str = "difficulty_icons";

#[derive(Debug)]
pub struct AssetStore {
    assets_dir: PathBuf,
    fetch_timeout: Option<Duration>,
    difficulty_icons: Mutex<HashMap<String, Arc<RgbaImage>>>,
    logo: Mutex<Option<Arc<RgbaImage>>>,
}

impl AssetStore {
    pub fn new(assets_dir: impl Into<PathBuf>, fetch_timeout: Option<Duration>) -> Self {
        Self {
            assets_dir: assets_dir.into(),
            fetch_timeout,
            difficulty_icons: Mutex::new(HashMap::new()),
            logo: Mutex::new(None),
        }
    }

    pub fn assets_dir(&self) -> &Path {
        &self.assets_dir
    }

    /// Icon for `difficulty`, or `None` when no loadable asset exists for it.
    pub async fn difficulty_icon(&self, difficulty: Difficulty) -> Option<Arc<RgbaImage>> {
        let key = difficulty.key();

        if let Some(icon) = self.cached_icon(&key) {
            return Some(icon);
        }

        let dir = self.assets_dir.join(DIFFICULTY_ICONS_DIR);
        match load_icon(&dir, &key).await {
            Ok(icon) => {
                let icon = Arc::new(icon);
                if let Ok(mut cache) = self.difficulty_icons.lock() {
                    cache.insert(key.clone(), icon.clone());
                }
                log::info!("cached difficulty icon {key}");
                Some(icon)
            }
            Err(e) => {
                log::warn!("no difficulty icon for {key}: {e}");
                None
            }
        }
    }

    pub async fn logo(&self) -> AppResult<Arc<RgbaImage>> {
        if let Some(logo) = self.logo.lock().ok().and_then(|logo| logo.clone()) {
            return Ok(logo);
        }

        let path = self.assets_dir.join(LOGO_FILE);
        let logo = load_raster(&path, LOGO_SIZE)
            .await
            .map(Arc::new)
            .map_err(|e| AppError::Asset {
                path: path.display().to_string(),
                error: e.to_string(),
            })?;

        if let Ok(mut slot) = self.logo.lock() {
            *slot = Some(logo.clone());
        }
        log::info!("cached logo from {}", path.display());

        Ok(logo)
    }

    /// Fetches and decodes the background named by `thumbnail`.
    ///
    /// `thumbnail` is an `http(s)` URL, a base64 `data:` URI or a local path.
    pub async fn background(&self, thumbnail: &str) -> AppResult<RgbaImage> {
        let load_err = |error: String| AppError::BackgroundLoad {
            thumbnail: abbreviate(thumbnail),
            error,
        };

        let bytes = if cutil::http::is_http_url(thumbnail) {
            cutil::http::get_bytes(thumbnail, self.fetch_timeout)
                .await
                .map_err(|e| load_err(e.to_string()))?
                .to_vec()
        } else if let Some(uri) = thumbnail.strip_prefix("data:") {
            decode_data_uri(uri).map_err(load_err)?
        } else {
            tokio::fs::read(thumbnail)
                .await
                .map_err(|e| load_err(e.to_string()))?
        };

        decode_image(&bytes).map_err(|e| load_err(e.to_string()))
    }

    fn cached_icon(&self, key: &str) -> Option<Arc<RgbaImage>> {
        self.difficulty_icons
            .lock()
            .ok()
            .and_then(|cache| cache.get(key).cloned())
    }
}

// `<key>.svg` is rasterized straight at icon size, `<key>.png` is decoded.
async fn load_icon(dir: &Path, key: &str) -> anyhow::Result<RgbaImage> {
    let svg = dir.join(format!("{key}.svg"));
    if let Ok(bytes) = tokio::fs::read(&svg).await {
        return Ok(rasterize_svg(&bytes, ICON_SIZE, ICON_SIZE)?);
    }

    load_raster(&dir.join(format!("{key}.png")), ICON_SIZE).await
}

// Decodes a raster asset and stretches it to its square overlay slot.
async fn load_raster(path: &Path, size: u32) -> anyhow::Result<RgbaImage> {
    let bytes = tokio::fs::read(path).await?;
    let img = decode_image(&bytes)?;

    if img.dimensions() == (size, size) {
        Ok(img)
    } else {
        Ok(imageops::resize(
            &img,
            size,
            size,
            imageops::FilterType::Triangle,
        ))
    }
}

fn decode_data_uri(uri: &str) -> Result<Vec<u8>, String> {
    let (meta, payload) = uri
        .split_once(',')
        .ok_or_else(|| "malformed data URI".to_string())?;

    if !meta.ends_with(";base64") {
        return Err("only base64 data URIs are supported".to_string());
    }

    STANDARD
        .decode(payload.trim())
        .map_err(|e| format!("invalid base64 payload: {e}"))
}

// data: URIs can be megabytes long; keep error messages readable
fn abbreviate(thumbnail: &str) -> String {
    const MAX: usize = 128;

    match thumbnail.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &thumbnail[..idx]),
        None => thumbnail.to_string(),
    }
}
