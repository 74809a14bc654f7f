use crate::{
    assets::AssetStore,
    error::{AppError, AppResult},
    layout::{CANVAS_HEIGHT, CANVAS_WIDTH, icon_rect, logo_rect},
    params::LevelQuery,
};
use axum::{
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use image::RgbaImage;
use image_compositor::{Compositor, encode_png};
use std::{collections::HashMap, sync::Arc, time::Instant};

#[derive(Debug)]
pub struct AppState {
    pub assets: AssetStore,
    pub compositor: Compositor,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(assets: AssetStore) -> Self {
        Self {
            assets,
            compositor: Compositor::new(),
        }
    }
}

/// `GET /api/level?thumbnail=...&difficulty=...`
pub async fn level(
    State(state): State<SharedState>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let start = Instant::now();

    match render_level(&state, &query).await {
        Ok(png) => {
            log::info!(
                "rendered level thumbnail ({} bytes) in {}ms",
                png.len(),
                cutil::time::elapsed_ms(start)
            );
            (StatusCode::OK, [(header::CONTENT_TYPE, "image/png")], png).into_response()
        }
        Err(e) => e.into_response(),
    }
}

pub async fn health() -> &'static str {
    "ok"
}

/// Validates the query and renders the thumbnail as PNG bytes.
pub async fn render_level(state: &AppState, query: &HashMap<String, String>) -> AppResult<Vec<u8>> {
    let query = LevelQuery::validate(query)?;
    log::debug!("{query:?}");

    let (background, icon) = tokio::join!(
        state.assets.background(&query.thumbnail),
        state.assets.difficulty_icon(query.difficulty),
    );

    let background = background?;
    let icon = icon.ok_or(AppError::UnknownDifficulty)?;

    let mut canvas = RgbaImage::new(CANVAS_WIDTH, CANVAS_HEIGHT);
    let compositor = &state.compositor;

    compositor.render_full_bleed(&mut canvas, &background, None);
    compositor.draw_image(&mut canvas, &icon, icon_rect());

    let logo = state.assets.logo().await?;
    compositor.draw_image(&mut canvas, &logo, logo_rect());

    Ok(encode_png(&canvas)?)
}
