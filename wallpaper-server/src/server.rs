//! HTTP API: full-size wallpapers, live previews, device presets and the UI.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use axum::{
    body::Body,
    extract::{Query, Request, State},
    http::header,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use calendar_core::dates::seconds_until_midnight;
use calendar_core::presets::{device_presets, PresetsResponse};
use calendar_core::{Clock, OutputFormat, RenderProfile, SystemClock, WallpaperQuery};

use crate::embedded_assets::serve_ui;
use crate::error::ApiError;
use crate::fonts::{FontCache, FontSource};
use crate::raster::render_png;

/// Shortest cache lifetime handed to clients, even a minute before midnight.
pub const MIN_CACHE_SECONDS: i64 = 60;

pub struct AppState {
    pub fonts: FontCache,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(fonts: FontCache, clock: Arc<dyn Clock>) -> Self {
        Self { fonts, clock }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub bind_address: String,
    pub font_source: FontSource,
}

/// Render a wallpaper at full resolution.
///
/// PNG by default; `format=svg` returns the SVG that would have been
/// rasterized. The response stays cacheable until local midnight.
async fn wallpaper_endpoint(
    State(state): State<Arc<AppState>>,
    Query(query): Query<WallpaperQuery>,
) -> Result<Response, ApiError> {
    let now = state.clock.now();
    let request = query.into_wallpaper(now)?;
    let svg = request.config.render_svg(
        request.size.to_canvas()?,
        RenderProfile::Wallpaper,
        now,
    )?;

    let body = match request.format {
        OutputFormat::Svg => Body::from(svg),
        OutputFormat::Png => {
            let fonts = state.fonts.get().await?;
            Body::from(render_png(&svg, request.size, fonts)?)
        }
    };

    tracing::debug!(
        "Rendered {} {} wallpaper at {}",
        request.config.mode().as_str(),
        request.format.extension(),
        request.size
    );

    let max_age = seconds_until_midnight(now).max(MIN_CACHE_SECONDS);
    Ok((
        [
            (header::CONTENT_TYPE, request.format.content_type().to_string()),
            (header::CACHE_CONTROL, format!("public, max-age={max_age}")),
        ],
        body,
    )
        .into_response())
}

/// Small SVG sized to the caller's preview container.
async fn preview_endpoint(
    State(state): State<Arc<AppState>>,
    Query(query): Query<WallpaperQuery>,
) -> Result<Response, ApiError> {
    let now = state.clock.now();
    let (config, canvas) = query.into_preview(now)?;
    let svg = config.render_svg(canvas, RenderProfile::Preview, now)?;
    tracing::debug!("Rendered {} preview at {}", config.mode().as_str(), canvas);

    Ok((
        [
            (header::CONTENT_TYPE, "image/svg+xml"),
            (header::CACHE_CONTROL, "no-store"),
        ],
        svg,
    )
        .into_response())
}

async fn presets_endpoint() -> Json<PresetsResponse> {
    Json(device_presets())
}

async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();

    let response = next.run(req).await;

    let elapsed = start.elapsed();
    tracing::info!(
        "{} {} -> {} - {:.1}ms",
        method,
        uri.path(),
        response.status().as_u16(),
        elapsed.as_secs_f64() * 1000.0
    );

    response
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/wallpaper", get(wallpaper_endpoint))
        .route("/api/preview", get(preview_endpoint))
        .route("/api/presets", get(presets_endpoint))
        .fallback(get(serve_ui))
        .with_state(state)
        .layer(middleware::from_fn(logging_middleware))
}

/// Bind, serve until Ctrl+C or SIGTERM, then drain in-flight requests.
pub async fn run(config: ServerConfig) -> Result<()> {
    let state = Arc::new(AppState::new(
        FontCache::new(config.font_source.clone()),
        Arc::new(SystemClock),
    ));
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.bind_address, config.port)
        .parse()
        .context("Invalid bind address")?;

    tracing::info!("Starting wallpaper server on http://{}", addr);
    tracing::info!("Caption font source: {}", config.font_source);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        },
    }
}

