//! HTTP-level tests driving the router in-process.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use calendar_core::FixedClock;
use chrono::{NaiveDate, NaiveDateTime};
use tower::ServiceExt;
use usvg::fontdb;
use wallpaper_server::{create_router, AppState, FontCache, FontSource};

const BODY_LIMIT: usize = 16 * 1024 * 1024;

fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, s)
        .unwrap()
}

fn app_with(fonts: FontCache, now: NaiveDateTime) -> Router {
    create_router(Arc::new(AppState::new(fonts, Arc::new(FixedClock(now)))))
}

fn app(now: NaiveDateTime) -> Router {
    app_with(FontCache::preloaded(fontdb::Database::new()), now)
}

struct Reply {
    status: StatusCode,
    content_type: Option<String>,
    cache_control: Option<String>,
    body: Vec<u8>,
}

impl Reply {
    fn text(&self) -> String {
        String::from_utf8(self.body.clone()).unwrap()
    }
}

async fn get(app: &Router, uri: &str) -> Reply {
    let response = app
        .clone()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let header_value = |name: header::HeaderName| {
        response
            .headers()
            .get(name)
            .map(|v| v.to_str().unwrap().to_string())
    };
    let content_type = header_value(header::CONTENT_TYPE);
    let cache_control = header_value(header::CACHE_CONTROL);
    let status = response.status();
    let body = to_bytes(response.into_body(), BODY_LIMIT).await.unwrap();
    Reply {
        status,
        content_type,
        cache_control,
        body: body.to_vec(),
    }
}

#[tokio::test]
async fn year_svg_has_one_circle_per_day() {
    let app = app(at(2024, 3, 1, 12, 0, 0));
    let reply = get(&app, "/api/wallpaper?mode=year&year=2024&format=svg").await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.content_type.as_deref(), Some("image/svg+xml"));
    // Noon: twelve hours until the next render would differ.
    assert_eq!(
        reply.cache_control.as_deref(),
        Some("public, max-age=43200")
    );

    let svg = reply.text();
    assert_eq!(svg.matches("<circle").count(), 366);
    assert!(svg.contains(r#"width="1290" height="2796""#));
    assert!(svg.contains(">2024</text>"));
}

#[tokio::test]
async fn png_wallpaper() {
    let app = app(at(2025, 6, 1, 8, 0, 0));
    let reply = get(&app, "/api/wallpaper?width=129&height=280&fg=ff0000&bg=101010").await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.content_type.as_deref(), Some("image/png"));
    assert!(reply
        .cache_control
        .as_deref()
        .unwrap()
        .starts_with("public, max-age="));

    let image = image::load_from_memory(&reply.body).unwrap().to_rgba8();
    assert_eq!(image.dimensions(), (129, 280));
    assert_eq!(image.get_pixel(0, 0).0, [0x10, 0x10, 0x10, 255]);
}

#[tokio::test]
async fn cache_lifetime_has_a_floor() {
    let app = app(at(2025, 6, 1, 23, 59, 30));
    let reply = get(&app, "/api/wallpaper?format=svg").await;
    assert_eq!(reply.cache_control.as_deref(), Some("public, max-age=60"));
}

#[tokio::test]
async fn life_svg_with_stats() {
    let app = app(at(2001, 1, 1, 0, 0, 0));
    let reply = get(
        &app,
        "/api/wallpaper?mode=life&birthday=2000-01-03&showStats=1&format=svg",
    )
    .await;

    assert_eq!(reply.status, StatusCode::OK);
    let svg = reply.text();
    assert_eq!(svg.matches("<circle").count(), 4160);
    assert!(svg.contains(">1% lived</text>"));
}

#[tokio::test]
async fn invalid_input_is_rejected() {
    let app = app(at(2025, 6, 1, 8, 0, 0));
    for uri in [
        "/api/wallpaper?mode=life&birthday=not-a-date",
        "/api/wallpaper?mode=life",
        "/api/wallpaper?width=0",
        "/api/wallpaper?height=-20",
        "/api/wallpaper?fg=blue",
        "/api/preview?width=200",
    ] {
        let reply = get(&app, uri).await;
        assert_eq!(reply.status, StatusCode::BAD_REQUEST, "{uri}");
        assert!(!reply.text().is_empty(), "{uri} should explain itself");
    }
}

#[tokio::test]
async fn lenient_parameters_fall_back_to_defaults() {
    let app = app(at(2025, 6, 1, 8, 0, 0));
    let reply = get(
        &app,
        "/api/wallpaper?mode=goal&width=wide&year=soon&format=svg",
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK);
    let svg = reply.text();
    assert!(svg.contains(r#"width="1290""#));
    assert_eq!(svg.matches("<circle").count(), 365);
}

#[tokio::test]
async fn font_outage_returns_503_until_it_recovers() {
    let dir = tempfile::tempdir().unwrap();
    let font_path = dir.path().join("inter.ttf");
    let app = app_with(
        FontCache::new(FontSource::File(font_path.clone())),
        at(2025, 6, 1, 8, 0, 0),
    );
    let png_uri = "/api/wallpaper?width=64&height=128";

    let reply = get(&app, png_uri).await;
    assert_eq!(reply.status, StatusCode::SERVICE_UNAVAILABLE);

    // SVG output never needs fonts.
    let reply = get(&app, "/api/wallpaper?format=svg").await;
    assert_eq!(reply.status, StatusCode::OK);

    std::fs::write(&font_path, b"placeholder").unwrap();
    let reply = get(&app, png_uri).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.content_type.as_deref(), Some("image/png"));
}

#[tokio::test]
async fn preview_is_sized_to_container() {
    let app = app(at(2025, 2, 14, 9, 0, 0));
    let reply = get(&app, "/api/preview?mode=year&year=2025&width=180.5&height=390").await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.content_type.as_deref(), Some("image/svg+xml"));
    assert_eq!(reply.cache_control.as_deref(), Some("no-store"));

    let svg = reply.text();
    assert!(svg.contains(r#"width="180.5" height="390""#));
    assert_eq!(svg.matches("<circle").count(), 365);
    assert!(svg.contains(">2025</text>"));
}

#[tokio::test]
async fn presets_are_listed() {
    let app = app(at(2025, 6, 1, 8, 0, 0));
    let reply = get(&app, "/api/presets").await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.content_type.as_deref(), Some("application/json"));
    let json: serde_json::Value = serde_json::from_slice(&reply.body).unwrap();
    assert_eq!(json["default"], "1290x2796");
    assert_eq!(json["presets"][0]["width"], 1290);
}

#[tokio::test]
async fn ui_is_served_from_the_root() {
    let app = app(at(2025, 6, 1, 8, 0, 0));

    let index = get(&app, "/").await;
    assert_eq!(index.status, StatusCode::OK);
    assert_eq!(index.content_type.as_deref(), Some("text/html"));
    assert!(index.text().contains("/app.js"));

    let script = get(&app, "/app.js").await;
    assert_eq!(script.status, StatusCode::OK);
    assert!(script.text().contains("/api/preview"));

    let missing = get(&app, "/missing.css").await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn ui_default_life_link_renders() {
    let app = app(at(2025, 6, 1, 8, 0, 0));
    let page = get(&app, "/").await.text();

    let marker = r#"id="birthday" name="birthday" type="date" value=""#;
    let start = page.find(marker).expect("birthday input has a default") + marker.len();
    let birthday = &page[start..start + page[start..].find('"').unwrap()];
    assert!(!birthday.is_empty());

    // The link the UI offers before the user touches the form.
    let uri = format!(
        "/api/wallpaper?mode=life&width=1290&height=2796&fg=FFFFFF&bg=000000\
         &birthday={birthday}&lifeExpectancyYears=80&showStats=0&format=svg"
    );
    let reply = get(&app, &uri).await;
    assert_eq!(reply.status, StatusCode::OK, "{uri}");

    let script = get(&app, "/app.js").await.text();
    assert!(script.contains("$('copy').disabled = !ready"));
}
