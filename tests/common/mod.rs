//! Shared test harness for integration tests.
//!
//! [`TestHarness`] starts a wiremock server standing in for the OPhim API and
//! serves the full router, pointed at that mock, on a random port.

use std::net::SocketAddr;

use ph_core::config::Config;
use ph_server::{build_router, AppContext};
use serde_json::Value;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub struct TestHarness {
    pub upstream: MockServer,
    pub addr: SocketAddr,
}

impl TestHarness {
    /// Start with default configuration.
    pub async fn start() -> Self {
        Self::with_config(Config::default()).await
    }

    /// Start with a custom configuration. `upstream.base_url` is replaced by
    /// the mock server's address.
    pub async fn with_config(mut config: Config) -> Self {
        let upstream = MockServer::start().await;
        config.upstream.base_url = upstream.uri();
        config.upstream.timeout_secs = 2;

        let static_dir = config.server.static_dir.clone();
        let ctx = AppContext::from_config(config).expect("failed to build context");
        let app = build_router(ctx, static_dir);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind random port");
        let addr = listener.local_addr().expect("failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self { upstream, addr }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// Answer `GET {upstream_path}` with `body`.
    pub async fn stub(&self, upstream_path: &str, body: Value) {
        Mock::given(method("GET"))
            .and(path(upstream_path))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.upstream)
            .await;
    }

    /// Answer `GET {upstream_path}` with a bare status code.
    pub async fn stub_status(&self, upstream_path: &str, status: u16) {
        Mock::given(method("GET"))
            .and(path(upstream_path))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.upstream)
            .await;
    }

    /// GET a path on the server and decode the JSON body.
    pub async fn get_json(&self, path: &str) -> (u16, Value) {
        let resp = reqwest::get(self.url(path)).await.expect("request failed");
        let status = resp.status().as_u16();
        let body = resp.json::<Value>().await.expect("body is not JSON");
        (status, body)
    }
}

/// A single listing entry as OPhim sends it.
#[allow(dead_code)]
pub fn ophim_movie(slug: &str, name: &str) -> Value {
    serde_json::json!({
        "_id": format!("id-{slug}"),
        "slug": slug,
        "name": name,
        "origin_name": format!("{name} (origin)"),
        "content": format!("<p>{name}</p>"),
        "tmdb": {"type": "movie", "id": "1107174", "vote_average": 7.2, "vote_count": 41},
        "year": 2024,
        "poster_url": format!("{slug}-poster.jpg"),
        "thumb_url": format!("{slug}-thumb.jpg"),
        "type": "single",
        "category": [{"id": "c1", "name": "Tâm Lý", "slug": "tam-ly"}],
        "country": [{"id": "k1", "name": "Việt Nam", "slug": "viet-nam"}],
        "quality": "FHD",
        "lang": "Vietsub",
        "episode_current": "Full",
        "episode_total": "1"
    })
}

/// A listing envelope around `items`.
#[allow(dead_code)]
pub fn ophim_listing(items: Vec<Value>, cdn: Option<&str>) -> Value {
    let mut data = serde_json::json!({
        "items": items,
        "params": {"pagination": {"totalItems": 120, "totalItemsPerPage": 24, "currentPage": 1, "pageRanges": 5}}
    });
    if let Some(cdn) = cdn {
        data["APP_DOMAIN_CDN_IMAGE"] = serde_json::json!(cdn);
    }
    serde_json::json!({"status": "success", "data": data})
}
