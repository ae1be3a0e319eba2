//! `OphimClient` against a mock OPhim server.

use ph_catalog::{CatalogSource, ListFilters, OphimClient};
use ph_core::config::UpstreamConfig;
use ph_core::Error;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> OphimClient {
    OphimClient::new(&UpstreamConfig {
        base_url: server.uri(),
        timeout_secs: 2,
        ..Default::default()
    })
    .unwrap()
}

#[tokio::test]
async fn home_sends_page_and_default_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/api/home"))
        .and(query_param("page", "2"))
        .and(header("accept", "application/json"))
        .and(header("cache-control", "no-cache"))
        .and(header("pragma", "no-cache"))
        .and(header("accept-language", "vi-VN,vi;q=0.9,en-US;q=0.8,en;q=0.7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": {"items": [{"slug": "mai", "name": "Mai"}]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (items, _, _) = client(&server).home(2).await.unwrap().into_parts();
    assert_eq!(items[0].slug.as_deref(), Some("mai"));
}

#[tokio::test]
async fn search_sends_keyword_page_and_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/api/tim-kiem"))
        .and(query_param("keyword", "người nhện"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"items": []}})))
        .expect(1)
        .mount(&server)
        .await;

    client(&server).search("người nhện", 1, 10).await.unwrap();
}

#[tokio::test]
async fn filters_are_forwarded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/api/the-loai/hanh-dong"))
        .and(query_param("page", "3"))
        .and(query_param("sort_type", "desc"))
        .and(query_param("year", "2024"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"items": []}})))
        .expect(1)
        .mount(&server)
        .await;

    let filters = ListFilters {
        page: 3,
        sort_type: Some("desc".into()),
        year: Some("2024".into()),
        ..Default::default()
    };
    client(&server).category("hanh-dong", &filters).await.unwrap();
}

#[tokio::test]
async fn slug_segment_is_percent_encoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/phim/a%20b"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "movie": {"slug": "a b", "name": "A B"},
            "episodes": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let resolved = client(&server).movie("a b").await.unwrap().resolve().unwrap();
    assert!(resolved.is_some());
}

#[tokio::test]
async fn metadata_paths() {
    let server = MockServer::start().await;
    for suffix in ["images", "peoples", "keywords"] {
        Mock::given(method("GET"))
            .and(path(format!("/v1/api/phim/mai/{suffix}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": {}})))
            .expect(1)
            .mount(&server)
            .await;
    }

    let c = client(&server);
    assert!(c.images("mai").await.unwrap().success);
    assert!(c.peoples("mai").await.unwrap().success);
    assert!(c.keywords("mai").await.unwrap().success);
}

#[tokio::test]
async fn directories() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/api/quoc-gia"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"items": [{"_id": "1", "name": "Hàn Quốc", "slug": "han-quoc"}]}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/api/the-loai"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"_id": "2", "name": "Hành Động", "slug": "hanh-dong"}]
        })))
        .mount(&server)
        .await;

    let c = client(&server);
    assert_eq!(c.countries().await.unwrap().into_items().len(), 1);
    assert_eq!(
        c.categories().await.unwrap().into_items()[0].slug.as_deref(),
        Some("hanh-dong")
    );
}

#[tokio::test]
async fn non_success_status_is_upstream_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/api/home"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let err = client(&server).home(1).await.unwrap_err();
    assert!(matches!(err, Error::Upstream { .. }));
    assert!(err.to_string().starts_with("API Error:"));
    assert!(err.to_string().contains("502"));
}

#[tokio::test]
async fn invalid_json_is_upstream_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/api/home"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = client(&server).home(1).await.unwrap_err();
    assert!(matches!(err, Error::Upstream { .. }));
}

#[tokio::test]
async fn unreachable_upstream_is_upstream_error() {
    let c = OphimClient::new(&UpstreamConfig {
        base_url: "http://127.0.0.1:1".into(),
        timeout_secs: 1,
        ..Default::default()
    })
    .unwrap();
    let err = c.countries().await.unwrap_err();
    assert!(matches!(err, Error::Upstream { .. }));
}

#[tokio::test]
async fn slow_upstream_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/api/home"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(std::time::Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let c = OphimClient::new(&UpstreamConfig {
        base_url: server.uri(),
        timeout_secs: 1,
        ..Default::default()
    })
    .unwrap();
    assert!(matches!(c.home(1).await, Err(Error::Upstream { .. })));
}
