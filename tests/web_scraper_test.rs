use httpmock::prelude::*;
use instagram_scraper_node::domain::model::ScrapeCode;
use instagram_scraper_node::domain::ports::ScraperFactory;
use instagram_scraper_node::{LibraryError, ScraperConfig, WebScraperFactory};
use serde_json::{json, Value};
use std::time::Duration;

const PROFILE_PATH: &str = "/api/v1/users/web_profile_info/";

fn fast_config(max_retries: u32) -> ScraperConfig {
    ScraperConfig {
        max_retries: Some(max_retries),
        min_delay_ms: Some(0),
        max_delay_ms: Some(0),
        ..Default::default()
    }
}

fn media_node(id: u32) -> Value {
    json!({
        "node": {
            "__typename": "GraphImage",
            "id": id.to_string(),
            "shortcode": format!("SC{}", id),
            "edge_media_to_caption": {"edges": [{"node": {"text": format!("caption {}", id)}}]},
            "taken_at_timestamp": 1700000000 + id as i64,
            "edge_liked_by": {"count": id * 10},
            "edge_media_to_comment": {"count": id},
            "display_url": format!("https://cdn.example/{}.jpg", id),
            "is_video": false
        }
    })
}

fn profile_body(ids: &[u32], is_private: bool) -> Value {
    json!({
        "data": {
            "user": {
                "is_private": is_private,
                "edge_owner_to_timeline_media": {
                    "count": 120,
                    "edges": ids.iter().map(|id| media_node(*id)).collect::<Vec<_>>()
                }
            }
        },
        "status": "ok"
    })
}

fn scrape_code(err: LibraryError) -> ScrapeCode {
    match err {
        LibraryError::Scrape(e) => e.code,
        other => panic!("expected a scrape error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_posts_are_returned_in_profile_order_up_to_limit() {
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(PROFILE_PATH)
                .query_param("username", "n8n.io")
                .header("x-ig-app-id", "936619743392459");
            then.status(200).json_body(profile_body(&[5, 4, 3, 2], false));
        })
        .await;

    let scraper = WebScraperFactory::new(server.base_url())
        .create(fast_config(0))
        .unwrap();
    let result = scraper.get_posts("n8n.io", 3).await.unwrap();

    api_mock.assert_async().await;
    assert!(result.success);
    let posts = result.posts.unwrap();
    let ids: Vec<&str> = posts.iter().map(|p| p["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["5", "4", "3"]);
    assert_eq!(posts[0]["url"], "https://www.instagram.com/p/SC5/");
    assert_eq!(posts[0]["likes"], 50);
    assert_eq!(posts[0]["type"], "image");
}

#[tokio::test]
async fn test_profile_without_posts_is_success() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(PROFILE_PATH);
            then.status(200).json_body(profile_body(&[], false));
        })
        .await;

    let scraper = WebScraperFactory::new(server.base_url())
        .create(fast_config(0))
        .unwrap();
    let result = scraper.get_posts("ghost_acct", 50).await.unwrap();

    assert!(result.success);
    assert_eq!(result.posts, Some(vec![]));
}

#[tokio::test]
async fn test_private_profile_reports_failure() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(PROFILE_PATH);
            then.status(200).json_body(profile_body(&[], true));
        })
        .await;

    let scraper = WebScraperFactory::new(server.base_url())
        .create(fast_config(0))
        .unwrap();
    let result = scraper.get_posts("hidden", 10).await.unwrap();

    assert!(!result.success);
    assert_eq!(result.error.as_deref(), Some("Profile is private"));
}

#[tokio::test]
async fn test_missing_user_reports_failure() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(PROFILE_PATH);
            then.status(200).json_body(json!({"data": {"user": null}, "status": "ok"}));
        })
        .await;

    let scraper = WebScraperFactory::new(server.base_url())
        .create(fast_config(0))
        .unwrap();
    let result = scraper.get_posts("nobody", 10).await.unwrap();

    assert!(!result.success);
    assert_eq!(result.error.as_deref(), Some("User not found"));
}

#[tokio::test]
async fn test_not_found_is_not_retried() {
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(GET).path(PROFILE_PATH);
            then.status(404);
        })
        .await;

    let scraper = WebScraperFactory::new(server.base_url())
        .create(fast_config(3))
        .unwrap();
    let err = scraper.get_posts("nobody", 10).await.unwrap_err();

    assert_eq!(scrape_code(err), ScrapeCode::from("USER_NOT_FOUND"));
    assert_eq!(api_mock.hits_async().await, 1);
}

#[tokio::test]
async fn test_rate_limit_is_retried_then_reported() {
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(GET).path(PROFILE_PATH);
            then.status(429);
        })
        .await;

    let scraper = WebScraperFactory::new(server.base_url())
        .create(fast_config(2))
        .unwrap();
    let err = scraper.get_posts("busy", 10).await.unwrap_err();

    assert_eq!(scrape_code(err), ScrapeCode::from("RATE_LIMITED"));
    assert_eq!(api_mock.hits_async().await, 3);
}

#[tokio::test]
async fn test_server_error_carries_status_code() {
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(GET).path(PROFILE_PATH);
            then.status(503);
        })
        .await;

    let scraper = WebScraperFactory::new(server.base_url())
        .create(fast_config(1))
        .unwrap();
    let err = scraper.get_posts("n8n.io", 10).await.unwrap_err();

    assert_eq!(scrape_code(err), ScrapeCode::from("HTTP_503"));
    assert_eq!(api_mock.hits_async().await, 2);
}

#[tokio::test]
async fn test_html_body_is_invalid_response() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(PROFILE_PATH);
            then.status(200).body("<html>login required</html>");
        })
        .await;

    let scraper = WebScraperFactory::new(server.base_url())
        .create(fast_config(2))
        .unwrap();
    let err = scraper.get_posts("n8n.io", 10).await.unwrap_err();

    assert_eq!(scrape_code(err), ScrapeCode::from("INVALID_RESPONSE"));
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(PROFILE_PATH);
            then.status(200)
                .delay(Duration::from_millis(500))
                .json_body(profile_body(&[1], false));
        })
        .await;

    let config = ScraperConfig {
        timeout_ms: Some(50),
        ..fast_config(0)
    };
    let scraper = WebScraperFactory::new(server.base_url()).create(config).unwrap();
    let err = scraper.get_posts("n8n.io", 10).await.unwrap_err();

    assert_eq!(scrape_code(err), ScrapeCode::from("TIMEOUT"));
}

#[tokio::test]
async fn test_unreachable_host_is_a_network_error() {
    let scraper = WebScraperFactory::new("http://127.0.0.1:1")
        .create(fast_config(0))
        .unwrap();
    let err = scraper.get_posts("n8n.io", 10).await.unwrap_err();

    assert_eq!(scrape_code(err), ScrapeCode::from("NETWORK_ERROR"));
}

#[tokio::test]
async fn test_zero_timeout_disables_client_timeout() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(PROFILE_PATH);
            then.status(200)
                .delay(Duration::from_millis(50))
                .json_body(profile_body(&[7], false));
        })
        .await;

    let config = ScraperConfig {
        timeout_ms: Some(0),
        ..fast_config(0)
    };
    let scraper = WebScraperFactory::new(server.base_url()).create(config).unwrap();
    let result = scraper.get_posts("n8n.io", 10).await.unwrap();

    assert!(result.success);
    assert_eq!(result.posts.map(|p| p.len()), Some(1));
}
