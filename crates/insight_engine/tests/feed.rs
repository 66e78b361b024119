use std::time::Duration;

use insight_core::{FailureKind, Headline};
use insight_engine::{FeedSettings, HeadlineResolver};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn rss(items: &[(String, String)]) -> String {
    let body: String = items
        .iter()
        .map(|(title, link)| format!("<item><title>{title}</title><link>{link}</link></item>"))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><rss version="2.0"><channel><title>Search</title><link>https://news.example</link><description>results</description>{body}</channel></rss>"#
    )
}

fn settings(server: &MockServer) -> FeedSettings {
    FeedSettings {
        base_url: format!("{}/rss/search", server.uri()),
        request_timeout: Duration::from_secs(5),
        ..FeedSettings::default()
    }
}

#[tokio::test]
async fn query_is_escaped_and_locale_fixed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rss/search"))
        .and(query_param("q", "rates & housing"))
        .and(query_param("hl", "en-AU"))
        .and(query_param("gl", "AU"))
        .and(query_param("ceid", "AU:en"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            rss(&[("Sample".to_string(), "http://x/y".to_string())]),
            "application/rss+xml",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let resolver = HeadlineResolver::new(settings(&server)).unwrap();
    let headline = resolver.random_headline("rates & housing").await;
    assert_eq!(headline, Some(Headline::new("Sample", "http://x/y")));
}

#[tokio::test]
async fn pick_comes_from_first_fifteen_entries() {
    let server = MockServer::start().await;
    let items: Vec<(String, String)> = (0..25)
        .map(|i| (format!("Story {i}"), format!("http://news.example/{i}")))
        .collect();
    Mock::given(method("GET"))
        .and(path("/rss/search"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(rss(&items), "text/xml"))
        .mount(&server)
        .await;

    let resolver = HeadlineResolver::new(settings(&server)).unwrap();
    for _ in 0..10 {
        let picked = resolver.random_headline("anything").await.expect("headline");
        let position = items
            .iter()
            .position(|(title, link)| *title == picked.title && *link == picked.link)
            .expect("picked entry must come from the feed");
        assert!(position < 15);
    }
}

#[tokio::test]
async fn empty_feed_and_errors_are_no_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("q", "empty"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(rss(&[]), "text/xml"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("q", "broken"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("q", "garbage"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>nope</html>"))
        .mount(&server)
        .await;

    let resolver = HeadlineResolver::new(settings(&server)).unwrap();
    assert_eq!(resolver.random_headline("empty").await, None);
    assert_eq!(resolver.random_headline("broken").await, None);
    assert_eq!(resolver.random_headline("garbage").await, None);

    // The underlying search still tells the cases apart.
    assert_eq!(resolver.search("empty").await.unwrap(), Vec::new());
    assert_eq!(
        resolver.search("broken").await.unwrap_err().kind,
        FailureKind::Transport
    );
    assert_eq!(
        resolver.search("garbage").await.unwrap_err().kind,
        FailureKind::Extraction
    );
}

#[tokio::test]
async fn unreachable_feed_is_no_result() {
    let settings = FeedSettings {
        base_url: "http://127.0.0.1:1/rss/search".to_string(),
        request_timeout: Duration::from_secs(2),
        ..FeedSettings::default()
    };
    let resolver = HeadlineResolver::new(settings).unwrap();
    assert_eq!(resolver.random_headline("test").await, None);
}
