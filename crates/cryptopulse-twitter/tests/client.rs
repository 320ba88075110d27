//! Integration tests for `TwitterClient` and the batch collectors using
//! wiremock HTTP mocks.

use std::time::Duration;

use cryptopulse_core::CreatedAt;
use cryptopulse_twitter::{
    fetch_all_tweets, resolve_user_ids, ResolvedAccount, TwitterClient, TwitterError,
};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> TwitterClient {
    TwitterClient::with_base_url("test-token", 5, 0, 0, base_url)
        .expect("client construction should not fail")
}

fn test_client_with_retries(base_url: &str, max_retries: u32) -> TwitterClient {
    TwitterClient::with_base_url("test-token", 5, max_retries, 0, base_url)
        .expect("client construction should not fail")
}

fn user_body(id: &str, username: &str) -> serde_json::Value {
    json!({"data": {"id": id, "name": username, "username": username}})
}

fn tweets_body(texts: &[&str]) -> serde_json::Value {
    let data: Vec<serde_json::Value> = texts
        .iter()
        .enumerate()
        .map(|(i, text)| {
            json!({
                "id": format!("{}", 1000 + i),
                "text": text,
                "created_at": "2024-01-01T12:00:00.000Z",
                "public_metrics": {
                    "retweet_count": 1,
                    "reply_count": 2,
                    "like_count": 3,
                    "quote_count": 0
                }
            })
        })
        .collect();
    json!({"data": data, "meta": {"result_count": texts.len()}})
}

// ---------------------------------------------------------------------------
// get_user_id
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_user_id_sends_auth_and_user_agent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2/users/by/username/VitalikButerin"))
        .and(header("authorization", "Bearer test-token"))
        .and(header("user-agent", "CryptoSentimentBot/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_body("295218901", "VitalikButerin")))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let user = client
        .get_user_id("VitalikButerin")
        .await
        .expect("lookup should succeed");

    assert_eq!(user.id, "295218901");
    assert_eq!(user.username, "VitalikButerin");
}

#[tokio::test]
async fn get_user_id_surfaces_api_errors_without_data() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2/users/by/username/nobody_here"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errors": [{
                "title": "Not Found Error",
                "detail": "Could not find user with username: [nobody_here]."
            }]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.get_user_id("nobody_here").await.unwrap_err();

    assert!(
        matches!(err, TwitterError::ApiError(ref m) if m.contains("nobody_here")),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn unauthorized_maps_to_typed_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"title": "Unauthorized"})))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.get_user_id("jack").await.unwrap_err();
    assert!(matches!(err, TwitterError::Unauthorized { status: 401 }));
}

#[tokio::test]
async fn forbidden_maps_to_unauthorized() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.get_user_id("jack").await.unwrap_err();
    assert!(matches!(err, TwitterError::Unauthorized { status: 403 }));
}

#[tokio::test]
async fn not_found_maps_to_typed_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.get_user_id("jack").await.unwrap_err();
    assert!(matches!(err, TwitterError::NotFound { .. }));
}

#[tokio::test]
async fn rate_limit_reads_retry_after_header() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "17"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.get_user_id("jack").await.unwrap_err();
    assert!(matches!(
        err,
        TwitterError::RateLimited {
            retry_after_secs: 17
        }
    ));
}

#[tokio::test]
async fn rate_limit_defaults_to_sixty_seconds() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.get_user_id("jack").await.unwrap_err();
    assert!(matches!(
        err,
        TwitterError::RateLimited {
            retry_after_secs: 60
        }
    ));
}

#[tokio::test]
async fn malformed_body_is_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.get_user_id("jack").await.unwrap_err();
    assert!(matches!(err, TwitterError::Deserialize { .. }));
}

#[tokio::test]
async fn server_error_is_retried_until_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2/users/by/username/jack"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/2/users/by/username/jack"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_body("12", "jack")))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client_with_retries(&server.uri(), 3);
    let user = client.get_user_id("jack").await.expect("should recover");
    assert_eq!(user.id, "12");
}

#[tokio::test]
async fn rate_limit_is_retried_after_zero_second_wait() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_body("12", "jack")))
        .mount(&server)
        .await;

    let client = test_client_with_retries(&server.uri(), 1);
    let user = client.get_user_id("jack").await.expect("should recover");
    assert_eq!(user.id, "12");
}

// ---------------------------------------------------------------------------
// fetch_user_tweets
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_user_tweets_sends_expected_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2/users/44196397/tweets"))
        .and(query_param("max_results", "10"))
        .and(query_param("tweet.fields", "created_at,text,public_metrics"))
        .and(query_param("exclude", "retweets,replies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tweets_body(&["first", "second"])))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let tweets = client
        .fetch_user_tweets("44196397", 10)
        .await
        .expect("fetch should succeed");

    assert_eq!(tweets.len(), 2);
    assert_eq!(tweets[0].text, "first");
    assert_eq!(tweets[1].public_metrics.as_ref().unwrap().like_count, 3);
}

#[tokio::test]
async fn fetch_user_tweets_clamps_small_page_size() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("max_results", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tweets_body(&["only"])))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let tweets = client.fetch_user_tweets("1", 1).await.unwrap();
    assert_eq!(tweets.len(), 1);
}

#[tokio::test]
async fn empty_timeline_returns_empty_vec() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"meta": {"result_count": 0}})))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let tweets = client.fetch_user_tweets("1", 10).await.unwrap();
    assert!(tweets.is_empty());
}

// ---------------------------------------------------------------------------
// batch collection
// ---------------------------------------------------------------------------

#[tokio::test]
async fn resolve_user_ids_skips_failures_and_keeps_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2/users/by/username/jack"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_body("12", "jack")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/2/users/by/username/ghost"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/2/users/by/username/saylor"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_body("244647486", "saylor")))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let resolved =
        resolve_user_ids(&client, &["jack", "ghost", "saylor"], Duration::ZERO).await;

    assert_eq!(
        resolved,
        vec![
            ResolvedAccount {
                username: "jack".to_owned(),
                user_id: "12".to_owned()
            },
            ResolvedAccount {
                username: "saylor".to_owned(),
                user_id: "244647486".to_owned()
            },
        ]
    );
}

#[tokio::test]
async fn fetch_all_tweets_attributes_records_and_isolates_failures() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2/users/12/tweets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tweets_body(&["just setting up"])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/2/users/99/tweets"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/2/users/7/tweets"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(tweets_body(&["bitcoin is hope", "gm"])),
        )
        .mount(&server)
        .await;

    let accounts = vec![
        ResolvedAccount {
            username: "jack".to_owned(),
            user_id: "12".to_owned(),
        },
        ResolvedAccount {
            username: "broken".to_owned(),
            user_id: "99".to_owned(),
        },
        ResolvedAccount {
            username: "saylor".to_owned(),
            user_id: "7".to_owned(),
        },
    ];

    let client = test_client(&server.uri());
    let records = fetch_all_tweets(&client, &accounts, 10, Duration::ZERO).await;

    let authors: Vec<&str> = records.iter().map(|r| r.author.as_str()).collect();
    assert_eq!(authors, vec!["jack", "saylor", "saylor"]);
    assert_eq!(records[1].text, "bitcoin is hope");
    assert!(matches!(records[0].created_at, CreatedAt::Parsed(_)));
}
