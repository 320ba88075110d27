use super::*;

fn test_client(base_url: &str) -> TwitterClient {
    TwitterClient::with_base_url("test-token", 30, 0, 0, base_url)
        .expect("client construction should not fail")
}

#[test]
fn endpoint_builds_user_lookup_path() {
    let client = test_client("https://api.twitter.com");
    let url = client.endpoint(&["2", "users", "by", "username", "jack"], &[]);
    assert_eq!(url.as_str(), "https://api.twitter.com/2/users/by/username/jack");
}

#[test]
fn endpoint_keeps_base_path_and_adds_query() {
    let client = test_client("http://localhost:8080/proxy/");
    let url = client.endpoint(
        &["2", "users", "42", "tweets"],
        &[("max_results", "10"), ("exclude", EXCLUDE)],
    );
    assert_eq!(
        url.as_str(),
        "http://localhost:8080/proxy/2/users/42/tweets?max_results=10&exclude=retweets%2Creplies"
    );
}

#[test]
fn endpoint_encodes_path_segments() {
    let client = test_client("https://api.twitter.com");
    let url = client.endpoint(&["2", "users", "by", "username", "a/b c"], &[]);
    assert!(
        url.path().ends_with("/a%2Fb%20c"),
        "segment should be percent-encoded: {url}"
    );
}

#[test]
fn max_results_is_clamped_to_api_range() {
    assert_eq!(clamp_max_results(0), MAX_RESULTS_FLOOR);
    assert_eq!(clamp_max_results(10), 10);
    assert_eq!(clamp_max_results(500), MAX_RESULTS_CEILING);
}

#[test]
fn invalid_base_url_is_rejected() {
    let result = TwitterClient::with_base_url("t", 30, 0, 0, "not a url");
    assert!(matches!(result, Err(TwitterError::InvalidBaseUrl { .. })));
}

#[test]
fn api_error_joins_messages() {
    let errors: Vec<ApiErrorItem> = serde_json::from_str(
        r#"[{"detail": "first"}, {"title": "second"}]"#,
    )
    .unwrap();
    let err = api_error(&errors, "fallback");
    assert!(matches!(err, TwitterError::ApiError(ref m) if m == "first; second"));

    let err = api_error(&[], "fallback");
    assert!(matches!(err, TwitterError::ApiError(ref m) if m == "fallback"));
}
