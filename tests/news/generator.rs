use achnews::config::AppConfig;
use achnews::news::template::LONGPLAY_PLACEHOLDER;
use achnews::news::{NewsError, NewsGenerator};
use achnews::tools::retroachievements::{RetroAchievementsConfig, RetroAchievementsToolError};
use achnews::tools::youtube::YoutubeConfig;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(ra_base_url: String, youtube_base_url: Option<String>) -> AppConfig {
    AppConfig {
        retroachievements: RetroAchievementsConfig {
            user: "scott".to_string(),
            web_api_key: "ra-key".to_string(),
            base_url: ra_base_url,
            timeout_secs: Some(5),
        },
        youtube: match youtube_base_url {
            Some(base_url) => YoutubeConfig {
                api_key: Some("yt-key".to_string()),
                base_url,
                timeout_secs: Some(5),
            },
            None => YoutubeConfig::default(),
        },
    }
}

async fn mount_game(server: &MockServer, game_id: &str, achievements: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/API/API_GetGameExtended.php"))
        .and(query_param("i", game_id))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "Title": "Foo~Bar",
            "ConsoleName": "Mega Drive",
            "Genre": "Platformer",
            "Developer": "Sega",
            "Released": "1991-06-23",
            "Achievements": achievements
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn generates_post_with_longplay_link() {
    let server = MockServer::start().await;
    mount_game(
        &server,
        "4650",
        serde_json::json!({
            "1": { "DateModified": "2020-01-01 10:00:00" },
            "2": { "DateModified": "2020-03-15 22:10:05" }
        }),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/youtube/v3/search"))
        .and(query_param("q", "longplay FooBar Mega Drive"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [{ "id": { "kind": "youtube#video", "videoId": "abc123" } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let generator = NewsGenerator::new(config(server.uri(), Some(server.uri())))
        .expect("Failed to build generator");
    let post = generator.generate(4650).await.expect("Generation failed");

    assert!(post.contains("< FooBar >"));
    assert!(!post.contains('~'));
    assert!(post.contains("[Mega Drive, Platformer](Sega)< 1991-06-23 >"));
    assert!(post.contains("on 2020-03-15\n"));
    assert!(post.contains("\nhttps://www.youtube.com/watch?v=abc123\n"));
    assert!(post.contains("<https://retroachievements.org/game/4650>"));
}

#[tokio::test]
async fn falls_back_to_placeholder_when_search_finds_nothing() {
    let server = MockServer::start().await;
    mount_game(
        &server,
        "4650",
        serde_json::json!({ "1": { "DateModified": "2020-03-15 22:10:05" } }),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/youtube/v3/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": []
        })))
        .mount(&server)
        .await;

    let generator = NewsGenerator::new(config(server.uri(), Some(server.uri())))
        .expect("Failed to build generator");
    let post = generator.generate(4650).await.expect("Generation failed");

    assert!(post.contains(&format!("\n{}\n", LONGPLAY_PLACEHOLDER)));
}

#[tokio::test]
async fn search_failure_does_not_fail_generation() {
    let server = MockServer::start().await;
    mount_game(
        &server,
        "4650",
        serde_json::json!({ "1": { "DateModified": "2020-03-15 22:10:05" } }),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/youtube/v3/search"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let generator = NewsGenerator::new(config(server.uri(), Some(server.uri())))
        .expect("Failed to build generator");
    let post = generator.generate(4650).await.expect("Generation failed");

    assert!(post.contains(LONGPLAY_PLACEHOLDER));
}

#[tokio::test]
async fn skips_search_without_api_key() {
    let server = MockServer::start().await;
    mount_game(
        &server,
        "4650",
        serde_json::json!({ "1": { "DateModified": "2020-03-15 22:10:05" } }),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/youtube/v3/search"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let generator =
        NewsGenerator::new(config(server.uri(), None)).expect("Failed to build generator");
    let post = generator.generate(4650).await.expect("Generation failed");

    assert!(post.contains(LONGPLAY_PLACEHOLDER));
}

#[tokio::test]
async fn empty_achievements_fail_without_searching() {
    let server = MockServer::start().await;
    mount_game(&server, "9999", serde_json::json!([])).await;
    Mock::given(method("GET"))
        .and(path("/youtube/v3/search"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let generator = NewsGenerator::new(config(server.uri(), Some(server.uri())))
        .expect("Failed to build generator");
    let err = generator
        .generate(9999)
        .await
        .expect_err("Expected GameInfoUnavailable error");

    assert_eq!(
        err.to_string(),
        "Unable to get info from the game ID `9999`... :frowning:"
    );
    match err {
        NewsError::GameInfoUnavailable { game_id, source } => {
            assert_eq!(game_id, 9999);
            assert!(matches!(
                source,
                RetroAchievementsToolError::NoAchievements(9999)
            ));
        }
    }
}

#[tokio::test]
async fn catalog_errors_are_coalesced() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/API/API_GetGameExtended.php"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not found"))
        .mount(&server)
        .await;

    let generator =
        NewsGenerator::new(config(server.uri(), None)).expect("Failed to build generator");
    let err = generator
        .generate(123)
        .await
        .expect_err("Expected GameInfoUnavailable error");

    assert_eq!(
        err.to_string(),
        "Unable to get info from the game ID `123`... :frowning:"
    );
}
