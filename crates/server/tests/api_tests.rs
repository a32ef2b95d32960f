use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use data_loader::{GameDataset, GameRecord};
use server::{AppState, create_router};

fn create_test_app() -> Router {
    let dataset = GameDataset::from_records(vec![
        GameRecord::new("A", "X", "RPG", 2010, 8.0),
        GameRecord::new("B", "X", "RPG", 2011, 8.2),
        GameRecord::new("C", "Y", "Platform", 2010, 6.0),
        GameRecord::new("Halo 5", "Xbox One", "Shooter, Action", 2015, 9.0).with_release_month(10),
        GameRecord::new("Uncharted 4", "PlayStation 4", "Action, Adventure", 2016, 10.0)
            .with_release_month(5),
    ]);
    create_router(AppState::new(Arc::new(dataset)))
}

async fn get(uri: &str) -> (StatusCode, Value) {
    let response = create_test_app()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

#[tokio::test]
async fn test_health_check() {
    let (status, _) = get("/health").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_root_message() {
    let (status, body) = get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Welcome to the Game Review API");
}

#[tokio::test]
async fn test_recommend_returns_ranked_games() {
    let (status, body) = get("/recommend?game_title=A&n=2").await;
    assert_eq!(status, StatusCode::OK);

    let recs = body.as_array().unwrap();
    assert_eq!(recs.len(), 2);
    assert_eq!(recs[0]["title"], "B");
    assert_eq!(recs[0]["platform"], "X");
    assert_eq!(recs[0]["genre"], "RPG");
    assert_eq!(recs[0]["score"], 8.2);
    assert!(recs.iter().all(|r| r["title"] != "A"));
}

#[tokio::test]
async fn test_recommend_default_count() {
    let (status, body) = get("/recommend?game_title=A").await;
    assert_eq!(status, StatusCode::OK);
    // Default of 5, but only 4 other games exist
    assert_eq!(body.as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_recommend_url_encoded_title() {
    let (status, body) = get("/recommend?game_title=Halo%205&n=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_recommend_unknown_title_is_404() {
    let (status, body) = get("/recommend?game_title=Missing&n=3").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("Game title not found"));
}

#[tokio::test]
async fn test_recommend_zero_and_negative_counts_are_empty() {
    let (status, body) = get("/recommend?game_title=A&n=0").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());

    let (status, body) = get("/recommend?game_title=A&n=-2").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_recommend_bad_count_is_400() {
    let (status, body) = get("/recommend?game_title=A&n=lots").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("n must be an integer"));
}

#[tokio::test]
async fn test_recommend_missing_title_is_400() {
    let (status, _) = get("/recommend?n=3").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_reviews_by_year() {
    let (status, body) = get("/reviews-by-year").await;
    assert_eq!(status, StatusCode::OK);

    let rows = body.as_array().unwrap();
    assert_eq!(rows[0]["release_year"], 2010);
    assert_eq!(rows[0]["title"], 2);
    assert_eq!(rows.len(), 4);
}

#[tokio::test]
async fn test_reviews_by_month() {
    let (status, body) = get("/reviews-by-month").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!([[5, 1], [10, 1]]));
}

#[tokio::test]
async fn test_genre_popularity() {
    let (status, body) = get("/genre-popularity").await;
    assert_eq!(status, StatusCode::OK);

    let rows = body.as_array().unwrap();
    assert_eq!(rows[0]["genre"], "Action");
    assert_eq!(rows[0]["num_games"], 2);
    assert_eq!(rows[0]["average_score"], 9.5);
}

#[tokio::test]
async fn test_platform_distribution() {
    let (status, body) = get("/platform-distribution").await;
    assert_eq!(status, StatusCode::OK);

    let rows = body.as_array().unwrap();
    let y2010 = rows.iter().find(|r| r["release_year"] == 2010).unwrap();
    assert_eq!(y2010["Other"], 2);
    assert_eq!(y2010["Xbox"], 0);

    let y2015 = rows.iter().find(|r| r["release_year"] == 2015).unwrap();
    assert_eq!(y2015["Xbox"], 1);
}
