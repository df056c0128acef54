use std::sync::Arc;

use axum_test::TestServer;

use movie_recs_api::{
    catalog::CatalogStore,
    error::{AppError, AppResult},
    models::{MovieRecord, SimilarityMatrix},
    routes::{create_router, AppState},
    services::{
        posters::{ERROR_PLACEHOLDER, NO_POSTER_PLACEHOLDER},
        providers::{PosterLookup, PosterProvider},
        PosterFetcher, RecommendationEngine,
    },
};

/// Poster provider answering from the external id alone
struct FixtureProvider;

#[async_trait::async_trait]
impl PosterProvider for FixtureProvider {
    async fn fetch_poster(&self, movie_id: u64) -> AppResult<PosterLookup> {
        match movie_id {
            3 => Ok(PosterLookup::Missing),
            5 => Err(AppError::PosterFetchFailed("status 503".to_string())),
            id => Ok(PosterLookup::Found(format!(
                "https://image.tmdb.org/t/p/w500/{}.jpg",
                id
            ))),
        }
    }

    fn name(&self) -> &'static str {
        "fixture"
    }
}

fn create_catalog() -> CatalogStore {
    let titles = ["A", "B", "C", "D", "E", "F"];
    let records = titles
        .iter()
        .enumerate()
        .map(|(position, title)| MovieRecord {
            position,
            external_id: position as u64 + 1,
            title: title.to_string(),
        })
        .collect();
    let similarity = SimilarityMatrix::from_rows(vec![
        vec![1.0, 0.9, 0.8, 0.5, 0.3, 0.1],
        vec![0.9, 1.0, 0.2, 0.4, 0.6, 0.7],
        vec![0.8, 0.2, 1.0, 0.3, 0.3, 0.3],
        vec![0.5, 0.4, 0.3, 1.0, 0.2, 0.1],
        vec![0.3, 0.6, 0.3, 0.2, 1.0, 0.5],
        vec![0.1, 0.7, 0.3, 0.1, 0.5, 1.0],
    ])
    .unwrap();
    CatalogStore::from_parts(records, similarity).unwrap()
}

fn create_test_server() -> TestServer {
    let posters = PosterFetcher::new(Arc::new(FixtureProvider));
    let engine = RecommendationEngine::new(Arc::new(create_catalog()), posters);
    let app = create_router(Arc::new(AppState::new(engine)));
    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_recommendations() {
    let server = create_test_server();

    let response = server
        .get("/api/v1/recommendations")
        .add_query_param("title", "A")
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["title"], "A");
    assert!(body["message"].is_null());

    let recommendations = body["recommendations"].as_array().unwrap();
    let titles: Vec<&str> = recommendations
        .iter()
        .map(|rec| rec["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["B", "C", "D", "E", "F"]);

    assert_eq!(
        recommendations[0]["posterUrl"],
        "https://image.tmdb.org/t/p/w500/2.jpg"
    );
    assert_eq!(recommendations[1]["posterUrl"], NO_POSTER_PLACEHOLDER);
    assert_eq!(recommendations[3]["posterUrl"], ERROR_PLACEHOLDER);
}

#[tokio::test]
async fn test_recommendations_unknown_title() {
    let server = create_test_server();

    let response = server
        .get("/api/v1/recommendations")
        .add_query_param("title", "Unknown Movie")
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["recommendations"].as_array().unwrap().len(), 0);
    assert_eq!(body["message"], "Movie not found in database");
}

#[tokio::test]
async fn test_recommendations_blank_title() {
    let server = create_test_server();

    let response = server
        .get("/api/v1/recommendations")
        .add_query_param("title", "   ")
        .await;

    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "Movie title cannot be empty");
}

#[tokio::test]
async fn test_recommendations_missing_title() {
    let server = create_test_server();

    let response = server.get("/api/v1/recommendations").await;

    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
    assert_eq!(response.header("content-type"), "application/json");
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "Movie title cannot be empty");
}

#[tokio::test]
async fn test_list_movies() {
    let server = create_test_server();

    let response = server.get("/api/v1/movies").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["total"], 6);
    assert_eq!(body["movies"][0], "A");

    let response = server
        .get("/api/v1/movies")
        .add_query_param("q", "d")
        .await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["movies"], serde_json::json!(["D"]));
}

#[tokio::test]
async fn test_stats() {
    let server = create_test_server();

    let response = server.get("/api/v1/stats").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["moviesAvailable"], 6);
    assert_eq!(body["recommendationsPerSearch"], 5);
}

#[tokio::test]
async fn test_request_id_echoed() {
    let server = create_test_server();
    let request_id = "5f0c6d2e-8c1a-4d8e-9a51-0e3b7c2f4a10";

    let response = server
        .get("/health")
        .add_header(
            axum::http::HeaderName::from_static("x-request-id"),
            axum::http::HeaderValue::from_static(request_id),
        )
        .await;

    assert_eq!(response.header("x-request-id"), request_id);
}
