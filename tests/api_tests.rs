// tests/api_tests.rs

use std::sync::Arc;
use std::time::Duration;

use nova_lesson::{
    config::Config, lesson::content::LESSON_NAME, models::progress::SessionRecord, routes,
    state::AppState, store::MemoryProgressStore,
};
use serde_json::{Value, json};

struct TestApp {
    address: String,
    store: MemoryProgressStore,
    client: reqwest::Client,
}

/// Helper function to spawn the app on a random port for testing.
/// Progress is written to an in-memory store the test can inspect.
async fn spawn_app() -> TestApp {
    let config = Config {
        database_url: None,
        jwt_secret: "test_secret_for_integration_tests".to_string(),
        jwt_expiration: 600,
        rust_log: "error".to_string(),
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        allowed_origins: vec!["http://localhost:3000".to_string()],
    };

    let store = MemoryProgressStore::new();
    let state = AppState::new(config, Arc::new(store.clone()));
    let app = routes::create_router(state);

    // Bind to port 0 to get a random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp {
        address,
        store,
        client: reqwest::Client::new(),
    }
}

impl TestApp {
    async fn sign_in(&self) -> (String, String) {
        let resp: Value = self
            .client
            .post(format!("{}/api/auth/anonymous", self.address))
            .send()
            .await
            .expect("Sign-in failed")
            .json()
            .await
            .unwrap();
        (
            resp["token"].as_str().unwrap().to_string(),
            resp["uid"].as_str().unwrap().to_string(),
        )
    }

    async fn create_session(&self, token: Option<&str>) -> String {
        let mut req = self.client.post(format!("{}/api/sessions", self.address));
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        let resp = req.send().await.expect("Create session failed");
        assert_eq!(resp.status().as_u16(), 201);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["stage"], "start");
        assert_eq!(body["camera_granted"], Value::Null);
        body["id"].as_str().unwrap().to_string()
    }

    async fn post(&self, session: &str, action: &str, body: Value) -> reqwest::Response {
        self.client
            .post(format!("{}/api/sessions/{}/{}", self.address, session, action))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    async fn post_with_token(
        &self,
        session: &str,
        action: &str,
        token: &str,
        body: Value,
    ) -> reqwest::Response {
        self.client
            .post(format!("{}/api/sessions/{}/{}", self.address, session, action))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Progress is written in the background after submit; poll until it lands.
    async fn wait_for_record(&self, uid: &str) -> SessionRecord {
        for _ in 0..100 {
            if let Some(record) = self.store.get(uid) {
                return record;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!("progress record for {} was never written", uid);
    }

    async fn reach_quiz(&self, session: &str) {
        let resp = self.post(session, "begin", json!({"camera_granted": true})).await;
        assert_eq!(resp.status().as_u16(), 200);
        let resp = self.post(session, "proceed", json!({})).await;
        assert_eq!(resp.status().as_u16(), 200);
    }

    async fn answer(&self, session: &str, question: &str, value: &str) {
        let resp = self
            .post(session, "answers", json!({"question": question, "value": value}))
            .await;
        assert_eq!(resp.status().as_u16(), 200);
    }
}

#[tokio::test]
async fn unknown_path_is_404() {
    let app = spawn_app().await;

    let response = app
        .client
        .get(format!("{}/random_path_that_does_not_exist", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn lesson_content_lists_three_questions() {
    let app = spawn_app().await;

    let body: Value = app
        .client
        .get(format!("{}/api/lesson", app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["name"], LESSON_NAME);
    let questions = body["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 3);
    assert_eq!(questions[0]["id"], "q1");
    assert_eq!(questions[1]["choices"], json!(["Europa Clipper", "Lunar Gateway"]));
    assert!(questions.iter().all(|q| q.get("answer").is_none()));
}

#[tokio::test]
async fn denied_then_granted_camera_to_a_recorded_score_of_two() {
    let app = spawn_app().await;
    let (token, uid) = app.sign_in().await;
    let session = app.create_session(Some(&token)).await;

    // Denied: blocking notice, still on Start
    let resp = app.post(&session, "begin", json!({"camera_granted": false})).await;
    assert_eq!(resp.status().as_u16(), 403);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Webcam permission is required to proceed.");

    let view: Value = app
        .client
        .get(format!("{}/api/sessions/{}", app.address, session))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(view["stage"], "start");
    assert_eq!(view["camera_granted"], false);
    assert_eq!(view["answers"], json!({}));

    // Granted on retry
    let resp = app.post(&session, "begin", json!({"camera_granted": true})).await;
    assert_eq!(resp.status().as_u16(), 200);
    let view: Value = resp.json().await.unwrap();
    assert_eq!(view["stage"], "lesson");
    assert_eq!(view["camera_granted"], true);

    let view: Value = app.post(&session, "proceed", json!({})).await.json().await.unwrap();
    assert_eq!(view["stage"], "quiz");

    app.answer(&session, "q1", "2024").await;
    app.answer(&session, "q2", "Lunar Gateway").await;
    app.answer(&session, "q3", "SpaceX Starship").await;

    let resp = app.post(&session, "submit", json!({})).await;
    assert_eq!(resp.status().as_u16(), 200);
    let result: Value = resp.json().await.unwrap();
    assert_eq!(result["score"], 2);
    assert_eq!(result["session"]["stage"], "result");
    assert_eq!(result["session"]["outcome"]["headline"], "👍 Good Try!");
    assert_eq!(result["session"]["outcome"]["badge"], Value::Null);
    assert_eq!(result["session"]["outcome"]["summary"], "You scored 2 out of 3.");

    let record = app.wait_for_record(&uid).await;
    assert_eq!(app.store.len(), 1);
    assert_eq!(record.score, 2);
    assert_eq!(record.lesson, LESSON_NAME);
    assert_eq!(record.location, "Not available");
}

#[tokio::test]
async fn perfect_score_earns_the_badge_and_records_raw_location() {
    let app = spawn_app().await;
    let (token, uid) = app.sign_in().await;
    let session = app.create_session(None).await;

    let resp = app
        .post(&session, "location", json!({"lat": 37.774929, "lon": -122.419416}))
        .await;
    assert_eq!(resp.status().as_u16(), 200);
    let ack: Value = resp.json().await.unwrap();
    assert_eq!(ack["accepted"], true);
    assert_eq!(ack["location"]["display"], "37.77, -122.42");

    app.reach_quiz(&session).await;
    app.answer(&session, "q1", "2026").await;
    app.answer(&session, "q1", "2024").await;
    app.answer(&session, "q2", "Europa Clipper").await;
    app.answer(&session, "q3", "SpaceX Starship").await;

    // Identity arrives with the submission itself
    let resp = app.post_with_token(&session, "submit", &token, json!({})).await;
    let result: Value = resp.json().await.unwrap();
    assert_eq!(result["score"], 3);
    assert_eq!(result["session"]["outcome"]["headline"], "🌟 Excellent!");
    assert_eq!(
        result["session"]["outcome"]["badge"],
        "🏅 You’ve earned the Nova Explorer Badge!"
    );

    let record = app.wait_for_record(&uid).await;
    assert_eq!(record.score, 3);
    assert_eq!(record.location, "37.774929, -122.419416");
}

#[tokio::test]
async fn submission_without_identity_shows_score_but_writes_nothing() {
    let app = spawn_app().await;
    let session = app.create_session(None).await;
    app.reach_quiz(&session).await;
    app.answer(&session, "q1", "2024").await;

    let resp = app.post(&session, "submit", json!({})).await;
    assert_eq!(resp.status().as_u16(), 200);
    let result: Value = resp.json().await.unwrap();
    assert_eq!(result["score"], 1);
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(app.store.is_empty());
}

#[tokio::test]
async fn second_submission_is_rejected() {
    let app = spawn_app().await;
    let (token, uid) = app.sign_in().await;
    let session = app.create_session(Some(&token)).await;
    app.reach_quiz(&session).await;

    assert_eq!(app.post(&session, "submit", json!({})).await.status().as_u16(), 200);
    assert_eq!(app.wait_for_record(&uid).await.score, 0);
    assert_eq!(app.post(&session, "submit", json!({})).await.status().as_u16(), 409);
    assert_eq!(app.store.len(), 1);
}

#[tokio::test]
async fn first_location_report_wins() {
    let app = spawn_app().await;
    let session = app.create_session(None).await;

    let ack: Value = app
        .post(&session, "location", json!({"error": "User denied Geolocation"}))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(ack["accepted"], true);
    assert_eq!(ack["location"]["error"], "User denied Geolocation");

    let ack: Value = app
        .post(&session, "location", json!({"lat": 1.0, "lon": 2.0}))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(ack["accepted"], false);
    assert_eq!(ack["location"]["display"], Value::Null);
    assert_eq!(ack["location"]["error"], "User denied Geolocation");
}

#[tokio::test]
async fn out_of_range_location_is_a_bad_request() {
    let app = spawn_app().await;
    let session = app.create_session(None).await;

    let resp = app
        .post(&session, "location", json!({"lat": 91.0, "lon": 0.0}))
        .await;
    assert_eq!(resp.status().as_u16(), 400);
}

#[tokio::test]
async fn location_report_with_both_shapes_is_rejected() {
    let app = spawn_app().await;
    let session = app.create_session(None).await;

    let resp = app
        .post(
            &session,
            "location",
            json!({"lat": 1.0, "lon": 2.0, "error": "User denied Geolocation"}),
        )
        .await;
    assert_eq!(resp.status().as_u16(), 422);

    let view: Value = app
        .client
        .get(format!("{}/api/sessions/{}", app.address, session))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(view["location"]["display"], Value::Null);
    assert_eq!(view["location"]["error"], Value::Null);
}

#[tokio::test]
async fn actions_out_of_order_are_conflicts() {
    let app = spawn_app().await;
    let session = app.create_session(None).await;

    let resp = app
        .post(&session, "answers", json!({"question": "q1", "value": "2024"}))
        .await;
    assert_eq!(resp.status().as_u16(), 409);
    assert_eq!(app.post(&session, "proceed", json!({})).await.status().as_u16(), 409);
    assert_eq!(app.post(&session, "submit", json!({})).await.status().as_u16(), 409);
}

#[tokio::test]
async fn unknown_session_is_404() {
    let app = spawn_app().await;

    let resp = app
        .client
        .get(format!("{}/api/sessions/{}", app.address, uuid::Uuid::new_v4()))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 404);
}

#[tokio::test]
async fn invalid_token_is_unauthorized() {
    let app = spawn_app().await;
    let session = app.create_session(None).await;

    let resp = app
        .post_with_token(&session, "proceed", "not-a-jwt", json!({}))
        .await;
    assert_eq!(resp.status().as_u16(), 401);
}
