//! Common test utilities and fixtures
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, Response, StatusCode},
    Router,
};
use cadence_core::{CreateTrack, Role, User};
use cadence_server::{create_router, AppState, AuthService, PlayerSettings};
use cadence_storage::Database;
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;

/// Router plus the handles a test needs to arrange data
pub struct TestApp {
    pub router: Router,
    pub db: Arc<Database>,
    pub auth_service: Arc<AuthService>,
    pub state: AppState,
    _temp_dir: TempDir,
}

impl TestApp {
    /// Fresh app over a migrated `SQLite` file
    pub async fn new() -> Self {
        Self::with_settings(PlayerSettings::default()).await
    }

    pub async fn with_settings(player: PlayerSettings) -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_url = format!("sqlite://{}", temp_dir.path().join("test.db").display());
        let db = Arc::new(Database::connect(&db_url).await.expect("Failed to open database"));

        let auth_service = Arc::new(AuthService::new(
            "test-secret-key".to_string(),
            1, // 1 hour access
            1, // 1 day refresh
        ));

        let state = AppState::new(db.clone(), Arc::clone(&auth_service), player);

        Self {
            router: create_router(state.clone()),
            db,
            auth_service,
            state,
            _temp_dir: temp_dir,
        }
    }

    /// Rebuild the router from a modified state
    pub fn with_state(mut self, state: AppState) -> Self {
        self.router = create_router(state.clone());
        self.state = state;
        self
    }

    /// Create a user and return it with a valid access token
    pub async fn user(&self, name: &str, role: Role) -> (User, String) {
        let user = cadence_storage::users::create(self.db.pool(), name, role, "unused-hash")
            .await
            .expect("Failed to create user");
        let token = self
            .auth_service
            .create_access_token(&user.id, user.role)
            .unwrap();
        (user, token)
    }

    /// Insert tracks `ids` as album `album_id`, numbered in the given order
    pub async fn album(&self, album_id: &str, ids: &[&str]) {
        for (i, id) in ids.iter().enumerate() {
            let track = CreateTrack {
                id: Some((*id).into()),
                title: format!("Song {id}"),
                artist_id: "artist-1".to_string(),
                artist: "The Testers".to_string(),
                album_id: Some(album_id.to_string()),
                album: Some(format!("Album {album_id}")),
                track_number: Some(u32::try_from(i + 1).unwrap()),
                duration_ms: 180_000,
            };
            cadence_storage::tracks::create(self.db.pool(), &track)
                .await
                .expect("Failed to create track");
        }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        into_json(response).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: &Value) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .uri(uri)
            .method("POST")
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request("GET", uri, token).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request("DELETE", uri, token).await
    }

    async fn request(&self, method: &str, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder().uri(uri).method(method);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }
}

/// Status plus parsed JSON body (`Null` when empty)
pub async fn into_json(response: Response<Body>) -> (StatusCode, Value) {
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

/// Test user credentials
pub mod fixtures {
    pub const TEST_USERNAME: &str = "testuser";
    pub const TEST_PASSWORD: &str = "TestPassword123!";
}
