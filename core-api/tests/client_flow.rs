//! End-to-end tests of the client facade against a scripted backend.

use async_trait::async_trait;
use bridge_traits::error::Result as BridgeResult;
use bridge_traits::http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
use bridge_traits::storage::KeyValueStore;
use bytes::Bytes;
use core_api::types::{FeedbackDraft, SessionDraft};
use core_api::SkillShareClient;
use core_auth::LoginRequest;
use core_runtime::config::ClientConfig;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use uuid::Uuid;

const USER_JSON: &str = r#"{
    "id": "4a3f9c7e-5b2d-4e8a-9f1c-0d6b7a8e9f10",
    "email": "alice@example.com",
    "name": "Alice",
    "skills": ["rust"],
    "average_rating": 4.0,
    "role": "admin",
    "created_at": "2024-01-15T10:00:00Z",
    "updated_at": "2024-01-15T10:00:00Z"
}"#;

const SESSION_JSON: &str = r#"{
    "id": "7f6e5d4c-3b2a-1908-8776-5544332211aa",
    "title": "Intro to Sourdough",
    "description": "Hands-on baking basics",
    "category": "cooking",
    "date_time": "2024-03-01T18:00:00Z",
    "location": "Community Kitchen",
    "max_participants": 8,
    "creator_id": "4a3f9c7e-5b2d-4e8a-9f1c-0d6b7a8e9f10",
    "created_at": "2024-02-01T09:00:00Z",
    "updated_at": "2024-02-02T09:00:00Z"
}"#;

#[derive(Default)]
struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn set(&self, key: &str, value: &str) -> BridgeResult<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
    async fn get(&self, key: &str) -> BridgeResult<Option<String>> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }
    async fn remove(&self, key: &str) -> BridgeResult<()> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
    async fn list_keys(&self) -> BridgeResult<Vec<String>> {
        Ok(self.entries.lock().unwrap().keys().cloned().collect())
    }
    async fn clear_all(&self) -> BridgeResult<()> {
        self.entries.lock().unwrap().clear();
        Ok(())
    }
}

/// Records (method, path, body) of every request; answers by route table.
struct ScriptedBackend {
    requests: Mutex<Vec<(HttpMethod, String, Option<String>)>>,
    timeouts: Mutex<Vec<Option<Duration>>>,
}

impl ScriptedBackend {
    fn new() -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            timeouts: Mutex::new(Vec::new()),
        }
    }

    fn recorded(&self) -> Vec<(HttpMethod, String, Option<String>)> {
        self.requests.lock().unwrap().clone()
    }

    fn recorded_timeouts(&self) -> Vec<Option<Duration>> {
        self.timeouts.lock().unwrap().clone()
    }

    fn respond(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: HashMap::new(),
            body: Bytes::from(body.to_string()),
        }
    }
}

#[async_trait]
impl HttpClient for ScriptedBackend {
    async fn execute(&self, request: HttpRequest) -> BridgeResult<HttpResponse> {
        let path = request
            .url
            .strip_prefix("http://localhost:8080")
            .unwrap_or(&request.url)
            .to_string();
        let body = request
            .body
            .as_ref()
            .map(|b| String::from_utf8_lossy(b).into_owned());
        self.requests
            .lock()
            .unwrap()
            .push((request.method, path.clone(), body));
        self.timeouts.lock().unwrap().push(request.timeout);

        let response = match path.as_str() {
            "/auth/login" | "/auth/register" => Self::respond(
                200,
                r#"{"access_token":"valid-access","refresh_token":"valid-refresh","expires_in":3600}"#,
            ),
            "/api/users/me" => Self::respond(200, USER_JSON),
            p if p.starts_with("/api/sessions") && request.method == HttpMethod::Get => {
                if p == "/api/sessions" || p == "/api/sessions/recommended" || p == "/api/sessions/my"
                {
                    Self::respond(200, &format!("[{}]", SESSION_JSON))
                } else if p.ends_with("/feedback") {
                    Self::respond(200, "[]")
                } else if p.ends_with("/participants") {
                    Self::respond(200, &format!("[{}]", USER_JSON))
                } else {
                    Self::respond(200, SESSION_JSON)
                }
            }
            p if p.starts_with("/api/sessions") => {
                if p.ends_with("/join") || p.ends_with("/leave") {
                    Self::respond(200, "{}")
                } else if p.ends_with("/feedback") {
                    Self::respond(
                        201,
                        r#"{
                            "id": "9f8e7d6c-5b4a-3928-1706-554433221100",
                            "session_id": "7f6e5d4c-3b2a-1908-8776-5544332211aa",
                            "user_id": "4a3f9c7e-5b2d-4e8a-9f1c-0d6b7a8e9f10",
                            "rating": 5,
                            "comment": "Great session",
                            "created_at": "2024-03-02T10:00:00Z"
                        }"#,
                    )
                } else {
                    Self::respond(201, SESSION_JSON)
                }
            }
            "/api/notifications/read-all" => Self::respond(200, "{}"),
            p if p.starts_with("/api/notifications/unread") => Self::respond(200, "[]"),
            p if p.starts_with("/api/notifications/") => Self::respond(200, "{}"),
            p if p.starts_with("/api/admin/") || p.starts_with("/api/moderator/") => {
                Self::respond(200, "{}")
            }
            "/api/logout" => Self::respond(200, "{}"),
            _ => Self::respond(404, "{}"),
        };
        Ok(response)
    }
}

fn build_client(backend: Arc<ScriptedBackend>) -> SkillShareClient {
    let config = ClientConfig::builder()
        .api_base_url("http://localhost:8080")
        .http_client(backend)
        .storage(Arc::new(MemoryStore::default()))
        .build()
        .unwrap();
    SkillShareClient::new(config)
}

async fn signed_in_client(backend: Arc<ScriptedBackend>) -> SkillShareClient {
    let client = build_client(backend);
    client.initialize().await.unwrap();
    client
        .session()
        .login(LoginRequest {
            email: "alice@example.com".to_string(),
            password: Some("pw".to_string()),
        })
        .await
        .unwrap();
    client
}

#[tokio::test]
async fn login_then_list_sessions_carries_bearer() {
    let backend = Arc::new(ScriptedBackend::new());
    let client = signed_in_client(backend.clone()).await;

    assert!(client.session().is_authenticated());

    let sessions = client.sessions().list().await.unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].category, "cooking");
}

#[tokio::test]
async fn session_crud_hits_expected_routes() {
    let backend = Arc::new(ScriptedBackend::new());
    let client = signed_in_client(backend.clone()).await;

    let draft = SessionDraft {
        title: "Intro to Sourdough".to_string(),
        description: "Hands-on baking basics".to_string(),
        category: "cooking".to_string(),
        date_time: "2024-03-01T18:00:00Z".parse().unwrap(),
        location: "Community Kitchen".to_string(),
        max_participants: 8,
    };

    let created = client.sessions().create(&draft).await.unwrap();
    client.sessions().update(created.id, &draft).await.unwrap();
    client.sessions().join(created.id).await.unwrap();
    client.sessions().leave(created.id).await.unwrap();
    client.sessions().remove(created.id).await.unwrap();

    let paths: Vec<(HttpMethod, String)> = backend
        .recorded()
        .into_iter()
        .map(|(m, p, _)| (m, p))
        .collect();

    let id = created.id;
    assert!(paths.contains(&(HttpMethod::Post, "/api/sessions".to_string())));
    assert!(paths.contains(&(HttpMethod::Put, format!("/api/sessions/{}", id))));
    assert!(paths.contains(&(HttpMethod::Post, format!("/api/sessions/{}/join", id))));
    assert!(paths.contains(&(HttpMethod::Post, format!("/api/sessions/{}/leave", id))));
    assert!(paths.contains(&(HttpMethod::Delete, format!("/api/sessions/{}", id))));
}

#[tokio::test]
async fn feedback_submission_sends_rating_payload() {
    let backend = Arc::new(ScriptedBackend::new());
    let client = signed_in_client(backend.clone()).await;

    let session_id: Uuid = "7f6e5d4c-3b2a-1908-8776-5544332211aa".parse().unwrap();
    let feedback = client
        .feedback()
        .submit(
            session_id,
            &FeedbackDraft {
                rating: 5,
                comment: "Great session".to_string(),
            },
        )
        .await
        .unwrap();

    assert_eq!(feedback.rating, 5);

    let (_, path, body) = backend
        .recorded()
        .into_iter()
        .find(|(m, p, _)| *m == HttpMethod::Post && p.ends_with("/feedback"))
        .unwrap();
    assert_eq!(path, format!("/api/sessions/{}/feedback", session_id));
    let payload: serde_json::Value = serde_json::from_str(&body.unwrap()).unwrap();
    assert_eq!(payload["rating"], 5);
}

#[tokio::test]
async fn admin_role_update_serializes_role_body() {
    let backend = Arc::new(ScriptedBackend::new());
    let client = signed_in_client(backend.clone()).await;

    let user = client.session().current_user().unwrap();
    client
        .admin()
        .update_role(user.id, core_auth::Role::Moderator)
        .await
        .unwrap();

    let (_, path, body) = backend
        .recorded()
        .into_iter()
        .find(|(m, p, _)| *m == HttpMethod::Put && p.contains("/role"))
        .unwrap();
    assert_eq!(path, format!("/api/admin/users/{}/role", user.id));
    let payload: serde_json::Value = serde_json::from_str(&body.unwrap()).unwrap();
    assert_eq!(payload["role"], "moderator");
}

#[tokio::test]
async fn configured_request_timeout_reaches_transport() {
    let backend = Arc::new(ScriptedBackend::new());
    let config = ClientConfig::builder()
        .api_base_url("http://localhost:8080")
        .request_timeout(Duration::from_secs(5))
        .http_client(backend.clone())
        .storage(Arc::new(MemoryStore::default()))
        .build()
        .unwrap();
    let client = SkillShareClient::new(config);
    client.initialize().await.unwrap();

    client
        .session()
        .login(LoginRequest {
            email: "alice@example.com".to_string(),
            password: Some("pw".to_string()),
        })
        .await
        .unwrap();
    client.sessions().list().await.unwrap();

    let timeouts = backend.recorded_timeouts();
    assert!(!timeouts.is_empty());
    assert!(timeouts.iter().all(|t| *t == Some(Duration::from_secs(5))));
}

#[tokio::test]
async fn logout_leaves_client_unauthenticated() {
    let backend = Arc::new(ScriptedBackend::new());
    let client = signed_in_client(backend).await;

    client.session().logout().await;

    assert!(!client.session().is_authenticated());
    assert!(client.session().current_user().is_none());
}
