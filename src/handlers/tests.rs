use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, Response, StatusCode},
    Router,
};
use chrono::Duration;
use futures::future::BoxFuture;
use tower::ServiceExt;
use uuid::Uuid;

use crate::{
    config::Config,
    crypto::session_token::SessionKey,
    error::{AppError, Result},
    models::{
        note::{NewNote, Note},
        session::Session,
    },
    repositories::{
        memory::{MemoryNoteStore, MemoryUserStore},
        note::NoteStore,
        session::{MemorySessionStore, SessionStore},
    },
    routes,
    services::notes::today,
    state::AppState,
};

struct TestApp {
    router: Router,
    users: MemoryUserStore,
    notes: MemoryNoteStore,
    sessions: MemorySessionStore,
}

impl TestApp {
    fn new() -> Self {
        let notes = MemoryNoteStore::default();
        Self::with_note_store(notes.clone(), Arc::new(notes))
    }

    /// Builds the app around `note_store`; `notes` is kept for inspection.
    fn with_note_store(notes: MemoryNoteStore, note_store: Arc<dyn NoteStore>) -> Self {
        let users = MemoryUserStore::default();
        let sessions = MemorySessionStore::new();
        let state = AppState::from_parts(
            &Config::for_tests(),
            Arc::new(users.clone()),
            note_store,
            Arc::new(sessions.clone()),
        );

        Self {
            router: routes::router(state),
            users,
            notes,
            sessions,
        }
    }

    async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    async fn post(&self, uri: &str, body: &str, cookie: Option<&str>) -> Response<Body> {
        let mut request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        self.send(request.body(Body::from(body.to_string())).unwrap()).await
    }

    async fn get(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        let mut request = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        self.send(request.body(Body::empty()).unwrap()).await
    }

    /// Signs up and logs in `username`, returning the `Cookie` header value.
    async fn login_as(&self, username: &str) -> String {
        let signup = self
            .post("/signup", &format!("username={username}&password=pw-123&firstName=Sam"), None)
            .await;
        assert_eq!(signup.status(), StatusCode::OK);

        let login = self
            .post("/login", &format!("username={username}&password=pw-123"), None)
            .await;
        assert_eq!(login.status(), StatusCode::SEE_OTHER);
        session_cookie(&login).expect("login sets a session cookie")
    }
}

/// A `NoteStore` whose every call fails, as when the database is down.
struct UnavailableNoteStore;

impl NoteStore for UnavailableNoteStore {
    fn list_for_user(&self, _user_id: i32) -> BoxFuture<'_, Result<Vec<Note>>> {
        Box::pin(async { Err(AppError::Internal("notes table unavailable".into())) })
    }

    fn create(&self, _note: NewNote) -> BoxFuture<'_, Result<Note>> {
        Box::pin(async { Err(AppError::Internal("notes table unavailable".into())) })
    }
}

fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|value| value.split(';').next())
        .find(|pair| pair.starts_with("session_id=") && pair.len() > "session_id=".len())
        .map(str::to_string)
}

fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn signup_creates_user() {
    let app = TestApp::new();

    let response = app
        .post("/signup", "username=alice&password=secret&firstName=Alice&lastName=Liddell", None)
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Registration successful"));
    assert_eq!(app.users.count().await, 1);
}

#[tokio::test]
async fn duplicate_signup_is_rejected_without_second_row() {
    let app = TestApp::new();
    app.post("/signup", "username=alice&password=secret", None).await;

    let response = app.post("/signup", "username=alice&password=other", None).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(response).await, "Username already exists.");
    assert_eq!(app.users.count().await, 1);
}

#[tokio::test]
async fn signup_requires_username_and_password() {
    let app = TestApp::new();

    for body in ["username=alice", "password=secret", "username=&password=secret", ""] {
        let response = app.post("/signup", body, None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body {body:?}");
        assert_eq!(body_text(response).await, "Username and password are required.");
    }
    assert_eq!(app.users.count().await, 0);
}

#[tokio::test]
async fn login_with_wrong_password_creates_no_session() {
    let app = TestApp::new();
    app.post("/signup", "username=alice&password=secret", None).await;

    let response = app.post("/login", "username=alice&password=wrong", None).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(session_cookie(&response).is_none());
    assert!(body_text(response).await.contains("Invalid username or password"));
    assert_eq!(app.sessions.len().await, 0);
}

#[tokio::test]
async fn login_with_unknown_username_is_rejected() {
    let app = TestApp::new();

    let response = app.post("/login", "username=nobody&password=secret", None).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response).await.contains("username not found"));
    assert_eq!(app.sessions.len().await, 0);
}

#[tokio::test]
async fn login_redirects_home_with_session_cookie() {
    let app = TestApp::new();
    app.post("/signup", "username=alice&password=secret", None).await;

    let response = app.post("/login", "username=alice&password=secret", None).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    assert!(session_cookie(&response).is_some());
    assert_eq!(app.sessions.len().await, 1);
}

#[tokio::test]
async fn note_without_session_is_unauthorized() {
    let app = TestApp::new();

    let response = app
        .post("/foodNoteForm", "FoodTitle=Lunch&FoodNote=Salad", None)
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(app.notes.count().await, 0);
}

#[tokio::test]
async fn note_with_forged_cookie_is_unauthorized() {
    let app = TestApp::new();
    let cookie = app.login_as("alice").await;
    let flipped = if cookie.ends_with('0') { '1' } else { '0' };
    let forged = format!("{}{}", &cookie[..cookie.len() - 1], flipped);

    let response = app
        .post("/foodNoteForm", "FoodTitle=Lunch&FoodNote=Salad", Some(&forged))
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(app.notes.count().await, 0);
}

#[tokio::test]
async fn expired_session_is_unauthorized_and_destroyed() {
    let app = TestApp::new();
    let id = Uuid::new_v4();
    app.sessions
        .create(id, Session::start(1, "alice".into(), -1), 0)
        .await
        .unwrap();
    let signed = SessionKey::derive(&Config::for_tests().session_secret).sign(&id);
    let cookie = format!("session_id={signed}");
    assert_eq!(app.sessions.len().await, 1);

    let response = app
        .post("/foodNoteForm", "FoodTitle=Lunch&FoodNote=Salad", Some(&cookie))
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(app.notes.count().await, 0);
    assert_eq!(app.sessions.len().await, 0);
}

#[tokio::test]
async fn home_degrades_to_anonymous_when_notes_fail_to_load() {
    let app = TestApp::with_note_store(MemoryNoteStore::default(), Arc::new(UnavailableNoteStore));
    let cookie = app.login_as("alice").await;

    let response = app.get("/", Some(&cookie)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let home = body_text(response).await;
    assert!(!home.contains("in a row"));
    assert!(!home.contains("foodNoteForm"));
    assert!(home.contains(r#"href="/login""#));
}

#[tokio::test]
async fn unauthorized_wins_over_missing_fields() {
    let app = TestApp::new();

    let response = app.post("/foodNoteForm", "", None).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn note_requires_title_and_body() {
    let app = TestApp::new();
    let cookie = app.login_as("alice").await;

    let response = app
        .post("/foodNoteForm", "FoodTitle=Lunch", Some(&cookie))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(response).await, "foodTitle and FoodNote are required.");
    assert_eq!(app.notes.count().await, 0);
}

#[tokio::test]
async fn saved_note_extends_the_streak() {
    let app = TestApp::new();
    let cookie = app.login_as("alice").await;

    for days_ago in [1, 2] {
        app.notes
            .seed(NewNote {
                user_id: 1,
                title: format!("Dinner {days_ago}"),
                body: "Pasta".into(),
                created_at: today() - Duration::days(days_ago),
            })
            .await;
    }

    let response = app
        .post("/foodNoteForm", "FoodTitle=Porridge&FoodNote=With+berries", Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    assert_eq!(app.notes.count().await, 3);

    let home = body_text(app.get("/", Some(&cookie)).await).await;
    assert!(home.contains("Hello, Sam!"));
    assert!(home.contains("3 days in a row"));
    assert!(home.contains(&today().format("%Y-%m-%d").to_string()));
    assert!(home.contains("Porridge"));

    let notes = body_text(app.get("/notes", Some(&cookie)).await).await;
    assert!(notes.contains("Porridge"));
    assert!(notes.contains("With berries"));
}

#[tokio::test]
async fn stale_history_shows_broken_streak() {
    let app = TestApp::new();
    let cookie = app.login_as("alice").await;
    app.notes
        .seed(NewNote {
            user_id: 1,
            title: "Old soup".into(),
            body: "Tomato".into(),
            created_at: today() - Duration::days(5),
        })
        .await;

    let home = body_text(app.get("/", Some(&cookie)).await).await;

    assert!(home.contains("Your streak is broken"));
}

#[tokio::test]
async fn logout_destroys_session() {
    let app = TestApp::new();
    let cookie = app.login_as("alice").await;
    assert_eq!(app.sessions.len().await, 1);

    let response = app.get("/logout", Some(&cookie)).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    assert_eq!(app.sessions.len().await, 0);

    let response = app
        .post("/foodNoteForm", "FoodTitle=Lunch&FoodNote=Salad", Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_without_session_still_redirects() {
    let app = TestApp::new();

    let response = app.get("/logout", None).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn public_pages_render_for_anonymous_visitors() {
    let app = TestApp::new();

    for uri in ["/", "/about", "/notes", "/login", "/signup"] {
        let response = app.get(uri, None).await;
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
        assert!(body_text(response).await.contains("<!DOCTYPE html>"), "{uri}");
    }
}

#[tokio::test]
async fn forgot_password_is_not_implemented() {
    let app = TestApp::new();

    let response = app.get("/forgot-password", None).await;

    assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
    assert!(body_text(response).await.contains("not yet implemented"));
}
