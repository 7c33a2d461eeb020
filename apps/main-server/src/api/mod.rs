//! API endpoints.

pub mod auth;
pub mod todo;
pub mod todo_list;

use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::error::{ServerError, ServerResult};
use crate::middleware::auth_middleware;
use crate::state::AppState;

/// Longest title accepted for lists and todos, in characters.
pub const MAX_TITLE_CHARS: usize = 100;

/// Creates the API router with all endpoints.
pub fn create_router(state: Arc<AppState>) -> Router {
    let protected = Router::new()
        // Todo list endpoints
        .route("/api/lists/list", post(todo_list::list_todo_lists))
        .route("/api/lists/create", post(todo_list::create_todo_list))
        .route("/api/lists/get", post(todo_list::get_todo_list))
        .route("/api/lists/rename", post(todo_list::rename_todo_list))
        .route("/api/lists/delete", post(todo_list::delete_todo_list))
        .route("/api/lists/complete-all", post(todo_list::complete_all_todos))
        // Todo endpoints
        .route("/api/todos/create", post(todo::create_todo))
        .route("/api/todos/get", post(todo::get_todo))
        .route("/api/todos/toggle", post(todo::toggle_todo))
        .route("/api/todos/delete", post(todo::delete_todo))
        // Session endpoints
        .route("/api/auth/me", get(auth::get_current_user))
        .route("/api/auth/logout", post(auth::logout))
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            auth_middleware,
        ));

    Router::new()
        .route("/api/auth/login", post(auth::login))
        // Health check
        .route("/health", get(health_check))
        .merge(protected)
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

/// Trims a submitted title and checks its length.
fn validate_title(raw: &str, subject: &str) -> ServerResult<String> {
    let title = raw.trim();
    let len = title.chars().count();
    if len == 0 || len > MAX_TITLE_CHARS {
        return Err(ServerError::InvalidRequest(format!(
            "{subject} must be between 1 and {MAX_TITLE_CHARS} characters."
        )));
    }
    Ok(title.to_string())
}


#[cfg(test)]
mod router_tests {
    use auth::UserDirectory;
    use axum::{
        Router,
        body::Body,
        http::{
            Request, StatusCode,
            header::{AUTHORIZATION, CONTENT_TYPE},
        },
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::state::{SessionRegistry, StoreBackend};

    fn test_app() -> Router {
        let config = Config::from_lookup(|_| None).unwrap();
        let users = UserDirectory::with_user("admin", "secret").unwrap();
        let state = crate::create_state(
            config,
            StoreBackend::Session(SessionRegistry::new()),
            users,
        );
        crate::create_app(state)
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    async fn post(
        app: &Router,
        uri: &str,
        token: Option<&str>,
        body: Value,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        send(app, builder.body(Body::from(body.to_string())).unwrap()).await
    }

    async fn login(app: &Router) -> String {
        let (status, body) = post(
            app,
            "/api/auth/login",
            None,
            json!({ "username": "admin", "password": "secret" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        body["token"].as_str().unwrap().to_string()
    }

    async fn list_titles(app: &Router, token: &str) -> Vec<String> {
        let (status, body) = post(app, "/api/lists/list", Some(token), json!({})).await;
        assert_eq!(status, StatusCode::OK);
        body["todo_lists"]
            .as_array()
            .unwrap()
            .iter()
            .map(|l| l["title"].as_str().unwrap().to_string())
            .collect()
    }

    async fn list_id(app: &Router, token: &str, title: &str) -> i64 {
        let (_, body) = post(app, "/api/lists/list", Some(token), json!({})).await;
        body["todo_lists"]
            .as_array()
            .unwrap()
            .iter()
            .find(|l| l["title"] == title)
            .and_then(|l| l["id"].as_i64())
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = test_app();
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_requires_token() {
        let app = test_app();

        let (status, body) = post(&app, "/api/lists/list", None, json!({})).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "unauthorized");

        let (status, _) = post(&app, "/api/lists/list", Some("garbage"), json!({})).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_login_rejects_bad_password() {
        let app = test_app();

        let (status, body) = post(
            &app,
            "/api/auth/login",
            None,
            json!({ "username": "admin", "password": "nope" }),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["message"], "Invalid credentials");
    }

    #[tokio::test]
    async fn test_me_returns_username() {
        let app = test_app();
        let token = login(&app).await;

        let request = Request::builder()
            .uri("/api/auth/me")
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["username"], "admin");
    }

    #[tokio::test]
    async fn test_new_session_sees_sorted_seed_lists() {
        let app = test_app();
        let token = login(&app).await;

        assert_eq!(
            list_titles(&app, &token).await,
            vec!["Additional Todos", "social todos", "Work Todos", "Home Todos"]
        );
    }

    #[tokio::test]
    async fn test_create_list_validation_and_uniqueness() {
        let app = test_app();
        let token = login(&app).await;

        let (status, _) =
            post(&app, "/api/lists/create", Some(&token), json!({ "title": "  " })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = post(
            &app,
            "/api/lists/create",
            Some(&token),
            json!({ "title": " Groceries " }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(list_titles(&app, &token).await.contains(&"Groceries".to_string()));

        let (status, body) = post(
            &app,
            "/api/lists/create",
            Some(&token),
            json!({ "title": "Groceries" }),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["message"], "List title must be unique");
    }

    #[tokio::test]
    async fn test_concurrent_creates_keep_titles_unique() {
        let app = test_app();
        let token = login(&app).await;
        let body = json!({ "title": "Errands" });

        let (first, second) = tokio::join!(
            post(&app, "/api/lists/create", Some(&token), body.clone()),
            post(&app, "/api/lists/create", Some(&token), body.clone()),
        );

        let mut statuses = vec![first.0, second.0];
        statuses.sort_by_key(|status| status.as_u16());
        assert_eq!(statuses, vec![StatusCode::OK, StatusCode::CONFLICT]);

        let titles = list_titles(&app, &token).await;
        assert_eq!(titles.iter().filter(|t| *t == "Errands").count(), 1);
    }

    #[tokio::test]
    async fn test_rename_list() {
        let app = test_app();
        let token = login(&app).await;
        let work = list_id(&app, &token, "Work Todos").await;

        let (status, _) = post(
            &app,
            "/api/lists/rename",
            Some(&token),
            json!({ "list_id": work, "title": "Home Todos" }),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);

        // Keeping the current title is not a conflict.
        let (status, _) = post(
            &app,
            "/api/lists/rename",
            Some(&token),
            json!({ "list_id": work, "title": "Work Todos" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = post(
            &app,
            "/api/lists/rename",
            Some(&token),
            json!({ "list_id": work, "title": "Office" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(list_titles(&app, &token).await.contains(&"Office".to_string()));
    }

    #[tokio::test]
    async fn test_complete_all_and_get_list() {
        let app = test_app();
        let token = login(&app).await;
        let work = list_id(&app, &token, "Work Todos").await;

        let (status, body) =
            post(&app, "/api/lists/get", Some(&token), json!({ "list_id": work })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["todo_list"]["todos"][0]["title"], "Duck out of meeting");
        assert_eq!(body["todo_list"]["is_done"], false);

        let (status, _) = post(
            &app,
            "/api/lists/complete-all",
            Some(&token),
            json!({ "list_id": work }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) =
            post(&app, "/api/lists/get", Some(&token), json!({ "list_id": work })).await;
        assert_eq!(body["todo_list"]["is_done"], true);
        assert_eq!(body["todo_list"]["has_undone_todos"], false);

        let (status, _) = post(
            &app,
            "/api/lists/complete-all",
            Some(&token),
            json!({ "list_id": 9999 }),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_todo_lifecycle() {
        let app = test_app();
        let token = login(&app).await;
        let additional = list_id(&app, &token, "Additional Todos").await;

        let (status, _) = post(
            &app,
            "/api/todos/create",
            Some(&token),
            json!({ "list_id": additional, "title": "Water plants" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = post(
            &app,
            "/api/lists/get",
            Some(&token),
            json!({ "list_id": additional }),
        )
        .await;
        let todo_id = body["todo_list"]["todos"][0]["id"].as_i64().unwrap();
        let todo_ref = json!({ "list_id": additional, "todo_id": todo_id });

        let (status, _) = post(&app, "/api/todos/toggle", Some(&token), todo_ref.clone()).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = post(&app, "/api/todos/get", Some(&token), todo_ref.clone()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["todo"]["done"], true);

        let (status, _) = post(&app, "/api/todos/delete", Some(&token), todo_ref.clone()).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = post(&app, "/api/todos/get", Some(&token), todo_ref).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = post(
            &app,
            "/api/todos/create",
            Some(&token),
            json!({ "list_id": 9999, "title": "Orphan" }),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let app = test_app();
        let first = login(&app).await;
        let second = login(&app).await;

        let (status, _) = post(
            &app,
            "/api/lists/create",
            Some(&first),
            json!({ "title": "Only mine" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        assert!(list_titles(&app, &first).await.contains(&"Only mine".to_string()));
        assert!(!list_titles(&app, &second).await.contains(&"Only mine".to_string()));
    }

    #[tokio::test]
    async fn test_logout_discards_session_data() {
        let app = test_app();
        let token = login(&app).await;
        let work = list_id(&app, &token, "Work Todos").await;

        let (status, _) = post(
            &app,
            "/api/lists/delete",
            Some(&token),
            json!({ "list_id": work }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list_titles(&app, &token).await.len(), 3);

        let (status, _) = post(&app, "/api/auth/logout", Some(&token), json!({})).await;
        assert_eq!(status, StatusCode::OK);

        // The token is still signed, but its session starts over from the seed.
        assert_eq!(list_titles(&app, &token).await.len(), 4);
    }
}
