use std::time::Instant;

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::GraphQL;
use axum::{
    extract::Request,
    http::{header, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{Html, IntoResponse, Response},
    routing::{get, get_service},
    Json, Router,
};
use log::info;
use serde::Serialize;

use crate::graphql::TodoSchema;

/// Response body of the root endpoint.
#[derive(Serialize, Debug)]
pub struct Message {
    pub message: String,
}

/// Default message is `Hello World`.
impl Default for Message {
    fn default() -> Self {
        Self {
            message: "Hello World".to_string(),
        }
    }
}

/// Builds the HTTP routes: root message, GraphiQL IDE and GraphQL endpoint.
///
/// `/graphql` executes queries sent as GET query string or POST body.
pub fn router(schema: TodoSchema) -> Router {
    Router::new()
        .route("/", get(hello))
        .route("/graphiql", get(graphiql))
        .route(
            "/graphql",
            get_service(GraphQL::new(schema.clone())).post_service(GraphQL::new(schema)),
        )
        .layer(middleware::from_fn(allow_cross_origin))
        .layer(middleware::from_fn(secure_headers))
        .layer(middleware::from_fn(log_request))
}

/// HTTP endpoint answering with a static message.
pub async fn hello() -> Json<Message> {
    Json(Message::default())
}

/// Builds the GraphiQL frontend.
async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}

/// Allows requests from any origin. Preflight requests are answered directly.
async fn allow_cross_origin(request: Request, next: Next) -> Response {
    let mut response = match request.method() == Method::OPTIONS {
        true => StatusCode::NO_CONTENT.into_response(),
        false => next.run(request).await,
    };
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("content-type"),
    );
    response
}

/// Sets browser security headers on every response.
///
/// No content security policy is sent, GraphiQL loads its assets from a CDN.
async fn secure_headers(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    for (name, value) in [
        (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
        (header::X_FRAME_OPTIONS, "SAMEORIGIN"),
        (header::X_XSS_PROTECTION, "0"),
        (header::X_DNS_PREFETCH_CONTROL, "off"),
        (header::REFERRER_POLICY, "no-referrer"),
        (
            header::STRICT_TRANSPORT_SECURITY,
            "max-age=15552000; includeSubDomains",
        ),
    ] {
        headers.insert(name, HeaderValue::from_static(value));
    }
    headers.insert(
        "cross-origin-opener-policy",
        HeaderValue::from_static("same-origin"),
    );
    headers.insert(
        "x-permitted-cross-domain-policies",
        HeaderValue::from_static("none"),
    );
    response
}

/// Writes one access log line per request.
async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let started_at = Instant::now();
    let response = next.run(request).await;
    info!(
        "{} {} {} - {:.3} ms",
        method,
        path,
        response.status().as_u16(),
        started_at.elapsed().as_secs_f64() * 1000.0
    );
    response
}

#[cfg(test)]
mod tests {
    use reqwest::{Client, Method, StatusCode};
    use serde_json::{json, Value};
    use tokio::net::TcpListener;

    use super::*;
    use crate::{graphql::build_schema, store::TodoStore};

    /// Serves the router with `count` seeded todos on an ephemeral port and returns its base url.
    async fn start_server(count: usize) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let mut store = TodoStore::new();
        store.seed(count);
        let app = router(build_schema(store.shared()));
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn hello_message() {
        let Json(message) = hello().await;
        assert_eq!(message.message, "Hello World");
    }

    #[tokio::test]
    async fn root_answers_with_message_and_headers() {
        let base_url = start_server(0).await;
        let response = Client::new().get(&base_url).send().await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers["access-control-allow-origin"], "*");
        assert_eq!(headers["x-content-type-options"], "nosniff");
        assert_eq!(headers["x-frame-options"], "SAMEORIGIN");
        assert_eq!(headers["referrer-policy"], "no-referrer");
        let body: Value = response.json().await.unwrap();
        assert_eq!(body, json!({ "message": "Hello World" }));
    }

    #[tokio::test]
    async fn preflight_is_answered_without_content() {
        let base_url = start_server(0).await;
        let response = Client::new()
            .request(Method::OPTIONS, format!("{}/graphql", base_url))
            .header("origin", "http://localhost:3000")
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(
            response.headers()["access-control-allow-methods"],
            "GET, POST, OPTIONS"
        );
        assert_eq!(response.headers()["x-content-type-options"], "nosniff");
    }

    #[tokio::test]
    async fn graphql_post_executes_queries() {
        let base_url = start_server(2).await;
        let response = Client::new()
            .post(format!("{}/graphql", base_url))
            .json(&json!({ "query": "{ todos(first: 1) { pageInfo { hasNextPage } } }" }))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = response.json().await.unwrap();
        assert_eq!(
            body["data"]["todos"]["pageInfo"],
            json!({ "hasNextPage": true })
        );
    }

    #[tokio::test]
    async fn graphql_get_executes_queries() {
        let base_url = start_server(1).await;
        let response = Client::new()
            .get(format!(
                "{}/graphql?query=%7Btodos%28first%3A1%29%7BpageInfo%7BhasNextPage%7D%7D%7D",
                base_url
            ))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers()["content-type"]
            .to_str()
            .unwrap()
            .starts_with("application/"));
        let body: Value = response.json().await.unwrap();
        assert_eq!(
            body["data"]["todos"]["pageInfo"],
            json!({ "hasNextPage": false })
        );
    }

    #[tokio::test]
    async fn graphiql_is_served_on_its_own_path() {
        let base_url = start_server(0).await;
        let response = Client::new()
            .get(format!("{}/graphiql", base_url))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers()["content-type"]
            .to_str()
            .unwrap()
            .starts_with("text/html"));
        assert!(response.text().await.unwrap().contains("/graphql"));
    }
}
