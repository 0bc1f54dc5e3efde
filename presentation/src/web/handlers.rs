//! Request handlers for the web surface

use super::page::{self, PageView};
use super::sessions::{SessionRegistry, SharedSession, session_cookie, session_id_from_cookie};
use axum::Json;
use axum::extract::{Form, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use pagerag_application::{ContentScraper, FailureKind, SessionBackend};
use pagerag_domain::Notice;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

type Registry<S, B> = State<Arc<SessionRegistry<S, B>>>;

#[derive(Debug, Default, Deserialize)]
pub(super) struct IngestRequest {
    #[serde(default)]
    url: String,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct AskRequest {
    #[serde(default)]
    question: String,
}

/// Body of every JSON response
#[derive(Debug, Default, Serialize)]
struct ApiResponse {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    failure: Option<&'static str>,
    notices: Vec<Notice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bytes: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    answer: Option<String>,
}

impl ApiResponse {
    fn failed(kind: FailureKind, notice: Notice) -> (StatusCode, Self) {
        (
            status_for(kind),
            Self {
                failure: Some(kind.as_str()),
                notices: vec![notice],
                ..Default::default()
            },
        )
    }
}

fn status_for(kind: FailureKind) -> StatusCode {
    match kind {
        FailureKind::MissingInput => StatusCode::BAD_REQUEST,
        FailureKind::ScrapeFailed => StatusCode::UNPROCESSABLE_ENTITY,
        FailureKind::PreconditionUnmet => StatusCode::CONFLICT,
        FailureKind::CollaboratorFault => StatusCode::BAD_GATEWAY,
    }
}

fn session_for<S, B>(
    registry: &SessionRegistry<S, B>,
    headers: &HeaderMap,
) -> (Uuid, SharedSession<S, B>)
where
    S: ContentScraper + 'static,
    B: SessionBackend + 'static,
{
    let id = headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(session_id_from_cookie);
    registry.get_or_create(id)
}

fn with_cookie(id: Uuid, body: impl IntoResponse) -> Response {
    ([(header::SET_COOKIE, session_cookie(id))], body).into_response()
}

pub(super) async fn index<S, B>(State(registry): Registry<S, B>, headers: HeaderMap) -> Response
where
    S: ContentScraper + 'static,
    B: SessionBackend + 'static,
{
    let (id, session) = session_for(&registry, &headers);
    let session = session.lock().await;
    let document = session.current_document();
    let html = page::render(&PageView {
        url: document.map(|d| d.url.as_str()).unwrap_or(""),
        document,
        ..Default::default()
    });
    with_cookie(id, Html(html))
}

pub(super) async fn ingest_form<S, B>(
    State(registry): Registry<S, B>,
    headers: HeaderMap,
    Form(form): Form<IngestRequest>,
) -> Response
where
    S: ContentScraper + 'static,
    B: SessionBackend + 'static,
{
    let (id, session) = session_for(&registry, &headers);
    let mut session = session.lock().await;
    let notices = match session.ingest(&form.url).await {
        Ok(output) => output.notices,
        Err(e) => vec![e.notice()],
    };
    let html = page::render(&PageView {
        url: &form.url,
        notices: &notices,
        document: session.current_document(),
        ..Default::default()
    });
    with_cookie(id, Html(html))
}

pub(super) async fn ask_form<S, B>(
    State(registry): Registry<S, B>,
    headers: HeaderMap,
    Form(form): Form<AskRequest>,
) -> Response
where
    S: ContentScraper + 'static,
    B: SessionBackend + 'static,
{
    let (id, session) = session_for(&registry, &headers);
    let mut session = session.lock().await;
    let (answer, notices) = match session.ask(&form.question).await {
        Ok(output) => (Some(output.answer), Vec::new()),
        Err(e) => (None, vec![e.notice()]),
    };
    let document = session.current_document();
    let html = page::render(&PageView {
        url: document.map(|d| d.url.as_str()).unwrap_or(""),
        question: &form.question,
        notices: &notices,
        answer: answer.as_deref(),
        document,
    });
    with_cookie(id, Html(html))
}

pub(super) async fn api_ingest<S, B>(
    State(registry): Registry<S, B>,
    headers: HeaderMap,
    Json(request): Json<IngestRequest>,
) -> Response
where
    S: ContentScraper + 'static,
    B: SessionBackend + 'static,
{
    let (id, session) = session_for(&registry, &headers);
    let result = session.lock().await.ingest(&request.url).await;
    let (status, body) = match result {
        Ok(output) => (
            StatusCode::OK,
            ApiResponse {
                ok: true,
                notices: output.notices,
                bytes: Some(output.bytes),
                ..Default::default()
            },
        ),
        Err(e) => ApiResponse::failed(e.kind(), e.notice()),
    };
    with_cookie(id, (status, Json(body)))
}

pub(super) async fn api_ask<S, B>(
    State(registry): Registry<S, B>,
    headers: HeaderMap,
    Json(request): Json<AskRequest>,
) -> Response
where
    S: ContentScraper + 'static,
    B: SessionBackend + 'static,
{
    let (id, session) = session_for(&registry, &headers);
    let result = session.lock().await.ask(&request.question).await;
    let (status, body) = match result {
        Ok(output) => (
            StatusCode::OK,
            ApiResponse {
                ok: true,
                answer: Some(output.answer),
                ..Default::default()
            },
        ),
        Err(e) => ApiResponse::failed(e.kind(), e.notice()),
    };
    with_cookie(id, (status, Json(body)))
}

#[cfg(test)]
mod tests {
    use super::super::router;
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use pagerag_application::{ChainError, RagChain, SessionConfig, StoreError, VectorStore};
    use pagerag_domain::{PassageMetadata, ScoredPassage, messages};
    use std::path::Path;
    use std::sync::Mutex;
    use tower::ServiceExt;

    // ==================== Test Mocks ====================

    struct MockScraper;

    #[async_trait]
    impl ContentScraper for MockScraper {
        async fn fetch(&self, url: &str) -> Option<String> {
            if url.contains("example.com") {
                Some("Example Domain. This domain is for use in illustrative examples.".to_string())
            } else {
                None
            }
        }
    }

    #[derive(Default)]
    struct MockStore {
        texts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl VectorStore for MockStore {
        async fn add_texts(
            &self,
            texts: &[String],
            _metadatas: &[PassageMetadata],
        ) -> Result<(), StoreError> {
            self.texts.lock().unwrap().extend(texts.iter().cloned());
            Ok(())
        }

        async fn similarity_search(
            &self,
            _query: &str,
            _k: usize,
        ) -> Result<Vec<ScoredPassage>, StoreError> {
            Ok(Vec::new())
        }

        async fn len(&self) -> Result<usize, StoreError> {
            Ok(self.texts.lock().unwrap().len())
        }
    }

    struct MockChain {
        fail: bool,
    }

    #[async_trait]
    impl RagChain for MockChain {
        async fn query(&self, question: &str) -> Result<String, ChainError> {
            if self.fail {
                Err(ChainError::RequestFailed("503 Service Unavailable".to_string()))
            } else {
                Ok(format!("Answer to: {}", question))
            }
        }
    }

    struct MockBackend {
        fail_chain: bool,
    }

    #[async_trait]
    impl SessionBackend for MockBackend {
        async fn open_store(&self, _dir: &Path) -> Result<Arc<dyn VectorStore>, StoreError> {
            Ok(Arc::new(MockStore::default()))
        }

        fn bind_chain(&self, _store: Arc<dyn VectorStore>) -> Arc<dyn RagChain> {
            Arc::new(MockChain {
                fail: self.fail_chain,
            })
        }
    }

    fn app(fail_chain: bool) -> axum::Router {
        router(Arc::new(SessionRegistry::new(
            Arc::new(MockScraper),
            Arc::new(MockBackend { fail_chain }),
            SessionConfig::default(),
        )))
    }

    fn json_request(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn cookie_of(response: &Response) -> String {
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .expect("response should set the session cookie")
            .to_str()
            .unwrap();
        set_cookie.split(';').next().unwrap().to_string()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    // ==================== JSON API ====================

    #[tokio::test]
    async fn test_ask_before_ingest_is_conflict() {
        let response = app(false)
            .oneshot(json_request("/api/ask", r#"{"question":"Summarize"}"#, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
        let json = body_json(response).await;
        assert_eq!(json["failure"], "precondition_unmet");
        assert_eq!(json["notices"][0]["kind"], "warning");
        assert_eq!(json["notices"][0]["message"], messages::NO_DOCUMENT);
    }

    #[tokio::test]
    async fn test_ingest_then_ask_in_same_session() {
        let app = app(false);

        let response = app
            .clone()
            .oneshot(json_request(
                "/api/ingest",
                r#"{"url":"https://example.com"}"#,
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let cookie = cookie_of(&response);
        let json = body_json(response).await;
        assert_eq!(json["ok"], true);
        assert_eq!(json["notices"][0]["message"], messages::CONTENT_LOADED);
        assert_eq!(json["notices"][1]["message"], messages::CONTENT_STORED);

        let response = app
            .oneshot(json_request(
                "/api/ask",
                r#"{"question":"What is the main topic?"}"#,
                Some(&cookie),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(cookie_of(&response), cookie);
        let json = body_json(response).await;
        assert_eq!(json["answer"], "Answer to: What is the main topic?");
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let app = app(false);
        app.clone()
            .oneshot(json_request(
                "/api/ingest",
                r#"{"url":"https://example.com"}"#,
                None,
            ))
            .await
            .unwrap();

        // No cookie: a fresh session with nothing loaded
        let response = app
            .oneshot(json_request("/api/ask", r#"{"question":"Summarize"}"#, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_empty_url_is_bad_request() {
        let response = app(false)
            .oneshot(json_request("/api/ingest", r#"{"url":"  "}"#, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["notices"][0]["message"], messages::MISSING_URL);
    }

    #[tokio::test]
    async fn test_scrape_failure_is_unprocessable() {
        let response = app(false)
            .oneshot(json_request(
                "/api/ingest",
                r#"{"url":"https://unreachable.invalid"}"#,
                None,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = body_json(response).await;
        assert_eq!(json["failure"], "scrape_failed");
        assert_eq!(json["notices"][0]["kind"], "error");
    }

    #[tokio::test]
    async fn test_chain_fault_is_bad_gateway() {
        let app = app(true);
        let response = app
            .clone()
            .oneshot(json_request(
                "/api/ingest",
                r#"{"url":"https://example.com"}"#,
                None,
            ))
            .await
            .unwrap();
        let cookie = cookie_of(&response);

        let response = app
            .oneshot(json_request(
                "/api/ask",
                r#"{"question":"Summarize"}"#,
                Some(&cookie),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let json = body_json(response).await;
        assert_eq!(json["notices"][0]["kind"], "fault");
        assert!(
            json["notices"][0]["message"]
                .as_str()
                .unwrap()
                .contains("503 Service Unavailable")
        );
    }

    // ==================== HTML form ====================

    #[tokio::test]
    async fn test_index_sets_cookie() {
        let response = app(false)
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(cookie_of(&response).starts_with("pagerag_session="));
        assert!(body_text(response).await.contains("Load Webpage"));
    }

    #[tokio::test]
    async fn test_form_ingest_shows_notices_and_content() {
        let response = app(false)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/ingest")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("url=https%3A%2F%2Fexample.com"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("notice success"));
        assert!(html.contains(messages::CONTENT_STORED));
        assert!(html.contains("<details>"));
        assert!(html.contains("value=\"https://example.com\""));
    }
}
