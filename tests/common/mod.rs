//! Common test utilities for E2E tests

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use kidspost::genai::types::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, Part,
};
use kidspost::{AppState, config};
use tempfile::TempDir;
use tokio::net::TcpListener;

/// Test server instance
pub struct TestServer {
    pub addr: String,
    pub state: AppState,
    pub _temp_dir: TempDir,
    pub client: reqwest::Client,
}

impl TestServer {
    /// Create a test server whose upstream is unreachable
    ///
    /// Good enough for every endpoint except a successful generation.
    pub async fn new() -> Self {
        Self::with_upstream("http://127.0.0.1:1").await
    }

    /// Create a test server pointed at a stub upstream
    pub async fn with_upstream(api_base_url: &str) -> Self {
        // Create temporary directory for test database
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");

        // Create test configuration
        let config = config::AppConfig {
            server: config::ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0, // Let OS assign port
            },
            database: config::DatabaseConfig {
                path: db_path.clone(),
            },
            generation: config::GenerationConfig {
                api_base_url: api_base_url.to_string(),
                text_model: "gemini-3-flash-preview".to_string(),
                image_model: "gemini-3-pro-image-preview".to_string(),
            },
            media: config::MediaConfig {
                max_width: 600,
                jpeg_quality: 70,
            },
            logging: config::LoggingConfig {
                level: "info".to_string(),
                format: "pretty".to_string(),
            },
        };

        // Initialize app state
        let state = AppState::new(config).await.unwrap();

        // Create HTTP client
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .unwrap();

        // Bind to random port
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let addr_str = format!("http://{}", addr);

        // Build router
        let app = kidspost::build_router(state.clone());

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Wait a bit for server to start
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        Self {
            addr: addr_str,
            state,
            _temp_dir: temp_dir,
            client,
        }
    }

    /// Get base URL for API requests
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.addr, path)
    }
}

// =============================================================================
// Upstream stub
// =============================================================================

/// Canned upstream behavior for generation tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamMode {
    /// Search text, fenced article JSON, all illustrations succeed
    Valid,
    /// The formatting step returns something that is not JSON
    MalformedJson,
    /// The illustration call for [`FAILING_HEADLINE`] fails
    OneImageFails,
}

/// Headline whose illustration call the stub rejects in `OneImageFails` mode
pub const FAILING_HEADLINE: &str = "Grumpy Robot Loses Chess Match!";

struct StubState {
    mode: UpstreamMode,
}

/// Spawn a stub generative API server, returning its base URL
pub async fn spawn_upstream(mode: UpstreamMode) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let app = axum::Router::new()
        .route(
            "/v1beta/models/:model",
            axum::routing::post(generate_content),
        )
        .with_state(Arc::new(StubState { mode }));

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

async fn generate_content(
    State(stub): State<Arc<StubState>>,
    Path(model): Path<String>,
    Json(request): Json<GenerateContentRequest>,
) -> Result<Json<GenerateContentResponse>, StatusCode> {
    let prompt = request
        .contents
        .first()
        .and_then(|content| content.parts.first())
        .and_then(|part| part.text.clone())
        .unwrap_or_default();

    // The path segment is "<model>:generateContent"
    if model.starts_with("gemini-3-pro-image-preview") {
        if stub.mode == UpstreamMode::OneImageFails && prompt.contains("Grumpy Robot") {
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
        return Ok(Json(image_response()));
    }

    // Text model: the grounded call is the search step, the plain call
    // is the formatting step.
    if request.tools.is_some() {
        return Ok(Json(text_response(
            "Ten big real stories happened this week.",
        )));
    }

    match stub.mode {
        UpstreamMode::MalformedJson => Ok(Json(text_response(
            "Sorry, here are the stories in prose instead.",
        ))),
        _ => Ok(Json(text_response(&format!(
            "```json\n{}\n```",
            articles_payload(stub.mode)
        )))),
    }
}

fn articles_payload(mode: UpstreamMode) -> String {
    let mut articles = Vec::new();
    for i in 0..10 {
        let featured = i < 2;
        let headline = if i == 0 && mode == UpstreamMode::OneImageFails {
            FAILING_HEADLINE.to_string()
        } else {
            format!("Fun Story Number {}!", i)
        };
        articles.push(serde_json::json!({
            "id": format!("story-{}", i),
            "headline": headline,
            "bodyText": format!("Body text for story {}.", i),
            "featured": featured,
            "imageAlt": format!("Illustration {}", i),
        }));
    }

    serde_json::json!({
        "title": "THE KIDS' WEEKLY NEWS",
        "subtitle": "Your weekly source for fun and fascinating stories!",
        "articles": articles,
    })
    .to_string()
}

fn text_response(text: &str) -> GenerateContentResponse {
    GenerateContentResponse {
        candidates: vec![Candidate {
            content: Some(Content {
                role: Some("model".to_string()),
                parts: vec![Part::text(text)],
            }),
        }],
    }
}

fn image_response() -> GenerateContentResponse {
    GenerateContentResponse {
        candidates: vec![Candidate {
            content: Some(Content {
                role: Some("model".to_string()),
                parts: vec![
                    Part::text("Here is your illustration."),
                    Part {
                        text: None,
                        inline_data: Some(kidspost::genai::types::InlineData {
                            mime_type: "image/png".to_string(),
                            data: "c3R1Yi1pbWFnZQ==".to_string(),
                        }),
                    },
                ],
            }),
        }],
    }
}
