use crate::traits::ComponentDataStore;
use async_trait::async_trait;
use boardkit_core::{AppConfig, BoardError, BoardResult};
use boardkit_domain::{ComponentData, ComponentDataEnvelope, Task};
use reqwest::{Client, Response, StatusCode, Url};
use std::time::Duration;

/// Client for the component-data REST service.
///
/// - `GET  {base}/componentData/by-component-id/{id}` returns `{data: {tasks}}`
/// - `POST {base}/componentData` stores a [`ComponentData`] body
#[derive(Debug, Clone)]
pub struct HttpComponentStore {
    client: Client,
    base_url: Url,
}

impl HttpComponentStore {
    pub fn new(base_url: &str, timeout: Duration) -> BoardResult<Self> {
        let base_url = Url::parse(base_url).map_err(|e| {
            BoardError::Validation(format!("Invalid remote URL '{}': {}", base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(BoardError::Validation(format!(
                "Remote URL '{}' cannot be used as a base",
                base_url
            )));
        }
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(transport_error)?;
        Ok(Self { client, base_url })
    }

    /// Build from `remote_url`, `None` when no remote is configured
    pub fn from_config(config: &AppConfig) -> BoardResult<Option<Self>> {
        config
            .remote_url
            .as_deref()
            .map(|url| {
                Self::new(
                    url,
                    Duration::from_secs(config.effective_request_timeout_secs()),
                )
            })
            .transpose()
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

fn transport_error(e: reqwest::Error) -> BoardError {
    BoardError::Remote {
        status: e.status().map(|s| s.as_u16()),
        message: e.to_string(),
    }
}

async fn check_status(response: Response) -> BoardResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(BoardError::Remote {
        status: Some(status.as_u16()),
        message: if body.is_empty() {
            status.to_string()
        } else {
            body
        },
    })
}

#[async_trait]
impl ComponentDataStore for HttpComponentStore {
    async fn fetch(&self, component_id: &str) -> BoardResult<Option<Vec<Task>>> {
        let url = self.endpoint(&["componentData", "by-component-id", component_id]);
        tracing::debug!("GET {}", url);

        let response = self.client.get(url).send().await.map_err(transport_error)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let envelope: ComponentDataEnvelope = check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| BoardError::Serialization(e.to_string()))?;
        Ok(Some(envelope.into_tasks()))
    }

    async fn save(&self, data: &ComponentData) -> BoardResult<()> {
        let url = self.endpoint(&["componentData"]);
        tracing::debug!("POST {} ({} tasks)", url, data.tasks.len());

        let response = self
            .client
            .post(url)
            .json(data)
            .send()
            .await
            .map_err(transport_error)?;
        check_status(response).await?;
        Ok(())
    }

    fn describe(&self) -> String {
        format!("remote:{}", self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::{Path, State};
    use axum::http::StatusCode as AxumStatus;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use boardkit_domain::{Board, NewTask};
    use chrono::Utc;
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct FakeService {
        posted: Arc<Mutex<Vec<Value>>>,
    }

    async fn by_component_id(Path(id): Path<String>) -> Result<Json<Value>, AxumStatus> {
        match id.as_str() {
            "kanban-1" => Ok(Json(json!({"data": {"tasks": [{
                "id": "7d3c5e3a-1111-4b7e-9a52-1f2f7c6a0b2d",
                "title": "stored",
                "columnId": "col1",
                "createdAt": "2024-01-01T00:00:00Z"
            }]}}))),
            "broken" => Err(AxumStatus::INTERNAL_SERVER_ERROR),
            _ => Err(AxumStatus::NOT_FOUND),
        }
    }

    async fn create(State(service): State<FakeService>, Json(body): Json<Value>) -> AxumStatus {
        service.posted.lock().unwrap().push(body);
        AxumStatus::CREATED
    }

    async fn serve() -> (String, FakeService) {
        let service = FakeService::default();
        let app = Router::new()
            .route("/api/componentData/by-component-id/{id}", get(by_component_id))
            .route("/api/componentData", post(create))
            .with_state(service.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{}/api", addr), service)
    }

    fn store(base: &str) -> HttpComponentStore {
        HttpComponentStore::new(base, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_existing() {
        let (base, _) = serve().await;
        let tasks = store(&base).fetch("kanban-1").await.unwrap().unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "stored");
    }

    #[tokio::test]
    async fn test_fetch_missing_is_none() {
        let (base, _) = serve().await;
        assert!(store(&base).fetch("kanban-2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_server_error_is_transient_remote() {
        let (base, _) = serve().await;
        let err = store(&base).fetch("broken").await.unwrap_err();
        assert!(matches!(err, BoardError::Remote { status: Some(500), .. }));
        assert!(err.is_transient());
    }

    #[tokio::test]
    async fn test_save_posts_snapshot() {
        let (base, service) = serve().await;
        let mut board = Board::new("kanban-1", "Roadmap");
        board
            .create_column_with_id("col1".into(), "To Do".into())
            .unwrap();
        board
            .add_task("col1", NewTask::titled("ship"), Utc::now())
            .unwrap();

        store(&base)
            .save(&ComponentData::from_board(&board))
            .await
            .unwrap();

        let posted = service.posted.lock().unwrap();
        assert_eq!(posted.len(), 1);
        assert_eq!(posted[0]["componentId"], "kanban-1");
        assert_eq!(posted[0]["type"], "KANBAN");
        assert_eq!(posted[0]["tasks"][0]["title"], "ship");
    }

    #[tokio::test]
    async fn test_unreachable_is_remote_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = store(&format!("http://{}", addr))
            .fetch("kanban-1")
            .await
            .unwrap_err();
        assert!(matches!(err, BoardError::Remote { status: None, .. }));
    }

    #[test]
    fn test_rejects_invalid_url() {
        let err = HttpComponentStore::new("not a url", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, BoardError::Validation(_)));
    }

    #[test]
    fn test_endpoint_handles_trailing_slash() {
        let store = store("http://localhost:8080/api/");
        assert_eq!(
            store.endpoint(&["componentData"]).as_str(),
            "http://localhost:8080/api/componentData"
        );
    }
}
