use super::state::{begin, settle, Dispatch, Effect, Intent, Operation, Outcome, TaskState};
use crate::error::{Result, TodoError};
use crate::model::Todo;
use chrono::Utc;
use reqwest::{Client, Response, Url};
use serde_json::json;
use tracing::{debug, warn};

/// Thin REST client for the `/todos` resource under a base URL such as
/// `http://localhost:3000/api`.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    http: Client,
    base: Url,
}

impl RemoteClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let base = Url::parse(base_url)
            .map_err(|e| TodoError::Config(format!("invalid api url '{}': {}", base_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(TodoError::Config(format!("invalid api url '{}'", base_url)));
        }
        Ok(Self {
            http: Client::new(),
            base,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn todos_url(&self, id: Option<&str>) -> Url {
        let mut url = self.base.clone();
        // cannot_be_a_base was rejected in new()
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("todos");
            if let Some(id) = id {
                segments.push(id);
            }
        }
        url
    }

    fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(TodoError::Status(status.as_u16()))
        }
    }

    pub async fn list(&self) -> Result<Vec<Todo>> {
        let response = self.http.get(self.todos_url(None)).send().await?;
        Ok(Self::check(response)?.json().await?)
    }

    pub async fn create(&self, text: &str) -> Result<Todo> {
        let response = self
            .http
            .post(self.todos_url(None))
            .json(&json!({ "text": text }))
            .send()
            .await?;
        Ok(Self::check(response)?.json().await?)
    }

    pub async fn set_completed(&self, id: &str, completed: bool) -> Result<Todo> {
        let response = self
            .http
            .put(self.todos_url(Some(id)))
            .json(&json!({ "completed": completed }))
            .send()
            .await?;
        Ok(Self::check(response)?.json().await?)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let response = self.http.delete(self.todos_url(Some(id))).send().await?;
        Self::check(response)?;
        Ok(())
    }

    pub async fn clear_completed(&self) -> Result<()> {
        let response = self.http.delete(self.todos_url(None)).send().await?;
        Self::check(response)?;
        Ok(())
    }
}

/// Networked client: one request per intent, local copy updated only on success.
pub struct RemoteSession {
    client: RemoteClient,
    state: TaskState,
}

impl RemoteSession {
    pub fn new(client: RemoteClient) -> Self {
        Self {
            client,
            state: TaskState::new(),
        }
    }

    pub fn state(&self) -> &TaskState {
        &self.state
    }

    /// Fetch the full list once.
    pub async fn load(&mut self) -> Dispatch {
        let outcome = match self.client.list().await {
            Ok(tasks) => {
                debug!(count = tasks.len(), "fetched tasks");
                Outcome::Fetched(tasks)
            }
            Err(e) => self.failed(Operation::Fetch, &e),
        };
        self.settle(outcome)
    }

    pub async fn dispatch(&mut self, intent: Intent) -> Dispatch {
        let is_view_change = matches!(intent, Intent::SetFilter(_));
        let (state, effect) = begin(std::mem::take(&mut self.state), intent);
        self.state = state;

        let Some(operation) = effect.operation() else {
            return if is_view_change {
                Dispatch::Applied
            } else {
                Dispatch::Ignored
            };
        };

        let pending = AddInFlight {
            state: &mut self.state,
            armed: matches!(effect, Effect::Create { .. }),
        };
        let result = match effect {
            Effect::Create { text } => self.client.create(&text).await.map(Outcome::Created),
            Effect::SetCompleted { id, completed } => self
                .client
                .set_completed(&id, completed)
                .await
                .map(Outcome::Updated),
            Effect::Delete { id } => self.client.delete(&id).await.map(|_| Outcome::Deleted(id)),
            Effect::ClearCompleted => self.client.clear_completed().await.map(|_| Outcome::Cleared),
            Effect::None | Effect::Persist => return Dispatch::Ignored,
        };
        pending.disarm();

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(e) => self.failed(operation, &e),
        };
        self.settle(outcome)
    }

    fn failed(&self, operation: Operation, error: &TodoError) -> Outcome {
        warn!(error = %error, "{}", operation.failure_message());
        Outcome::Failed(operation)
    }

    fn settle(&mut self, outcome: Outcome) -> Dispatch {
        let failed = matches!(outcome, Outcome::Failed(_));
        self.state = settle(std::mem::take(&mut self.state), outcome, Utc::now());
        if failed {
            Dispatch::Failed
        } else {
            Dispatch::Applied
        }
    }
}

/// Clears the add busy flag if a create request is abandoned before it settles.
struct AddInFlight<'a> {
    state: &'a mut TaskState,
    armed: bool,
}

impl AddInFlight<'_> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for AddInFlight<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.state.adding = false;
        }
    }
}
