use serde_json::Value;
use tracing::{debug, info, warn};

use crate::classify::classify_response;
use crate::clock::Sleeper;
use crate::config::ModelScopeConfig;
use crate::error::{ModelScopeError, Result};
use crate::provider::PROVIDER_NAME;
use crate::transport::{HttpRequest, Transport};
use crate::types::{TaskHandle, TaskSnapshot, TaskStatus};

/// Header identifying the task type on status queries.
pub const TASK_TYPE_HEADER: &str = "X-ModelScope-Task-Type";

/// Query `/tasks/{id}` until the task succeeds, fails, or the attempt
/// budget runs out. Returns the first output image URL.
///
/// Each non-terminal status is followed by one `poll_interval` sleep,
/// except after the final attempt.
pub async fn poll_for_result(
    transport: &dyn Transport,
    sleeper: &dyn Sleeper,
    config: &ModelScopeConfig,
    token: &str,
    handle: &TaskHandle,
) -> Result<String> {
    let url = format!("{}/tasks/{}", config.base_url, handle);

    for attempt in 1..=config.max_poll_attempts {
        let request = HttpRequest::get(&url)
            .header("Authorization", format!("Bearer {}", token))
            .header("Content-Type", "application/json")
            .header(TASK_TYPE_HEADER, "image_generation");

        let resp = transport
            .send(request)
            .await
            .map_err(|e| ModelScopeError::Network {
                context: format!("Failed to fetch status of task {}", handle),
                source: e,
            })?;

        if !resp.is_success() {
            let err = classify_response(PROVIDER_NAME, resp.status, &resp.body);
            warn!(task_id = %handle, attempt, status = resp.status, code = %err.code(), "status query rejected");
            return Err(err);
        }

        let snapshot = TaskSnapshot::from_value(&resp.json::<Value>()?);
        match snapshot.status {
            TaskStatus::Succeeded => {
                let image_url = snapshot.image_url.ok_or_else(|| {
                    ModelScopeError::generation_failed(PROVIDER_NAME, "No image in result")
                })?;
                info!(task_id = %handle, attempt, "task succeeded");
                return Ok(image_url);
            }
            TaskStatus::Failed => {
                let message = snapshot
                    .error_message
                    .unwrap_or_else(|| "Task failed".to_string());
                warn!(task_id = %handle, attempt, error = %message, "task failed");
                return Err(ModelScopeError::generation_failed(PROVIDER_NAME, message));
            }
            status => {
                debug!(task_id = %handle, attempt, status = ?status, "task not finished");
            }
        }

        if attempt < config.max_poll_attempts {
            sleeper.sleep(config.poll_interval).await;
        }
    }

    warn!(task_id = %handle, attempts = config.max_poll_attempts, "polling budget exhausted");
    Err(ModelScopeError::timeout(
        PROVIDER_NAME,
        format!(
            "Task {} did not finish after {} status checks",
            handle, config.max_poll_attempts
        ),
    ))
}
