use reqwest::{Response, StatusCode};

use crate::application::ports::LlmClientError;

/// Maps a non-success provider response to an error, passing 2xx through.
pub(super) async fn ensure_success(response: Response) -> Result<Response, LlmClientError> {
    let status = response.status();

    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(LlmClientError::RateLimited);
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(LlmClientError::ApiRequestFailed(format!(
            "HTTP {}: {}",
            status, body
        )));
    }

    Ok(response)
}
