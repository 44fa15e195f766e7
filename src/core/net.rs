use crate::core::DuprError;

/// Read the response body as text, logging its size under the endpoint/id pair.
pub(crate) async fn get_text(
    resp: reqwest::Response,
    endpoint: &str,
    id: &str,
) -> Result<String, reqwest::Error> {
    let text = resp.text().await?;
    tracing::trace!(endpoint, id, bytes = text.len(), "response body read");
    Ok(text)
}

/// Turn a non-2xx response into [`DuprError::Status`], passing successes through.
pub(crate) fn ensure_success(resp: reqwest::Response) -> Result<reqwest::Response, DuprError> {
    if resp.status().is_success() {
        Ok(resp)
    } else {
        Err(DuprError::Status {
            status: resp.status().as_u16(),
            url: resp.url().to_string(),
        })
    }
}
