use base64::Engine as _;
use serde_json::Value;

use crate::{AdapterError, Block};

/// `GET /api/dates` -> `{ "dates": ["YYYY-MM-DD", ...] }`, most recent first.
pub async fn fetch_dates(base_url: &str) -> Result<Vec<String>, AdapterError> {
    let url = format!("{}/api/dates", base_url.trim_end_matches('/'));

    let response = reqwest::get(&url).await?;
    let body = read_body(response).await?;

    let dates = body
        .get("dates")
        .and_then(Value::as_array)
        .ok_or_else(|| AdapterError::Parse("missing `dates` array".to_string()))?;

    dates
        .iter()
        .map(|d| {
            d.as_str()
                .map(str::to_string)
                .ok_or_else(|| AdapterError::Parse(format!("non-string date: {d}")))
        })
        .collect()
}

/// `GET /api/blocks?date=YYYY-MM-DD`. Omitting `date` asks the server for
/// its "latest per sheet" mode.
pub async fn fetch_blocks(base_url: &str, date: Option<&str>) -> Result<Vec<Block>, AdapterError> {
    let url = format!("{}/api/blocks", base_url.trim_end_matches('/'));
    log::debug!("Fetching blocks from {url}, date: {date:?}");

    let mut request = reqwest::Client::new().get(&url);
    if let Some(date) = date {
        request = request.query(&[("date", date)]);
    }

    let response = request.send().await?;
    let body = read_body(response).await?;

    let blocks = body
        .get("blocks")
        .filter(|b| b.is_array())
        .cloned()
        .ok_or_else(|| AdapterError::Parse("missing `blocks` array".to_string()))?;

    serde_json::from_value(blocks)
        .map_err(|e| AdapterError::Parse(format!("failed to parse blocks: {e}")))
}

/// `POST /api/screenshot` with the PNG encoded as a base64 data URL.
/// Returns the server-side file name.
pub async fn upload_screenshot(base_url: &str, png: &[u8]) -> Result<String, AdapterError> {
    let url = format!("{}/api/screenshot", base_url.trim_end_matches('/'));

    let data_url = format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(png)
    );

    let response = reqwest::Client::new()
        .post(&url)
        .json(&serde_json::json!({ "imageData": data_url }))
        .send()
        .await?;
    let body = read_body(response).await?;

    body.get("fileName")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| AdapterError::Parse("missing `fileName`".to_string()))
}

/// Decodes a response body, mapping non-2xx statuses to the server's
/// `{ "error": ... }` message when one is present.
async fn read_body(response: reqwest::Response) -> Result<Value, AdapterError> {
    let status = response.status();
    let text = response.text().await?;

    let body: Value = serde_json::from_str(&text).map_err(|e| {
        if status.is_success() {
            AdapterError::Parse(format!("invalid response body: {e}"))
        } else {
            AdapterError::Server(format!("server returned {status}"))
        }
    })?;

    if !status.is_success() {
        let message = body
            .get("error")
            .and_then(Value::as_str)
            .map_or_else(|| format!("server returned {status}"), str::to_string);

        return Err(AdapterError::Server(message));
    }

    Ok(body)
}
