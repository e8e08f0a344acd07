use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Method;
use tracing::debug;

pub(crate) fn auth_headers(token: &str) -> anyhow::Result<HeaderMap> {
    if token.trim().is_empty() {
        anyhow::bail!("token is required");
    }
    let mut headers = HeaderMap::new();
    let value = HeaderValue::from_str(&format!("Bearer {token}"))?;
    headers.insert(AUTHORIZATION, value);
    Ok(headers)
}

pub(crate) async fn send_request(
    client: &reqwest::Client,
    method: Method,
    url: &str,
    token: &str,
) -> anyhow::Result<reqwest::Response> {
    let headers = auth_headers(token)?;
    debug!(method = %method, url = %url, "http request");
    let start = std::time::Instant::now();
    let response = client
        .request(method.clone(), url)
        .headers(headers)
        .send()
        .await?;
    debug!(
        method = %method,
        url = %url,
        status = %response.status(),
        elapsed_ms = start.elapsed().as_millis(),
        "http response"
    );
    Ok(response)
}

pub(crate) fn append_params(url: &mut String, params: Vec<(String, String)>) {
    if params.is_empty() {
        return;
    }
    let query = params
        .into_iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(&value)))
        .collect::<Vec<String>>()
        .join("&");
    url.push('?');
    url.push_str(&query);
}
