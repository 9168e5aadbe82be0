use reqwest::Client;

use super::error::LimitsError;

pub const ENI_LIMITS_URL: &str =
    "https://docs.aws.amazon.com/AWSEC2/latest/UserGuide/using-eni.partial.html";
pub const PRICING_URL: &str =
    "https://pricing.us-east-1.amazonaws.com/offers/v1.0/aws/AmazonEC2/current/us-east-1/index.json";

/// GETs `url` and returns the body. Non-success statuses are errors.
pub async fn fetch_text(client: &Client, url: &str) -> Result<String, LimitsError> {
    let fetch_err = |source| LimitsError::Fetch {
        url: url.to_string(),
        source,
    };
    tracing::info!(url, "fetching");
    let body = client
        .get(url)
        .send()
        .await
        .and_then(|res| res.error_for_status())
        .map_err(fetch_err)?
        .text()
        .await
        .map_err(fetch_err)?;
    tracing::debug!(url, bytes = body.len(), "fetched");
    Ok(body)
}
