use anyhow::{bail, Context, Result};
use reqwest::Client;
use std::time::Duration;
use tokio::sync::OnceCell;

use super::is_aws_region;

pub const METADATA_ENDPOINT: &str = "http://169.254.169.254";

const TOKEN_HEADER: &str = "X-aws-ec2-metadata-token";
const TOKEN_TTL_HEADER: &str = "X-aws-ec2-metadata-token-ttl-seconds";
const TOKEN_TTL_SECONDS: &str = "21600";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(1);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Reads the EC2 instance metadata service.
///
/// Uses an IMDSv2 session token when the service hands one out, and plain
/// IMDSv1 requests otherwise.
pub struct Metadata {
    client: Client,
    endpoint: String,
    token: OnceCell<Option<String>>,
}

impl Metadata {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            token: OnceCell::new(),
        })
    }

    async fn token(&self) -> Option<&str> {
        self.token
            .get_or_init(|| async {
                let url = format!("{}/latest/api/token", self.endpoint);
                let res = self
                    .client
                    .put(&url)
                    .header(TOKEN_TTL_HEADER, TOKEN_TTL_SECONDS)
                    .send()
                    .await
                    .and_then(|res| res.error_for_status());
                match res {
                    Ok(res) => res.text().await.ok(),
                    Err(err) => {
                        tracing::debug!(%err, "no IMDSv2 token, falling back to IMDSv1");
                        None
                    }
                }
            })
            .await
            .as_deref()
    }

    pub async fn get(&self, name: &str) -> Result<String> {
        let url = format!("{}/latest/meta-data/{name}", self.endpoint);
        let mut req = self.client.get(&url);
        if let Some(token) = self.token().await {
            req = req.header(TOKEN_HEADER, token);
        }
        let body = req
            .send()
            .await
            .and_then(|res| res.error_for_status())
            .with_context(|| format!("reading instance metadata {url}"))?
            .text()
            .await?;
        Ok(body)
    }

    pub async fn instance_id(&self) -> Result<String> {
        self.get("instance-id").await
    }

    pub async fn node_ip(&self) -> Result<String> {
        self.get("local-ipv4").await
    }

    pub async fn availability_zone(&self) -> Result<String> {
        self.get("placement/availability-zone").await
    }

    pub async fn region(&self) -> Result<String> {
        region_from_az(&self.availability_zone().await?)
    }
}

/// `us-east-1a` -> `us-east-1`
pub fn region_from_az(az: &str) -> Result<String> {
    let mut region = az.trim().to_string();
    region.pop();
    if !is_aws_region(&region) {
        bail!("availability zone {az:?} does not name an AWS region; is this an EC2 instance?");
    }
    Ok(region)
}
