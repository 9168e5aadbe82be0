use anyhow::{bail, Context, Result};
use std::process::Stdio;
use tokio::process::Command;

/// Runs `aws eks describe-cluster` for one cluster.
pub struct DescribeCluster {
    pub program: String,
    pub profile: String,
    pub region: String,
    pub cluster_name: String,
}

impl DescribeCluster {
    pub fn new(profile: &str, region: &str, cluster_name: &str) -> Self {
        Self {
            program: "aws".to_string(),
            profile: profile.to_string(),
            region: region.to_string(),
            cluster_name: cluster_name.to_string(),
        }
    }

    pub fn args(&self, query: &str) -> Vec<String> {
        vec![
            "eks".to_string(),
            "describe-cluster".to_string(),
            format!("--profile={}", self.profile),
            format!("--region={}", self.region),
            format!("--cluster-name={}", self.cluster_name),
            format!("--query={query}"),
        ]
    }

    /// Returns the raw stdout of the query, as the CLI printed it.
    pub async fn query(&self, query: &str) -> Result<String> {
        let args = self.args(query);
        tracing::debug!(
            cmd = %shlex::join(std::iter::once(self.program.as_str()).chain(args.iter().map(String::as_str))),
            "running"
        );
        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .await
            .with_context(|| format!("failed to run {}", self.program))?;
        if !output.status.success() {
            bail!(
                "{} eks describe-cluster failed with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(String::from_utf8(output.stdout)?)
    }

    pub async fn endpoint(&self) -> Result<String> {
        self.query("cluster.masterEndpoint").await
    }
}
