use anyhow::Result;
use clap::Args;
use ekstrap_rs::{
    file::write_config,
    limits::{
        self,
        fetch::{ENI_LIMITS_URL, PRICING_URL},
    },
};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Generated source file to write
    #[arg(long, short = 'o', default_value = "resources.rs")]
    pub(crate) output: PathBuf,

    /// EC2 user guide page with the ENI limits table
    #[arg(long, default_value = ENI_LIMITS_URL)]
    pub(crate) eni_url: String,

    /// EC2 pricing offer file
    #[arg(long, default_value = PRICING_URL)]
    pub(crate) pricing_url: String,
}

impl GenerateArgs {
    pub async fn main(self) -> Result<()> {
        let client = reqwest::Client::new();
        let source = limits::generate(&client, &self.eni_url, &self.pricing_url).await?;
        if !write_config(&self.output, source.as_bytes())? {
            tracing::info!(output = %self.output.display(), "already up to date");
        }
        Ok(())
    }
}
