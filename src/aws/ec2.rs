use anyhow::{Context, Result};
use aws_config::SdkConfig;
use aws_sdk_ec2 as ec2;
use ec2::{config::Builder, types::Instance, Client};

pub fn client(sdk_config: &SdkConfig) -> Client {
    Client::from_conf(Builder::from(sdk_config).build())
}

pub async fn get_instance(client: &Client, id: &str) -> Result<Instance> {
    let res = client
        .describe_instances()
        .set_instance_ids(Some(vec![id.to_string()]))
        .send()
        .await
        .with_context(|| format!("describing ec2 instance {id}"))?;
    let reservation = res
        .reservations()
        .and_then(|r| r.first())
        .with_context(|| format!("no ec2 instance reservations found for {id}"))?;
    let instance = reservation
        .instances()
        .and_then(|i| i.first())
        .with_context(|| format!("no ec2 instances in reservation found for {id}"))?;
    Ok(instance.clone())
}
