use anyhow::Result;
use clap::{Args, ValueEnum};
use ekstrap_rs::{
    aws::imds::{Metadata, METADATA_ENDPOINT},
    node::Node,
};
use serde::{Deserialize, Serialize};

#[derive(Args)]
pub struct NodeArgs {
    /// What to print
    #[arg(value_enum, default_value_t = Cmd::Print)]
    cmd: Cmd,

    /// AWS CLI profile for `aws eks` (default: use from configuration)
    #[arg(long, short = 'p')]
    profile: Option<String>,
}

#[derive(Serialize, Deserialize)]
struct Config {
    aws_profile: String,
    metadata_endpoint: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            aws_profile: "empty".to_string(),
            metadata_endpoint: METADATA_ENDPOINT.to_string(),
        }
    }
}

impl NodeArgs {
    pub async fn main(self) -> Result<()> {
        let config: Config = confy::load("ekstrap", Some("node"))?;
        let metadata = Metadata::new(config.metadata_endpoint)?;

        match self.cmd {
            Cmd::Region => println!("{}", metadata.region().await?),
            Cmd::NodeIp => println!("{}", metadata.node_ip().await?),
            cmd => {
                let node = Node::from_metadata(&metadata).await?;
                match cmd {
                    Cmd::ClusterName => println!("{}", node.cluster_name()?),
                    Cmd::NameTag => println!("{}", node.name_tag()?),
                    Cmd::Endpoint => {
                        let profile = self.profile.unwrap_or(config.aws_profile);
                        println!("{}", node.eks_endpoint(&profile).await?.trim());
                    }
                    _ => {
                        println!("instance-id: {}", node.instance_id()?);
                        println!("region: {}", node.region);
                        println!("cluster-name: {}", node.cluster_name()?);
                        println!("name-tag: {}", node.name_tag()?);
                    }
                }
            }
        }
        Ok(())
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum Cmd {
    /// Print a summary of this node
    Print,
    /// Cluster name from the `kubernetes.io/cluster/<name>` tag
    ClusterName,
    /// `<role>-<cluster>-<instance id>`
    NameTag,
    /// Region from the instance's availability zone
    Region,
    /// Private IPv4 address of this node
    NodeIp,
    /// EKS API endpoint, via `aws eks describe-cluster`
    Endpoint,
}
