//! The EC2 instance this process runs on, and the EKS cluster it belongs to.

use anyhow::{Context, Result};
use aws_sdk_ec2::types::Instance;
use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    aws::{self, eks::DescribeCluster, imds::Metadata},
    limits::InstanceResources,
};

lazy_static! {
    static ref CLUSTER_TAG: Regex = Regex::new(r"kubernetes.io/cluster/([\w-]+)").unwrap();
}

pub const ROLE_TAG: &str = "Role";

/// An EC2 instance, as described by `DescribeInstances`.
pub struct Node {
    pub instance: Instance,
    pub region: String,
}

impl Node {
    pub fn new(instance: Instance, region: impl Into<String>) -> Self {
        Self {
            instance,
            region: region.into(),
        }
    }

    /// Looks up the instance this process is running on.
    pub async fn from_metadata(metadata: &Metadata) -> Result<Self> {
        let instance_id = metadata.instance_id().await?;
        let region = metadata.region().await?;
        let sdk_config = aws::sdk_config(&region).await;
        let instance = aws::ec2::get_instance(&aws::ec2::client(&sdk_config), &instance_id).await?;
        Ok(Self::new(instance, region))
    }

    pub fn instance_id(&self) -> Result<&str> {
        self.instance
            .instance_id()
            .context("ec2 instance has no instance id")
    }

    pub fn instance_type(&self) -> Option<&str> {
        self.instance.instance_type().map(|t| t.as_str())
    }

    /// Name of the cluster from the `kubernetes.io/cluster/<name>` tag.
    pub fn cluster_name(&self) -> Result<&str> {
        self.tags()
            .filter_map(|(key, _)| CLUSTER_TAG.captures(key))
            .find_map(|caps| caps.get(1))
            .map(|m| m.as_str())
            .with_context(|| {
                format!("could not determine cluster name from: {}", CLUSTER_TAG.as_str())
            })
    }

    pub fn value_from_tag(&self, key: &str) -> Option<&str> {
        self.tags().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    pub fn value_from_tag_required(&self, key: &str) -> Result<&str> {
        self.value_from_tag(key)
            .with_context(|| format!("tag: {key} not found"))
    }

    pub fn role(&self) -> Result<&str> {
        self.value_from_tag_required(ROLE_TAG)
    }

    /// `<role>-<cluster>-<instance id>`
    pub fn name_tag(&self) -> Result<String> {
        Ok([self.role()?, self.cluster_name()?, self.instance_id()?].join("-"))
    }

    pub fn describe_cluster(&self, profile: &str) -> Result<DescribeCluster> {
        Ok(DescribeCluster::new(profile, &self.region, self.cluster_name()?))
    }

    pub async fn eks_endpoint(&self, profile: &str) -> Result<String> {
        self.describe_cluster(profile)?.endpoint().await
    }

    pub fn max_pods(&self, resources: &impl InstanceResources) -> u32 {
        self.instance_type()
            .map(|t| resources.max_pods(t))
            .unwrap_or(0)
    }

    pub fn reserved_cpu(&self, resources: &impl InstanceResources) -> Option<String> {
        resources.reserved_cpu(self.instance_type()?)
    }

    pub fn reserved_memory(&self, resources: &impl InstanceResources) -> Option<String> {
        resources.reserved_memory(self.instance_type()?)
    }

    fn tags(&self) -> impl Iterator<Item = (&str, &str)> {
        self.instance
            .tags()
            .into_iter()
            .flat_map(|tags| tags.iter())
            .filter_map(|t| Some((t.key()?, t.value().unwrap_or(""))))
    }
}
