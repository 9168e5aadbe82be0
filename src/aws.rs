use aws_config::SdkConfig;
use aws_types::region::Region;
use lazy_static::lazy_static;
use regex::Regex;

pub mod ec2;
pub mod eks;
pub mod imds;

pub async fn sdk_config(region: &str) -> SdkConfig {
    aws_config::from_env()
        .region(Region::new(region.to_string()))
        .load()
        .await
}

/// Sanity check that `region` looks like an AWS region name.
///
/// Only the shape is checked, not that the region exists.
pub fn is_aws_region(region: &str) -> bool {
    lazy_static! {
        static ref REGION: Regex = Regex::new(r"^[a-z\-]{2,6}-[a-z]{4,9}-\d$").unwrap();
    }
    REGION.is_match(region)
}
