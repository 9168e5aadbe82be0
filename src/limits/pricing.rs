use indexmap::IndexMap;
use serde::Deserialize;

use super::{error::ParseError, InstanceTable};

const COMPUTE_INSTANCE: &str = "Compute Instance";
const DEDICATED_HOST: &str = "Dedicated Host";

#[derive(Debug, Deserialize)]
struct Offer {
    products: Option<IndexMap<String, Product>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Product {
    #[serde(default)]
    product_family: Option<String>,
    #[serde(default)]
    attributes: Attributes,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Attributes {
    instance_type: Option<String>,
    vcpu: Option<String>,
    memory: Option<String>,
}

impl Product {
    /// The table key this product describes, if it describes one at all.
    ///
    /// Dedicated hosts are listed under the bare family name (`i3`) and map
    /// onto the `.metal` instance type.
    fn type_id(&self) -> Option<String> {
        let instance_type = self.attributes.instance_type.as_deref()?;
        match self.product_family.as_deref()? {
            COMPUTE_INSTANCE => Some(instance_type.to_string()),
            DEDICATED_HOST => Some(format!("{instance_type}.metal")),
            _ => None,
        }
    }
}

/// Fills in cpu and memory for every table entry that has a matching
/// product in the EC2 offer file.
///
/// The table is the authoritative key set: products with no matching entry
/// are dropped. Later matches overwrite earlier ones.
pub fn merge_pricing(table: &mut InstanceTable, json: &str) -> Result<(), ParseError> {
    let offer: Offer = serde_json::from_str(json)?;
    let products = offer.products.ok_or(ParseError::MissingProducts)?;

    let mut matched = 0usize;
    for product in products.values() {
        let Some(type_id) = product.type_id() else {
            continue;
        };
        let Some(entry) = table.get_mut(&type_id) else {
            continue;
        };
        matched += 1;

        entry.cpu = product.attributes.vcpu.clone();
        entry.memory_mib = match product.attributes.memory.as_deref() {
            Some(memory) => {
                let mib = parse_memory_mib(memory);
                if mib.is_none() {
                    tracing::warn!(%type_id, memory, "unparseable memory in pricing feed");
                }
                mib
            }
            None => None,
        };
    }
    tracing::debug!(products = products.len(), matched, "merged pricing feed");
    Ok(())
}

/// Converts a pricing memory attribute such as `"1,952 GiB"` to MiB.
///
/// Only the leading number is read; the unit is assumed to be GiB. The
/// result is truncated, not rounded.
pub fn parse_memory_mib(memory: &str) -> Option<u64> {
    let gib: f64 = memory
        .split_whitespace()
        .next()?
        .replace(',', "")
        .parse()
        .ok()?;
    let mib = gib * 1024.0;
    if !mib.is_finite() || mib < 0.0 {
        return None;
    }
    Some(mib.trunc() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(types: &[&str]) -> InstanceTable {
        let mut table = InstanceTable::default();
        for t in types {
            table.insert_limits(t, Some("2".into()), Some("4".into()));
        }
        table
    }

    #[test]
    fn test_parse_memory() {
        assert_eq!(parse_memory_mib("16 GiB"), Some(16384));
        assert_eq!(parse_memory_mib("1,952 GiB"), Some(1998848));
        assert_eq!(parse_memory_mib("0.5 GiB"), Some(512));
        assert_eq!(parse_memory_mib("1.7 GiB"), Some(1740));
        assert_eq!(parse_memory_mib("NA"), None);
        assert_eq!(parse_memory_mib(""), None);
    }

    #[test]
    fn test_dedicated_host_maps_to_metal() {
        let mut table = table(&["i3", "i3.metal"]);
        let json = r#"{"products": {
            "SKU1": {"productFamily": "Dedicated Host",
                     "attributes": {"instanceType": "i3", "vcpu": "72", "memory": "512 GiB"}}
        }}"#;
        merge_pricing(&mut table, json).unwrap();

        let metal = table.get("i3.metal").unwrap();
        assert_eq!(metal.cpu.as_deref(), Some("72"));
        assert_eq!(metal.memory_mib, Some(524288));
        assert!(table.get("i3").unwrap().cpu.is_none());
    }

    #[test]
    fn test_ignores_other_families_and_unknown_types() {
        let mut table = table(&["m5.large"]);
        let json = r#"{"products": {
            "A": {"productFamily": "Storage", "attributes": {"instanceType": "m5.large", "vcpu": "9"}},
            "B": {"productFamily": "Compute Instance", "attributes": {"instanceType": "zz.huge", "vcpu": "9", "memory": "1 GiB"}},
            "C": {"productFamily": "Data Transfer", "attributes": {"transferType": "IntraRegion"}}
        }}"#;
        merge_pricing(&mut table, json).unwrap();
        assert_eq!(table.len(), 1);
        assert!(table.get("m5.large").unwrap().cpu.is_none());
    }

    #[test]
    fn test_last_match_wins() {
        let mut table = table(&["m5.large"]);
        let json = r#"{"products": {
            "A": {"productFamily": "Compute Instance", "attributes": {"instanceType": "m5.large", "vcpu": "1", "memory": "4 GiB"}},
            "B": {"productFamily": "Compute Instance", "attributes": {"instanceType": "m5.large", "vcpu": "2", "memory": "8 GiB"}}
        }}"#;
        merge_pricing(&mut table, json).unwrap();
        let entry = table.get("m5.large").unwrap();
        assert_eq!(entry.cpu.as_deref(), Some("2"));
        assert_eq!(entry.memory_mib, Some(8192));
    }

    #[test]
    fn test_missing_products() {
        let mut table = table(&[]);
        let err = merge_pricing(&mut table, r#"{"offerCode": "AmazonEC2"}"#).unwrap_err();
        assert!(matches!(err, ParseError::MissingProducts));

        let err = merge_pricing(&mut table, "not json").unwrap_err();
        assert!(matches!(err, ParseError::Json(_)));
    }
}
