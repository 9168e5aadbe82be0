use super::InstanceTable;

/// Highest usable IPs per ENI on instances that lose access to the metadata,
/// VPC DNS and time sync services from the 32nd address onwards.
///
/// See <https://docs.aws.amazon.com/AWSEC2/latest/UserGuide/using-eni.html#AvailableIpPerENI>
pub const IP_PER_ENI_LIMIT: u32 = 31;

pub const IP_LIMITED_TYPES: &[&str] = &[
    "f1.16xlarge",
    "g3.16xlarge",
    "h1.16xlarge",
    "i3.16xlarge",
    "r4.16xlarge",
];

/// Memory (MiB) of metal instances that the pricing feed reports
/// incorrectly or not at all.
pub const METAL_MEMORY_MIB: &[(&str, u64)] = &[
    ("a1.metal", 32 * 1024),
    ("i3.metal", 512 * 1024),
    ("i3en.metal", 768 * 1024),
    ("r5.metal", 768 * 1024),
    ("m5.metal", 384 * 1024),
    ("c5.metal", 192 * 1024),
    ("r5d.metal", 768 * 1024),
    ("c5n.metal", 192 * 1024),
    ("c5d.metal", 192 * 1024),
    ("m5d.metal", 384 * 1024),
    ("z1d.metal", 384 * 1024),
    ("u-6tb1.metal", 6291456),
    ("u-9tb1.metal", 9437184),
    ("u-12tb1.metal", 12582912),
    ("u-18tb1.metal", 18874368),
    ("u-24tb1.metal", 25165824),
];

/// Applies the fixed IP and memory corrections to whichever listed types
/// survived the completeness filter.
pub fn apply_overrides(table: &mut InstanceTable) {
    for type_id in IP_LIMITED_TYPES {
        match table.get_mut(type_id) {
            Some(entry) => entry.ip = Some(IP_PER_ENI_LIMIT.to_string()),
            None => tracing::debug!(type_id, "ip override target not in table"),
        }
    }
    for (type_id, mib) in METAL_MEMORY_MIB {
        match table.get_mut(type_id) {
            Some(entry) => entry.memory_mib = Some(*mib),
            None => tracing::debug!(type_id, "memory override target not in table"),
        }
    }
}
