// @generated by `ekstrap generate`. Do not edit by hand.
//
// Per instance type resource limits, scraped from the EC2 user guide ENI
// table and the EC2 pricing offer file.

pub static INSTANCE_CORES: &[(&str, u32)] = &[
    ("m5.large", 2),
    ("c5.metal", 96),
    ("i3.16xlarge", 64),
    ("i3.metal", 72),
    ("x1e.32xlarge", 128),
    ("z1d.12xlarge", 48),
];

pub static INSTANCE_MEMORY: &[(&str, u64)] = &[
    ("m5.large", 8192),
    ("c5.metal", 196608),
    ("i3.16xlarge", 499712),
    ("i3.metal", 524288),
    ("x1e.32xlarge", 3997696),
];

pub static INSTANCE_ENIS_AVAILABLE: &[(&str, u32)] = &[
    ("m5.large", 3),
    ("c5.metal", 15),
    ("i3.16xlarge", 15),
    ("i3.metal", 15),
    ("x1e.32xlarge", 8),
    ("z1d.12xlarge", 15),
];

pub static INSTANCE_IPS_AVAILABLE: &[(&str, u32)] = &[
    ("m5.large", 10),
    ("c5.metal", 50),
    ("i3.16xlarge", 31),
    ("i3.metal", 50),
    ("x1e.32xlarge", 30),
    ("z1d.12xlarge", 50),
];
