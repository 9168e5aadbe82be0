use std::fmt::{Display, Write};

use super::{error::ParseError, InstanceTable};

/// The four lookup tables, in table order, with values coerced to integers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceTables {
    pub cores: Vec<(String, u32)>,
    pub memory: Vec<(String, u64)>,
    pub enis: Vec<(String, u32)>,
    pub ips: Vec<(String, u32)>,
}

impl ResourceTables {
    /// Splits a filtered table into its four columns.
    ///
    /// An entry with no memory or ip is left out of that column only.
    pub fn from_table(table: &InstanceTable) -> Result<Self, ParseError> {
        let mut tables = Self::default();
        for (type_id, entry) in table.iter() {
            if let Some(cpu) = &entry.cpu {
                tables.cores.push((type_id.to_string(), number(type_id, "vcpu", cpu)?));
            }
            if let Some(mib) = entry.memory_mib {
                tables.memory.push((type_id.to_string(), mib));
            }
            if let Some(eni) = &entry.eni {
                tables.enis.push((type_id.to_string(), number(type_id, "eni", eni)?));
            }
            if let Some(ip) = &entry.ip {
                tables.ips.push((type_id.to_string(), number(type_id, "ip", ip)?));
            }
        }
        Ok(tables)
    }

    /// Renders the tables as a Rust source file.
    pub fn render(&self) -> String {
        let mut out = String::from(HEADER);
        write_table(&mut out, "INSTANCE_CORES", "u32", &self.cores);
        write_table(&mut out, "INSTANCE_MEMORY", "u64", &self.memory);
        write_table(&mut out, "INSTANCE_ENIS_AVAILABLE", "u32", &self.enis);
        write_table(&mut out, "INSTANCE_IPS_AVAILABLE", "u32", &self.ips);
        out
    }
}

const HEADER: &str = "\
// @generated by `ekstrap generate`. Do not edit by hand.
//
// Per instance type resource limits, scraped from the EC2 user guide ENI
// table and the EC2 pricing offer file.
";

fn write_table<V: Display>(out: &mut String, name: &str, ty: &str, rows: &[(String, V)]) {
    // Writing to a String cannot fail.
    let _ = writeln!(out, "\npub static {name}: &[(&str, {ty})] = &[");
    for (type_id, value) in rows {
        let _ = writeln!(out, "    ({type_id:?}, {value}),");
    }
    let _ = writeln!(out, "];");
}

fn number<T: std::str::FromStr>(
    type_id: &str,
    field: &'static str,
    value: &str,
) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidNumber {
        type_id: type_id.to_string(),
        field,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(
        table: &mut InstanceTable,
        t: &str,
        eni: &str,
        ip: Option<&str>,
        cpu: &str,
        mib: Option<u64>,
    ) {
        table.insert_limits(t, Some(eni.into()), ip.map(Into::into));
        let e = table.get_mut(t).unwrap();
        e.cpu = Some(cpu.into());
        e.memory_mib = mib;
    }

    #[test]
    fn test_render() {
        let mut table = InstanceTable::default();
        entry(&mut table, "m5.large", "3", Some("10"), "2", Some(8192));
        entry(&mut table, "a1.medium", "2", Some("4"), "1", Some(2048));

        let rendered = ResourceTables::from_table(&table).unwrap().render();
        let expected = format!(
            "{HEADER}
pub static INSTANCE_CORES: &[(&str, u32)] = &[
    (\"m5.large\", 2),
    (\"a1.medium\", 1),
];

pub static INSTANCE_MEMORY: &[(&str, u64)] = &[
    (\"m5.large\", 8192),
    (\"a1.medium\", 2048),
];

pub static INSTANCE_ENIS_AVAILABLE: &[(&str, u32)] = &[
    (\"m5.large\", 3),
    (\"a1.medium\", 2),
];

pub static INSTANCE_IPS_AVAILABLE: &[(&str, u32)] = &[
    (\"m5.large\", 10),
    (\"a1.medium\", 4),
];
"
        );
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_missing_memory_only_drops_that_column() {
        let mut table = InstanceTable::default();
        entry(&mut table, "x1.metal", "8", None, "64", None);

        let tables = ResourceTables::from_table(&table).unwrap();
        assert_eq!(tables.cores, [("x1.metal".to_string(), 64)]);
        assert_eq!(tables.enis, [("x1.metal".to_string(), 8)]);
        assert!(tables.memory.is_empty());
        assert!(tables.ips.is_empty());
    }

    #[test]
    fn test_invalid_number() {
        let mut table = InstanceTable::default();
        entry(&mut table, "m5.large", "three", Some("10"), "2", Some(8192));

        let err = ResourceTables::from_table(&table).unwrap_err();
        assert!(matches!(err, ParseError::InvalidNumber { field: "eni", .. }));
    }
}
