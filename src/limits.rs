//! Per instance type capability tables.
//!
//! The ENI limits table from the EC2 user guide decides which instance
//! types exist; the EC2 pricing offer file adds vcpu and memory. A fixed set
//! of corrections is applied on top, and the result is rendered as a Rust
//! source file with four lookup tables.

use indexmap::IndexMap;
use reqwest::Client;

pub mod emit;
pub mod error;
pub mod fetch;
pub mod html;
pub mod overrides;
pub mod pricing;
pub mod resources;

pub use emit::ResourceTables;
pub use error::{LimitsError, ParseError};
pub use resources::{InstanceResources, StaticResources};

/// Scraped and merged values for one instance type.
///
/// `eni`, `ip` and `cpu` stay as the source text until they are emitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableEntry {
    pub eni: Option<String>,
    pub ip: Option<String>,
    pub cpu: Option<String>,
    pub memory_mib: Option<u64>,
}

impl TableEntry {
    pub fn is_complete(&self) -> bool {
        self.cpu.is_some() && self.eni.is_some()
    }
}

/// Instance types in the order they were first seen in the ENI table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstanceTable {
    entries: IndexMap<String, TableEntry>,
}

impl InstanceTable {
    /// Records the network limits for `type_id`, replacing any earlier ones
    /// without moving it.
    pub fn insert_limits(&mut self, type_id: &str, eni: Option<String>, ip: Option<String>) {
        let entry = self.entries.entry(type_id.to_string()).or_default();
        entry.eni = eni;
        entry.ip = ip;
    }

    pub fn get(&self, type_id: &str) -> Option<&TableEntry> {
        self.entries.get(type_id)
    }

    pub fn get_mut(&mut self, type_id: &str) -> Option<&mut TableEntry> {
        self.entries.get_mut(type_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TableEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn entries_mut(&mut self) -> impl Iterator<Item = &mut TableEntry> {
        self.entries.values_mut()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every entry without a cpu or eni count.
    ///
    /// Missing memory or ip does not drop an entry.
    pub fn retain_complete(&mut self) {
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.is_complete());
        tracing::debug!(
            kept = self.entries.len(),
            dropped = before - self.entries.len(),
            "filtered incomplete instance types"
        );
    }
}

/// Builds the capability table from the two source documents.
pub fn build_table(eni_html: &str, pricing_json: &str) -> Result<InstanceTable, LimitsError> {
    let mut table = html::parse_eni_table(eni_html)?;
    pricing::merge_pricing(&mut table, pricing_json)?;
    table.retain_complete();
    overrides::apply_overrides(&mut table);
    Ok(table)
}

/// Fetches both sources, one after the other, and renders the generated
/// source file. Nothing is written here.
pub async fn generate(
    client: &Client,
    eni_url: &str,
    pricing_url: &str,
) -> Result<String, LimitsError> {
    let eni_html = fetch::fetch_text(client, eni_url).await?;
    let pricing_json = fetch::fetch_text(client, pricing_url).await?;

    let table = build_table(&eni_html, &pricing_json)?;
    let tables = ResourceTables::from_table(&table)?;
    tracing::info!(types = table.len(), "built instance capability tables");
    Ok(tables.render())
}
