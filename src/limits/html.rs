use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};

use super::{error::ParseError, InstanceTable};

pub const TABLE_SELECTOR: &str = ".table-contents table";

lazy_static! {
    static ref TABLE: Selector = Selector::parse(TABLE_SELECTOR).unwrap();
    static ref ROW: Selector = Selector::parse("tr").unwrap();
    static ref CELL: Selector = Selector::parse("td").unwrap();
}

/// Reads the ENI/IP limits table out of the EC2 user guide page.
///
/// Each data row is `type | enis | ips per eni | ipv6 per eni`; the ipv6
/// column is ignored. Header rows (which only carry `th` cells) and rows
/// with fewer than three cells are skipped. A type seen twice keeps its
/// first position but takes the later row's values.
pub fn parse_eni_table(html: &str) -> Result<InstanceTable, ParseError> {
    let document = Html::parse_document(html);
    let tables: Vec<ElementRef> = document.select(&TABLE).collect();
    if tables.is_empty() {
        return Err(ParseError::MissingTable(TABLE_SELECTOR));
    }

    let mut table = InstanceTable::default();
    for row in tables.iter().flat_map(|t| t.select(&ROW)) {
        let cells: Vec<String> = row
            .select(&CELL)
            .map(|td| td.text().collect::<String>().trim().to_string())
            .collect();

        match cells.as_slice() {
            [type_id, ..] if type_id.is_empty() => continue,
            [type_id, eni, ip, ..] => table.insert_limits(type_id, non_empty(eni), non_empty(ip)),
            [] => continue,
            short => {
                tracing::debug!(cells = ?short, "skipping malformed ENI table row");
            }
        }
    }
    tracing::debug!(types = table.len(), "parsed ENI limits table");
    Ok(table)
}

fn non_empty(cell: &str) -> Option<String> {
    (!cell.is_empty()).then(|| cell.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(rows: &str) -> String {
        format!(
            r#"<html><body><div class="table-contents"><table>
            <tr><th>Instance type</th><th>Maximum network interfaces</th><th>Private IPv4 addresses per interface</th><th>IPv6 addresses per interface</th></tr>
            {rows}
            </table></div></body></html>"#
        )
    }

    #[test]
    fn test_parse_rows() {
        let html = page(
            "<tr><td> m5.large </td><td>3</td><td>10</td><td>10</td></tr>
             <tr><td>c5.metal</td><td>15</td><td>50</td><td>50</td></tr>",
        );
        let table = parse_eni_table(&html).unwrap();
        assert_eq!(table.len(), 2);

        let m5 = table.get("m5.large").unwrap();
        assert_eq!(m5.eni.as_deref(), Some("3"));
        assert_eq!(m5.ip.as_deref(), Some("10"));
        assert!(m5.cpu.is_none());
        assert!(m5.memory_mib.is_none());
    }

    #[test]
    fn test_skips_malformed_and_blank_rows() {
        let html = page(
            "<tr><td>t2.nano</td></tr>
             <tr><td>t2.micro</td><td>2</td></tr>
             <tr><td>  </td><td>2</td><td>2</td></tr>
             <tr><td>t3.nano</td><td>2</td><td>2</td><td>2</td></tr>",
        );
        let table = parse_eni_table(&html).unwrap();
        let keys: Vec<_> = table.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["t3.nano"]);
    }

    #[test]
    fn test_duplicate_type_keeps_first_position() {
        let html = page(
            "<tr><td>a</td><td>1</td><td>1</td></tr>
             <tr><td>b</td><td>2</td><td>2</td></tr>
             <tr><td>a</td><td>3</td><td>4</td></tr>",
        );
        let table = parse_eni_table(&html).unwrap();
        let keys: Vec<_> = table.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["a", "b"]);
        assert_eq!(table.get("a").unwrap().eni.as_deref(), Some("3"));
    }

    #[test]
    fn test_empty_cells_are_unset() {
        let html = page("<tr><td>x1.metal</td><td></td><td>30</td></tr>");
        let table = parse_eni_table(&html).unwrap();
        assert!(table.get("x1.metal").unwrap().eni.is_none());
    }

    #[test]
    fn test_missing_table() {
        let err = parse_eni_table("<html><table><tr><td>a</td></tr></table></html>").unwrap_err();
        assert!(matches!(err, ParseError::MissingTable(_)));
    }
}
