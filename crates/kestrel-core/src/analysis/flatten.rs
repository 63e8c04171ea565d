use super::EvidenceTable;
use crate::lighthouse::{CellValue, ChainNode, DetailItem, DetailPayload, Heading};
use std::collections::BTreeMap;

/// Flatten a polymorphic detail payload into display rows.
///
/// Tabular payloads (`headings` + `items`) become one row per item, with
/// sub-item rows inlined beneath their parent. Critical-request-chain
/// payloads become one row per node in depth-first order. Anything else
/// yields no table and the finding carries prose only.
pub fn flatten_details(details: &DetailPayload) -> Option<EvidenceTable> {
    if let (Some(headings), Some(items)) = (&details.headings, &details.items)
        && !headings.is_empty()
        && !items.is_empty()
    {
        return Some(flatten_table(headings, items));
    }

    if let Some(chains) = &details.chains
        && !chains.is_empty()
    {
        return Some(flatten_chains(chains));
    }

    None
}

fn flatten_table(headings: &[Heading], items: &[DetailItem]) -> EvidenceTable {
    let labels: Vec<String> = headings.iter().map(|h| h.display_label().to_string()).collect();

    let mut rows = Vec::new();
    for item in items {
        rows.push(item_row(headings, item, None));

        // One level of nesting observed in practice; sub-items share the
        // parent's columns
        if let Some(sub) = &item.sub_items {
            for sub_item in &sub.items {
                rows.push(item_row(headings, sub_item, Some("  \u{21b3} ")));
            }
        }
    }

    EvidenceTable {
        headings: labels,
        rows,
    }
}

fn item_row(headings: &[Heading], item: &DetailItem, first_col_prefix: Option<&str>) -> Vec<String> {
    headings
        .iter()
        .enumerate()
        .map(|(col, heading)| {
            let key = heading.key.as_deref().unwrap_or("");
            let rendered = item
                .fields
                .get(key)
                .map(|raw| format_cell(key, raw))
                .unwrap_or_default();
            match (col, first_col_prefix) {
                (0, Some(prefix)) => format!("{}{}", prefix, rendered),
                _ => rendered,
            }
        })
        .collect()
}

/// Resolve one cell: classify the raw JSON, then apply unit formatting when
/// the heading key names a byte or time quantity.
fn format_cell(key: &str, raw: &serde_json::Value) -> String {
    let cell = CellValue::classify(raw);

    if let Some(magnitude) = cell.as_f64() {
        if is_bytes_key(key) {
            return format_kb(magnitude);
        }
        if is_time_key(key) {
            return format_ms(magnitude);
        }
    }

    cell.render()
}

// Bytes checked first: "wastedBytes" names both a waste and a byte count
fn is_bytes_key(key: &str) -> bool {
    let key = key.to_lowercase();
    ["byte", "size", "transfer"].iter().any(|u| key.contains(u))
}

fn is_time_key(key: &str) -> bool {
    let key = key.to_lowercase();
    ["time", "ms", "duration", "wasted"]
        .iter()
        .any(|u| key.contains(u))
}

fn format_kb(bytes: f64) -> String {
    format!("{:.1} KB", bytes / 1024.0)
}

fn format_ms(millis: f64) -> String {
    if millis.abs() > 1000.0 {
        format!("{:.1} s", millis / 1000.0)
    } else {
        format!("{:.0} ms", millis)
    }
}

fn flatten_chains(chains: &BTreeMap<String, ChainNode>) -> EvidenceTable {
    // Start times are absolute; report them relative to the earliest root
    let origin = chains
        .values()
        .map(|n| n.request.start_time)
        .fold(f64::INFINITY, f64::min);

    let mut rows = Vec::new();
    for node in chains.values() {
        flatten_chain_node(node, 0, origin, &mut rows);
    }

    EvidenceTable {
        headings: vec![
            "Resource".to_string(),
            "Transfer Size".to_string(),
            "Start Time".to_string(),
        ],
        rows,
    }
}

fn flatten_chain_node(
    node: &ChainNode,
    depth: usize,
    origin: f64,
    rows: &mut Vec<Vec<String>>,
) {
    rows.push(vec![
        format!("{}{}", "  ".repeat(depth), node.request.url),
        format_kb(node.request.transfer_size),
        format_ms((node.request.start_time - origin) * 1000.0),
    ]);

    if let Some(children) = &node.children {
        for child in children.values() {
            flatten_chain_node(child, depth + 1, origin, rows);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lighthouse::ResponseReader;

    fn table_details(json: &str) -> DetailPayload {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_flat_primitive_row_passes_through_unchanged() {
        let details = table_details(
            r#"{
                "headings": [{"key": "name", "text": "Name"}, {"key": "count", "text": "Count"}],
                "items": [{"name": "main-thread", "count": 7}]
            }"#,
        );

        let table = flatten_details(&details).unwrap();
        assert_eq!(table.headings, vec!["Name", "Count"]);
        assert_eq!(table.rows, vec![vec!["main-thread".to_string(), "7".to_string()]]);
    }

    #[test]
    fn test_byte_keys_render_as_kb() {
        let details = table_details(
            r#"{
                "headings": [{"key": "transferSize", "text": "Size"}],
                "items": [{"transferSize": 2048}]
            }"#,
        );

        let table = flatten_details(&details).unwrap();
        assert_eq!(table.rows[0][0], "2.0 KB");
    }

    #[test]
    fn test_wasted_bytes_prefers_kb_over_time() {
        let details = table_details(
            r#"{
                "headings": [{"key": "wastedBytes", "text": "Wasted"}],
                "items": [{"wastedBytes": 10240}]
            }"#,
        );

        let table = flatten_details(&details).unwrap();
        assert_eq!(table.rows[0][0], "10.0 KB");
    }

    #[test]
    fn test_time_keys_render_ms_then_seconds() {
        let details = table_details(
            r#"{
                "headings": [{"key": "wastedMs", "text": "Wasted"}],
                "items": [{"wastedMs": 450}, {"wastedMs": 2500}]
            }"#,
        );

        let table = flatten_details(&details).unwrap();
        assert_eq!(table.rows[0][0], "450 ms");
        assert_eq!(table.rows[1][0], "2.5 s");
    }

    #[test]
    fn test_heading_label_falls_back_to_key() {
        let details = table_details(
            r#"{
                "headings": [{"key": "url"}, {"key": "total", "label": "Total"}],
                "items": [{"url": "a.css", "total": 1}]
            }"#,
        );

        let table = flatten_details(&details).unwrap();
        assert_eq!(table.headings, vec!["url", "Total"]);
    }

    #[test]
    fn test_nested_url_object_unwraps_in_cell() {
        let details = table_details(
            r#"{
                "headings": [{"key": "node", "text": "Element"}],
                "items": [{"node": {"snippet": "<img src=hero.png>"}}]
            }"#,
        );

        let table = flatten_details(&details).unwrap();
        assert_eq!(table.rows[0][0], "<img src=hero.png>");
    }

    #[test]
    fn test_sub_items_flatten_beneath_parent_with_marker() {
        let details = table_details(
            r#"{
                "headings": [{"key": "url", "text": "URL"}, {"key": "totalBytes", "text": "Bytes"}],
                "items": [{
                    "url": "https://a.test/bundle.js",
                    "totalBytes": 4096,
                    "subItems": {"items": [{"url": "https://a.test/vendor.js", "totalBytes": 1024}]}
                }]
            }"#,
        );

        let table = flatten_details(&details).unwrap();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0][0], "https://a.test/bundle.js");
        assert!(table.rows[1][0].starts_with("  \u{21b3} "));
        assert!(table.rows[1][0].ends_with("vendor.js"));
        assert_eq!(table.rows[1][1], "1.0 KB");
    }

    #[test]
    fn test_chains_flatten_depth_first_with_indentation() {
        let json = r#"{
            "lighthouseResult": {
                "categories": {},
                "audits": {
                    "critical-request-chains": {
                        "id": "critical-request-chains",
                        "title": "Avoid chaining critical requests",
                        "scoreDisplayMode": "informative",
                        "description": "",
                        "details": {
                            "type": "criticalrequestchain",
                            "chains": {
                                "A": {
                                    "request": {"url": "https://a.test/", "transferSize": 2048, "startTime": 10.0, "endTime": 10.2},
                                    "children": {
                                        "B": {
                                            "request": {"url": "https://a.test/style.css", "transferSize": 1024, "startTime": 10.3, "endTime": 10.4}
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }"#;

        let response = ResponseReader::from_str(json).unwrap();
        let details = response.lighthouse_result.audits["critical-request-chains"]
            .details
            .as_ref()
            .unwrap();

        let table = flatten_details(details).unwrap();
        assert_eq!(table.headings[0], "Resource");
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0][0], "https://a.test/");
        assert_eq!(table.rows[0][1], "2.0 KB");
        assert_eq!(table.rows[0][2], "0 ms");
        assert_eq!(table.rows[1][0], "  https://a.test/style.css");
        // 0.3 s after the root request started
        assert_eq!(table.rows[1][2], "300 ms");
    }

    #[test]
    fn test_unrecognized_payload_yields_no_table() {
        let details = table_details(r#"{"type": "debugdata"}"#);
        assert!(flatten_details(&details).is_none());
    }
}
