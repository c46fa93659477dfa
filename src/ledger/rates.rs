use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use tracing::warn;

/// Resolves the unit price of a product size for a client.
///
/// Implementations return 0 for unknown pairs rather than failing.
pub trait RateResolver {
    fn rate(&self, client_name: &str, size: &str) -> f64;
}

/// Static price list keyed by client name, then product size.
///
/// Client names are matched case-insensitively, sizes exactly.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "BTreeMap<String, HashMap<String, f64>>")]
pub struct RateTable {
    clients: HashMap<String, HashMap<String, f64>>,
}

fn normalize_client(name: &str) -> String {
    name.trim().to_lowercase()
}

impl RateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace one price, returning the updated table
    pub fn with_rate(mut self, client_name: &str, size: &str, rate: f64) -> Self {
        self.clients
            .entry(normalize_client(client_name))
            .or_default()
            .insert(size.to_string(), rate);
        self
    }

    /// Sizes and prices configured for one client
    pub fn client_rates(&self, client_name: &str) -> Option<&HashMap<String, f64>> {
        self.clients.get(&normalize_client(client_name))
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    /// All (client, size, rate) rows sorted by client then size
    pub fn rows(&self) -> Vec<(&str, &str, f64)> {
        let mut rows: Vec<(&str, &str, f64)> = self
            .clients
            .iter()
            .flat_map(|(client, sizes)| {
                sizes
                    .iter()
                    .map(move |(size, rate)| (client.as_str(), size.as_str(), *rate))
            })
            .collect();
        rows.sort_by(|a, b| a.0.cmp(b.0).then_with(|| a.1.cmp(b.1)));
        rows
    }
}

/// Tables whose names differ only in case are merged in key order, so a
/// later key overrides sizes it shares with an earlier one.
impl From<BTreeMap<String, HashMap<String, f64>>> for RateTable {
    fn from(raw: BTreeMap<String, HashMap<String, f64>>) -> Self {
        let mut table = RateTable::new();
        for (client, sizes) in raw {
            if table.client_rates(&client).is_some() {
                warn!(client = %client, "duplicate rate table, merging into earlier entry");
            }
            for (size, rate) in sizes {
                table = table.with_rate(&client, &size, rate);
            }
        }
        table
    }
}

impl RateResolver for RateTable {
    fn rate(&self, client_name: &str, size: &str) -> f64 {
        let rate = self
            .client_rates(client_name)
            .and_then(|sizes| sizes.get(size))
            .copied()
            .unwrap_or(0.0);
        if rate.is_finite() && rate >= 0.0 {
            rate
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_lookup_ignores_case() {
        let table = RateTable::new().with_rate("Sharma Motors", "4in", 100.0);
        assert_eq!(table.rate("sharma motors", "4in"), 100.0);
        assert_eq!(table.rate("SHARMA MOTORS ", "4in"), 100.0);
    }

    #[test]
    fn test_missing_pairs_resolve_to_zero() {
        let table = RateTable::new().with_rate("sharma", "4in", 100.0);
        assert_eq!(table.rate("sharma", "6in"), 0.0);
        assert_eq!(table.rate("verma", "4in"), 0.0);
        assert_eq!(table.rate("sharma", "4IN"), 0.0);
    }

    #[test]
    fn test_negative_rate_resolves_to_zero() {
        let table = RateTable::new().with_rate("sharma", "4in", -5.0);
        assert_eq!(table.rate("sharma", "4in"), 0.0);
    }

    #[test]
    fn test_from_toml_normalizes_keys() {
        let table: RateTable = toml::from_str(
            r#"
["Sharma"]
"4in" = 100
"6in" = 150.5
"#,
        )
        .unwrap();
        assert_eq!(table.rate("sharma", "4in"), 100.0);
        assert_eq!(table.rate("SHARMA", "6in"), 150.5);
        assert_eq!(table.rows().len(), 2);
    }

    #[test]
    fn test_tables_differing_in_case_merge_in_key_order() {
        for _ in 0..20 {
            let table: RateTable = toml::from_str(
                r#"
["sharma"]
"4in" = 200

["Sharma"]
"4in" = 100
"6in" = 150
"#,
            )
            .unwrap();
            // "Sharma" sorts before "sharma"
            assert_eq!(table.rate("sharma", "4in"), 200.0);
            assert_eq!(table.rate("sharma", "6in"), 150.0);
            assert_eq!(table.rows().len(), 2);
        }
    }
}
