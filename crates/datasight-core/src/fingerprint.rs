//! Content fingerprints for cached analysis results.

use std::collections::BTreeMap;
use std::fmt;

use datasight_ingest::{CellValue, Table};
use datasight_model::{AnalysisOptions, ColumnType};
use sha2::{Digest, Sha256};

/// SHA-256 over table content, options and type overrides.
///
/// Options are hashed through their `Debug` form, so fingerprints are only
/// comparable within one build of the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

fn update_str(hasher: &mut Sha256, value: &str) {
    hasher.update((value.len() as u64).to_le_bytes());
    hasher.update(value.as_bytes());
}

pub fn fingerprint(
    table: &Table,
    options: &AnalysisOptions,
    overrides: &BTreeMap<String, ColumnType>,
) -> Fingerprint {
    let mut hasher = Sha256::new();
    match &table.source_id {
        Some(source) => {
            hasher.update([1u8]);
            update_str(&mut hasher, source);
        }
        None => hasher.update([0u8]),
    }
    hasher.update((table.column_count() as u64).to_le_bytes());
    hasher.update((table.row_count() as u64).to_le_bytes());
    for column in table.columns() {
        update_str(&mut hasher, &column.name);
        for cell in &column.cells {
            match cell {
                CellValue::Missing => hasher.update([0u8]),
                CellValue::Text(value) => {
                    hasher.update([1u8]);
                    update_str(&mut hasher, value);
                }
            }
        }
    }
    update_str(&mut hasher, &format!("{options:?}"));
    hasher.update((overrides.len() as u64).to_le_bytes());
    for (name, column_type) in overrides {
        update_str(&mut hasher, name);
        update_str(&mut hasher, column_type.as_str());
    }
    let digest = hasher.finalize();
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&digest);
    Fingerprint(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use datasight_ingest::Column;

    fn table(values: &[&str]) -> Table {
        Table::new(vec![Column::from_raw("x", values.iter().copied())]).expect("table")
    }

    #[test]
    fn equal_content_gives_equal_fingerprints() {
        let options = AnalysisOptions::default();
        let overrides = BTreeMap::new();
        let a = fingerprint(&table(&["1", "2"]), &options, &overrides);
        let b = fingerprint(&table(&["1", "2"]), &options, &overrides);
        assert_eq!(a, b);
        assert_eq!(a.to_hex().len(), 64);
    }

    #[test]
    fn cell_boundaries_are_unambiguous() {
        let options = AnalysisOptions::default();
        let overrides = BTreeMap::new();
        let joined = fingerprint(&table(&["ab", ""]), &options, &overrides);
        let split = fingerprint(&table(&["a", "b"]), &options, &overrides);
        assert_ne!(joined, split);
    }

    #[test]
    fn options_and_overrides_change_the_fingerprint() {
        let options = AnalysisOptions::default();
        let data = table(&["1", "2", "3"]);
        let base = fingerprint(&data, &options, &BTreeMap::new());

        let tuned = options.clone().with_chart_size_threshold(10);
        assert_ne!(base, fingerprint(&data, &tuned, &BTreeMap::new()));

        let overrides = BTreeMap::from([("x".to_string(), ColumnType::Categorical)]);
        assert_ne!(base, fingerprint(&data, &options, &overrides));
    }
}
