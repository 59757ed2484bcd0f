use datasight_core::{Overrides, fingerprint};
use datasight_ingest::{Column, Table};
use datasight_model::{AnalysisOptions, ColumnType};
use proptest::prelude::*;

fn table(cells: &[String]) -> Table {
    Table::new(vec![Column::from_raw("value", cells.iter().map(String::as_str))]).expect("table")
}

proptest! {
    #[test]
    fn equal_tables_share_a_key(cells in prop::collection::vec("[a-z0-9]{1,6}", 1..30)) {
        let options = AnalysisOptions::default();
        let first = fingerprint(&table(&cells), &options, &Overrides::new());
        let second = fingerprint(&table(&cells), &options, &Overrides::new());
        prop_assert_eq!(first, second);
        prop_assert_eq!(first.to_hex().len(), 64);
    }

    #[test]
    fn any_cell_edit_changes_the_key(
        cells in prop::collection::vec("[a-z0-9]{1,6}", 1..30),
        pick in any::<prop::sample::Index>(),
    ) {
        let options = AnalysisOptions::default();
        let mut edited = cells.clone();
        let idx = pick.index(edited.len());
        edited[idx].push('z');
        prop_assert_ne!(
            fingerprint(&table(&cells), &options, &Overrides::new()),
            fingerprint(&table(&edited), &options, &Overrides::new())
        );
    }

    #[test]
    fn overrides_change_the_key(cells in prop::collection::vec("[0-9]{1,4}", 1..30)) {
        let options = AnalysisOptions::default();
        let data = table(&cells);
        let overrides = Overrides::from([("value".to_string(), ColumnType::Categorical)]);
        prop_assert_ne!(
            fingerprint(&data, &options, &Overrides::new()),
            fingerprint(&data, &options, &overrides)
        );
    }
}
