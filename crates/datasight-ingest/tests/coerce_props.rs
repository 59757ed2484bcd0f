use datasight_ingest::{parse_number, sample_row_indices};
use proptest::prelude::*;

proptest! {
    #[test]
    fn finite_numbers_survive_display(value in -1.0e12f64..1.0e12f64) {
        let parsed = parse_number(&value.to_string());
        prop_assert_eq!(parsed, Some(value));
    }

    #[test]
    fn thousands_separated_integers_parse(value in 0u64..10_000_000_000u64) {
        let digits = value.to_string();
        let mut grouped = String::new();
        for (idx, ch) in digits.chars().enumerate() {
            if idx > 0 && (digits.len() - idx) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        prop_assert_eq!(parse_number(&grouped), Some(value as f64));
    }

    #[test]
    fn samples_never_exceed_requested_size(total in 0usize..5_000, size in 1usize..500, seed in any::<u64>()) {
        let picked = sample_row_indices(total, size, seed);
        prop_assert_eq!(picked.len(), total.min(size));
        prop_assert!(picked.iter().all(|idx| *idx < total));
    }
}
