//! Property tests for fraction arithmetic.

use proptest::prelude::*;
use stratum_model::{PERCENT_SCALE, SplitFractions};

fn whole_percent_fractions() -> impl Strategy<Value = SplitFractions> {
    (0u32..=100)
        .prop_flat_map(|train| (Just(train), 0u32..=(100 - train)))
        .prop_map(|(train, dev)| {
            let test = 100 - train - dev;
            SplitFractions::new(
                f64::from(train) / 100.0,
                f64::from(dev) / 100.0,
                f64::from(test) / 100.0,
            )
        })
}

proptest! {
    #[test]
    fn cutoffs_stay_ordered_and_in_bounds(fractions in whole_percent_fractions(), rows in 0usize..5_000) {
        let (train_end, dev_end) = fractions.cutoffs(rows);
        prop_assert!(train_end <= dev_end);
        prop_assert!(dev_end <= rows);
    }

    #[test]
    fn cutoff_sizes_track_fractions(fractions in whole_percent_fractions(), rows in 0usize..5_000) {
        let (train_end, dev_end) = fractions.cutoffs(rows);
        let n = rows as f64;
        let test_len = (rows - dev_end) as f64;
        // Each boundary is off by at most one rounding step.
        prop_assert!((train_end as f64 - n * fractions.train).abs() <= 1.0);
        prop_assert!(((dev_end - train_end) as f64 - n * fractions.dev).abs() <= 1.0);
        prop_assert!((test_len - n * fractions.test).abs() <= 2.0);
    }

    #[test]
    fn unit_layout_covers_every_subset(fractions in whole_percent_fractions()) {
        let layout = fractions.unit_layout().expect("whole percentages decompose");
        prop_assert_eq!(
            layout.train_units + layout.dev_units + layout.test_units,
            layout.subsets
        );
        prop_assert_eq!(PERCENT_SCALE as usize % layout.subsets, 0);
        prop_assert!(layout.subsets >= 1);
    }
}
