//! Property-based tests for schedule generation.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::generator::generate_schedule;
use super::preview::SchedulePreview;
use super::types::ScheduleParams;

fn params_strategy() -> impl Strategy<Value = ScheduleParams> {
    (
        1i64..100_000_000i64,
        1u32..48,
        1u32..120,
        0i64..3_650,
    )
        .prop_map(|(cents, count, interval_days, offset)| ScheduleParams {
            balance: Decimal::new(cents, 2),
            count,
            interval_days,
            start_date: NaiveDate::from_ymd_opt(2020, 1, 1)
                .and_then(|d| d.checked_add_signed(chrono::Duration::days(offset)))
                .unwrap(),
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Generating twice with the same parameters yields identical drafts.
    #[test]
    fn prop_generation_is_idempotent(params in params_strategy()) {
        prop_assert_eq!(generate_schedule(&params), generate_schedule(&params));
    }

    /// Sequences run 1..=N, dates are strictly increasing by the interval,
    /// and every draft owes the same amount.
    #[test]
    fn prop_shape(params in params_strategy()) {
        let drafts = generate_schedule(&params).unwrap();
        prop_assert_eq!(drafts.len(), params.count as usize);

        for (idx, draft) in drafts.iter().enumerate() {
            let k = u32::try_from(idx).unwrap() + 1;
            prop_assert_eq!(draft.sequence, k);
            let days = (draft.due_date - params.start_date).num_days();
            prop_assert_eq!(days, i64::from(params.interval_days) * i64::from(k));
            prop_assert_eq!(draft.amount, drafts[0].amount);
        }
    }

    /// Regenerating after edits restores the pristine schedule.
    #[test]
    fn prop_regeneration_discards_edits(params in params_strategy(), bump in 1i64..10_000) {
        let pristine = SchedulePreview::new(params).unwrap();
        let mut edited = pristine.clone();
        edited.edit_amount(1, Decimal::new(bump, 2)).unwrap();
        edited.set_count(params.count).unwrap();
        prop_assert_eq!(edited, pristine);
    }
}
