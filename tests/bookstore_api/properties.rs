//! Property-based checks on the buy path.

use crate::common::*;
use foliodb::prelude::*;
use proptest::prelude::*;
use std::collections::HashMap;

fn arb_order() -> impl Strategy<Value = Vec<(i64, i32)>> {
    prop::collection::vec((1i64..=6, -2i32..=8), 1..6)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Whatever the order, a buy call either debits exactly the aggregated
    /// per-key quantities or leaves every stock level unchanged. Demand
    /// counters are the one sanctioned side effect of a failed call.
    #[test]
    fn buy_calls_debit_exactly_or_not_at_all(order in arb_order()) {
        let store = seeded_store(LockingStrategy::TwoLevel);
        store
            .add_books(&(1..=4).map(|isbn| book(isbn, 5)).collect::<Vec<_>>())
            .unwrap();

        let before: HashMap<Isbn, u32> = snapshot(&store)
            .iter()
            .map(|b| (b.isbn, b.num_copies))
            .collect();

        let orders: Vec<BookCopy> = order
            .iter()
            .map(|&(isbn, quantity)| BookCopy::new(Isbn::new(isbn), quantity))
            .collect();

        let mut totals: HashMap<Isbn, u32> = HashMap::new();
        let mut valid = true;
        for &(isbn, quantity) in &order {
            if quantity <= 0 {
                valid = false;
            } else {
                *totals.entry(Isbn::new(isbn)).or_default() += quantity as u32;
            }
        }
        // Keys 5 and 6 are never in the catalog.
        valid &= order.iter().all(|&(isbn, _)| isbn <= 4);
        let sufficient = totals
            .iter()
            .all(|(isbn, &total)| total <= before.get(isbn).copied().unwrap_or(0));

        let result = store.buy_books(&orders);
        let after: HashMap<Isbn, u32> = snapshot(&store)
            .iter()
            .map(|b| (b.isbn, b.num_copies))
            .collect();

        if valid && sufficient {
            prop_assert!(result.is_ok());
            for (isbn, &count) in &before {
                let debit = totals.get(isbn).copied().unwrap_or(0);
                prop_assert_eq!(after[isbn], count - debit);
            }
        } else {
            prop_assert!(result.is_err());
            prop_assert_eq!(&after, &before);
        }
    }

    /// Validation failures never touch the demand counters; only a genuine
    /// stock shortfall does, and by exactly the shortfall amount.
    #[test]
    fn demand_counters_track_shortfalls_only(quantity in 1i32..=12) {
        let store = seeded_store(LockingStrategy::TwoLevel);

        let result = store.buy_books(&[BookCopy::new(Isbn::new(TEST_ISBN), quantity)]);
        let books = store.get_books_by_isbn(&[Isbn::new(TEST_ISBN)]).unwrap();

        if quantity as u32 <= NUM_COPIES {
            prop_assert!(result.is_ok());
            prop_assert_eq!(books[0].num_sale_misses, 0);
        } else {
            prop_assert!(result.unwrap_err().is_insufficient_stock());
            prop_assert_eq!(books[0].num_copies, NUM_COPIES);
            prop_assert_eq!(
                books[0].num_sale_misses,
                (quantity as u32 - NUM_COPIES) as u64
            );
        }
    }
}
