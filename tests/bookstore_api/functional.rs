//! Functional behavior of the operation set, strategy-independent.

use crate::common::*;
use foliodb::prelude::*;

#[test]
fn buy_all_copies_of_the_default_book() {
    each_strategy(|store| {
        store
            .buy_books(&[BookCopy::new(Isbn::new(TEST_ISBN), NUM_COPIES as i32)])
            .unwrap();

        let books = store.get_all_books().unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].num_copies, 0);
        assert_eq!(books[0].num_sale_misses, 0);

        let expected = default_book();
        assert_eq!(books[0].title, expected.title);
        assert_eq!(books[0].author, expected.author);
        assert_eq!(books[0].price, expected.price);
    });
}

#[test]
fn buy_with_malformed_isbn_changes_nothing() {
    each_strategy(|store| {
        let before = snapshot(&store);

        let err = store
            .buy_books(&[
                BookCopy::new(Isbn::new(TEST_ISBN), 1),
                BookCopy::new(Isbn::new(-1), 1),
            ])
            .unwrap_err();
        assert!(matches!(err, Error::InvalidIsbn(_)));

        assert_eq!(snapshot(&store), before);
    });
}

#[test]
fn buy_with_unknown_isbn_changes_nothing() {
    each_strategy(|store| {
        let before = snapshot(&store);

        let err = store
            .buy_books(&[
                BookCopy::new(Isbn::new(TEST_ISBN), 1),
                BookCopy::new(Isbn::new(100000), 10),
            ])
            .unwrap_err();
        assert!(err.is_not_found());

        assert_eq!(snapshot(&store), before);
    });
}

#[test]
fn buy_with_invalid_quantity_changes_nothing() {
    each_strategy(|store| {
        let before = snapshot(&store);

        for quantity in [0, -1] {
            let err = store
                .buy_books(&[BookCopy::new(Isbn::new(TEST_ISBN), quantity)])
                .unwrap_err();
            assert!(matches!(err, Error::InvalidQuantity { .. }));
        }

        assert_eq!(snapshot(&store), before);
    });
}

#[test]
fn buying_more_than_stock_records_the_shortfall_and_fails() {
    each_strategy(|store| {
        let requested = NUM_COPIES as i32 + 3;
        let err = store
            .buy_books(&[BookCopy::new(Isbn::new(TEST_ISBN), requested)])
            .unwrap_err();

        match err {
            Error::InsufficientStock { shortfalls } => {
                assert_eq!(shortfalls.len(), 1);
                assert_eq!(shortfalls[0].isbn, Isbn::new(TEST_ISBN));
                assert_eq!(shortfalls[0].requested, requested as u64);
                assert_eq!(shortfalls[0].available, u64::from(NUM_COPIES));
                assert_eq!(shortfalls[0].amount(), 3);
            }
            other => panic!("expected InsufficientStock, got {other:?}"),
        }

        // Stock untouched; the shortfall landed in the demand counter.
        let books = store.get_all_books().unwrap();
        assert_eq!(books[0].num_copies, NUM_COPIES);
        assert_eq!(books[0].num_sale_misses, 3);

        let in_demand = store.get_books_in_demand().unwrap();
        assert_eq!(in_demand.len(), 1);
        assert_eq!(in_demand[0].isbn, Isbn::new(TEST_ISBN));
    });
}

#[test]
fn oversized_duplicate_orders_do_not_wrap_the_stock_check() {
    each_strategy(|store| {
        // Summed, these exceed u32::MAX; a wrapped total would look small
        // enough to pass the stock check.
        let order = BookCopy::new(Isbn::new(TEST_ISBN), i32::MAX);
        let err = store.buy_books(&[order, order, order]).unwrap_err();
        assert!(err.is_insufficient_stock());

        let books = store.get_books_by_isbn(&[Isbn::new(TEST_ISBN)]).unwrap();
        assert_eq!(books[0].num_copies, NUM_COPIES);
    });
}

#[test]
fn a_failed_buy_reports_every_shortfall_at_once() {
    each_strategy(|store| {
        store.add_books(&[book(10, 1), book(11, 2)]).unwrap();

        let err = store
            .buy_books(&[
                BookCopy::new(Isbn::new(10), 4),
                BookCopy::new(Isbn::new(11), 5),
                BookCopy::new(Isbn::new(TEST_ISBN), 1),
            ])
            .unwrap_err();

        match err {
            Error::InsufficientStock { shortfalls } => {
                assert_eq!(shortfalls.len(), 2);
                let amounts: Vec<(Isbn, u64)> =
                    shortfalls.iter().map(|s| (s.isbn, s.amount())).collect();
                assert!(amounts.contains(&(Isbn::new(10), 3)));
                assert!(amounts.contains(&(Isbn::new(11), 3)));
            }
            other => panic!("expected InsufficientStock, got {other:?}"),
        }

        // The sufficiently stocked item was not sold either.
        let books = store.get_books_by_isbn(&[Isbn::new(TEST_ISBN)]).unwrap();
        assert_eq!(books[0].num_copies, NUM_COPIES);
        assert_eq!(books[0].num_sale_misses, 0);
    });
}

#[test]
fn get_all_books_returns_every_entry() {
    each_strategy(|store| {
        store.add_books(&[book(1, 2), book(2, 3)]).unwrap();

        let books = snapshot(&store);
        let isbns: Vec<Isbn> = books.iter().map(|b| b.isbn).collect();
        assert_eq!(
            isbns,
            vec![Isbn::new(1), Isbn::new(2), Isbn::new(TEST_ISBN)]
        );
    });
}

#[test]
fn get_books_returns_the_named_entries() {
    each_strategy(|store| {
        store.add_books(&[book(1, 2), book(2, 3)]).unwrap();

        let books = store
            .get_books(&[Isbn::new(2), Isbn::new(1)])
            .unwrap();
        assert_eq!(books.len(), 2);
        assert_eq!(books[0].isbn, Isbn::new(2));
        assert_eq!(books[1].isbn, Isbn::new(1));
    });
}

#[test]
fn get_books_rejects_malformed_and_unknown_isbns() {
    each_strategy(|store| {
        let err = store
            .get_books(&[Isbn::new(TEST_ISBN), Isbn::new(-1)])
            .unwrap_err();
        assert!(matches!(err, Error::InvalidIsbn(_)));

        let err = store.get_books(&[Isbn::new(424242)]).unwrap_err();
        assert!(err.is_not_found());
    });
}

#[test]
fn add_books_rejects_duplicates() {
    each_strategy(|store| {
        let err = store.add_books(&[default_book()]).unwrap_err();
        assert!(matches!(err, Error::DuplicateIsbn(isbn) if isbn == Isbn::new(TEST_ISBN)));
        assert_eq!(snapshot(&store).len(), 1);
    });
}

#[test]
fn add_books_rejects_invalid_fields_atomically() {
    each_strategy(|store| {
        let mut untitled = book(50, 1);
        untitled.title = String::new();

        // One bad entry rejects the whole batch.
        let err = store.add_books(&[book(51, 1), untitled]).unwrap_err();
        assert!(matches!(err, Error::InvalidBook { .. }));
        assert_eq!(snapshot(&store).len(), 1);

        let mut negative = book(52, 1);
        negative.price = -1.0;
        assert!(store.add_books(&[negative]).is_err());

        let unstocked = book(53, 0);
        assert!(store.add_books(&[unstocked]).is_err());
    });
}

#[test]
fn empty_input_collections_are_rejected_without_effect() {
    each_strategy(|store| {
        assert!(matches!(store.add_books(&[]), Err(Error::EmptyInput(_))));
        assert!(matches!(store.buy_books(&[]), Err(Error::EmptyInput(_))));
        assert!(matches!(store.rate_books(&[]), Err(Error::EmptyInput(_))));
        assert!(matches!(store.add_copies(&[]), Err(Error::EmptyInput(_))));
        assert!(matches!(store.get_books(&[]), Err(Error::EmptyInput(_))));
        assert!(matches!(store.remove_books(&[]), Err(Error::EmptyInput(_))));
        assert!(matches!(
            store.update_editor_picks(&[]),
            Err(Error::EmptyInput(_))
        ));
        assert_eq!(snapshot(&store).len(), 1);
    });
}

#[test]
fn ratings_accumulate_and_out_of_range_ratings_are_rejected() {
    each_strategy(|store| {
        store
            .rate_books(&[BookRating::new(Isbn::new(TEST_ISBN), 4)])
            .unwrap();
        store
            .rate_books(&[BookRating::new(Isbn::new(TEST_ISBN), 5)])
            .unwrap();

        let books = store.get_all_books().unwrap();
        assert_eq!(books[0].total_rating, 9);
        assert_eq!(books[0].num_times_rated, 2);
        assert_eq!(books[0].average_rating(), 4.5);

        let before = snapshot(&store);
        for bad in [-1, 6] {
            let err = store
                .rate_books(&[BookRating::new(Isbn::new(TEST_ISBN), bad)])
                .unwrap_err();
            assert!(matches!(err, Error::InvalidRating { .. }));
        }
        assert_eq!(snapshot(&store), before);
    });
}

#[test]
fn top_rated_ranks_by_average_and_breaks_ties_by_isbn() {
    each_strategy(|store| {
        store.add_books(&[book(5, 1), book(2, 1), book(9, 1)]).unwrap();

        store
            .rate_books(&[
                BookRating::new(Isbn::new(5), 4),
                BookRating::new(Isbn::new(2), 4),
                BookRating::new(Isbn::new(9), 3),
            ])
            .unwrap();

        let top = store.get_top_rated_books(2).unwrap();
        let isbns: Vec<Isbn> = top.iter().map(|b| b.isbn).collect();
        assert_eq!(isbns, vec![Isbn::new(2), Isbn::new(5)]);

        // The unrated default book never appears, whatever the count.
        let all = store.get_top_rated_books(100).unwrap();
        assert_eq!(all.len(), 3);
        assert!(all.iter().all(|b| b.isbn != Isbn::new(TEST_ISBN)));
    });
}

#[test]
fn editor_picks_sampling_bounds() {
    each_strategy(|store| {
        store
            .add_books(&[book(1, 1), book(2, 1), book(3, 1), book(4, 1)])
            .unwrap();
        store
            .update_editor_picks(&[
                EditorPick::new(Isbn::new(1), true),
                EditorPick::new(Isbn::new(2), true),
                EditorPick::new(Isbn::new(3), true),
            ])
            .unwrap();

        // Asking for more than exist returns the whole eligible set.
        let all = store.get_editor_picks(10).unwrap();
        assert_eq!(all.len(), 3);

        // Asking for fewer returns that many distinct eligible books.
        for _ in 0..20 {
            let picks = store.get_editor_picks(2).unwrap();
            assert_eq!(picks.len(), 2);
            assert!(picks.iter().all(|b| b.isbn != Isbn::new(4)));
            assert_ne!(picks[0].isbn, picks[1].isbn);
        }

        // Zero is a valid target.
        assert!(store.get_editor_picks(0).unwrap().is_empty());
    });
}

#[test]
fn unsetting_the_pick_flag_removes_eligibility() {
    each_strategy(|store| {
        store
            .update_editor_picks(&[EditorPick::new(Isbn::new(TEST_ISBN), true)])
            .unwrap();
        assert_eq!(store.get_editor_picks(10).unwrap().len(), 1);

        store
            .update_editor_picks(&[EditorPick::new(Isbn::new(TEST_ISBN), false)])
            .unwrap();
        assert!(store.get_editor_picks(10).unwrap().is_empty());
    });
}

#[test]
fn add_copies_restocks_existing_entries() {
    each_strategy(|store| {
        store
            .add_copies(&[BookCopy::new(Isbn::new(TEST_ISBN), 7)])
            .unwrap();
        let books = store.get_all_books().unwrap();
        assert_eq!(books[0].num_copies, NUM_COPIES + 7);

        let err = store
            .add_copies(&[BookCopy::new(Isbn::new(999), 1)])
            .unwrap_err();
        assert!(err.is_not_found());
    });
}

#[test]
fn remove_books_targets_only_the_named_entries() {
    each_strategy(|store| {
        store.add_books(&[book(1, 2), book(2, 3)]).unwrap();

        store.remove_books(&[Isbn::new(1)]).unwrap();
        let isbns: Vec<Isbn> = snapshot(&store).iter().map(|b| b.isbn).collect();
        assert_eq!(isbns, vec![Isbn::new(2), Isbn::new(TEST_ISBN)]);

        // Removing an unknown key fails the whole call.
        let err = store
            .remove_books(&[Isbn::new(2), Isbn::new(1)])
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(snapshot(&store).len(), 2);
    });
}

#[test]
fn remove_all_books_resets_the_catalog() {
    each_strategy(|store| {
        store.add_books(&[book(1, 2)]).unwrap();
        store.remove_all_books().unwrap();
        assert!(store.get_all_books().unwrap().is_empty());

        // The catalog is usable again afterwards.
        store.add_books(&[default_book()]).unwrap();
        assert_eq!(store.get_all_books().unwrap().len(), 1);
    });
}
