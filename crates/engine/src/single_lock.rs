//! Single-global-lock catalog store
//!
//! The baseline strategy: one catalog-wide read/write lock around the whole
//! map, taken exclusively for every mutation and shared for every read.
//! Semantics are identical to the two-level store; only the concurrency
//! profile differs (no two mutations ever overlap, even on disjoint keys).

use crate::record::BookRecord;
use crate::select;
use crate::traits::{BookStoreOps, StockManagerOps};
use folio_core::{
    validate, Book, BookCopy, BookRating, EditorPick, Error, Isbn, Result, Shortfall, StockBook,
};
use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace};

type Catalog = FxHashMap<Isbn, BookRecord>;

/// Catalog store serialized by one catalog-wide lock.
pub struct SingleLockBookStore {
    catalog: RwLock<Catalog>,
}

impl SingleLockBookStore {
    /// Create an empty store.
    pub fn new() -> Self {
        SingleLockBookStore {
            catalog: RwLock::new(Catalog::default()),
        }
    }
}

impl Default for SingleLockBookStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SingleLockBookStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SingleLockBookStore")
            .field("entries", &self.catalog.read().len())
            .finish()
    }
}

fn validate_in_stock(catalog: &Catalog, isbn: Isbn) -> Result<()> {
    validate::validate_isbn(isbn)?;
    if !catalog.contains_key(&isbn) {
        return Err(Error::BookNotFound(isbn));
    }
    Ok(())
}

fn fetch(catalog: &Catalog, isbn: Isbn) -> Result<&BookRecord> {
    catalog.get(&isbn).ok_or(Error::BookNotFound(isbn))
}

impl StockManagerOps for SingleLockBookStore {
    fn add_books(&self, books: &[StockBook]) -> Result<()> {
        if books.is_empty() {
            return Err(Error::EmptyInput("books"));
        }
        trace!(count = books.len(), "add_books");

        let mut catalog = self.catalog.write();

        let mut batch: FxHashSet<Isbn> = FxHashSet::default();
        for book in books {
            validate::validate_new_book(book)?;
            if catalog.contains_key(&book.isbn) || !batch.insert(book.isbn) {
                return Err(Error::DuplicateIsbn(book.isbn));
            }
        }

        for book in books {
            catalog.insert(book.isbn, BookRecord::new(book));
        }

        debug!(count = books.len(), "catalog entries added");
        Ok(())
    }

    fn add_copies(&self, copies: &[BookCopy]) -> Result<()> {
        if copies.is_empty() {
            return Err(Error::EmptyInput("copies"));
        }
        trace!(count = copies.len(), "add_copies");

        let mut catalog = self.catalog.write();

        for copy in copies {
            validate_in_stock(&catalog, copy.isbn)?;
            if !validate::is_valid_quantity(copy.num_copies) {
                return Err(Error::InvalidQuantity {
                    isbn: copy.isbn,
                    quantity: copy.num_copies,
                });
            }
        }

        for copy in copies {
            if let Some(record) = catalog.get_mut(&copy.isbn) {
                record.add_copies(copy.num_copies as u32);
            }
        }
        Ok(())
    }

    fn get_all_books(&self) -> Result<Vec<StockBook>> {
        let catalog = self.catalog.read();
        Ok(catalog.values().map(BookRecord::stock_book).collect())
    }

    fn get_books_by_isbn(&self, isbns: &[Isbn]) -> Result<Vec<StockBook>> {
        if isbns.is_empty() {
            return Err(Error::EmptyInput("isbns"));
        }

        let catalog = self.catalog.read();
        for &isbn in isbns {
            validate_in_stock(&catalog, isbn)?;
        }
        isbns
            .iter()
            .map(|&isbn| fetch(&catalog, isbn).map(BookRecord::stock_book))
            .collect()
    }

    fn get_books_in_demand(&self) -> Result<Vec<StockBook>> {
        let catalog = self.catalog.read();
        Ok(catalog
            .values()
            .map(BookRecord::stock_book)
            .filter(|snapshot| snapshot.num_sale_misses > 0)
            .collect())
    }

    fn update_editor_picks(&self, picks: &[EditorPick]) -> Result<()> {
        if picks.is_empty() {
            return Err(Error::EmptyInput("picks"));
        }
        trace!(count = picks.len(), "update_editor_picks");

        let mut catalog = self.catalog.write();

        for pick in picks {
            validate_in_stock(&catalog, pick.isbn)?;
        }

        for pick in picks {
            if let Some(record) = catalog.get_mut(&pick.isbn) {
                record.set_editor_pick(pick.pick);
            }
        }
        Ok(())
    }

    fn remove_books(&self, isbns: &[Isbn]) -> Result<()> {
        if isbns.is_empty() {
            return Err(Error::EmptyInput("isbns"));
        }
        trace!(count = isbns.len(), "remove_books");

        let mut catalog = self.catalog.write();

        for &isbn in isbns {
            validate_in_stock(&catalog, isbn)?;
        }

        for &isbn in isbns {
            catalog.remove(&isbn);
        }
        Ok(())
    }

    fn remove_all_books(&self) -> Result<()> {
        let mut catalog = self.catalog.write();
        catalog.clear();
        debug!("catalog reset");
        Ok(())
    }
}

impl BookStoreOps for SingleLockBookStore {
    fn buy_books(&self, orders: &[BookCopy]) -> Result<()> {
        if orders.is_empty() {
            return Err(Error::EmptyInput("orders"));
        }
        trace!(count = orders.len(), "buy_books");

        let mut catalog = self.catalog.write();

        for order in orders {
            validate_in_stock(&catalog, order.isbn)?;
            if !validate::is_valid_quantity(order.num_copies) {
                return Err(Error::InvalidQuantity {
                    isbn: order.isbn,
                    quantity: order.num_copies,
                });
            }
        }

        let mut totals: Vec<(Isbn, u64)> =
            select::aggregate_quantities(orders).into_iter().collect();
        totals.sort_unstable_by_key(|&(isbn, _)| isbn);

        let mut shortfalls: Vec<Shortfall> = Vec::new();
        for &(isbn, requested) in &totals {
            let record = fetch(&catalog, isbn)?;
            if !record.copies_in_store(requested) {
                shortfalls.push(Shortfall {
                    isbn,
                    requested,
                    available: u64::from(record.num_copies()),
                });
            }
        }

        if !shortfalls.is_empty() {
            for shortfall in &shortfalls {
                if let Some(record) = catalog.get_mut(&shortfall.isbn) {
                    record.record_sale_miss(shortfall.amount());
                }
            }
            debug!(misses = shortfalls.len(), "purchase rejected on insufficient stock");
            return Err(Error::InsufficientStock { shortfalls });
        }

        for &(isbn, requested) in &totals {
            if let Some(record) = catalog.get_mut(&isbn) {
                // The stock check bounds each total by a u32 stock level.
                record.sell_copies(requested as u32);
            }
        }
        Ok(())
    }

    fn rate_books(&self, ratings: &[BookRating]) -> Result<()> {
        if ratings.is_empty() {
            return Err(Error::EmptyInput("ratings"));
        }
        trace!(count = ratings.len(), "rate_books");

        let mut catalog = self.catalog.write();

        for rating in ratings {
            validate_in_stock(&catalog, rating.isbn)?;
            if !validate::is_valid_rating(rating.rating) {
                return Err(Error::InvalidRating {
                    isbn: rating.isbn,
                    rating: rating.rating,
                });
            }
        }

        for rating in ratings {
            if let Some(record) = catalog.get_mut(&rating.isbn) {
                record.add_rating(rating.rating);
            }
        }
        Ok(())
    }

    fn get_books(&self, isbns: &[Isbn]) -> Result<Vec<Book>> {
        if isbns.is_empty() {
            return Err(Error::EmptyInput("isbns"));
        }

        let catalog = self.catalog.read();
        for &isbn in isbns {
            validate_in_stock(&catalog, isbn)?;
        }
        isbns
            .iter()
            .map(|&isbn| fetch(&catalog, isbn).map(BookRecord::book))
            .collect()
    }

    fn get_editor_picks(&self, count: usize) -> Result<Vec<Book>> {
        let catalog = self.catalog.read();
        let picks: Vec<Book> = catalog
            .values()
            .filter(|record| record.editor_pick())
            .map(BookRecord::book)
            .collect();
        Ok(select::sample_books(picks, count))
    }

    fn get_top_rated_books(&self, count: usize) -> Result<Vec<Book>> {
        let catalog = self.catalog.read();
        let rated: Vec<StockBook> = catalog
            .values()
            .filter(|record| record.is_rated())
            .map(BookRecord::stock_book)
            .collect();
        Ok(select::top_rated(rated, count))
    }
}
