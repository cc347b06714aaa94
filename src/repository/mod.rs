//! Repository layer for database operations

pub mod books;
pub mod borrowers;
pub mod checkouts;
pub mod copies;
pub mod follow_ups;
pub mod ledger;
pub mod users;
pub mod wishlist;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub users: users::UsersRepository,
    pub books: books::BooksRepository,
    pub copies: copies::CopiesRepository,
    pub borrowers: borrowers::BorrowersRepository,
    pub checkouts: checkouts::CheckoutsRepository,
    pub follow_ups: follow_ups::FollowUpsRepository,
    pub wishlist: wishlist::WishlistRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            users: users::UsersRepository::new(pool.clone()),
            books: books::BooksRepository::new(pool.clone()),
            copies: copies::CopiesRepository::new(pool.clone()),
            borrowers: borrowers::BorrowersRepository::new(pool.clone()),
            checkouts: checkouts::CheckoutsRepository::new(pool.clone()),
            follow_ups: follow_ups::FollowUpsRepository::new(pool.clone()),
            wishlist: wishlist::WishlistRepository::new(pool.clone()),
            pool,
        }
    }
}
