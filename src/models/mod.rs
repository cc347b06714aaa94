//! Data models for Shelfmark

pub mod book;
pub mod borrower;
pub mod checkout;
pub mod copy;
pub mod enums;
pub mod follow_up;
pub mod user;
pub mod wishlist;

// Re-export commonly used types
pub use book::{Book, BookWithCounts};
pub use borrower::Borrower;
pub use checkout::{ActiveCheckout, Checkout, CheckoutHistoryEntry};
pub use copy::BookCopy;
pub use enums::{CheckoutStatus, CopyStatus, FollowUpStatus, WishlistPriority, WishlistStatus};
pub use follow_up::{FollowUp, FollowUpDetails};
pub use user::{CurrentUser, User};
pub use wishlist::WishlistItem;
