//! Integration tests.
//!
//! All tests need external services and are ignored by default:
//!
//! - `lifecycle` runs the services against PostgreSQL (`DATABASE_URL`)
//! - `api_tests` talks HTTP to a running server (`SHELFMARK_TEST_URL`)
//!
//! Run with: `cargo test --test integration -- --ignored`

mod api_tests;
mod common;
mod lifecycle;
