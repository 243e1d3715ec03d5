//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx.
//!
//! - [`PgUserRepository`] - Users, admin flag and block status
//! - [`PgRequestRepository`] - Referral request history

pub mod pg_request_repository;
pub mod pg_user_repository;

pub use pg_request_repository::PgRequestRepository;
pub use pg_user_repository::PgUserRepository;
