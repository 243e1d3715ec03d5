//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated
//! via `mockall` for unit tests.
//!
//! - [`UserRepository`] - Known users, admin flag and block status
//! - [`RequestRepository`] - History of handed-out referral links

pub mod request_repository;
pub mod user_repository;

pub use request_repository::RequestRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use request_repository::MockRequestRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
