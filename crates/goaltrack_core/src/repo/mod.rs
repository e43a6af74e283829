//! Repository layer over collection stores.
//!
//! # Responsibility
//! - Define id-based data access contracts shared by all record kinds.
//! - Isolate file and serialization details from service orchestration.
//!
//! # Invariants
//! - Repository writes must enforce `Record::validate()` before persistence.
//! - Repository APIs return semantic errors (`NotFound`, `DuplicateId`) in
//!   addition to store transport errors.

pub mod record_repo;

pub use record_repo::{RecordRepository, RepoError, RepoResult};
