//! In-memory repositories used as the fallback storage backend.
//!
//! State lives only for the process lifetime. Maps sit behind `std` read-write
//! locks; no lock is held across an await point.

mod course_repository;
mod credential_repository;

pub use course_repository::InMemoryCourseRepository;
pub use credential_repository::InMemoryCredentialRepository;

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
