//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL repositories using Diesel (primary storage)
//! - **memory**: in-memory repositories (fallback storage)
//! - **fallback**: repositories that switch from primary to memory
//! - **token**: JWT token codec
//! - **password**: bcrypt password hasher
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business logic.

pub mod fallback;
pub mod memory;
pub mod password;
pub mod persistence;
pub mod token;
