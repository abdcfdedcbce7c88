//! Password hashing adapters.

mod bcrypt;

pub use self::bcrypt::BcryptPasswordHasher;
