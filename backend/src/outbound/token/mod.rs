//! Signed token adapters.

mod jwt;

pub use jwt::JwtTokenCodec;
