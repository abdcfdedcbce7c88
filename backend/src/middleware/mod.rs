//! Request middleware.
//!
//! Purpose: Define middleware components for request lifecycle concerns such as
//! tracing and page redirects keyed on the session cookie.

pub mod edge_guard;
pub mod trace;

pub use edge_guard::EdgeGuard;
pub use trace::Trace;
