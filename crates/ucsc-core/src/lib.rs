//! UCS Central Core
//!
//! Managed object model, session abstraction and error types shared by the
//! feature crates

pub mod dn;
pub mod error;
pub mod mo;
pub mod session;
pub mod testing;

pub use error::{SessionError, UcscError};
pub use mo::{ManagedObject, PropSet};
pub use session::UcscSession;

/// Result type for managed object operations
pub type Result<T> = std::result::Result<T, UcscError>;
