//! Session abstraction over the remote management plane

use crate::error::SessionError;
use crate::mo::ManagedObject;

/// A session against the managed object tree.
///
/// Implementations own transport, authentication and retry behavior; this
/// library only issues blocking reads and staged mutations through it. The
/// mutating calls stage changes; [`commit`](UcscSession::commit) flushes
/// everything staged since the last commit as one transaction.
///
/// The session is a shared, externally owned resource: the feature clients
/// borrow it and never construct, pool or close one.
#[cfg_attr(test, mockall::automock)]
pub trait UcscSession {
    /// Looks up a managed object by exact DN, `None` if absent.
    fn query_dn(&self, dn: &str) -> Result<Option<ManagedObject>, SessionError>;

    /// Stages creation of `mo` (and its children) under its declared parent.
    /// With `modify_present`, an existing object at that DN is overwritten
    /// instead of treated as a conflict.
    fn add_mo(&self, mo: ManagedObject, modify_present: bool) -> Result<(), SessionError>;

    /// Stages a property update to an existing object.
    fn set_mo(&self, mo: ManagedObject) -> Result<(), SessionError>;

    /// Stages deletion of an object.
    fn remove_mo(&self, mo: ManagedObject) -> Result<(), SessionError>;

    /// Flushes staged operations to the remote system.
    fn commit(&self) -> Result<(), SessionError>;
}
