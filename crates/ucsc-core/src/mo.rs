//! Managed object and property bag types

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Open, ordered property map attached to a managed object.
///
/// Property names and values travel as strings; the remote object model is
/// the only validator. Callers use this both for forward-compatible extra
/// properties on create and for the requested subset on exists/modify.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropSet(IndexMap<String, String>);

impl PropSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    /// Insert only when a value is present. Mirrors the convention that an
    /// omitted optional argument leaves the property untouched.
    pub fn set_opt(&mut self, name: impl Into<String>, value: Option<impl Into<String>>) {
        if let Some(value) = value {
            self.set(name, value);
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.0.shift_remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for PropSet {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        PropSet(iter.into_iter().collect())
    }
}

impl Extend<(String, String)> for PropSet {
    fn extend<T: IntoIterator<Item = (String, String)>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

/// A managed object reference: a class identifier, the DN locating it in the
/// remote object tree, its property bag and any child objects staged together
/// with it (cascading creates submit the whole graph in one commit).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagedObject {
    class_id: String,
    dn: String,
    props: PropSet,
    children: Vec<ManagedObject>,
}

impl ManagedObject {
    pub fn new(class_id: impl Into<String>, dn: impl Into<String>) -> Self {
        ManagedObject {
            class_id: class_id.into(),
            dn: dn.into(),
            props: PropSet::new(),
            children: Vec::new(),
        }
    }

    /// Constructs an object under `parent_dn` with relative name `rn`.
    ///
    /// The DN is plain concatenation; RN formats are a wire contract with the
    /// remote object tree and must not be normalized.
    pub fn child_of(
        class_id: impl Into<String>,
        parent_dn: &str,
        rn: impl AsRef<str>,
    ) -> Self {
        ManagedObject::new(class_id, format!("{}/{}", parent_dn, rn.as_ref()))
    }

    pub fn class_id(&self) -> &str {
        &self.class_id
    }

    pub fn dn(&self) -> &str {
        &self.dn
    }

    pub fn prop(&self, name: &str) -> Option<&str> {
        self.props.get(name)
    }

    pub fn set_prop(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.props.set(name, value);
    }

    pub fn set_prop_opt(&mut self, name: impl Into<String>, value: Option<impl Into<String>>) {
        self.props.set_opt(name, value);
    }

    /// Bulk-assigns properties; later values override earlier ones, so extra
    /// properties merged last win over named-field defaults.
    pub fn set_prop_multiple(&mut self, props: &PropSet) {
        for (name, value) in props.iter() {
            self.props.set(name, value);
        }
    }

    /// Tests the requested subset of properties against this object's actual
    /// values by string equality. An empty set matches vacuously.
    pub fn check_prop_match(&self, props: &PropSet) -> bool {
        props
            .iter()
            .all(|(name, value)| self.props.get(name) == Some(value))
    }

    pub fn props(&self) -> &PropSet {
        &self.props
    }

    pub fn add_child(&mut self, child: ManagedObject) {
        self.children.push(child);
    }

    pub fn children(&self) -> &[ManagedObject] {
        &self.children
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prop_override_order() {
        let mut mo = ManagedObject::new("aaaRole", "org-root/role-x");
        mo.set_prop("priv", "read-only");
        let extra = PropSet::new().with("priv", "admin").with("descr", "ops");
        mo.set_prop_multiple(&extra);
        assert_eq!(mo.prop("priv"), Some("admin"));
        assert_eq!(mo.prop("descr"), Some("ops"));
    }

    #[test]
    fn check_prop_match_subset() {
        let mut mo = ManagedObject::new("aaaRole", "org-root/role-x");
        mo.set_prop("priv", "admin");
        mo.set_prop("descr", "");

        assert!(mo.check_prop_match(&PropSet::new()));
        assert!(mo.check_prop_match(&PropSet::new().with("priv", "admin")));
        assert!(!mo.check_prop_match(&PropSet::new().with("priv", "read-only")));
        // a requested property the object never carried is a mismatch
        assert!(!mo.check_prop_match(&PropSet::new().with("policy-owner", "local")));
    }

    #[test]
    fn child_of_concatenates_rn() {
        let mo = ManagedObject::child_of("commDnsProvider", "org-root/dns-svc", "dns-8.8.8.8");
        assert_eq!(mo.dn(), "org-root/dns-svc/dns-8.8.8.8");
    }

    #[test]
    fn serializes_round_trip() {
        let mut mo = ManagedObject::new("fabricVlan", "fabric/lan/net-v1");
        mo.set_prop("id", "100");
        let json = serde_json::to_string(&mo).unwrap();
        let back: ManagedObject = serde_json::from_str(&json).unwrap();
        assert_eq!(back, mo);
    }
}
