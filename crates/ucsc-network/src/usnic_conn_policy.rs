//! usNIC connection policies

use serde::{Deserialize, Serialize};
use ucsc_core::dn::ORG_ROOT;
use ucsc_core::{ManagedObject, PropSet, Result, UcscError, UcscSession};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsnicConnPolicy {
    pub name: String,
    pub descr: Option<String>,
    pub usnic_count: String,
    /// One of the `global-*` adaptor profiles.
    pub adaptor_profile_name: String,
    pub extra: PropSet,
}

impl Default for UsnicConnPolicy {
    fn default() -> Self {
        UsnicConnPolicy {
            name: String::new(),
            descr: None,
            usnic_count: "58".into(),
            adaptor_profile_name: "global-default".into(),
            extra: PropSet::new(),
        }
    }
}

pub struct UsnicConnPolicyClient<'a, S> {
    session: &'a S,
    org_dn: String,
}

impl<'a, S: UcscSession> UsnicConnPolicyClient<'a, S> {
    pub fn new(session: &'a S) -> Self {
        Self::with_org(session, ORG_ROOT)
    }

    pub fn with_org(session: &'a S, org_dn: &str) -> Self {
        UsnicConnPolicyClient {
            session,
            org_dn: org_dn.to_string(),
        }
    }

    fn policy_dn(&self, name: &str) -> String {
        format!("{}/usnic-con-{}", self.org_dn, name)
    }

    pub fn create(&self, policy: &UsnicConnPolicy) -> Result<ManagedObject> {
        if self.session.query_dn(&self.org_dn)?.is_none() {
            return Err(UcscError::not_found(
                "usnic_conn_policy_create",
                format!("org '{}' does not exist", self.org_dn),
            ));
        }

        let mut mo = ManagedObject::new("vnicUsnicConPolicy", self.policy_dn(&policy.name));
        mo.set_prop("name", &policy.name);
        mo.set_prop_opt("descr", policy.descr.as_deref());
        mo.set_prop("usnic_count", &policy.usnic_count);
        mo.set_prop("adaptor_profile_name", &policy.adaptor_profile_name);
        mo.set_prop_multiple(&policy.extra);

        self.session.add_mo(mo.clone(), true)?;
        self.session.commit()?;
        Ok(mo)
    }

    pub fn get(&self, name: &str) -> Result<Option<ManagedObject>> {
        Ok(self.session.query_dn(&self.policy_dn(name))?)
    }

    pub fn exists(&self, name: &str, props: &PropSet) -> Result<Option<ManagedObject>> {
        Ok(self.get(name)?.filter(|mo| mo.check_prop_match(props)))
    }

    pub fn delete(&self, name: &str) -> Result<()> {
        let mo = self.get(name)?.ok_or_else(|| {
            UcscError::not_found(
                "usnic_conn_policy_delete",
                format!("usnic connection policy '{}' does not exist", name),
            )
        })?;
        self.session.remove_mo(mo)?;
        self.session.commit()?;
        Ok(())
    }
}
