//! Multicast policies

use serde::{Deserialize, Serialize};
use ucsc_core::dn::ORG_ROOT;
use ucsc_core::{ManagedObject, PropSet, Result, UcscError, UcscSession};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McastPolicy {
    pub name: String,
    /// `disabled` or `enabled`.
    pub querier_state: String,
    /// `disabled` or `enabled`.
    pub snooping_state: String,
    pub querier_ip_addr: String,
    pub descr: Option<String>,
    pub extra: PropSet,
}

impl Default for McastPolicy {
    fn default() -> Self {
        McastPolicy {
            name: String::new(),
            querier_state: "disabled".into(),
            snooping_state: "disabled".into(),
            querier_ip_addr: "0.0.0.0".into(),
            descr: None,
            extra: PropSet::new(),
        }
    }
}

pub struct McastPolicyClient<'a, S> {
    session: &'a S,
    org_dn: String,
}

impl<'a, S: UcscSession> McastPolicyClient<'a, S> {
    pub fn new(session: &'a S) -> Self {
        Self::with_org(session, ORG_ROOT)
    }

    pub fn with_org(session: &'a S, org_dn: &str) -> Self {
        McastPolicyClient {
            session,
            org_dn: org_dn.to_string(),
        }
    }

    fn policy_dn(&self, name: &str) -> String {
        format!("{}/mc-policy-{}", self.org_dn, name)
    }

    pub fn create(&self, policy: &McastPolicy) -> Result<ManagedObject> {
        if self.session.query_dn(&self.org_dn)?.is_none() {
            return Err(UcscError::not_found(
                "mcast_policy_create",
                format!("org '{}' does not exist", self.org_dn),
            ));
        }

        let mut mo = ManagedObject::new("fabricMulticastPolicy", self.policy_dn(&policy.name));
        mo.set_prop("name", &policy.name);
        mo.set_prop("querier_ip_addr", &policy.querier_ip_addr);
        mo.set_prop("querier_state", &policy.querier_state);
        mo.set_prop("snooping_state", &policy.snooping_state);
        mo.set_prop_opt("descr", policy.descr.as_deref());
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
                "mcast_policy_delete",
                format!("mcast policy '{}' does not exist", name),
            )
        })?;
        self.session.remove_mo(mo)?;
        self.session.commit()?;
        Ok(())
    }
}
