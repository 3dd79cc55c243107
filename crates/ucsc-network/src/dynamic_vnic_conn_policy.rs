//! Dynamic vNIC connection policies

use serde::{Deserialize, Serialize};
use ucsc_core::dn::ORG_ROOT;
use ucsc_core::{ManagedObject, PropSet, Result, UcscError, UcscSession};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DynamicVnicConnPolicy {
    pub name: String,
    pub descr: Option<String>,
    pub dynamic_eth: String,
    /// `protected`, `protected-pref-a` or `protected-pref-b`.
    pub protection: String,
    pub adaptor_profile_name: Option<String>,
    pub extra: PropSet,
}

impl Default for DynamicVnicConnPolicy {
    fn default() -> Self {
        DynamicVnicConnPolicy {
            name: String::new(),
            descr: None,
            dynamic_eth: "54".into(),
            protection: "protected".into(),
            adaptor_profile_name: None,
            extra: PropSet::new(),
        }
    }
}

pub struct DynamicVnicConnPolicyClient<'a, S> {
    session: &'a S,
    org_dn: String,
}

impl<'a, S: UcscSession> DynamicVnicConnPolicyClient<'a, S> {
    pub fn new(session: &'a S) -> Self {
        Self::with_org(session, ORG_ROOT)
    }

    pub fn with_org(session: &'a S, org_dn: &str) -> Self {
        DynamicVnicConnPolicyClient {
            session,
            org_dn: org_dn.to_string(),
        }
    }

    fn policy_dn(&self, name: &str) -> String {
        format!("{}/dynamic-con-{}", self.org_dn, name)
    }

    pub fn create(&self, policy: &DynamicVnicConnPolicy) -> Result<ManagedObject> {
        if self.session.query_dn(&self.org_dn)?.is_none() {
            return Err(UcscError::not_found(
                "dynamic_vnic_conn_policy_create",
                format!("org '{}' does not exist", self.org_dn),
            ));
        }

        let mut mo = ManagedObject::new("vnicDynamicConPolicy", self.policy_dn(&policy.name));
        mo.set_prop("name", &policy.name);
        mo.set_prop_opt("descr", policy.descr.as_deref());
        mo.set_prop("dynamic_eth", &policy.dynamic_eth);
        mo.set_prop("protection", &policy.protection);
        mo.set_prop_opt(
            "adaptor_profile_name",
            policy.adaptor_profile_name.as_deref(),
        );
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
                "dynamic_vnic_conn_policy_delete",
                format!("dynamic vnic connection policy '{}' does not exist", name),
            )
        })?;
        self.session.remove_mo(mo)?;
        self.session.commit()?;
        Ok(())
    }
}
