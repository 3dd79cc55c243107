//! VMQ connection policies

use serde::{Deserialize, Serialize};
use ucsc_core::dn::ORG_ROOT;
use ucsc_core::{ManagedObject, PropSet, Result, UcscError, UcscSession};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VmqConnPolicy {
    pub name: String,
    pub descr: Option<String>,
    pub vmq_count: String,
    pub intr_count: String,
    pub extra: PropSet,
}

impl Default for VmqConnPolicy {
    fn default() -> Self {
        VmqConnPolicy {
            name: String::new(),
            descr: None,
            vmq_count: "64".into(),
            intr_count: "64".into(),
            extra: PropSet::new(),
        }
    }
}

pub struct VmqConnPolicyClient<'a, S> {
    session: &'a S,
    org_dn: String,
}

impl<'a, S: UcscSession> VmqConnPolicyClient<'a, S> {
    pub fn new(session: &'a S) -> Self {
        Self::with_org(session, ORG_ROOT)
    }

    pub fn with_org(session: &'a S, org_dn: &str) -> Self {
        VmqConnPolicyClient {
            session,
            org_dn: org_dn.to_string(),
        }
    }

    fn policy_dn(&self, name: &str) -> String {
        format!("{}/vmq-con-{}", self.org_dn, name)
    }

    pub fn create(&self, policy: &VmqConnPolicy) -> Result<ManagedObject> {
        if self.session.query_dn(&self.org_dn)?.is_none() {
            return Err(UcscError::not_found(
                "vmq_conn_policy_create",
                format!("org '{}' does not exist", self.org_dn),
            ));
        }

        let mut mo = ManagedObject::new("vnicVmqConPolicy", self.policy_dn(&policy.name));
        mo.set_prop("name", &policy.name);
        mo.set_prop_opt("descr", policy.descr.as_deref());
        mo.set_prop("vmq_count", &policy.vmq_count);
        mo.set_prop("intr_count", &policy.intr_count);
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
                "vmq_conn_policy_delete",
                format!("vmq connection policy '{}' does not exist", name),
            )
        })?;
        self.session.remove_mo(mo)?;
        self.session.commit()?;
        Ok(())
    }
}
