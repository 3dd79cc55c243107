//! QoS policies
//!
//! The class, rate and burst settings live on the policy's `egress` child.

use serde::{Deserialize, Serialize};
use ucsc_core::dn::ORG_ROOT;
use ucsc_core::{ManagedObject, PropSet, Result, UcscError, UcscSession};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QosPolicy {
    pub name: String,
    pub descr: Option<String>,
    /// One of `best-effort`, `bronze`, `fc`, `gold`, `platinum`, `silver`.
    pub prio: String,
    /// Bytes of burst.
    pub burst: String,
    /// `line-rate` or a rate in Kbps.
    pub rate: String,
    /// `full` or `none`.
    pub host_control: String,
    pub extra: PropSet,
}

impl Default for QosPolicy {
    fn default() -> Self {
        QosPolicy {
            name: String::new(),
            descr: None,
            prio: "best-effort".into(),
            burst: "10240".into(),
            rate: "line-rate".into(),
            host_control: "none".into(),
            extra: PropSet::new(),
        }
    }
}

pub struct QosPolicyClient<'a, S> {
    session: &'a S,
    org_dn: String,
}

impl<'a, S: UcscSession> QosPolicyClient<'a, S> {
    pub fn new(session: &'a S) -> Self {
        Self::with_org(session, ORG_ROOT)
    }

    pub fn with_org(session: &'a S, org_dn: &str) -> Self {
        QosPolicyClient {
            session,
            org_dn: org_dn.to_string(),
        }
    }

    fn policy_dn(&self, name: &str) -> String {
        format!("{}/ep-qos-{}", self.org_dn, name)
    }

    pub fn add(&self, policy: &QosPolicy) -> Result<ManagedObject> {
        if self.session.query_dn(&self.org_dn)?.is_none() {
            return Err(UcscError::not_found(
                "qos_policy_create",
                format!("org '{}' does not exist", self.org_dn),
            ));
        }

        let mut mo = ManagedObject::new("epqosDefinition", self.policy_dn(&policy.name));
        mo.set_prop("name", &policy.name);
        mo.set_prop_opt("descr", policy.descr.as_deref());

        let mut egress = ManagedObject::child_of("epqosEgress", mo.dn(), "egress");
        egress.set_prop("name", "");
        egress.set_prop("prio", &policy.prio);
        egress.set_prop("burst", &policy.burst);
        egress.set_prop("rate", &policy.rate);
        egress.set_prop("host_control", &policy.host_control);
        egress.set_prop_multiple(&policy.extra);
        mo.add_child(egress);

        self.session.add_mo(mo.clone(), true)?;
        self.session.commit()?;
        Ok(mo)
    }

    pub fn get(&self, name: &str) -> Result<Option<ManagedObject>> {
        Ok(self.session.query_dn(&self.policy_dn(name))?)
    }

    /// `descr` is checked on the policy itself, everything else on the
    /// `egress` child. A policy without that child is inconsistent.
    pub fn exists(&self, name: &str, props: &PropSet) -> Result<Option<ManagedObject>> {
        let mo = match self.get(name)? {
            Some(mo) => mo,
            None => return Ok(None),
        };

        let mut props = props.clone();
        let mut policy_props = PropSet::new();
        policy_props.set_opt("descr", props.remove("descr"));
        if !mo.check_prop_match(&policy_props) {
            return Ok(None);
        }

        let egress_dn = format!("{}/egress", mo.dn());
        let egress = self.session.query_dn(&egress_dn)?.ok_or_else(|| {
            UcscError::inconsistent(
                "qos_policy_exists",
                format!("egress qos object '{}' does not exist", egress_dn),
            )
        })?;

        Ok(Some(mo).filter(|_| egress.check_prop_match(&props)))
    }

    pub fn remove(&self, name: &str) -> Result<()> {
        let mo = self.get(name)?.ok_or_else(|| {
            UcscError::not_found(
                "qos_policy_remove",
                format!("qos policy '{}' does not exist", name),
            )
        })?;
        self.session.remove_mo(mo)?;
        self.session.commit()?;
        Ok(())
    }
}
