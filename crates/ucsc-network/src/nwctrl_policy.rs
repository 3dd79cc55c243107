//! Network control policies
//!
//! The MAC forge setting lives on a `mac-sec` child; create writes it there
//! and the existence check reads it back from the child.

use serde::{Deserialize, Serialize};
use ucsc_core::dn::ORG_ROOT;
use ucsc_core::{ManagedObject, PropSet, Result, UcscError, UcscSession};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NwctrlPolicy {
    pub name: String,
    /// `disabled` or `enabled`.
    pub cdp: String,
    /// `all-host-vlans` or `only-native-vlan`.
    pub mac_register_mode: String,
    /// `link-down` or `warning`.
    pub uplink_fail_action: String,
    /// `allow` or `deny`, written to the `mac-sec` child.
    pub forge: String,
    pub lldp_transmit: String,
    pub lldp_receive: String,
    pub descr: Option<String>,
    pub extra: PropSet,
}

impl Default for NwctrlPolicy {
    fn default() -> Self {
        NwctrlPolicy {
            name: String::new(),
            cdp: "disabled".into(),
            mac_register_mode: "only-native-vlan".into(),
            uplink_fail_action: "link-down".into(),
            forge: "allow".into(),
            lldp_transmit: "disabled".into(),
            lldp_receive: "disabled".into(),
            descr: None,
            extra: PropSet::new(),
        }
    }
}

pub struct NwctrlPolicyClient<'a, S> {
    session: &'a S,
    org_dn: String,
}

impl<'a, S: UcscSession> NwctrlPolicyClient<'a, S> {
    pub fn new(session: &'a S) -> Self {
        Self::with_org(session, ORG_ROOT)
    }

    pub fn with_org(session: &'a S, org_dn: &str) -> Self {
        NwctrlPolicyClient {
            session,
            org_dn: org_dn.to_string(),
        }
    }

    fn policy_dn(&self, name: &str) -> String {
        format!("{}/nwctrl-{}", self.org_dn, name)
    }

    pub fn create(&self, policy: &NwctrlPolicy) -> Result<ManagedObject> {
        if self.session.query_dn(&self.org_dn)?.is_none() {
            return Err(UcscError::not_found(
                "nwctrl_policy_create",
                format!("org '{}' does not exist", self.org_dn),
            ));
        }

        let mut mo = ManagedObject::new("nwctrlDefinition", self.policy_dn(&policy.name));
        mo.set_prop("name", &policy.name);
        mo.set_prop("cdp", &policy.cdp);
        mo.set_prop("mac_register_mode", &policy.mac_register_mode);
        mo.set_prop("uplink_fail_action", &policy.uplink_fail_action);
        mo.set_prop("lldp_transmit", &policy.lldp_transmit);
        mo.set_prop("lldp_receive", &policy.lldp_receive);
        mo.set_prop_opt("descr", policy.descr.as_deref());
        mo.set_prop_multiple(&policy.extra);

        let mut mac_sec = ManagedObject::child_of("dpsecMac", mo.dn(), "mac-sec");
        mac_sec.set_prop("name", "");
        mac_sec.set_prop("descr", "");
        mac_sec.set_prop("forge", &policy.forge);
        mo.add_child(mac_sec);

        self.session.add_mo(mo.clone(), true)?;
        self.session.commit()?;
        Ok(mo)
    }

    pub fn get(&self, name: &str) -> Result<Option<ManagedObject>> {
        Ok(self.session.query_dn(&self.policy_dn(name))?)
    }

    /// A requested `forge` value is compared against the `mac-sec` child; a
    /// policy without that child is inconsistent, not merely absent.
    pub fn exists(&self, name: &str, props: &PropSet) -> Result<Option<ManagedObject>> {
        let mo = match self.get(name)? {
            Some(mo) => mo,
            None => return Ok(None),
        };

        let mut props = props.clone();
        if let Some(forge) = props.remove("forge") {
            let mac_sec_dn = format!("{}/mac-sec", mo.dn());
            let mac_sec = self.session.query_dn(&mac_sec_dn)?.ok_or_else(|| {
                UcscError::inconsistent(
                    "nwctrl_policy_exists",
                    format!("mac security object '{}' does not exist", mac_sec_dn),
                )
            })?;
            if !mac_sec.check_prop_match(&PropSet::new().with("forge", forge)) {
                return Ok(None);
            }
        }

        Ok(Some(mo).filter(|mo| mo.check_prop_match(&props)))
    }

    pub fn delete(&self, name: &str) -> Result<()> {
        let mo = self.get(name)?.ok_or_else(|| {
            UcscError::not_found(
                "nwctrl_policy_delete",
                format!("network control policy '{}' does not exist", name),
            )
        })?;
        self.session.remove_mo(mo)?;
        self.session.commit()?;
        Ok(())
    }
}
