//! VLANs under a domain group's fabric cloud
//!
//! LAN VLANs live under `fabric/lan`, appliance VLANs under
//! `fabric/eth-estc`. The domain group path is resolved against the tree on
//! every operation so a stale client cannot write into a deleted group.

use serde::{Deserialize, Serialize};
use ucsc_core::dn::domain_group_dn;
use ucsc_core::{ManagedObject, PropSet, Result, UcscError, UcscSession};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vlan {
    pub name: String,
    pub id: String,
    /// `community`, `isolated`, `none` or `primary`.
    pub sharing: String,
    /// `lan` or `appliance`.
    pub vlan_type: String,
    pub mcast_policy_name: Option<String>,
    /// `excluded` or `included`.
    pub compression_type: String,
    pub default_net: String,
    /// Primary VLAN name, for isolated and community VLANs.
    pub pub_nw_name: Option<String>,
    pub extra: PropSet,
}

impl Default for Vlan {
    fn default() -> Self {
        Vlan {
            name: String::new(),
            id: String::new(),
            sharing: "none".into(),
            vlan_type: "lan".into(),
            mcast_policy_name: None,
            compression_type: "included".into(),
            default_net: "no".into(),
            pub_nw_name: None,
            extra: PropSet::new(),
        }
    }
}

pub struct VlanClient<'a, S> {
    session: &'a S,
    domain_group: String,
}

impl<'a, S: UcscSession> VlanClient<'a, S> {
    pub fn new(session: &'a S) -> Self {
        Self::with_domain_group(session, "root")
    }

    /// `domain_group` is the full slash separated group path, e.g.
    /// `root/demo`.
    pub fn with_domain_group(session: &'a S, domain_group: &str) -> Self {
        VlanClient {
            session,
            domain_group: domain_group.to_string(),
        }
    }

    fn resolve_domain_group(&self, operation: &'static str) -> Result<String> {
        let dn = domain_group_dn(&self.domain_group);
        if self.session.query_dn(&dn)?.is_none() {
            return Err(UcscError::not_found(
                operation,
                format!("domain group '{}' does not exist", dn),
            ));
        }
        Ok(dn)
    }

    // The type check comes before the domain group lookup so a bad type
    // never reaches the session.
    fn cloud_dn(&self, operation: &'static str, vlan_type: &str) -> Result<String> {
        let cloud = match vlan_type {
            "lan" => "fabric/lan",
            "appliance" => "fabric/eth-estc",
            other => {
                return Err(UcscError::invalid_argument(
                    operation,
                    format!("invalid vlan type '{}'", other),
                ))
            }
        };
        let group_dn = self.resolve_domain_group(operation)?;
        Ok(format!("{}/{}", group_dn, cloud))
    }

    pub fn create(&self, vlan: &Vlan) -> Result<ManagedObject> {
        let cloud_dn = self.cloud_dn("vlan_create", &vlan.vlan_type)?;
        if self.session.query_dn(&cloud_dn)?.is_none() {
            return Err(UcscError::not_found(
                "vlan_create",
                format!("fabric lan cloud '{}' does not exist", cloud_dn),
            ));
        }

        let mut mo =
            ManagedObject::child_of("fabricVlan", &cloud_dn, format!("net-{}", vlan.name));
        mo.set_prop("name", &vlan.name);
        mo.set_prop("id", &vlan.id);
        mo.set_prop("sharing", &vlan.sharing);
        mo.set_prop_opt("mcast_policy_name", vlan.mcast_policy_name.as_deref());
        mo.set_prop("default_net", &vlan.default_net);
        mo.set_prop_opt("pub_nw_name", vlan.pub_nw_name.as_deref());
        mo.set_prop("compression_type", &vlan.compression_type);
        mo.set_prop_multiple(&vlan.extra);

        self.session.add_mo(mo.clone(), true)?;
        self.session.commit()?;
        Ok(mo)
    }

    pub fn get(&self, name: &str, vlan_type: &str) -> Result<Option<ManagedObject>> {
        let cloud_dn = self.cloud_dn("vlan_get", vlan_type)?;
        Ok(self.session.query_dn(&format!("{}/net-{}", cloud_dn, name))?)
    }

    pub fn exists(
        &self,
        name: &str,
        vlan_type: &str,
        props: &PropSet,
    ) -> Result<Option<ManagedObject>> {
        Ok(self
            .get(name, vlan_type)?
            .filter(|mo| mo.check_prop_match(props)))
    }

    pub fn delete(&self, name: &str, vlan_type: &str) -> Result<()> {
        let mo = self.get(name, vlan_type)?.ok_or_else(|| {
            UcscError::not_found("vlan_delete", format!("vlan '{}' does not exist", name))
        })?;
        self.session.remove_mo(mo)?;
        self.session.commit()?;
        Ok(())
    }
}
