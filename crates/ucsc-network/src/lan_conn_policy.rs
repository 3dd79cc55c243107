//! LAN connectivity policies and their vNICs

use serde::{Deserialize, Serialize};
use ucsc_core::dn::ORG_ROOT;
use ucsc_core::{ManagedObject, PropSet, Result, UcscError, UcscSession};

const CDN_SOURCES: [&str; 2] = ["vnic-name", "user-defined"];

/// A vNIC hung off a LAN connectivity policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vnic {
    pub name: String,
    pub nw_ctrl_policy_name: String,
    pub admin_host_port: String,
    pub admin_vcon: String,
    pub stats_policy_name: String,
    /// CDN name; only honored when `cdn_source` is `user-defined`.
    pub admin_cdn_name: Option<String>,
    pub switch_id: String,
    pub pin_to_group_name: Option<String>,
    pub mtu: String,
    pub qos_policy_name: Option<String>,
    pub adaptor_profile_name: Option<String>,
    /// `vnic-name` or `user-defined`.
    pub cdn_source: String,
    pub ident_pool_name: Option<String>,
    pub order: String,
    pub nw_templ_name: Option<String>,
    pub addr: String,
    pub extra: PropSet,
}

impl Default for Vnic {
    fn default() -> Self {
        Vnic {
            name: String::new(),
            nw_ctrl_policy_name: "global-default".into(),
            admin_host_port: "ANY".into(),
            admin_vcon: "any".into(),
            stats_policy_name: "global-default".into(),
            admin_cdn_name: None,
            switch_id: "A".into(),
            pin_to_group_name: None,
            mtu: "1500".into(),
            qos_policy_name: None,
            adaptor_profile_name: None,
            cdn_source: "vnic-name".into(),
            ident_pool_name: None,
            order: "unspecified".into(),
            nw_templ_name: None,
            addr: "derived".into(),
            extra: PropSet::new(),
        }
    }
}

/// An iSCSI vNIC hung off a LAN connectivity policy. Carries a single vlan
/// child naming the overlay VLAN.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IscsiVnic {
    pub name: String,
    pub addr: String,
    pub admin_host_port: String,
    pub admin_vcon: String,
    pub stats_policy_name: String,
    pub admin_cdn_name: Option<String>,
    pub cdn_source: String,
    pub switch_id: String,
    pub pin_to_group_name: Option<String>,
    /// Overlay vnic name.
    pub vnic_name: Option<String>,
    pub qos_policy_name: Option<String>,
    pub adaptor_profile_name: String,
    pub ident_pool_name: Option<String>,
    pub order: String,
    pub nw_templ_name: Option<String>,
    pub vlan_name: String,
    pub extra: PropSet,
}

impl Default for IscsiVnic {
    fn default() -> Self {
        IscsiVnic {
            name: String::new(),
            addr: "derived".into(),
            admin_host_port: "ANY".into(),
            admin_vcon: "any".into(),
            stats_policy_name: "global-default".into(),
            admin_cdn_name: None,
            cdn_source: "vnic-name".into(),
            switch_id: "A".into(),
            pin_to_group_name: None,
            vnic_name: None,
            qos_policy_name: None,
            adaptor_profile_name: "global-default".into(),
            ident_pool_name: None,
            order: "unspecified".into(),
            nw_templ_name: None,
            vlan_name: "default".into(),
            extra: PropSet::new(),
        }
    }
}

pub struct LanConnPolicyClient<'a, S> {
    session: &'a S,
    org_dn: String,
}

impl<'a, S: UcscSession> LanConnPolicyClient<'a, S> {
    pub fn new(session: &'a S) -> Self {
        Self::with_org(session, ORG_ROOT)
    }

    pub fn with_org(session: &'a S, org_dn: &str) -> Self {
        LanConnPolicyClient {
            session,
            org_dn: org_dn.to_string(),
        }
    }

    fn policy_dn(&self, name: &str) -> String {
        format!("{}/lan-conn-pol-{}", self.org_dn, name)
    }

    pub fn create(&self, name: &str, descr: Option<&str>, extra: &PropSet) -> Result<ManagedObject> {
        if self.session.query_dn(&self.org_dn)?.is_none() {
            return Err(UcscError::not_found(
                "lan_conn_policy_create",
                format!("org '{}' does not exist", self.org_dn),
            ));
        }

        let mut mo = ManagedObject::new("vnicLanConnPolicy", self.policy_dn(name));
        mo.set_prop("name", name);
        mo.set_prop_opt("descr", descr);
        mo.set_prop_multiple(extra);

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
                "lan_conn_policy_delete",
                format!("lan connectivity policy '{}' does not exist", name),
            )
        })?;
        self.session.remove_mo(mo)?;
        self.session.commit()?;
        Ok(())
    }

    fn cdn_name<'v>(
        &self,
        operation: &'static str,
        cdn_source: &str,
        admin_cdn_name: Option<&'v str>,
    ) -> Result<Option<&'v str>> {
        if !CDN_SOURCES.contains(&cdn_source) {
            return Err(UcscError::invalid_argument(
                operation,
                format!("invalid cdn source '{}'", cdn_source),
            ));
        }
        // with vnic-name sourcing the user supplied cdn name is discarded
        Ok(if cdn_source == "vnic-name" {
            Some("")
        } else {
            admin_cdn_name
        })
    }

    pub fn vnic_add(&self, policy_name: &str, vnic: &Vnic) -> Result<ManagedObject> {
        let policy_dn = self.policy_dn(policy_name);
        if self.session.query_dn(&policy_dn)?.is_none() {
            return Err(UcscError::not_found(
                "lcp_vnic_add",
                format!("lan connectivity policy '{}' does not exist", policy_dn),
            ));
        }
        let admin_cdn_name =
            self.cdn_name("lcp_vnic_add", &vnic.cdn_source, vnic.admin_cdn_name.as_deref())?;

        let mut mo = ManagedObject::child_of(
            "vnicEther",
            &policy_dn,
            format!("ether-{}", vnic.name),
        );
        mo.set_prop("name", &vnic.name);
        mo.set_prop("nw_ctrl_policy_name", &vnic.nw_ctrl_policy_name);
        mo.set_prop("admin_host_port", &vnic.admin_host_port);
        mo.set_prop("admin_vcon", &vnic.admin_vcon);
        mo.set_prop("stats_policy_name", &vnic.stats_policy_name);
        mo.set_prop_opt("admin_cdn_name", admin_cdn_name);
        mo.set_prop("cdn_source", &vnic.cdn_source);
        mo.set_prop("switch_id", &vnic.switch_id);
        mo.set_prop_opt("pin_to_group_name", vnic.pin_to_group_name.as_deref());
        mo.set_prop("mtu", &vnic.mtu);
        mo.set_prop_opt("qos_policy_name", vnic.qos_policy_name.as_deref());
        mo.set_prop_opt("adaptor_profile_name", vnic.adaptor_profile_name.as_deref());
        mo.set_prop_opt("ident_pool_name", vnic.ident_pool_name.as_deref());
        mo.set_prop("order", &vnic.order);
        mo.set_prop_opt("nw_templ_name", vnic.nw_templ_name.as_deref());
        mo.set_prop("addr", &vnic.addr);
        mo.set_prop_multiple(&vnic.extra);

        self.session.add_mo(mo.clone(), true)?;
        self.session.commit()?;
        Ok(mo)
    }

    pub fn vnic_get(&self, policy_name: &str, name: &str) -> Result<Option<ManagedObject>> {
        let dn = format!("{}/ether-{}", self.policy_dn(policy_name), name);
        Ok(self.session.query_dn(&dn)?)
    }

    pub fn vnic_exists(
        &self,
        policy_name: &str,
        name: &str,
        props: &PropSet,
    ) -> Result<Option<ManagedObject>> {
        Ok(self
            .vnic_get(policy_name, name)?
            .filter(|mo| mo.check_prop_match(props)))
    }

    pub fn vnic_delete(&self, policy_name: &str, name: &str) -> Result<()> {
        let mo = self.vnic_get(policy_name, name)?.ok_or_else(|| {
            UcscError::not_found("lcp_vnic_delete", format!("vnic '{}' does not exist", name))
        })?;
        self.session.remove_mo(mo)?;
        self.session.commit()?;
        Ok(())
    }

    /// Unlike [`vnic_add`](Self::vnic_add) this is a strict create; adding an
    /// iSCSI vNIC that already exists fails at commit.
    pub fn iscsi_vnic_add(&self, policy_name: &str, vnic: &IscsiVnic) -> Result<ManagedObject> {
        let policy_dn = self.policy_dn(policy_name);
        if self.session.query_dn(&policy_dn)?.is_none() {
            return Err(UcscError::not_found(
                "lcp_iscsi_vnic_add",
                format!("lan connectivity policy '{}' does not exist", policy_dn),
            ));
        }
        let admin_cdn_name = self.cdn_name(
            "lcp_iscsi_vnic_add",
            &vnic.cdn_source,
            vnic.admin_cdn_name.as_deref(),
        )?;

        let mut mo = ManagedObject::child_of(
            "vnicIScsiLCP",
            &policy_dn,
            format!("iscsi-{}", vnic.name),
        );
        mo.set_prop("name", &vnic.name);
        mo.set_prop("addr", &vnic.addr);
        mo.set_prop("admin_host_port", &vnic.admin_host_port);
        mo.set_prop("admin_vcon", &vnic.admin_vcon);
        mo.set_prop("stats_policy_name", &vnic.stats_policy_name);
        mo.set_prop("cdn_source", &vnic.cdn_source);
        mo.set_prop_opt("admin_cdn_name", admin_cdn_name);
        mo.set_prop("switch_id", &vnic.switch_id);
        mo.set_prop_opt("pin_to_group_name", vnic.pin_to_group_name.as_deref());
        mo.set_prop_opt("vnic_name", vnic.vnic_name.as_deref());
        mo.set_prop_opt("qos_policy_name", vnic.qos_policy_name.as_deref());
        mo.set_prop("adaptor_profile_name", &vnic.adaptor_profile_name);
        mo.set_prop_opt("ident_pool_name", vnic.ident_pool_name.as_deref());
        mo.set_prop("order", &vnic.order);
        mo.set_prop_opt("nw_templ_name", vnic.nw_templ_name.as_deref());
        mo.set_prop_multiple(&vnic.extra);

        let mut vlan = ManagedObject::child_of("vnicVlan", mo.dn(), "vlan");
        vlan.set_prop("name", "");
        vlan.set_prop("vlan_name", &vnic.vlan_name);
        mo.add_child(vlan);

        self.session.add_mo(mo.clone(), false)?;
        self.session.commit()?;
        Ok(mo)
    }

    pub fn iscsi_vnic_get(&self, policy_name: &str, name: &str) -> Result<Option<ManagedObject>> {
        let dn = format!("{}/iscsi-{}", self.policy_dn(policy_name), name);
        Ok(self.session.query_dn(&dn)?)
    }

    pub fn iscsi_vnic_exists(
        &self,
        policy_name: &str,
        name: &str,
        props: &PropSet,
    ) -> Result<Option<ManagedObject>> {
        Ok(self
            .iscsi_vnic_get(policy_name, name)?
            .filter(|mo| mo.check_prop_match(props)))
    }

    pub fn iscsi_vnic_delete(&self, policy_name: &str, name: &str) -> Result<()> {
        let mo = self.iscsi_vnic_get(policy_name, name)?.ok_or_else(|| {
            UcscError::not_found(
                "lcp_iscsi_vnic_delete",
                format!("iscsi vnic '{}' does not exist", name),
            )
        })?;
        self.session.remove_mo(mo)?;
        self.session.commit()?;
        Ok(())
    }
}
