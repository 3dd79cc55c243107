//! SNMP service, trap and user configuration

use serde::{Deserialize, Serialize};
use ucsc_core::dn::{device_profile_dn, DEFAULT_DEVICE_PROFILE};
use ucsc_core::{ManagedObject, PropSet, Result, UcscError, UcscSession};

pub const ADMIN_STATE_ENABLED: &str = "enabled";
pub const ADMIN_STATE_DISABLED: &str = "disabled";

/// Optional fields applied when enabling SNMP.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnmpConfig {
    pub community: Option<String>,
    pub sys_contact: Option<String>,
    pub sys_location: Option<String>,
    pub descr: Option<String>,
    pub extra: PropSet,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnmpTrap {
    /// Trap destination, an IP address. Part of the trap's DN.
    pub hostname: String,
    pub community: String,
    pub port: String,
    /// `v1`, `v2c` or `v3`.
    pub version: String,
    /// `informs` or `traps`; only meaningful for v2c and v3.
    pub notification_type: String,
    /// `auth`, `noauth` or `priv`; only meaningful for v3.
    pub v3_privilege: String,
    pub extra: PropSet,
}

impl Default for SnmpTrap {
    fn default() -> Self {
        SnmpTrap {
            hostname: String::new(),
            community: String::new(),
            port: "162".into(),
            version: "v2c".into(),
            notification_type: "traps".into(),
            v3_privilege: "noauth".into(),
            extra: PropSet::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnmpUser {
    pub name: String,
    pub pwd: String,
    pub privpwd: String,
    /// `md5` or `sha`.
    pub auth: String,
    pub use_aes: String,
    pub descr: String,
    pub extra: PropSet,
}

impl Default for SnmpUser {
    fn default() -> Self {
        SnmpUser {
            name: String::new(),
            pwd: String::new(),
            privpwd: String::new(),
            auth: "md5".into(),
            use_aes: "no".into(),
            descr: String::new(),
            extra: PropSet::new(),
        }
    }
}

pub struct SnmpClient<'a, S> {
    session: &'a S,
    base_dn: String,
}

impl<'a, S: UcscSession> SnmpClient<'a, S> {
    pub fn new(session: &'a S) -> Self {
        Self::with_device_profile(session, DEFAULT_DEVICE_PROFILE)
    }

    pub fn with_device_profile(session: &'a S, profile: &str) -> Self {
        SnmpClient {
            session,
            base_dn: device_profile_dn(profile),
        }
    }

    fn svc_dn(&self) -> String {
        format!("{}/snmp-svc", self.base_dn)
    }

    // the trap RN really has no separator before the hostname
    fn trap_dn(&self, hostname: &str) -> String {
        format!("{}/snmp-trap{}", self.svc_dn(), hostname)
    }

    fn user_dn(&self, name: &str) -> String {
        format!("{}/snmpv3-user-{}", self.svc_dn(), name)
    }

    pub fn enable(&self, config: &SnmpConfig) -> Result<ManagedObject> {
        let dn = self.svc_dn();
        let mut mo = self.session.query_dn(&dn)?.ok_or_else(|| {
            UcscError::not_found("snmp_enable", format!("snmp config '{}' does not exist", dn))
        })?;

        mo.set_prop("admin_state", ADMIN_STATE_ENABLED);
        mo.set_prop_opt("community", config.community.as_deref());
        mo.set_prop_opt("sys_contact", config.sys_contact.as_deref());
        mo.set_prop_opt("sys_location", config.sys_location.as_deref());
        mo.set_prop_opt("descr", config.descr.as_deref());
        mo.set_prop_multiple(&config.extra);

        self.session.set_mo(mo.clone())?;
        self.session.commit()?;
        Ok(mo)
    }

    pub fn disable(&self) -> Result<ManagedObject> {
        let dn = self.svc_dn();
        let mut mo = self.session.query_dn(&dn)?.ok_or_else(|| {
            UcscError::not_found("snmp_disable", format!("snmp config '{}' does not exist", dn))
        })?;
        mo.set_prop("admin_state", ADMIN_STATE_DISABLED);

        self.session.set_mo(mo.clone())?;
        self.session.commit()?;
        Ok(mo)
    }

    pub fn trap_add(&self, trap: &SnmpTrap) -> Result<ManagedObject> {
        let mut mo = ManagedObject::new("commSnmpTrap", self.trap_dn(&trap.hostname));
        mo.set_prop("hostname", &trap.hostname);
        mo.set_prop("community", &trap.community);
        mo.set_prop("port", &trap.port);
        mo.set_prop("version", &trap.version);
        mo.set_prop("notification_type", &trap.notification_type);
        mo.set_prop("v3_privilege", &trap.v3_privilege);
        mo.set_prop_multiple(&trap.extra);

        self.session.add_mo(mo.clone(), true)?;
        self.session.commit()?;
        Ok(mo)
    }

    pub fn trap_exists(&self, hostname: &str, props: &PropSet) -> Result<Option<ManagedObject>> {
        let mo = self.session.query_dn(&self.trap_dn(hostname))?;
        Ok(mo.filter(|mo| mo.check_prop_match(props)))
    }

    pub fn trap_modify(&self, hostname: &str, props: &PropSet) -> Result<ManagedObject> {
        let dn = self.trap_dn(hostname);
        let mut mo = self.session.query_dn(&dn)?.ok_or_else(|| {
            UcscError::not_found("snmp_trap_modify", format!("snmp trap '{}' does not exist", dn))
        })?;
        mo.set_prop_multiple(props);

        self.session.set_mo(mo.clone())?;
        self.session.commit()?;
        Ok(mo)
    }

    pub fn trap_remove(&self, hostname: &str) -> Result<()> {
        let dn = self.trap_dn(hostname);
        let mo = self.session.query_dn(&dn)?.ok_or_else(|| {
            UcscError::not_found("snmp_trap_remove", format!("snmp trap '{}' does not exist", dn))
        })?;
        self.session.remove_mo(mo)?;
        self.session.commit()?;
        Ok(())
    }

    pub fn user_add(&self, user: &SnmpUser) -> Result<ManagedObject> {
        let mut mo = ManagedObject::new("commSnmpUser", self.user_dn(&user.name));
        mo.set_prop("name", &user.name);
        mo.set_prop("descr", &user.descr);
        mo.set_prop("pwd", &user.pwd);
        mo.set_prop("privpwd", &user.privpwd);
        mo.set_prop("auth", &user.auth);
        mo.set_prop("use_aes", &user.use_aes);
        mo.set_prop_multiple(&user.extra);

        self.session.add_mo(mo.clone(), true)?;
        self.session.commit()?;
        Ok(mo)
    }

    pub fn user_exists(&self, name: &str, props: &PropSet) -> Result<Option<ManagedObject>> {
        let mo = self.session.query_dn(&self.user_dn(name))?;
        Ok(mo.filter(|mo| mo.check_prop_match(props)))
    }

    pub fn user_modify(&self, name: &str, props: &PropSet) -> Result<ManagedObject> {
        let dn = self.user_dn(name);
        let mut mo = self.session.query_dn(&dn)?.ok_or_else(|| {
            UcscError::not_found("snmp_user_modify", format!("snmp user '{}' does not exist", dn))
        })?;
        mo.set_prop_multiple(props);

        self.session.set_mo(mo.clone())?;
        self.session.commit()?;
        Ok(mo)
    }

    pub fn user_remove(&self, name: &str) -> Result<()> {
        let dn = self.user_dn(name);
        let mo = self.session.query_dn(&dn)?.ok_or_else(|| {
            UcscError::not_found("snmp_user_remove", format!("snmp user '{}' does not exist", dn))
        })?;
        self.session.remove_mo(mo)?;
        self.session.commit()?;
        Ok(())
    }
}
