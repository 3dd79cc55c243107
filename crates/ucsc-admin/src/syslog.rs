//! Syslog configuration
//!
//! Console, monitor and file sinks are singletons toggled in place; remote
//! destinations are pre-provisioned `client-<name>` objects that enabling
//! merely reconfigures.

use serde::{Deserialize, Serialize};
use ucsc_core::dn::{device_profile_dn, DEFAULT_DEVICE_PROFILE};
use ucsc_core::{ManagedObject, PropSet, Result, UcscError, UcscSession};

pub const ADMIN_STATE_ENABLED: &str = "enabled";
pub const ADMIN_STATE_DISABLED: &str = "disabled";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteSyslog {
    pub hostname: String,
    pub severity: String,
    pub forwarding_facility: String,
    pub extra: PropSet,
}

impl Default for RemoteSyslog {
    fn default() -> Self {
        RemoteSyslog {
            hostname: "none".into(),
            severity: "emergencies".into(),
            forwarding_facility: "local0".into(),
            extra: PropSet::new(),
        }
    }
}

/// Which event classes feed the syslog sinks; unset fields stay untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyslogSource {
    pub faults: Option<String>,
    pub audits: Option<String>,
    pub events: Option<String>,
    pub extra: PropSet,
}

pub struct SyslogClient<'a, S> {
    session: &'a S,
    base_dn: String,
}

impl<'a, S: UcscSession> SyslogClient<'a, S> {
    pub fn new(session: &'a S) -> Self {
        Self::with_device_profile(session, DEFAULT_DEVICE_PROFILE)
    }

    pub fn with_device_profile(session: &'a S, profile: &str) -> Self {
        SyslogClient {
            session,
            base_dn: device_profile_dn(profile),
        }
    }

    fn syslog_dn(&self, leaf: &str) -> String {
        format!("{}/syslog/{}", self.base_dn, leaf)
    }

    fn fetch(&self, operation: &'static str, dn: &str) -> Result<ManagedObject> {
        self.session.query_dn(dn)?.ok_or_else(|| {
            UcscError::not_found(operation, format!("syslog object '{}' does not exist", dn))
        })
    }

    fn submit(&self, mo: ManagedObject) -> Result<ManagedObject> {
        self.session.set_mo(mo.clone())?;
        self.session.commit()?;
        Ok(mo)
    }

    pub fn local_console_enable(&self, severity: &str, extra: &PropSet) -> Result<ManagedObject> {
        let mut mo = self.fetch("syslog_local_console_enable", &self.syslog_dn("console"))?;
        mo.set_prop("admin_state", ADMIN_STATE_ENABLED);
        mo.set_prop("severity", severity);
        mo.set_prop_multiple(extra);
        self.submit(mo)
    }

    pub fn local_console_disable(&self) -> Result<ManagedObject> {
        let mut mo = self.fetch("syslog_local_console_disable", &self.syslog_dn("console"))?;
        mo.set_prop("admin_state", ADMIN_STATE_DISABLED);
        self.submit(mo)
    }

    pub fn local_monitor_enable(&self, severity: &str, extra: &PropSet) -> Result<ManagedObject> {
        let mut mo = self.fetch("syslog_local_monitor_enable", &self.syslog_dn("monitor"))?;
        mo.set_prop("admin_state", ADMIN_STATE_ENABLED);
        mo.set_prop("severity", severity);
        mo.set_prop_multiple(extra);
        self.submit(mo)
    }

    pub fn local_monitor_disable(&self) -> Result<ManagedObject> {
        let mut mo = self.fetch("syslog_local_monitor_disable", &self.syslog_dn("monitor"))?;
        mo.set_prop("admin_state", ADMIN_STATE_DISABLED);
        self.submit(mo)
    }

    pub fn local_file_enable(
        &self,
        name: &str,
        severity: &str,
        size: &str,
        extra: &PropSet,
    ) -> Result<ManagedObject> {
        let mut mo = self.fetch("syslog_local_file_enable", &self.syslog_dn("file"))?;
        mo.set_prop("admin_state", ADMIN_STATE_ENABLED);
        mo.set_prop("name", name);
        mo.set_prop("severity", severity);
        mo.set_prop("size", size);
        mo.set_prop_multiple(extra);
        self.submit(mo)
    }

    pub fn local_file_disable(&self) -> Result<ManagedObject> {
        let mut mo = self.fetch("syslog_local_file_disable", &self.syslog_dn("file"))?;
        mo.set_prop("admin_state", ADMIN_STATE_DISABLED);
        self.submit(mo)
    }

    pub fn remote_enable(&self, name: &str, remote: &RemoteSyslog) -> Result<ManagedObject> {
        let dn = self.syslog_dn(&format!("client-{}", name));
        let mut mo = self.fetch("syslog_remote_enable", &dn)?;
        mo.set_prop("admin_state", ADMIN_STATE_ENABLED);
        mo.set_prop("forwarding_facility", &remote.forwarding_facility);
        mo.set_prop("hostname", &remote.hostname);
        mo.set_prop("severity", &remote.severity);
        mo.set_prop_multiple(&remote.extra);
        self.submit(mo)
    }

    pub fn remote_disable(&self, name: &str) -> Result<ManagedObject> {
        let dn = self.syslog_dn(&format!("client-{}", name));
        let mut mo = self.fetch("syslog_remote_disable", &dn)?;
        mo.set_prop("admin_state", ADMIN_STATE_DISABLED);
        self.submit(mo)
    }

    pub fn source(&self, source: &SyslogSource) -> Result<ManagedObject> {
        let mut mo = self.fetch("syslog_source", &self.syslog_dn("source"))?;
        mo.set_prop_opt("faults", source.faults.as_deref());
        mo.set_prop_opt("audits", source.audits.as_deref());
        mo.set_prop_opt("events", source.events.as_deref());
        mo.set_prop_multiple(&source.extra);
        self.submit(mo)
    }
}
