//! Timezone and NTP configuration

use serde::{Deserialize, Serialize};
use ucsc_core::dn::{device_profile_dn, DEFAULT_DEVICE_PROFILE};
use ucsc_core::{ManagedObject, PropSet, Result, UcscError, UcscSession};

/// An NTP server entry; `name` is the server address or hostname.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NtpServer {
    pub name: String,
    pub descr: String,
    pub extra: PropSet,
}

pub struct TimeZoneClient<'a, S> {
    session: &'a S,
    base_dn: String,
}

impl<'a, S: UcscSession> TimeZoneClient<'a, S> {
    pub fn new(session: &'a S) -> Self {
        Self::with_device_profile(session, DEFAULT_DEVICE_PROFILE)
    }

    pub fn with_device_profile(session: &'a S, profile: &str) -> Self {
        TimeZoneClient {
            session,
            base_dn: device_profile_dn(profile),
        }
    }

    fn svc_dn(&self) -> String {
        format!("{}/datetime-svc", self.base_dn)
    }

    /// Sets the timezone (empty string unsets it). The datetime service is
    /// forced enabled on port 0, as the management plane expects.
    pub fn set(&self, timezone: &str, extra: &PropSet) -> Result<ManagedObject> {
        let dn = self.svc_dn();
        let mut mo = self.session.query_dn(&dn)?.ok_or_else(|| {
            UcscError::not_found(
                "time_zone_set",
                format!("datetime service '{}' does not exist", dn),
            )
        })?;
        mo.set_prop("timezone", timezone);
        mo.set_prop("admin_state", "enabled");
        mo.set_prop("port", "0");
        mo.set_prop_multiple(extra);

        self.session.set_mo(mo.clone())?;
        self.session.commit()?;
        Ok(mo)
    }

    pub fn ntp_server_create(&self, server: &NtpServer) -> Result<ManagedObject> {
        let mut mo = ManagedObject::child_of(
            "commNtpProvider",
            &self.svc_dn(),
            format!("ntp-{}", server.name),
        );
        mo.set_prop("name", &server.name);
        mo.set_prop("descr", &server.descr);
        mo.set_prop_multiple(&server.extra);

        self.session.add_mo(mo.clone(), true)?;
        self.session.commit()?;
        Ok(mo)
    }

    pub fn ntp_server_exists(&self, name: &str, props: &PropSet) -> Result<Option<ManagedObject>> {
        let dn = format!("{}/ntp-{}", self.svc_dn(), name);
        let mo = self.session.query_dn(&dn)?;
        Ok(mo.filter(|mo| mo.check_prop_match(props)))
    }

    pub fn ntp_server_remove(&self, name: &str) -> Result<()> {
        let dn = format!("{}/ntp-{}", self.svc_dn(), name);
        let mo = self.session.query_dn(&dn)?.ok_or_else(|| {
            UcscError::not_found(
                "ntp_server_remove",
                format!("ntp server '{}' does not exist", dn),
            )
        })?;
        self.session.remove_mo(mo)?;
        self.session.commit()?;
        Ok(())
    }
}
