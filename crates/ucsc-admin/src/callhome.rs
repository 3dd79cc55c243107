//! Call home alerting: endpoint state, source contact details, proxy and
//! transport gateway.

use serde::{Deserialize, Serialize};
use ucsc_core::dn::{device_profile_dn, DEFAULT_DEVICE_PROFILE};
use ucsc_core::{ManagedObject, PropSet, Result, UcscError, UcscSession};

/// Contact and routing details for the smart call home source. Unset fields
/// stay untouched on the remote object.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CallHomeConfig {
    pub contact: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub addr: Option<String>,
    pub customer: Option<String>,
    pub contract: Option<String>,
    pub site: Option<String>,
    pub r_from: Option<String>,
    pub reply_to: Option<String>,
    /// Alert priority, one of `alert`, `critical`, `debug`, `emergency`,
    /// `error`, `info`, `notice`, `warning`.
    pub urgency: Option<String>,
    pub extra: PropSet,
}

pub struct CallHomeClient<'a, S> {
    session: &'a S,
    base_dn: String,
}

impl<'a, S: UcscSession> CallHomeClient<'a, S> {
    pub fn new(session: &'a S) -> Self {
        Self::with_device_profile(session, DEFAULT_DEVICE_PROFILE)
    }

    pub fn with_device_profile(session: &'a S, profile: &str) -> Self {
        CallHomeClient {
            session,
            base_dn: device_profile_dn(profile),
        }
    }

    fn ep_dn(&self) -> String {
        format!("{}/call-home", self.base_dn)
    }

    fn fetch(&self, operation: &'static str, dn: &str) -> Result<ManagedObject> {
        self.session.query_dn(dn)?.ok_or_else(|| {
            UcscError::not_found(operation, format!("call home object '{}' not available", dn))
        })
    }

    pub fn enable(
        &self,
        alert_throttling_admin_state: Option<&str>,
        name: &str,
        descr: &str,
        extra: &PropSet,
    ) -> Result<ManagedObject> {
        let mut mo = self.fetch("call_home_enable", &self.ep_dn())?;
        mo.set_prop("admin_state", "on");
        mo.set_prop_opt("alert_throttling_admin_state", alert_throttling_admin_state);
        mo.set_prop("name", name);
        mo.set_prop("descr", descr);
        mo.set_prop_multiple(extra);

        self.session.set_mo(mo.clone())?;
        self.session.commit()?;
        Ok(mo)
    }

    pub fn disable(&self) -> Result<ManagedObject> {
        let mut mo = self.fetch("call_home_disable", &self.ep_dn())?;
        mo.set_prop("admin_state", "off");

        self.session.set_mo(mo.clone())?;
        self.session.commit()?;
        Ok(mo)
    }

    pub fn configure(&self, config: &CallHomeConfig) -> Result<ManagedObject> {
        let dn = format!("{}/sch-source", self.ep_dn());
        let mut mo = self.fetch("call_home_config", &dn)?;
        mo.set_prop_opt("contact", config.contact.as_deref());
        mo.set_prop_opt("phone", config.phone.as_deref());
        mo.set_prop_opt("email", config.email.as_deref());
        mo.set_prop_opt("addr", config.addr.as_deref());
        mo.set_prop_opt("customer", config.customer.as_deref());
        mo.set_prop_opt("contract", config.contract.as_deref());
        mo.set_prop_opt("site", config.site.as_deref());
        mo.set_prop_opt("r_from", config.r_from.as_deref());
        mo.set_prop_opt("reply_to", config.reply_to.as_deref());
        mo.set_prop_opt("urgency", config.urgency.as_deref());
        mo.set_prop_multiple(&config.extra);

        self.session.set_mo(mo.clone())?;
        self.session.commit()?;
        Ok(mo)
    }

    pub fn proxy_configure(&self, url: &str, port: &str, extra: &PropSet) -> Result<ManagedObject> {
        let dn = format!("{}/proxy", self.ep_dn());
        let mut mo = self.fetch("call_home_proxy_config", &dn)?;
        mo.set_prop("url", url);
        mo.set_prop("port", port);
        mo.set_prop_multiple(extra);

        self.session.add_mo(mo.clone(), true)?;
        self.session.commit()?;
        Ok(mo)
    }

    pub fn transport_gw_configure(
        &self,
        enabled: &str,
        url: &str,
        certificate: Option<&str>,
        extra: &PropSet,
    ) -> Result<ManagedObject> {
        let dn = format!("{}/transport-gateway", self.ep_dn());
        let mut mo = self.fetch("call_home_transport_gw_config", &dn)?;
        mo.set_prop("enabled", enabled);
        mo.set_prop("url", url);
        mo.set_prop_opt("cert_chain", certificate);
        mo.set_prop_multiple(extra);

        self.session.set_mo(mo.clone())?;
        self.session.commit()?;
        Ok(mo)
    }
}
