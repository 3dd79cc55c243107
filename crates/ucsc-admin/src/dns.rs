//! DNS service configuration

use serde::{Deserialize, Serialize};
use ucsc_core::dn::{device_profile_dn, DEFAULT_DEVICE_PROFILE};
use ucsc_core::{ManagedObject, PropSet, Result, UcscError, UcscSession};

/// A DNS server entry. `name` is the server's IP address.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DnsServer {
    pub name: String,
    pub descr: String,
    pub extra: PropSet,
}

/// Client for the `dns-svc` subtree of a device profile.
pub struct DnsClient<'a, S> {
    session: &'a S,
    base_dn: String,
}

impl<'a, S: UcscSession> DnsClient<'a, S> {
    pub fn new(session: &'a S) -> Self {
        Self::with_device_profile(session, DEFAULT_DEVICE_PROFILE)
    }

    pub fn with_device_profile(session: &'a S, profile: &str) -> Self {
        DnsClient {
            session,
            base_dn: device_profile_dn(profile),
        }
    }

    fn svc_dn(&self) -> String {
        format!("{}/dns-svc", self.base_dn)
    }

    /// Adds a DNS server.
    pub fn server_add(&self, server: &DnsServer) -> Result<ManagedObject> {
        let mut mo = ManagedObject::child_of(
            "commDnsProvider",
            &self.svc_dn(),
            format!("dns-{}", server.name),
        );
        mo.set_prop("name", &server.name);
        mo.set_prop("descr", &server.descr);
        mo.set_prop_multiple(&server.extra);

        self.session.add_mo(mo.clone(), true)?;
        self.session.commit()?;
        Ok(mo)
    }

    /// Checks whether a DNS server exists with the requested properties.
    pub fn server_exists(&self, name: &str, props: &PropSet) -> Result<Option<ManagedObject>> {
        let dn = format!("{}/dns-{}", self.svc_dn(), name);
        let mo = self.session.query_dn(&dn)?;
        Ok(mo.filter(|mo| mo.check_prop_match(props)))
    }

    /// Removes a DNS server.
    pub fn server_remove(&self, name: &str) -> Result<()> {
        let dn = format!("{}/dns-{}", self.svc_dn(), name);
        let mo = self.session.query_dn(&dn)?.ok_or_else(|| {
            UcscError::not_found("dns_server_remove", format!("dns server '{}' not found", dn))
        })?;
        self.session.remove_mo(mo)?;
        self.session.commit()?;
        Ok(())
    }

    /// Sets the domain name on the DNS service.
    pub fn set_domain_name(&self, domain: &str, extra: &PropSet) -> Result<ManagedObject> {
        let dn = self.svc_dn();
        let mut mo = self.session.query_dn(&dn)?.ok_or_else(|| {
            UcscError::not_found(
                "dns_set_domain_name",
                format!("dns service '{}' does not exist", dn),
            )
        })?;
        mo.set_prop("domain", domain);
        mo.set_prop_multiple(extra);

        self.session.set_mo(mo.clone())?;
        self.session.commit()?;
        Ok(mo)
    }
}
