//! Key ring, certificate request and trusted point configuration

use serde::{Deserialize, Serialize};
use ucsc_core::dn::{device_profile_dn, DEFAULT_DEVICE_PROFILE};
use ucsc_core::{ManagedObject, PropSet, Result, UcscError, UcscSession};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyRing {
    pub name: String,
    pub descr: String,
    /// Trusted point the ring is anchored to.
    pub tp: String,
    pub cert: String,
    pub regen: String,
    pub modulus: String,
    pub extra: PropSet,
}

impl Default for KeyRing {
    fn default() -> Self {
        KeyRing {
            name: String::new(),
            descr: String::new(),
            tp: String::new(),
            cert: String::new(),
            regen: "no".into(),
            modulus: "mod2048".into(),
            extra: PropSet::new(),
        }
    }
}

/// Certificate signing request fields for a key ring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertRequest {
    pub dns: String,
    pub locality: String,
    pub state: String,
    pub country: String,
    pub org_name: String,
    pub org_unit_name: String,
    pub email: String,
    pub pwd: String,
    pub subj_name: String,
    pub ip: String,
    pub ip_a: String,
    pub ip_b: String,
    pub ipv6: String,
    pub ipv6_a: String,
    pub ipv6_b: String,
    pub extra: PropSet,
}

impl Default for CertRequest {
    fn default() -> Self {
        CertRequest {
            dns: String::new(),
            locality: String::new(),
            state: String::new(),
            country: String::new(),
            org_name: String::new(),
            org_unit_name: String::new(),
            email: String::new(),
            pwd: String::new(),
            subj_name: String::new(),
            ip: "0.0.0.0".into(),
            ip_a: "0.0.0.0".into(),
            ip_b: "0.0.0.0".into(),
            ipv6: "::".into(),
            ipv6_a: "::".into(),
            ipv6_b: "::".into(),
            extra: PropSet::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrustedPoint {
    pub name: String,
    pub descr: String,
    pub cert_chain: String,
    pub extra: PropSet,
}

pub struct KeyRingClient<'a, S> {
    session: &'a S,
    base_dn: String,
}

impl<'a, S: UcscSession> KeyRingClient<'a, S> {
    pub fn new(session: &'a S) -> Self {
        Self::with_device_profile(session, DEFAULT_DEVICE_PROFILE)
    }

    pub fn with_device_profile(session: &'a S, profile: &str) -> Self {
        KeyRingClient {
            session,
            base_dn: device_profile_dn(profile),
        }
    }

    fn ext_dn(&self) -> String {
        format!("{}/pki-ext", self.base_dn)
    }

    fn ring_dn(&self, name: &str) -> String {
        format!("{}/keyring-{}", self.ext_dn(), name)
    }

    fn tp_dn(&self, name: &str) -> String {
        format!("{}/tp-{}", self.ext_dn(), name)
    }

    pub fn create(&self, ring: &KeyRing) -> Result<ManagedObject> {
        let mut mo = ManagedObject::new("pkiKeyRing", self.ring_dn(&ring.name));
        mo.set_prop("name", &ring.name);
        mo.set_prop("descr", &ring.descr);
        mo.set_prop("tp", &ring.tp);
        mo.set_prop("cert", &ring.cert);
        mo.set_prop("regen", &ring.regen);
        mo.set_prop("modulus", &ring.modulus);
        mo.set_prop_multiple(&ring.extra);

        self.session.add_mo(mo.clone(), true)?;
        self.session.commit()?;
        Ok(mo)
    }

    pub fn exists(&self, name: &str, props: &PropSet) -> Result<Option<ManagedObject>> {
        let mo = self.session.query_dn(&self.ring_dn(name))?;
        Ok(mo.filter(|mo| mo.check_prop_match(props)))
    }

    pub fn modify(&self, name: &str, props: &PropSet) -> Result<ManagedObject> {
        let dn = self.ring_dn(name);
        let mut mo = self.session.query_dn(&dn)?.ok_or_else(|| {
            UcscError::not_found("key_ring_modify", format!("keyring '{}' does not exist", dn))
        })?;
        mo.set_prop_multiple(props);

        self.session.set_mo(mo.clone())?;
        self.session.commit()?;
        Ok(mo)
    }

    pub fn delete(&self, name: &str) -> Result<()> {
        let dn = self.ring_dn(name);
        let mo = self.session.query_dn(&dn)?.ok_or_else(|| {
            UcscError::not_found("key_ring_delete", format!("keyring '{}' does not exist", dn))
        })?;
        self.session.remove_mo(mo)?;
        self.session.commit()?;
        Ok(())
    }

    /// Adds a certificate request under an existing key ring. There is no
    /// modify for requests; the remote model forbids it.
    pub fn certificate_request_add(
        &self,
        ring_name: &str,
        request: &CertRequest,
    ) -> Result<ManagedObject> {
        let ring_dn = self.ring_dn(ring_name);
        if self.session.query_dn(&ring_dn)?.is_none() {
            return Err(UcscError::not_found(
                "certificate_request_add",
                format!("keyring '{}' does not exist", ring_dn),
            ));
        }

        let mut mo = ManagedObject::child_of("pkiCertReq", &ring_dn, "certreq");
        mo.set_prop("dns", &request.dns);
        mo.set_prop("locality", &request.locality);
        mo.set_prop("state", &request.state);
        mo.set_prop("country", &request.country);
        mo.set_prop("org_name", &request.org_name);
        mo.set_prop("org_unit_name", &request.org_unit_name);
        mo.set_prop("email", &request.email);
        mo.set_prop("pwd", &request.pwd);
        mo.set_prop("subj_name", &request.subj_name);
        mo.set_prop("ip", &request.ip);
        mo.set_prop("ip_a", &request.ip_a);
        mo.set_prop("ip_b", &request.ip_b);
        mo.set_prop("ipv6", &request.ipv6);
        mo.set_prop("ipv6_a", &request.ipv6_a);
        mo.set_prop("ipv6_b", &request.ipv6_b);
        mo.set_prop_multiple(&request.extra);

        self.session.add_mo(mo.clone(), true)?;
        self.session.commit()?;
        Ok(mo)
    }

    pub fn certificate_request_exists(
        &self,
        ring_name: &str,
        props: &PropSet,
    ) -> Result<Option<ManagedObject>> {
        let dn = format!("{}/certreq", self.ring_dn(ring_name));
        let mo = self.session.query_dn(&dn)?;
        Ok(mo.filter(|mo| mo.check_prop_match(props)))
    }

    pub fn certificate_request_remove(&self, ring_name: &str) -> Result<()> {
        let dn = format!("{}/certreq", self.ring_dn(ring_name));
        let mo = self.session.query_dn(&dn)?.ok_or_else(|| {
            UcscError::not_found(
                "certificate_request_remove",
                format!("certificate request '{}' does not exist", dn),
            )
        })?;
        self.session.remove_mo(mo)?;
        self.session.commit()?;
        Ok(())
    }

    pub fn trusted_point_create(&self, tp: &TrustedPoint) -> Result<ManagedObject> {
        let mut mo = ManagedObject::new("pkiTP", self.tp_dn(&tp.name));
        mo.set_prop("name", &tp.name);
        mo.set_prop("descr", &tp.descr);
        mo.set_prop("cert_chain", &tp.cert_chain);
        mo.set_prop_multiple(&tp.extra);

        self.session.add_mo(mo.clone(), true)?;
        self.session.commit()?;
        Ok(mo)
    }

    pub fn trusted_point_exists(&self, name: &str, props: &PropSet) -> Result<Option<ManagedObject>> {
        let mo = self.session.query_dn(&self.tp_dn(name))?;
        Ok(mo.filter(|mo| mo.check_prop_match(props)))
    }

    pub fn trusted_point_modify(&self, name: &str, props: &PropSet) -> Result<ManagedObject> {
        let dn = self.tp_dn(name);
        let mut mo = self.session.query_dn(&dn)?.ok_or_else(|| {
            UcscError::not_found(
                "trusted_point_modify",
                format!("trusted point '{}' does not exist", dn),
            )
        })?;
        mo.set_prop_multiple(props);

        self.session.set_mo(mo.clone())?;
        self.session.commit()?;
        Ok(mo)
    }

    pub fn trusted_point_delete(&self, name: &str) -> Result<()> {
        let dn = self.tp_dn(name);
        let mo = self.session.query_dn(&dn)?.ok_or_else(|| {
            UcscError::not_found(
                "trusted_point_delete",
                format!("trusted point '{}' does not exist", dn),
            )
        })?;
        self.session.remove_mo(mo)?;
        self.session.commit()?;
        Ok(())
    }
}
