//! TACACS+ provider and provider group configuration

use serde::{Deserialize, Serialize};
use ucsc_core::dn::{device_profile_dn, DEFAULT_DEVICE_PROFILE};
use ucsc_core::{ManagedObject, PropSet, Result, UcscError, UcscSession};

pub use crate::radius::ProviderRef;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TacacsProvider {
    pub name: String,
    pub order: String,
    pub key: String,
    pub port: String,
    pub timeout: String,
    pub retries: String,
    pub enc_key: String,
    pub descr: String,
    pub extra: PropSet,
}

impl Default for TacacsProvider {
    fn default() -> Self {
        TacacsProvider {
            name: String::new(),
            order: "lowest-available".into(),
            key: String::new(),
            port: "49".into(),
            timeout: "5".into(),
            retries: "1".into(),
            enc_key: String::new(),
            descr: String::new(),
            extra: PropSet::new(),
        }
    }
}

pub struct TacacsClient<'a, S> {
    session: &'a S,
    base_dn: String,
}

impl<'a, S: UcscSession> TacacsClient<'a, S> {
    pub fn new(session: &'a S) -> Self {
        Self::with_device_profile(session, DEFAULT_DEVICE_PROFILE)
    }

    pub fn with_device_profile(session: &'a S, profile: &str) -> Self {
        TacacsClient {
            session,
            base_dn: device_profile_dn(profile),
        }
    }

    fn ext_dn(&self) -> String {
        format!("{}/tacacs-ext", self.base_dn)
    }

    fn provider_dn(&self, name: &str) -> String {
        format!("{}/provider-{}", self.ext_dn(), name)
    }

    fn group_dn(&self, name: &str) -> String {
        format!("{}/providergroup-{}", self.ext_dn(), name)
    }

    pub fn provider_create(&self, provider: &TacacsProvider) -> Result<ManagedObject> {
        let mut mo = ManagedObject::new("aaaTacacsPlusProvider", self.provider_dn(&provider.name));
        mo.set_prop("name", &provider.name);
        mo.set_prop("order", &provider.order);
        mo.set_prop("key", &provider.key);
        mo.set_prop("port", &provider.port);
        mo.set_prop("timeout", &provider.timeout);
        mo.set_prop("retries", &provider.retries);
        mo.set_prop("enc_key", &provider.enc_key);
        mo.set_prop("descr", &provider.descr);
        mo.set_prop_multiple(&provider.extra);

        self.session.add_mo(mo.clone(), true)?;
        self.session.commit()?;
        Ok(mo)
    }

    pub fn provider_exists(&self, name: &str, props: &PropSet) -> Result<Option<ManagedObject>> {
        let mo = self.session.query_dn(&self.provider_dn(name))?;
        Ok(mo.filter(|mo| mo.check_prop_match(props)))
    }

    pub fn provider_modify(&self, name: &str, props: &PropSet) -> Result<ManagedObject> {
        let dn = self.provider_dn(name);
        let mut mo = self.session.query_dn(&dn)?.ok_or_else(|| {
            UcscError::not_found(
                "tacacsplus_provider_modify",
                format!("tacacs+ provider '{}' does not exist", dn),
            )
        })?;
        mo.set_prop_multiple(props);

        self.session.set_mo(mo.clone())?;
        self.session.commit()?;
        Ok(mo)
    }

    pub fn provider_delete(&self, name: &str) -> Result<()> {
        let dn = self.provider_dn(name);
        let mo = self.session.query_dn(&dn)?.ok_or_else(|| {
            UcscError::not_found(
                "tacacsplus_provider_delete",
                format!("tacacs+ provider '{}' does not exist", dn),
            )
        })?;
        self.session.remove_mo(mo)?;
        self.session.commit()?;
        Ok(())
    }

    pub fn provider_group_create(&self, name: &str, descr: &str, extra: &PropSet) -> Result<ManagedObject> {
        let mut mo = ManagedObject::new("aaaProviderGroup", self.group_dn(name));
        mo.set_prop("name", name);
        mo.set_prop("descr", descr);
        mo.set_prop_multiple(extra);

        self.session.add_mo(mo.clone(), true)?;
        self.session.commit()?;
        Ok(mo)
    }

    pub fn provider_group_exists(&self, name: &str, props: &PropSet) -> Result<Option<ManagedObject>> {
        let mo = self.session.query_dn(&self.group_dn(name))?;
        Ok(mo.filter(|mo| mo.check_prop_match(props)))
    }

    pub fn provider_group_delete(&self, name: &str) -> Result<()> {
        let dn = self.group_dn(name);
        let mo = self.session.query_dn(&dn)?.ok_or_else(|| {
            UcscError::not_found(
                "tacacsplus_provider_group_delete",
                format!("provider group '{}' does not exist", dn),
            )
        })?;
        self.session.remove_mo(mo)?;
        self.session.commit()?;
        Ok(())
    }

    pub fn provider_group_add_provider(
        &self,
        group_name: &str,
        provider: &ProviderRef,
    ) -> Result<ManagedObject> {
        let group_dn = self.group_dn(group_name);
        if self.session.query_dn(&group_dn)?.is_none() {
            return Err(UcscError::not_found(
                "tacacsplus_provider_group_add_provider",
                format!("tacacs+ provider group '{}' does not exist", group_dn),
            ));
        }
        let provider_dn = self.provider_dn(&provider.name);
        if self.session.query_dn(&provider_dn)?.is_none() {
            return Err(UcscError::not_found(
                "tacacsplus_provider_group_add_provider",
                format!("tacacs+ provider '{}' does not exist", provider_dn),
            ));
        }

        let mut mo = ManagedObject::child_of(
            "aaaProviderRef",
            &group_dn,
            format!("provider-ref-{}", provider.name),
        );
        mo.set_prop("name", &provider.name);
        mo.set_prop("order", &provider.order);
        mo.set_prop("descr", &provider.descr);
        mo.set_prop_multiple(&provider.extra);

        self.session.add_mo(mo.clone(), true)?;
        self.session.commit()?;
        Ok(mo)
    }

    /// An absent group is an error; an absent reference is `None`.
    pub fn provider_group_provider_exists(
        &self,
        group_name: &str,
        name: &str,
        props: &PropSet,
    ) -> Result<Option<ManagedObject>> {
        let group_dn = self.group_dn(group_name);
        if self.session.query_dn(&group_dn)?.is_none() {
            return Err(UcscError::not_found(
                "tacacsplus_provider_group_provider_exists",
                format!("tacacs+ provider group '{}' does not exist", group_dn),
            ));
        }
        let mo = self
            .session
            .query_dn(&format!("{}/provider-ref-{}", group_dn, name))?;
        Ok(mo.filter(|mo| mo.check_prop_match(props)))
    }

    pub fn provider_group_modify_provider(
        &self,
        group_name: &str,
        name: &str,
        props: &PropSet,
    ) -> Result<ManagedObject> {
        let dn = format!("{}/provider-ref-{}", self.group_dn(group_name), name);
        let mut mo = self.session.query_dn(&dn)?.ok_or_else(|| {
            UcscError::not_found(
                "tacacsplus_provider_group_modify_provider",
                format!("provider '{}' not available under group", dn),
            )
        })?;
        mo.set_prop_multiple(props);

        self.session.set_mo(mo.clone())?;
        self.session.commit()?;
        Ok(mo)
    }

    pub fn provider_group_remove_provider(&self, group_name: &str, name: &str) -> Result<()> {
        let dn = format!("{}/provider-ref-{}", self.group_dn(group_name), name);
        let mo = self.session.query_dn(&dn)?.ok_or_else(|| {
            UcscError::not_found(
                "tacacsplus_provider_group_remove_provider",
                format!("provider '{}' not available under group", dn),
            )
        })?;
        self.session.remove_mo(mo)?;
        self.session.commit()?;
        Ok(())
    }
}
