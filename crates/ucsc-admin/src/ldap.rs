//! LDAP provider, group map and provider group configuration

use serde::{Deserialize, Serialize};
use ucsc_core::dn::{device_profile_dn, DEFAULT_DEVICE_PROFILE};
use ucsc_core::{ManagedObject, PropSet, Result, UcscError, UcscSession};

pub use crate::radius::ProviderRef;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LdapProvider {
    pub name: String,
    pub order: String,
    pub rootdn: String,
    pub basedn: String,
    pub port: String,
    pub enable_ssl: String,
    pub filter: String,
    pub attribute: String,
    pub key: String,
    pub timeout: String,
    pub vendor: String,
    pub retries: String,
    pub descr: String,
    pub extra: PropSet,
}

impl Default for LdapProvider {
    fn default() -> Self {
        LdapProvider {
            name: String::new(),
            order: "lowest-available".into(),
            rootdn: String::new(),
            basedn: String::new(),
            port: "389".into(),
            enable_ssl: "no".into(),
            filter: String::new(),
            attribute: String::new(),
            key: String::new(),
            timeout: "30".into(),
            vendor: "OpenLdap".into(),
            retries: "1".into(),
            descr: String::new(),
            extra: PropSet::new(),
        }
    }
}

/// Group authorization rules for a provider; unset fields stay untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LdapGroupRule {
    pub authorization: Option<String>,
    pub traversal: Option<String>,
    pub target_attr: Option<String>,
    pub name: Option<String>,
    pub descr: Option<String>,
    pub extra: PropSet,
}

pub struct LdapClient<'a, S> {
    session: &'a S,
    base_dn: String,
}

impl<'a, S: UcscSession> LdapClient<'a, S> {
    pub fn new(session: &'a S) -> Self {
        Self::with_device_profile(session, DEFAULT_DEVICE_PROFILE)
    }

    pub fn with_device_profile(session: &'a S, profile: &str) -> Self {
        LdapClient {
            session,
            base_dn: device_profile_dn(profile),
        }
    }

    fn ext_dn(&self) -> String {
        format!("{}/ldap-ext", self.base_dn)
    }

    fn provider_dn(&self, name: &str) -> String {
        format!("{}/provider-{}", self.ext_dn(), name)
    }

    fn group_map_dn(&self, name: &str) -> String {
        format!("{}/ldapgroup-{}", self.ext_dn(), name)
    }

    fn group_dn(&self, name: &str) -> String {
        format!("{}/providergroup-{}", self.ext_dn(), name)
    }

    /// Creates an LDAP provider. The `ldap-ext` endpoint must exist.
    pub fn provider_create(&self, provider: &LdapProvider) -> Result<ManagedObject> {
        let ext_dn = self.ext_dn();
        if self.session.query_dn(&ext_dn)?.is_none() {
            return Err(UcscError::not_found(
                "ldap_provider_create",
                format!("ldap endpoint '{}' does not exist", ext_dn),
            ));
        }

        let mut mo = ManagedObject::new("aaaLdapProvider", self.provider_dn(&provider.name));
        mo.set_prop("name", &provider.name);
        mo.set_prop("order", &provider.order);
        mo.set_prop("rootdn", &provider.rootdn);
        mo.set_prop("basedn", &provider.basedn);
        mo.set_prop("port", &provider.port);
        mo.set_prop("enable_ssl", &provider.enable_ssl);
        mo.set_prop("filter", &provider.filter);
        mo.set_prop("attribute", &provider.attribute);
        mo.set_prop("key", &provider.key);
        mo.set_prop("timeout", &provider.timeout);
        mo.set_prop("vendor", &provider.vendor);
        mo.set_prop("retries", &provider.retries);
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
                "ldap_provider_modify",
                format!("ldap provider '{}' does not exist", dn),
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
                "ldap_provider_delete",
                format!("ldap provider '{}' does not exist", dn),
            )
        })?;
        self.session.remove_mo(mo)?;
        self.session.commit()?;
        Ok(())
    }

    /// Configures group rules on an existing provider.
    pub fn provider_configure_group_rules(
        &self,
        provider_name: &str,
        rule: &LdapGroupRule,
    ) -> Result<ManagedObject> {
        let provider_dn = self.provider_dn(provider_name);
        if self.session.query_dn(&provider_dn)?.is_none() {
            return Err(UcscError::not_found(
                "ldap_provider_configure_group_rules",
                format!("ldap provider '{}' does not exist", provider_dn),
            ));
        }

        let mut mo = ManagedObject::child_of("aaaLdapGroupRule", &provider_dn, "ldapgroup-rule");
        mo.set_prop_opt("authorization", rule.authorization.as_deref());
        mo.set_prop_opt("traversal", rule.traversal.as_deref());
        mo.set_prop_opt("target_attr", rule.target_attr.as_deref());
        mo.set_prop_opt("name", rule.name.as_deref());
        mo.set_prop_opt("descr", rule.descr.as_deref());
        mo.set_prop_multiple(&rule.extra);

        self.session.add_mo(mo.clone(), true)?;
        self.session.commit()?;
        Ok(mo)
    }

    pub fn group_map_create(&self, name: &str, descr: &str, extra: &PropSet) -> Result<ManagedObject> {
        let mut mo = ManagedObject::new("aaaLdapGroup", self.group_map_dn(name));
        mo.set_prop("name", name);
        mo.set_prop("descr", descr);
        mo.set_prop_multiple(extra);

        self.session.add_mo(mo.clone(), true)?;
        self.session.commit()?;
        Ok(mo)
    }

    pub fn group_map_exists(&self, name: &str, props: &PropSet) -> Result<Option<ManagedObject>> {
        let mo = self.session.query_dn(&self.group_map_dn(name))?;
        Ok(mo.filter(|mo| mo.check_prop_match(props)))
    }

    pub fn group_map_delete(&self, name: &str) -> Result<()> {
        let dn = self.group_map_dn(name);
        let mo = self.session.query_dn(&dn)?.ok_or_else(|| {
            UcscError::not_found(
                "ldap_group_map_delete",
                format!("ldap group map '{}' does not exist", dn),
            )
        })?;
        self.session.remove_mo(mo)?;
        self.session.commit()?;
        Ok(())
    }

    /// Maps an LDAP group to a role.
    pub fn group_map_add_role(
        &self,
        group_map_name: &str,
        name: &str,
        descr: &str,
        extra: &PropSet,
    ) -> Result<ManagedObject> {
        let map_dn = self.group_map_dn(group_map_name);
        if self.session.query_dn(&map_dn)?.is_none() {
            return Err(UcscError::not_found(
                "ldap_group_map_add_role",
                format!("ldap group map '{}' does not exist", map_dn),
            ));
        }

        let mut mo = ManagedObject::child_of("aaaUserRole", &map_dn, format!("role-{}", name));
        mo.set_prop("name", name);
        mo.set_prop("descr", descr);
        mo.set_prop_multiple(extra);

        self.session.add_mo(mo.clone(), true)?;
        self.session.commit()?;
        Ok(mo)
    }

    pub fn group_map_role_exists(
        &self,
        group_map_name: &str,
        name: &str,
        props: &PropSet,
    ) -> Result<Option<ManagedObject>> {
        let dn = format!("{}/role-{}", self.group_map_dn(group_map_name), name);
        let mo = self.session.query_dn(&dn)?;
        Ok(mo.filter(|mo| mo.check_prop_match(props)))
    }

    pub fn group_map_remove_role(&self, group_map_name: &str, name: &str) -> Result<()> {
        let dn = format!("{}/role-{}", self.group_map_dn(group_map_name), name);
        let mo = self.session.query_dn(&dn)?.ok_or_else(|| {
            UcscError::not_found(
                "ldap_group_map_remove_role",
                format!("ldap group role '{}' does not exist", dn),
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
                "ldap_provider_group_delete",
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
                "ldap_provider_group_add_provider",
                format!("ldap provider group '{}' does not exist", group_dn),
            ));
        }
        let provider_dn = self.provider_dn(&provider.name);
        if self.session.query_dn(&provider_dn)?.is_none() {
            return Err(UcscError::not_found(
                "ldap_provider_group_add_provider",
                format!("ldap provider '{}' does not exist", provider_dn),
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

    pub fn provider_group_provider_exists(
        &self,
        group_name: &str,
        name: &str,
        props: &PropSet,
    ) -> Result<Option<ManagedObject>> {
        let dn = format!("{}/provider-ref-{}", self.group_dn(group_name), name);
        let mo = self.session.query_dn(&dn)?;
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
                "ldap_provider_group_modify_provider",
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
                "ldap_provider_group_remove_provider",
                format!("provider '{}' not available under group", dn),
            )
        })?;
        self.session.remove_mo(mo)?;
        self.session.commit()?;
        Ok(())
    }
}
