//! Authentication domain and native authentication configuration
//!
//! Everything here lives under the `auth-realm` subtree of the device
//! profile: login domains, their realm bindings and the native (default and
//! console) authentication singletons.

use serde::{Deserialize, Serialize};
use ucsc_core::dn::{device_profile_dn, DEFAULT_DEVICE_PROFILE};
use ucsc_core::{ManagedObject, PropSet, Result, UcscError, UcscSession};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthDomain {
    pub name: String,
    pub refresh_period: String,
    pub session_timeout: String,
    pub descr: String,
    pub extra: PropSet,
}

impl Default for AuthDomain {
    fn default() -> Self {
        AuthDomain {
            name: String::new(),
            refresh_period: "600".into(),
            session_timeout: "7200".into(),
            descr: String::new(),
            extra: PropSet::new(),
        }
    }
}

/// Realm binding for an authentication domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainRealm {
    /// One of `ldap`, `local`, `none`, `radius`, `tacacs`; validated remotely.
    pub realm: String,
    pub provider_group: String,
    pub name: String,
    pub descr: String,
    pub extra: PropSet,
}

impl Default for DomainRealm {
    fn default() -> Self {
        DomainRealm {
            realm: "local".into(),
            provider_group: String::new(),
            name: String::new(),
            descr: String::new(),
            extra: PropSet::new(),
        }
    }
}

/// Optional updates for the native authentication singletons; unset fields
/// leave the remote values untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NativeAuthUpdate {
    pub realm: Option<String>,
    pub session_timeout: Option<String>,
    pub refresh_period: Option<String>,
    pub provider_group: Option<String>,
    pub def_role_policy: Option<String>,
    pub def_login: Option<String>,
    pub con_login: Option<String>,
    pub name: Option<String>,
    pub descr: Option<String>,
    pub extra: PropSet,
}

pub struct AuthDomainClient<'a, S> {
    session: &'a S,
    base_dn: String,
}

impl<'a, S: UcscSession> AuthDomainClient<'a, S> {
    pub fn new(session: &'a S) -> Self {
        Self::with_device_profile(session, DEFAULT_DEVICE_PROFILE)
    }

    pub fn with_device_profile(session: &'a S, profile: &str) -> Self {
        AuthDomainClient {
            session,
            base_dn: device_profile_dn(profile),
        }
    }

    fn realm_dn(&self) -> String {
        format!("{}/auth-realm", self.base_dn)
    }

    fn domain_dn(&self, name: &str) -> String {
        format!("{}/domain-{}", self.realm_dn(), name)
    }

    pub fn create(&self, domain: &AuthDomain) -> Result<ManagedObject> {
        let mut mo = ManagedObject::child_of(
            "aaaDomain",
            &self.realm_dn(),
            format!("domain-{}", domain.name),
        );
        mo.set_prop("name", &domain.name);
        mo.set_prop("refresh_period", &domain.refresh_period);
        mo.set_prop("session_timeout", &domain.session_timeout);
        mo.set_prop("descr", &domain.descr);
        mo.set_prop_multiple(&domain.extra);

        self.session.add_mo(mo.clone(), true)?;
        self.session.commit()?;
        Ok(mo)
    }

    pub fn exists(&self, name: &str, props: &PropSet) -> Result<Option<ManagedObject>> {
        let mo = self.session.query_dn(&self.domain_dn(name))?;
        Ok(mo.filter(|mo| mo.check_prop_match(props)))
    }

    pub fn modify(&self, name: &str, props: &PropSet) -> Result<ManagedObject> {
        let dn = self.domain_dn(name);
        let mut mo = self.session.query_dn(&dn)?.ok_or_else(|| {
            UcscError::not_found(
                "auth_domain_modify",
                format!("auth domain '{}' does not exist", dn),
            )
        })?;
        mo.set_prop_multiple(props);

        self.session.set_mo(mo.clone())?;
        self.session.commit()?;
        Ok(mo)
    }

    pub fn delete(&self, name: &str) -> Result<()> {
        let dn = self.domain_dn(name);
        let mo = self.session.query_dn(&dn)?.ok_or_else(|| {
            UcscError::not_found(
                "auth_domain_delete",
                format!("auth domain '{}' does not exist", dn),
            )
        })?;
        self.session.remove_mo(mo)?;
        self.session.commit()?;
        Ok(())
    }

    /// Configures the realm of an existing auth domain. The binding object is
    /// built in place and submitted as an update, matching the remote model
    /// where every domain already carries its realm child.
    pub fn realm_configure(&self, domain_name: &str, realm: &DomainRealm) -> Result<ManagedObject> {
        let domain_dn = self.domain_dn(domain_name);
        if self.session.query_dn(&domain_dn)?.is_none() {
            return Err(UcscError::not_found(
                "auth_domain_realm_configure",
                format!("auth domain '{}' does not exist", domain_dn),
            ));
        }

        let mut mo = ManagedObject::child_of("aaaDomainAuth", &domain_dn, "domain-auth");
        mo.set_prop("name", &realm.name);
        mo.set_prop("descr", &realm.descr);
        mo.set_prop("realm", &realm.realm);
        mo.set_prop("provider_group", &realm.provider_group);
        mo.set_prop_multiple(&realm.extra);

        self.session.set_mo(mo.clone())?;
        self.session.commit()?;
        Ok(mo)
    }

    /// Updates the `auth-realm` singleton itself.
    pub fn native_authentication_configure(
        &self,
        update: &NativeAuthUpdate,
    ) -> Result<ManagedObject> {
        self.update_singleton(
            "native_authentication_configure",
            &self.realm_dn(),
            "native authentication",
            update,
        )
    }

    /// Updates the default authentication singleton.
    pub fn native_authentication_default(
        &self,
        update: &NativeAuthUpdate,
    ) -> Result<ManagedObject> {
        self.update_singleton(
            "native_authentication_default",
            &format!("{}/default-auth", self.realm_dn()),
            "native default authentication",
            update,
        )
    }

    /// Updates the console authentication singleton.
    pub fn native_authentication_console(
        &self,
        update: &NativeAuthUpdate,
    ) -> Result<ManagedObject> {
        self.update_singleton(
            "native_authentication_console",
            &format!("{}/console-auth", self.realm_dn()),
            "native console authentication",
            update,
        )
    }

    fn update_singleton(
        &self,
        operation: &'static str,
        dn: &str,
        what: &str,
        update: &NativeAuthUpdate,
    ) -> Result<ManagedObject> {
        let mut mo = self.session.query_dn(dn)?.ok_or_else(|| {
            UcscError::not_found(operation, format!("{} '{}' does not exist", what, dn))
        })?;

        mo.set_prop_opt("realm", update.realm.as_deref());
        mo.set_prop_opt("session_timeout", update.session_timeout.as_deref());
        mo.set_prop_opt("refresh_period", update.refresh_period.as_deref());
        mo.set_prop_opt("provider_group", update.provider_group.as_deref());
        mo.set_prop_opt("def_role_policy", update.def_role_policy.as_deref());
        mo.set_prop_opt("def_login", update.def_login.as_deref());
        mo.set_prop_opt("con_login", update.con_login.as_deref());
        mo.set_prop_opt("name", update.name.as_deref());
        mo.set_prop_opt("descr", update.descr.as_deref());
        mo.set_prop_multiple(&update.extra);

        self.session.set_mo(mo.clone())?;
        self.session.commit()?;
        Ok(mo)
    }
}
