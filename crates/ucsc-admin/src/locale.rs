//! Locale management

use serde::{Deserialize, Serialize};
use ucsc_core::dn::{device_profile_dn, DEFAULT_DEVICE_PROFILE};
use ucsc_core::{ManagedObject, PropSet, Result, UcscError, UcscSession};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Locale {
    pub name: String,
    pub descr: String,
    pub extra: PropSet,
}

/// An organization assignment hung off a locale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrgAssignment {
    pub name: String,
    pub org_dn: String,
    pub descr: String,
    pub extra: PropSet,
}

impl Default for OrgAssignment {
    fn default() -> Self {
        OrgAssignment {
            name: String::new(),
            org_dn: "org-root".into(),
            descr: String::new(),
            extra: PropSet::new(),
        }
    }
}

/// A domain group assignment hung off a locale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainGroupAssignment {
    pub name: String,
    pub domaingroup_dn: String,
    pub descr: String,
    pub extra: PropSet,
}

impl Default for DomainGroupAssignment {
    fn default() -> Self {
        DomainGroupAssignment {
            name: String::new(),
            domaingroup_dn: "domaingroup-root".into(),
            descr: String::new(),
            extra: PropSet::new(),
        }
    }
}

pub struct LocaleClient<'a, S> {
    session: &'a S,
    base_dn: String,
}

impl<'a, S: UcscSession> LocaleClient<'a, S> {
    pub fn new(session: &'a S) -> Self {
        Self::with_device_profile(session, DEFAULT_DEVICE_PROFILE)
    }

    pub fn with_device_profile(session: &'a S, profile: &str) -> Self {
        LocaleClient {
            session,
            base_dn: device_profile_dn(profile),
        }
    }

    fn locale_dn(&self, name: &str) -> String {
        format!("{}/locale-{}", self.base_dn, name)
    }

    pub fn create(&self, locale: &Locale) -> Result<ManagedObject> {
        let mut mo = ManagedObject::child_of(
            "aaaLocale",
            &self.base_dn,
            format!("locale-{}", locale.name),
        );
        mo.set_prop("name", &locale.name);
        mo.set_prop("descr", &locale.descr);
        mo.set_prop_multiple(&locale.extra);

        self.session.add_mo(mo.clone(), true)?;
        self.session.commit()?;
        Ok(mo)
    }

    pub fn exists(&self, name: &str, props: &PropSet) -> Result<Option<ManagedObject>> {
        let mo = self.session.query_dn(&self.locale_dn(name))?;
        Ok(mo.filter(|mo| mo.check_prop_match(props)))
    }

    pub fn modify(&self, name: &str, props: &PropSet) -> Result<ManagedObject> {
        let dn = self.locale_dn(name);
        let mut mo = self.session.query_dn(&dn)?.ok_or_else(|| {
            UcscError::not_found("locale_modify", format!("locale '{}' does not exist", dn))
        })?;
        mo.set_prop_multiple(props);

        self.session.set_mo(mo.clone())?;
        self.session.commit()?;
        Ok(mo)
    }

    pub fn delete(&self, name: &str) -> Result<()> {
        let dn = self.locale_dn(name);
        let mo = self.session.query_dn(&dn)?.ok_or_else(|| {
            UcscError::not_found("locale_delete", format!("locale '{}' does not exist", dn))
        })?;
        self.session.remove_mo(mo)?;
        self.session.commit()?;
        Ok(())
    }

    /// Assigns the locale to an organization.
    pub fn assign_org(&self, locale_name: &str, org: &OrgAssignment) -> Result<ManagedObject> {
        let locale_dn = self.locale_dn(locale_name);
        if self.session.query_dn(&locale_dn)?.is_none() {
            return Err(UcscError::not_found(
                "locale_assign_org",
                format!("locale '{}' does not exist", locale_dn),
            ));
        }

        let mut mo = ManagedObject::child_of("aaaOrg", &locale_dn, format!("org-{}", org.name));
        mo.set_prop("name", &org.name);
        mo.set_prop("org_dn", &org.org_dn);
        mo.set_prop("descr", &org.descr);
        mo.set_prop_multiple(&org.extra);

        self.session.add_mo(mo.clone(), true)?;
        self.session.commit()?;
        Ok(mo)
    }

    pub fn unassign_org(&self, locale_name: &str, name: &str) -> Result<()> {
        let dn = format!("{}/org-{}", self.locale_dn(locale_name), name);
        let mo = self.session.query_dn(&dn)?.ok_or_else(|| {
            UcscError::not_found(
                "locale_unassign_org",
                format!("no org assignment at '{}'", dn),
            )
        })?;
        self.session.remove_mo(mo)?;
        self.session.commit()?;
        Ok(())
    }

    /// Assigns the locale to a domain group.
    pub fn assign_domaingroup(
        &self,
        locale_name: &str,
        group: &DomainGroupAssignment,
    ) -> Result<ManagedObject> {
        let locale_dn = self.locale_dn(locale_name);
        if self.session.query_dn(&locale_dn)?.is_none() {
            return Err(UcscError::not_found(
                "locale_assign_domaingroup",
                format!("locale '{}' does not exist", locale_dn),
            ));
        }

        let mut mo = ManagedObject::child_of(
            "aaaDomainGroup",
            &locale_dn,
            format!("domaingroup-{}", group.name),
        );
        mo.set_prop("name", &group.name);
        mo.set_prop("domaingroup_dn", &group.domaingroup_dn);
        mo.set_prop("descr", &group.descr);
        mo.set_prop_multiple(&group.extra);

        self.session.add_mo(mo.clone(), true)?;
        self.session.commit()?;
        Ok(mo)
    }

    pub fn unassign_domaingroup(&self, locale_name: &str, name: &str) -> Result<()> {
        let dn = format!("{}/domaingroup-{}", self.locale_dn(locale_name), name);
        let mo = self.session.query_dn(&dn)?.ok_or_else(|| {
            UcscError::not_found(
                "locale_unassign_domaingroup",
                format!("no domain group assignment at '{}'", dn),
            )
        })?;
        self.session.remove_mo(mo)?;
        self.session.commit()?;
        Ok(())
    }
}
