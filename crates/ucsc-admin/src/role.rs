//! Role management

use serde::{Deserialize, Serialize};
use ucsc_core::dn::{device_profile_dn, DEFAULT_DEVICE_PROFILE};
use ucsc_core::{ManagedObject, PropSet, Result, UcscError, UcscSession};

/// A role with a comma separated privilege list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Role {
    pub name: String,
    pub priv_: String,
    pub descr: String,
    pub extra: PropSet,
}

pub struct RoleClient<'a, S> {
    session: &'a S,
    base_dn: String,
}

impl<'a, S: UcscSession> RoleClient<'a, S> {
    pub fn new(session: &'a S) -> Self {
        Self::with_device_profile(session, DEFAULT_DEVICE_PROFILE)
    }

    pub fn with_device_profile(session: &'a S, profile: &str) -> Self {
        RoleClient {
            session,
            base_dn: device_profile_dn(profile),
        }
    }

    fn role_dn(&self, name: &str) -> String {
        format!("{}/role-{}", self.base_dn, name)
    }

    pub fn create(&self, role: &Role) -> Result<ManagedObject> {
        let mut mo =
            ManagedObject::child_of("aaaRole", &self.base_dn, format!("role-{}", role.name));
        mo.set_prop("name", &role.name);
        mo.set_prop("priv", &role.priv_);
        mo.set_prop("descr", &role.descr);
        mo.set_prop_multiple(&role.extra);

        self.session.add_mo(mo.clone(), true)?;
        self.session.commit()?;
        Ok(mo)
    }

    pub fn exists(&self, name: &str, props: &PropSet) -> Result<Option<ManagedObject>> {
        let mo = self.session.query_dn(&self.role_dn(name))?;
        Ok(mo.filter(|mo| mo.check_prop_match(props)))
    }

    pub fn modify(&self, name: &str, props: &PropSet) -> Result<ManagedObject> {
        let dn = self.role_dn(name);
        let mut mo = self.session.query_dn(&dn)?.ok_or_else(|| {
            UcscError::not_found("role_modify", format!("role '{}' does not exist", dn))
        })?;
        mo.set_prop_multiple(props);

        self.session.set_mo(mo.clone())?;
        self.session.commit()?;
        Ok(mo)
    }

    pub fn delete(&self, name: &str) -> Result<()> {
        let dn = self.role_dn(name);
        let mo = self.session.query_dn(&dn)?.ok_or_else(|| {
            UcscError::not_found("role_delete", format!("role '{}' does not exist", dn))
        })?;
        self.session.remove_mo(mo)?;
        self.session.commit()?;
        Ok(())
    }
}
