//! Local user accounts, their roles and locales, and the password policy

use serde::{Deserialize, Serialize};
use ucsc_core::dn::{device_profile_dn, DEFAULT_DEVICE_PROFILE};
use ucsc_core::{ManagedObject, PropSet, Result, UcscError, UcscSession};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub pwd: String,
    pub first_name: String,
    pub last_name: String,
    pub descr: String,
    pub clear_pwd_history: String,
    pub phone: String,
    pub email: String,
    pub expires: String,
    pub pwd_life_time: String,
    pub expiration: String,
    pub enc_pwd: String,
    pub account_status: String,
    /// Initial role created together with the account.
    pub role: String,
    pub role_descr: String,
    pub extra: PropSet,
}

impl Default for User {
    fn default() -> Self {
        User {
            name: String::new(),
            pwd: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            descr: String::new(),
            clear_pwd_history: "no".into(),
            phone: String::new(),
            email: String::new(),
            expires: "no".into(),
            pwd_life_time: "no-password-expire".into(),
            expiration: "never".into(),
            enc_pwd: String::new(),
            account_status: "active".into(),
            role: "read-only".into(),
            role_descr: String::new(),
            extra: PropSet::new(),
        }
    }
}

/// Password profile updates; unset fields stay untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PasswordProfileUpdate {
    pub change_interval: Option<String>,
    pub no_change_interval: Option<String>,
    /// `disable` or `enable`.
    pub change_during_interval: Option<String>,
    pub change_count: Option<String>,
    pub history_count: Option<String>,
    pub expiration_warn_time: Option<String>,
    pub descr: Option<String>,
    pub extra: PropSet,
}

pub struct UserClient<'a, S> {
    session: &'a S,
    base_dn: String,
}

impl<'a, S: UcscSession> UserClient<'a, S> {
    pub fn new(session: &'a S) -> Self {
        Self::with_device_profile(session, DEFAULT_DEVICE_PROFILE)
    }

    pub fn with_device_profile(session: &'a S, profile: &str) -> Self {
        UserClient {
            session,
            base_dn: device_profile_dn(profile),
        }
    }

    fn user_dn(&self, name: &str) -> String {
        format!("{}/user-{}", self.base_dn, name)
    }

    fn pwd_profile_dn(&self) -> String {
        format!("{}/pwd-profile", self.base_dn)
    }

    /// Creates a user and its initial role in one transaction.
    pub fn create(&self, user: &User) -> Result<ManagedObject> {
        let dn = self.user_dn(&user.name);
        let mut mo = ManagedObject::new("aaaUser", &dn);
        mo.set_prop("name", &user.name);
        mo.set_prop("first_name", &user.first_name);
        mo.set_prop("last_name", &user.last_name);
        mo.set_prop("descr", &user.descr);
        mo.set_prop("clear_pwd_history", &user.clear_pwd_history);
        mo.set_prop("phone", &user.phone);
        mo.set_prop("email", &user.email);
        mo.set_prop("pwd", &user.pwd);
        mo.set_prop("expires", &user.expires);
        mo.set_prop("pwd_life_time", &user.pwd_life_time);
        mo.set_prop("expiration", &user.expiration);
        mo.set_prop("enc_pwd", &user.enc_pwd);
        mo.set_prop("account_status", &user.account_status);
        mo.set_prop_multiple(&user.extra);

        let mut role = ManagedObject::child_of("aaaUserRole", &dn, format!("role-{}", user.role));
        role.set_prop("name", &user.role);
        role.set_prop("descr", &user.role_descr);
        mo.add_child(role);

        self.session.add_mo(mo.clone(), true)?;
        self.session.commit()?;
        Ok(mo)
    }

    pub fn exists(&self, name: &str, props: &PropSet) -> Result<Option<ManagedObject>> {
        let mo = self.session.query_dn(&self.user_dn(name))?;
        Ok(mo.filter(|mo| mo.check_prop_match(props)))
    }

    pub fn modify(&self, name: &str, props: &PropSet) -> Result<ManagedObject> {
        let dn = self.user_dn(name);
        let mut mo = self.session.query_dn(&dn)?.ok_or_else(|| {
            UcscError::not_found("user_modify", format!("user '{}' does not exist", dn))
        })?;
        mo.set_prop_multiple(props);

        self.session.set_mo(mo.clone())?;
        self.session.commit()?;
        Ok(mo)
    }

    pub fn delete(&self, name: &str) -> Result<()> {
        let dn = self.user_dn(name);
        let mo = self.session.query_dn(&dn)?.ok_or_else(|| {
            UcscError::not_found("user_delete", format!("user '{}' does not exist", dn))
        })?;
        self.session.remove_mo(mo)?;
        self.session.commit()?;
        Ok(())
    }

    pub fn add_role(
        &self,
        user_name: &str,
        name: &str,
        descr: &str,
        extra: &PropSet,
    ) -> Result<ManagedObject> {
        let user_dn = self.user_dn(user_name);
        if self.session.query_dn(&user_dn)?.is_none() {
            return Err(UcscError::not_found(
                "user_add_role",
                format!("user '{}' does not exist", user_dn),
            ));
        }

        let mut mo = ManagedObject::child_of("aaaUserRole", &user_dn, format!("role-{}", name));
        mo.set_prop("name", name);
        mo.set_prop("descr", descr);
        mo.set_prop_multiple(extra);

        self.session.add_mo(mo.clone(), true)?;
        self.session.commit()?;
        Ok(mo)
    }

    pub fn role_exists(
        &self,
        user_name: &str,
        name: &str,
        props: &PropSet,
    ) -> Result<Option<ManagedObject>> {
        let dn = format!("{}/role-{}", self.user_dn(user_name), name);
        let mo = self.session.query_dn(&dn)?;
        Ok(mo.filter(|mo| mo.check_prop_match(props)))
    }

    pub fn remove_role(&self, user_name: &str, name: &str) -> Result<()> {
        let dn = format!("{}/role-{}", self.user_dn(user_name), name);
        let mo = self.session.query_dn(&dn)?.ok_or_else(|| {
            UcscError::not_found(
                "user_remove_role",
                format!("role '{}' is not associated with user", dn),
            )
        })?;
        self.session.remove_mo(mo)?;
        self.session.commit()?;
        Ok(())
    }

    pub fn add_locale(
        &self,
        user_name: &str,
        name: &str,
        descr: &str,
        extra: &PropSet,
    ) -> Result<ManagedObject> {
        let user_dn = self.user_dn(user_name);
        if self.session.query_dn(&user_dn)?.is_none() {
            return Err(UcscError::not_found(
                "user_add_locale",
                format!("user '{}' does not exist", user_dn),
            ));
        }

        let mut mo = ManagedObject::child_of("aaaUserLocale", &user_dn, format!("locale-{}", name));
        mo.set_prop("name", name);
        mo.set_prop("descr", descr);
        mo.set_prop_multiple(extra);

        self.session.add_mo(mo.clone(), true)?;
        self.session.commit()?;
        Ok(mo)
    }

    pub fn locale_exists(
        &self,
        user_name: &str,
        name: &str,
        props: &PropSet,
    ) -> Result<Option<ManagedObject>> {
        let dn = format!("{}/locale-{}", self.user_dn(user_name), name);
        let mo = self.session.query_dn(&dn)?;
        Ok(mo.filter(|mo| mo.check_prop_match(props)))
    }

    pub fn remove_locale(&self, user_name: &str, name: &str) -> Result<()> {
        let dn = format!("{}/locale-{}", self.user_dn(user_name), name);
        let mo = self.session.query_dn(&dn)?.ok_or_else(|| {
            UcscError::not_found(
                "user_remove_locale",
                format!("locale '{}' is not associated with user", dn),
            )
        })?;
        self.session.remove_mo(mo)?;
        self.session.commit()?;
        Ok(())
    }

    /// Turns on password strength checking for locally authenticated users.
    pub fn password_strength_check(&self, descr: &str, extra: &PropSet) -> Result<ManagedObject> {
        let dn = self.pwd_profile_dn();
        let mut mo = self.session.query_dn(&dn)?.ok_or_else(|| {
            UcscError::not_found(
                "password_strength_check",
                format!("password profile '{}' does not exist", dn),
            )
        })?;
        mo.set_prop("pwd_strength_check", "yes");
        mo.set_prop("descr", descr);
        mo.set_prop_multiple(extra);

        self.session.set_mo(mo.clone())?;
        self.session.commit()?;
        Ok(mo)
    }

    pub fn password_strength_uncheck(&self) -> Result<ManagedObject> {
        let dn = self.pwd_profile_dn();
        let mut mo = self.session.query_dn(&dn)?.ok_or_else(|| {
            UcscError::not_found(
                "password_strength_uncheck",
                format!("password profile '{}' does not exist", dn),
            )
        })?;
        mo.set_prop("pwd_strength_check", "no");

        self.session.set_mo(mo.clone())?;
        self.session.commit()?;
        Ok(mo)
    }

    pub fn password_profile_modify(
        &self,
        update: &PasswordProfileUpdate,
    ) -> Result<ManagedObject> {
        let dn = self.pwd_profile_dn();
        let mut mo = self.session.query_dn(&dn)?.ok_or_else(|| {
            UcscError::not_found(
                "password_profile_modify",
                format!("password profile '{}' does not exist", dn),
            )
        })?;
        mo.set_prop_opt("change_interval", update.change_interval.as_deref());
        mo.set_prop_opt("no_change_interval", update.no_change_interval.as_deref());
        mo.set_prop_opt(
            "change_during_interval",
            update.change_during_interval.as_deref(),
        );
        mo.set_prop_opt("change_count", update.change_count.as_deref());
        mo.set_prop_opt("history_count", update.history_count.as_deref());
        mo.set_prop_opt(
            "expiration_warn_time",
            update.expiration_warn_time.as_deref(),
        );
        mo.set_prop_opt("descr", update.descr.as_deref());
        mo.set_prop_multiple(&update.extra);

        self.session.set_mo(mo.clone())?;
        self.session.commit()?;
        Ok(mo)
    }
}
