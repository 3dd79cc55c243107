//! MAC identity pools

use ucsc_core::dn::ORG_ROOT;
use ucsc_core::{ManagedObject, PropSet, Result, UcscError, UcscSession};

pub struct MacPoolClient<'a, S> {
    session: &'a S,
    org_dn: String,
}

impl<'a, S: UcscSession> MacPoolClient<'a, S> {
    pub fn new(session: &'a S) -> Self {
        Self::with_org(session, ORG_ROOT)
    }

    pub fn with_org(session: &'a S, org_dn: &str) -> Self {
        MacPoolClient {
            session,
            org_dn: org_dn.to_string(),
        }
    }

    fn pool_dn(&self, name: &str) -> String {
        format!("{}/mac-pool-{}", self.org_dn, name)
    }

    /// Creates the pool with its initial address block in one transaction.
    pub fn create(
        &self,
        name: &str,
        r_from: &str,
        to: &str,
        descr: Option<&str>,
        extra: &PropSet,
    ) -> Result<ManagedObject> {
        if self.session.query_dn(&self.org_dn)?.is_none() {
            return Err(UcscError::not_found(
                "mac_pool_create",
                format!("org '{}' does not exist", self.org_dn),
            ));
        }

        let mut mo = ManagedObject::new("macpoolPool", self.pool_dn(name));
        mo.set_prop("name", name);
        mo.set_prop_opt("descr", descr);
        mo.set_prop_multiple(extra);

        let mut block = ManagedObject::child_of(
            "macpoolBlock",
            mo.dn(),
            format!("block-{}-{}", r_from, to),
        );
        block.set_prop("r_from", r_from);
        block.set_prop("to", to);
        mo.add_child(block);

        self.session.add_mo(mo.clone(), true)?;
        self.session.commit()?;
        Ok(mo)
    }

    pub fn get(&self, name: &str) -> Result<Option<ManagedObject>> {
        Ok(self.session.query_dn(&self.pool_dn(name))?)
    }

    /// Checks pool properties, and that the block covering the given range
    /// exists. An absent block is a plain `None`, never an error.
    pub fn exists(
        &self,
        name: &str,
        props: &PropSet,
        range: Option<(&str, &str)>,
    ) -> Result<Option<ManagedObject>> {
        let mo = match self.get(name)? {
            Some(mo) if mo.check_prop_match(props) => mo,
            _ => return Ok(None),
        };
        if let Some((r_from, to)) = range {
            let block_dn = format!("{}/block-{}-{}", mo.dn(), r_from, to);
            if self.session.query_dn(&block_dn)?.is_none() {
                return Ok(None);
            }
        }
        Ok(Some(mo))
    }

    pub fn remove(&self, name: &str) -> Result<()> {
        let mo = self.get(name)?.ok_or_else(|| {
            UcscError::not_found(
                "mac_pool_remove",
                format!("mac pool '{}' does not exist", name),
            )
        })?;
        self.session.remove_mo(mo)?;
        self.session.commit()?;
        Ok(())
    }
}
