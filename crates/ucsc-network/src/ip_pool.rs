//! IP identity pools and their address blocks

use serde::{Deserialize, Serialize};
use ucsc_core::dn::ORG_ROOT;
use ucsc_core::{ManagedObject, PropSet, Result, UcscError, UcscSession};

/// An address block under an IP pool. The block's RN embeds the range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpBlock {
    pub r_from: String,
    pub to: String,
    pub subnet: String,
    pub def_gw: String,
    pub prim_dns: String,
    pub sec_dns: String,
    pub scope: String,
    pub extra: PropSet,
}

impl Default for IpBlock {
    fn default() -> Self {
        IpBlock {
            r_from: String::new(),
            to: String::new(),
            subnet: String::new(),
            def_gw: String::new(),
            prim_dns: "0.0.0.0".into(),
            sec_dns: "0.0.0.0".into(),
            scope: "public".into(),
            extra: PropSet::new(),
        }
    }
}

/// Block properties checked by [`IpPoolClient::exists`] when a range is
/// supplied. Unset fields are not compared.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IpBlockMatch {
    pub r_from: String,
    pub to: String,
    pub subnet: Option<String>,
    pub def_gw: Option<String>,
    pub prim_dns: Option<String>,
    pub sec_dns: Option<String>,
    pub scope: Option<String>,
}

pub struct IpPoolClient<'a, S> {
    session: &'a S,
    org_dn: String,
}

impl<'a, S: UcscSession> IpPoolClient<'a, S> {
    pub fn new(session: &'a S) -> Self {
        Self::with_org(session, ORG_ROOT)
    }

    pub fn with_org(session: &'a S, org_dn: &str) -> Self {
        IpPoolClient {
            session,
            org_dn: org_dn.to_string(),
        }
    }

    fn pool_dn(&self, name: &str) -> String {
        format!("{}/ip-pool-{}", self.org_dn, name)
    }

    pub fn create(&self, name: &str, descr: Option<&str>, extra: &PropSet) -> Result<ManagedObject> {
        if self.session.query_dn(&self.org_dn)?.is_none() {
            return Err(UcscError::not_found(
                "ip_pool_create",
                format!("org '{}' does not exist", self.org_dn),
            ));
        }

        let mut mo = ManagedObject::new("ippoolPool", self.pool_dn(name));
        mo.set_prop("name", name);
        mo.set_prop_opt("descr", descr);
        mo.set_prop_multiple(extra);

        self.session.add_mo(mo.clone(), true)?;
        self.session.commit()?;
        Ok(mo)
    }

    /// Adds an address block to an existing pool.
    pub fn block_add(&self, pool_name: &str, block: &IpBlock) -> Result<ManagedObject> {
        let pool_dn = self.pool_dn(pool_name);
        if self.session.query_dn(&pool_dn)?.is_none() {
            return Err(UcscError::not_found(
                "ip_block_add",
                format!("ip pool '{}' does not exist", pool_dn),
            ));
        }

        let mut mo = ManagedObject::child_of(
            "ippoolBlock",
            &pool_dn,
            format!("block-{}-{}", block.r_from, block.to),
        );
        mo.set_prop("r_from", &block.r_from);
        mo.set_prop("to", &block.to);
        mo.set_prop("subnet", &block.subnet);
        mo.set_prop("def_gw", &block.def_gw);
        mo.set_prop("prim_dns", &block.prim_dns);
        mo.set_prop("sec_dns", &block.sec_dns);
        mo.set_prop("scope", &block.scope);
        mo.set_prop_multiple(&block.extra);

        self.session.add_mo(mo.clone(), true)?;
        self.session.commit()?;
        Ok(mo)
    }

    pub fn get(&self, name: &str) -> Result<Option<ManagedObject>> {
        Ok(self.session.query_dn(&self.pool_dn(name))?)
    }

    /// Checks pool properties, and block properties when a range is given.
    /// An absent block is a plain `None`, never an error.
    pub fn exists(
        &self,
        name: &str,
        props: &PropSet,
        block: Option<&IpBlockMatch>,
    ) -> Result<Option<ManagedObject>> {
        let mo = match self.get(name)? {
            Some(mo) if mo.check_prop_match(props) => mo,
            _ => return Ok(None),
        };

        if let Some(block) = block {
            let block_dn = format!("{}/block-{}-{}", mo.dn(), block.r_from, block.to);
            let block_mo = match self.session.query_dn(&block_dn)? {
                Some(block_mo) => block_mo,
                None => return Ok(None),
            };
            let mut block_props = PropSet::new();
            block_props.set_opt("subnet", block.subnet.as_deref());
            block_props.set_opt("def_gw", block.def_gw.as_deref());
            block_props.set_opt("prim_dns", block.prim_dns.as_deref());
            block_props.set_opt("sec_dns", block.sec_dns.as_deref());
            block_props.set_opt("scope", block.scope.as_deref());
            if !block_mo.check_prop_match(&block_props) {
                return Ok(None);
            }
        }
        Ok(Some(mo))
    }

    pub fn remove(&self, name: &str) -> Result<()> {
        let mo = self.get(name)?.ok_or_else(|| {
            UcscError::not_found("ip_pool_remove", format!("ip pool '{}' does not exist", name))
        })?;
        self.session.remove_mo(mo)?;
        self.session.commit()?;
        Ok(())
    }
}
