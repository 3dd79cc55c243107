//! TFTP core file exporter

use ucsc_core::dn::{device_profile_dn, DEFAULT_DEVICE_PROFILE};
use ucsc_core::{ManagedObject, PropSet, Result, UcscSession};

pub struct CoreExporterClient<'a, S> {
    session: &'a S,
    base_dn: String,
}

impl<'a, S: UcscSession> CoreExporterClient<'a, S> {
    pub fn new(session: &'a S) -> Self {
        Self::with_device_profile(session, DEFAULT_DEVICE_PROFILE)
    }

    pub fn with_device_profile(session: &'a S, profile: &str) -> Self {
        CoreExporterClient {
            session,
            base_dn: device_profile_dn(profile),
        }
    }

    fn target(&self) -> ManagedObject {
        ManagedObject::child_of(
            "sysdebugAutoCoreFileExportTarget",
            &self.base_dn,
            "file-export",
        )
    }

    /// Points core file export at a tftp server. The target object is created
    /// or updated in place; no prior read is needed.
    pub fn enable(
        &self,
        hostname: &str,
        path: &str,
        port: &str,
        descr: Option<&str>,
        extra: &PropSet,
    ) -> Result<ManagedObject> {
        let mut mo = self.target();
        mo.set_prop("hostname", hostname);
        mo.set_prop("path", path);
        mo.set_prop("port", port);
        mo.set_prop_opt("descr", descr);
        mo.set_prop("admin_state", "enabled");
        mo.set_prop_multiple(extra);

        self.session.add_mo(mo.clone(), true)?;
        self.session.commit()?;
        Ok(mo)
    }

    pub fn disable(&self) -> Result<ManagedObject> {
        let mut mo = self.target();
        mo.set_prop("admin_state", "disabled");

        self.session.add_mo(mo.clone(), true)?;
        self.session.commit()?;
        Ok(mo)
    }
}
