//! DN construction helpers
//!
//! DN formats are a wire contract with the remote object tree: every prefix
//! token here must match what the management plane expects byte for byte.

/// Name of the device profile the admin features target by default.
pub const DEFAULT_DEVICE_PROFILE: &str = "default";

/// DN of the root organization, the default parent for LAN features.
pub const ORG_ROOT: &str = "org-root";

/// DN of the device profile holding the admin service objects.
pub fn device_profile_dn(name: &str) -> String {
    format!("org-root/deviceprofile-{}", name)
}

/// DN of a domain group given its `root[/child[/...]]` path.
pub fn domain_group_dn(path: &str) -> String {
    path.split('/')
        .map(|group| format!("domaingroup-{}", group))
        .collect::<Vec<_>>()
        .join("/")
}
