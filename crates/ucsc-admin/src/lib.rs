//! UCS Central Admin
//!
//! Configuration clients for the administrative services of a UCS Central
//! device profile: authentication domains and backends, accounts, DNS, NTP,
//! SNMP, syslog, call-home, PKI and core export.
//!
//! Every client borrows a [`ucsc_core::UcscSession`] and targets one device
//! profile (`org-root/deviceprofile-default` unless overridden). Mutating
//! operations stage exactly one change set and commit it; lookups never
//! commit.

pub mod auth_domain;
pub mod callhome;
pub mod core_exporter;
pub mod dns;
pub mod keyring;
pub mod ldap;
pub mod locale;
pub mod radius;
pub mod role;
pub mod snmp;
pub mod syslog;
pub mod tacacs;
pub mod timezone;
pub mod user;

#[cfg(test)]
mod tests;

pub use auth_domain::AuthDomainClient;
pub use callhome::CallHomeClient;
pub use core_exporter::CoreExporterClient;
pub use dns::DnsClient;
pub use keyring::KeyRingClient;
pub use ldap::LdapClient;
pub use locale::LocaleClient;
pub use radius::RadiusClient;
pub use role::RoleClient;
pub use snmp::SnmpClient;
pub use syslog::SyslogClient;
pub use tacacs::TacacsClient;
pub use timezone::TimeZoneClient;
pub use user::UserClient;
