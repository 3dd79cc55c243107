//! Walks through a typical first-boot admin configuration against the
//! in-memory session: DNS, NTP, SNMP and a local operator account.

use anyhow::Result;
use ucsc_admin::dns::DnsServer;
use ucsc_admin::snmp::{SnmpConfig, SnmpTrap};
use ucsc_admin::timezone::NtpServer;
use ucsc_admin::user::User;
use ucsc_admin::{DnsClient, SnmpClient, TimeZoneClient, UserClient};
use ucsc_core::testing::InMemorySession;
use ucsc_core::{ManagedObject, PropSet};

fn main() -> Result<()> {
    env_logger::init();

    let session = InMemorySession::new();
    let base = "org-root/deviceprofile-default";
    session.seed(ManagedObject::new("orgDeviceProfile", base));
    session.seed(ManagedObject::new("commDns", format!("{}/dns-svc", base)));
    session.seed(ManagedObject::new("commSnmp", format!("{}/snmp-svc", base)));
    session.seed(ManagedObject::new(
        "commDateTime",
        format!("{}/datetime-svc", base),
    ));

    let dns = DnsClient::new(&session);
    dns.server_add(&DnsServer {
        name: "8.8.8.8".into(),
        descr: "primary resolver".into(),
        ..Default::default()
    })?;
    dns.set_domain_name("example.com", &PropSet::new())?;

    let time = TimeZoneClient::new(&session);
    time.set("America/Los_Angeles (Pacific Time)", &PropSet::new())?;
    time.ntp_server_create(&NtpServer {
        name: "pool.ntp.org".into(),
        ..Default::default()
    })?;

    let snmp = SnmpClient::new(&session);
    snmp.enable(&SnmpConfig {
        community: Some("public".into()),
        sys_contact: Some("netops".into()),
        ..Default::default()
    })?;
    snmp.trap_add(&SnmpTrap {
        hostname: "10.0.0.50".into(),
        community: "public".into(),
        ..Default::default()
    })?;

    let users = UserClient::new(&session);
    let operator = users.create(&User {
        name: "operator".into(),
        pwd: "changeme".into(),
        role: "admin".into(),
        ..Default::default()
    })?;

    println!("configured {} objects, operator at {}", session.object_count(), operator.dn());
    Ok(())
}
