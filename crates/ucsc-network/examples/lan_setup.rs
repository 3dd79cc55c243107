//! Builds a small LAN configuration against the in-memory session: a VLAN,
//! a MAC pool and a LAN connectivity policy with one vNIC.

use anyhow::Result;
use ucsc_core::testing::InMemorySession;
use ucsc_core::{ManagedObject, PropSet};
use ucsc_network::lan_conn_policy::Vnic;
use ucsc_network::vlan::Vlan;
use ucsc_network::{LanConnPolicyClient, MacPoolClient, VlanClient};

fn main() -> Result<()> {
    env_logger::init();

    let session = InMemorySession::new();
    session.seed(ManagedObject::new("orgOrg", "org-root"));
    session.seed(ManagedObject::new("orgDomainGroup", "domaingroup-root"));
    session.seed(ManagedObject::new("fabricEp", "domaingroup-root/fabric"));
    session.seed(ManagedObject::new(
        "fabricLanCloud",
        "domaingroup-root/fabric/lan",
    ));

    let vlans = VlanClient::new(&session);
    let vlan = vlans.create(&Vlan {
        name: "app-tier".into(),
        id: "210".into(),
        ..Default::default()
    })?;
    println!("vlan at {}", vlan.dn());

    let pools = MacPoolClient::new(&session);
    pools.create(
        "app-macs",
        "00:25:B5:00:00:00",
        "00:25:B5:00:00:3F",
        Some("app tier addresses"),
        &PropSet::new(),
    )?;

    let lcp = LanConnPolicyClient::new(&session);
    lcp.create("app-lcp", None, &PropSet::new())?;
    let vnic = lcp.vnic_add(
        "app-lcp",
        &Vnic {
            name: "eth0".into(),
            mtu: "9000".into(),
            ident_pool_name: Some("app-macs".into()),
            ..Default::default()
        },
    )?;
    println!("vnic at {}", vnic.dn());

    Ok(())
}
