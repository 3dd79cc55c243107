//! Feature tests against the in-memory session.
//!
//! Each setup seeds the root org and the root domain group's fabric clouds,
//! mirroring what a freshly installed system exposes on the LAN side.

use ucsc_core::testing::InMemorySession;
use ucsc_core::{ManagedObject, PropSet, UcscError, UcscSession};

use crate::dynamic_vnic_conn_policy::{DynamicVnicConnPolicy, DynamicVnicConnPolicyClient};
use crate::ip_pool::{IpBlock, IpBlockMatch, IpPoolClient};
use crate::lan_conn_policy::{IscsiVnic, LanConnPolicyClient, Vnic};
use crate::mac_pool::MacPoolClient;
use crate::mcast_policy::{McastPolicy, McastPolicyClient};
use crate::nwctrl_policy::{NwctrlPolicy, NwctrlPolicyClient};
use crate::qos::{QosPolicy, QosPolicyClient};
use crate::usnic_conn_policy::{UsnicConnPolicy, UsnicConnPolicyClient};
use crate::vlan::{Vlan, VlanClient};
use crate::vmq_conn_policy::{VmqConnPolicy, VmqConnPolicyClient};

fn seed(session: &InMemorySession, class_id: &str, dn: &str) {
    session.seed(ManagedObject::new(class_id, dn));
}

fn session() -> InMemorySession {
    let session = InMemorySession::new();
    seed(&session, "orgOrg", "org-root");
    seed(&session, "orgDomainGroup", "domaingroup-root");
    seed(&session, "fabricEp", "domaingroup-root/fabric");
    seed(&session, "fabricLanCloud", "domaingroup-root/fabric/lan");
    seed(&session, "fabricEthEstcCloud", "domaingroup-root/fabric/eth-estc");
    session
}

#[test]
fn ip_pool_with_block() {
    let session = session();
    let client = IpPoolClient::new(&session);

    client.create("test_ippool", Some("default"), &PropSet::new()).unwrap();
    client
        .block_add(
            "test_ippool",
            &IpBlock {
                r_from: "1.1.1.1".into(),
                to: "1.1.1.10".into(),
                subnet: "255.255.255.0".into(),
                def_gw: "1.1.1.254".into(),
                ..Default::default()
            },
        )
        .unwrap();

    let found = client
        .exists(
            "test_ippool",
            &PropSet::new().with("descr", "default"),
            Some(&IpBlockMatch {
                r_from: "1.1.1.1".into(),
                to: "1.1.1.10".into(),
                subnet: Some("255.255.255.0".into()),
                def_gw: Some("1.1.1.254".into()),
                ..Default::default()
            }),
        )
        .unwrap();
    assert!(found.is_some());

    // an absent block is a miss, not an error
    let found = client
        .exists(
            "test_ippool",
            &PropSet::new(),
            Some(&IpBlockMatch {
                r_from: "2.2.2.2".into(),
                to: "2.2.2.10".into(),
                ..Default::default()
            }),
        )
        .unwrap();
    assert!(found.is_none());

    client.remove("test_ippool").unwrap();
    assert!(client.get("test_ippool").unwrap().is_none());
}

#[test]
fn ip_pool_create_requires_org() {
    let session = session();
    let client = IpPoolClient::with_org(&session, "org-root/org-ghost");
    let err = client.create("p", None, &PropSet::new()).unwrap_err();
    assert!(matches!(err, UcscError::NotFound { .. }));
}

#[test]
fn ip_block_add_requires_pool() {
    let session = session();
    let client = IpPoolClient::new(&session);
    let err = client.block_add("ghost", &IpBlock::default()).unwrap_err();
    assert!(matches!(err, UcscError::NotFound { .. }));
}

#[test]
fn mac_pool_block_created_with_pool() {
    let session = session();
    let client = MacPoolClient::new(&session);

    client
        .create(
            "test_macpool",
            "00:25:B5:00:00:00",
            "00:25:B5:00:00:03",
            None,
            &PropSet::new(),
        )
        .unwrap();
    let found = client
        .exists(
            "test_macpool",
            &PropSet::new(),
            Some(("00:25:B5:00:00:00", "00:25:B5:00:00:03")),
        )
        .unwrap();
    assert!(found.is_some());

    // removing the pool takes the block subtree with it
    client.remove("test_macpool").unwrap();
    assert!(session
        .query_dn("org-root/mac-pool-test_macpool/block-00:25:B5:00:00:00-00:25:B5:00:00:03")
        .unwrap()
        .is_none());
}

#[test]
fn mcast_policy_lifecycle() {
    let session = session();
    let client = McastPolicyClient::new(&session);

    client
        .create(&McastPolicy {
            name: "my_mcast".into(),
            snooping_state: "enabled".into(),
            ..Default::default()
        })
        .unwrap();
    assert!(client
        .exists(
            "my_mcast",
            &PropSet::new()
                .with("querier_state", "disabled")
                .with("snooping_state", "enabled"),
        )
        .unwrap()
        .is_some());

    client.delete("my_mcast").unwrap();
    let err = client.delete("my_mcast").unwrap_err();
    assert!(matches!(err, UcscError::NotFound { .. }));
}

#[test]
fn nwctrl_policy_forge_checked_on_mac_sec_child() {
    let session = session();
    let client = NwctrlPolicyClient::new(&session);

    client
        .create(&NwctrlPolicy {
            name: "sample_nwctrl".into(),
            cdp: "enabled".into(),
            forge: "deny".into(),
            ..Default::default()
        })
        .unwrap();

    let found = client
        .exists(
            "sample_nwctrl",
            &PropSet::new().with("cdp", "enabled").with("forge", "deny"),
        )
        .unwrap();
    assert!(found.is_some());

    let found = client
        .exists("sample_nwctrl", &PropSet::new().with("forge", "allow"))
        .unwrap();
    assert!(found.is_none());

    client.delete("sample_nwctrl").unwrap();
}

#[test]
fn nwctrl_policy_missing_mac_sec_is_inconsistent() {
    let session = session();
    seed(&session, "nwctrlDefinition", "org-root/nwctrl-bare");
    let client = NwctrlPolicyClient::new(&session);
    let err = client
        .exists("bare", &PropSet::new().with("forge", "allow"))
        .unwrap_err();
    assert!(matches!(err, UcscError::Inconsistent { .. }));
}

#[test]
fn qos_policy_props_split_across_egress() {
    let session = session();
    let client = QosPolicyClient::new(&session);

    client
        .add(&QosPolicy {
            name: "sample_qos".into(),
            descr: Some("gold class".into()),
            prio: "gold".into(),
            ..Default::default()
        })
        .unwrap();

    let found = client
        .exists(
            "sample_qos",
            &PropSet::new()
                .with("descr", "gold class")
                .with("prio", "gold")
                .with("rate", "line-rate"),
        )
        .unwrap();
    assert!(found.is_some());

    let found = client
        .exists("sample_qos", &PropSet::new().with("prio", "platinum"))
        .unwrap();
    assert!(found.is_none());

    client.remove("sample_qos").unwrap();
}

#[test]
fn qos_policy_missing_egress_is_inconsistent() {
    let session = session();
    seed(&session, "epqosDefinition", "org-root/ep-qos-bare");
    let client = QosPolicyClient::new(&session);
    let err = client
        .exists("bare", &PropSet::new().with("prio", "gold"))
        .unwrap_err();
    assert!(matches!(err, UcscError::Inconsistent { .. }));
}

#[test]
fn lan_conn_policy_with_vnic() {
    let session = session();
    let client = LanConnPolicyClient::new(&session);

    client
        .create("lcp_test_pol", None, &PropSet::new())
        .unwrap();
    client
        .vnic_add(
            "lcp_test_pol",
            &Vnic {
                name: "test_vnic".into(),
                mtu: "2240".into(),
                ..Default::default()
            },
        )
        .unwrap();
    assert!(client
        .vnic_exists("lcp_test_pol", "test_vnic", &PropSet::new().with("mtu", "2240"))
        .unwrap()
        .is_some());

    client.vnic_delete("lcp_test_pol", "test_vnic").unwrap();
    client.delete("lcp_test_pol").unwrap();
}

#[test]
fn vnic_name_sourced_cdn_clears_cdn_name() {
    let session = session();
    let client = LanConnPolicyClient::new(&session);
    client.create("pol", None, &PropSet::new()).unwrap();

    let mo = client
        .vnic_add(
            "pol",
            &Vnic {
                name: "v0".into(),
                admin_cdn_name: Some("custom".into()),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(mo.prop("admin_cdn_name"), Some(""));

    let mo = client
        .vnic_add(
            "pol",
            &Vnic {
                name: "v1".into(),
                cdn_source: "user-defined".into(),
                admin_cdn_name: Some("custom".into()),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(mo.prop("admin_cdn_name"), Some("custom"));
}

#[test]
fn vnic_add_rejects_unknown_cdn_source() {
    let session = session();
    let client = LanConnPolicyClient::new(&session);
    client.create("pol", None, &PropSet::new()).unwrap();
    let err = client
        .vnic_add(
            "pol",
            &Vnic {
                name: "v0".into(),
                cdn_source: "guessed".into(),
                ..Default::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, UcscError::InvalidArgument { .. }));
}

#[test]
fn iscsi_vnic_carries_vlan_child_and_is_strict_create() {
    let session = session();
    let client = LanConnPolicyClient::new(&session);
    client.create("pol", None, &PropSet::new()).unwrap();

    client
        .iscsi_vnic_add(
            "pol",
            &IscsiVnic {
                name: "test_iscsi".into(),
                vnic_name: Some("vnic1".into()),
                ..Default::default()
            },
        )
        .unwrap();
    let vlan = session
        .query_dn("org-root/lan-conn-pol-pol/iscsi-test_iscsi/vlan")
        .unwrap()
        .unwrap();
    assert_eq!(vlan.prop("vlan_name"), Some("default"));

    let err = client
        .iscsi_vnic_add(
            "pol",
            &IscsiVnic {
                name: "test_iscsi".into(),
                ..Default::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, UcscError::Session(_)));

    client.iscsi_vnic_delete("pol", "test_iscsi").unwrap();
    assert!(client
        .iscsi_vnic_exists("pol", "test_iscsi", &PropSet::new())
        .unwrap()
        .is_none());
}

#[test]
fn usnic_vmq_and_dynamic_policies() {
    let session = session();

    let usnic = UsnicConnPolicyClient::new(&session);
    let mo = usnic
        .create(&UsnicConnPolicy {
            name: "samp_usnic".into(),
            usnic_count: "32".into(),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(mo.prop("adaptor_profile_name"), Some("global-default"));
    usnic.delete("samp_usnic").unwrap();

    let vmq = VmqConnPolicyClient::new(&session);
    let mo = vmq
        .create(&VmqConnPolicy {
            name: "samp_vmq".into(),
            intr_count: "32".into(),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(mo.prop("vmq_count"), Some("64"));
    assert!(vmq
        .exists("samp_vmq", &PropSet::new().with("intr_count", "32"))
        .unwrap()
        .is_some());
    vmq.delete("samp_vmq").unwrap();

    let dynamic = DynamicVnicConnPolicyClient::new(&session);
    let mo = dynamic
        .create(&DynamicVnicConnPolicy {
            name: "test_dynavnic".into(),
            dynamic_eth: "32".into(),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(mo.prop("protection"), Some("protected"));
    dynamic.delete("test_dynavnic").unwrap();
    let err = dynamic.delete("test_dynavnic").unwrap_err();
    assert!(matches!(err, UcscError::NotFound { .. }));
}

#[test]
fn vlan_under_lan_cloud() {
    let session = session();
    let client = VlanClient::new(&session);

    let mo = client
        .create(&Vlan {
            name: "vlan-lab".into(),
            id: "123".into(),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(mo.dn(), "domaingroup-root/fabric/lan/net-vlan-lab");

    assert!(client
        .exists("vlan-lab", "lan", &PropSet::new().with("id", "123"))
        .unwrap()
        .is_some());
    // not visible on the appliance cloud
    assert!(client.exists("vlan-lab", "appliance", &PropSet::new()).unwrap().is_none());

    client.delete("vlan-lab", "lan").unwrap();
}

#[test]
fn appliance_vlan_under_eth_estc() {
    let session = session();
    let client = VlanClient::new(&session);
    let mo = client
        .create(&Vlan {
            name: "storage".into(),
            id: "77".into(),
            vlan_type: "appliance".into(),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(mo.dn(), "domaingroup-root/fabric/eth-estc/net-storage");
}

#[test]
fn vlan_rejects_unknown_type() {
    let session = session();
    let client = VlanClient::new(&session);
    let err = client
        .create(&Vlan {
            name: "x".into(),
            id: "1".into(),
            vlan_type: "wan".into(),
            ..Default::default()
        })
        .unwrap_err();
    assert!(matches!(err, UcscError::InvalidArgument { .. }));
}

#[test]
fn vlan_type_checked_before_domain_group_lookup() {
    // nothing seeded: a bad type must fail locally, never against the tree
    let session = InMemorySession::new();
    let client = VlanClient::new(&session);
    let err = client.get("x", "wan").unwrap_err();
    assert!(matches!(err, UcscError::InvalidArgument { .. }));
    let err = client.delete("x", "wan").unwrap_err();
    assert!(matches!(err, UcscError::InvalidArgument { .. }));
}

#[test]
fn vlan_requires_domain_group() {
    let session = session();
    let client = VlanClient::with_domain_group(&session, "root/ghost");
    let err = client
        .create(&Vlan {
            name: "x".into(),
            id: "1".into(),
            ..Default::default()
        })
        .unwrap_err();
    assert!(matches!(err, UcscError::NotFound { .. }));
}
