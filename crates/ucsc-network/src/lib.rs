//! UCS Central Network
//!
//! Configuration clients for the LAN side of UCS Central: VLANs under a
//! domain group's fabric cloud, IP and MAC identity pools, and the vNIC
//! policies (LAN connectivity, network control, QoS, multicast, usNIC, VMQ
//! and dynamic vNIC) scoped to an organization.
//!
//! Org-scoped clients default to `org-root` and take any nested org DN via
//! `with_org`; the VLAN client resolves its domain group path before every
//! operation. Mutating operations stage one change set and commit it;
//! lookups never commit.

pub mod dynamic_vnic_conn_policy;
pub mod ip_pool;
pub mod lan_conn_policy;
pub mod mac_pool;
pub mod mcast_policy;
pub mod nwctrl_policy;
pub mod qos;
pub mod usnic_conn_policy;
pub mod vlan;
pub mod vmq_conn_policy;

#[cfg(test)]
mod tests;

pub use dynamic_vnic_conn_policy::DynamicVnicConnPolicyClient;
pub use ip_pool::IpPoolClient;
pub use lan_conn_policy::LanConnPolicyClient;
pub use mac_pool::MacPoolClient;
pub use mcast_policy::McastPolicyClient;
pub use nwctrl_policy::NwctrlPolicyClient;
pub use qos::QosPolicyClient;
pub use usnic_conn_policy::UsnicConnPolicyClient;
pub use vlan::VlanClient;
pub use vmq_conn_policy::VmqConnPolicyClient;
