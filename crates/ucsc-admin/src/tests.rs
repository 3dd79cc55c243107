//! Feature tests against the in-memory session.
//!
//! Each setup seeds the singleton service objects a freshly installed system
//! carries under its device profile, then the tests replay the configuration
//! scenarios a caller would run against a live endpoint.

use ucsc_core::testing::InMemorySession;
use ucsc_core::{ManagedObject, PropSet, UcscError, UcscSession};

use crate::auth_domain::{AuthDomain, AuthDomainClient, DomainRealm, NativeAuthUpdate};
use crate::callhome::{CallHomeClient, CallHomeConfig};
use crate::core_exporter::CoreExporterClient;
use crate::dns::{DnsClient, DnsServer};
use crate::keyring::{CertRequest, KeyRing, KeyRingClient, TrustedPoint};
use crate::ldap::{LdapClient, LdapProvider};
use crate::locale::{Locale, LocaleClient, OrgAssignment};
use crate::radius::{ProviderRef, RadiusClient, RadiusProvider};
use crate::role::{Role, RoleClient};
use crate::snmp::{SnmpClient, SnmpConfig, SnmpTrap, SnmpUser};
use crate::syslog::{RemoteSyslog, SyslogClient};
use crate::tacacs::{TacacsClient, TacacsProvider};
use crate::timezone::{NtpServer, TimeZoneClient};
use crate::user::{User, UserClient};

const BASE: &str = "org-root/deviceprofile-default";

fn seed(session: &InMemorySession, class_id: &str, dn: String) {
    session.seed(ManagedObject::new(class_id, dn));
}

/// Session pre-populated with the service singletons of the default device
/// profile.
fn session() -> InMemorySession {
    let session = InMemorySession::new();
    seed(&session, "orgDeviceProfile", BASE.to_string());
    seed(&session, "commDns", format!("{}/dns-svc", BASE));
    seed(&session, "commSnmp", format!("{}/snmp-svc", BASE));
    seed(&session, "commDateTime", format!("{}/datetime-svc", BASE));
    seed(&session, "aaaAuthRealm", format!("{}/auth-realm", BASE));
    seed(
        &session,
        "aaaDefaultAuth",
        format!("{}/auth-realm/default-auth", BASE),
    );
    seed(
        &session,
        "aaaConsoleAuth",
        format!("{}/auth-realm/console-auth", BASE),
    );
    seed(&session, "commSyslog", format!("{}/syslog", BASE));
    seed(
        &session,
        "commSyslogConsole",
        format!("{}/syslog/console", BASE),
    );
    seed(
        &session,
        "commSyslogMonitor",
        format!("{}/syslog/monitor", BASE),
    );
    seed(&session, "commSyslogFile", format!("{}/syslog/file", BASE));
    seed(
        &session,
        "commSyslogSource",
        format!("{}/syslog/source", BASE),
    );
    seed(
        &session,
        "commSyslogClient",
        format!("{}/syslog/client-primary", BASE),
    );
    seed(&session, "callhomeEp", format!("{}/call-home", BASE));
    seed(
        &session,
        "smartcallhomeSource",
        format!("{}/call-home/sch-source", BASE),
    );
    seed(
        &session,
        "smartcallhomeHttpProxy",
        format!("{}/call-home/proxy", BASE),
    );
    seed(
        &session,
        "smartcallhomeTransportGateway",
        format!("{}/call-home/transport-gateway", BASE),
    );
    seed(&session, "aaaPwdProfile", format!("{}/pwd-profile", BASE));
    seed(&session, "aaaLdapEp", format!("{}/ldap-ext", BASE));
    seed(&session, "aaaRadiusEp", format!("{}/radius-ext", BASE));
    seed(&session, "aaaTacacsPlusEp", format!("{}/tacacs-ext", BASE));
    seed(&session, "pkiEp", format!("{}/pki-ext", BASE));
    session
}

#[test]
fn dns_server_round_trip() {
    let session = session();
    let client = DnsClient::new(&session);

    client
        .server_add(&DnsServer {
            name: "2.2.2.2".into(),
            ..Default::default()
        })
        .unwrap();
    assert!(client
        .server_exists("2.2.2.2", &PropSet::new())
        .unwrap()
        .is_some());

    let mo = client.set_domain_name("cisco.com", &PropSet::new()).unwrap();
    assert_eq!(mo.prop("domain"), Some("cisco.com"));

    client.server_remove("2.2.2.2").unwrap();
    assert!(client
        .server_exists("2.2.2.2", &PropSet::new())
        .unwrap()
        .is_none());
}

#[test]
fn dns_server_remove_missing_is_not_found() {
    let session = session();
    let client = DnsClient::new(&session);
    let err = client.server_remove("9.9.9.9").unwrap_err();
    assert!(matches!(err, UcscError::NotFound { .. }));
}

#[test]
fn role_lifecycle() {
    let session = session();
    let client = RoleClient::new(&session);

    client
        .create(&Role {
            name: "test_role".into(),
            priv_: "admin".into(),
            ..Default::default()
        })
        .unwrap();
    assert!(client
        .exists("test_role", &PropSet::new().with("priv", "admin"))
        .unwrap()
        .is_some());

    let mo = client
        .modify("test_role", &PropSet::new().with("priv", "read-only"))
        .unwrap();
    assert_eq!(mo.prop("priv"), Some("read-only"));

    client.delete("test_role").unwrap();
    assert!(client.exists("test_role", &PropSet::new()).unwrap().is_none());
}

#[test]
fn role_exists_with_mismatched_props_is_none() {
    let session = session();
    let client = RoleClient::new(&session);
    client
        .create(&Role {
            name: "ops".into(),
            priv_: "admin".into(),
            ..Default::default()
        })
        .unwrap();
    assert!(client
        .exists("ops", &PropSet::new().with("priv", "read-only"))
        .unwrap()
        .is_none());
}

#[test]
fn role_modify_missing_is_not_found() {
    let session = session();
    let client = RoleClient::new(&session);
    let err = client.modify("ghost", &PropSet::new()).unwrap_err();
    assert!(matches!(
        err,
        UcscError::NotFound {
            operation: "role_modify",
            ..
        }
    ));
}

#[test]
fn locale_with_org_assignment() {
    let session = session();
    let client = LocaleClient::new(&session);

    client
        .create(&Locale {
            name: "test_locale".into(),
            ..Default::default()
        })
        .unwrap();

    client
        .assign_org(
            "test_locale",
            &OrgAssignment {
                name: "root".into(),
                ..Default::default()
            },
        )
        .unwrap();
    let dn = format!("{}/locale-test_locale/org-root", BASE);
    let assigned = session.query_dn(&dn).unwrap().unwrap();
    assert_eq!(assigned.prop("org_dn"), Some("org-root"));

    client.unassign_org("test_locale", "root").unwrap();
    assert!(session.query_dn(&dn).unwrap().is_none());

    client.delete("test_locale").unwrap();
    assert!(client
        .exists("test_locale", &PropSet::new())
        .unwrap()
        .is_none());
}

#[test]
fn locale_assign_org_requires_locale() {
    let session = session();
    let client = LocaleClient::new(&session);
    let err = client
        .assign_org("ghost", &OrgAssignment::default())
        .unwrap_err();
    assert!(matches!(err, UcscError::NotFound { .. }));
}

#[test]
fn auth_domain_lifecycle_and_realm() {
    let session = session();
    let client = AuthDomainClient::new(&session);

    client
        .create(&AuthDomain {
            name: "test_domain".into(),
            ..Default::default()
        })
        .unwrap();
    let found = client
        .exists("test_domain", &PropSet::new().with("refresh_period", "600"))
        .unwrap();
    assert!(found.is_some());

    // on the remote the realm child springs into existence with the domain
    seed(
        &session,
        "aaaDomainAuth",
        format!("{}/auth-realm/domain-test_domain/domain-auth", BASE),
    );
    let realm = client
        .realm_configure(
            "test_domain",
            &DomainRealm {
                realm: "ldap".into(),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(realm.prop("realm"), Some("ldap"));

    client
        .modify("test_domain", &PropSet::new().with("session_timeout", "3600"))
        .unwrap();
    client.delete("test_domain").unwrap();
    assert!(client
        .exists("test_domain", &PropSet::new())
        .unwrap()
        .is_none());
}

#[test]
fn native_authentication_updates_singletons() {
    let session = session();
    let client = AuthDomainClient::new(&session);

    let update = NativeAuthUpdate {
        def_role_policy: Some("no-login".into()),
        ..Default::default()
    };
    let mo = client.native_authentication_configure(&update).unwrap();
    assert_eq!(mo.prop("def_role_policy"), Some("no-login"));

    let update = NativeAuthUpdate {
        realm: Some("local".into()),
        ..Default::default()
    };
    let mo = client.native_authentication_default(&update).unwrap();
    assert_eq!(mo.dn(), format!("{}/auth-realm/default-auth", BASE));

    let mo = client.native_authentication_console(&update).unwrap();
    assert_eq!(mo.dn(), format!("{}/auth-realm/console-auth", BASE));
}

#[test]
fn snmp_enable_trap_and_user() {
    let session = session();
    let client = SnmpClient::new(&session);

    let mo = client
        .enable(&SnmpConfig {
            community: Some("public".into()),
            sys_contact: Some("ops".into()),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(mo.prop("admin_state"), Some("enabled"));
    assert_eq!(mo.prop("community"), Some("public"));

    client
        .trap_add(&SnmpTrap {
            hostname: "10.10.10.10".into(),
            community: "public".into(),
            ..Default::default()
        })
        .unwrap();
    assert!(client
        .trap_exists("10.10.10.10", &PropSet::new().with("port", "162"))
        .unwrap()
        .is_some());

    let mo = client
        .trap_modify("10.10.10.10", &PropSet::new().with("version", "v3"))
        .unwrap();
    assert_eq!(mo.prop("version"), Some("v3"));

    client
        .user_add(&SnmpUser {
            name: "snmpuser".into(),
            pwd: "secret".into(),
            ..Default::default()
        })
        .unwrap();
    assert!(client
        .user_exists("snmpuser", &PropSet::new().with("auth", "md5"))
        .unwrap()
        .is_some());

    client.trap_remove("10.10.10.10").unwrap();
    client.user_remove("snmpuser").unwrap();

    let mo = client.disable().unwrap();
    assert_eq!(mo.prop("admin_state"), Some("disabled"));
}

#[test]
fn snmp_trap_dn_has_no_separator() {
    let session = session();
    let client = SnmpClient::new(&session);
    let mo = client
        .trap_add(&SnmpTrap {
            hostname: "10.10.10.10".into(),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(mo.dn(), format!("{}/snmp-svc/snmp-trap10.10.10.10", BASE));
}

#[test]
fn syslog_sinks_toggle_in_place() {
    let session = session();
    let client = SyslogClient::new(&session);

    let mo = client
        .local_console_enable("alerts", &PropSet::new())
        .unwrap();
    assert_eq!(mo.prop("admin_state"), Some("enabled"));
    assert_eq!(mo.prop("severity"), Some("alerts"));

    let mo = client.local_console_disable().unwrap();
    assert_eq!(mo.prop("admin_state"), Some("disabled"));

    let mo = client
        .local_file_enable("messages", "information", "4194304", &PropSet::new())
        .unwrap();
    assert_eq!(mo.prop("name"), Some("messages"));

    let mo = client
        .remote_enable(
            "primary",
            &RemoteSyslog {
                hostname: "192.168.1.1".into(),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(mo.prop("hostname"), Some("192.168.1.1"));

    let mo = client.remote_disable("primary").unwrap();
    assert_eq!(mo.prop("admin_state"), Some("disabled"));
}

#[test]
fn syslog_remote_requires_provisioned_client() {
    let session = session();
    let client = SyslogClient::new(&session);
    let err = client
        .remote_enable("tertiary", &RemoteSyslog::default())
        .unwrap_err();
    assert!(matches!(err, UcscError::NotFound { .. }));
}

#[test]
fn timezone_and_ntp() {
    let session = session();
    let client = TimeZoneClient::new(&session);

    let mo = client
        .set("Asia/Kolkata (IST)", &PropSet::new())
        .unwrap();
    assert_eq!(mo.prop("timezone"), Some("Asia/Kolkata (IST)"));
    assert_eq!(mo.prop("admin_state"), Some("enabled"));

    client
        .ntp_server_create(&NtpServer {
            name: "ntp.example.com".into(),
            ..Default::default()
        })
        .unwrap();
    assert!(client
        .ntp_server_exists("ntp.example.com", &PropSet::new())
        .unwrap()
        .is_some());

    client.ntp_server_remove("ntp.example.com").unwrap();
    assert!(client
        .ntp_server_exists("ntp.example.com", &PropSet::new())
        .unwrap()
        .is_none());
}

#[test]
fn radius_provider_group_flow() {
    let session = session();
    let client = RadiusClient::new(&session);

    client
        .provider_create(&RadiusProvider {
            name: "test_radius_prov".into(),
            auth_port: "320".into(),
            timeout: "10".into(),
            ..Default::default()
        })
        .unwrap();
    assert!(client
        .provider_exists("test_radius_prov", &PropSet::new().with("auth_port", "320"))
        .unwrap()
        .is_some());

    let mo = client
        .provider_modify("test_radius_prov", &PropSet::new().with("timeout", "5"))
        .unwrap();
    assert_eq!(mo.prop("timeout"), Some("5"));

    client
        .provider_group_create("test_prov_grp", "", &PropSet::new())
        .unwrap();
    client
        .provider_group_add_provider(
            "test_prov_grp",
            &ProviderRef {
                name: "test_radius_prov".into(),
                ..Default::default()
            },
        )
        .unwrap();
    assert!(client
        .provider_group_provider_exists("test_prov_grp", "test_radius_prov", &PropSet::new())
        .unwrap()
        .is_some());

    let mo = client
        .provider_group_modify_provider(
            "test_prov_grp",
            "test_radius_prov",
            &PropSet::new().with("order", "2"),
        )
        .unwrap();
    assert_eq!(mo.prop("order"), Some("2"));

    client
        .provider_group_remove_provider("test_prov_grp", "test_radius_prov")
        .unwrap();
    assert!(client
        .provider_group_provider_exists("test_prov_grp", "test_radius_prov", &PropSet::new())
        .unwrap()
        .is_none());

    client.provider_group_delete("test_prov_grp").unwrap();
    client.provider_delete("test_radius_prov").unwrap();
}

#[test]
fn radius_provider_ref_lookup_needs_group() {
    let session = session();
    let client = RadiusClient::new(&session);
    let err = client
        .provider_group_provider_exists("ghost_grp", "prov", &PropSet::new())
        .unwrap_err();
    assert!(matches!(err, UcscError::NotFound { .. }));
}

#[test]
fn radius_group_add_requires_provider() {
    let session = session();
    let client = RadiusClient::new(&session);
    client
        .provider_group_create("grp", "", &PropSet::new())
        .unwrap();
    let err = client
        .provider_group_add_provider(
            "grp",
            &ProviderRef {
                name: "missing".into(),
                ..Default::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, UcscError::NotFound { .. }));
}

#[test]
fn tacacs_provider_lifecycle() {
    let session = session();
    let client = TacacsClient::new(&session);

    let mo = client
        .provider_create(&TacacsProvider {
            name: "test_tacacs_prov".into(),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(mo.prop("port"), Some("49"));

    let mo = client
        .provider_modify("test_tacacs_prov", &PropSet::new().with("timeout", "10"))
        .unwrap();
    assert_eq!(mo.prop("timeout"), Some("10"));

    client.provider_delete("test_tacacs_prov").unwrap();
    assert!(client
        .provider_exists("test_tacacs_prov", &PropSet::new())
        .unwrap()
        .is_none());
}

#[test]
fn ldap_provider_requires_endpoint() {
    let session = InMemorySession::new();
    seed(&session, "orgDeviceProfile", BASE.to_string());
    let client = LdapClient::new(&session);
    let err = client
        .provider_create(&LdapProvider {
            name: "test_ldap".into(),
            ..Default::default()
        })
        .unwrap_err();
    assert!(matches!(err, UcscError::NotFound { .. }));
}

#[test]
fn ldap_provider_and_group_maps() {
    let session = session();
    let client = LdapClient::new(&session);

    let mo = client
        .provider_create(&LdapProvider {
            name: "test_ldap_prov".into(),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(mo.prop("vendor"), Some("OpenLdap"));
    assert_eq!(mo.prop("port"), Some("389"));

    client
        .group_map_create("test_ldap_grp_map", "", &PropSet::new())
        .unwrap();
    client
        .group_map_add_role("test_ldap_grp_map", "storage", "", &PropSet::new())
        .unwrap();
    assert!(client
        .group_map_role_exists("test_ldap_grp_map", "storage", &PropSet::new())
        .unwrap()
        .is_some());

    client
        .group_map_remove_role("test_ldap_grp_map", "storage")
        .unwrap();
    client.group_map_delete("test_ldap_grp_map").unwrap();
    client.provider_delete("test_ldap_prov").unwrap();
}

#[test]
fn ldap_provider_ref_lookup_tolerates_missing_group() {
    // unlike radius and tacacs, the ldap lookup does not pre-check the group
    let session = session();
    let client = LdapClient::new(&session);
    assert!(client
        .provider_group_provider_exists("ghost_grp", "prov", &PropSet::new())
        .unwrap()
        .is_none());
}

#[test]
fn user_create_cascades_initial_role() {
    let session = session();
    let client = UserClient::new(&session);

    client
        .create(&User {
            name: "testuser".into(),
            pwd: "p@ssw0rd".into(),
            role: "admin".into(),
            ..Default::default()
        })
        .unwrap();
    assert!(client
        .exists("testuser", &PropSet::new().with("account_status", "active"))
        .unwrap()
        .is_some());
    assert!(client
        .role_exists("testuser", "admin", &PropSet::new())
        .unwrap()
        .is_some());

    client
        .add_locale("testuser", "west", "", &PropSet::new())
        .unwrap();
    assert!(client
        .locale_exists("testuser", "west", &PropSet::new())
        .unwrap()
        .is_some());

    client.remove_role("testuser", "admin").unwrap();
    client.delete("testuser").unwrap();
    assert!(client
        .role_exists("testuser", "admin", &PropSet::new())
        .unwrap()
        .is_none());
}

#[test]
fn password_strength_toggle() {
    let session = session();
    let client = UserClient::new(&session);

    let mo = client.password_strength_check("", &PropSet::new()).unwrap();
    assert_eq!(mo.prop("pwd_strength_check"), Some("yes"));

    let mo = client.password_strength_uncheck().unwrap();
    assert_eq!(mo.prop("pwd_strength_check"), Some("no"));
}

#[test]
fn keyring_with_certificate_request() {
    let session = session();
    let client = KeyRingClient::new(&session);

    client
        .trusted_point_create(&TrustedPoint {
            name: "test_tp".into(),
            cert_chain: "-----BEGIN CERTIFICATE-----".into(),
            ..Default::default()
        })
        .unwrap();
    assert!(client
        .trusted_point_exists("test_tp", &PropSet::new())
        .unwrap()
        .is_some());

    client
        .create(&KeyRing {
            name: "test_kr".into(),
            tp: "test_tp".into(),
            ..Default::default()
        })
        .unwrap();
    assert!(client
        .exists("test_kr", &PropSet::new().with("modulus", "mod2048"))
        .unwrap()
        .is_some());

    client
        .certificate_request_add(
            "test_kr",
            &CertRequest {
                dns: "10.10.10.100".into(),
                ..Default::default()
            },
        )
        .unwrap();
    assert!(client
        .certificate_request_exists("test_kr", &PropSet::new())
        .unwrap()
        .is_some());

    client.certificate_request_remove("test_kr").unwrap();
    client.delete("test_kr").unwrap();
    client.trusted_point_delete("test_tp").unwrap();
}

#[test]
fn certificate_request_needs_keyring() {
    let session = session();
    let client = KeyRingClient::new(&session);
    let err = client
        .certificate_request_add("ghost", &CertRequest::default())
        .unwrap_err();
    assert!(matches!(err, UcscError::NotFound { .. }));
}

#[test]
fn call_home_configuration() {
    let session = session();
    let client = CallHomeClient::new(&session);

    let mo = client.enable(Some("on"), "", "", &PropSet::new()).unwrap();
    assert_eq!(mo.prop("admin_state"), Some("on"));
    assert_eq!(mo.prop("alert_throttling_admin_state"), Some("on"));

    let mo = client
        .configure(&CallHomeConfig {
            contact: Some("user name".into()),
            email: Some("user@cisco.com".into()),
            urgency: Some("alert".into()),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(mo.prop("contact"), Some("user name"));
    assert_eq!(mo.prop("urgency"), Some("alert"));

    let mo = client
        .proxy_configure("www.testproxy.com", "80", &PropSet::new())
        .unwrap();
    assert_eq!(mo.prop("port"), Some("80"));

    let mo = client
        .transport_gw_configure("yes", "www.testgw.com", None, &PropSet::new())
        .unwrap();
    assert_eq!(mo.prop("url"), Some("www.testgw.com"));

    let mo = client.disable().unwrap();
    assert_eq!(mo.prop("admin_state"), Some("off"));
}

#[test]
fn core_exporter_enable_then_disable_keeps_target() {
    let session = session();
    let client = CoreExporterClient::new(&session);

    let mo = client
        .enable("10.65.180.18", "/root/tftp", "69", None, &PropSet::new())
        .unwrap();
    assert_eq!(mo.prop("admin_state"), Some("enabled"));

    client.disable().unwrap();
    let stored = session
        .query_dn(&format!("{}/file-export", BASE))
        .unwrap()
        .unwrap();
    assert_eq!(stored.prop("admin_state"), Some("disabled"));
    // modify-present merge keeps the previously configured server
    assert_eq!(stored.prop("hostname"), Some("10.65.180.18"));
}

#[test]
fn extra_props_override_regular_fields() {
    let session = session();
    let client = RoleClient::new(&session);
    let mo = client
        .create(&Role {
            name: "ops".into(),
            priv_: "admin".into(),
            extra: PropSet::new().with("priv", "aaa"),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(mo.prop("priv"), Some("aaa"));
}
