//! Stock cupsd.conf values shipped by the CUPS scheduler.
//!
//! # Design
//! - Centralise every literal so the editor's initial state and reset target agree.
//! - Operation lists are fixture data copied from the reference policy, not generated.

use crate::model::{
    AccessOrder, AuthType, BrowseProtocol, CupsdConfig, DefaultAuthType, LimitKind, LimitRule,
    LocationRule, Locations, LogLevel, Policies, Policy,
};

/// Port used when the scheduler listens on the network.
pub const DEFAULT_PORT: i64 = 631;
/// Unix domain socket the stock scheduler listens on.
pub const DEFAULT_LISTEN_SOCKET: &str = "/run/cups/cups.sock";
/// Value used for every privacy directive in the stock policies.
pub const DEFAULT_PRIVACY_VALUE: &str = "default";

const SYSTEM_GROUP: &str = "@SYSTEM";
const OWNER_OR_SYSTEM: &str = "@OWNER @SYSTEM";

const JOB_SUBMISSION_OPS: &str = "Create-Job Print-Job Print-URI Validate-Job";
const JOB_MANAGEMENT_OPS: &str = "Send-Document Send-URI Hold-Job Release-Job Restart-Job Purge-Jobs Set-Job-Attributes Create-Job-Subscription Renew-Subscription Cancel-Subscription Get-Notifications Reprocess-Job Cancel-Current-Job Suspend-Current-Job Resume-Job Cancel-My-Jobs Close-Job CUPS-Move-Job CUPS-Get-Document";
const ADMINISTRATION_OPS: &str = "CUPS-Add-Modify-Printer CUPS-Delete-Printer CUPS-Add-Modify-Class CUPS-Delete-Class CUPS-Set-Default";
const ADMINISTRATION_OPS_WITH_DEVICES: &str = "CUPS-Add-Modify-Printer CUPS-Delete-Printer CUPS-Add-Modify-Class CUPS-Delete-Class CUPS-Set-Default CUPS-Get-Devices";
const PRINTER_OPERATION_OPS: &str = "Pause-Printer Resume-Printer Enable-Printer Disable-Printer Pause-Printer-After-Current-Job Hold-New-Jobs Release-Held-New-Jobs Deactivate-Printer Activate-Printer Restart-Printer Shutdown-Printer Startup-Printer Promote-Job Schedule-Job-After Cancel-Jobs CUPS-Accept-Jobs CUPS-Reject-Jobs";
const JOB_CANCELLATION_OPS: &str = "Cancel-Job CUPS-Authenticate-Job";
const FALLBACK_OPS: &str = "All";

/// Build the stock scheduler configuration.
#[must_use]
pub fn default_config() -> CupsdConfig {
    CupsdConfig {
        log_level: LogLevel::Warn,
        page_log_format: String::new(),
        max_log_size: 0,
        port: DEFAULT_PORT,
        listen_addresses: vec![DEFAULT_LISTEN_SOCKET.to_string()],
        browsing: true,
        browse_local_protocols: BrowseProtocol::Dnssd,
        default_auth_type: DefaultAuthType::Basic,
        web_interface: true,
        locations: default_locations(),
        policies: Policies {
            default: default_policy(),
            authenticated: authenticated_policy(),
            kerberos: kerberos_policy(),
        },
    }
}

impl Default for CupsdConfig {
    fn default() -> Self {
        default_config()
    }
}

fn open_location() -> LocationRule {
    LocationRule {
        allow: "all".to_string(),
        order: AccessOrder::AllowDeny,
        auth_type: None,
        require_user: None,
    }
}

fn system_location() -> LocationRule {
    LocationRule {
        allow: String::new(),
        order: AccessOrder::AllowDeny,
        auth_type: Some(AuthType::Default),
        require_user: Some(SYSTEM_GROUP.to_string()),
    }
}

fn default_locations() -> Locations {
    Locations {
        root: open_location(),
        admin: open_location(),
        admin_conf: system_location(),
        admin_log: system_location(),
    }
}

fn limit(
    kind: LimitKind,
    operations: &str,
    auth_type: Option<AuthType>,
    require_user: Option<&str>,
) -> LimitRule {
    LimitRule {
        kind,
        operations: operations.to_string(),
        auth_type,
        require_user: require_user.map(str::to_string),
        order: AccessOrder::DenyAllow,
    }
}

fn policy(limits: Vec<LimitRule>) -> Policy {
    Policy {
        job_private_access: DEFAULT_PRIVACY_VALUE.to_string(),
        job_private_values: DEFAULT_PRIVACY_VALUE.to_string(),
        subscription_private_access: DEFAULT_PRIVACY_VALUE.to_string(),
        subscription_private_values: DEFAULT_PRIVACY_VALUE.to_string(),
        limits,
    }
}

fn default_policy() -> Policy {
    let admin = Some(AuthType::Default);
    policy(vec![
        limit(LimitKind::JobSubmission, JOB_SUBMISSION_OPS, None, None),
        limit(
            LimitKind::JobManagement,
            JOB_MANAGEMENT_OPS,
            None,
            Some(OWNER_OR_SYSTEM),
        ),
        limit(
            LimitKind::Administration,
            ADMINISTRATION_OPS_WITH_DEVICES,
            admin,
            Some(SYSTEM_GROUP),
        ),
        limit(
            LimitKind::PrinterOperations,
            PRINTER_OPERATION_OPS,
            admin,
            Some(SYSTEM_GROUP),
        ),
        limit(
            LimitKind::JobCancellation,
            JOB_CANCELLATION_OPS,
            None,
            Some(OWNER_OR_SYSTEM),
        ),
        limit(LimitKind::Fallback, FALLBACK_OPS, None, None),
    ])
}

/// Policy where job operations authenticate with `job_auth`.
fn authenticating_policy(job_auth: AuthType) -> Policy {
    let job = Some(job_auth);
    let admin = Some(AuthType::Default);
    policy(vec![
        limit(LimitKind::JobSubmission, JOB_SUBMISSION_OPS, job, None),
        limit(
            LimitKind::JobManagement,
            JOB_MANAGEMENT_OPS,
            job,
            Some(OWNER_OR_SYSTEM),
        ),
        limit(
            LimitKind::Administration,
            ADMINISTRATION_OPS,
            admin,
            Some(SYSTEM_GROUP),
        ),
        limit(
            LimitKind::PrinterOperations,
            PRINTER_OPERATION_OPS,
            admin,
            Some(SYSTEM_GROUP),
        ),
        limit(
            LimitKind::JobCancellation,
            JOB_CANCELLATION_OPS,
            job,
            Some(OWNER_OR_SYSTEM),
        ),
        limit(LimitKind::Fallback, FALLBACK_OPS, None, None),
    ])
}

fn authenticated_policy() -> Policy {
    authenticating_policy(AuthType::Default)
}

fn kerberos_policy() -> Policy {
    authenticating_policy(AuthType::Negotiate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LocationRole, PolicyRole};

    #[test]
    fn defaults_match_stock_scheduler() {
        let config = default_config();
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.max_log_size, 0);
        assert_eq!(config.port, 631);
        assert_eq!(config.listen_addresses, vec!["/run/cups/cups.sock"]);
        assert!(config.browsing);
        assert!(config.web_interface);
        assert_eq!(config.default_auth_type, DefaultAuthType::Basic);
        assert_eq!(config, CupsdConfig::default());
    }

    #[test]
    fn admin_locations_require_system_group() {
        let config = default_config();
        for role in [LocationRole::AdminConf, LocationRole::AdminLog] {
            let rule = config.locations.get(role);
            assert!(rule.allow.is_empty());
            assert_eq!(rule.auth_type, Some(AuthType::Default));
            assert_eq!(rule.require_user.as_deref(), Some("@SYSTEM"));
        }
        for role in [LocationRole::Root, LocationRole::Admin] {
            let rule = config.locations.get(role);
            assert_eq!(rule.allow, "all");
            assert!(rule.auth_type.is_none());
            assert!(rule.require_user.is_none());
        }
    }

    #[test]
    fn every_policy_carries_each_limit_kind_in_order() {
        let config = default_config();
        for role in PolicyRole::ALL {
            let kinds: Vec<_> = config
                .policies
                .get(role)
                .limits
                .iter()
                .map(|limit| limit.kind)
                .collect();
            assert_eq!(kinds, LimitKind::ALL.to_vec(), "policy {}", role.name());
        }
    }

    #[test]
    fn kerberos_policy_negotiates_job_operations_only() {
        let config = default_config();
        let kerberos = &config.policies.kerberos;
        let auth = |kind| kerberos.limit(kind).and_then(|limit| limit.auth_type);
        assert_eq!(auth(LimitKind::JobSubmission), Some(AuthType::Negotiate));
        assert_eq!(auth(LimitKind::Administration), Some(AuthType::Default));
        assert_eq!(auth(LimitKind::Fallback), None);

        let default_admin = config
            .policies
            .default
            .limit(LimitKind::Administration)
            .map(|limit| limit.operations.as_str());
        assert!(default_admin.is_some_and(|ops| ops.ends_with("CUPS-Get-Devices")));
    }
}
