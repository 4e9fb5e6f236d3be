//! Typed cupsd.conf document model.
//!
//! # Design
//! - Pure data carriers; rendering lives in `render.rs` and edits in `edit.rs`.
//! - Location and policy roles are named struct fields so the set of blocks is fixed.
//! - Role-specific text (paths, block names, comments) is exposed as data on the role enums.

use serde::{Deserialize, Serialize};

/// Scheduler log verbosity written to `LogLevel`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only.
    Error,
    /// Errors and warnings.
    Warn,
    /// Noteworthy conditions.
    Notice,
    /// Informational messages.
    Info,
    /// Debugging output.
    Debug,
    /// Verbose debugging output.
    Debug2,
}

impl LogLevel {
    /// Every level in the order offered to operators.
    pub const ALL: [Self; 6] = [
        Self::Error,
        Self::Warn,
        Self::Notice,
        Self::Info,
        Self::Debug,
        Self::Debug2,
    ];

    #[must_use]
    /// Render the level as its directive spelling.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Notice => "notice",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Debug2 => "debug2",
        }
    }

    #[must_use]
    /// Parse a directive spelling, ignoring ASCII case.
    pub fn from_directive(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(value))
    }
}

/// Discovery protocols written to `BrowseLocalProtocols`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BrowseProtocol {
    /// Multicast DNS service discovery.
    Dnssd,
    /// Legacy native CUPS browsing.
    Cups,
    /// Every supported protocol.
    All,
}

impl BrowseProtocol {
    /// Every protocol in the order offered to operators.
    pub const ALL: [Self; 3] = [Self::Dnssd, Self::Cups, Self::All];

    #[must_use]
    /// Render the protocol as its directive spelling.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dnssd => "dnssd",
            Self::Cups => "cups",
            Self::All => "all",
        }
    }

    #[must_use]
    /// Parse a directive spelling, ignoring ASCII case.
    pub fn from_directive(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|protocol| protocol.as_str().eq_ignore_ascii_case(value))
    }
}

/// Server-wide authentication scheme written to `DefaultAuthType`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DefaultAuthType {
    /// HTTP Basic authentication.
    Basic,
    /// HTTP Digest authentication.
    Digest,
    /// Kerberos via SPNEGO.
    Negotiate,
}

impl DefaultAuthType {
    /// Every scheme in the order offered to operators.
    pub const ALL: [Self; 3] = [Self::Basic, Self::Digest, Self::Negotiate];

    #[must_use]
    /// Render the scheme as its directive spelling.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "Basic",
            Self::Digest => "Digest",
            Self::Negotiate => "Negotiate",
        }
    }

    #[must_use]
    /// Parse a directive spelling, ignoring ASCII case.
    pub fn from_directive(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|scheme| scheme.as_str().eq_ignore_ascii_case(value))
    }
}

/// Per-block authentication requirement written to `AuthType`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AuthType {
    /// Defer to `DefaultAuthType`.
    Default,
    /// HTTP Basic authentication.
    Basic,
    /// HTTP Digest authentication.
    Digest,
    /// Kerberos via SPNEGO.
    Negotiate,
}

impl AuthType {
    /// Every requirement in the order offered to operators.
    pub const ALL: [Self; 4] = [Self::Default, Self::Basic, Self::Digest, Self::Negotiate];

    #[must_use]
    /// Render the requirement as its directive spelling.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::Basic => "Basic",
            Self::Digest => "Digest",
            Self::Negotiate => "Negotiate",
        }
    }

    #[must_use]
    /// Parse a directive spelling, ignoring ASCII case.
    pub fn from_directive(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|auth| auth.as_str().eq_ignore_ascii_case(value))
    }
}

/// Evaluation order written to `Order`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AccessOrder {
    /// Evaluate `Allow` before `Deny`.
    #[serde(rename = "allow,deny")]
    AllowDeny,
    /// Evaluate `Deny` before `Allow`.
    #[serde(rename = "deny,allow")]
    DenyAllow,
}

impl AccessOrder {
    /// Both orderings.
    pub const ALL: [Self; 2] = [Self::AllowDeny, Self::DenyAllow];

    #[must_use]
    /// Render the ordering as its directive spelling.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AllowDeny => "allow,deny",
            Self::DenyAllow => "deny,allow",
        }
    }

    #[must_use]
    /// Parse a directive spelling, ignoring ASCII case.
    pub fn from_directive(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|order| order.as_str().eq_ignore_ascii_case(value))
    }
}

/// Fixed URL paths guarded by a `<Location>` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocationRole {
    /// `/`
    Root,
    /// `/admin`
    Admin,
    /// `/admin/conf`
    AdminConf,
    /// `/admin/log`
    AdminLog,
}

impl LocationRole {
    /// Roles in document order.
    pub const ALL: [Self; 4] = [Self::Root, Self::Admin, Self::AdminConf, Self::AdminLog];

    #[must_use]
    /// Stable key used in field paths.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::Admin => "admin",
            Self::AdminConf => "admin-conf",
            Self::AdminLog => "admin-log",
        }
    }

    #[must_use]
    /// URL path written into the opening tag.
    pub const fn path(self) -> &'static str {
        match self {
            Self::Root => "/",
            Self::Admin => "/admin",
            Self::AdminConf => "/admin/conf",
            Self::AdminLog => "/admin/log",
        }
    }

    #[must_use]
    /// Comment emitted above the block.
    pub const fn comment(self) -> &'static str {
        match self {
            Self::Root => "Restrict access to the server...",
            Self::Admin => "Restrict access to the admin pages...",
            Self::AdminConf => "Restrict access to configuration files...",
            Self::AdminLog => "Restrict access to log files...",
        }
    }

    #[must_use]
    /// Resolve a field-path key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.key() == key)
    }
}

/// Fixed operation policies rendered as `<Policy>` blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyRole {
    /// `<Policy default>`
    Default,
    /// `<Policy authenticated>`
    Authenticated,
    /// `<Policy kerberos>`
    Kerberos,
}

impl PolicyRole {
    /// Roles in document order.
    pub const ALL: [Self; 3] = [Self::Default, Self::Authenticated, Self::Kerberos];

    #[must_use]
    /// Policy name written into the opening tag; doubles as the field-path key.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Authenticated => "authenticated",
            Self::Kerberos => "kerberos",
        }
    }

    #[must_use]
    /// Comment emitted above the block.
    pub const fn comment(self) -> &'static str {
        match self {
            Self::Default => "Set the default printer/job policies...",
            Self::Authenticated => "Set the authenticated printer/job policies...",
            Self::Kerberos => "Set the kerberized printer/job policies...",
        }
    }

    #[must_use]
    /// Resolve a field-path key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.name() == key)
    }
}

/// Label identifying each `<Limit>` rule inside a policy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum LimitKind {
    /// Job creation and submission.
    JobSubmission,
    /// Owner-scoped job and subscription management.
    JobManagement,
    /// Printer and class administration.
    Administration,
    /// Printer state operations.
    PrinterOperations,
    /// Job cancellation and authentication.
    JobCancellation,
    /// Catch-all rule for remaining operations.
    Fallback,
}

impl LimitKind {
    /// Kinds in document order.
    pub const ALL: [Self; 6] = [
        Self::JobSubmission,
        Self::JobManagement,
        Self::Administration,
        Self::PrinterOperations,
        Self::JobCancellation,
        Self::Fallback,
    ];

    #[must_use]
    /// Stable key used in field paths.
    pub const fn key(self) -> &'static str {
        match self {
            Self::JobSubmission => "job-submission",
            Self::JobManagement => "job-management",
            Self::Administration => "administration",
            Self::PrinterOperations => "printer-operations",
            Self::JobCancellation => "job-cancellation",
            Self::Fallback => "fallback",
        }
    }

    #[must_use]
    /// Comment line emitted before the `<Limit>` tag, if any.
    pub const fn comment(self) -> Option<&'static str> {
        match self {
            Self::JobSubmission => {
                Some("# Job-related operations must be done by the owner or an administrator...")
            }
            Self::Administration => {
                Some("# All administration operations require an administrator to authenticate...")
            }
            Self::PrinterOperations => {
                Some("# All printer operations require a printer operator to authenticate...")
            }
            Self::JobCancellation => {
                Some("# Only the owner or an administrator can cancel or authenticate a job...")
            }
            Self::JobManagement | Self::Fallback => None,
        }
    }

    #[must_use]
    /// Resolve a field-path key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }
}

/// Access control for one URL path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocationRule {
    /// `Allow` expression; empty omits the directive.
    pub allow: String,
    /// `Order` directive.
    pub order: AccessOrder,
    /// Optional `AuthType` directive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_type: Option<AuthType>,
    /// Optional `Require user` expression.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_user: Option<String>,
}

/// Access control scoped to a set of IPP operations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LimitRule {
    /// Which rule of the reference policy this is.
    pub kind: LimitKind,
    /// Space-separated operation names.
    pub operations: String,
    /// Optional `AuthType` directive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_type: Option<AuthType>,
    /// Optional `Require user` expression.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_user: Option<String>,
    /// `Order` directive.
    pub order: AccessOrder,
}

/// Named bundle of privacy settings and limit rules.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Policy {
    /// `JobPrivateAccess` value.
    pub job_private_access: String,
    /// `JobPrivateValues` value.
    pub job_private_values: String,
    /// `SubscriptionPrivateAccess` value.
    pub subscription_private_access: String,
    /// `SubscriptionPrivateValues` value.
    pub subscription_private_values: String,
    /// Limit rules in document order, one per [`LimitKind`].
    pub limits: Vec<LimitRule>,
}

impl Policy {
    #[must_use]
    /// Look up the limit rule of a given kind.
    pub fn limit(&self, kind: LimitKind) -> Option<&LimitRule> {
        self.limits.iter().find(|limit| limit.kind == kind)
    }

    /// Mutable access to the limit rule of a given kind.
    pub fn limit_mut(&mut self, kind: LimitKind) -> Option<&mut LimitRule> {
        self.limits.iter_mut().find(|limit| limit.kind == kind)
    }
}

/// The four fixed location blocks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Locations {
    /// `<Location />`
    pub root: LocationRule,
    /// `<Location /admin>`
    pub admin: LocationRule,
    /// `<Location /admin/conf>`
    pub admin_conf: LocationRule,
    /// `<Location /admin/log>`
    pub admin_log: LocationRule,
}

impl Locations {
    #[must_use]
    /// Rule for a role.
    pub const fn get(&self, role: LocationRole) -> &LocationRule {
        match role {
            LocationRole::Root => &self.root,
            LocationRole::Admin => &self.admin,
            LocationRole::AdminConf => &self.admin_conf,
            LocationRole::AdminLog => &self.admin_log,
        }
    }

    /// Mutable rule for a role.
    pub const fn get_mut(&mut self, role: LocationRole) -> &mut LocationRule {
        match role {
            LocationRole::Root => &mut self.root,
            LocationRole::Admin => &mut self.admin,
            LocationRole::AdminConf => &mut self.admin_conf,
            LocationRole::AdminLog => &mut self.admin_log,
        }
    }
}

/// The three fixed policy blocks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Policies {
    /// `<Policy default>`
    pub default: Policy,
    /// `<Policy authenticated>`
    pub authenticated: Policy,
    /// `<Policy kerberos>`
    pub kerberos: Policy,
}

impl Policies {
    #[must_use]
    /// Policy for a role.
    pub const fn get(&self, role: PolicyRole) -> &Policy {
        match role {
            PolicyRole::Default => &self.default,
            PolicyRole::Authenticated => &self.authenticated,
            PolicyRole::Kerberos => &self.kerberos,
        }
    }

    /// Mutable policy for a role.
    pub const fn get_mut(&mut self, role: PolicyRole) -> &mut Policy {
        match role {
            PolicyRole::Default => &mut self.default,
            PolicyRole::Authenticated => &mut self.authenticated,
            PolicyRole::Kerberos => &mut self.kerberos,
        }
    }
}

/// Root of the cupsd.conf document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CupsdConfig {
    /// `LogLevel` directive.
    pub log_level: LogLevel,
    /// `PageLogFormat` value; empty emits the bare directive.
    pub page_log_format: String,
    /// `MaxLogSize` in bytes; `0` disables rotation.
    pub max_log_size: u64,
    /// `Port` directive.
    pub port: i64,
    /// One `Listen` directive per entry, in order.
    pub listen_addresses: Vec<String>,
    /// `Browsing On|Off`.
    pub browsing: bool,
    /// `BrowseLocalProtocols` directive.
    pub browse_local_protocols: BrowseProtocol,
    /// `DefaultAuthType` directive.
    pub default_auth_type: DefaultAuthType,
    /// `WebInterface Yes|No`.
    pub web_interface: bool,
    /// Location blocks.
    pub locations: Locations,
    /// Policy blocks.
    pub policies: Policies,
}
