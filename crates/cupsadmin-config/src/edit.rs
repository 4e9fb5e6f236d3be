//! Immutable edits over the cupsd.conf document.
//!
//! # Design
//! - `ConfigEdit` is a closed set of typed setters, one per field and role combination.
//! - `FieldPath` names every editable field with a stable textual key and converts raw
//!   operator input into a typed edit.
//! - Numeric input never fails: unparsable text falls back to a fixed value so typing is
//!   never blocked. Free text is accepted verbatim.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use tracing::warn;

use crate::defaults::DEFAULT_PORT;
use crate::error::{ConfigError, ConfigResult};
use crate::model::{
    AccessOrder, AuthType, BrowseProtocol, CupsdConfig, DefaultAuthType, LimitKind, LocationRole,
    LogLevel, PolicyRole,
};
use crate::render::{on_off, yes_no};

/// Typed replacement of a single document field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigEdit {
    /// Replace `LogLevel`.
    LogLevel(LogLevel),
    /// Replace `PageLogFormat`.
    PageLogFormat(String),
    /// Replace `MaxLogSize`.
    MaxLogSize(u64),
    /// Replace `Port`.
    Port(i64),
    /// Replace the whole `Listen` list.
    ListenAddresses(Vec<String>),
    /// Replace `Browsing`.
    Browsing(bool),
    /// Replace `BrowseLocalProtocols`.
    BrowseLocalProtocols(BrowseProtocol),
    /// Replace `DefaultAuthType`.
    DefaultAuthType(DefaultAuthType),
    /// Replace `WebInterface`.
    WebInterface(bool),
    /// Edit one location block.
    Location(LocationRole, LocationEdit),
    /// Edit one policy block.
    Policy(PolicyRole, PolicyEdit),
}

/// Field replacement inside a `<Location>` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationEdit {
    /// Replace the `Allow` expression.
    Allow(String),
    /// Replace the `Order` directive.
    Order(AccessOrder),
    /// Replace or clear `AuthType`.
    AuthType(Option<AuthType>),
    /// Replace or clear `Require user`.
    RequireUser(Option<String>),
}

/// Field replacement inside a `<Policy>` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyEdit {
    /// Replace `JobPrivateAccess`.
    JobPrivateAccess(String),
    /// Replace `JobPrivateValues`.
    JobPrivateValues(String),
    /// Replace `SubscriptionPrivateAccess`.
    SubscriptionPrivateAccess(String),
    /// Replace `SubscriptionPrivateValues`.
    SubscriptionPrivateValues(String),
    /// Edit the limit rule of a given kind.
    Limit(LimitKind, LimitEdit),
}

/// Field replacement inside a `<Limit>` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LimitEdit {
    /// Replace the operation list.
    Operations(String),
    /// Replace or clear `AuthType`.
    AuthType(Option<AuthType>),
    /// Replace or clear `Require user`.
    RequireUser(Option<String>),
    /// Replace the `Order` directive.
    Order(AccessOrder),
}

/// Return a copy of `config` with `edit` applied.
#[must_use]
pub fn apply_edit(config: &CupsdConfig, edit: ConfigEdit) -> CupsdConfig {
    config.clone().with_edit(edit)
}

impl CupsdConfig {
    /// Consume the document and return it with `edit` applied.
    #[must_use]
    pub fn with_edit(mut self, edit: ConfigEdit) -> Self {
        match edit {
            ConfigEdit::LogLevel(level) => self.log_level = level,
            ConfigEdit::PageLogFormat(format) => self.page_log_format = format,
            ConfigEdit::MaxLogSize(size) => self.max_log_size = size,
            ConfigEdit::Port(port) => self.port = port,
            ConfigEdit::ListenAddresses(addresses) => self.listen_addresses = addresses,
            ConfigEdit::Browsing(enabled) => self.browsing = enabled,
            ConfigEdit::BrowseLocalProtocols(protocol) => self.browse_local_protocols = protocol,
            ConfigEdit::DefaultAuthType(scheme) => self.default_auth_type = scheme,
            ConfigEdit::WebInterface(enabled) => self.web_interface = enabled,
            ConfigEdit::Location(role, edit) => {
                let rule = self.locations.get_mut(role);
                match edit {
                    LocationEdit::Allow(allow) => rule.allow = allow,
                    LocationEdit::Order(order) => rule.order = order,
                    LocationEdit::AuthType(auth) => rule.auth_type = auth,
                    LocationEdit::RequireUser(user) => rule.require_user = user,
                }
            }
            ConfigEdit::Policy(role, edit) => {
                let policy = self.policies.get_mut(role);
                match edit {
                    PolicyEdit::JobPrivateAccess(value) => policy.job_private_access = value,
                    PolicyEdit::JobPrivateValues(value) => policy.job_private_values = value,
                    PolicyEdit::SubscriptionPrivateAccess(value) => {
                        policy.subscription_private_access = value;
                    }
                    PolicyEdit::SubscriptionPrivateValues(value) => {
                        policy.subscription_private_values = value;
                    }
                    PolicyEdit::Limit(kind, edit) => {
                        if let Some(limit) = policy.limit_mut(kind) {
                            match edit {
                                LimitEdit::Operations(operations) => {
                                    limit.operations = operations;
                                }
                                LimitEdit::AuthType(auth) => limit.auth_type = auth,
                                LimitEdit::RequireUser(user) => limit.require_user = user,
                                LimitEdit::Order(order) => limit.order = order,
                            }
                        } else {
                            warn!(
                                policy = role.name(),
                                limit = kind.key(),
                                "policy has no limit of this kind; edit ignored"
                            );
                        }
                    }
                }
            }
        }
        self
    }
}

impl ConfigEdit {
    /// Field addressed by this edit.
    #[must_use]
    pub const fn field(&self) -> FieldPath {
        match self {
            Self::LogLevel(_) => FieldPath::LogLevel,
            Self::PageLogFormat(_) => FieldPath::PageLogFormat,
            Self::MaxLogSize(_) => FieldPath::MaxLogSize,
            Self::Port(_) => FieldPath::Port,
            Self::ListenAddresses(_) => FieldPath::ListenAddresses,
            Self::Browsing(_) => FieldPath::Browsing,
            Self::BrowseLocalProtocols(_) => FieldPath::BrowseLocalProtocols,
            Self::DefaultAuthType(_) => FieldPath::DefaultAuthType,
            Self::WebInterface(_) => FieldPath::WebInterface,
            Self::Location(role, edit) => {
                let field = match edit {
                    LocationEdit::Allow(_) => LocationField::Allow,
                    LocationEdit::Order(_) => LocationField::Order,
                    LocationEdit::AuthType(_) => LocationField::AuthType,
                    LocationEdit::RequireUser(_) => LocationField::RequireUser,
                };
                FieldPath::Location(*role, field)
            }
            Self::Policy(role, edit) => match edit {
                PolicyEdit::JobPrivateAccess(_) => {
                    FieldPath::Policy(*role, PolicyField::JobPrivateAccess)
                }
                PolicyEdit::JobPrivateValues(_) => {
                    FieldPath::Policy(*role, PolicyField::JobPrivateValues)
                }
                PolicyEdit::SubscriptionPrivateAccess(_) => {
                    FieldPath::Policy(*role, PolicyField::SubscriptionPrivateAccess)
                }
                PolicyEdit::SubscriptionPrivateValues(_) => {
                    FieldPath::Policy(*role, PolicyField::SubscriptionPrivateValues)
                }
                PolicyEdit::Limit(kind, edit) => {
                    let field = match edit {
                        LimitEdit::Operations(_) => LimitField::Operations,
                        LimitEdit::AuthType(_) => LimitField::AuthType,
                        LimitEdit::RequireUser(_) => LimitField::RequireUser,
                        LimitEdit::Order(_) => LimitField::Order,
                    };
                    FieldPath::Limit(*role, *kind, field)
                }
            },
        }
    }

    /// Parse a `KEY=VALUE` assignment into a typed edit.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MalformedAssignment` when `=` is missing, and the errors of
    /// [`FieldPath::from_str`] and [`FieldPath::edit_from_input`] otherwise.
    pub fn from_assignment(input: &str) -> ConfigResult<Self> {
        let Some((key, value)) = input.split_once('=') else {
            return Err(ConfigError::MalformedAssignment {
                input: input.to_string(),
            });
        };
        key.trim().parse::<FieldPath>()?.edit_from_input(value)
    }
}

/// Editable fields of a `<Location>` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocationField {
    /// `Allow`
    Allow,
    /// `Order`
    Order,
    /// `AuthType`
    AuthType,
    /// `Require user`
    RequireUser,
}

impl LocationField {
    const ALL: [Self; 4] = [Self::Allow, Self::Order, Self::AuthType, Self::RequireUser];

    const fn key(self) -> &'static str {
        match self {
            Self::Allow => "allow",
            Self::Order => "order",
            Self::AuthType => "auth_type",
            Self::RequireUser => "require_user",
        }
    }
}

/// Editable privacy fields of a `<Policy>` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyField {
    /// `JobPrivateAccess`
    JobPrivateAccess,
    /// `JobPrivateValues`
    JobPrivateValues,
    /// `SubscriptionPrivateAccess`
    SubscriptionPrivateAccess,
    /// `SubscriptionPrivateValues`
    SubscriptionPrivateValues,
}

impl PolicyField {
    const ALL: [Self; 4] = [
        Self::JobPrivateAccess,
        Self::JobPrivateValues,
        Self::SubscriptionPrivateAccess,
        Self::SubscriptionPrivateValues,
    ];

    const fn key(self) -> &'static str {
        match self {
            Self::JobPrivateAccess => "job_private_access",
            Self::JobPrivateValues => "job_private_values",
            Self::SubscriptionPrivateAccess => "subscription_private_access",
            Self::SubscriptionPrivateValues => "subscription_private_values",
        }
    }
}

/// Editable fields of a `<Limit>` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LimitField {
    /// Operation list inside the opening tag.
    Operations,
    /// `AuthType`
    AuthType,
    /// `Require user`
    RequireUser,
    /// `Order`
    Order,
}

impl LimitField {
    const ALL: [Self; 4] = [
        Self::Operations,
        Self::AuthType,
        Self::RequireUser,
        Self::Order,
    ];

    const fn key(self) -> &'static str {
        match self {
            Self::Operations => "operations",
            Self::AuthType => "auth_type",
            Self::RequireUser => "require_user",
            Self::Order => "order",
        }
    }
}

/// Stable name of every editable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldPath {
    /// `log_level`
    LogLevel,
    /// `page_log_format`
    PageLogFormat,
    /// `max_log_size`
    MaxLogSize,
    /// `port`
    Port,
    /// `listen`
    ListenAddresses,
    /// `browsing`
    Browsing,
    /// `browse_local_protocols`
    BrowseLocalProtocols,
    /// `default_auth_type`
    DefaultAuthType,
    /// `web_interface`
    WebInterface,
    /// `location.<role>.<field>`
    Location(LocationRole, LocationField),
    /// `policy.<role>.<field>`
    Policy(PolicyRole, PolicyField),
    /// `policy.<role>.limit.<kind>.<field>`
    Limit(PolicyRole, LimitKind, LimitField),
}

const TOP_LEVEL: [FieldPath; 9] = [
    FieldPath::LogLevel,
    FieldPath::PageLogFormat,
    FieldPath::MaxLogSize,
    FieldPath::Port,
    FieldPath::ListenAddresses,
    FieldPath::Browsing,
    FieldPath::BrowseLocalProtocols,
    FieldPath::DefaultAuthType,
    FieldPath::WebInterface,
];

impl FieldPath {
    /// Every editable field in document order.
    #[must_use]
    pub fn all() -> Vec<Self> {
        let mut fields = TOP_LEVEL.to_vec();
        for role in LocationRole::ALL {
            fields.extend(LocationField::ALL.map(|field| Self::Location(role, field)));
        }
        for role in PolicyRole::ALL {
            fields.extend(PolicyField::ALL.map(|field| Self::Policy(role, field)));
            for kind in LimitKind::ALL {
                fields.extend(LimitField::ALL.map(|field| Self::Limit(role, kind, field)));
            }
        }
        fields
    }

    const fn top_level_key(self) -> Option<&'static str> {
        match self {
            Self::LogLevel => Some("log_level"),
            Self::PageLogFormat => Some("page_log_format"),
            Self::MaxLogSize => Some("max_log_size"),
            Self::Port => Some("port"),
            Self::ListenAddresses => Some("listen"),
            Self::Browsing => Some("browsing"),
            Self::BrowseLocalProtocols => Some("browse_local_protocols"),
            Self::DefaultAuthType => Some("default_auth_type"),
            Self::WebInterface => Some("web_interface"),
            Self::Location(..) | Self::Policy(..) | Self::Limit(..) => None,
        }
    }

    /// Convert raw operator input into a typed edit for this field.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` when an enumerated or boolean field receives a
    /// spelling it does not recognise. Numeric and free-text fields never fail.
    pub fn edit_from_input(self, raw: &str) -> ConfigResult<ConfigEdit> {
        let edit = match self {
            Self::LogLevel => {
                ConfigEdit::LogLevel(self.enumerated(raw, LogLevel::from_directive)?)
            }
            Self::PageLogFormat => ConfigEdit::PageLogFormat(raw.to_string()),
            Self::MaxLogSize => ConfigEdit::MaxLogSize(coerce_max_log_size(raw)),
            Self::Port => ConfigEdit::Port(coerce_port(raw)),
            Self::ListenAddresses => ConfigEdit::ListenAddresses(parse_listen_addresses(raw)),
            Self::Browsing => ConfigEdit::Browsing(self.enumerated(raw, parse_switch)?),
            Self::BrowseLocalProtocols => ConfigEdit::BrowseLocalProtocols(
                self.enumerated(raw, BrowseProtocol::from_directive)?,
            ),
            Self::DefaultAuthType => ConfigEdit::DefaultAuthType(
                self.enumerated(raw, DefaultAuthType::from_directive)?,
            ),
            Self::WebInterface => ConfigEdit::WebInterface(self.enumerated(raw, parse_switch)?),
            Self::Location(role, field) => {
                let edit = match field {
                    LocationField::Allow => LocationEdit::Allow(raw.to_string()),
                    LocationField::Order => {
                        LocationEdit::Order(self.enumerated(raw, AccessOrder::from_directive)?)
                    }
                    LocationField::AuthType => LocationEdit::AuthType(self.optional_auth(raw)?),
                    LocationField::RequireUser => LocationEdit::RequireUser(non_empty(raw)),
                };
                ConfigEdit::Location(role, edit)
            }
            Self::Policy(role, field) => {
                let value = raw.to_string();
                let edit = match field {
                    PolicyField::JobPrivateAccess => PolicyEdit::JobPrivateAccess(value),
                    PolicyField::JobPrivateValues => PolicyEdit::JobPrivateValues(value),
                    PolicyField::SubscriptionPrivateAccess => {
                        PolicyEdit::SubscriptionPrivateAccess(value)
                    }
                    PolicyField::SubscriptionPrivateValues => {
                        PolicyEdit::SubscriptionPrivateValues(value)
                    }
                };
                ConfigEdit::Policy(role, edit)
            }
            Self::Limit(role, kind, field) => {
                let edit = match field {
                    LimitField::Operations => LimitEdit::Operations(raw.to_string()),
                    LimitField::AuthType => LimitEdit::AuthType(self.optional_auth(raw)?),
                    LimitField::RequireUser => LimitEdit::RequireUser(non_empty(raw)),
                    LimitField::Order => {
                        LimitEdit::Order(self.enumerated(raw, AccessOrder::from_directive)?)
                    }
                };
                ConfigEdit::Policy(role, PolicyEdit::Limit(kind, edit))
            }
        };
        Ok(edit)
    }

    /// Current value of this field, in the form accepted by [`Self::edit_from_input`].
    #[must_use]
    pub fn read(self, config: &CupsdConfig) -> String {
        match self {
            Self::LogLevel => config.log_level.as_str().to_string(),
            Self::PageLogFormat => config.page_log_format.clone(),
            Self::MaxLogSize => config.max_log_size.to_string(),
            Self::Port => config.port.to_string(),
            Self::ListenAddresses => config.listen_addresses.join(", "),
            Self::Browsing => on_off(config.browsing).to_string(),
            Self::BrowseLocalProtocols => config.browse_local_protocols.as_str().to_string(),
            Self::DefaultAuthType => config.default_auth_type.as_str().to_string(),
            Self::WebInterface => yes_no(config.web_interface).to_string(),
            Self::Location(role, field) => {
                let rule = config.locations.get(role);
                match field {
                    LocationField::Allow => rule.allow.clone(),
                    LocationField::Order => rule.order.as_str().to_string(),
                    LocationField::AuthType => auth_text(rule.auth_type),
                    LocationField::RequireUser => rule.require_user.clone().unwrap_or_default(),
                }
            }
            Self::Policy(role, field) => {
                let policy = config.policies.get(role);
                match field {
                    PolicyField::JobPrivateAccess => policy.job_private_access.clone(),
                    PolicyField::JobPrivateValues => policy.job_private_values.clone(),
                    PolicyField::SubscriptionPrivateAccess => {
                        policy.subscription_private_access.clone()
                    }
                    PolicyField::SubscriptionPrivateValues => {
                        policy.subscription_private_values.clone()
                    }
                }
            }
            Self::Limit(role, kind, field) => {
                let Some(limit) = config.policies.get(role).limit(kind) else {
                    return String::new();
                };
                match field {
                    LimitField::Operations => limit.operations.clone(),
                    LimitField::AuthType => auth_text(limit.auth_type),
                    LimitField::RequireUser => limit.require_user.clone().unwrap_or_default(),
                    LimitField::Order => limit.order.as_str().to_string(),
                }
            }
        }
    }

    fn enumerated<T>(self, raw: &str, parse: impl Fn(&str) -> Option<T>) -> ConfigResult<T> {
        parse(raw.trim()).ok_or_else(|| ConfigError::InvalidValue {
            field: self.to_string(),
            value: raw.to_string(),
            reason: "unrecognised choice",
        })
    }

    fn optional_auth(self, raw: &str) -> ConfigResult<Option<AuthType>> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
            return Ok(None);
        }
        self.enumerated(trimmed, AuthType::from_directive).map(Some)
    }
}

impl Display for FieldPath {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Location(role, field) => {
                write!(formatter, "location.{}.{}", role.key(), field.key())
            }
            Self::Policy(role, field) => {
                write!(formatter, "policy.{}.{}", role.name(), field.key())
            }
            Self::Limit(role, kind, field) => write!(
                formatter,
                "policy.{}.limit.{}.{}",
                role.name(),
                kind.key(),
                field.key()
            ),
            other => formatter.write_str(other.top_level_key().unwrap_or_default()),
        }
    }
}

impl FromStr for FieldPath {
    type Err = ConfigError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        let unknown = || ConfigError::UnknownField {
            key: key.to_string(),
        };
        let segments: Vec<&str> = key.split('.').collect();
        match segments.as_slice() {
            [name] => TOP_LEVEL
                .into_iter()
                .find(|field| field.top_level_key() == Some(*name))
                .ok_or_else(unknown),
            ["location", role, field] => {
                let role = LocationRole::from_key(role).ok_or_else(unknown)?;
                let field = LocationField::ALL
                    .into_iter()
                    .find(|candidate| candidate.key() == *field)
                    .ok_or_else(unknown)?;
                Ok(Self::Location(role, field))
            }
            ["policy", role, field] => {
                let role = PolicyRole::from_key(role).ok_or_else(unknown)?;
                let field = PolicyField::ALL
                    .into_iter()
                    .find(|candidate| candidate.key() == *field)
                    .ok_or_else(unknown)?;
                Ok(Self::Policy(role, field))
            }
            ["policy", role, "limit", kind, field] => {
                let role = PolicyRole::from_key(role).ok_or_else(unknown)?;
                let kind = LimitKind::from_key(kind).ok_or_else(unknown)?;
                let field = LimitField::ALL
                    .into_iter()
                    .find(|candidate| candidate.key() == *field)
                    .ok_or_else(unknown)?;
                Ok(Self::Limit(role, kind, field))
            }
            _ => Err(unknown()),
        }
    }
}

/// Split a comma-separated list, trimming entries and dropping empty ones.
///
/// Order and duplicates are preserved.
#[must_use]
pub fn parse_listen_addresses(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

/// Coerce operator input for `MaxLogSize`; anything but a positive integer becomes `0`.
#[must_use]
pub fn coerce_max_log_size(raw: &str) -> u64 {
    leading_integer(raw)
        .and_then(|value| u64::try_from(value).ok())
        .unwrap_or(0)
}

/// Coerce operator input for `Port`; missing digits or zero fall back to `631`.
#[must_use]
pub fn coerce_port(raw: &str) -> i64 {
    leading_integer(raw)
        .filter(|value| *value != 0)
        .unwrap_or(DEFAULT_PORT)
}

/// Parse the leading decimal integer of `raw`, ignoring anything after the digits.
///
/// Leading whitespace and one sign character are accepted. Returns `None` when no digit
/// follows or the value overflows.
fn leading_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut value: i64 = 0;
    let mut seen_digit = false;
    for byte in digits.bytes().take_while(u8::is_ascii_digit) {
        seen_digit = true;
        value = value
            .checked_mul(10)?
            .checked_add(i64::from(byte - b'0'))?;
    }

    if !seen_digit {
        return None;
    }
    Some(if negative { -value } else { value })
}

fn parse_switch(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "on" | "yes" | "true" | "1" => Some(true),
        "off" | "no" | "false" | "0" => Some(false),
        _ => None,
    }
}

fn non_empty(raw: &str) -> Option<String> {
    if raw.is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}

fn auth_text(auth: Option<AuthType>) -> String {
    auth.map(AuthType::as_str).unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::default_config;
    use crate::render::render_cupsd_conf;

    #[test]
    fn listen_addresses_are_split_trimmed_and_filtered() {
        assert_eq!(parse_listen_addresses("a, b ,,c"), vec!["a", "b", "c"]);
        assert_eq!(parse_listen_addresses("x,x"), vec!["x", "x"]);
        assert!(parse_listen_addresses(" , ,").is_empty());
    }

    #[test]
    fn port_falls_back_to_default() {
        assert_eq!(coerce_port("abc"), 631);
        assert_eq!(coerce_port(""), 631);
        assert_eq!(coerce_port("0"), 631);
        assert_eq!(coerce_port("8631"), 8631);
        assert_eq!(coerce_port("  8080tcp"), 8080);
        assert_eq!(coerce_port("-5"), -5);
        assert_eq!(coerce_port("99999999999999999999"), 631);
    }

    #[test]
    fn max_log_size_falls_back_to_zero() {
        assert_eq!(coerce_max_log_size("abc"), 0);
        assert_eq!(coerce_max_log_size("1048576"), 1_048_576);
        assert_eq!(coerce_max_log_size("12m"), 12);
        assert_eq!(coerce_max_log_size("-1"), 0);
    }

    #[test]
    fn port_input_never_fails() {
        let edit = FieldPath::Port
            .edit_from_input("abc")
            .expect("numeric input should not fail");
        let config = apply_edit(&default_config(), edit);
        assert_eq!(config.port, 631);
    }

    #[test]
    fn enumerated_fields_reject_unknown_spellings() {
        let err = FieldPath::LogLevel
            .edit_from_input("loud")
            .expect_err("unknown level should fail");
        assert!(err.is_input_error());
        assert!(err.to_string().contains("log_level"));

        let err = "location.root.order=both"
            .parse::<FieldPath>()
            .expect_err("value in key should not parse");
        assert!(matches!(err, ConfigError::UnknownField { .. }));
    }

    #[test]
    fn optional_auth_accepts_none() {
        let edit = ConfigEdit::from_assignment("location.admin-conf.auth_type=none")
            .expect("none clears auth");
        assert_eq!(
            edit,
            ConfigEdit::Location(LocationRole::AdminConf, LocationEdit::AuthType(None))
        );
        let edit = ConfigEdit::from_assignment("location.admin-conf.auth_type=")
            .expect("empty clears auth");
        assert_eq!(
            edit,
            ConfigEdit::Location(LocationRole::AdminConf, LocationEdit::AuthType(None))
        );
    }

    #[test]
    fn assignments_require_separator() {
        let err = ConfigEdit::from_assignment("port").expect_err("missing =");
        assert!(matches!(err, ConfigError::MalformedAssignment { .. }));
        let edit = ConfigEdit::from_assignment("listen=a=b, c").expect("value may contain =");
        assert_eq!(
            edit,
            ConfigEdit::ListenAddresses(vec!["a=b".to_string(), "c".to_string()])
        );
    }

    #[test]
    fn every_field_key_round_trips() {
        let fields = FieldPath::all();
        assert_eq!(fields.len(), 9 + 4 * 4 + 3 * (4 + 6 * 4));
        for field in fields {
            let key = field.to_string();
            assert_eq!(key.parse::<FieldPath>().ok(), Some(field), "key {key}");
        }
    }

    #[test]
    fn writing_back_read_values_is_a_no_op() {
        let config = default_config();
        let baseline = render_cupsd_conf(&config);
        for field in FieldPath::all() {
            let edit = field
                .edit_from_input(&field.read(&config))
                .expect("read value should parse");
            assert_eq!(edit.field(), field);
            let edited = apply_edit(&config, edit);
            assert_eq!(edited, config, "field {field}");
            assert_eq!(render_cupsd_conf(&edited), baseline);
        }
    }

    #[test]
    fn limit_edit_touches_only_its_policy() {
        let config = default_config();
        let edited = apply_edit(
            &config,
            ConfigEdit::Policy(
                PolicyRole::Authenticated,
                PolicyEdit::Limit(
                    LimitKind::Fallback,
                    LimitEdit::AuthType(Some(AuthType::Basic)),
                ),
            ),
        );
        assert_eq!(edited.policies.default, config.policies.default);
        assert_eq!(edited.policies.kerberos, config.policies.kerberos);
        let fallback = edited
            .policies
            .authenticated
            .limit(LimitKind::Fallback)
            .expect("fallback limit");
        assert_eq!(fallback.auth_type, Some(AuthType::Basic));
    }

    #[test]
    fn apply_edit_leaves_input_untouched() {
        let config = default_config();
        let edited = apply_edit(&config, ConfigEdit::Browsing(false));
        assert!(config.browsing);
        assert!(!edited.browsing);
    }
}
