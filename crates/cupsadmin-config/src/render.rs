//! Deterministic cupsd.conf renderer.
//!
//! # Design
//! - Total function of the document model: no validation, no escaping, values are emitted verbatim.
//! - Location and policy blocks share one routine each, driven by the role enums.
//! - Lines are joined with `\n`; the document ends with the blank line after the last policy.

use crate::model::{
    AuthType, CupsdConfig, LimitRule, LocationRole, LocationRule, Policy, PolicyRole,
};

const HEADER: [&str; 4] = [
    "#",
    "# Configuration file for the CUPS scheduler.  See \"man cupsd.conf\" for a",
    "# complete description of this file.",
    "#",
];

/// Render a configuration to cupsd.conf text.
#[must_use]
pub fn render_cupsd_conf(config: &CupsdConfig) -> String {
    let mut out = ConfWriter::default();

    for line in HEADER {
        out.line(line);
    }
    out.blank();

    write_logging(&mut out, config);
    write_network(&mut out, config);
    write_browsing(&mut out, config);
    write_auth(&mut out, config);

    for role in LocationRole::ALL {
        write_location(&mut out, role, config.locations.get(role));
    }
    for role in PolicyRole::ALL {
        write_policy(&mut out, role, config.policies.get(role));
    }

    out.finish()
}

#[derive(Default)]
struct ConfWriter {
    lines: Vec<String>,
}

impl ConfWriter {
    fn line(&mut self, text: impl Into<String>) {
        self.lines.push(text.into());
    }

    fn blank(&mut self) {
        self.lines.push(String::new());
    }

    /// Emit `name value` only when the value is present and non-empty.
    fn optional(&mut self, indent: &str, name: &str, value: Option<&str>) {
        if let Some(value) = value.filter(|value| !value.is_empty()) {
            self.line(format!("{indent}{name} {value}"));
        }
    }

    fn finish(self) -> String {
        self.lines.join("\n")
    }
}

fn write_logging(out: &mut ConfWriter, config: &CupsdConfig) {
    out.line("# Log general information in error_log - change \"warn\" to \"debug\"");
    out.line("# for troubleshooting...");
    out.line(format!("LogLevel {}", config.log_level.as_str()));
    if config.page_log_format.is_empty() {
        out.line("PageLogFormat");
    } else {
        out.line(format!("PageLogFormat {}", config.page_log_format));
    }
    out.blank();
    out.line("# Deactivate CUPS' internal logrotating, as we provide a better one, especially");
    out.line("# LogLevel debug2 gets usable now");
    out.line(format!("MaxLogSize {}", config.max_log_size));
    out.blank();
}

fn write_network(out: &mut ConfWriter, config: &CupsdConfig) {
    out.line("# Only listen for connections from the local machine.");
    out.line(format!("Port {}", config.port));
    for address in &config.listen_addresses {
        out.line(format!("Listen {address}"));
    }
    out.blank();
}

fn write_browsing(out: &mut ConfWriter, config: &CupsdConfig) {
    out.line("# Show shared printers on the local network.");
    out.line(format!("Browsing {}", on_off(config.browsing)));
    out.line(format!(
        "BrowseLocalProtocols {}",
        config.browse_local_protocols.as_str()
    ));
    out.blank();
}

fn write_auth(out: &mut ConfWriter, config: &CupsdConfig) {
    out.line("# Default authentication type, when authentication is required...");
    out.line(format!("DefaultAuthType {}", config.default_auth_type.as_str()));
    out.blank();
    out.line("# Web interface setting...");
    out.line(format!("WebInterface {}", yes_no(config.web_interface)));
    out.blank();
}

fn write_location(out: &mut ConfWriter, role: LocationRole, rule: &LocationRule) {
    out.line(format!("# {}", role.comment()));
    out.line(format!("<Location {}>", role.path()));
    out.optional("  ", "AuthType", rule.auth_type.map(AuthType::as_str));
    out.optional("  ", "Require user", rule.require_user.as_deref());
    out.optional("  ", "Allow", Some(rule.allow.as_str()));
    out.line(format!("  Order {}", rule.order.as_str()));
    out.line("</Location>");
    out.blank();
}

fn write_policy(out: &mut ConfWriter, role: PolicyRole, policy: &Policy) {
    out.line(format!("# {}", role.comment()));
    out.line(format!("<Policy {}>", role.name()));
    out.line("  # Job/subscription privacy...");
    out.line(format!("  JobPrivateAccess {}", policy.job_private_access));
    out.line(format!("  JobPrivateValues {}", policy.job_private_values));
    out.line(format!(
        "  SubscriptionPrivateAccess {}",
        policy.subscription_private_access
    ));
    out.line(format!(
        "  SubscriptionPrivateValues {}",
        policy.subscription_private_values
    ));
    out.blank();

    for limit in &policy.limits {
        write_limit(out, limit);
    }

    out.line("</Policy>");
    out.blank();
}

fn write_limit(out: &mut ConfWriter, limit: &LimitRule) {
    if let Some(comment) = limit.kind.comment() {
        out.line(format!("  {comment}"));
    }
    out.line(format!("  <Limit {}>", limit.operations));
    out.optional("    ", "AuthType", limit.auth_type.map(AuthType::as_str));
    out.optional("    ", "Require user", limit.require_user.as_deref());
    out.line(format!("    Order {}", limit.order.as_str()));
    out.line("  </Limit>");
    out.blank();
}

pub(crate) const fn on_off(value: bool) -> &'static str {
    if value { "On" } else { "Off" }
}

pub(crate) const fn yes_no(value: bool) -> &'static str {
    if value { "Yes" } else { "No" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::default_config;
    use crate::model::AccessOrder;

    fn block<'a>(text: &'a str, opening: &str) -> Vec<&'a str> {
        text.lines()
            .skip_while(|line| *line != opening)
            .take_while(|line| !line.is_empty())
            .collect()
    }

    #[test]
    fn empty_page_log_format_has_no_trailing_space() {
        let text = render_cupsd_conf(&default_config());
        assert!(text.lines().any(|line| line == "PageLogFormat"));

        let mut config = default_config();
        config.page_log_format = "%p %u %j".to_string();
        let text = render_cupsd_conf(&config);
        assert!(text.lines().any(|line| line == "PageLogFormat %p %u %j"));
    }

    #[test]
    fn booleans_render_as_directive_words() {
        let mut config = default_config();
        config.browsing = false;
        config.web_interface = true;
        let text = render_cupsd_conf(&config);
        assert!(text.lines().any(|line| line == "Browsing Off"));
        assert!(text.lines().any(|line| line == "WebInterface Yes"));

        config.browsing = true;
        config.web_interface = false;
        let text = render_cupsd_conf(&config);
        assert!(text.lines().any(|line| line == "Browsing On"));
        assert!(text.lines().any(|line| line == "WebInterface No"));
    }

    #[test]
    fn empty_listen_list_emits_no_listen_lines() {
        let mut config = default_config();
        config.listen_addresses.clear();
        let text = render_cupsd_conf(&config);
        assert!(!text.lines().any(|line| line.starts_with("Listen")));
        assert_eq!(
            block(&text, "# Only listen for connections from the local machine."),
            vec!["# Only listen for connections from the local machine.", "Port 631"]
        );
    }

    #[test]
    fn location_omits_absent_directives_but_keeps_order() {
        let mut config = default_config();
        config.locations.root.allow = String::new();
        let text = render_cupsd_conf(&config);
        assert_eq!(
            block(&text, "<Location />"),
            vec!["<Location />", "  Order allow,deny", "</Location>"]
        );
    }

    #[test]
    fn location_directives_follow_fixed_order() {
        let mut config = default_config();
        config.locations.admin.auth_type = Some(AuthType::Digest);
        config.locations.admin.require_user = Some("@admins".to_string());
        config.locations.admin.order = AccessOrder::DenyAllow;
        let text = render_cupsd_conf(&config);
        assert_eq!(
            block(&text, "<Location /admin>"),
            vec![
                "<Location /admin>",
                "  AuthType Digest",
                "  Require user @admins",
                "  Allow all",
                "  Order deny,allow",
                "</Location>",
            ]
        );
    }

    #[test]
    fn empty_require_user_is_treated_as_absent() {
        let mut config = default_config();
        config.locations.admin_log.require_user = Some(String::new());
        let text = render_cupsd_conf(&config);
        assert_eq!(
            block(&text, "<Location /admin/log>"),
            vec![
                "<Location /admin/log>",
                "  AuthType Default",
                "  Order allow,deny",
                "</Location>",
            ]
        );
    }

    #[test]
    fn free_text_is_emitted_verbatim() {
        let mut config = default_config();
        config.locations.root.allow = "from <nowhere>\tat all".to_string();
        let text = render_cupsd_conf(&config);
        assert!(text.contains("  Allow from <nowhere>\tat all\n"));
    }

    #[test]
    fn document_ends_after_last_policy() {
        let text = render_cupsd_conf(&default_config());
        assert!(text.ends_with("</Policy>\n"));
        assert!(text.starts_with("#\n# Configuration file for the CUPS scheduler."));
    }
}
