//! Output renderers and formatting helpers for CLI commands.

use anyhow::anyhow;
use cupsadmin_config::{ConnectionSettings, CupsdConfig, FieldPath};
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::context::{CliError, CliResult};

const MASK: &str = "********";

pub(crate) fn to_pretty_json<T: Serialize>(value: &T) -> CliResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|err| CliError::failure(anyhow!("failed to format JSON: {err}")))
}

#[derive(Debug, Serialize)]
struct FieldValue {
    key: String,
    value: String,
}

/// Every editable field and its value, one `key = value` line each or a JSON array.
pub(crate) fn format_fields(config: &CupsdConfig, format: OutputFormat) -> CliResult<String> {
    let fields: Vec<FieldValue> = FieldPath::all()
        .into_iter()
        .map(|field| FieldValue {
            key: field.to_string(),
            value: field.read(config),
        })
        .collect();
    match format {
        OutputFormat::Json => to_pretty_json(&fields),
        OutputFormat::Text => {
            let width = fields.iter().map(|field| field.key.len()).max().unwrap_or(0);
            Ok(fields
                .iter()
                .map(|field| format!("{:<width$} = {}", field.key, field.value))
                .collect::<Vec<_>>()
                .join("\n"))
        }
    }
}

/// Connection settings and console state as shown to the operator.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ServerStatus {
    pub(crate) server_address: String,
    pub(crate) port: String,
    pub(crate) username: String,
    pub(crate) password: String,
    pub(crate) configured: bool,
    pub(crate) demo_mode: bool,
    pub(crate) first_visit: bool,
}

impl ServerStatus {
    pub(crate) fn new(connection: ConnectionSettings, demo_mode: bool, first_visit: bool) -> Self {
        let configured = connection.is_configured();
        let password = if connection.password.is_empty() {
            String::new()
        } else {
            MASK.to_string()
        };
        Self {
            server_address: connection.server_address,
            port: connection.port,
            username: connection.username,
            password,
            configured,
            demo_mode,
            first_visit,
        }
    }
}

pub(crate) fn format_server_status(
    status: &ServerStatus,
    format: OutputFormat,
) -> CliResult<String> {
    match format {
        OutputFormat::Json => to_pretty_json(status),
        OutputFormat::Text => {
            let unset = |value: &str| {
                if value.is_empty() {
                    "<unset>".to_string()
                } else {
                    value.to_string()
                }
            };
            Ok([
                format!("server address: {}", unset(&status.server_address)),
                format!("port: {}", unset(&status.port)),
                format!("username: {}", unset(&status.username)),
                format!("password: {}", unset(&status.password)),
                format!("configured: {}", yes_no(status.configured)),
                format!("demo mode: {}", on_off(status.demo_mode)),
                format!("first visit: {}", yes_no(status.first_visit)),
            ]
            .join("\n"))
        }
    }
}

const fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

const fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cupsadmin_config::default_config;

    #[test]
    fn fields_text_lists_every_key_aligned() -> anyhow::Result<()> {
        let text = format_fields(&default_config(), OutputFormat::Text)
            .map_err(|err| anyhow!(err.display_message()))?;
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), FieldPath::all().len());
        assert!(lines[0].starts_with("log_level "));
        assert!(lines[0].ends_with(" = warn"));
        assert!(
            lines
                .iter()
                .any(|line| line.starts_with("location.admin-conf.require_user")
                    && line.ends_with("= @SYSTEM"))
        );
        Ok(())
    }

    #[test]
    fn fields_json_preserves_document_order() -> anyhow::Result<()> {
        let text = format_fields(&default_config(), OutputFormat::Json)
            .map_err(|err| anyhow!(err.display_message()))?;
        let value: serde_json::Value = serde_json::from_str(&text)?;
        let entries = value.as_array().expect("array of fields");
        assert_eq!(entries[0]["key"], "log_level");
        assert_eq!(entries[3]["key"], "port");
        assert_eq!(entries[3]["value"], "631");
        Ok(())
    }

    #[test]
    fn server_status_masks_password() -> anyhow::Result<()> {
        let status = ServerStatus::new(
            ConnectionSettings {
                server_address: "printhost".to_string(),
                password: "hunter2".to_string(),
                ..ConnectionSettings::default()
            },
            false,
            true,
        );
        assert!(status.configured);
        let text = format_server_status(&status, OutputFormat::Text)
            .map_err(|err| anyhow!(err.display_message()))?;
        assert!(text.contains("password: ********"));
        assert!(text.contains("username: <unset>"));
        assert!(!text.contains("hunter2"));

        let json = format_server_status(&status, OutputFormat::Json)
            .map_err(|err| anyhow!(err.display_message()))?;
        let value: serde_json::Value = serde_json::from_str(&json)?;
        assert_eq!(value["serverAddress"], "printhost");
        assert_eq!(value["firstVisit"], true);
        Ok(())
    }
}
