//! Handlers for commands that build, print, and export cupsd.conf.

use std::time::Instant;

use anyhow::anyhow;
use cupsadmin_config::{CommandClipboard, ConfigEdit, CopyOutcome, EditorSession, FieldPath};
use tracing::info;

use crate::cli::{EditArgs, ExportArgs, FieldsArgs, GetArgs, OutputFormat, RenderArgs};
use crate::context::{CliError, CliResult};
use crate::output::{format_fields, to_pretty_json};

/// Start from the stock document and apply each `--set` assignment in order.
pub(crate) fn build_session(edits: &EditArgs) -> CliResult<EditorSession> {
    let mut session = EditorSession::new();
    for assignment in &edits.assignments {
        session.apply(ConfigEdit::from_assignment(assignment)?);
    }
    Ok(session)
}

pub(crate) fn handle_render(args: &RenderArgs) -> CliResult<()> {
    let output = render_output(args)?;
    match args.output {
        OutputFormat::Text => print!("{output}"),
        OutputFormat::Json => println!("{output}"),
    }
    Ok(())
}

fn render_output(args: &RenderArgs) -> CliResult<String> {
    let mut session = build_session(&args.edits)?;
    match args.output {
        OutputFormat::Text => Ok(session.rendered().to_string()),
        OutputFormat::Json => to_pretty_json(session.config()),
    }
}

pub(crate) fn handle_export(args: &ExportArgs) -> CliResult<()> {
    let mut session = build_session(&args.edits)?;
    let path = session.export().write_to(&args.dir)?;
    println!("wrote {}", path.display());
    Ok(())
}

pub(crate) fn handle_copy(args: &EditArgs) -> CliResult<()> {
    let mut session = build_session(args)?;
    match session.copy(&CommandClipboard::default(), Instant::now()) {
        CopyOutcome::Copied => {
            info!("copied cupsd.conf to clipboard");
            println!("copied cupsd.conf to the clipboard");
            Ok(())
        }
        CopyOutcome::Failed => Err(CliError::failure(anyhow!(
            "no clipboard helper accepted the text (tried wl-copy, xclip, xsel, pbcopy)"
        ))),
    }
}

pub(crate) fn handle_fields(args: &FieldsArgs) -> CliResult<()> {
    let session = build_session(&args.edits)?;
    println!("{}", format_fields(session.config(), args.output)?);
    Ok(())
}

pub(crate) fn handle_get(args: &GetArgs) -> CliResult<()> {
    println!("{}", field_value(args)?);
    Ok(())
}

fn field_value(args: &GetArgs) -> CliResult<String> {
    let field: FieldPath = args.key.parse()?;
    let session = build_session(&args.edits)?;
    Ok(field.read(session.config()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cupsadmin_config::{AccessOrder, LogLevel};

    fn edits(assignments: &[&str]) -> EditArgs {
        EditArgs {
            assignments: assignments.iter().map(ToString::to_string).collect(),
        }
    }

    #[test]
    fn assignments_apply_in_order() {
        let session = build_session(&edits(&[
            "log_level=info",
            "log_level=debug2",
            "location.root.order=deny,allow",
        ]))
        .expect("valid assignments");
        assert_eq!(session.config().log_level, LogLevel::Debug2);
        assert_eq!(session.config().locations.root.order, AccessOrder::DenyAllow);
    }

    #[test]
    fn malformed_assignment_is_a_validation_error() {
        let err = build_session(&edits(&["log_level"])).expect_err("missing '='");
        assert_eq!(err.exit_code(), 2);
        assert!(err.display_message().contains("KEY=VALUE"));

        let err = build_session(&edits(&["nope=1"])).expect_err("unknown key");
        assert_eq!(err.exit_code(), 2);

        let err = build_session(&edits(&["browse_local_protocols=bonjour"]))
            .expect_err("unknown protocol");
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn get_rejects_unknown_keys() {
        let err = handle_get(&GetArgs {
            key: "location.garden.allow".to_string(),
            edits: EditArgs::default(),
        })
        .expect_err("unknown location");
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn render_json_exposes_the_document_model() -> anyhow::Result<()> {
        let json = render_output(&RenderArgs {
            edits: edits(&["location.admin.order=deny,allow"]),
            output: OutputFormat::Json,
        })
        .map_err(|err| anyhow!(err.display_message()))?;
        let value: serde_json::Value = serde_json::from_str(&json)?;
        assert_eq!(value["log_level"], "warn");
        assert_eq!(value["port"], 631);
        assert_eq!(value["locations"]["admin_conf"]["require_user"], "@SYSTEM");
        assert_eq!(value["locations"]["admin"]["order"], "deny,allow");
        assert_eq!(value["policies"]["default"]["limits"].as_array().map(Vec::len), Some(6));
        Ok(())
    }

    #[test]
    fn render_text_matches_the_session_rendering() -> anyhow::Result<()> {
        let text = render_output(&RenderArgs::default())
            .map_err(|err| anyhow!(err.display_message()))?;
        assert_eq!(text, EditorSession::new().rendered());
        Ok(())
    }

    #[test]
    fn get_reads_the_edited_value() -> anyhow::Result<()> {
        let read = |key: &str, assignments: &[&str]| {
            field_value(&GetArgs {
                key: key.to_string(),
                edits: edits(assignments),
            })
            .map_err(|err| anyhow!(err.display_message()))
        };
        assert_eq!(read("location.admin-conf.require_user", &[])?, "@SYSTEM");
        assert_eq!(read("port", &["port=abc"])?, "631");
        assert_eq!(
            read("location.root.order", &["location.root.order=deny,allow"])?,
            "deny,allow"
        );
        Ok(())
    }

    #[test]
    fn export_writes_into_requested_directory() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        handle_export(&ExportArgs {
            edits: edits(&["port=8631"]),
            dir: dir.path().to_path_buf(),
        })
        .map_err(|err| anyhow!(err.display_message()))?;
        let written = std::fs::read_to_string(dir.path().join("cupsd.conf"))?;
        assert!(written.contains("\nPort 8631\n"));
        Ok(())
    }
}
