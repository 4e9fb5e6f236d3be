//! Editor session owning the one live document.
//!
//! # Design
//! - Every edit replaces the whole document value; nothing is mutated in place.
//! - The rendered text is cached until the next edit or reset.

use std::time::Instant;

use tracing::debug;

use crate::defaults::default_config;
use crate::edit::{ConfigEdit, FieldPath};
use crate::error::ConfigResult;
use crate::export::{Clipboard, CopyFeedback, CopyOutcome, ExportArtifact, copy_to_clipboard};
use crate::model::CupsdConfig;
use crate::render::render_cupsd_conf;

/// Owner of the document being edited plus its transient UI state.
#[derive(Debug, Clone)]
pub struct EditorSession {
    config: CupsdConfig,
    rendered: Option<String>,
    feedback: CopyFeedback,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorSession {
    /// Start a session from the stock configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(default_config())
    }

    /// Start a session from an existing document.
    #[must_use]
    pub fn from_config(config: CupsdConfig) -> Self {
        Self {
            config,
            rendered: None,
            feedback: CopyFeedback::default(),
        }
    }

    /// Current document.
    #[must_use]
    pub const fn config(&self) -> &CupsdConfig {
        &self.config
    }

    /// Replace the document with `edit` applied.
    pub fn apply(&mut self, edit: ConfigEdit) {
        let field = edit.field();
        let current = std::mem::take(&mut self.config);
        self.config = current.with_edit(edit);
        self.rendered = None;
        debug!(field = %field, "applied configuration edit");
    }

    /// Parse raw operator input for `field` and apply it.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`FieldPath::edit_from_input`]; the document is unchanged on error.
    pub fn apply_input(&mut self, field: FieldPath, raw: &str) -> ConfigResult<()> {
        let edit = field.edit_from_input(raw)?;
        self.apply(edit);
        Ok(())
    }

    /// Restore the stock configuration.
    pub fn reset(&mut self) {
        self.config = default_config();
        self.rendered = None;
        debug!("reset configuration to defaults");
    }

    /// Rendered cupsd.conf for the current document.
    pub fn rendered(&mut self) -> &str {
        self.rendered
            .get_or_insert_with(|| render_cupsd_conf(&self.config))
    }

    /// Artifact for saving the current document.
    pub fn export(&mut self) -> ExportArtifact {
        ExportArtifact::new(self.rendered().to_string())
    }

    /// Copy the current document and update the copy indicator.
    pub fn copy(&mut self, clipboard: &dyn Clipboard, now: Instant) -> CopyOutcome {
        let outcome = copy_to_clipboard(clipboard, self.rendered());
        self.feedback.record(outcome, now);
        outcome
    }

    /// Whether the "copied" indicator is showing at `now`.
    #[must_use]
    pub fn copy_feedback_active(&self, now: Instant) -> bool {
        self.feedback.is_active(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit::{LocationEdit, LocationField};
    use crate::model::{AccessOrder, LocationRole, LogLevel};
    use std::io;
    use std::time::Duration;

    struct NullClipboard;

    impl Clipboard for NullClipboard {
        fn write_text(&self, _text: &str) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn rendering_is_stable_across_calls() {
        let mut session = EditorSession::new();
        let first = session.rendered().to_string();
        let second = session.rendered().to_string();
        assert_eq!(first, second);
        assert_eq!(first, render_cupsd_conf(&default_config()));
    }

    #[test]
    fn edits_invalidate_cached_rendering() {
        let mut session = EditorSession::new();
        let before = session.rendered().to_string();
        session.apply(ConfigEdit::LogLevel(LogLevel::Debug2));
        let after = session.rendered().to_string();
        assert_ne!(before, after);
        assert!(after.lines().any(|line| line == "LogLevel debug2"));
    }

    #[test]
    fn invalid_input_leaves_document_unchanged() {
        let mut session = EditorSession::new();
        let field = FieldPath::Location(LocationRole::Root, LocationField::Order);
        assert!(session.apply_input(field, "sideways").is_err());
        assert_eq!(session.config(), &default_config());

        session
            .apply_input(field, "deny,allow")
            .expect("valid order applies");
        assert_eq!(session.config().locations.root.order, AccessOrder::DenyAllow);
    }

    #[test]
    fn reset_restores_defaults() {
        let mut session = EditorSession::new();
        session.apply(ConfigEdit::Location(
            LocationRole::Admin,
            LocationEdit::Allow(String::new()),
        ));
        assert_ne!(session.config(), &default_config());
        session.reset();
        assert_eq!(session.config(), &default_config());
        assert_eq!(session.rendered(), render_cupsd_conf(&default_config()));
    }

    #[test]
    fn copy_sets_transient_feedback() {
        let mut session = EditorSession::new();
        let now = Instant::now();
        assert_eq!(session.copy(&NullClipboard, now), CopyOutcome::Copied);
        assert!(session.copy_feedback_active(now + Duration::from_secs(1)));
        assert!(!session.copy_feedback_active(now + Duration::from_secs(3)));
        assert_eq!(session.export().body, session.rendered());
    }
}
