//! Export and clipboard surfaces for rendered documents.
//!
//! # Design
//! - Both surfaces only hand the rendered text to a platform capability.
//! - Clipboard failures are logged and reported as an outcome, never as an error.
//! - Copy feedback is a transient flag with an explicit clock so callers control time.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::error::{ConfigError, ConfigResult};
use crate::model::CupsdConfig;
use crate::render::render_cupsd_conf;

/// File name offered for downloaded documents.
pub const EXPORT_FILE_NAME: &str = "cupsd.conf";
/// MIME type of exported documents.
pub const EXPORT_MIME_TYPE: &str = "text/plain";
/// How long the "copied" indicator stays active after a successful copy.
pub const COPY_FEEDBACK_WINDOW: Duration = Duration::from_secs(2);

/// A rendered document ready to be saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    /// Suggested file name.
    pub file_name: &'static str,
    /// MIME type of the body.
    pub mime_type: &'static str,
    /// Rendered cupsd.conf text.
    pub body: String,
}

impl ExportArtifact {
    /// Wrap already-rendered text.
    #[must_use]
    pub const fn new(body: String) -> Self {
        Self {
            file_name: EXPORT_FILE_NAME,
            mime_type: EXPORT_MIME_TYPE,
            body,
        }
    }

    /// Render a configuration and wrap the result.
    #[must_use]
    pub fn from_config(config: &CupsdConfig) -> Self {
        Self::new(render_cupsd_conf(config))
    }

    /// Write the artifact into `dir` and return the written path.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` when the directory cannot be created or the file cannot be
    /// written.
    pub fn write_to(&self, dir: &Path) -> ConfigResult<PathBuf> {
        fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            operation: "export.create_dir",
            path: dir.to_path_buf(),
            source,
        })?;
        let path = dir.join(self.file_name);
        fs::write(&path, self.body.as_bytes()).map_err(|source| ConfigError::Io {
            operation: "export.write",
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), bytes = self.body.len(), "exported cupsd.conf");
        Ok(path)
    }
}

/// Destination for copied text.
pub trait Clipboard {
    /// Replace the clipboard contents with `text`.
    ///
    /// # Errors
    ///
    /// Returns an IO error when the platform clipboard cannot be written.
    fn write_text(&self, text: &str) -> io::Result<()>;
}

/// Clipboard backed by the first platform helper found on `PATH`.
#[derive(Debug, Clone)]
pub struct CommandClipboard {
    candidates: Vec<ClipboardCommand>,
}

/// One external clipboard helper invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardCommand {
    /// Executable name.
    pub program: String,
    /// Arguments passed to the executable.
    pub args: Vec<String>,
}

impl ClipboardCommand {
    fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|arg| (*arg).to_string()).collect(),
        }
    }

    fn pipe(&self, text: &str) -> io::Result<()> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        feed_and_reap(&mut child, &self.program, text)
    }
}

/// Write `text` to the child's stdin and always wait for it, even when the write fails.
fn feed_and_reap(child: &mut Child, program: &str, text: &str) -> io::Result<()> {
    let written = child
        .stdin
        .take()
        .map_or(Ok(()), |mut stdin| stdin.write_all(text.as_bytes()));
    let status = child.wait()?;
    written?;
    if status.success() {
        Ok(())
    } else {
        Err(io::Error::other(format!("{program} exited with {status}")))
    }
}

impl Default for CommandClipboard {
    fn default() -> Self {
        Self::with_candidates(vec![
            ClipboardCommand::new("wl-copy", &[]),
            ClipboardCommand::new("xclip", &["-selection", "clipboard"]),
            ClipboardCommand::new("xsel", &["--clipboard", "--input"]),
            ClipboardCommand::new("pbcopy", &[]),
        ])
    }
}

impl CommandClipboard {
    /// Use an explicit list of helpers, tried in order.
    #[must_use]
    pub const fn with_candidates(candidates: Vec<ClipboardCommand>) -> Self {
        Self { candidates }
    }
}

impl Clipboard for CommandClipboard {
    fn write_text(&self, text: &str) -> io::Result<()> {
        let mut last_error = None;
        for candidate in &self.candidates {
            match candidate.pipe(text) {
                Ok(()) => {
                    debug!(program = %candidate.program, "clipboard helper accepted text");
                    return Ok(());
                }
                Err(err) => {
                    debug!(program = %candidate.program, error = %err, "clipboard helper failed");
                    last_error = Some(err);
                }
            }
        }
        Err(last_error
            .unwrap_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no clipboard helper")))
    }
}

/// Result of a copy attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    /// Text reached the clipboard.
    Copied,
    /// Clipboard write failed; the failure has been logged.
    Failed,
}

/// Copy `text` to `clipboard`, logging rather than returning failures.
pub fn copy_to_clipboard(clipboard: &dyn Clipboard, text: &str) -> CopyOutcome {
    match clipboard.write_text(text) {
        Ok(()) => CopyOutcome::Copied,
        Err(err) => {
            warn!(error = %err, "failed to copy cupsd.conf to clipboard");
            CopyOutcome::Failed
        }
    }
}

/// Transient "copied" indicator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyFeedback {
    copied_at: Option<Instant>,
}

impl CopyFeedback {
    /// Record a copy outcome observed at `now`. Failures leave the indicator untouched.
    pub const fn record(&mut self, outcome: CopyOutcome, now: Instant) {
        if matches!(outcome, CopyOutcome::Copied) {
            self.copied_at = Some(now);
        }
    }

    /// Whether the indicator is showing at `now`.
    #[must_use]
    pub fn is_active(&self, now: Instant) -> bool {
        self.copied_at
            .is_some_and(|at| now.saturating_duration_since(at) < COPY_FEEDBACK_WINDOW)
    }
}
