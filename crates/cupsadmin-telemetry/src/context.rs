//! Process-level span helpers.
//!
//! # Design
//! - One span per invocation carries the command name and build SHA so every event
//!   emitted while the command runs is attributable.

use tracing::{Span, span::Entered};

use crate::init::build_sha;

/// Guard that keeps the process-level span entered for the lifetime of the command.
pub struct GlobalContextGuard {
    _guard: Entered<'static>,
}

impl GlobalContextGuard {
    /// Enter the process span tagged with `command`.
    #[must_use]
    pub fn new(command: impl Into<String>) -> Self {
        let command = command.into();
        let span: &'static Span = Box::leak(Box::new(tracing::info_span!(
            "cupsadmin",
            command = %command,
            build_sha = %build_sha()
        )));
        let guard = span.enter();
        Self { _guard: guard }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_context_guard_enters_and_drops() {
        let guard = GlobalContextGuard::new("render");
        drop(guard);
    }
}
