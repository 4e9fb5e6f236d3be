#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Typed cupsd.conf document: model, stock defaults, edits, and renderer.
//!
//! Layout: `model.rs` (document types), `defaults.rs` (stock document),
//! `render.rs` (cupsd.conf text), `edit.rs` (closed edit set and field keys),
//! `session.rs` (live document with cached rendering), `export.rs` (file and
//! clipboard surfaces), `preferences.rs` (persisted console settings).

pub mod defaults;
pub mod edit;
pub mod error;
pub mod export;
pub mod model;
pub mod preferences;
pub mod render;
pub mod session;

pub use defaults::{DEFAULT_LISTEN_SOCKET, DEFAULT_PORT, default_config};
pub use edit::{
    ConfigEdit, FieldPath, LimitEdit, LimitField, LocationEdit, LocationField, PolicyEdit,
    PolicyField, apply_edit, coerce_max_log_size, coerce_port, parse_listen_addresses,
};
pub use error::{ConfigError, ConfigResult};
pub use export::{
    COPY_FEEDBACK_WINDOW, Clipboard, ClipboardCommand, CommandClipboard, CopyFeedback,
    CopyOutcome, ExportArtifact, copy_to_clipboard,
};
pub use model::{
    AccessOrder, AuthType, BrowseProtocol, CupsdConfig, DefaultAuthType, LimitKind, LimitRule,
    LocationRole, LocationRule, Locations, LogLevel, Policies, Policy, PolicyRole,
};
pub use preferences::{
    ConnectionSettings, ConsoleSettings, JsonFileStore, MemoryStore, PreferenceStore,
};
pub use render::render_cupsd_conf;
pub use session::EditorSession;
