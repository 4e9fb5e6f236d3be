//! Handlers for the stored print-server connection and console state.

use std::path::Path;

use cupsadmin_config::{ConsoleSettings, JsonFileStore};
use tracing::info;

use crate::cli::{DemoArgs, ServerSetArgs, ServerShowArgs};
use crate::context::{CliError, CliResult};
use crate::output::{ServerStatus, format_server_status};

fn open_settings(prefs: &Path) -> ConsoleSettings<JsonFileStore> {
    ConsoleSettings::new(JsonFileStore::open(prefs))
}

pub(crate) fn handle_server_show(prefs: &Path, args: &ServerShowArgs) -> CliResult<()> {
    let settings = open_settings(prefs);
    let status = ServerStatus::new(
        settings.connection(),
        settings.is_demo_mode(),
        settings.is_first_visit(),
    );
    println!("{}", format_server_status(&status, args.output)?);
    Ok(())
}

pub(crate) fn handle_server_set(prefs: &Path, args: &ServerSetArgs) -> CliResult<()> {
    if args.address.is_none()
        && args.port.is_none()
        && args.username.is_none()
        && args.password.is_none()
    {
        return Err(CliError::validation(
            "nothing to update; pass at least one of --address, --port, --username, --password",
        ));
    }

    let mut settings = open_settings(prefs);
    let was_demo = settings.is_demo_mode();
    let mut connection = settings.connection();
    if let Some(address) = &args.address {
        connection.server_address.clone_from(address);
    }
    if let Some(port) = &args.port {
        connection.port.clone_from(port);
    }
    if let Some(username) = &args.username {
        connection.username.clone_from(username);
    }
    if let Some(password) = &args.password {
        connection.password.clone_from(password);
    }

    settings.set_connection(&connection)?;
    settings.mark_visited()?;
    info!(
        server_address = %connection.server_address,
        port = %connection.port,
        "stored connection settings"
    );

    println!("saved connection settings to {}", prefs.display());
    if was_demo && !settings.is_demo_mode() {
        println!("demo mode switched off");
    }
    Ok(())
}

pub(crate) fn handle_server_demo(prefs: &Path, args: &DemoArgs) -> CliResult<()> {
    let mut settings = open_settings(prefs);
    let enabled = args.state.enabled();
    settings.set_demo_mode(enabled)?;
    settings.mark_visited()?;
    info!(enabled, "updated demo mode");
    println!("demo mode {}", if enabled { "on" } else { "off" });
    Ok(())
}
