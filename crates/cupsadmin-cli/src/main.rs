//! `cupsadmin` binary entrypoint.

fn main() {
    std::process::exit(cupsadmin_cli::run());
}
