//! Golden documents.

use std::path::PathBuf;

/// Stock cupsd.conf exactly as the renderer must produce it.
pub const DEFAULT_CUPSD_CONF: &str = include_str!("../fixtures/default_cupsd.conf");

/// On-disk location of the stock fixture, for tests that compare files.
#[must_use]
pub fn default_cupsd_conf_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join("default_cupsd.conf")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_file_matches_embedded_text() {
        let on_disk = std::fs::read_to_string(default_cupsd_conf_path()).expect("fixture readable");
        assert_eq!(on_disk, DEFAULT_CUPSD_CONF);
    }

    #[test]
    fn fixture_ends_after_last_policy() {
        assert!(DEFAULT_CUPSD_CONF.ends_with("</Policy>\n"));
        assert_eq!(
            DEFAULT_CUPSD_CONF
                .lines()
                .filter(|line| line.starts_with("<Policy "))
                .count(),
            3
        );
    }
}
