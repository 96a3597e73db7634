use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use crate::batch::migrate_directory;
use crate::config::{MigrationConfig, DEFAULT_SCENES_DIR};

/// Convert legacy .sc scene files into the JSON scene format.
///
/// Each `<name>.sc` in the directory is written next to itself as
/// `<name>.json`. Files that already have a JSON counterpart are skipped.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory containing legacy scenes
    #[arg(default_value = DEFAULT_SCENES_DIR)]
    scenes_dir: PathBuf,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = MigrationConfig::new(cli.scenes_dir);

    log::debug!("Scanning {}", config.scenes_dir.display());
    migrate_directory(&config, |report| println!("{}", report))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_directory() {
        let cli = Cli::try_parse_from(["scene-migrate"]).unwrap();
        assert_eq!(cli.scenes_dir, PathBuf::from("resources/scenes"));

        let cli = Cli::try_parse_from(["scene-migrate", "old/scenes"]).unwrap();
        assert_eq!(cli.scenes_dir, PathBuf::from("old/scenes"));
    }
}
