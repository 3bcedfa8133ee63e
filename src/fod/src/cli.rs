use clap::{Parser, Subcommand};
use shim_fod::FodPaths;
use std::path::PathBuf;

#[derive(Parser)]
#[command(about = "In-display fingerprint bridge", version)]
pub struct Cli {
    #[clap(long, global = true, help = "Override the fod_pressed attribute")]
    pub pressed_path: Option<PathBuf>,

    #[clap(long, global = true, help = "Override the fod_status attribute")]
    pub status_path: Option<PathBuf>,

    #[clap(long, global = true, help = "Override the fod_ui attribute")]
    pub ui_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Run the bridge until SIGINT or SIGTERM
    Serve,
    /// Print the sensor geometry resolved from system properties
    Geometry,
    /// Mark the sensor as pressed
    Press,
    /// Mark the sensor as released
    Release,
    /// Turn the touch panel FoD mode on
    Show,
    /// Turn the touch panel FoD mode off
    Hide,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn paths(&self) -> FodPaths {
        let defaults = FodPaths::default();

        FodPaths {
            pressed: self.pressed_path.clone().unwrap_or(defaults.pressed),
            status: self.status_path.clone().unwrap_or(defaults.status),
            ui: self.ui_path.clone().unwrap_or(defaults.ui),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_default_to_device_attributes() {
        let cli = Cli::parse_from(["fingerprint-inscreen", "press"]);

        assert_eq!(cli.command, Command::Press);
        assert_eq!(
            cli.paths().pressed,
            PathBuf::from(shim_fod::config::FOD_PRESSED_PATH)
        );
    }

    #[test]
    fn path_overrides_apply_after_subcommand() {
        let cli = Cli::parse_from(["fingerprint-inscreen", "serve", "--ui-path", "/tmp/fod_ui"]);

        assert_eq!(cli.command, Command::Serve);
        assert_eq!(cli.paths().ui, PathBuf::from("/tmp/fod_ui"));
        assert_eq!(
            cli.paths().status,
            PathBuf::from(shim_fod::config::FOD_STATUS_PATH)
        );
    }
}
