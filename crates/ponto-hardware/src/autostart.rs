//! OS startup registration.
//!
//! On Unix desktops the registration artifact is an XDG autostart
//! `.desktop` entry launching the binary in unattended mode. Platforms
//! without a supported mechanism get [`UnsupportedAutostart`], whose
//! operations fail with a descriptive error instead of silently doing
//! nothing the operator would rely on.

use crate::{Result, error::HardwareError, traits::AutostartManager};
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// Application identifier used for the autostart artifact file name.
const APP_ID: &str = "ponto";

/// XDG autostart registration (`~/.config/autostart/ponto.desktop`).
#[derive(Debug)]
pub struct XdgAutostart {
    autostart_dir: PathBuf,
}

impl XdgAutostart {
    /// Create a manager over the user's XDG autostart directory.
    ///
    /// # Errors
    /// Returns `HardwareError::Unsupported` if no user configuration
    /// directory can be resolved.
    pub fn new() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| HardwareError::unsupported("autostart: no user config directory"))?;
        Ok(Self {
            autostart_dir: config_dir.join("autostart"),
        })
    }

    /// Create a manager over an explicit autostart directory.
    #[must_use]
    pub fn with_dir(autostart_dir: PathBuf) -> Self {
        Self { autostart_dir }
    }

    fn entry_path(&self) -> PathBuf {
        self.autostart_dir.join(format!("{APP_ID}.desktop"))
    }

    fn desktop_entry(exec: &str) -> String {
        format!(
            "[Desktop Entry]\n\
             Type=Application\n\
             Name=Ponto NFC\n\
             Comment=Badge-scan attendance relay\n\
             Exec={exec} --background\n\
             X-GNOME-Autostart-enabled=true\n"
        )
    }
}

impl AutostartManager for XdgAutostart {
    fn install(&self) -> Result<()> {
        let exe = std::env::current_exe()?;
        let entry = Self::desktop_entry(&exe.display().to_string());

        fs::create_dir_all(&self.autostart_dir)?;
        let path = self.entry_path();
        fs::write(&path, entry)?;

        info!(path = %path.display(), "autostart_installed");
        Ok(())
    }

    fn uninstall(&self) -> Result<()> {
        let path = self.entry_path();
        match fs::remove_file(&path) {
            Ok(()) => {
                info!(path = %path.display(), "autostart_removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn is_installed(&self) -> bool {
        self.entry_path().exists()
    }
}

/// Stub for platforms without a supported autostart mechanism.
#[derive(Debug, Default)]
pub struct UnsupportedAutostart;

impl AutostartManager for UnsupportedAutostart {
    fn install(&self) -> Result<()> {
        Err(HardwareError::unsupported(
            "autostart registration on this platform",
        ))
    }

    fn uninstall(&self) -> Result<()> {
        Err(HardwareError::unsupported(
            "autostart removal on this platform",
        ))
    }

    fn is_installed(&self) -> bool {
        false
    }
}
