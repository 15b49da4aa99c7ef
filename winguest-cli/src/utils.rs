use std::path::Path;
use winguest_core::{Config, Result, WinGuestError};

/// Loads `path` if given, otherwise `~/.winguest/config.yaml` or defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) if !path.exists() => Err(WinGuestError::ConfigError(format!(
            "Configuration file {} does not exist",
            path.display()
        ))),
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

/// Hint printed after a failure, if one applies.
pub fn failure_hint(error: &WinGuestError) -> Option<&'static str> {
    match error {
        WinGuestError::UnsupportedProvider { .. } => {
            Some("Declare `interfaces:` in the configuration to map slots to guest adapters")
        }
        WinGuestError::ProtocolDetection { .. } => {
            Some("Check that WinRM is enabled on the guest (`winrm quickconfig`)")
        }
        error if error.is_remote() => Some("Check that the guest and provider are reachable"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config(Some(&dir.path().join("absent.yaml")));
        assert!(matches!(result, Err(WinGuestError::ConfigError(_))));
    }

    #[test]
    fn test_explicit_config_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let mut config = Config::default();
        config.machine.name = "win10".to_string();
        config.save_to(&path).unwrap();

        let loaded = load_config(Some(&path)).unwrap();
        assert_eq!(loaded.machine.name, "win10");
    }

    #[test]
    fn test_failure_hints() {
        let unsupported = WinGuestError::UnsupportedProvider {
            provider: "vmware_fusion".to_string(),
        };
        assert!(failure_hint(&unsupported).is_some());

        let remote = WinGuestError::CommandFailed {
            machine: "win10".to_string(),
            message: "timeout".to_string(),
        };
        assert!(failure_hint(&remote).is_some());

        assert!(failure_hint(&WinGuestError::ConfigError("bad".to_string())).is_none());
    }
}
