//! Roster lookup with inline-registration fallback.
//!
//! The legacy flat map and the structured roster are one logical namespace
//! (structured wins); callers only ever see a display name. Unknown badges
//! trigger an interactive registration exchange over the same console the
//! reader types into — in unattended mode there is no console to block on,
//! so the event is forwarded immediately under the literal name "Unknown".

use ponto_config::ConfigStore;
use ponto_core::constants::UNKNOWN_DISPLAY_NAME;
use ponto_core::{BadgeId, OperatingMode};
use ponto_hardware::ScanSource;
use std::io::Write;
use tracing::{info, warn};

/// Result of resolving one badge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub display_name: String,
    pub newly_registered: bool,
}

/// Badge-to-person resolver.
#[derive(Debug)]
pub struct RosterResolver {
    mode: OperatingMode,
}

impl RosterResolver {
    #[must_use]
    pub fn new(mode: OperatingMode) -> Self {
        Self { mode }
    }

    /// Resolve a badge to a display name.
    ///
    /// On a roster miss in interactive mode this blocks on one line of
    /// console input: a non-empty answer registers the badge (in both
    /// roster representations) and persists the configuration; an empty
    /// answer — or end of input — declines, and the event is forwarded as
    /// "Unknown" without creating an entry. Persistence failure is reported
    /// but never blocks forwarding the current event.
    pub async fn resolve<S: ScanSource>(
        &self,
        store: &mut ConfigStore,
        badge: &BadgeId,
        source: &mut S,
    ) -> Resolution {
        if let Some(name) = store.config().display_name(badge.as_str()) {
            return Resolution {
                display_name: name.to_string(),
                newly_registered: false,
            };
        }

        if !self.mode.is_interactive() {
            return Resolution {
                display_name: UNKNOWN_DISPLAY_NAME.to_string(),
                newly_registered: false,
            };
        }

        print!("Crachá {badge} não cadastrado. Nome completo (Enter para ignorar): ");
        std::io::stdout().flush().ok();

        let answer = match source.next_line().await {
            Ok(Some(line)) => line.trim().to_string(),
            // End of input or a broken console counts as a decline
            Ok(None) | Err(_) => String::new(),
        };

        if answer.is_empty() {
            info!(badge = %badge, "registration_declined");
            return Resolution {
                display_name: UNKNOWN_DISPLAY_NAME.to_string(),
                newly_registered: false,
            };
        }

        store.config_mut().register(badge.as_str(), &answer);
        match store.save() {
            Ok(path) => {
                info!(badge = %badge, name = %answer, path = %path.display(), "badge_registered");
            }
            Err(e) => {
                // The badge simply is not remembered for next time
                warn!(badge = %badge, error = %e, "registration_persist_failed");
            }
        }

        Resolution {
            display_name: answer,
            newly_registered: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ponto_config::ConfigStore;
    use ponto_hardware::mock::MockScanSource;
    use tempfile::tempdir;

    fn store_with_known_badge(dir: &tempfile::TempDir) -> ConfigStore {
        let mut store = ConfigStore::open(dir.path().join("config_ponto.json"));
        store.config_mut().register("1601873172", "Thiago Dias Santos");
        store
    }

    #[tokio::test]
    async fn test_known_badge_resolves_without_prompt() {
        let dir = tempdir().unwrap();
        let mut store = store_with_known_badge(&dir);
        let resolver = RosterResolver::new(OperatingMode::Interactive);

        // No lines queued: a prompt would hang on EOF instead of answering
        let (mut source, handle) = MockScanSource::new();
        drop(handle);

        let badge = BadgeId::new("1601873172").unwrap();
        let resolution = resolver.resolve(&mut store, &badge, &mut source).await;

        assert_eq!(resolution.display_name, "Thiago Dias Santos");
        assert!(!resolution.newly_registered);
    }

    #[tokio::test]
    async fn test_unknown_badge_registers_from_prompt() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config_ponto.json");
        let mut store = ConfigStore::open(&path);
        let resolver = RosterResolver::new(OperatingMode::Interactive);

        let (mut source, handle) = MockScanSource::new();
        handle.push_line("João Silva").await;

        let badge = BadgeId::new("9999999999").unwrap();
        let resolution = resolver.resolve(&mut store, &badge, &mut source).await;

        assert_eq!(resolution.display_name, "João Silva");
        assert!(resolution.newly_registered);

        // Same run: the badge now resolves without prompting
        let (mut empty_source, empty_handle) = MockScanSource::new();
        drop(empty_handle);
        let again = resolver.resolve(&mut store, &badge, &mut empty_source).await;
        assert_eq!(again.display_name, "João Silva");
        assert!(!again.newly_registered);

        // Persisted: a fresh store sees the entry in both representations
        let reopened = ConfigStore::open(&path);
        assert_eq!(
            reopened.config().display_name("9999999999"),
            Some("João Silva")
        );
        assert_eq!(
            reopened.config().nomes.get("9999999999").map(String::as_str),
            Some("João Silva")
        );
    }

    #[tokio::test]
    async fn test_empty_answer_declines_registration() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config_ponto.json");
        let mut store = ConfigStore::open(&path);
        let resolver = RosterResolver::new(OperatingMode::Interactive);

        let (mut source, handle) = MockScanSource::new();
        handle.push_line("   ").await;

        let badge = BadgeId::new("9999999999").unwrap();
        let resolution = resolver.resolve(&mut store, &badge, &mut source).await;

        assert_eq!(resolution.display_name, "Unknown");
        assert!(!resolution.newly_registered);
        assert!(store.config().display_name("9999999999").is_none());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_unattended_mode_never_prompts() {
        let dir = tempdir().unwrap();
        let mut store = ConfigStore::open(dir.path().join("config_ponto.json"));
        let resolver = RosterResolver::new(OperatingMode::Unattended);

        // A queued line must NOT be consumed as a registration answer
        let (mut source, handle) = MockScanSource::new();
        handle.push_line("1601901111").await;

        let badge = BadgeId::new("9999999999").unwrap();
        let resolution = resolver.resolve(&mut store, &badge, &mut source).await;

        assert_eq!(resolution.display_name, "Unknown");
        assert!(!resolution.newly_registered);

        // The queued scan is still there for the intake loop
        use ponto_hardware::ScanSource as _;
        assert_eq!(
            source.next_line().await.unwrap(),
            Some("1601901111".to_string())
        );
    }

    #[tokio::test]
    async fn test_legacy_entry_resolves() {
        let dir = tempdir().unwrap();
        let mut store = ConfigStore::open(dir.path().join("config_ponto.json"));
        store
            .config_mut()
            .nomes
            .insert("1601901111".to_string(), "Maria Souza".to_string());
        let resolver = RosterResolver::new(OperatingMode::Interactive);

        let (mut source, handle) = MockScanSource::new();
        drop(handle);

        let badge = BadgeId::new("1601901111").unwrap();
        let resolution = resolver.resolve(&mut store, &badge, &mut source).await;
        assert_eq!(resolution.display_name, "Maria Souza");
    }
}
