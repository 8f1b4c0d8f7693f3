//! Start menu shortcut management
//!
//! Desktop apps only receive toasts when a Start menu shortcut carries their
//! AUMI. The manager checks that shortcut and, when the policy allows it,
//! repairs or creates it.

use std::path::Path;

use crate::application::ports::ShellLinkStore;
use crate::domain::error::PlatformError;
use crate::domain::identity::{AppIdentity, ShortcutPolicy, ShortcutResult};

/// Validates or creates the shortcut for one identity
pub struct ShortcutManager<'a, L: ShellLinkStore> {
    links: &'a L,
    identity: &'a AppIdentity,
    policy: ShortcutPolicy,
}

impl<'a, L: ShellLinkStore> ShortcutManager<'a, L> {
    pub fn new(links: &'a L, identity: &'a AppIdentity, policy: ShortcutPolicy) -> Self {
        Self {
            links,
            identity,
            policy,
        }
    }

    /// Make sure a shortcut with the identity's AUMI exists.
    ///
    /// `os_compatible` is the backend's toast support check. New shortcuts
    /// point at the running executable.
    pub fn create_shortcut(&self, os_compatible: bool) -> ShortcutResult {
        if !self.identity.is_complete() {
            tracing::error!("Cannot manage the shortcut without an app name and AUMI");
            return ShortcutResult::MissingParameters;
        }
        if !os_compatible {
            tracing::error!("Toast notifications are not supported on this OS");
            return ShortcutResult::IncompatibleOs;
        }

        let path = match self.links.shortcut_path(&self.identity.app_name) {
            Ok(path) => path,
            Err(e) => {
                tracing::error!("Cannot resolve the shortcut path: {}", e);
                return ShortcutResult::CreateFailed;
            }
        };

        if self.links.exists(&path) {
            match self.validate(&path) {
                Ok(result) => return result,
                Err(e) => tracing::debug!("Shortcut at {} is not valid: {}", path.display(), e),
            }
        }

        self.create(&path)
    }

    /// Compare the stored AUMI, rewriting it when the policy allows
    fn validate(&self, path: &Path) -> Result<ShortcutResult, PlatformError> {
        let stored = self.links.read_aumi(path)?;
        if stored == self.identity.aumi {
            tracing::debug!("Shortcut at {} is up to date", path.display());
            return Ok(ShortcutResult::Unchanged);
        }

        if self.policy != ShortcutPolicy::RequireCreate {
            return Err(PlatformError::Rejected(format!(
                "shortcut AUMI is \"{}\", expected \"{}\"",
                stored, self.identity.aumi
            )));
        }

        self.links.write_aumi(path, &self.identity.aumi)?;
        tracing::debug!("Rewrote the AUMI of {}", path.display());
        Ok(ShortcutResult::Changed)
    }

    fn create(&self, path: &Path) -> ShortcutResult {
        if self.policy != ShortcutPolicy::RequireCreate {
            tracing::error!(
                "No valid shortcut at {} and policy {} forbids creating one",
                path.display(),
                self.policy
            );
            return ShortcutResult::CreateFailed;
        }

        let target = match std::env::current_exe() {
            Ok(target) => target,
            Err(e) => {
                tracing::error!("Cannot locate the running executable: {}", e);
                return ShortcutResult::CreateFailed;
            }
        };

        match self.links.create(path, &target, &self.identity.aumi) {
            Ok(()) => {
                tracing::debug!("Created shortcut {} -> {}", path.display(), target.display());
                ShortcutResult::Created
            }
            Err(e) => {
                tracing::error!("Failed to create shortcut {}: {}", path.display(), e);
                ShortcutResult::CreateFailed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory::MemoryShellLinks;

    fn identity() -> AppIdentity {
        AppIdentity::new("Contoso", "Contoso.App")
    }

    fn run(links: &MemoryShellLinks, policy: ShortcutPolicy) -> ShortcutResult {
        let identity = identity();
        ShortcutManager::new(links, &identity, policy).create_shortcut(true)
    }

    #[test]
    fn missing_parameters() {
        let links = MemoryShellLinks::new();
        let identity = AppIdentity::new("", "Contoso.App");
        let result = ShortcutManager::new(&links, &identity, ShortcutPolicy::RequireCreate)
            .create_shortcut(true);
        assert_eq!(result, ShortcutResult::MissingParameters);
    }

    #[test]
    fn incompatible_os() {
        let links = MemoryShellLinks::new();
        let identity = identity();
        let result = ShortcutManager::new(&links, &identity, ShortcutPolicy::RequireCreate)
            .create_shortcut(false);
        assert_eq!(result, ShortcutResult::IncompatibleOs);
        assert!(links.is_empty());
    }

    #[test]
    fn matching_shortcut_is_unchanged_under_every_policy() {
        for policy in [ShortcutPolicy::RequireCreate, ShortcutPolicy::RequireNoCreate] {
            let links = MemoryShellLinks::new().with_shortcut("Contoso", "Contoso.App");
            assert_eq!(run(&links, policy), ShortcutResult::Unchanged);
        }
    }

    #[test]
    fn mismatched_shortcut_is_rewritten_when_creation_allowed() {
        let links = MemoryShellLinks::new().with_shortcut("Contoso", "Contoso.Old");
        assert_eq!(run(&links, ShortcutPolicy::RequireCreate), ShortcutResult::Changed);
        assert_eq!(links.aumi_of("Contoso").as_deref(), Some("Contoso.App"));
    }

    #[test]
    fn mismatched_shortcut_fails_without_creation() {
        let links = MemoryShellLinks::new().with_shortcut("Contoso", "Contoso.Old");
        assert_eq!(
            run(&links, ShortcutPolicy::RequireNoCreate),
            ShortcutResult::CreateFailed
        );
        assert_eq!(links.aumi_of("Contoso").as_deref(), Some("Contoso.Old"));
    }

    #[test]
    fn missing_shortcut_is_created_for_current_exe() {
        let links = MemoryShellLinks::new();
        assert_eq!(run(&links, ShortcutPolicy::RequireCreate), ShortcutResult::Created);
        assert_eq!(links.aumi_of("Contoso").as_deref(), Some("Contoso.App"));
        assert_eq!(links.target_of("Contoso"), std::env::current_exe().ok());
    }

    #[test]
    fn missing_shortcut_fails_without_creation() {
        let links = MemoryShellLinks::new();
        assert_eq!(
            run(&links, ShortcutPolicy::RequireNoCreate),
            ShortcutResult::CreateFailed
        );
        assert!(links.is_empty());
    }

    #[test]
    fn unreadable_shortcut_is_recreated() {
        let links = MemoryShellLinks::new()
            .with_shortcut("Contoso", "Contoso.App")
            .failing_reads();
        assert_eq!(run(&links, ShortcutPolicy::RequireCreate), ShortcutResult::Created);
    }

    #[test]
    fn failed_rewrite_falls_back_to_failed_create() {
        let links = MemoryShellLinks::new()
            .with_shortcut("Contoso", "Contoso.Old")
            .failing_writes();
        assert_eq!(
            run(&links, ShortcutPolicy::RequireCreate),
            ShortcutResult::CreateFailed
        );
    }
}
