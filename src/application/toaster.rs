//! Toaster facade
//!
//! Owns the application identity, the OS adapters and the table of live
//! toasts. Configure the identity, call [`Toaster::initialize`] once, then
//! show and hide toasts. Activations arrive through the internal
//! [`ActivationRouter`] and are dispatched on the owner's thread.

use std::collections::HashMap;

use uuid::Uuid;

use super::activation::{Activation, ActivationRouter, UserInput};
use super::compiler::{file_time_now, PayloadCompiler};
use super::ports::{NotificationBackend, RegistryStore, ShellLinkStore};
use super::registration::ActivationRegistration;
use super::shortcut::ShortcutManager;
use crate::domain::arguments::ToastArguments;
use crate::domain::clsid::Clsid;
use crate::domain::error::ToastError;
use crate::domain::identity::{AppIdentity, ShortcutPolicy, ShortcutResult};
use crate::domain::payload::{CompiledToast, XmlToast};
use crate::domain::template::ToastTemplate;

/// Locally generated id of a shown toast
pub type ToastId = i64;

/// Notification facade for one application identity
pub struct Toaster<B, L, R>
where
    B: NotificationBackend,
    L: ShellLinkStore,
    R: RegistryStore,
{
    backend: B,
    links: L,
    registry: R,
    identity: AppIdentity,
    policy: ShortcutPolicy,
    clsid: Option<Clsid>,
    apartment_ready: bool,
    initialized: bool,
    router: ActivationRouter,
    live: HashMap<ToastId, B::Handle>,
}

impl<B, L, R> Toaster<B, L, R>
where
    B: NotificationBackend,
    L: ShellLinkStore,
    R: RegistryStore,
{
    pub fn new(backend: B, links: L, registry: R) -> Self {
        Self {
            backend,
            links,
            registry,
            identity: AppIdentity::default(),
            policy: ShortcutPolicy::default(),
            clsid: None,
            apartment_ready: false,
            initialized: false,
            router: ActivationRouter::new(),
            live: HashMap::new(),
        }
    }

    // Configuration

    pub fn set_app_name(&mut self, app_name: impl Into<String>) -> &mut Self {
        self.identity.app_name = app_name.into();
        self
    }

    pub fn set_aumi(&mut self, aumi: impl Into<String>) -> &mut Self {
        self.identity.aumi = aumi.into();
        tracing::debug!(aumi = %self.identity.aumi, "AUMI set");
        self
    }

    pub fn set_icon_path(&mut self, path: impl Into<String>) -> &mut Self {
        self.identity.icon_path = Some(path.into()).filter(|p| !p.is_empty());
        self
    }

    /// Hex color without leading `#`, e.g. `FFDDDDDD`
    pub fn set_icon_background_color(&mut self, color: impl Into<String>) -> &mut Self {
        self.identity.icon_background_color = Some(color.into()).filter(|c| !c.is_empty());
        self
    }

    /// Replace the whole identity at once
    pub fn set_identity(&mut self, identity: AppIdentity) -> &mut Self {
        self.identity = identity;
        self
    }

    pub fn set_shortcut_policy(&mut self, policy: ShortcutPolicy) -> &mut Self {
        self.policy = policy;
        self
    }

    /// Install the activation handler, replacing any previous one
    pub fn set_activation_handler<F>(&mut self, handler: F) -> &mut Self
    where
        F: FnMut(&ToastArguments, &UserInput) + Send + 'static,
    {
        self.router.set_handler(handler);
        self
    }

    pub fn clear_activation_handler(&mut self) -> &mut Self {
        self.router.clear_handler();
        self
    }

    pub fn app_name(&self) -> &str {
        &self.identity.app_name
    }

    pub fn aumi(&self) -> &str {
        &self.identity.aumi
    }

    pub fn icon_path(&self) -> Option<&str> {
        self.identity.icon_path.as_deref()
    }

    pub fn icon_background_color(&self) -> Option<&str> {
        self.identity.icon_background_color.as_deref()
    }

    pub fn identity(&self) -> &AppIdentity {
        &self.identity
    }

    pub fn shortcut_policy(&self) -> ShortcutPolicy {
        self.policy
    }

    /// Class id registered for activations, once initialization got that far
    pub fn clsid(&self) -> Option<&Clsid> {
        self.clsid.as_ref()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_compatible(&self) -> bool {
        self.backend.is_compatible()
    }

    pub fn supports_modern_features(&self) -> bool {
        self.backend.supports_modern_features()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn links(&self) -> &L {
        &self.links
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    // Lifecycle

    /// Register the identity with the OS.
    ///
    /// Steps run in order and the first failure aborts: compatibility,
    /// identity, apartment, shortcut, process AUMI, activator, registry
    /// metadata. The toaster stays uninitialized on failure.
    pub fn initialize(&mut self) -> Result<(), ToastError> {
        self.initialized = false;

        if !self.backend.is_compatible() {
            tracing::error!("System not supported");
            return Err(ToastError::SystemNotSupported);
        }

        if !self.identity.is_complete() {
            tracing::error!("Cannot initialize without a valid AUMI and app name");
            return Err(ToastError::InvalidParameters);
        }

        if !self.apartment_ready {
            self.backend.initialize_apartment().map_err(|e| {
                tracing::error!("Failed to initialize the apartment: {}", e);
                ToastError::ApartmentInitError
            })?;
            self.apartment_ready = true;
        }

        if self.policy != ShortcutPolicy::Ignore && !self.create_shortcut().is_success() {
            return Err(ToastError::ShellLinkNotCreated);
        }

        self.backend
            .set_process_aumi(&self.identity.aumi)
            .map_err(|e| {
                tracing::error!("Failed to attach the AUMI to the process: {}", e);
                ToastError::InvalidAppUserModelID
            })?;

        let clsid = Clsid::from_aumi(&self.identity.aumi);
        let executable = std::env::current_exe().map_err(|e| {
            tracing::error!("Cannot locate the running executable: {}", e);
            ToastError::UnknownError
        })?;

        let registration = ActivationRegistration::new(&self.registry);
        registration
            .register(&mut self.backend, &clsid, &executable, self.router.sink())
            .map_err(|e| {
                tracing::error!("Failed to register the activator: {}", e);
                ToastError::UnknownError
            })?;
        self.clsid = Some(clsid);

        if let Some(clsid) = self.clsid.as_ref() {
            registration
                .write_identity(&self.identity, clsid)
                .map_err(|e| {
                    tracing::error!("Failed to write the identity registry values: {}", e);
                    ToastError::UnknownError
                })?;
        }

        self.initialized = true;
        tracing::debug!(aumi = %self.identity.aumi, "Toaster initialized");
        Ok(())
    }

    /// Validate or create the Start menu shortcut for the current identity
    pub fn create_shortcut(&self) -> ShortcutResult {
        let result = ShortcutManager::new(&self.links, &self.identity, self.policy)
            .create_shortcut(self.backend.is_compatible());
        tracing::debug!("Shortcut check: {}", result);
        result
    }

    /// Remove the toaster's OS footprint: scheduled toasts, history, registry
    /// entries. Never fails.
    pub fn uninstall(&mut self) {
        ActivationRegistration::new(&self.registry).uninstall(
            &self.backend,
            &self.identity.aumi,
            self.clsid.as_ref(),
        );
        self.live.clear();
    }

    // Toasts

    /// Show a toast and return its id
    pub fn show(&mut self, template: &ToastTemplate) -> Result<ToastId, ToastError> {
        if !self.initialized {
            tracing::error!("Cannot show a toast, the toaster is not initialized");
            return Err(ToastError::NotInitialized);
        }

        let skeleton = self
            .backend
            .template_content(template.kind())
            .map_err(|e| {
                tracing::error!("Failed to get the template content: {}", e);
                ToastError::UnknownError
            })?;

        let compiled = PayloadCompiler::new(self.backend.supports_modern_features())
            .compile(template, skeleton, file_time_now())
            .map_err(|e| {
                tracing::error!("Failed to build the toast payload: {}", e);
                ToastError::UnknownError
            })?;
        tracing::debug!(xml = %compiled.payload, "Toast payload");

        self.present(&compiled)
    }

    /// Show a hand-written toast and return its id
    pub fn show_xml(&mut self, toast: &XmlToast) -> Result<ToastId, ToastError> {
        if !self.initialized {
            tracing::error!("Cannot show a toast, the toaster is not initialized");
            return Err(ToastError::NotInitialized);
        }

        self.present(&CompiledToast {
            payload: toast.payload().clone(),
            expiration: None,
        })
    }

    fn present(&mut self, compiled: &CompiledToast) -> Result<ToastId, ToastError> {
        let handle = self.backend.create(compiled).map_err(|e| {
            tracing::error!("Failed to construct the notification: {}", e);
            ToastError::UnknownError
        })?;

        self.backend
            .show(&self.identity.aumi, &handle)
            .map_err(|e| {
                tracing::error!("Failed to show the notification: {}", e);
                ToastError::NotDisplayed
            })?;

        let id = self.next_id();
        self.live.insert(id, handle);
        Ok(id)
    }

    /// Hide a shown toast. False when the id is unknown or the OS refused.
    pub fn hide(&mut self, id: ToastId) -> bool {
        if !self.initialized {
            tracing::error!("Cannot hide a toast, the toaster is not initialized");
            return false;
        }

        let Some(handle) = self.live.get(&id) else {
            return false;
        };
        if let Err(e) = self.backend.hide(&self.identity.aumi, handle) {
            tracing::warn!("Failed to hide toast {}: {}", id, e);
            return false;
        }
        self.live.remove(&id);
        true
    }

    /// Hide every tracked toast and forget them
    pub fn clear(&mut self) {
        for (id, handle) in self.live.drain() {
            if let Err(e) = self.backend.hide(&self.identity.aumi, &handle) {
                tracing::warn!("Failed to hide toast {}: {}", id, e);
            }
        }
    }

    pub fn is_live(&self, id: ToastId) -> bool {
        self.live.contains_key(&id)
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Ids are the first field of a random v4 UUID, unique among live toasts
    fn next_id(&self) -> ToastId {
        loop {
            let id = ToastId::from(Uuid::new_v4().as_fields().0);
            if !self.live.contains_key(&id) {
                return id;
            }
        }
    }

    // Activations

    /// Run the handler for every activation queued so far
    pub fn dispatch_activations(&mut self) -> usize {
        self.router.dispatch_pending()
    }

    /// Wait for the next activation and run the handler for it
    pub async fn next_activation(&mut self) -> Option<Activation> {
        self.router.dispatch_next().await
    }
}
