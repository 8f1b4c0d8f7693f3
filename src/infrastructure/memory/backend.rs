//! In-memory notification center

use std::collections::HashSet;

use parking_lot::Mutex;

use crate::application::activation::{ActivationSink, UserInput};
use crate::application::ports::NotificationBackend;
use crate::domain::clsid::Clsid;
use crate::domain::error::PlatformError;
use crate::domain::payload::CompiledToast;

/// Backend operations that can be made to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendCall {
    InitializeApartment,
    SetProcessAumi,
    RegisterActivator,
    Create,
    Show,
    Hide,
    RemoveScheduled,
    ClearHistory,
}

/// Handle of a toast created by [`MemoryBackend`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryToast {
    pub serial: u64,
    pub toast: CompiledToast,
}

#[derive(Default)]
struct State {
    apartment_initializations: usize,
    process_aumi: Option<String>,
    activator: Option<(Clsid, ActivationSink)>,
    next_serial: u64,
    created: Vec<CompiledToast>,
    visible: Vec<MemoryToast>,
    scheduled_cleared: Vec<String>,
    history_cleared: Vec<String>,
}

/// Notification center that keeps shown toasts in a list
pub struct MemoryBackend {
    compatible: bool,
    modern: bool,
    failing: HashSet<BackendCall>,
    state: Mutex<State>,
}

impl MemoryBackend {
    /// A modern, fully working notification center
    pub fn new() -> Self {
        Self {
            compatible: true,
            modern: true,
            failing: HashSet::new(),
            state: Mutex::new(State::default()),
        }
    }

    /// An OS without toast support
    pub fn incompatible() -> Self {
        Self {
            compatible: false,
            modern: false,
            ..Self::new()
        }
    }

    /// An OS with legacy toasts only
    pub fn legacy() -> Self {
        Self {
            modern: false,
            ..Self::new()
        }
    }

    /// Make `call` fail from now on
    pub fn fail_on(mut self, call: BackendCall) -> Self {
        self.failing.insert(call);
        self
    }

    pub fn set_failing(&mut self, call: BackendCall, failing: bool) {
        if failing {
            self.failing.insert(call);
        } else {
            self.failing.remove(&call);
        }
    }

    fn check(&self, call: BackendCall) -> Result<(), PlatformError> {
        if self.failing.contains(&call) {
            return Err(PlatformError::Rejected(format!("{:?} rejected", call)));
        }
        Ok(())
    }

    pub fn apartment_initializations(&self) -> usize {
        self.state.lock().apartment_initializations
    }

    pub fn process_aumi(&self) -> Option<String> {
        self.state.lock().process_aumi.clone()
    }

    pub fn activator_clsid(&self) -> Option<Clsid> {
        self.state.lock().activator.as_ref().map(|(clsid, _)| clsid.clone())
    }

    /// Every toast created so far, shown or not
    pub fn created(&self) -> Vec<CompiledToast> {
        self.state.lock().created.clone()
    }

    /// Toasts currently on screen
    pub fn visible(&self) -> Vec<CompiledToast> {
        self.state
            .lock()
            .visible
            .iter()
            .map(|shown| shown.toast.clone())
            .collect()
    }

    pub fn scheduled_cleared(&self) -> Vec<String> {
        self.state.lock().scheduled_cleared.clone()
    }

    pub fn history_cleared(&self) -> Vec<String> {
        self.state.lock().history_cleared.clone()
    }

    /// Simulate the user clicking a toast. Returns false when no activator
    /// is registered.
    pub fn activate(&self, raw_arguments: &str, user_input: UserInput) -> bool {
        let sink = match self.state.lock().activator.as_ref() {
            Some((_, sink)) => sink.clone(),
            None => return false,
        };
        sink.deliver(raw_arguments, user_input)
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationBackend for MemoryBackend {
    type Handle = MemoryToast;

    fn is_compatible(&self) -> bool {
        self.compatible
    }

    fn supports_modern_features(&self) -> bool {
        self.modern
    }

    fn initialize_apartment(&mut self) -> Result<(), PlatformError> {
        self.check(BackendCall::InitializeApartment)?;
        self.state.lock().apartment_initializations += 1;
        Ok(())
    }

    fn set_process_aumi(&mut self, aumi: &str) -> Result<(), PlatformError> {
        self.check(BackendCall::SetProcessAumi)?;
        self.state.lock().process_aumi = Some(aumi.to_string());
        Ok(())
    }

    fn register_activator(
        &mut self,
        clsid: &Clsid,
        sink: ActivationSink,
    ) -> Result<(), PlatformError> {
        self.check(BackendCall::RegisterActivator)?;
        self.state.lock().activator = Some((clsid.clone(), sink));
        Ok(())
    }

    fn create(&self, toast: &CompiledToast) -> Result<Self::Handle, PlatformError> {
        self.check(BackendCall::Create)?;
        let mut state = self.state.lock();
        state.next_serial += 1;
        state.created.push(toast.clone());
        Ok(MemoryToast {
            serial: state.next_serial,
            toast: toast.clone(),
        })
    }

    fn show(&self, _aumi: &str, handle: &Self::Handle) -> Result<(), PlatformError> {
        self.check(BackendCall::Show)?;
        self.state.lock().visible.push(handle.clone());
        Ok(())
    }

    fn hide(&self, _aumi: &str, handle: &Self::Handle) -> Result<(), PlatformError> {
        self.check(BackendCall::Hide)?;
        let mut state = self.state.lock();
        let before = state.visible.len();
        state.visible.retain(|shown| shown.serial != handle.serial);
        if state.visible.len() == before {
            return Err(PlatformError::NotFound(format!("toast #{}", handle.serial)));
        }
        Ok(())
    }

    fn remove_scheduled(&self, aumi: &str) -> Result<(), PlatformError> {
        self.check(BackendCall::RemoveScheduled)?;
        self.state.lock().scheduled_cleared.push(aumi.to_string());
        Ok(())
    }

    fn clear_history(&self, aumi: &str) -> Result<(), PlatformError> {
        self.check(BackendCall::ClearHistory)?;
        let mut state = self.state.lock();
        state.history_cleared.push(aumi.to_string());
        state.visible.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::activation::ActivationRouter;
    use crate::domain::payload::template_skeleton;
    use crate::domain::template::TemplateType;

    fn toast() -> CompiledToast {
        CompiledToast {
            payload: template_skeleton(TemplateType::Text01),
            expiration: None,
        }
    }

    #[test]
    fn shown_toasts_are_visible_until_hidden() {
        let backend = MemoryBackend::new();
        let handle = backend.create(&toast()).unwrap();
        backend.show("Contoso.App", &handle).unwrap();
        assert_eq!(backend.visible().len(), 1);

        backend.hide("Contoso.App", &handle).unwrap();
        assert!(backend.visible().is_empty());
        assert!(backend.hide("Contoso.App", &handle).is_err());
    }

    #[test]
    fn failing_call_is_rejected() {
        let backend = MemoryBackend::new().fail_on(BackendCall::Create);
        assert!(matches!(
            backend.create(&toast()),
            Err(PlatformError::Rejected(_))
        ));
    }

    #[test]
    fn activate_reaches_registered_sink() {
        let mut backend = MemoryBackend::new();
        assert!(!backend.activate("actionId=0", UserInput::new()));

        let mut router = ActivationRouter::new();
        backend
            .register_activator(&Clsid::from_aumi("Contoso.App"), router.sink())
            .unwrap();
        assert!(backend.activate("actionId=0", UserInput::new()));
        assert_eq!(router.dispatch_pending(), 1);
    }
}
