//! COM activator
//!
//! The notification center creates the registered class through its class
//! factory and calls `Activate` with the clicked toast's argument string
//! and any user input. Both are forwarded to the [`ActivationSink`].

#![allow(non_snake_case)]

use std::ffi::c_void;

use windows::core::{implement, IUnknown, Interface, GUID, PCWSTR};
use windows::Win32::Foundation::{BOOL, CLASS_E_NOAGGREGATION, E_POINTER};
use windows::Win32::System::Com::{IClassFactory, IClassFactory_Impl};
use windows::Win32::UI::Notifications::{
    INotificationActivationCallback, INotificationActivationCallback_Impl,
    NOTIFICATION_USER_INPUT_DATA,
};

use crate::application::activation::{ActivationSink, UserInput};

/// Class factory registered with `CoRegisterClassObject`
#[implement(IClassFactory)]
pub struct ActivatorFactory {
    sink: ActivationSink,
}

impl ActivatorFactory {
    pub fn new(sink: ActivationSink) -> Self {
        Self { sink }
    }
}

impl IClassFactory_Impl for ActivatorFactory_Impl {
    fn CreateInstance(
        &self,
        outer: Option<&IUnknown>,
        iid: *const GUID,
        object: *mut *mut c_void,
    ) -> windows::core::Result<()> {
        if object.is_null() {
            return Err(E_POINTER.into());
        }
        unsafe { *object = std::ptr::null_mut() };
        if outer.is_some() {
            return Err(CLASS_E_NOAGGREGATION.into());
        }

        let callback: INotificationActivationCallback = ActivationCallback {
            sink: self.sink.clone(),
        }
        .into();
        unsafe { callback.query(iid, object).ok() }
    }

    fn LockServer(&self, _lock: BOOL) -> windows::core::Result<()> {
        Ok(())
    }
}

#[implement(INotificationActivationCallback)]
struct ActivationCallback {
    sink: ActivationSink,
}

impl INotificationActivationCallback_Impl for ActivationCallback_Impl {
    fn Activate(
        &self,
        _app_user_model_id: &PCWSTR,
        invoked_args: &PCWSTR,
        data: *const NOTIFICATION_USER_INPUT_DATA,
        count: u32,
    ) -> windows::core::Result<()> {
        let arguments = if invoked_args.is_null() {
            String::new()
        } else {
            unsafe { invoked_args.to_string() }.unwrap_or_default()
        };

        let mut user_input = UserInput::new();
        if !data.is_null() {
            let entries = unsafe { std::slice::from_raw_parts(data, count as usize) };
            for entry in entries {
                let key = unsafe { entry.Key.to_string() }.unwrap_or_default();
                let value = unsafe { entry.Value.to_string() }.unwrap_or_default();
                user_input.insert(key, value);
            }
        }

        self.sink.deliver(&arguments, user_input);
        Ok(())
    }
}
