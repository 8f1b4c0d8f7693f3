//! WinRT notification backend

use windows::core::{Interface, GUID, HSTRING};
use windows::Data::Xml::Dom::XmlDocument;
use windows::Foundation::{DateTime, IReference, PropertyValue};
use windows::UI::Notifications::{
    ToastNotification, ToastNotificationManager, ToastNotifier, ToastTemplateType,
};
use windows::Wdk::System::SystemServices::RtlGetVersion;
use windows::Win32::System::Com::{
    CoInitializeEx, CoRegisterClassObject, CoRevokeClassObject, IClassFactory,
    CLSCTX_LOCAL_SERVER, COINIT_MULTITHREADED, REGCLS_MULTIPLEUSE,
};
use windows::Win32::System::SystemInformation::OSVERSIONINFOW;
use windows::Win32::UI::Shell::SetCurrentProcessExplicitAppUserModelID;

use super::activator::ActivatorFactory;
use super::os_error;
use crate::application::activation::ActivationSink;
use crate::application::ports::NotificationBackend;
use crate::domain::clsid::Clsid;
use crate::domain::error::PlatformError;
use crate::domain::payload::{CompiledToast, ToastXml};
use crate::domain::template::TemplateType;

/// Toasts through `ToastNotificationManager`
pub struct WinRtBackend {
    major: u32,
    minor: u32,
    /// `CoRegisterClassObject` cookie, revoked on drop
    registration: Option<u32>,
}

impl WinRtBackend {
    pub fn new() -> Self {
        let (major, minor) = os_version();
        tracing::debug!(major, minor, "Windows version");
        Self {
            major,
            minor,
            registration: None,
        }
    }

    fn notifier(aumi: &str) -> Result<ToastNotifier, PlatformError> {
        ToastNotificationManager::CreateToastNotifierWithId(&HSTRING::from(aumi))
            .map_err(|e| os_error("CreateToastNotifierWithId", e))
    }

    fn revoke(&mut self) {
        if let Some(cookie) = self.registration.take() {
            if let Err(e) = unsafe { CoRevokeClassObject(cookie) } {
                tracing::warn!("Failed to revoke the activator: {}", e);
            }
        }
    }
}

impl Default for WinRtBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for WinRtBackend {
    fn drop(&mut self) {
        self.revoke();
    }
}

/// Real OS version; `GetVersionEx` lies to unmanifested processes
fn os_version() -> (u32, u32) {
    let mut info = OSVERSIONINFOW {
        dwOSVersionInfoSize: std::mem::size_of::<OSVERSIONINFOW>() as u32,
        ..Default::default()
    };
    let status = unsafe { RtlGetVersion(&mut info) };
    if status.is_err() {
        tracing::warn!("RtlGetVersion failed: 0x{:08X}", status.0);
        return (0, 0);
    }
    (info.dwMajorVersion, info.dwMinorVersion)
}

fn catalog_kind(kind: TemplateType) -> ToastTemplateType {
    match kind {
        TemplateType::ImageAndText01 => ToastTemplateType::ToastImageAndText01,
        TemplateType::ImageAndText02 => ToastTemplateType::ToastImageAndText02,
        TemplateType::ImageAndText03 => ToastTemplateType::ToastImageAndText03,
        TemplateType::ImageAndText04 => ToastTemplateType::ToastImageAndText04,
        TemplateType::Text01 => ToastTemplateType::ToastText01,
        TemplateType::Text02 => ToastTemplateType::ToastText02,
        TemplateType::Text03 => ToastTemplateType::ToastText03,
        TemplateType::Text04 => ToastTemplateType::ToastText04,
    }
}

impl NotificationBackend for WinRtBackend {
    type Handle = ToastNotification;

    fn is_compatible(&self) -> bool {
        // Windows 8 is 6.2
        self.major > 6 || (self.major == 6 && self.minor >= 2)
    }

    fn supports_modern_features(&self) -> bool {
        self.major > 6
    }

    fn template_content(&self, kind: TemplateType) -> Result<ToastXml, PlatformError> {
        let xml = ToastNotificationManager::GetTemplateContent(catalog_kind(kind))
            .and_then(|document| document.GetXml())
            .map_err(|e| os_error("GetTemplateContent", e))?;
        ToastXml::parse(&xml.to_string_lossy()).map_err(|e| {
            PlatformError::Rejected(format!("Catalog template {} is unusable: {}", kind, e))
        })
    }

    fn initialize_apartment(&mut self) -> Result<(), PlatformError> {
        unsafe { CoInitializeEx(None, COINIT_MULTITHREADED) }
            .ok()
            .map_err(|e| os_error("CoInitializeEx", e))
    }

    fn set_process_aumi(&mut self, aumi: &str) -> Result<(), PlatformError> {
        unsafe { SetCurrentProcessExplicitAppUserModelID(&HSTRING::from(aumi)) }
            .map_err(|e| os_error("SetCurrentProcessExplicitAppUserModelID", e))
    }

    fn register_activator(
        &mut self,
        clsid: &Clsid,
        sink: ActivationSink,
    ) -> Result<(), PlatformError> {
        let guid = clsid
            .to_u128()
            .map(GUID::from_u128)
            .ok_or_else(|| PlatformError::Rejected(format!("{} is not a valid class id", clsid)))?;

        self.revoke();
        let factory: IClassFactory = ActivatorFactory::new(sink).into();
        let cookie = unsafe {
            CoRegisterClassObject(&guid, &factory, CLSCTX_LOCAL_SERVER, REGCLS_MULTIPLEUSE)
        }
        .map_err(|e| os_error("CoRegisterClassObject", e))?;
        self.registration = Some(cookie);
        Ok(())
    }

    fn create(&self, toast: &CompiledToast) -> Result<ToastNotification, PlatformError> {
        let document = XmlDocument::new().map_err(|e| os_error("XmlDocument::new", e))?;
        document
            .LoadXml(&HSTRING::from(toast.payload.to_xml_string()))
            .map_err(|e| os_error("XmlDocument::LoadXml", e))?;

        let notification = ToastNotification::CreateToastNotification(&document)
            .map_err(|e| os_error("CreateToastNotification", e))?;

        if let Some(ticks) = toast.expiration {
            let expiration = PropertyValue::CreateDateTime(DateTime {
                UniversalTime: ticks,
            })
            .and_then(|value| value.cast::<IReference<DateTime>>())
            .map_err(|e| os_error("PropertyValue::CreateDateTime", e))?;
            notification
                .SetExpirationTime(&expiration)
                .map_err(|e| os_error("SetExpirationTime", e))?;
        }

        Ok(notification)
    }

    fn show(&self, aumi: &str, handle: &ToastNotification) -> Result<(), PlatformError> {
        Self::notifier(aumi)?
            .Show(handle)
            .map_err(|e| os_error("ToastNotifier::Show", e))
    }

    fn hide(&self, aumi: &str, handle: &ToastNotification) -> Result<(), PlatformError> {
        Self::notifier(aumi)?
            .Hide(handle)
            .map_err(|e| os_error("ToastNotifier::Hide", e))
    }

    fn remove_scheduled(&self, aumi: &str) -> Result<(), PlatformError> {
        let notifier = Self::notifier(aumi)?;
        let scheduled = notifier
            .GetScheduledToastNotifications()
            .map_err(|e| os_error("GetScheduledToastNotifications", e))?;
        let size = scheduled.Size().map_err(|e| os_error("IVectorView::Size", e))?;

        for index in 0..size {
            let removed = scheduled
                .GetAt(index)
                .and_then(|toast| notifier.RemoveFromSchedule(&toast));
            if let Err(e) = removed {
                tracing::debug!("Failed to remove scheduled toast {}: {}", index, e);
            }
        }
        Ok(())
    }

    fn clear_history(&self, aumi: &str) -> Result<(), PlatformError> {
        ToastNotificationManager::History()
            .and_then(|history| history.ClearWithId(&HSTRING::from(aumi)))
            .map_err(|e| os_error("ToastNotificationHistory::Clear", e))
    }
}
