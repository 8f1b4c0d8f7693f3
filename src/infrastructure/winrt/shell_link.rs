//! Start menu shortcuts through `IShellLinkW`

use std::path::{Path, PathBuf};

use windows::core::{Interface, BSTR, HSTRING};
use windows::Win32::Foundation::MAX_PATH;
use windows::Win32::Storage::EnhancedStorage::PKEY_AppUserModel_ID;
use windows::Win32::System::Com::StructuredStorage::PROPVARIANT;
use windows::Win32::System::Com::{
    CoCreateInstance, IPersistFile, CLSCTX_INPROC_SERVER, STGM_READWRITE,
};
use windows::Win32::UI::Shell::PropertiesSystem::IPropertyStore;
use windows::Win32::UI::Shell::{IShellLinkW, ShellLink};

use super::{ensure_com, os_error};
use crate::application::ports::ShellLinkStore;
use crate::domain::error::PlatformError;

/// Shortcuts below `%APPDATA%\Microsoft\Windows\Start Menu\Programs`
pub struct ShellLinks {
    programs: Option<PathBuf>,
}

impl ShellLinks {
    pub fn new() -> Self {
        Self {
            programs: dirs::data_dir().map(|appdata| {
                appdata
                    .join("Microsoft")
                    .join("Windows")
                    .join("Start Menu")
                    .join("Programs")
            }),
        }
    }

    fn new_link() -> Result<IShellLinkW, PlatformError> {
        ensure_com()?;
        unsafe { CoCreateInstance(&ShellLink, None, CLSCTX_INPROC_SERVER) }
            .map_err(|e| os_error("CoCreateInstance(ShellLink)", e))
    }

    fn load(path: &Path) -> Result<IShellLinkW, PlatformError> {
        let link = Self::new_link()?;
        let file: IPersistFile = link.cast().map_err(|e| os_error("IPersistFile", e))?;
        unsafe { file.Load(&HSTRING::from(path), STGM_READWRITE) }
            .map_err(|e| os_error("IPersistFile::Load", e))?;
        Ok(link)
    }

    fn set_aumi(link: &IShellLinkW, aumi: &str) -> Result<(), PlatformError> {
        let store: IPropertyStore = link.cast().map_err(|e| os_error("IPropertyStore", e))?;
        unsafe {
            store
                .SetValue(&PKEY_AppUserModel_ID, &PROPVARIANT::from(aumi))
                .map_err(|e| os_error("IPropertyStore::SetValue", e))?;
            store
                .Commit()
                .map_err(|e| os_error("IPropertyStore::Commit", e))
        }
    }

    fn save(link: &IShellLinkW, path: &Path) -> Result<(), PlatformError> {
        let file: IPersistFile = link.cast().map_err(|e| os_error("IPersistFile", e))?;
        unsafe { file.Save(&HSTRING::from(path), true) }
            .map_err(|e| os_error("IPersistFile::Save", e))
    }
}

impl Default for ShellLinks {
    fn default() -> Self {
        Self::new()
    }
}

impl ShellLinkStore for ShellLinks {
    fn shortcut_path(&self, app_name: &str) -> Result<PathBuf, PlatformError> {
        let programs = self
            .programs
            .as_ref()
            .ok_or_else(|| PlatformError::NotFound("%APPDATA%".to_string()))?;
        let path = programs.join(format!("{}.lnk", app_name));
        if path.as_os_str().len() >= MAX_PATH as usize {
            return Err(PlatformError::Rejected(format!(
                "shortcut path {} is too long",
                path.display()
            )));
        }
        Ok(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_aumi(&self, path: &Path) -> Result<String, PlatformError> {
        let link = Self::load(path)?;
        let store: IPropertyStore = link.cast().map_err(|e| os_error("IPropertyStore", e))?;
        let value = unsafe { store.GetValue(&PKEY_AppUserModel_ID) }
            .map_err(|e| os_error("IPropertyStore::GetValue", e))?;
        let aumi = BSTR::try_from(&value).map_err(|e| os_error("PROPVARIANT to string", e))?;
        Ok(aumi.to_string())
    }

    fn write_aumi(&self, path: &Path, aumi: &str) -> Result<(), PlatformError> {
        let link = Self::load(path)?;
        Self::set_aumi(&link, aumi)?;
        Self::save(&link, path)
    }

    fn create(&self, path: &Path, target: &Path, aumi: &str) -> Result<(), PlatformError> {
        let link = Self::new_link()?;
        let working_dir = target.parent().unwrap_or(target);
        unsafe {
            link.SetPath(&HSTRING::from(target))
                .map_err(|e| os_error("IShellLinkW::SetPath", e))?;
            link.SetArguments(&HSTRING::new())
                .map_err(|e| os_error("IShellLinkW::SetArguments", e))?;
            link.SetWorkingDirectory(&HSTRING::from(working_dir))
                .map_err(|e| os_error("IShellLinkW::SetWorkingDirectory", e))?;
        }
        Self::set_aumi(&link, aumi)?;
        Self::save(&link, path)
    }
}
