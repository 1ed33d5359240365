#[cfg(feature = "backend_wpa_dbus")]
pub mod wpa_supplicant_dbus;

#[cfg(feature = "backend_wpa_cli")]
pub mod wpa_cli;

#[cfg(feature = "backend_mock")]
pub mod mock;

pub mod utils;
