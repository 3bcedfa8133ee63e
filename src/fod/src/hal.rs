//! Interfaces at the edges of the bridge. The binder plumbing that carries them is
//! provided by the platform.

use anyhow::Result;
use std::sync::Arc;

/// Vendor fingerprint HAL extension.
pub trait XiaomiFingerprint: Send + Sync {
    fn ext_cmd(&self, cmd: i32, param: i32) -> Result<i32>;
}

/// Listener registered by the system UI.
pub trait FingerprintInscreenCallback: Send + Sync {
    fn on_finger_down(&self) -> Result<()>;
    fn on_finger_up(&self) -> Result<()>;
}

/// The in-display fingerprint interface served to the framework.
pub trait FingerprintInscreen: Send + Sync {
    fn get_position_x(&self) -> i32;
    fn get_position_y(&self) -> i32;
    fn get_size(&self) -> i32;

    fn on_start_enroll(&self);
    fn on_finish_enroll(&self);

    fn on_press(&self);
    fn on_release(&self);

    fn on_show_fod_view(&self);
    fn on_hide_fod_view(&self);

    fn handle_acquired(&self, acquired_info: i32, vendor_code: i32) -> bool;
    fn handle_error(&self, error: i32, vendor_code: i32) -> bool;

    fn set_long_press_enabled(&self, enabled: bool);
    fn get_dim_amount(&self, brightness: i32) -> i32;
    fn should_boost_brightness(&self) -> bool;

    fn set_callback(&self, callback: Option<Arc<dyn FingerprintInscreenCallback>>);
}
