use crate::config::{
    FINGERPRINT_ACQUIRED_VENDOR, FOD_PRESSED_OFF, FOD_PRESSED_ON, FOD_STATUS_OFF, FOD_STATUS_ON,
    FodPaths, VENDOR_CODE_FINGER_DOWN, VENDOR_CODE_FINGER_UP,
};
use crate::geometry::Geometry;
use crate::hal::{FingerprintInscreen, FingerprintInscreenCallback, XiaomiFingerprint};
use crate::monitor::UiMonitor;
use anyhow::Result;
use log::error;
use parking_lot::Mutex;
use shim_common::ext::ResultExt;
use shim_misc::props::PropertySource;
use shim_misc::sysfs;
use std::path::Path;
use std::sync::Arc;

pub struct FingerprintInscreenService {
    geometry: Geometry,
    paths: FodPaths,
    callback: Mutex<Option<Arc<dyn FingerprintInscreenCallback>>>,
    monitor: Mutex<UiMonitor>,
}

fn set(path: &Path, value: i32) {
    sysfs::write_value(path, value).log_if_error(&format!("writing {}", path.display()));
}

impl FingerprintInscreenService {
    pub fn new<S: PropertySource + ?Sized>(
        proxy: Arc<dyn XiaomiFingerprint>,
        properties: &S,
        paths: FodPaths,
    ) -> Result<Self> {
        let geometry = Geometry::from_properties(properties);
        let monitor = UiMonitor::spawn(paths.ui.clone(), proxy)?;

        Ok(Self {
            geometry,
            paths,
            callback: Mutex::new(None),
            monitor: Mutex::new(monitor),
        })
    }

    /// Stops the `fod_ui` watcher. The service keeps answering calls afterwards.
    pub fn shutdown(&self) {
        self.monitor.lock().stop();
    }
}

impl FingerprintInscreen for FingerprintInscreenService {
    fn get_position_x(&self) -> i32 {
        self.geometry.x
    }

    fn get_position_y(&self) -> i32 {
        self.geometry.y
    }

    fn get_size(&self) -> i32 {
        self.geometry.size
    }

    fn on_start_enroll(&self) {}

    fn on_finish_enroll(&self) {}

    fn on_press(&self) {
        set(&self.paths.pressed, FOD_PRESSED_ON);
    }

    fn on_release(&self) {
        set(&self.paths.pressed, FOD_PRESSED_OFF);
    }

    fn on_show_fod_view(&self) {
        set(&self.paths.status, FOD_STATUS_ON);
    }

    fn on_hide_fod_view(&self) {
        set(&self.paths.status, FOD_STATUS_OFF);
    }

    fn handle_acquired(&self, acquired_info: i32, vendor_code: i32) -> bool {
        let callback = self.callback.lock();
        let Some(callback) = callback.as_ref() else {
            return false;
        };

        if acquired_info != FINGERPRINT_ACQUIRED_VENDOR {
            return false;
        }

        match vendor_code {
            VENDOR_CODE_FINGER_DOWN => {
                if let Err(err) = callback.on_finger_down() {
                    error!("FingerDown() error: {err:?}");
                }
                true
            }
            VENDOR_CODE_FINGER_UP => {
                if let Err(err) = callback.on_finger_up() {
                    error!("FingerUp() error: {err:?}");
                }
                true
            }
            _ => false,
        }
    }

    fn handle_error(&self, error: i32, vendor_code: i32) -> bool {
        error!("error: {error}, vendorCode: {vendor_code}");
        false
    }

    fn set_long_press_enabled(&self, _enabled: bool) {}

    fn get_dim_amount(&self, _brightness: i32) -> i32 {
        0
    }

    fn should_boost_brightness(&self) -> bool {
        false
    }

    fn set_callback(&self, callback: Option<Arc<dyn FingerprintInscreenCallback>>) {
        *self.callback.lock() = callback;
    }
}
