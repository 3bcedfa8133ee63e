use std::path::PathBuf;

pub const FINGERPRINT_ACQUIRED_VENDOR: i32 = 6;

pub const VENDOR_CODE_FINGER_DOWN: i32 = 22;
pub const VENDOR_CODE_FINGER_UP: i32 = 23;

pub const COMMAND_NIT: i32 = 10;
pub const PARAM_NIT_630_FOD: i32 = 1;
pub const PARAM_NIT_NONE: i32 = 0;

pub const FOD_PRESSED_PATH: &str =
    "/sys/devices/platform/soc/soc:qcom,dsi-display-primary/fod_pressed";
pub const FOD_PRESSED_ON: i32 = 1;
pub const FOD_PRESSED_OFF: i32 = 0;

pub const FOD_STATUS_PATH: &str = "/sys/devices/virtual/touch/tp_dev/fod_status";
pub const FOD_STATUS_ON: i32 = 1;
pub const FOD_STATUS_OFF: i32 = 0;

pub const FOD_UI_PATH: &str = "/sys/devices/platform/soc/soc:qcom,dsi-display-primary/fod_ui";

pub const PROP_FOD_LOCATION: &str = "persist.vendor.sys.fp.fod.location.X_Y";
pub const PROP_FOD_SIZE: &str = "persist.vendor.sys.fp.fod.size.width_height";

pub const FOD_DEFAULT_X: i32 = 445;
pub const FOD_DEFAULT_Y: i32 = 1910;
pub const FOD_DEFAULT_SIZE: i32 = 190;

/// Sysfs attributes the bridge talks to.
#[derive(Clone, Debug)]
pub struct FodPaths {
    pub pressed: PathBuf,
    pub status: PathBuf,
    pub ui: PathBuf,
}

impl Default for FodPaths {
    fn default() -> Self {
        Self {
            pressed: FOD_PRESSED_PATH.into(),
            status: FOD_STATUS_PATH.into(),
            ui: FOD_UI_PATH.into(),
        }
    }
}
