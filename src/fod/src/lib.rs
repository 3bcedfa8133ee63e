pub mod config;
pub mod geometry;
pub mod hal;
pub mod monitor;
pub mod service;

pub use config::FodPaths;
pub use geometry::Geometry;
pub use hal::{FingerprintInscreen, FingerprintInscreenCallback, XiaomiFingerprint};
pub use service::FingerprintInscreenService;
