pub mod debug;
pub mod props;
pub mod sysfs;
