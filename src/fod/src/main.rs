mod cli;

use crate::cli::{Cli, Command};
use anyhow::{Context, Result};
use log::info;
use shim_fod::config::{FOD_PRESSED_OFF, FOD_PRESSED_ON, FOD_STATUS_OFF, FOD_STATUS_ON};
use shim_fod::{FingerprintInscreenService, Geometry, XiaomiFingerprint};
use shim_misc::props::SystemProperties;
use shim_misc::sysfs;
use std::path::Path;
use std::sync::Arc;
use tokio::runtime::Builder;
use tokio::signal;
use tokio::signal::unix::SignalKind;

/// Stands in for the vendor HAL when the bridge runs outside the framework.
struct LoggingFingerprint;

impl XiaomiFingerprint for LoggingFingerprint {
    fn ext_cmd(&self, cmd: i32, param: i32) -> Result<i32> {
        info!("extCmd({cmd}, {param})");
        Ok(0)
    }
}

fn init_logger() {
    #[cfg(target_os = "android")]
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(if cfg!(debug_assertions) {
                log::LevelFilter::Trace
            } else {
                log::LevelFilter::Info
            })
            .with_tag("FingerprintInscreenService"),
    );

    #[cfg(not(target_os = "android"))]
    env_logger::init();
}

#[cfg(target_os = "android")]
fn inject_panic_handler() {
    use nix::libc;
    use std::panic;

    let original = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // dump tombstone on panic
        // https://cs.android.com/android/platform/superproject/+/android14-release:bionic/libc/platform/bionic/reserved_signals.h;l=41
        unsafe {
            libc::raise(35 /* BIONIC_SIGNAL_DEBUGGER */);
        }

        original(info);
    }))
}

#[cfg(not(target_os = "android"))]
fn inject_panic_handler() {}

fn write(path: &Path, value: i32) -> Result<()> {
    sysfs::write_value(path, value).with_context(|| format!("failed to write {}", path.display()))
}

async fn serve(service: FingerprintInscreenService) -> Result<()> {
    let mut terminate = signal::unix::signal(SignalKind::terminate())?;

    info!("fingerprint inscreen bridge is running");

    tokio::select! {
        res = signal::ctrl_c() => res?,
        _ = terminate.recv() => {}
    }

    info!("shutting down");
    service.shutdown();

    Ok(())
}

fn main() -> Result<()> {
    init_logger();
    inject_panic_handler();

    let args = Cli::parse_args();
    let paths = args.paths();

    match args.command {
        Command::Serve => {
            let service = FingerprintInscreenService::new(
                Arc::new(LoggingFingerprint),
                &SystemProperties,
                paths,
            )?;

            Builder::new_current_thread()
                .enable_all()
                .build()?
                .block_on(serve(service))?;
        }
        Command::Geometry => {
            let geometry = Geometry::from_properties(&SystemProperties);
            println!("x={} y={} size={}", geometry.x, geometry.y, geometry.size);
        }
        Command::Press => write(&paths.pressed, FOD_PRESSED_ON)?,
        Command::Release => write(&paths.pressed, FOD_PRESSED_OFF)?,
        Command::Show => write(&paths.status, FOD_STATUS_ON)?,
        Command::Hide => write(&paths.status, FOD_STATUS_OFF)?,
    }

    Ok(())
}
