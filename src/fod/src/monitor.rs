use crate::config::{COMMAND_NIT, PARAM_NIT_630_FOD, PARAM_NIT_NONE};
use crate::hal::XiaomiFingerprint;
use anyhow::Result;
use log::{debug, error, info};
use nix::errno::Errno;
use nix::poll::{PollFd, PollFlags, PollTimeout, poll};
use nix::sys::eventfd::{EfdFlags, EventFd};
use shim_common::ext::ResultExt;
use shim_misc::debug_on;
use shim_misc::sysfs::read_bool;
use std::fs::File;
use std::os::fd::AsFd;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::thread::JoinHandle;

/// Watches the `fod_ui` attribute and mirrors it into the panel brightness mode.
pub struct UiMonitor {
    stop: Arc<EventFd>,
    handle: Option<JoinHandle<()>>,
}

impl UiMonitor {
    pub fn spawn(path: PathBuf, proxy: Arc<dyn XiaomiFingerprint>) -> Result<Self> {
        Self::spawn_with_events(path, PollFlags::POLLERR | PollFlags::POLLPRI, proxy)
    }

    pub(crate) fn spawn_with_events(
        path: PathBuf,
        events: PollFlags,
        proxy: Arc<dyn XiaomiFingerprint>,
    ) -> Result<Self> {
        let stop = Arc::new(EventFd::from_value_and_flags(0, EfdFlags::EFD_CLOEXEC)?);

        let handle = thread::Builder::new().name("fod-ui".into()).spawn({
            let stop = Arc::clone(&stop);
            move || watch(&path, events, proxy.as_ref(), &stop)
        })?;

        Ok(Self {
            stop,
            handle: Some(handle),
        })
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|it| !it.is_finished())
    }

    /// Wakes the worker and waits for it to exit. Later calls do nothing.
    pub fn stop(&mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };

        self.stop.write(1).log_if_error("signalling ui monitor");

        if handle.join().is_err() {
            error!("ui monitor panicked");
        }
    }
}

impl Drop for UiMonitor {
    fn drop(&mut self) {
        self.stop();
    }
}

fn watch(path: &Path, events: PollFlags, proxy: &dyn XiaomiFingerprint, stop: &EventFd) {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) => {
            error!("failed to open {}: {err}", path.display());
            return;
        }
    };

    loop {
        let mut fds = [
            PollFd::new(file.as_fd(), events),
            PollFd::new(stop.as_fd(), PollFlags::POLLIN),
        ];

        match poll(&mut fds, PollTimeout::NONE) {
            Ok(_) => {}
            Err(Errno::EINTR) => continue,
            Err(err) => {
                error!("failed to poll {}: {err}", path.display());
                continue;
            }
        }

        if fds[1]
            .revents()
            .is_some_and(|it| it.intersects(PollFlags::POLLIN))
        {
            break;
        }

        let pressed = read_bool(&file)
            .inspect_err(|err| error!("failed to read {}: {err:?}", path.display()))
            .unwrap_or(false);

        if debug_on!("fod") {
            debug!("fod_ui changed: pressed = {pressed}");
        }

        let param = if pressed {
            PARAM_NIT_630_FOD
        } else {
            PARAM_NIT_NONE
        };

        proxy.ext_cmd(COMMAND_NIT, param).log_if_error("extCmd");
    }

    info!("ui monitor stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::mpsc;
    use std::time::Duration;

    struct ChannelProxy(mpsc::Sender<(i32, i32)>);

    impl XiaomiFingerprint for ChannelProxy {
        fn ext_cmd(&self, cmd: i32, param: i32) -> Result<i32> {
            let _ = self.0.send((cmd, param));
            Ok(0)
        }
    }

    fn proxy() -> (Arc<dyn XiaomiFingerprint>, mpsc::Receiver<(i32, i32)>) {
        let (tx, rx) = mpsc::channel();
        (Arc::new(ChannelProxy(tx)), rx)
    }

    // regular files always poll readable, which stands in for a sysfs notification
    fn spawn_on_file(content: &str) -> (tempfile::TempDir, UiMonitor, mpsc::Receiver<(i32, i32)>) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fod_ui");
        fs::write(&path, content).unwrap();

        let (proxy, rx) = proxy();
        let monitor = UiMonitor::spawn_with_events(path, PollFlags::POLLIN, proxy).unwrap();
        (dir, monitor, rx)
    }

    #[test]
    fn pressed_ui_enables_fod_brightness() {
        let (_dir, mut monitor, rx) = spawn_on_file("1");

        let call = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(call, (COMMAND_NIT, PARAM_NIT_630_FOD));

        monitor.stop();
        assert!(!monitor.is_running());
    }

    #[test]
    fn released_ui_clears_fod_brightness() {
        let (_dir, mut monitor, rx) = spawn_on_file("0");

        let call = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(call, (COMMAND_NIT, PARAM_NIT_NONE));

        monitor.stop();
    }

    #[test]
    fn unreadable_state_counts_as_released() {
        let (_dir, mut monitor, rx) = spawn_on_file("");

        let call = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(call, (COMMAND_NIT, PARAM_NIT_NONE));

        monitor.stop();
    }

    #[test]
    fn stop_interrupts_idle_wait() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fod_ui");
        fs::write(&path, "1").unwrap();

        let (proxy, rx) = proxy();
        let mut monitor = UiMonitor::spawn(path, proxy).unwrap();
        assert!(monitor.is_running());

        monitor.stop();
        assert!(!monitor.is_running());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn missing_attribute_ends_worker() {
        let dir = tempfile::tempdir().unwrap();
        let (proxy, rx) = proxy();

        let mut monitor = UiMonitor::spawn(dir.path().join("absent"), proxy).unwrap();
        monitor.stop();

        assert!(rx.try_recv().is_err());
    }
}
