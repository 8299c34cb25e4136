//! Session locking on a device node.
//!
//! A regular file stands in for `/dev/hidrawN`; `flock` behaves the same.

use mcp2200_hid::{Config, Error, HidrawDevice, Mcp2200, Result};
use std::path::Path;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

#[test]
fn second_session_blocks_until_first_closes() {
    let node = tempfile::NamedTempFile::new().unwrap();
    let path = node.path().to_path_buf();

    let first = Mcp2200::open_by_path(&path, Config::default()).unwrap();

    let (tx, rx) = mpsc::channel();
    let waiter = thread::spawn(move || {
        let second = Mcp2200::open_by_path(&path, Config::default()).unwrap();
        tx.send(()).unwrap();
        second.close().unwrap();
    });

    // Still held by the first session
    assert!(rx.recv_timeout(Duration::from_millis(200)).is_err());

    first.close().unwrap();
    rx.recv_timeout(Duration::from_secs(5))
        .expect("second session never acquired the lock");
    waiter.join().unwrap();
}

#[test]
fn lock_released_on_drop() {
    let node = tempfile::NamedTempFile::new().unwrap();
    {
        let _session = Mcp2200::open_by_path(node.path(), Config::default()).unwrap();
        assert!(matches!(
            HidrawDevice::try_open(node.path()),
            Err(Error::DeviceBusy { .. })
        ));
    }
    let dev = HidrawDevice::try_open(node.path()).unwrap();
    assert_eq!(dev.path(), node.path());
}

fn failing_session(path: &Path) -> Result<()> {
    let mut session = Mcp2200::open_by_path(path, Config::default())?;
    session.set_baud_rate(0)?;
    session.close()
}

#[test]
fn lock_released_after_failed_operation() {
    let node = tempfile::NamedTempFile::new().unwrap();
    assert!(matches!(
        failing_session(node.path()),
        Err(Error::ArgumentOutOfRange(_))
    ));
    Mcp2200::try_open_by_path(node.path(), Config::default())
        .unwrap()
        .close()
        .unwrap();
}
