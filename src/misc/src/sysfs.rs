use anyhow::{Result, bail};
use std::fmt::Display;
use std::fs::File;
use std::io;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

/// Writes the text form of `value` to a sysfs attribute, no trailing newline.
pub fn write_value<P: AsRef<Path>, T: Display>(path: P, value: T) -> io::Result<()> {
    let mut file = File::create(path)?;
    write!(file, "{value}")
}

/// Re-reads the first byte of an attribute. Anything but `'0'` is `true`.
pub fn read_bool(file: &File) -> Result<bool> {
    let mut reader = file;
    let mut byte = [0u8; 1];

    reader.seek(SeekFrom::Start(0))?;

    let count = reader.read(&mut byte)?;
    if count != 1 {
        bail!("short read from attribute: {count} bytes");
    }

    Ok(byte[0] != b'0')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn write_value_replaces_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fod_pressed");

        write_value(&path, 1).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "1");

        write_value(&path, 0).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "0");
    }

    #[test]
    fn write_value_reports_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(write_value(dir.path().join("absent/attr"), 1).is_err());
    }

    #[test]
    fn read_bool_rereads_from_start() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fod_ui");

        fs::write(&path, "1\n").unwrap();
        let file = File::open(&path).unwrap();
        assert!(read_bool(&file).unwrap());
        assert!(read_bool(&file).unwrap());

        fs::write(&path, "0\n").unwrap();
        assert!(!read_bool(&file).unwrap());
    }

    #[test]
    fn read_bool_fails_on_empty_attribute() {
        let file = tempfile::tempfile().unwrap();
        assert!(read_bool(&file).is_err());
    }
}
