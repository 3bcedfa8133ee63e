use std::ops::Deref;

#[cfg(target_os = "android")]
const PROP_VALUE_MAX: usize = 92;

#[cfg(target_os = "android")]
mod system {
    use std::ffi::c_char;

    unsafe extern "C" {
        pub fn __system_property_get(name: *const c_char, value: *mut c_char) -> i32;
    }
}

// https://cs.android.com/android/platform/superproject/main/+/main:system/libbase/parsebool.cpp;l=23-31;drc=61197364367c9e404c7da6900658f1b16c42d0da
fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "y" | "yes" | "on" | "true" => Some(true),
        "0" | "n" | "no" | "off" | "false" => Some(false),
        _ => None,
    }
}

pub struct Property(String);

impl From<Property> for bool {
    fn from(value: Property) -> Self {
        parse_bool(&value).unwrap_or_default()
    }
}

impl Property {
    pub fn into_string(self) -> String {
        self.0
    }
}

impl Deref for Property {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

#[cfg(target_os = "android")]
pub fn get(name: &str) -> Option<Property> {
    use std::ffi::{CStr, CString};

    let name = CString::new(name).ok()?;
    let mut buffer = [0u8; PROP_VALUE_MAX + 1];

    let len = unsafe { system::__system_property_get(name.as_ptr(), buffer.as_mut_ptr() as _) };

    if len <= 0 {
        return None;
    }

    let value = CStr::from_bytes_until_nul(&buffer).ok()?;
    Some(Property(value.to_string_lossy().into_owned()))
}

/// There is no property service off-device, every property reads as unset.
#[cfg(not(target_os = "android"))]
pub fn get(_name: &str) -> Option<Property> {
    None
}

pub fn prop_on(name: &str) -> bool {
    get(name).map(|it| it.into()).unwrap_or_default()
}

/// Where configuration properties are looked up.
pub trait PropertySource {
    fn get(&self, key: &str) -> Option<String>;
}

pub struct SystemProperties;

impl PropertySource for SystemProperties {
    fn get(&self, key: &str) -> Option<String> {
        get(key).map(Property::into_string)
    }
}

impl<F: Fn(&str) -> Option<String>> PropertySource for F {
    fn get(&self, key: &str) -> Option<String> {
        self(key)
    }
}

/// Integer parsing with libbase `ParseInt` rules: leading whitespace is skipped, a
/// `0x`/`0X` prefix selects hex, anything else is decimal with an optional sign.
/// Trailing garbage rejects the value.
pub fn parse_int(text: &str) -> Option<i64> {
    let text = text.trim_start();

    let (radix, negative, digits) = if let Some(hex) = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
    {
        (16, false, hex)
    } else {
        match text.as_bytes().first()? {
            b'-' => (10, true, &text[1..]),
            b'+' => (10, false, &text[1..]),
            _ => (10, false, text),
        }
    };

    // from_str_radix would accept a second sign here
    if digits.is_empty() || !digits.bytes().all(|b| (b as char).is_digit(radix)) {
        return None;
    }

    let magnitude = i128::from_str_radix(digits, radix).ok()?;
    let value = if negative { -magnitude } else { magnitude };

    i64::try_from(value).ok()
}

/// Parses a comma separated list of integers, requiring exactly `count` elements.
pub fn parse_int_list(value: &str, count: usize) -> Option<Vec<i32>> {
    let items: Vec<&str> = value.split(',').collect();

    if items.len() != count {
        return None;
    }

    items
        .into_iter()
        .map(|item| parse_int(item).and_then(|it| i32::try_from(it).ok()))
        .collect()
}
