//! Argument conversion used by generated bindings

use std::ffi::{c_char, CStr, CString};

use crate::error::{MagickError, Result};
use crate::geometry::MagickGeometry;

/// Convert a string argument to a NUL-terminated native string.
pub fn to_c_string(name: &str, value: &str) -> Result<CString> {
    CString::new(value).map_err(|e| {
        MagickError::invalid_argument(
            name,
            format!("contains a NUL byte at position {}", e.nul_position()),
        )
    })
}

/// Convert a geometry argument to its canonical native string.
pub fn geometry_to_c_string(name: &str, geometry: &MagickGeometry) -> Result<CString> {
    if geometry.is_empty() {
        return Err(MagickError::invalid_argument(name, "geometry is empty"));
    }
    to_c_string(name, &geometry.to_string())
}

/// Copy a native string. Null yields `None`; invalid UTF-8 is replaced.
///
/// # Safety
///
/// `ptr` must be null or point to a NUL-terminated string that stays valid for the
/// duration of the call.
pub unsafe fn string_from_native(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    Some(CStr::from_ptr(ptr).to_string_lossy().into_owned())
}
