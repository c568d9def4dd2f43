//! Linked native library
//!
//! With the `link-native` feature the generated entry point traits are implemented for
//! [`LinkedLibrary`] by calling the exported symbols directly.

use std::ffi::{c_char, c_void};

use crate::error::NativeException;
use crate::exception::ExceptionSlot;
use crate::marshal::string_from_native;

/// The native library linked into this process.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkedLibrary;

impl LinkedLibrary {
    pub fn new() -> Self {
        LinkedLibrary
    }
}

extern "C" {
    #[link_name = "MagickExceptionHelper_Severity"]
    fn exception_severity(exception: *mut c_void) -> i32;
    #[link_name = "MagickExceptionHelper_Message"]
    fn exception_message(exception: *mut c_void) -> *const c_char;
    #[link_name = "MagickExceptionHelper_Description"]
    fn exception_description(exception: *mut c_void) -> *const c_char;
    #[link_name = "MagickExceptionHelper_Dispose"]
    fn exception_dispose(exception: *mut c_void);
}

impl ExceptionSlot {
    /// Copy a native exception into this slot and release it.
    ///
    /// # Safety
    ///
    /// `raw` must be null or an exception produced by the native library that has not been
    /// released yet.
    pub unsafe fn capture_raw(&mut self, raw: *mut c_void) {
        if raw.is_null() {
            return;
        }
        let code = exception_severity(raw);
        let message = string_from_native(exception_message(raw)).unwrap_or_default();
        let mut exception = NativeException::new(code, message);
        if let Some(description) = string_from_native(exception_description(raw)) {
            exception = exception.with_description(description);
        }
        exception_dispose(raw);
        self.raise(exception);
    }
}
