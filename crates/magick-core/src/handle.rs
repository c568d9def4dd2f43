//! Native handles
//!
//! [`RawHandle`] is the opaque address the native library hands out. [`OwnedHandle`]
//! pairs it with the entry point that releases it, so every handle has exactly one owner
//! and is released exactly once.

use std::ffi::c_void;
use std::fmt;

/// Opaque address of a native resource. Copying it does not copy ownership.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawHandle(*mut c_void);

impl RawHandle {
    pub const NULL: RawHandle = RawHandle(std::ptr::null_mut());

    pub fn from_ptr(ptr: *mut c_void) -> Self {
        RawHandle(ptr)
    }

    /// Handle with a fixed address, for native libraries that hand out integer ids.
    pub fn from_addr(addr: usize) -> Self {
        RawHandle(addr as *mut c_void)
    }

    pub fn as_ptr(&self) -> *mut c_void {
        self.0
    }

    pub fn addr(&self) -> usize {
        self.0 as usize
    }

    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }
}

impl Default for RawHandle {
    fn default() -> Self {
        RawHandle::NULL
    }
}

impl fmt::Debug for RawHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RawHandle({:#x})", self.addr())
    }
}

/// Release entry point for handles created by library `L`.
pub type ReleaseFn<L> = fn(&L, RawHandle);

/// A native handle with a single owner, released on drop.
pub struct OwnedHandle<'lib, L> {
    library: &'lib L,
    raw: RawHandle,
    release: ReleaseFn<L>,
}

impl<'lib, L> OwnedHandle<'lib, L> {
    /// Take ownership of `raw`. A null handle owns nothing.
    pub fn new(library: &'lib L, raw: RawHandle, release: ReleaseFn<L>) -> Self {
        OwnedHandle { library, raw, release }
    }

    pub fn null(library: &'lib L, release: ReleaseFn<L>) -> Self {
        OwnedHandle::new(library, RawHandle::NULL, release)
    }

    pub fn raw(&self) -> RawHandle {
        self.raw
    }

    pub fn is_null(&self) -> bool {
        self.raw.is_null()
    }

    pub fn library(&self) -> &'lib L {
        self.library
    }

    /// Adopt `other`, releasing the current handle unless both are the same resource.
    pub fn replace(&mut self, other: OwnedHandle<'lib, L>) {
        let raw = other.into_raw();
        if raw == self.raw {
            return;
        }
        self.release();
        self.raw = raw;
    }

    /// Release the handle now. Releasing twice is a no-op.
    pub fn release(&mut self) {
        if self.raw.is_null() {
            return;
        }
        let raw = std::mem::replace(&mut self.raw, RawHandle::NULL);
        log::trace!("releasing native handle {:?}", raw);
        (self.release)(self.library, raw);
    }

    /// Give up ownership without releasing.
    pub fn into_raw(mut self) -> RawHandle {
        std::mem::replace(&mut self.raw, RawHandle::NULL)
    }
}

impl<L> Drop for OwnedHandle<'_, L> {
    fn drop(&mut self) {
        self.release();
    }
}

impl<L> fmt::Debug for OwnedHandle<'_, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("OwnedHandle").field(&self.raw).finish()
    }
}
