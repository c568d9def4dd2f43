//! Exception slot passed to throwing entry points

use crate::error::{MagickError, NativeException, Result};

/// Receives at most one exception from a native call.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ExceptionSlot {
    exception: Option<NativeException>,
}

impl ExceptionSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an exception. The first one raised is kept.
    pub fn raise(&mut self, exception: NativeException) {
        if self.exception.is_none() {
            self.exception = Some(exception);
        }
    }

    pub fn is_set(&self) -> bool {
        self.exception.is_some()
    }

    pub fn exception(&self) -> Option<&NativeException> {
        self.exception.as_ref()
    }

    pub fn take(&mut self) -> Option<NativeException> {
        self.exception.take()
    }

    /// Fail on error-class exceptions; warnings are logged and do not fail.
    pub fn check(self) -> Result<()> {
        match self.exception {
            Some(exception) if exception.is_warning() => {
                log::warn!("native warning: {}", exception);
                Ok(())
            }
            Some(exception) => Err(MagickError::Native(exception)),
            None => Ok(()),
        }
    }

    /// Combine the outcome of a primary call and its cleanup call.
    ///
    /// A primary failure wins; a cleanup failure that would be masked by it is logged.
    pub fn finish(primary: Option<ExceptionSlot>, cleanup: ExceptionSlot) -> Result<()> {
        let primary = primary.map(ExceptionSlot::check).unwrap_or(Ok(()));
        let cleanup = cleanup.check();
        match (primary, cleanup) {
            (Err(error), Err(masked)) => {
                log::warn!("cleanup call failed after a failed call: {}", masked);
                Err(error)
            }
            (Err(error), Ok(())) | (Ok(()), Err(error)) => Err(error),
            (Ok(()), Ok(())) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(code: i32, message: &str) -> ExceptionSlot {
        let mut slot = ExceptionSlot::new();
        slot.raise(NativeException::new(code, message));
        slot
    }

    #[test]
    fn test_first_exception_is_kept() {
        let mut slot = slot(410, "first");
        slot.raise(NativeException::new(420, "second"));
        assert_eq!(slot.exception().unwrap().message, "first");
    }

    #[test]
    fn test_warnings_do_not_fail() {
        assert!(slot(350, "coder warning").check().is_ok());
        assert!(ExceptionSlot::new().check().is_ok());
        assert!(matches!(slot(410, "boom").check(), Err(MagickError::Native(_))));
    }

    #[test]
    fn test_primary_failure_wins() {
        let result = ExceptionSlot::finish(Some(slot(410, "primary")), slot(420, "cleanup"));
        match result {
            Err(MagickError::Native(exception)) => assert_eq!(exception.message, "primary"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_cleanup_failure_is_reported() {
        let result = ExceptionSlot::finish(Some(ExceptionSlot::new()), slot(420, "cleanup"));
        match result {
            Err(MagickError::Native(exception)) => assert_eq!(exception.message, "cleanup"),
            other => panic!("unexpected {:?}", other),
        }
        assert!(ExceptionSlot::finish(None, ExceptionSlot::new()).is_ok());
    }
}
