//! Single-operation mutation protocol
//!
//! A mutator runs at most one mutating native call and holds the produced handle until it
//! is claimed with `take` or released with `dispose`:
//!
//! ```text
//! Unbound --bind--> Bound --take--> Claimed
//!                     \---dispose--> Released
//! ```
//!
//! Any mutating call outside `Unbound` is rejected before the native library is reached.

use crate::error::{MagickError, Result};
use crate::handle::{OwnedHandle, RawHandle};

const SINGLE_OPERATION: &str = "Only a single operation can be executed.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutatorState {
    /// No operation has produced a result yet
    Unbound,
    /// Holding the result of the one allowed operation
    Bound,
    /// The result was moved out to the caller
    Claimed,
    /// The result was released without being claimed
    Released,
}

/// Holder for the result of one mutating operation.
pub struct Mutator<'lib, L> {
    state: MutatorState,
    result: Option<OwnedHandle<'lib, L>>,
}

impl<'lib, L> Mutator<'lib, L> {
    pub fn new() -> Self {
        Mutator {
            state: MutatorState::Unbound,
            result: None,
        }
    }

    pub fn state(&self) -> MutatorState {
        self.state
    }

    /// Fail unless no operation has run yet.
    pub fn ensure_unbound(&self) -> Result<()> {
        if self.state == MutatorState::Unbound {
            Ok(())
        } else {
            Err(MagickError::invalid_operation(SINGLE_OPERATION))
        }
    }

    /// Store the result of the operation.
    ///
    /// A second result is released immediately and rejected. A null result is rejected and
    /// leaves the mutator unbound.
    pub fn bind(&mut self, result: OwnedHandle<'lib, L>) -> Result<()> {
        if self.state != MutatorState::Unbound {
            drop(result);
            return Err(MagickError::invalid_operation(SINGLE_OPERATION));
        }
        if result.is_null() {
            return Err(MagickError::invalid_operation(
                "The native call did not produce an instance.",
            ));
        }
        self.result = Some(result);
        self.state = MutatorState::Bound;
        Ok(())
    }

    /// Store the result of an operation run on `source`.
    ///
    /// A native call may hand back the source instance itself after modifying it in place.
    /// That handle stays owned by the source wrapper: ownership is given up, nothing is
    /// bound and the call is rejected.
    pub fn bind_from(&mut self, source: RawHandle, result: OwnedHandle<'lib, L>) -> Result<()> {
        if !source.is_null() && result.raw() == source {
            result.into_raw();
            return Err(MagickError::invalid_operation(
                "The native call modified the source instance in place.",
            ));
        }
        self.bind(result)
    }

    /// Move the result out. Only the first call after binding returns it.
    pub fn take(&mut self) -> Option<OwnedHandle<'lib, L>> {
        if self.state != MutatorState::Bound {
            return None;
        }
        self.state = MutatorState::Claimed;
        self.result.take()
    }

    /// Release an unclaimed result. No-op in every other state.
    pub fn dispose(&mut self) {
        if self.state != MutatorState::Bound {
            return;
        }
        self.state = MutatorState::Released;
        if let Some(mut result) = self.result.take() {
            result.release();
        }
    }
}

impl<L> Default for Mutator<'_, L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L> Drop for Mutator<'_, L> {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl<L> std::fmt::Debug for Mutator<'_, L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mutator")
            .field("state", &self.state)
            .field("result", &self.result)
            .finish()
    }
}
