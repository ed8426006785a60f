//! Stack growth for the recursive doc utilities.
//!
//! Traversal, propagation and printing use explicit stacks. The rebuilding
//! utilities ([`map_doc`](crate::map_doc), the JSON codec, debug rendering)
//! are naturally recursive; they wrap each level in
//! [`ensure_sufficient_stack`] so docs nested tens of thousands deep still
//! work.

/// Keep at least this much stack free before recursing (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Allocate this much when the red zone is hit (1MB).
const GROWTH: usize = 1024 * 1024;

/// Run `f`, first growing the stack if little of it remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, GROWTH, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
