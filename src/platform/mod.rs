//! Platform abstraction layer
//!
//! Browser-only pieces the portable core must not depend on:
//! - `requestAnimationFrame` loop with explicit cancellation

#[cfg(target_arch = "wasm32")]
mod animation;
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
mod slot;

#[cfg(target_arch = "wasm32")]
pub use animation::{AnimationLoop, LoopHandle};
