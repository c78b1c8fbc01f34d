//! Eased counter animation for dashboard statistics
//!
//! A changing target value becomes a smoothly interpolating display value:
//! - [`tween`]: the pure easing math, driven by caller-supplied instants
//! - [`driver`]: a cancelable tokio task publishing the display value on a
//!   refresh tick

pub mod driver;
pub mod tween;

pub use driver::{spawn_animation, AnimationConfig, AnimationHandle};
pub use tween::{ease_out_cubic, Animated, Tween};
