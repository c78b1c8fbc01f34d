//! Dashboard view and terminal rendering
//!
//! Composes the two feeds, the derivation layer, and one animation driver
//! per statistic into four stat cards plus an error banner.

pub mod render;
pub mod view;

pub use render::{render_frame, CardView, FrameData};
pub use view::DashboardView;
