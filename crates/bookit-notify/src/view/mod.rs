//! Presentation helpers shared by every notification surface.
//!
//! All functions here are pure: they take slices or values and return new
//! ones, never touching the store.

pub mod filter;
pub mod icon;
pub mod sort;
pub mod time;

pub use filter::ReadFilter;
pub use icon::{Icon, Tint, priority_tint, type_icon, type_tint};
pub use sort::SortOrder;
pub use time::format_relative;
