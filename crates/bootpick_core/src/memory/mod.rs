//! # Memory Management
//!
//! Fixed-capacity storage for scene objects.
//!
//! ## Design Philosophy
//!
//! The picker's object count is bounded by the number of bootable volumes, so
//! all slots are reserved once when the view is built:
//! - Objects are addressed by generational [`Handle`]s, never by pointer
//! - A stale handle to a freed slot resolves to nothing
//! - Running out of slots is reported, not fatal

mod pool;

pub use pool::{Handle, Pool};
