//! # Core Module
//!
//! Shared-ownership primitives used throughout the engine.
//!
//! ## Key Components
//! - `StResource`: Single-threaded reference-counted resource with interior mutability
//! - `WeakStResource`: Non-owning handle to an `StResource`, used to break the
//!   chunk → world ownership cycle

pub mod st_resource;

pub use st_resource::{StResource, WeakStResource};
