//! Concrete implementations of the collaborator traits.
//!
//! This module contains implementations of the traits defined in
//! [`crate::traits`]:
//!
//! - `mock`: test doubles for desktop development and the test suites
//! - `timer`: interval heartbeat over the [`Clock`](crate::traits::Clock)
//!   trait
//! - `serial`: newline-delimited JSON uplink (requires the `serde`
//!   feature)
//!
//! Physical radio and LED drivers are deliberately absent: they are
//! board-specific, and the dispatcher only ever sees them through the
//! traits.

pub mod mock;
pub mod timer;

#[cfg(feature = "serde")]
pub mod serial;

pub use mock::*;
pub use timer::*;

#[cfg(feature = "serde")]
pub use serial::*;
