//! Shared library behind the two terminal demos: the crop editor and
//! The Jumper's Journey platformer.  Everything here is pure state and
//! arithmetic; terminal I/O lives in the binaries.

pub mod compute;
pub mod config;
pub mod crop;
pub mod editor;
pub mod entities;
pub mod error;
pub mod geometry;
pub mod levels;
pub mod logging;

pub use error::{Error, Result};
