//! Authentication session client for the admin console
//!
//! This library owns the one part of the console with real protocol and
//! state-machine content: acquiring, storing, and invalidating the
//! backend token pair, normalizing API failures into a small taxonomy
//! with a uniform redirect policy, and bridging the asynchronously
//! loaded Google identity SDK into the application's own sign-in flow.
//! Form rendering, layout, and routing stay with the embedding
//! application behind the `Navigator` trait.

pub mod bridge;
pub mod config;
pub mod error;
pub mod flows;
pub mod gateway;
pub mod navigation;
pub mod store;
pub mod types;

#[cfg(test)]
pub(crate) mod test_utils;

pub use error::{Error, Result};
