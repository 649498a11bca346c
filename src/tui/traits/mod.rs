//! Component traits for keyboard routing
//!
//! Instead of the router knowing how every component reacts to every key,
//! components declare which keys they consume through [`Interactive`].

mod interactive;

pub use interactive::{Handled, Interactive};
