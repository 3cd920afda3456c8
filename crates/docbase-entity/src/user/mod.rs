//! User document kind.

pub mod model;

pub use model::{USER_KIND, User};
