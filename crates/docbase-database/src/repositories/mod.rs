//! Typed repositories for each document kind stored in the collection.

pub mod user;

pub use user::UserRepository;
