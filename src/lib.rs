// Pedantic: suppress noise for internal crate code.
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]

pub mod backend;
pub mod config;
pub mod engine;
pub mod error;
pub mod filter;
pub mod persist;
pub mod reference;
pub mod render;
pub mod types;
pub(crate) mod util;
pub mod view;
pub mod views;

pub use error::{Error, Result};
