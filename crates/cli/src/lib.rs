//! # Portalwatch CLI
//!
//! Front end for the alert query operation. Configuration is read once into
//! a [`Session`] that holds the default credential; every command passes that
//! credential explicitly to the alert service.

pub mod args;
pub mod commands;
pub mod logging;
pub mod session;

pub use args::{Cli, Command, GetArgs, ListArgs};
pub use commands::run;
pub use session::Session;
