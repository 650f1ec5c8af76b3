//! Handlers 模块

pub mod admins;
pub mod auth;
pub mod bindings;
pub mod devices;
pub mod publicnet;
pub mod recorders;
pub mod remote;
pub mod sites;

pub use admins::*;
pub use auth::*;
pub use bindings::*;
pub use devices::*;
pub use publicnet::*;
pub use recorders::*;
pub use remote::*;
pub use sites::*;
