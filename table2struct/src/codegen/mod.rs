//! Code generation module

mod code_generator;
pub mod dialect;
mod emitter;
mod mapper;
pub mod naming;
mod record;
mod type_resolver;

pub use code_generator::*;
pub use dialect::{Dialect, DialectKind};
pub use emitter::*;
pub use mapper::*;
pub use record::*;
pub use type_resolver::*;
