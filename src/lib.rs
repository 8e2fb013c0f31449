#[macro_use]
extern crate failure;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

pub mod cli;
pub mod codec;
pub mod combine;
pub mod config;
pub mod diffusion;
pub mod entropy;
pub mod error;
pub mod field;
pub mod linsolve;
pub mod poly;
pub mod recovery;
pub mod secure_buffer;
pub mod share;
pub mod split;
pub mod term;
pub mod zeroizing;

pub use config::{CombineConfig, SplitConfig, Verbosity};
pub use error::{Error, Result};
