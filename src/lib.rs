#[macro_use]
extern crate log;
extern crate rand;

pub mod create;
mod error;
pub mod fill;
pub mod host;
mod size;

pub use create::{create, create_with_progress, CreateRequest, Outcome};
pub use error::*;
pub use fill::{write_block, write_sized, write_sized_with_progress, FillMode, BLOCK_SIZE};
pub use host::{FsHost, Host, PromptHost};
pub use size::{parse_size, size_to_string};

#[cfg(test)]
extern crate better_panic;

#[cfg(test)]
pub(crate) fn tests_init() {
    better_panic::install();
}
