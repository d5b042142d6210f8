//! Utilities shared by the workspace crates: bit-packed masks, config file
//! formats, logging setup and test output helpers.

mod bit_buffer2;
mod file_format;
pub mod log_setup;
mod serde_format;
pub mod test_utils;

pub use bit_buffer2::{BITS_PER_WORD, BitBuffer2};
pub use file_format::{FileExtensionError, FileFormat, FileFormatResult, get_file_extension};
pub use serde_format::{SerdeFormatError, SerdeFormatResult, deserialize, read_file, serialize};
