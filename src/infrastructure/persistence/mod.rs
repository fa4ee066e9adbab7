//! Output persistence

mod local_file_writer;

pub use local_file_writer::{LocalFileWriter, default_file_name};
