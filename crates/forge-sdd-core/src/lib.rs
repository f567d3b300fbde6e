pub mod config;
pub mod copy;
pub mod document;
pub mod error;
pub mod io;
pub mod paths;
pub mod rules;
pub mod toolkit;
pub mod transform;
pub mod types;

pub use copy::{copy_directory, copy_file, CopyOptions};
pub use error::{ForgeError, Result};
pub use transform::{add_header, stats, transform, validate, TransformationStats};
