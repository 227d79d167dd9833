pub mod filename;
pub mod parameter_error_handler;

pub use filename::{extension_of, sanitize_filename, storage_key};
pub use parameter_error_handler::json_error_handler;
