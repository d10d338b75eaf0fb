pub mod description_file;

pub use description_file::*;
