pub mod logging;
pub mod netlogo_file;

pub use logging::*;
pub use netlogo_file::*;
