pub mod emitter;
pub mod script;
pub mod writer;

pub use emitter::*;
pub use script::*;
pub use writer::*;
