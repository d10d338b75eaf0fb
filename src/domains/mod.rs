pub mod logger;
pub mod netlogo;
pub mod network;

pub use logger::*;
pub use netlogo::*;
pub use network::*;
