pub mod outline;
pub mod segment;
pub mod system;
