pub mod formation;
pub mod palette;
pub mod sampler;
pub mod shower;
