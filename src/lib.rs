mod error;
mod exchange;
mod network;
mod render;
mod scalar;
pub mod simd;
mod split;
mod total_order;
mod vectorized;

pub use error::*;
pub use exchange::*;
pub use network::*;
pub use render::*;
pub use scalar::*;
pub use split::*;
pub use total_order::*;
pub use vectorized::*;
