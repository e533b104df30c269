pub mod analysis;
pub mod indicators;
pub mod price;
pub mod recommendation;
pub mod risk;
pub mod signals;

pub use analysis::*;
pub use indicators::*;
pub use price::*;
pub use recommendation::*;
pub use risk::*;
pub use signals::*;
