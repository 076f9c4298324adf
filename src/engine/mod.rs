pub use generator::*;
pub use grid::*;
pub use placement::*;
pub use position::*;
pub use reveal::*;
pub use session::*;

mod generator;
mod grid;
mod placement;
mod position;
mod reveal;
mod session;
