mod alternate;
mod assistant;
mod flow;
mod gemini;
mod model;
mod plan;

pub use alternate::*;
pub use assistant::*;
pub use flow::*;
pub use gemini::*;
pub use model::*;
pub use plan::*;
