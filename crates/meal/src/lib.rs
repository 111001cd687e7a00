mod food;
mod history;
mod meals;
mod nutrition;
mod state;
mod summary;
mod watch;

pub use food::*;
pub use history::*;
pub use meals::*;
pub use nutrition::*;
pub use state::*;
pub use summary::*;
pub use watch::*;
