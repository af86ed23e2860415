//! Game session: live board, tree walk and the turn loop

pub mod driver;
pub mod state;

pub use driver::{GameReport, PlayedMove, SessionDriver};
pub use state::{Session, SessionStats};
