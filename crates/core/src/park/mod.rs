//! Park state and decisions
//!
//! Pure park bookkeeping: the session [`ParkState`], the toolchange height
//! computation and the park-enable decision. Motion is performed by the
//! firmware crate's park controller.

pub mod context;
pub mod state;

pub use context::{park_enabled, PrintState, SessionContext};
pub use state::ParkState;
