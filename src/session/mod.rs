//! Session layer: application state, the active collaboration, and the
//! controller that drives gateway calls

mod collab;
mod controller;
mod state;

pub use collab::StudySession;
pub use controller::{PreviewPoller, SessionController, join_candidates};
pub use state::{AppState, SearchTicket, View};
