pub mod events;
pub mod navigation;
pub mod scoring;
mod session;
pub mod view;

pub use events::{EngineEvent, Operation};
pub use navigation::{reset_activity, select_choice, state_of, undo, NavigationState};
pub use scoring::Grade;
pub use session::{LearnerSession, Resumed};
pub use view::current_view;
