pub mod error;
pub mod progress;
pub mod types;
pub mod view;

pub use error::{ErrorKind, ScenarioError, ValidationKind};
pub use progress::*;
pub use types::*;
pub use view::*;
