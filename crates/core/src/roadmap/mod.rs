mod navigator;
mod saved;

pub use navigator::{NavigationError, PathNavigator};
pub use saved::SavedPath;
