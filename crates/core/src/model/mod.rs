mod catalog;
mod ids;
mod path;
mod question;
mod score;
mod tree;

pub use catalog::{CatalogError, SubjectCatalog};
pub use ids::NodeId;
pub use path::{PathCategory, PathNode};
pub use question::{Choice, Question, QuestionError};
pub use score::{ResultSet, SubjectScore};
pub use tree::{PathTree, TreeError};
