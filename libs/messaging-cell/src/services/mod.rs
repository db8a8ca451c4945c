pub mod classifier;
pub mod registry;
pub mod session;

pub use classifier::{ClassifierRule, ResponseClassifier, RuleKind};
pub use registry::ConversationRegistry;
pub use session::ConversationSession;
