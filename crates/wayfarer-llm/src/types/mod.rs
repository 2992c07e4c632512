pub mod message;
pub mod tool;
pub mod usage;

pub use message::Message;
pub use tool::Tool;
pub use usage::TokenUsage;
