pub mod message;
pub mod resolver;
pub mod router;

pub use message::{ChatMessage, Sender, Transcript};
pub use resolver::{Resolution, Resolver, ResolverConfig, ResolverMode};
pub use router::{ChatView, InputRouter, Submission, ViewEvent};
