pub mod local;
pub mod remote;

pub use local::{KeywordMatcher, Preset};
pub use remote::{RemoteClient, RemoteError};
