pub mod chat;
pub mod motion;
pub mod page;
