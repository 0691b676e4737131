mod admin;
mod chat;
mod shared;

pub use admin::AdminView;
pub use chat::ChatView;
