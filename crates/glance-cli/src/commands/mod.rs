pub mod dispatch;
pub mod schema;

mod ask;
mod define;
mod export;
mod history;
mod shared;
mod shell;
mod summarize;
mod upload;
