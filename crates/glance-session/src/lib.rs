//! # glance-session
//!
//! Client-side session orchestration for Paperglance.
//!
//! [`SessionMachine`] owns everything the user sees: the staged file or the
//! replayed history record, the current summary, the chat transcript, and
//! the client's copy of the history store. It is synchronous and never
//! performs I/O; every intent returns a ticket and the matching response is
//! applied later, in whatever order responses arrive.
//!
//! [`Session`] drives a machine against a [`Backend`] on tokio and
//! publishes a [`Snapshot`] over a watch channel after each change.

mod backend;
mod error;
mod history;
mod machine;
mod session;
mod snapshot;
mod token;
mod transcript;
mod view;

pub use backend::{Backend, ServiceFailure, SummarizeReply, UploadReceipt};
pub use error::SessionError;
pub use history::{HistorySync, ListTicket};
pub use machine::{
    ChatTicket, DeleteTicket, ExportTicket, ExportedFile, Outcome, SessionMachine,
    SessionSettings, SummarizeTicket, UploadTicket,
};
pub use session::Session;
pub use snapshot::Snapshot;
pub use token::OperationToken;
