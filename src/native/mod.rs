//! Native (tokio) adapters: the reqwest transport, the tokio redirect timer,
//! the terminal driver of the resolution workflow, and stdin/stdout I/O.
//! Everything here runs on a single-threaded `LocalSet`.

pub mod http;
pub mod resolver;
pub mod terminal;
pub mod timer;

pub use http::HttpClient;
pub use resolver::{AliasResolver, Outcome, PasswordSource, Presenter};
pub use timer::TokioTimer;
