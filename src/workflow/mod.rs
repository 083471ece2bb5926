//! Alias resolution workflow: the sans-IO state machine, the cancellable
//! redirect scheduler, and the copy both front ends render.

pub mod copy;
mod machine;
mod redirect;

pub use machine::{Command, Phase, Screen, Ticket, Workflow};
pub use redirect::{Navigator, RedirectScheduler, Timer};
