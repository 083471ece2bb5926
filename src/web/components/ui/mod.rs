mod alert;
mod button;
mod spinner;

pub(crate) use alert::Alert;
pub(crate) use button::{Button, ButtonVariant};
pub(crate) use spinner::Spinner;
