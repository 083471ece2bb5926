//! User-facing copy for the alias landing page. The terminal presenter and the
//! Leptos page render the same strings.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Alert banner content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

/// Static page section: heading, lead sentence, and a follow-up hint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Panel {
    pub heading: &'static str,
    pub lead: &'static str,
    pub hint: &'static str,
}

pub const LINK_NOT_FOUND: Panel = Panel {
    heading: "LINK NOT FOUND",
    lead: "The requested link does not exist.",
    hint: "Try to create a new link.",
};

pub const PASSWORD_PROTECTED: Panel = Panel {
    heading: "PASSWORD PROTECTED LINK",
    lead: "This link is password protected.",
    hint: "Enter the link password below to continue.",
};

pub const CREATE_LINK_LABEL: &str = "create a new link";

#[must_use]
pub fn redirect_notice(destination: &str) -> Notice {
    Notice {
        kind: NoticeKind::Success,
        title: "Success!".to_string(),
        message: format!("Redirecting you to {destination}..."),
    }
}

#[must_use]
pub fn rejected_password_notice() -> Notice {
    Notice {
        kind: NoticeKind::Error,
        title: "The submitted password was not correct.".to_string(),
        message: "Please try again.".to_string(),
    }
}
