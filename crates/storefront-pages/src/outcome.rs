// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! What the page does after a server reply.

use storefront_app_core::toast::ToastKind;

/// A toast to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity.
    pub kind: ToastKind,
    /// Message text.
    pub text: String,
    /// Link followed when the toast is clicked.
    pub destination: Option<String>,
}

impl Notice {
    /// Success toast.
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            text: text.into(),
            destination: None,
        }
    }

    /// Error toast.
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            text: text.into(),
            destination: None,
        }
    }

    /// Same toast, clickable through to `href`.
    #[must_use]
    pub fn linking_to(mut self, href: &str) -> Self {
        self.destination = Some(href.to_string());
        self
    }
}

/// Page-level step taken after the notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Followup {
    /// Nothing further.
    Stay,
    /// Go to `href` once `delay_ms` has elapsed.
    Navigate {
        /// Target location.
        href: String,
        /// Delay before leaving; zero means right away.
        delay_ms: u32,
    },
    /// Reload the current page.
    Reload,
    /// Remove the `<section>` enclosing the element that triggered the call.
    RemoveSection,
    /// Re-read the cart badge cookies.
    RefreshCartCount,
}

/// Notice plus follow-up for one server reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Toast to show, if any.
    pub notice: Option<Notice>,
    /// What to do next.
    pub followup: Followup,
}

impl Outcome {
    /// Only a toast.
    pub fn notice(notice: Notice) -> Self {
        Self {
            notice: Some(notice),
            followup: Followup::Stay,
        }
    }

    /// Attach a follow-up step.
    #[must_use]
    pub fn then(mut self, followup: Followup) -> Self {
        self.followup = followup;
        self
    }
}
