// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Port trait for handing toasts to whatever notification widget the page
//! ships, without depending on it.

use crate::toast::ToastRender;

/// Minimal notice port; implementations are expected to be best-effort.
pub trait NoticePort {
    /// Display a toast.
    fn show(&self, toast: &ToastRender);
}
