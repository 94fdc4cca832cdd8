// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Storefront page behaviors, free of any DOM.
//!
//! Each module turns page input (markup attributes, form fields, cookies) into
//! [`api::ApiRequest`]s, and server replies into [`Outcome`]s the host renders
//! as toasts and navigations. Pricing, stock and order logic stay on the
//! server.

pub mod address;
pub mod api;
pub mod cart;
pub mod category;
pub mod newsletter;
pub mod order;
mod outcome;
pub mod page;
pub mod pagination;
pub mod reply;
pub mod search;
pub mod variant;

pub use outcome::{Followup, Notice, Outcome};
pub use page::{PageData, Product};
