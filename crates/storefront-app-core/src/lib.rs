// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared application services for storefront scripts (config, cookies,
//! timers, toasts). Keeps browser adapters thin and framework-agnostic.

pub mod config;
pub mod cookie;
pub mod notice_port;
pub mod timer;
pub mod toast;
