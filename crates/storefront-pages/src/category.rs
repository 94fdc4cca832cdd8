// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Collapsible category lists.
//!
//! Each list has a collapse and an extend button side by side; exactly one of
//! them is visible at a time.

/// CSS `display` values used by the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Display {
    /// `flex`
    Flex,
    /// `none`
    Hidden,
}

impl Display {
    /// Value for `style.display`.
    pub const fn as_css(self) -> &'static str {
        match self {
            Self::Flex => "flex",
            Self::Hidden => "none",
        }
    }
}

/// Panel state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryState {
    /// List visible.
    #[default]
    Expanded,
    /// List hidden.
    Collapsed,
}

/// Display of the list and its two buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelDisplay {
    /// The category list.
    pub list: Display,
    /// Button toggles; `None` when the sibling button is missing, in which
    /// case neither button changes.
    pub buttons: Option<ButtonDisplay>,
}

/// Display of the collapse/extend pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonDisplay {
    /// Collapse button.
    pub collapse: Display,
    /// Extend button.
    pub extend: Display,
}

/// One collapsible list.
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryPanel {
    state: CategoryState,
}

impl CategoryPanel {
    /// Current state.
    pub const fn state(&self) -> CategoryState {
        self.state
    }

    /// Move to `target` and project it.
    ///
    /// `target_present` is whether the list element exists; without it
    /// nothing changes. `sibling_present` is whether the other button exists.
    pub fn set(
        &mut self,
        target: CategoryState,
        target_present: bool,
        sibling_present: bool,
    ) -> Option<PanelDisplay> {
        if !target_present {
            return None;
        }
        self.state = target;
        let (list, collapse, extend) = match target {
            CategoryState::Expanded => (Display::Flex, Display::Flex, Display::Hidden),
            CategoryState::Collapsed => (Display::Hidden, Display::Hidden, Display::Flex),
        };
        Some(PanelDisplay {
            list,
            buttons: sibling_present.then_some(ButtonDisplay { collapse, extend }),
        })
    }

    /// Flip between expanded and collapsed.
    pub fn toggle(&mut self, target_present: bool, sibling_present: bool) -> Option<PanelDisplay> {
        let next = match self.state {
            CategoryState::Expanded => CategoryState::Collapsed,
            CategoryState::Collapsed => CategoryState::Expanded,
        };
        self.set(next, target_present, sibling_present)
    }
}
