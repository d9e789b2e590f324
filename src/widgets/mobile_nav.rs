//! Mobile navigation menu toggle

/// Whether the mobile navigation menu is open
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MobileNavState {
    pub open: bool,
}

impl MobileNavState {
    /// Toggle button pressed. Returns the `aria-expanded` value for the button.
    pub fn toggle(&mut self) -> &'static str {
        self.open = !self.open;
        self.aria_expanded()
    }

    pub fn aria_expanded(&self) -> &'static str {
        if self.open { "true" } else { "false" }
    }
}
