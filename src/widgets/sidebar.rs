//! Responsive sidebar state

/// Client storage key for the collapsed preference
pub const SIDEBAR_STORAGE_KEY: &str = "online_exam_sidebar_collapsed";

/// Collapsed on desktop, open as a drawer on mobile
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SidebarState {
    pub collapsed: bool,
    pub open: bool,
}

impl SidebarState {
    /// Restore from the stored preference. Only desktop honours it.
    pub fn restore(stored: Option<&str>, desktop: bool) -> Self {
        Self {
            collapsed: desktop && stored == Some("1"),
            open: false,
        }
    }

    /// Toggle button pressed. Returns the value to persist, desktop only.
    pub fn toggle(&mut self, desktop: bool) -> Option<&'static str> {
        if desktop {
            self.collapsed = !self.collapsed;
            Some(if self.collapsed { "1" } else { "0" })
        } else {
            self.open = !self.open;
            None
        }
    }

    /// Click anywhere on the page; closes the mobile drawer when outside it
    pub fn outside_click(&mut self, desktop: bool, inside_sidebar_or_toggle: bool) {
        if !desktop && self.open && !inside_sidebar_or_toggle {
            self.open = false;
        }
    }

    pub fn resize(&mut self, desktop: bool) {
        if desktop {
            self.open = false;
        }
    }
}
