//! Exam page widgets
//!
//! Pure logic behind the non-timer parts of the exam page.

pub mod counters;
pub mod departments;
pub mod mobile_nav;
pub mod motion;
pub mod nav;
pub mod sidebar;

pub use counters::{format_value, frame_value, parse_target, CounterTarget};
pub use departments::{DepartmentMap, DepartmentOptions, SelectOption};
pub use mobile_nav::MobileNavState;
pub use motion::{reveal_delay, row_delay, Ripple};
pub use nav::{clean_path, link_is_active};
pub use sidebar::{SidebarState, SIDEBAR_STORAGE_KEY};
