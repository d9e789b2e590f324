//! Cascading faculty/department select

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub const SELECT_FACULTY_FIRST: &str = "Select Faculty First";
pub const SELECT_DEPARTMENT: &str = "Select Department";

/// One `<option>` of the department select
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    fn placeholder(label: &str) -> Self {
        Self {
            value: String::new(),
            label: label.to_string(),
        }
    }

    fn department(name: &str) -> Self {
        Self {
            value: name.to_string(),
            label: name.to_string(),
        }
    }
}

/// Rebuilt department select
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentOptions {
    pub options: Vec<SelectOption>,
    pub selected: String,
}

/// Faculty to department names, as attached to the faculty select
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DepartmentMap(HashMap<String, Vec<String>>);

impl DepartmentMap {
    /// Parse the JSON attribute. Malformed data yields an empty map.
    pub fn parse(raw: Option<&str>) -> Self {
        match serde_json::from_str(raw.unwrap_or("{}")) {
            Ok(map) => map,
            Err(e) => {
                debug!("Ignoring malformed department map: {}", e);
                Self::default()
            }
        }
    }

    pub fn departments(&self, faculty: &str) -> Option<&[String]> {
        self.0.get(faculty).map(Vec::as_slice)
    }

    /// Options for the department select after the faculty changed.
    ///
    /// `None` means the faculty is unknown and the select is left untouched.
    pub fn rebuild(&self, faculty: &str, current_selection: &str) -> Option<DepartmentOptions> {
        if faculty.is_empty() {
            return Some(DepartmentOptions {
                options: vec![SelectOption::placeholder(SELECT_FACULTY_FIRST)],
                selected: String::new(),
            });
        }

        let departments = self.departments(faculty)?;
        let mut options = Vec::with_capacity(departments.len() + 1);
        options.push(SelectOption::placeholder(SELECT_DEPARTMENT));
        options.extend(departments.iter().map(|name| SelectOption::department(name)));

        let keep = !current_selection.is_empty()
            && departments.iter().any(|name| name == current_selection);
        Some(DepartmentOptions {
            options,
            selected: if keep { current_selection.to_string() } else { String::new() },
        })
    }
}
