//! Overpass QL query builder

use std::fmt::Write;

use domain::value_objects::{Coordinate, TagGroup};

use crate::error::OverpassError;

/// An "around" query: every element within `radius_m` of `center` that
/// matches at least one tag group
#[derive(Debug, Clone)]
pub struct OverpassQuery {
    center: Coordinate,
    radius_m: u32,
    groups: Vec<TagGroup>,
    include_ways: bool,
}

impl OverpassQuery {
    /// Start a query around a point
    #[must_use]
    pub const fn around(center: Coordinate, radius_m: u32) -> Self {
        Self {
            center,
            radius_m,
            groups: Vec::new(),
            include_ways: false,
        }
    }

    /// Add tag groups to the union
    #[must_use]
    pub fn with_groups(mut self, groups: &[TagGroup]) -> Self {
        self.groups.extend_from_slice(groups);
        self
    }

    /// Also match ways (areas such as parks), located by their centre
    #[must_use]
    pub const fn with_ways(mut self, include_ways: bool) -> Self {
        self.include_ways = include_ways;
        self
    }

    #[must_use]
    pub const fn center(&self) -> Coordinate {
        self.center
    }

    #[must_use]
    pub const fn radius_m(&self) -> u32 {
        self.radius_m
    }

    /// Render the query as Overpass QL
    ///
    /// # Errors
    ///
    /// Returns `InvalidQuery` if no tag group was added or a group is empty,
    /// since either would match every element in the area.
    pub fn to_ql(&self, server_timeout_secs: u32) -> Result<String, OverpassError> {
        if self.groups.is_empty() {
            return Err(OverpassError::InvalidQuery("no tag groups".to_string()));
        }

        let around = format!(
            "(around:{},{},{})",
            self.radius_m,
            self.center.lat(),
            self.center.lng()
        );
        let element_types: &[&str] = if self.include_ways {
            &["node", "way"]
        } else {
            &["node"]
        };

        let mut ql = format!("[out:json][timeout:{server_timeout_secs}];\n(\n");
        for group in &self.groups {
            if group.is_empty() {
                return Err(OverpassError::InvalidQuery("empty tag group".to_string()));
            }
            let filters: String = group
                .iter()
                .map(|f| format!("[\"{}\"=\"{}\"]", escape(f.key), escape(f.value)))
                .collect();
            for element in element_types {
                let _ = writeln!(ql, "  {element}{filters}{around};");
            }
        }
        ql.push_str(");\n");
        ql.push_str(if self.include_ways {
            "out center body;"
        } else {
            "out body;"
        });

        Ok(ql)
    }
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
