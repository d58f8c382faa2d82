//! Paging configuration shared by both strategies.

use serde::Deserialize;

use crate::error::OptionsError;

/// Default page size when neither `first` nor `last` is given.
pub const DEFAULT_EDGES_PER_PAGE: u32 = 20;
/// Default upper bound for `first` / `last`.
pub const MAX_EDGES_PER_PAGE: u32 = 100;

/// Per-connection paging configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PagingOptions {
    /// Page size used when the client sends neither `first` nor `last`.
    pub default_edges_per_page: u32,
    /// Largest accepted `first` / `last`.
    pub max_edges_per_page: u32,
    /// Whether `last` is accepted (cursor strategy only).
    pub allow_reverse_order: bool,
}

impl Default for PagingOptions {
    fn default() -> Self {
        Self {
            default_edges_per_page: DEFAULT_EDGES_PER_PAGE,
            max_edges_per_page: MAX_EDGES_PER_PAGE,
            allow_reverse_order: true,
        }
    }
}

impl PagingOptions {
    pub fn with_default_edges_per_page(mut self, edges: u32) -> Self {
        self.default_edges_per_page = edges;
        self
    }

    pub fn with_max_edges_per_page(mut self, edges: u32) -> Self {
        self.max_edges_per_page = edges;
        self
    }

    pub fn with_reverse_order(mut self, allow: bool) -> Self {
        self.allow_reverse_order = allow;
        self
    }

    /// Check that the default page size lies within `[1, max_edges_per_page]`.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.max_edges_per_page == 0 {
            return Err(OptionsError::ZeroMaxEdges);
        }
        if self.default_edges_per_page == 0 || self.default_edges_per_page > self.max_edges_per_page
        {
            return Err(OptionsError::DefaultOutOfRange {
                default: self.default_edges_per_page,
                max: self.max_edges_per_page,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_surface() {
        let options = PagingOptions::default();
        assert_eq!(options.default_edges_per_page, 20);
        assert_eq!(options.max_edges_per_page, 100);
        assert!(options.allow_reverse_order);
        assert!(options.validate().is_ok());
    }

    // Test critique: un défaut hors bornes est refusé, jamais clampé
    #[test]
    fn test_validate_rejects_default_above_max() {
        let options = PagingOptions::default()
            .with_max_edges_per_page(10)
            .with_default_edges_per_page(20);
        assert_eq!(
            options.validate(),
            Err(OptionsError::DefaultOutOfRange {
                default: 20,
                max: 10
            })
        );
        assert_eq!(
            PagingOptions::default().with_max_edges_per_page(0).validate(),
            Err(OptionsError::ZeroMaxEdges)
        );
    }

    #[test]
    fn test_deserialize_fills_missing_fields() {
        let options: PagingOptions =
            serde_json::from_str(r#"{"maxEdgesPerPage": 50, "allowReverseOrder": false}"#)
                .unwrap();
        assert_eq!(options.default_edges_per_page, 20);
        assert_eq!(options.max_edges_per_page, 50);
        assert!(!options.allow_reverse_order);
    }
}
