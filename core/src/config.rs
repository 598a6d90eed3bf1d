//! Dashboard configuration: title, recognized categories with their
//! colors, the fallback palette for everything else, and quarter order.
//!
//! Loaded once from JSON at startup. Missing fields take their defaults.

use serde::{Deserialize, Serialize};

pub const DEFAULT_TITLE: &str = "Won ACV mix by Cust Type";

/// Display attributes for one recognized customer type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryStyle {
    pub label: String,
    pub color: String,
}

/// How quarter labels are ordered on every axis and in the table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuarterOrder {
    /// Plain byte-order sort of the label.
    #[default]
    Lexicographic,
    /// Parse labels like "Q1-24", "Q3-2025" or "FY24-Q2" into (year, quarter).
    Chronological,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub title: String,
    /// Recognized categories, in display order.
    pub categories: Vec<CategoryStyle>,
    /// Colors handed out to categories not listed above, cycled.
    pub fallback_palette: Vec<String>,
    pub quarter_order: QuarterOrder,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.into(),
            categories: vec![
                CategoryStyle {
                    label: "Existing Customer".into(),
                    color: "#1f77b4".into(),
                },
                CategoryStyle {
                    label: "New Customer".into(),
                    color: "#ff7f0e".into(),
                },
            ],
            fallback_palette: vec![
                "#2ca02c".into(),
                "#d62728".into(),
                "#9467bd".into(),
                "#8c564b".into(),
                "#e377c2".into(),
                "#7f7f7f".into(),
                "#bcbd22".into(),
                "#17becf".into(),
            ],
            quarter_order: QuarterOrder::Lexicographic,
        }
    }
}

impl DashboardConfig {
    /// Load from a JSON file. Missing fields take their defaults.
    /// In tests, use `DashboardConfig::default()`.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: DashboardConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let mut seen = std::collections::HashSet::new();
        for c in &self.categories {
            if !seen.insert(c.label.as_str()) {
                anyhow::bail!("Category '{}' is listed more than once", c.label);
            }
        }
        if self.fallback_palette.is_empty() {
            anyhow::bail!("fallback_palette must contain at least one color");
        }
        Ok(())
    }

    pub fn is_recognized(&self, label: &str) -> bool {
        self.categories.iter().any(|c| c.label == label)
    }

    /// Color for `label`, given the full ordered type list of the dataset.
    ///
    /// Recognized categories use their configured color. The n-th
    /// unrecognized category in `ordered_types` gets palette entry n,
    /// wrapping around.
    pub fn color_for(&self, label: &str, ordered_types: &[String]) -> String {
        if let Some(c) = self.categories.iter().find(|c| c.label == label) {
            return c.color.clone();
        }
        let position = ordered_types
            .iter()
            .filter(|t| !self.is_recognized(t))
            .position(|t| t == label)
            .unwrap_or(0);
        match self.fallback_palette.len() {
            0 => "#999999".into(),
            n => self.fallback_palette[position % n].clone(),
        }
    }
}
