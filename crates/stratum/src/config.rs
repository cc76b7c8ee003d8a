//! Configuration types for Stratum conversions.
//!
//! All types implement [`serde::Deserialize`] with every field defaulted, so
//! a configuration file only needs to name the values it changes.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining every section.
//! - [`LayoutConfig`] - Column and row spacing and the depth of each band.
//! - [`ExportConfig`] - Geometry emitted per node.
//! - [`ParserConfig`] - How forgiving the diagram parser is.
//!
//! # Example
//!
//! ```
//! # use stratum::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().column_spacing(), 4.0);
//! assert_eq!(config.export().cube_size(), 1.6);
//! assert!(!config.parser().strict());
//! ```

use serde::Deserialize;

use stratum_parser::ParseOptions;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Export configuration section.
    #[serde(default)]
    export: ExportConfig,

    /// Parser configuration section.
    #[serde(default)]
    parser: ParserConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(layout: LayoutConfig, export: ExportConfig, parser: ParserConfig) -> Self {
        Self {
            layout,
            export,
            parser,
        }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the export configuration.
    pub fn export(&self) -> &ExportConfig {
        &self.export
    }

    /// Returns the parser configuration.
    pub fn parser(&self) -> &ParserConfig {
        &self.parser
    }

    /// Returns a copy with the parser's strict mode overridden.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.parser.strict = strict;
        self
    }

    /// Checks that every numeric setting is usable.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first offending key.
    pub fn validate(&self) -> Result<(), String> {
        let layout = &self.layout;
        let finite = [
            ("layout.column_spacing", layout.column_spacing),
            ("layout.row_spacing", layout.row_spacing),
            ("layout.workload_depth", layout.workload_depth),
            ("layout.service_depth", layout.service_depth),
            ("export.cube_size", self.export.cube_size),
        ];
        if let Some((key, value)) = finite.iter().find(|(_, value)| !value.is_finite()) {
            return Err(format!("`{key}` must be a finite number, got {value}"));
        }
        if self.export.cube_size <= 0.0 {
            return Err(format!(
                "`export.cube_size` must be positive, got {}",
                self.export.cube_size
            ));
        }
        Ok(())
    }
}

/// Spacing of the column grid and depth of each semantic band.
///
/// Defaults keep output compatible with existing viewers: columns 4.0
/// apart, rows 3.0 apart, workloads at +1.2 and services at -1.2.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    column_spacing: f64,
    row_spacing: f64,
    workload_depth: f64,
    service_depth: f64,
}

impl LayoutConfig {
    /// Creates a new [`LayoutConfig`].
    ///
    /// # Arguments
    ///
    /// * `column_spacing` - Distance along X between columns.
    /// * `row_spacing` - Distance along -Y between rows.
    /// * `workload_depth` - Z offset of workload kinds.
    /// * `service_depth` - Z offset of services.
    pub fn new(
        column_spacing: f64,
        row_spacing: f64,
        workload_depth: f64,
        service_depth: f64,
    ) -> Self {
        Self {
            column_spacing,
            row_spacing,
            workload_depth,
            service_depth,
        }
    }

    pub fn column_spacing(&self) -> f64 {
        self.column_spacing
    }

    pub fn row_spacing(&self) -> f64 {
        self.row_spacing
    }

    pub fn workload_depth(&self) -> f64 {
        self.workload_depth
    }

    pub fn service_depth(&self) -> f64 {
        self.service_depth
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::new(4.0, 3.0, 1.2, -1.2)
    }
}

/// Geometry settings for exporters.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// Edge length of the cube emitted per node in the text mesh.
    cube_size: f64,
}

impl ExportConfig {
    pub fn new(cube_size: f64) -> Self {
        Self { cube_size }
    }

    pub fn cube_size(&self) -> f64 {
        self.cube_size
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self::new(1.6)
    }
}

/// Parser settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParserConfig {
    /// Reject lines the grammar does not recognize.
    strict: bool,
}

impl ParserConfig {
    pub fn new(strict: bool) -> Self {
        Self { strict }
    }

    pub fn strict(&self) -> bool {
        self.strict
    }

    /// Parser options equivalent to this section.
    pub fn options(&self) -> ParseOptions {
        ParseOptions::new().with_strict(self.strict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(AppConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_bad_cube() {
        let config = AppConfig::new(
            LayoutConfig::default(),
            ExportConfig::new(0.0),
            ParserConfig::default(),
        );
        let err = config.validate().unwrap_err();
        assert!(err.contains("export.cube_size"), "{err}");
    }

    #[test]
    fn test_validate_rejects_non_finite_spacing() {
        let config = AppConfig::new(
            LayoutConfig::new(f64::NAN, 3.0, 1.2, -1.2),
            ExportConfig::default(),
            ParserConfig::default(),
        );
        let err = config.validate().unwrap_err();
        assert!(err.contains("layout.column_spacing"), "{err}");
    }

    #[test]
    fn test_with_strict_overrides_parser() {
        let config = AppConfig::default().with_strict(true);
        assert!(config.parser().options().is_strict());
    }
}
