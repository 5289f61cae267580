use sectorspace_common::{Dimensions, Spatial};
use serde::{Deserialize, Serialize};

use crate::error::IndexError;

/// Child cell size used by the unbounded root when none is configured.
pub const DEFAULT_CHILD_EXTENT: f64 = 200.0;
/// Coordinates closer than this on every axis count as the same point.
pub const DEFAULT_COORDINATE_RESOLUTION: f64 = 1.0;

fn default_child_extent() -> f64 {
    DEFAULT_CHILD_EXTENT
}

fn default_coordinate_resolution() -> f64 {
    DEFAULT_COORDINATE_RESOLUTION
}

/// Construction options for a sector tree.
///
/// Loaded from JSON or YAML by the CLI; every optional field has a serde
/// default so a minimal file only names `dimensions` and `capacity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorConfig {
    /// Ordered axis names shared by every sector.
    pub dimensions: Dimensions,
    /// Maximum direct entity count before a sector partitions.
    pub capacity: usize,
    /// Cell size of the root's children. Deeper levels halve it.
    #[serde(default = "default_child_extent")]
    pub child_extent: f64,
    #[serde(default = "default_coordinate_resolution")]
    pub coordinate_resolution: f64,
    /// Name of the sub-record holding the coordinate. When absent the
    /// entity itself is read as the coordinate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinate_field: Option<String>,
}

impl SectorConfig {
    /// Options with the default child extent and resolution.
    pub fn new(dimensions: Dimensions, capacity: usize) -> Self {
        Self {
            dimensions,
            capacity,
            child_extent: DEFAULT_CHILD_EXTENT,
            coordinate_resolution: DEFAULT_COORDINATE_RESOLUTION,
            coordinate_field: None,
        }
    }

    pub fn with_child_extent(mut self, child_extent: f64) -> Self {
        self.child_extent = child_extent;
        self
    }

    pub fn with_coordinate_resolution(mut self, resolution: f64) -> Self {
        self.coordinate_resolution = resolution;
        self
    }

    pub fn with_coordinate_field(mut self, field: impl Into<String>) -> Self {
        self.coordinate_field = Some(field.into());
        self
    }

    /// Check every option. Dimensions are already validated by their type.
    pub fn validate(&self) -> Result<(), IndexError> {
        if self.capacity == 0 {
            return Err(IndexError::config("capacity must be at least 1"));
        }
        if !self.child_extent.is_finite() || self.child_extent <= 0.0 {
            return Err(IndexError::config(format!(
                "child extent must be a finite positive number, got {}",
                self.child_extent
            )));
        }
        if !self.coordinate_resolution.is_finite() || self.coordinate_resolution <= 0.0 {
            return Err(IndexError::config(format!(
                "coordinate resolution must be a finite positive number, got {}",
                self.coordinate_resolution
            )));
        }
        if let Some(field) = &self.coordinate_field {
            if field.trim().is_empty() {
                return Err(IndexError::config("coordinate field name is blank"));
            }
        }
        Ok(())
    }

    /// How entity coordinates are read under these options.
    pub fn accessor(&self) -> CoordinateAccessor {
        match &self.coordinate_field {
            Some(field) => CoordinateAccessor::Field(field.clone()),
            None => CoordinateAccessor::Direct,
        }
    }
}

/// How an entity's position is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoordinateAccessor {
    /// The entity is itself the coordinate record.
    Direct,
    /// The coordinate lives in the named sub-record.
    Field(String),
}

impl CoordinateAccessor {
    /// Read one finite value per dimension, in dimension order.
    pub fn read<T: Spatial>(&self, entity: &T, dims: &Dimensions) -> Result<Vec<f64>, IndexError> {
        let record: &dyn Spatial = match self {
            Self::Direct => entity,
            Self::Field(name) => entity
                .field(name)
                .ok_or_else(|| IndexError::coordinate(name.as_str(), "coordinate field is missing"))?,
        };
        dims.iter()
            .map(|axis| {
                let value = record
                    .axis(axis)
                    .ok_or_else(|| IndexError::coordinate(axis, "missing or non-numeric value"))?;
                if value.is_finite() {
                    Ok(value)
                } else {
                    Err(IndexError::coordinate(axis, format!("{value} is not finite")))
                }
            })
            .collect()
    }
}
