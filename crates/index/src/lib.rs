//! Sector tree: an adaptive, multi-dimensional spatial index for movable
//! point entities.
//!
//! The tree starts as a single unbounded root sector. A sector that would
//! hold more than `capacity` entities splits its region into a grid of child
//! cells, each half the size of the level above. Removing entities collapses
//! subtrees again. Entities may move after insertion; [`SectorTree::update`]
//! re-indexes the ones that left their cell.
//!
//! # Invariants
//! - Every sector on the path from the root to an entity's leaf lists it.
//! - Coincident entities (within `coordinate_resolution` on every axis) never
//!   force unbounded subdivision.
//! - Single writer: every mutation takes `&mut self`.
//!
//! ```
//! use glam::DVec2;
//! use sectorspace_common::Dimensions;
//! use sectorspace_index::{SectorConfig, SectorTree};
//!
//! let config = SectorConfig::new(Dimensions::xy(), 4).with_child_extent(100.0);
//! let mut tree = SectorTree::new(config).unwrap();
//! let a = tree.insert(DVec2::new(10.0, 10.0)).unwrap();
//! tree.insert(DVec2::new(500.0, 10.0)).unwrap();
//!
//! assert_eq!(tree.query(&[0.0, 0.0], &[50.0, 50.0]).unwrap(), vec![a]);
//!
//! tree.get_mut(a).unwrap().x = 480.0;
//! tree.update().unwrap();
//! assert_eq!(tree.neighbors_within_distance(&[490.0, 10.0], 15.0).unwrap().len(), 2);
//! ```

mod config;
mod error;
mod inspect;
mod query;
mod sector;
mod timer;
mod tree;

pub use config::{
    CoordinateAccessor, DEFAULT_CHILD_EXTENT, DEFAULT_COORDINATE_RESOLUTION, SectorConfig,
};
pub use error::IndexError;
pub use inspect::{SectorInfo, TreeStats};
pub use sector::{CellKey, EntityKey, Sector, SectorId};
pub use timer::{UpdatePass, UpdateTimer};
pub use tree::SectorTree;

pub fn crate_info() -> &'static str {
    concat!("sectorspace-index v", env!("CARGO_PKG_VERSION"))
}
