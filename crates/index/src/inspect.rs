use sectorspace_common::Spatial;
use serde::Serialize;

use crate::sector::SectorId;
use crate::tree::SectorTree;

/// Shape summary of a whole tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TreeStats {
    pub entities: usize,
    pub sectors: usize,
    pub leaves: usize,
    pub max_depth: usize,
    /// Largest direct entity count of any leaf.
    pub max_leaf_load: usize,
}

impl std::fmt::Display for TreeStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Tree: entities={} sectors={} leaves={} max_depth={} max_leaf_load={}",
            self.entities, self.sectors, self.leaves, self.max_depth, self.max_leaf_load
        )
    }
}

/// Read-only description of a single sector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectorInfo {
    pub depth: usize,
    pub leaf: bool,
    pub entities: usize,
    pub children: usize,
    /// `None` for the unbounded root.
    pub origin: Option<Vec<f64>>,
    pub extent: Option<Vec<f64>>,
}

impl std::fmt::Display for SectorInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = if self.leaf { "leaf" } else { "internal" };
        match (&self.origin, &self.extent) {
            (Some(origin), Some(extent)) => write!(
                f,
                "Sector [{kind}] depth={} origin={origin:?} extent={extent:?} entities={} children={}",
                self.depth, self.entities, self.children
            ),
            _ => write!(
                f,
                "Sector [{kind}] root entities={} children={}",
                self.entities, self.children
            ),
        }
    }
}

impl<T: Spatial> SectorTree<T> {
    /// Walk every sector and summarize the tree's shape.
    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats {
            entities: self.len(),
            sectors: self.sectors.len(),
            ..TreeStats::default()
        };
        for sector in self.sectors.values() {
            stats.max_depth = stats.max_depth.max(sector.depth());
            if sector.is_leaf() {
                stats.leaves += 1;
                stats.max_leaf_load = stats.max_leaf_load.max(sector.len());
            }
        }
        stats
    }

    /// Describe one sector, or `None` if `id` is not live.
    pub fn describe(&self, id: SectorId) -> Option<SectorInfo> {
        self.sector(id).map(|sector| SectorInfo {
            depth: sector.depth(),
            leaf: sector.is_leaf(),
            entities: sector.len(),
            children: sector.children().count(),
            origin: sector.origin().map(<[f64]>::to_vec),
            extent: sector.extent().map(<[f64]>::to_vec),
        })
    }
}
