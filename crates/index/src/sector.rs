use std::collections::{BTreeMap, BTreeSet};

use sectorspace_common::Dimensions;

use crate::error::IndexError;

slotmap::new_key_type! {
    /// Stable handle to a sector in the tree's node arena.
    pub struct SectorId;

    /// Handle returned by `SectorTree::insert`, valid until the entity is removed.
    pub struct EntityKey;
}

/// Integer cell coordinate of a child sector, one index per axis.
///
/// The child's origin on each axis is `index * child_extent` of its parent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellKey(Box<[i64]>);

impl CellKey {
    /// Cell containing `point` for the given per-axis cell size.
    ///
    /// The result always satisfies `index * e <= p < (index + 1) * e`, even
    /// where the division rounds across a cell boundary. A point whose cell
    /// index does not fit in an `i64` is an invalid coordinate on that axis.
    pub fn containing(
        point: &[f64],
        cell_extent: &[f64],
        dims: &Dimensions,
    ) -> Result<Self, IndexError> {
        point
            .iter()
            .zip(cell_extent)
            .zip(dims.iter())
            .map(|((&p, &e), axis)| {
                cell_index(p, e).ok_or_else(|| {
                    IndexError::coordinate(
                        axis,
                        format!("{p} is too far from the origin for cell size {e}"),
                    )
                })
            })
            .collect::<Result<Box<[i64]>, _>>()
            .map(Self)
    }

    /// Per-axis cell indices in dimension order.
    pub fn indices(&self) -> &[i64] {
        &self.0
    }

    /// Minimum corner of the cell.
    pub fn origin(&self, cell_extent: &[f64]) -> Vec<f64> {
        self.0
            .iter()
            .zip(cell_extent)
            .map(|(i, e)| *i as f64 * e)
            .collect()
    }
}

/// `floor(p / e)`, corrected by one step where rounding lands on the wrong
/// side of a boundary. `None` when the index leaves the `i64` range.
fn cell_index(p: f64, e: f64) -> Option<i64> {
    let q = (p / e).floor();
    let index = if q * e > p {
        q - 1.0
    } else if q + 1.0 > q && (q + 1.0) * e <= p {
        q + 1.0
    } else {
        q
    };
    // -2^63 is exact as f64; 2^63 is one past i64::MAX.
    (index >= i64::MIN as f64 && index < i64::MAX as f64).then_some(index as i64)
}

impl std::fmt::Display for CellKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.0.iter().map(i64::to_string).collect();
        write!(f, "({})", parts.join(","))
    }
}

/// One cell of the tree.
///
/// A sector is a leaf (`children` is `None`) that owns its entities directly,
/// or an internal node whose entity set is the union of its descendant
/// leaves. Every sector on the path from the root to an entity's leaf lists
/// that entity.
#[derive(Debug, Clone)]
pub struct Sector {
    /// `None` for the unbounded root.
    origin: Option<Box<[f64]>>,
    extent: Option<Box<[f64]>>,
    child_extent: Box<[f64]>,
    key: Option<CellKey>,
    parent: Option<SectorId>,
    depth: usize,
    pub(crate) entities: BTreeSet<EntityKey>,
    pub(crate) children: Option<BTreeMap<CellKey, SectorId>>,
}

impl Sector {
    /// The unbounded root. Its children use `child_extent` on every axis.
    pub(crate) fn root(axes: usize, child_extent: f64) -> Result<Self, IndexError> {
        check_size("child extent", &[child_extent])?;
        Ok(Self {
            origin: None,
            extent: None,
            child_extent: vec![child_extent; axes].into_boxed_slice(),
            key: None,
            parent: None,
            depth: 0,
            entities: BTreeSet::new(),
            children: None,
        })
    }

    /// A bounded sector covering `[origin, origin + extent)` per axis.
    ///
    /// `child_extent` defaults to half of `extent`.
    pub(crate) fn bounded(
        origin: Vec<f64>,
        extent: Vec<f64>,
        child_extent: Option<Vec<f64>>,
        parent: SectorId,
        key: CellKey,
        depth: usize,
    ) -> Result<Self, IndexError> {
        if origin.len() != extent.len() {
            return Err(IndexError::config(format!(
                "origin has {} axes but extent has {}",
                origin.len(),
                extent.len()
            )));
        }
        if let Some(bad) = origin.iter().find(|o| !o.is_finite()) {
            return Err(IndexError::config(format!("origin component {bad} is not finite")));
        }
        check_size("extent", &extent)?;
        let child_extent = child_extent.unwrap_or_else(|| extent.iter().map(|e| e / 2.0).collect());
        check_size("child extent", &child_extent)?;

        Ok(Self {
            origin: Some(origin.into_boxed_slice()),
            extent: Some(extent.into_boxed_slice()),
            child_extent: child_extent.into_boxed_slice(),
            key: Some(key),
            parent: Some(parent),
            depth,
            entities: BTreeSet::new(),
            children: None,
        })
    }

    /// Minimum corner; `None` for the root.
    pub fn origin(&self) -> Option<&[f64]> {
        self.origin.as_deref()
    }

    /// Per-axis size; `None` for the root.
    pub fn extent(&self) -> Option<&[f64]> {
        self.extent.as_deref()
    }

    /// Per-axis size of this sector's children.
    pub fn child_extent(&self) -> &[f64] {
        &self.child_extent
    }

    /// Cell key under the parent; `None` for the root.
    pub fn key(&self) -> Option<&CellKey> {
        self.key.as_ref()
    }

    pub fn parent(&self) -> Option<SectorId> {
        self.parent
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// True while the sector owns its entities directly.
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Number of entities at or below this sector.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn entities(&self) -> impl Iterator<Item = EntityKey> + '_ {
        self.entities.iter().copied()
    }

    pub fn contains(&self, key: EntityKey) -> bool {
        self.entities.contains(&key)
    }

    /// Child sectors with their cell keys. Empty on a leaf.
    pub fn children(&self) -> impl Iterator<Item = (&CellKey, SectorId)> + '_ {
        self.children.iter().flatten().map(|(k, id)| (k, *id))
    }

    pub fn child(&self, key: &CellKey) -> Option<SectorId> {
        self.children.as_ref()?.get(key).copied()
    }

    /// Lower bound of the region on `axis`; `-inf` for the root.
    pub fn min(&self, axis: usize) -> f64 {
        match &self.origin {
            Some(origin) => origin[axis],
            None => f64::NEG_INFINITY,
        }
    }

    /// Upper bound of the region on `axis`; `+inf` for the root.
    pub fn max(&self, axis: usize) -> f64 {
        match (&self.origin, &self.extent) {
            (Some(origin), Some(extent)) => origin[axis] + extent[axis],
            _ => f64::INFINITY,
        }
    }

    /// True unless some axis separates the region from the closed box.
    pub fn overlaps(&self, min: &[f64], max: &[f64]) -> bool {
        (0..min.len()).all(|a| !(self.max(a) < min[a] || self.min(a) > max[a]))
    }

    /// True when the whole region lies inside the closed box.
    pub fn within(&self, min: &[f64], max: &[f64]) -> bool {
        (0..min.len()).all(|a| self.min(a) >= min[a] && self.max(a) <= max[a])
    }

    /// Cell that `point` falls into when this sector partitions.
    pub fn cell_of(&self, point: &[f64], dims: &Dimensions) -> Result<CellKey, IndexError> {
        CellKey::containing(point, &self.child_extent, dims)
    }
}

fn check_size(what: &str, sizes: &[f64]) -> Result<(), IndexError> {
    match sizes.iter().find(|s| !s.is_finite() || **s <= 0.0) {
        Some(bad) => Err(IndexError::config(format!(
            "{what} must be a finite positive number, got {bad}"
        ))),
        None => Ok(()),
    }
}
