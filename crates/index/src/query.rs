use sectorspace_common::Spatial;

use crate::error::IndexError;
use crate::sector::{EntityKey, SectorId};
use crate::tree::SectorTree;

impl<T: Spatial> SectorTree<T> {
    /// Entities whose coordinate lies in the closed box `[min, max]`.
    ///
    /// Sectors fully inside the box contribute their whole listing; every
    /// candidate is then checked against its current coordinate, so entities
    /// that moved since the last [`update`](Self::update) are not reported
    /// outside the box. They can still be missed inside it until then.
    pub fn query(&self, min: &[f64], max: &[f64]) -> Result<Vec<EntityKey>, IndexError> {
        self.check_bounds(min, max)?;
        let mut found = Vec::new();
        self.collect(self.root, min, max, true, &mut found);
        found.retain(|key| match self.point_of(*key) {
            Ok(p) => contains(min, max, &p),
            Err(_) => false,
        });
        Ok(found)
    }

    /// Entities within Euclidean distance `radius` of `center`.
    pub fn neighbors_within_distance(
        &self,
        center: &[f64],
        radius: f64,
    ) -> Result<Vec<EntityKey>, IndexError> {
        self.check_point("center", center)?;
        if radius.is_nan() {
            return Err(IndexError::coordinate("radius", "radius is NaN"));
        }
        if radius < 0.0 {
            return Ok(Vec::new());
        }

        let min: Vec<f64> = center.iter().map(|c| c - radius).collect();
        let max: Vec<f64> = center.iter().map(|c| c + radius).collect();
        let mut candidates = Vec::new();
        self.collect(self.root, &min, &max, false, &mut candidates);

        let r2 = radius * radius;
        candidates.retain(|key| match self.point_of(*key) {
            Ok(p) => distance_squared(center, &p) <= r2,
            Err(_) => false,
        });
        Ok(candidates)
    }

    /// Leaf sectors whose region overlaps the closed box.
    pub fn leaf_sectors_overlapping(
        &self,
        min: &[f64],
        max: &[f64],
    ) -> Result<Vec<SectorId>, IndexError> {
        self.check_bounds(min, max)?;
        let mut leaves = Vec::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let sector = &self.sectors[id];
            if !sector.overlaps(min, max) {
                continue;
            }
            if sector.is_leaf() {
                leaves.push(id);
            } else {
                stack.extend(sector.children().map(|(_, child)| child));
            }
        }
        Ok(leaves)
    }

    /// Leaf sectors whose region does not touch the closed box.
    pub fn leaf_sectors_outside(
        &self,
        min: &[f64],
        max: &[f64],
    ) -> Result<Vec<SectorId>, IndexError> {
        self.check_bounds(min, max)?;
        let mut leaves = Vec::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let sector = &self.sectors[id];
            if !sector.overlaps(min, max) {
                leaves.extend(self.leaves(id));
            } else if !sector.is_leaf() {
                stack.extend(sector.children().map(|(_, child)| child));
            }
        }
        Ok(leaves)
    }

    fn collect(&self, id: SectorId, min: &[f64], max: &[f64], whole: bool, out: &mut Vec<EntityKey>) {
        let sector = &self.sectors[id];
        if sector.is_leaf() || (whole && sector.within(min, max)) {
            out.extend(sector.entities());
            return;
        }
        for (_, child) in sector.children() {
            if self.sectors[child].overlaps(min, max) {
                self.collect(child, min, max, whole, out);
            }
        }
    }

    fn check_bounds(&self, min: &[f64], max: &[f64]) -> Result<(), IndexError> {
        self.check_point("min", min)?;
        self.check_point("max", max)
    }

    /// Arity and NaN check for query arguments. Infinities are allowed.
    fn check_point(&self, what: &str, point: &[f64]) -> Result<(), IndexError> {
        let dims = self.dimensions();
        if point.len() != dims.len() {
            return Err(IndexError::coordinate(
                what,
                format!("expected {} components, got {}", dims.len(), point.len()),
            ));
        }
        match dims.iter().zip(point).find(|(_, v)| v.is_nan()) {
            Some((axis, _)) => Err(IndexError::coordinate(axis, format!("{what} is NaN"))),
            None => Ok(()),
        }
    }
}

fn contains(min: &[f64], max: &[f64], point: &[f64]) -> bool {
    point
        .iter()
        .zip(min.iter().zip(max))
        .all(|(p, (lo, hi))| lo <= p && p <= hi)
}

fn distance_squared(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}
