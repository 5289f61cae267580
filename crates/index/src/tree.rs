use sectorspace_common::{Dimensions, Spatial};
use slotmap::SlotMap;

use crate::config::{CoordinateAccessor, SectorConfig};
use crate::error::IndexError;
use crate::sector::{EntityKey, Sector, SectorId};

/// Side-table entry: the stored entity and the leaf that owns it.
#[derive(Debug, Clone)]
struct Entry<T> {
    entity: T,
    leaf: Option<SectorId>,
}

/// Adaptive sector tree over entities of type `T`.
///
/// The tree owns its entities and hands out [`EntityKey`] handles. Callers
/// move entities through [`get_mut`](Self::get_mut) and call
/// [`update`](Self::update) periodically so drifted entities are re-indexed.
///
/// # Invariants
/// - An entity listed by a sector is listed by every ancestor of that sector
///   and by no other sector.
/// - An internal sector always lists more than `capacity` entities; dropping
///   to exactly `capacity` collapses it back into a leaf.
#[derive(Debug, Clone)]
pub struct SectorTree<T> {
    config: SectorConfig,
    accessor: CoordinateAccessor,
    pub(crate) sectors: SlotMap<SectorId, Sector>,
    entries: SlotMap<EntityKey, Entry<T>>,
    pub(crate) root: SectorId,
}

impl<T: Spatial> SectorTree<T> {
    /// Validate `config` and build an empty tree whose root is a leaf.
    pub fn new(config: SectorConfig) -> Result<Self, IndexError> {
        config.validate()?;
        let mut sectors = SlotMap::with_key();
        let root = sectors.insert(Sector::root(config.dimensions.len(), config.child_extent)?);
        Ok(Self {
            accessor: config.accessor(),
            config,
            sectors,
            entries: SlotMap::with_key(),
            root,
        })
    }

    /// Options the tree was built with.
    pub fn config(&self) -> &SectorConfig {
        &self.config
    }

    /// Ordered axis names shared by every sector.
    pub fn dimensions(&self) -> &Dimensions {
        &self.config.dimensions
    }

    /// Direct entity count at which a sector partitions.
    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    /// Id of the unbounded root sector.
    pub fn root(&self) -> SectorId {
        self.root
    }

    /// Read-only view of a sector, or `None` once it has been freed.
    pub fn sector(&self, id: SectorId) -> Option<&Sector> {
        self.sectors.get(id)
    }

    /// Number of indexed entities. Detached entities are not counted.
    pub fn len(&self) -> usize {
        self.sectors[self.root].len()
    }

    /// True when no entity is indexed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True if `key` is stored, whether indexed or detached.
    pub fn contains(&self, key: EntityKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Shared access to a stored entity.
    pub fn get(&self, key: EntityKey) -> Option<&T> {
        self.entries.get(key).map(|e| &e.entity)
    }

    /// Mutable access to an entity. Moving it does not re-index it until the
    /// next [`update`](Self::update).
    pub fn get_mut(&mut self, key: EntityKey) -> Option<&mut T> {
        self.entries.get_mut(key).map(|e| &mut e.entity)
    }

    /// Leaf currently owning `key`, or `None` when it is not indexed.
    pub fn leaf_of(&self, key: EntityKey) -> Option<SectorId> {
        self.entries.get(key).and_then(|e| e.leaf)
    }

    /// All stored entities, indexed or not.
    pub fn iter(&self) -> impl Iterator<Item = (EntityKey, &T)> + '_ {
        self.entries.iter().map(|(k, e)| (k, &e.entity))
    }

    /// Current coordinate of a stored entity, in dimension order.
    pub fn point_of(&self, key: EntityKey) -> Result<Vec<f64>, IndexError> {
        let entry = self
            .entries
            .get(key)
            .ok_or_else(|| IndexError::coordinate("entity", "unknown entity key"))?;
        self.accessor.read(&entry.entity, &self.config.dimensions)
    }

    /// Store and index a new entity.
    ///
    /// Nothing is stored if its coordinate cannot be read or indexed.
    pub fn insert(&mut self, entity: T) -> Result<EntityKey, IndexError> {
        let point = self.accessor.read(&entity, &self.config.dimensions)?;
        self.check_indexable(&point)?;
        let key = self.entries.insert(Entry { entity, leaf: None });
        if let Err(err) = self.insert_at(self.root, key, &point) {
            self.entries.remove(key);
            return Err(err);
        }
        Ok(key)
    }

    /// Re-index a stored entity. No-op when it is already indexed.
    pub fn attach(&mut self, key: EntityKey) -> Result<(), IndexError> {
        if self.leaf_of(key).is_some() {
            return Ok(());
        }
        let point = self.point_of(key)?;
        self.check_indexable(&point)?;
        self.insert_at(self.root, key, &point)
    }

    /// Unindex an entity but keep it stored. Returns false if it was not
    /// indexed.
    pub fn detach(&mut self, key: EntityKey) -> bool {
        let Some(leaf) = self.entries.get_mut(key).and_then(|e| e.leaf.take()) else {
            return false;
        };
        let capacity = self.config.capacity;
        let mut cursor = Some(leaf);
        while let Some(id) = cursor {
            let sector = &mut self.sectors[id];
            sector.entities.remove(&key);
            cursor = sector.parent();
            if sector.len() == capacity {
                self.consolidate(id);
            }
        }
        true
    }

    /// Unindex and drop an entity, handing its value back.
    pub fn remove(&mut self, key: EntityKey) -> Option<T> {
        self.detach(key);
        self.entries.remove(key).map(|e| e.entity)
    }

    /// Drop every entity and collapse to an empty root leaf.
    pub fn clear(&mut self) {
        let root = self.root;
        self.entries.clear();
        self.sectors.retain(|id, _| id == root);
        let root = &mut self.sectors[root];
        root.entities.clear();
        root.children = None;
    }

    /// Number of entities listed by `sector` that coincide with `point`
    /// within the coordinate resolution on every axis.
    pub fn coincident_count(&self, sector: SectorId, point: &[f64]) -> Result<usize, IndexError> {
        let Some(sector) = self.sectors.get(sector) else {
            return Ok(0);
        };
        let resolution = self.config.coordinate_resolution;
        let mut count = 0;
        for key in sector.entities() {
            let other = self.point_of(key)?;
            if other.iter().zip(point).all(|(a, b)| (a - b).abs() < resolution) {
                count += 1;
            }
        }
        Ok(count)
    }

    /// Re-index every entity that drifted out of its leaf's cell.
    ///
    /// Returns how many entities moved. Candidates are gathered before the
    /// tree is touched, so an unreadable coordinate leaves it unchanged. An
    /// entity whose new position cannot be indexed is left detached and its
    /// error is returned.
    pub fn update(&mut self) -> Result<usize, IndexError> {
        let _span = tracing::info_span!("sector_update").entered();

        let mut moved = Vec::new();
        for leaf in self.leaves(self.root) {
            for key in self.sectors[leaf].entities() {
                let point = self.point_of(key)?;
                self.check_indexable(&point)?;
                if self.should_relocate(leaf, &point)? {
                    moved.push((key, point));
                }
            }
        }

        for (key, point) in &moved {
            tracing::trace!(?key, ?point, "relocating entity");
            self.detach(*key);
            self.insert_at(self.root, *key, point)?;
        }

        tracing::trace!(
            relocated = moved.len(),
            sectors = self.sectors.len(),
            "sector update complete"
        );
        Ok(moved.len())
    }

    /// A point must map to a root cell even while the root is a leaf, or the
    /// root could never partition again.
    fn check_indexable(&self, point: &[f64]) -> Result<(), IndexError> {
        self.sectors[self.root].cell_of(point, &self.config.dimensions)?;
        Ok(())
    }

    fn should_relocate(&self, leaf: SectorId, point: &[f64]) -> Result<bool, IndexError> {
        let sector = &self.sectors[leaf];
        match (sector.parent(), sector.key()) {
            (Some(parent), Some(key)) => {
                let cell = self.sectors[parent].cell_of(point, &self.config.dimensions)?;
                Ok(cell != *key)
            }
            // The root covers everything.
            _ => Ok(false),
        }
    }

    fn insert_at(&mut self, id: SectorId, key: EntityKey, point: &[f64]) -> Result<(), IndexError> {
        let capacity = self.config.capacity;
        let sector = &self.sectors[id];
        if sector.contains(key) {
            return Ok(());
        }

        let route = !sector.is_leaf()
            || (sector.len() >= capacity
                && (sector.is_root() || self.coincident_count(id, point)? < capacity));

        if route {
            let split = self.sectors[id].is_leaf();
            if split {
                self.partition(id)?;
            }
            let placed = self
                .child_for(id, point)
                .and_then(|child| self.insert_at(child, key, point));
            if let Err(err) = placed {
                if split {
                    self.consolidate(id);
                }
                return Err(err);
            }
        }

        let sector = &mut self.sectors[id];
        if sector.is_leaf() {
            self.entries[key].leaf = Some(id);
        }
        sector.entities.insert(key);
        Ok(())
    }

    /// Turn a leaf into an internal sector, pushing its entities down.
    ///
    /// On error the sector is collapsed back into the leaf it was.
    fn partition(&mut self, id: SectorId) -> Result<(), IndexError> {
        let held = self.sectors[id]
            .entities()
            .map(|k| self.point_of(k).map(|point| (k, point)))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            sector = ?id,
            depth = self.sectors[id].depth(),
            entities = held.len(),
            "partitioning sector"
        );

        self.sectors[id].children = Some(Default::default());
        let placed = held.iter().try_for_each(|(key, point)| {
            let child = self.child_for(id, point)?;
            self.insert_at(child, *key, point)
        });
        if placed.is_err() {
            self.consolidate(id);
        }
        placed
    }

    /// Child sector covering `point`, created on first use.
    fn child_for(&mut self, id: SectorId, point: &[f64]) -> Result<SectorId, IndexError> {
        let parent = &self.sectors[id];
        let cell = parent.cell_of(point, &self.config.dimensions)?;
        if let Some(child) = parent.child(&cell) {
            return Ok(child);
        }

        let extent = parent.child_extent().to_vec();
        let origin = cell.origin(&extent);
        let depth = parent.depth() + 1;
        let sector = Sector::bounded(origin, extent, None, id, cell.clone(), depth)?;
        let child = self.sectors.insert(sector);
        if let Some(children) = self.sectors[id].children.as_mut() {
            children.insert(cell, child);
        }
        Ok(child)
    }

    /// Collapse `id` into a leaf owning everything it lists.
    fn consolidate(&mut self, id: SectorId) {
        if let Some(children) = self.sectors[id].children.take() {
            let mut dropped = 0;
            let mut stack: Vec<SectorId> = children.into_values().collect();
            while let Some(child) = stack.pop() {
                if let Some(sector) = self.sectors.remove(child) {
                    stack.extend(sector.children.into_iter().flat_map(|c| c.into_values()));
                    dropped += 1;
                }
            }
            tracing::debug!(sector = ?id, dropped, "consolidated sector");
        }
        for key in self.sectors[id].entities() {
            self.entries[key].leaf = Some(id);
        }
    }

    /// Leaf sectors under `id`, depth first.
    pub(crate) fn leaves(&self, id: SectorId) -> Vec<SectorId> {
        let mut leaves = Vec::new();
        let mut stack = vec![id];
        while let Some(id) = stack.pop() {
            let sector = &self.sectors[id];
            if sector.is_leaf() {
                leaves.push(id);
            } else {
                stack.extend(sector.children().map(|(_, child)| child));
            }
        }
        leaves
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use serde_json::json;

    fn tree() -> SectorTree<DVec2> {
        SectorTree::new(SectorConfig::new(Dimensions::xy(), 5).with_child_extent(100.0)).unwrap()
    }

    /// Walk the whole tree and check the listing and ownership invariants.
    fn assert_consistent<T: Spatial>(tree: &SectorTree<T>) {
        for (id, sector) in &tree.sectors {
            if sector.is_leaf() {
                for key in sector.entities() {
                    assert_eq!(tree.leaf_of(key), Some(id));
                }
            } else {
                assert!(sector.len() > tree.capacity());
                let mut union = std::collections::BTreeSet::new();
                for (_, child) in sector.children() {
                    assert_eq!(tree.sectors[child].parent(), Some(id));
                    union.extend(tree.sectors[child].entities());
                }
                assert_eq!(union, sector.entities);
            }
            if let Some(parent) = sector.parent() {
                for key in sector.entities() {
                    assert!(tree.sectors[parent].contains(key));
                }
            }
        }
    }

    #[test]
    fn first_insert_stays_in_root_leaf() {
        let mut tree = tree();
        let key = tree.insert(DVec2::ZERO).unwrap();
        assert!(tree.sector(tree.root()).unwrap().is_leaf());
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.leaf_of(key), Some(tree.root()));
        assert_eq!(tree.get(key), Some(&DVec2::ZERO));
    }

    #[test]
    fn attach_is_idempotent() {
        let mut tree = tree();
        let key = tree.insert(DVec2::ZERO).unwrap();
        tree.attach(key).unwrap();
        tree.attach(key).unwrap();
        assert_eq!(tree.len(), 1);
        assert!(tree.sector(tree.root()).unwrap().is_leaf());
        assert_eq!(tree.sectors.len(), 1);
    }

    #[test]
    fn coincident_scenario_partitions_root_once() {
        let mut tree = tree();
        for _ in 0..5 {
            tree.insert(DVec2::ZERO).unwrap();
        }
        assert!(tree.sector(tree.root()).unwrap().is_leaf());

        tree.insert(DVec2::ZERO).unwrap();
        let root = tree.sector(tree.root()).unwrap();
        assert!(!root.is_leaf());
        let (key, child) = root.children().next().unwrap();
        assert_eq!(key.origin(&[100.0, 100.0]), vec![0.0, 0.0]);
        // six coincident entities stay together instead of recursing forever
        assert!(tree.sector(child).unwrap().is_leaf());
        assert_eq!(tree.sector(child).unwrap().len(), 6);

        tree.insert(DVec2::new(100.0, 100.0)).unwrap();
        let root = tree.sector(tree.root()).unwrap();
        let keys: Vec<Vec<f64>> = root.children().map(|(k, _)| k.origin(&[100.0, 100.0])).collect();
        assert_eq!(keys, vec![vec![0.0, 0.0], vec![100.0, 100.0]]);
        assert_eq!(tree.len(), 7);

        tree.insert(DVec2::new(-1000.0, -1000.0)).unwrap();
        assert_eq!(tree.len(), 8);
        assert_eq!(tree.sector(tree.root()).unwrap().children().count(), 3);
        assert_consistent(&tree);
    }

    #[test]
    fn leaf_overflow_requires_coincidence() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut tree = tree();
        for _ in 0..500 {
            let p = DVec2::new(rng.random_range(-300.0..300.0), rng.random_range(-300.0..300.0));
            tree.insert(p).unwrap();
        }
        for _ in 0..20 {
            tree.insert(DVec2::new(42.0, 42.0)).unwrap();
        }
        for leaf in tree.leaves(tree.root()) {
            let sector = tree.sector(leaf).unwrap();
            if sector.len() > tree.capacity() {
                // the excess must all sit on one point
                let points: Vec<Vec<f64>> =
                    sector.entities().map(|k| tree.point_of(k).unwrap()).collect();
                let crowded = points
                    .iter()
                    .filter(|p| (p[0] - 42.0).abs() < 1.0 && (p[1] - 42.0).abs() < 1.0)
                    .count();
                assert!(points.len() - crowded <= tree.capacity());
            }
        }
        assert_consistent(&tree);
    }

    #[test]
    fn remove_everything_returns_to_empty_leaf() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut tree = tree();
        let keys: Vec<EntityKey> = (0..100)
            .map(|_| {
                let p = DVec2::new(rng.random_range(0.0..100.0), rng.random_range(0.0..100.0));
                tree.insert(p).unwrap()
            })
            .collect();
        assert!(!tree.sector(tree.root()).unwrap().is_leaf());
        assert_eq!(tree.len(), 100);

        for (i, key) in keys.iter().enumerate() {
            assert!(tree.remove(*key).is_some());
            assert_eq!(tree.len(), 99 - i);
            assert_eq!(tree.leaf_of(*key), None);
            if i % 10 == 0 {
                assert_consistent(&tree);
            }
        }
        let root = tree.sector(tree.root()).unwrap();
        assert!(root.is_leaf());
        assert!(root.is_empty());
        assert_eq!(tree.sectors.len(), 1);
    }

    #[test]
    fn remove_in_reverse_order_also_collapses() {
        let mut tree = tree();
        let keys: Vec<EntityKey> = (0..40)
            .map(|i| tree.insert(DVec2::new((i * 7 % 97) as f64, (i * 13 % 89) as f64)).unwrap())
            .collect();
        for key in keys.into_iter().rev() {
            tree.remove(key);
        }
        assert!(tree.is_empty());
        assert!(tree.sector(tree.root()).unwrap().is_leaf());
    }

    #[test]
    fn consolidates_at_exactly_capacity() {
        let mut tree = tree();
        let keys: Vec<EntityKey> = (0..7)
            .map(|i| tree.insert(DVec2::new(i as f64 * 150.0, 0.0)).unwrap())
            .collect();
        assert!(!tree.sector(tree.root()).unwrap().is_leaf());

        tree.remove(keys[0]);
        assert_eq!(tree.len(), 6);
        assert!(!tree.sector(tree.root()).unwrap().is_leaf());

        tree.remove(keys[1]);
        assert_eq!(tree.len(), 5);
        let root = tree.root();
        assert!(tree.sector(root).unwrap().is_leaf());
        for key in &keys[2..] {
            assert_eq!(tree.leaf_of(*key), Some(root));
        }
        assert_eq!(tree.sectors.len(), 1);
    }

    #[test]
    fn detach_keeps_the_entity_stored() {
        let mut tree = tree();
        let key = tree.insert(DVec2::new(1.0, 2.0)).unwrap();
        assert!(tree.detach(key));
        assert!(!tree.detach(key));
        assert!(tree.contains(key));
        assert!(tree.is_empty());
        tree.attach(key).unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.remove(key), Some(DVec2::new(1.0, 2.0)));
        assert_eq!(tree.remove(key), None);
    }

    #[test]
    fn invalid_coordinate_stores_nothing() {
        let mut tree = tree();
        let err = tree.insert(DVec2::new(f64::NAN, 0.0)).unwrap_err();
        assert!(matches!(err, IndexError::InvalidCoordinate { ref axis, .. } if axis == "x"));
        assert_eq!(tree.iter().count(), 0);
        assert!(tree.is_empty());
    }

    #[test]
    fn reads_nested_coordinate_field() {
        let config = SectorConfig::new(Dimensions::xy(), 2)
            .with_child_extent(10.0)
            .with_coordinate_field("pos");
        let mut tree = SectorTree::new(config).unwrap();
        for i in 0..5 {
            tree.insert(json!({ "id": i, "pos": { "x": i * 10, "y": 0 } })).unwrap();
        }
        assert_eq!(tree.len(), 5);
        assert!(tree.insert(json!({ "id": 9, "x": 1, "y": 1 })).is_err());
        assert_consistent(&tree);
    }

    #[test]
    fn update_relocates_drifted_entities() {
        let mut tree = tree();
        let mut keys = Vec::new();
        for i in 0..12 {
            keys.push(tree.insert(DVec2::new(10.0 + i as f64 * 5.0, 10.0)).unwrap());
        }
        let mover = keys[0];
        let before = tree.leaf_of(mover).unwrap();

        tree.get_mut(mover).unwrap().x = 950.0;
        assert_eq!(tree.leaf_of(mover), Some(before));

        let moved = tree.update().unwrap();
        assert_eq!(moved, 1);
        let after = tree.leaf_of(mover).unwrap();
        assert_ne!(after, before);
        let sector = tree.sector(after).unwrap();
        assert!(sector.min(0) <= 950.0 && 950.0 < sector.max(0));
        assert_eq!(tree.update().unwrap(), 0);
        assert_eq!(tree.len(), 12);
        assert_consistent(&tree);
    }

    #[test]
    fn update_aborts_before_mutating_on_bad_coordinate() {
        let mut tree = tree();
        let keys: Vec<EntityKey> = (0..10)
            .map(|i| tree.insert(DVec2::new(i as f64 * 30.0, 0.0)).unwrap())
            .collect();
        tree.get_mut(keys[3]).unwrap().y = f64::INFINITY;
        tree.get_mut(keys[4]).unwrap().x = 5000.0;
        let leaf = tree.leaf_of(keys[4]);
        assert!(tree.update().is_err());
        assert_eq!(tree.leaf_of(keys[4]), leaf);
        assert_eq!(tree.len(), 10);
    }

    #[test]
    fn far_coordinates_are_rejected_without_damage() {
        let mut tree =
            SectorTree::new(SectorConfig::new(Dimensions::xy(), 1)).unwrap();
        let origin = tree.insert(DVec2::ZERO).unwrap();
        for far in [1e22, -1e22] {
            let err = tree.insert(DVec2::new(far, 0.0)).unwrap_err();
            assert!(matches!(err, IndexError::InvalidCoordinate { ref axis, .. } if axis == "x"));
        }
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.iter().count(), 1);
        assert!(tree.sector(tree.root()).unwrap().is_leaf());
        assert_eq!(tree.query(&[-2e22, -1.0], &[2e22, 1.0]).unwrap(), vec![origin]);

        // 1e21 still has a root cell at the default extent of 200
        let far = tree.insert(DVec2::new(-1e21, 0.0)).unwrap();
        let leaf = tree.sector(tree.leaf_of(far).unwrap()).unwrap();
        // the cell is narrower than one ulp out here
        assert!(leaf.min(0) <= -1e21 && -1e21 <= leaf.max(0));
        assert_eq!(tree.query(&[-2e21, -1.0], &[-5e20, 1.0]).unwrap(), vec![far]);
        assert_consistent(&tree);
    }

    #[test]
    fn failed_partition_leaves_root_leaf_intact() {
        let mut tree = tree();
        let keys: Vec<EntityKey> = (0..5)
            .map(|i| tree.insert(DVec2::new(i as f64 * 10.0, 0.0)).unwrap())
            .collect();
        tree.get_mut(keys[0]).unwrap().x = 1e22;
        assert!(tree.update().is_err());
        assert_eq!(tree.leaf_of(keys[0]), Some(tree.root()));

        // the stranded entity cannot be pushed into a child
        assert!(tree.insert(DVec2::new(60.0, 0.0)).is_err());
        assert_eq!(tree.len(), 5);
        assert_eq!(tree.iter().count(), 5);
        assert_eq!(tree.sectors.len(), 1);
        assert!(tree.sector(tree.root()).unwrap().is_leaf());
        for key in &keys {
            assert_eq!(tree.leaf_of(*key), Some(tree.root()));
        }

        tree.get_mut(keys[0]).unwrap().x = 5.0;
        tree.insert(DVec2::new(60.0, 0.0)).unwrap();
        assert!(!tree.sector(tree.root()).unwrap().is_leaf());
        assert_eq!(tree.len(), 6);
        assert_consistent(&tree);
    }

    #[test]
    fn clear_resets_to_root() {
        let mut tree = tree();
        for i in 0..50 {
            tree.insert(DVec2::new(i as f64 * 3.0, i as f64)).unwrap();
        }
        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.sectors.len(), 1);
        assert_eq!(tree.iter().count(), 0);
        tree.insert(DVec2::ZERO).unwrap();
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn coincident_count_uses_resolution() {
        let config = SectorConfig::new(Dimensions::xy(), 10).with_coordinate_resolution(0.5);
        let mut tree = SectorTree::new(config).unwrap();
        tree.insert(DVec2::new(0.0, 0.0)).unwrap();
        tree.insert(DVec2::new(0.4, -0.4)).unwrap();
        tree.insert(DVec2::new(0.6, 0.0)).unwrap();
        let root = tree.root();
        assert_eq!(tree.coincident_count(root, &[0.0, 0.0]).unwrap(), 2);
        assert_eq!(tree.coincident_count(root, &[0.3, 0.0]).unwrap(), 3);
    }

    #[test]
    fn rejects_invalid_configuration() {
        let config = SectorConfig::new(Dimensions::xy(), 0);
        assert!(matches!(
            SectorTree::<DVec2>::new(config),
            Err(IndexError::InvalidConfiguration(_))
        ));
    }
}
