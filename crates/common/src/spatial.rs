use std::collections::{BTreeMap, HashMap};

use glam::{DVec2, DVec3, Vec2, Vec3};

/// A record that exposes numeric coordinates by axis name.
///
/// Entities stored in a sector tree implement this. A record is either
/// coordinate-bearing itself (`axis` answers directly) or carries its
/// coordinate in a named sub-record reachable through `field`.
pub trait Spatial {
    /// Value on the named axis, or `None` if absent or non-numeric.
    fn axis(&self, name: &str) -> Option<f64>;

    /// Nested coordinate record stored under `name`.
    fn field(&self, _name: &str) -> Option<&dyn Spatial> {
        None
    }
}

impl<T: Spatial + ?Sized> Spatial for Box<T> {
    fn axis(&self, name: &str) -> Option<f64> {
        (**self).axis(name)
    }

    fn field(&self, name: &str) -> Option<&dyn Spatial> {
        (**self).field(name)
    }
}

impl Spatial for Vec2 {
    fn axis(&self, name: &str) -> Option<f64> {
        match name {
            "x" => Some(self.x as f64),
            "y" => Some(self.y as f64),
            _ => None,
        }
    }
}

impl Spatial for Vec3 {
    fn axis(&self, name: &str) -> Option<f64> {
        match name {
            "x" => Some(self.x as f64),
            "y" => Some(self.y as f64),
            "z" => Some(self.z as f64),
            _ => None,
        }
    }
}

impl Spatial for DVec2 {
    fn axis(&self, name: &str) -> Option<f64> {
        match name {
            "x" => Some(self.x),
            "y" => Some(self.y),
            _ => None,
        }
    }
}

impl Spatial for DVec3 {
    fn axis(&self, name: &str) -> Option<f64> {
        match name {
            "x" => Some(self.x),
            "y" => Some(self.y),
            "z" => Some(self.z),
            _ => None,
        }
    }
}

impl Spatial for HashMap<String, f64> {
    fn axis(&self, name: &str) -> Option<f64> {
        self.get(name).copied()
    }
}

impl Spatial for BTreeMap<String, f64> {
    fn axis(&self, name: &str) -> Option<f64> {
        self.get(name).copied()
    }
}

/// JSON objects are read field by field; any nested object can serve as the
/// coordinate record.
impl Spatial for serde_json::Value {
    fn axis(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(serde_json::Value::as_f64)
    }

    fn field(&self, name: &str) -> Option<&dyn Spatial> {
        self.get(name)
            .filter(|v| v.is_object())
            .map(|v| v as &dyn Spatial)
    }
}
