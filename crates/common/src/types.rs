use serde::{Deserialize, Serialize};

/// Errors from building a dimension set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DimensionsError {
    #[error("at least one dimension is required")]
    Empty,
    #[error("dimension names must not be blank")]
    BlankName,
    #[error("duplicate dimension name `{0}`")]
    Duplicate(String),
}

/// Ordered, fixed list of named axes shared by every sector of one tree.
///
/// Axis order is significant: coordinates, cell keys and query bounds are all
/// laid out in this order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Dimensions(Vec<String>);

impl Dimensions {
    /// Build from names in axis order; rejects empty sets, blank names and
    /// duplicates.
    pub fn new<I, S>(names: I) -> Result<Self, DimensionsError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(DimensionsError::Empty);
        }
        for (i, name) in names.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(DimensionsError::BlankName);
            }
            if names[..i].contains(name) {
                return Err(DimensionsError::Duplicate(name.clone()));
            }
        }
        Ok(Self(names))
    }

    /// The common planar case: `x`, `y`.
    pub fn xy() -> Self {
        Self(vec!["x".into(), "y".into()])
    }

    /// `x`, `y`, `z`.
    pub fn xyz() -> Self {
        Self(vec!["x".into(), "y".into(), "z".into()])
    }

    /// Number of axes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a constructed set; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Axis names in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl TryFrom<Vec<String>> for Dimensions {
    type Error = DimensionsError;

    fn try_from(names: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(names)
    }
}

impl From<Dimensions> for Vec<String> {
    fn from(dims: Dimensions) -> Self {
        dims.0
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_axis_order() {
        let dims = Dimensions::new(["y", "x", "t"]).unwrap();
        assert_eq!(dims.len(), 3);
        assert_eq!(dims.iter().collect::<Vec<_>>(), vec!["y", "x", "t"]);
    }

    #[test]
    fn rejects_empty_and_duplicates() {
        assert_eq!(
            Dimensions::new(Vec::<String>::new()),
            Err(DimensionsError::Empty)
        );
        assert_eq!(
            Dimensions::new(["x", "x"]),
            Err(DimensionsError::Duplicate("x".into()))
        );
        assert_eq!(Dimensions::new(["x", " "]), Err(DimensionsError::BlankName));
    }

    #[test]
    fn deserialize_validates() {
        let dims: Dimensions = serde_json::from_str(r#"["x","y"]"#).unwrap();
        assert_eq!(dims, Dimensions::xy());
        assert!(serde_json::from_str::<Dimensions>(r#"["x","x"]"#).is_err());
        assert!(serde_json::from_str::<Dimensions>("[]").is_err());
    }

    #[test]
    fn display_lists_names() {
        assert_eq!(Dimensions::xyz().to_string(), "[x, y, z]");
    }
}
