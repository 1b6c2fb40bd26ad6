//! Fixed, ordered collection of parts.
//!
//! Parts are created once from [`PartConfig`] records and live as long as the
//! view. Every access by index is bounds-checked and reports
//! [`ViewError::InvalidIndex`] instead of panicking.

use serde::{Deserialize, Serialize};

use crate::config::PartConfig;
use crate::error::ViewError;
use crate::value::Vec3;

/// Opaque host-side image key (asset path, sprite name, handle id).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(pub String);

impl ImageRef {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ImageRef {
    fn from(s: &str) -> Self {
        ImageRef(s.to_string())
    }
}

/// One physical sub-assembly.
#[derive(Clone, Debug, PartialEq)]
pub struct Part {
    pub transform: String,
    pub exploded_position: Vec3,
    pub selection_offset: Vec3,
    pub title: String,
    pub description: String,
    pub image: Option<ImageRef>,
    /// Mirror of the host transform's world position.
    position: Vec3,
    /// Captured when the view is toggled into exploded mode.
    assembled_position: Vec3,
}

impl Part {
    fn from_config(cfg: &PartConfig) -> Self {
        Self {
            transform: cfg.transform.clone(),
            exploded_position: cfg.final_position,
            selection_offset: cfg.offset,
            title: cfg.title.clone(),
            description: cfg.description.clone(),
            image: cfg.image.clone(),
            position: cfg.position,
            assembled_position: cfg.position,
        }
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    pub fn assembled_position(&self) -> Vec3 {
        self.assembled_position
    }
}

#[derive(Clone, Debug, Default)]
pub struct PartRegistry {
    parts: Vec<Part>,
}

impl PartRegistry {
    pub fn from_configs(configs: &[PartConfig]) -> Self {
        Self {
            parts: configs.iter().map(Part::from_config).collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    #[inline]
    pub fn check_index(&self, index: usize) -> Result<(), ViewError> {
        if index < self.parts.len() {
            Ok(())
        } else {
            Err(ViewError::InvalidIndex {
                index,
                len: self.parts.len(),
            })
        }
    }

    pub fn get(&self, index: usize) -> Result<&Part, ViewError> {
        self.check_index(index)?;
        Ok(&self.parts[index])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Part> {
        self.parts.iter()
    }

    /// Index of the part driving the named host transform.
    pub fn position_of(&self, transform: &str) -> Option<usize> {
        self.parts.iter().position(|p| p.transform == transform)
    }

    pub(crate) fn set_position(&mut self, index: usize, position: Vec3) -> Result<(), ViewError> {
        self.check_index(index)?;
        self.parts[index].position = position;
        Ok(())
    }

    /// Record every part's current position as its assembled position.
    pub(crate) fn capture_assembled(&mut self) {
        for part in &mut self.parts {
            part.assembled_position = part.position;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> PartRegistry {
        let cfg = |name: &str, x: f32| PartConfig {
            transform: name.into(),
            position: Vec3::new(x, 0.0, 0.0),
            final_position: Vec3::new(x, 3.0, 0.0),
            offset: Vec3::new(0.0, 0.0, 1.0),
            title: name.to_uppercase(),
            description: format!("{name} description"),
            image: Some(ImageRef::from("img/part.png")),
        };
        PartRegistry::from_configs(&[cfg("base", 0.0), cfg("cover", 1.0)])
    }

    #[test]
    fn bounds_checked_access() {
        let reg = registry();
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.get(1).unwrap().title, "COVER");
        assert_eq!(
            reg.get(2).unwrap_err(),
            ViewError::InvalidIndex { index: 2, len: 2 }
        );
        assert!(reg.check_index(usize::MAX).is_err());
    }

    #[test]
    fn capture_copies_current_positions() {
        let mut reg = registry();
        reg.set_position(1, Vec3::new(5.0, 5.0, 5.0)).unwrap();
        assert_eq!(reg.get(1).unwrap().assembled_position(), Vec3::new(1.0, 0.0, 0.0));
        reg.capture_assembled();
        assert_eq!(reg.get(1).unwrap().assembled_position(), Vec3::new(5.0, 5.0, 5.0));
        assert_eq!(reg.get(0).unwrap().assembled_position(), Vec3::ZERO);
    }

    #[test]
    fn lookup_by_transform_name() {
        let reg = registry();
        assert_eq!(reg.position_of("cover"), Some(1));
        assert_eq!(reg.position_of("missing"), None);
    }
}
