//! The immutable board catalog and its validating builder.

use crate::error::CatalogError;
use crate::ids::ResourceId;
use crate::io_type::IoType;
use crate::resource::{BoardResource, ResourceSpec};
use crate::width::IoWidth;
use serde::Serialize;
use std::collections::HashMap;
use std::ops::Index;

/// Every resource of one board, physical resources first in declaration
/// order, followed by one entry per synthetic type.
///
/// A catalog is immutable once built. Share it behind an `Arc` between
/// sessions rather than cloning it.
#[derive(Debug, Clone, Serialize)]
pub struct BoardCatalog {
    name: String,
    resources: Vec<BoardResource>,
    #[serde(skip)]
    by_label: HashMap<String, ResourceId>,
}

impl BoardCatalog {
    /// The board name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the resource with the given ID, if it exists.
    pub fn get(&self, id: ResourceId) -> Option<&BoardResource> {
        self.resources.get(id.as_raw() as usize)
    }

    /// Looks up a resource by its label.
    pub fn find(&self, label: &str) -> Option<ResourceId> {
        self.by_label.get(label).copied()
    }

    /// The entry for a synthetic type.
    pub fn synthetic(&self, io_type: IoType) -> Option<ResourceId> {
        if io_type.is_synthetic() {
            self.find(io_type.name())
        } else {
            None
        }
    }

    /// Iterates over `(ID, &BoardResource)` pairs in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (ResourceId, &BoardResource)> {
        self.resources
            .iter()
            .enumerate()
            .map(|(i, r)| (ResourceId::from_raw(i as u32), r))
    }

    /// Iterates over the physical resources only.
    pub fn physical(&self) -> impl Iterator<Item = (ResourceId, &BoardResource)> {
        self.iter().filter(|(_, r)| !r.is_synthetic())
    }

    /// Total number of entries, synthetic ones included.
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Always `false`: synthetic entries are present in every catalog.
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

impl Index<ResourceId> for BoardCatalog {
    type Output = BoardResource;

    fn index(&self, id: ResourceId) -> &BoardResource {
        &self.resources[id.as_raw() as usize]
    }
}

/// Validates resource declarations and assembles a [`BoardCatalog`].
#[derive(Debug)]
pub struct BoardCatalogBuilder {
    name: String,
    resources: Vec<BoardResource>,
    by_label: HashMap<String, ResourceId>,
    declared: usize,
}

impl BoardCatalogBuilder {
    /// Starts an empty catalog for the named board.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            resources: Vec::new(),
            by_label: HashMap::new(),
            declared: 0,
        }
    }

    /// Validates and adds one physical resource.
    ///
    /// On error nothing is added; the caller decides from
    /// [`CatalogError::is_fatal`] whether to skip the entry or give up.
    pub fn add(&mut self, spec: ResourceSpec) -> Result<ResourceId, CatalogError> {
        let index = self.declared;
        self.declared += 1;

        if spec.label.trim().is_empty() {
            return Err(CatalogError::EmptyLabel { index });
        }
        let reserved = IoType::SYNTHETIC.iter().any(|t| t.name() == spec.label);
        if reserved || self.by_label.contains_key(&spec.label) {
            return Err(CatalogError::DuplicateLabel { label: spec.label });
        }
        let (Some(direction), Some(range)) = (spec.io_type.direction(), spec.io_type.width_range())
        else {
            return Err(CatalogError::SyntheticDeclared {
                label: spec.label,
                io_type: spec.io_type,
            });
        };

        let width = spec.width.unwrap_or(spec.pins.len() as u32);
        if !range.contains(width) {
            return Err(CatalogError::InvalidWidth {
                label: spec.label,
                io_type: spec.io_type,
                width,
                min: range.min,
                max: range.max,
            });
        }
        if let Some(bit) = (0..width).find(|&b| {
            spec.pins
                .get(b as usize)
                .map_or(true, |loc| loc.trim().is_empty())
        }) {
            return Err(CatalogError::MissingPinLocation {
                label: spec.label,
                bit,
            });
        }
        if spec.pins.len() > width as usize {
            return Err(CatalogError::ExtraPinLocations {
                label: spec.label,
                width,
                pins: spec.pins.len(),
            });
        }

        let id = ResourceId::from_raw(self.resources.len() as u32);
        self.by_label.insert(spec.label.clone(), id);
        self.resources.push(BoardResource {
            label: spec.label,
            io_type: spec.io_type,
            width: IoWidth::new(direction, width),
            pins: spec.pins,
            electrical: spec.electrical,
        });
        Ok(id)
    }

    /// Appends the synthetic resources and freezes the catalog.
    pub fn build(mut self) -> BoardCatalog {
        for io_type in IoType::SYNTHETIC {
            let id = ResourceId::from_raw(self.resources.len() as u32);
            self.by_label.insert(io_type.name().to_string(), id);
            self.resources.push(BoardResource::synthetic(io_type));
        }
        BoardCatalog {
            name: self.name,
            resources: self.resources,
            by_label: self.by_label,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::width::Direction;

    #[test]
    fn build_appends_synthetics() {
        let mut b = BoardCatalogBuilder::new("tiny");
        let led = b.add(ResourceSpec::new("LED0", IoType::Led, ["A1"])).unwrap();
        let cat = b.build();
        assert_eq!(cat.name(), "tiny");
        assert_eq!(cat.len(), 1 + IoType::SYNTHETIC.len());
        assert_eq!(cat.physical().count(), 1);
        assert_eq!(cat.find("LED0"), Some(led));
        let zero = cat.synthetic(IoType::AllZero).unwrap();
        assert!(cat[zero].is_synthetic());
        assert!(cat.synthetic(IoType::Led).is_none());
    }

    #[test]
    fn width_follows_pins_for_configurable_types() {
        let mut b = BoardCatalogBuilder::new("b");
        let sw = b
            .add(ResourceSpec::new("SW", IoType::DipSwitch, ["A", "B", "C", "D"]))
            .unwrap();
        let cat = b.build();
        assert_eq!(cat[sw].width, IoWidth::new(Direction::Input, 4));
        assert_eq!(cat[sw].bit_count(), 4);
    }

    #[test]
    fn invalid_width_rejected() {
        let mut b = BoardCatalogBuilder::new("b");
        let err = b
            .add(ResourceSpec::new("SEG", IoType::SevenSegment, ["A"; 7]))
            .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidWidth { width: 7, .. }));
    }

    #[test]
    fn missing_and_blank_locations_rejected() {
        let mut b = BoardCatalogBuilder::new("b");
        let err = b
            .add(ResourceSpec::new("SW", IoType::DipSwitch, ["A", "B"]).with_width(3))
            .unwrap_err();
        assert_eq!(
            err,
            CatalogError::MissingPinLocation {
                label: "SW".to_string(),
                bit: 2
            }
        );
        let err = b
            .add(ResourceSpec::new("SW2", IoType::DipSwitch, ["A", " "]))
            .unwrap_err();
        assert!(matches!(err, CatalogError::MissingPinLocation { bit: 1, .. }));
    }

    #[test]
    fn extra_locations_rejected() {
        let mut b = BoardCatalogBuilder::new("b");
        let err = b
            .add(ResourceSpec::new("KEY", IoType::Button, ["A", "B"]).with_width(1))
            .unwrap_err();
        assert!(matches!(err, CatalogError::ExtraPinLocations { pins: 2, .. }));
    }

    #[test]
    fn duplicate_and_reserved_labels_are_fatal() {
        let mut b = BoardCatalogBuilder::new("b");
        b.add(ResourceSpec::new("LED0", IoType::Led, ["A"])).unwrap();
        let dup = b.add(ResourceSpec::new("LED0", IoType::Led, ["B"])).unwrap_err();
        assert!(dup.is_fatal());
        let reserved = b
            .add(ResourceSpec::new("AllZero", IoType::Led, ["C"]))
            .unwrap_err();
        assert!(reserved.is_fatal());
    }

    #[test]
    fn synthetic_and_empty_entries_rejected() {
        let mut b = BoardCatalogBuilder::new("b");
        let err = b
            .add(ResourceSpec::new("ZERO", IoType::AllZero, Vec::<String>::new()))
            .unwrap_err();
        assert!(matches!(err, CatalogError::SyntheticDeclared { .. }));
        let err = b.add(ResourceSpec::new("", IoType::Led, ["A"])).unwrap_err();
        assert_eq!(err, CatalogError::EmptyLabel { index: 1 });
    }

    #[test]
    fn failed_add_leaves_builder_unchanged() {
        let mut b = BoardCatalogBuilder::new("b");
        let _ = b.add(ResourceSpec::new("SEG", IoType::SevenSegment, ["A"]));
        let ok = b.add(ResourceSpec::new("SEG", IoType::Led, ["A"]));
        assert_eq!(ok.unwrap(), ResourceId::from_raw(0));
    }

    #[test]
    fn serializes_resources() {
        let mut b = BoardCatalogBuilder::new("b");
        b.add(ResourceSpec::new("LED0", IoType::Led, ["A1"])).unwrap();
        let json = serde_json::to_string(&b.build()).unwrap();
        assert!(json.contains("\"LED0\""));
        assert!(json.contains("\"unconnected\""));
        assert!(!json.contains("by_label"));
    }
}
