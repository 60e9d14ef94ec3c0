//! Data structure definitions
//!
//! A [`DataStructure`] describes the shape of a dataset: the ordered key
//! dimensions (optionally followed by a time dimension and accompanied by a
//! measure dimension), the attributes, and the single primary measure.
//!
//! Component lookup by id always searches in this order and returns the first
//! hit:
//!
//! 1. dimensions, in declared order
//! 2. attributes, in declared order
//! 3. the measure dimension
//! 4. the time dimension
//! 5. the primary measure by its own id
//! 6. the primary measure by [`OBS_VALUE`]
//!
//! The model does not prevent a dimension and an attribute from sharing an
//! id; the dimension wins. `validation::structures` reports such collisions.

use super::component::{
    Attribute, ComponentKind, ComponentRef, Dimension, MeasureDimension, OBS_VALUE,
    PrimaryMeasure, StructureComponent, TimeDimension,
};
use super::identity::{Identifiable, MaintainableArtefact, impl_maintainable};
use crate::error::{RegistryError, Result};
use serde::{Deserialize, Serialize};

/// Key dimensions of a data structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionList {
    #[serde(default)]
    pub dimensions: Vec<Dimension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_dimension: Option<TimeDimension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measure_dimension: Option<MeasureDimension>,
}

/// Attributes of a data structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeList {
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

/// Measures of a data structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasureList {
    #[serde(default)]
    pub primary_measure: PrimaryMeasure,
}

/// The component lists of a data structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataStructureComponents {
    #[serde(default)]
    pub dimension_list: DimensionList,
    #[serde(default)]
    pub attribute_list: AttributeList,
    #[serde(default)]
    pub measure_list: MeasureList,
}

impl DataStructureComponents {
    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimension_list.dimensions
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attribute_list.attributes
    }

    pub fn time_dimension(&self) -> Option<&TimeDimension> {
        self.dimension_list.time_dimension.as_ref()
    }

    pub fn measure_dimension(&self) -> Option<&MeasureDimension> {
        self.dimension_list.measure_dimension.as_ref()
    }

    pub fn primary_measure(&self) -> &PrimaryMeasure {
        &self.measure_list.primary_measure
    }

    /// Find a component by id following the documented search order
    pub fn find_component(&self, id: &str) -> Option<ComponentRef<'_>> {
        if let Some(dimension) = self
            .dimensions()
            .iter()
            .find(|d| d.component.identifies_me_str(id))
        {
            return Some(ComponentRef::Dimension(dimension));
        }
        if let Some(attribute) = self
            .attributes()
            .iter()
            .find(|a| a.component.identifies_me_str(id))
        {
            return Some(ComponentRef::Attribute(attribute));
        }
        if let Some(measure_dimension) = self
            .measure_dimension()
            .filter(|m| m.component.identifies_me_str(id))
        {
            return Some(ComponentRef::MeasureDimension(measure_dimension));
        }
        if let Some(time_dimension) = self
            .time_dimension()
            .filter(|t| t.component.identifies_me_str(id))
        {
            return Some(ComponentRef::TimeDimension(time_dimension));
        }

        let measure = self.primary_measure();
        if measure.component.identifies_me_str(id) || id == OBS_VALUE {
            return Some(ComponentRef::PrimaryMeasure(measure));
        }
        None
    }

    fn resolves_to(&self, id: &str, kind: ComponentKind) -> bool {
        self.find_component(id).is_some_and(|c| c.kind() == kind)
    }

    pub fn is_dimension(&self, id: &str) -> bool {
        self.resolves_to(id, ComponentKind::Dimension)
    }

    pub fn is_time_dimension(&self, id: &str) -> bool {
        self.resolves_to(id, ComponentKind::TimeDimension)
    }

    pub fn is_measure_dimension(&self, id: &str) -> bool {
        self.resolves_to(id, ComponentKind::MeasureDimension)
    }

    pub fn is_attribute(&self, id: &str) -> bool {
        self.resolves_to(id, ComponentKind::Attribute)
    }

    pub fn is_primary_measure(&self, id: &str) -> bool {
        self.resolves_to(id, ComponentKind::PrimaryMeasure)
    }

    /// Zero-based position of `id` in the observation key, if it is part of it
    pub fn find_key_position(&self, id: &str) -> Option<usize> {
        if let Some(position) = self
            .dimensions()
            .iter()
            .position(|d| d.component.identifies_me_str(id))
        {
            return Some(position);
        }
        self.time_dimension()
            .filter(|t| t.component.identifies_me_str(id))
            .map(|_| self.dimensions().len())
    }

    /// Ids making up the observation key, time dimension last
    pub fn key_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self
            .dimensions()
            .iter()
            .map(|d| d.component_id().as_str())
            .collect();
        if let Some(time_dimension) = self.time_dimension() {
            ids.push(time_dimension.component_id().as_str());
        }
        ids
    }

    /// Number of positions in the observation key
    pub fn key_length(&self) -> usize {
        self.dimensions().len() + usize::from(self.time_dimension().is_some())
    }

    /// Every component in search order
    pub fn iter_components(&self) -> impl Iterator<Item = ComponentRef<'_>> {
        self.dimensions()
            .iter()
            .map(ComponentRef::Dimension)
            .chain(self.attributes().iter().map(ComponentRef::Attribute))
            .chain(self.measure_dimension().map(ComponentRef::MeasureDimension))
            .chain(self.time_dimension().map(ComponentRef::TimeDimension))
            .chain(std::iter::once(ComponentRef::PrimaryMeasure(
                self.primary_measure(),
            )))
    }
}

/// A data structure definition
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataStructure {
    #[serde(flatten)]
    pub maintainable: MaintainableArtefact,
    #[serde(default)]
    pub components: DataStructureComponents,
}

impl_maintainable!(DataStructure);

impl DataStructure {
    pub fn new(maintainable: MaintainableArtefact, components: DataStructureComponents) -> Self {
        Self {
            maintainable,
            components,
        }
    }

    pub fn find_component(&self, id: &str) -> Option<ComponentRef<'_>> {
        self.components.find_component(id)
    }

    pub fn is_dimension(&self, id: &str) -> bool {
        self.components.is_dimension(id)
    }

    pub fn is_time_dimension(&self, id: &str) -> bool {
        self.components.is_time_dimension(id)
    }

    pub fn is_measure_dimension(&self, id: &str) -> bool {
        self.components.is_measure_dimension(id)
    }

    pub fn is_attribute(&self, id: &str) -> bool {
        self.components.is_attribute(id)
    }

    pub fn is_primary_measure(&self, id: &str) -> bool {
        self.components.is_primary_measure(id)
    }

    /// Position of a dimension in the observation key.
    ///
    /// Callers index observation keys with the result, so an id outside the
    /// key is an error rather than a miss.
    pub fn key_position(&self, id: &str) -> Result<usize> {
        self.components
            .find_key_position(id)
            .ok_or_else(|| RegistryError::KeyPosition {
                structure: self.id().unwrap_or_default().to_string(),
                component: id.to_string(),
            })
    }

    pub fn key_ids(&self) -> Vec<&str> {
        self.components.key_ids()
    }

    pub fn key_length(&self) -> usize {
        self.components.key_length()
    }
}

/// Builder assembling a data structure component by component
#[derive(Debug, Default)]
pub struct DataStructureBuilder {
    maintainable: MaintainableArtefact,
    components: DataStructureComponents,
}

impl DataStructureBuilder {
    pub fn new(agency_id: &str, id: &str, version: Option<&str>) -> Self {
        Self {
            maintainable: MaintainableArtefact::new(agency_id, id, version),
            components: DataStructureComponents::default(),
        }
    }

    pub fn dimension(mut self, dimension: Dimension) -> Self {
        self.components.dimension_list.dimensions.push(dimension);
        self
    }

    pub fn time_dimension(mut self, time_dimension: TimeDimension) -> Self {
        self.components.dimension_list.time_dimension = Some(time_dimension);
        self
    }

    pub fn measure_dimension(mut self, measure_dimension: MeasureDimension) -> Self {
        self.components.dimension_list.measure_dimension = Some(measure_dimension);
        self
    }

    pub fn attribute(mut self, attribute: Attribute) -> Self {
        self.components.attribute_list.attributes.push(attribute);
        self
    }

    pub fn primary_measure(mut self, measure: PrimaryMeasure) -> Self {
        self.components.measure_list.primary_measure = measure;
        self
    }

    pub fn build(self) -> DataStructure {
        DataStructure::new(self.maintainable, self.components)
    }
}
