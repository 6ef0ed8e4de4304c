//! Layers and service-level configuration

use super::dataset::DatasetDescriptor;
use crate::error::{Error, Result};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

/// Default maximum image width and height a service will render
pub const DEFAULT_MAX_IMAGE_SIZE: u32 = 2048;

/// A spatial reference system offered by a layer
///
/// Only the reference is kept; the definition file at `path` is not read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SrsRef {
    /// Identifier, e.g. `EPSG:4326`
    pub name: String,
    /// Path of the projection definition
    pub path: PathBuf,
}

/// A named, user-selectable layer backed by one or more datasets
#[derive(Debug, Clone, PartialEq)]
pub struct LayerDescriptor {
    /// Layer name (lookup key)
    pub name: String,
    /// Human-readable title
    pub title: String,
    /// Spatial reference systems the layer declares
    pub srs: Vec<SrsRef>,
    /// Datasets in document order
    pub datasets: Vec<DatasetDescriptor>,
}

impl LayerDescriptor {
    /// Create a layer without datasets
    pub fn new(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            srs: Vec::new(),
            datasets: Vec::new(),
        }
    }

    /// The first dataset, which viewers display
    pub fn primary_dataset(&self) -> Option<&DatasetDescriptor> {
        self.datasets.first()
    }
}

/// Contact details published by a service
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContactInfo {
    /// Primary contact person
    pub person: Option<String>,
    /// Organization of the primary contact
    pub organization: Option<String>,
    /// Position of the contact
    pub position: Option<String>,
    /// Kind of address, e.g. `postal`
    pub address_type: Option<String>,
    /// Street address
    pub address: Option<String>,
    /// City
    pub city: Option<String>,
    /// State or province
    pub state_or_province: Option<String>,
    /// Postal code
    pub post_code: Option<String>,
    /// Country
    pub country: Option<String>,
    /// Voice telephone
    pub voice_telephone: Option<String>,
    /// Fax number
    pub facsimile_telephone: Option<String>,
    /// E-mail address
    pub email: Option<String>,
}

/// Descriptive metadata of a tile service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceInfo {
    /// Service title
    pub title: Option<String>,
    /// Free-text description
    pub abstract_text: Option<String>,
    /// Usage fees
    pub fees: Option<String>,
    /// Access constraints
    pub access_constraints: Option<String>,
    /// Maximum image width in pixels
    pub max_width: u32,
    /// Maximum image height in pixels
    pub max_height: u32,
    /// Logo reference
    pub logo: Option<String>,
    /// Contact details
    pub contact: ContactInfo,
}

impl Default for ServiceInfo {
    fn default() -> Self {
        Self {
            title: None,
            abstract_text: None,
            fees: None,
            access_constraints: None,
            max_width: DEFAULT_MAX_IMAGE_SIZE,
            max_height: DEFAULT_MAX_IMAGE_SIZE,
            logo: None,
            contact: ContactInfo::default(),
        }
    }
}

/// A loaded service: its metadata and its layers by name
///
/// Layers iterate in document order and the first one is the default
/// selection. The value is never mutated after loading, so it can be shared
/// read-only between concurrent requests.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ServiceConfig {
    /// Service metadata
    pub service: ServiceInfo,
    layers: Vec<LayerDescriptor>,
    index: HashMap<String, usize>,
}

impl ServiceConfig {
    /// Create an empty configuration
    pub fn new(service: ServiceInfo) -> Self {
        Self {
            service,
            layers: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Add a layer, replacing any layer of the same name in place
    ///
    /// Returns the replaced layer.
    pub fn insert(&mut self, layer: LayerDescriptor) -> Option<LayerDescriptor> {
        match self.index.get(&layer.name) {
            Some(&position) => self
                .layers
                .get_mut(position)
                .map(|slot| std::mem::replace(slot, layer)),
            None => {
                self.index.insert(layer.name.clone(), self.layers.len());
                self.layers.push(layer);
                None
            }
        }
    }

    /// Look up a layer by name
    pub fn get(&self, name: &str) -> Option<&LayerDescriptor> {
        self.index.get(name).and_then(|&i| self.layers.get(i))
    }

    /// Whether a layer with this name exists
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Layers in document order
    pub fn iter(&self) -> std::slice::Iter<'_, LayerDescriptor> {
        self.layers.iter()
    }

    /// Layer names in document order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.layers.iter().map(|layer| layer.name.as_str())
    }

    /// Number of layers
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Whether no layers are defined
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// The first layer in document order
    pub fn default_layer(&self) -> Option<&LayerDescriptor> {
        self.layers.first()
    }

    /// Resolve a layer request
    ///
    /// `None` selects the default layer. A name that is not defined is an
    /// error rather than a fallback to the default.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownLayer`] if `name` is given but not defined,
    /// or if no name is given and the service has no layers.
    pub fn select(&self, name: Option<&str>) -> Result<&LayerDescriptor> {
        match name {
            Some(name) => self
                .get(name)
                .ok_or_else(|| Error::UnknownLayer(name.to_string())),
            None => self
                .default_layer()
                .ok_or_else(|| Error::UnknownLayer("<default>".to_string())),
        }
    }
}

impl<'a> IntoIterator for &'a ServiceConfig {
    type Item = &'a LayerDescriptor;
    type IntoIter = std::slice::Iter<'a, LayerDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn field(f: &mut fmt::Formatter<'_>, label: &str, value: &Option<String>) -> fmt::Result {
    writeln!(f, "\t{}: {}", label, value.as_deref().unwrap_or("(none)"))
}

impl fmt::Display for ServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let service = &self.service;
        let contact = &service.contact;

        writeln!(f, "Service:")?;
        field(f, "Title", &service.title)?;
        field(f, "Abstract", &service.abstract_text)?;
        field(f, "Fees", &service.fees)?;
        field(f, "AccessConstraints", &service.access_constraints)?;
        field(f, "ContactPerson", &contact.person)?;
        field(f, "ContactOrganization", &contact.organization)?;
        field(f, "ContactPosition", &contact.position)?;
        field(f, "AddressType", &contact.address_type)?;
        field(f, "Address", &contact.address)?;
        field(f, "City", &contact.city)?;
        field(f, "StateOrProvince", &contact.state_or_province)?;
        field(f, "PostCode", &contact.post_code)?;
        field(f, "Country", &contact.country)?;
        field(f, "ContactVoiceTelephone", &contact.voice_telephone)?;
        field(f, "ContactFacsimileTelephone", &contact.facsimile_telephone)?;
        field(f, "ContactElectronicMailAddress", &contact.email)?;
        writeln!(f, "\tMaxWidth: {}", service.max_width)?;
        writeln!(f, "\tMaxHeight: {}", service.max_height)?;
        field(f, "Logo", &service.logo)?;

        for layer in &self.layers {
            writeln!(f, "Layer")?;
            writeln!(f, "\tname: {}", layer.name)?;
            writeln!(f, "\ttitle: {}", layer.title)?;
            for srs in &layer.srs {
                writeln!(f, "\tsrs: {}", srs.name)?;
            }
            for dataset in &layer.datasets {
                writeln!(
                    f,
                    "\tdataset: path={} levels={} resx={} resy={}",
                    dataset.source_path.display(),
                    dataset.levels,
                    dataset.res_x,
                    dataset.res_y
                )?;
                writeln!(
                    f,
                    "\t         tilesizex={} tilesizey={} webpath={}",
                    dataset.tile_size_x, dataset.tile_size_y, dataset.web_path
                )?;
                if let Some(bbox) = dataset.bounding_box() {
                    writeln!(
                        f,
                        "\t         minx={} miny={} maxx={} maxy={}",
                        bbox.min_x, bbox.min_y, bbox.max_x, bbox.max_y
                    )?;
                }
                if let Some(range) = dataset.resolution_range {
                    writeln!(
                        f,
                        "\t         minresx={} minresy={} maxresx={} maxresy={}",
                        range.min_res_x, range.min_res_y, range.max_res_x, range.max_res_y
                    )?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ServiceConfig {
        let mut config = ServiceConfig::new(ServiceInfo::default());
        config.insert(LayerDescriptor::new("roads", "Road network"));
        config.insert(LayerDescriptor::new("satellite", "Imagery"));
        config
    }

    #[test]
    fn test_document_order_and_default() {
        let config = config();
        assert_eq!(config.names().collect::<Vec<_>>(), vec!["roads", "satellite"]);
        assert_eq!(config.default_layer().unwrap().name, "roads");
        assert_eq!(config.len(), 2);
        assert!(config.contains("satellite"));
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut config = config();
        let replaced = config.insert(LayerDescriptor::new("roads", "Newer roads"));
        assert_eq!(replaced.unwrap().title, "Road network");
        assert_eq!(config.len(), 2);
        assert_eq!(config.default_layer().unwrap().title, "Newer roads");
        assert_eq!(config.names().collect::<Vec<_>>(), vec!["roads", "satellite"]);
    }

    #[test]
    fn test_select() {
        let config = config();
        assert_eq!(config.select(None).unwrap().name, "roads");
        assert_eq!(config.select(Some("satellite")).unwrap().name, "satellite");
        let err = config.select(Some("terrain")).unwrap_err();
        assert!(matches!(err, Error::UnknownLayer(ref name) if name == "terrain"));
    }

    #[test]
    fn test_select_default_on_empty_service() {
        let config = ServiceConfig::default();
        assert!(config.is_empty());
        assert!(matches!(config.select(None), Err(Error::UnknownLayer(_))));
    }

    #[test]
    fn test_display_lists_layers() {
        let mut config = config();
        config.service.title = Some("Demo".to_string());
        let listing = config.to_string();
        assert!(listing.starts_with("Service:\n"));
        assert!(listing.contains("\tTitle: Demo\n"));
        assert!(listing.contains("\tFees: (none)\n"));
        assert!(listing.contains("\tMaxWidth: 2048\n"));
        assert!(listing.contains("\tname: roads\n"));
        assert!(listing.find("roads").unwrap() < listing.find("satellite").unwrap());
    }
}
