//! Service documents

use super::dataset::load_dataset;
use super::{optional_numeric, parse_value, read_document, required_attribute};
use crate::error::{Error, Result};
use crate::model::{
    ContactInfo, DatasetDescriptor, DuplicateLayerPolicy, Element, LayerDescriptor,
    LoaderConfig, ResolutionRange, ServiceConfig, ServiceInfo, SrsRef,
};
use crate::parser::parse_document;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// Element names accepted for a dataset reference inside a layer
const DATASET_ELEMENTS: [&str; 2] = ["geoquadtree", "dataset"];

/// Load a service document with the default [`LoaderConfig`]
///
/// # Example
///
/// ```no_run
/// use geoquadtree::load_service;
///
/// let service = load_service("/etc/geoquadtreeserver.xml")?;
/// let layer = service.select(None)?;
/// println!("default layer: {}", layer.name);
/// # Ok::<(), geoquadtree::Error>(())
/// ```
pub fn load_service<P: AsRef<Path>>(path: P) -> Result<ServiceConfig> {
    load_service_with_config(path, &LoaderConfig::default())
}

/// Load a service document and every dataset document it references
///
/// # Errors
///
/// - [`Error::ConfigRead`] if the service or a dataset document cannot be read
/// - [`Error::MalformedDocument`] with the offending file if one does not parse
/// - [`Error::ReservedName`] if a document uses a reserved child element name
/// - [`Error::InvalidConfig`] for missing or non-numeric attributes, an
///   unexpected root element, or a duplicate layer under
///   [`DuplicateLayerPolicy::Reject`]
#[instrument(skip(path, config), fields(path = %path.as_ref().display()))]
pub fn load_service_with_config<P: AsRef<Path>>(
    path: P,
    config: &LoaderConfig,
) -> Result<ServiceConfig> {
    let path = path.as_ref();
    let xml = read_document(path)?;
    let root = parse_document(&xml).map_err(|e| e.in_file(&path.display().to_string()))?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
    service_from_element(&root, base_dir, config)
}

/// Parse a service document held in memory
///
/// Dataset documents are still read from disk. Relative dataset paths are
/// resolved against `base_dir` when the configuration asks for it.
pub fn parse_service_document(
    xml: &str,
    base_dir: &Path,
    config: &LoaderConfig,
) -> Result<ServiceConfig> {
    let root = parse_document(xml)?;
    service_from_element(&root, base_dir, config)
}

fn service_from_element(
    root: &Element,
    base_dir: &Path,
    config: &LoaderConfig,
) -> Result<ServiceConfig> {
    if let Some(expected) = config.expected_root() {
        if root.name() != expected {
            return Err(Error::InvalidConfig(format!(
                "expected root element '<{}>', found '<{}>'",
                expected,
                root.name()
            )));
        }
    }

    let info = match root.first_child("service") {
        Some(element) => service_info(element)?,
        None => ServiceInfo::default(),
    };
    let mut service = ServiceConfig::new(info);

    for element in root.children_named("layer") {
        let layer = read_layer(element, base_dir, config)?;
        let name = layer.name.clone();
        if service.contains(&name) {
            match config.duplicate_layers() {
                DuplicateLayerPolicy::Reject => {
                    return Err(Error::InvalidConfig(format!(
                        "layer '{}' is defined more than once",
                        name
                    )));
                }
                DuplicateLayerPolicy::LastWriteWins => {
                    warn!(layer = %name, "Duplicate layer name, later definition replaces earlier");
                }
            }
        }
        service.insert(layer);
    }

    info!(layers = service.len(), "Loaded service configuration");
    Ok(service)
}

fn read_layer(
    element: &Element,
    base_dir: &Path,
    config: &LoaderConfig,
) -> Result<LayerDescriptor> {
    let name = required_attribute(element, "name")?;
    let mut layer = LayerDescriptor::new(name, element.attribute("title").unwrap_or_default());

    for srs in element.children_named("srs") {
        layer.srs.push(SrsRef {
            name: required_attribute(srs, "name")?.to_string(),
            path: PathBuf::from(srs.attribute("path").unwrap_or_default()),
        });
    }

    // Both dataset element names are accepted and kept in document order
    for child in element
        .children()
        .iter()
        .filter(|child| DATASET_ELEMENTS.contains(&child.name()))
    {
        layer.datasets.push(dataset_reference(child, base_dir, config)?);
    }

    debug!(
        layer = %layer.name,
        datasets = layer.datasets.len(),
        srs = layer.srs.len(),
        "Read layer"
    );
    Ok(layer)
}

fn dataset_reference(
    element: &Element,
    base_dir: &Path,
    config: &LoaderConfig,
) -> Result<DatasetDescriptor> {
    let declared = PathBuf::from(required_attribute(element, "path")?);
    let path = if config.resolves_relative_paths() && declared.is_relative() {
        base_dir.join(declared)
    } else {
        declared
    };

    let mut dataset = load_dataset(&path)?;
    dataset.web_path = element.attribute("webpath").unwrap_or_default().to_string();
    dataset.resolution_range = resolution_range(element)?;
    Ok(dataset)
}

/// Read the optional resolution range; the four bounds come as a set
fn resolution_range(element: &Element) -> Result<Option<ResolutionRange>> {
    let bounds = [
        optional_numeric::<f64>(element, "minresx")?,
        optional_numeric::<f64>(element, "minresy")?,
        optional_numeric::<f64>(element, "maxresx")?,
        optional_numeric::<f64>(element, "maxresy")?,
    ];
    match bounds {
        [Some(min_res_x), Some(min_res_y), Some(max_res_x), Some(max_res_y)] => {
            Ok(Some(ResolutionRange {
                min_res_x,
                min_res_y,
                max_res_x,
                max_res_y,
            }))
        }
        [None, None, None, None] => Ok(None),
        _ => Err(Error::InvalidConfig(format!(
            "dataset '{}' declares only part of minresx, minresy, maxresx, maxresy",
            element.attribute("path").unwrap_or_default()
        ))),
    }
}

fn owned_text(element: &Element, name: &str) -> Option<String> {
    element.child_text(name).map(str::to_string)
}

fn image_limit(element: &Element, name: &str, default: u32) -> Result<u32> {
    match element.child_text(name) {
        Some(value) => parse_value(element, name, value),
        None => Ok(default),
    }
}

fn service_info(element: &Element) -> Result<ServiceInfo> {
    let defaults = ServiceInfo::default();
    Ok(ServiceInfo {
        title: owned_text(element, "title"),
        abstract_text: owned_text(element, "abstract"),
        fees: owned_text(element, "fees"),
        access_constraints: owned_text(element, "accessconstraints"),
        max_width: image_limit(element, "maxwidth", defaults.max_width)?,
        max_height: image_limit(element, "maxheight", defaults.max_height)?,
        logo: owned_text(element, "logo"),
        contact: element
            .first_child("contactinformation")
            .map(contact_info)
            .unwrap_or_default(),
    })
}

fn contact_info(element: &Element) -> ContactInfo {
    let primary = element.first_child("contactpersonprimary");
    let address = element.first_child("contactaddress");
    let in_primary = |name: &str| primary.and_then(|p| owned_text(p, name));
    let in_address = |name: &str| address.and_then(|a| owned_text(a, name));

    ContactInfo {
        person: in_primary("contactperson"),
        organization: in_primary("contactorganization"),
        position: owned_text(element, "contactposition"),
        address_type: in_address("addresstype"),
        address: in_address("address"),
        city: in_address("city"),
        state_or_province: in_address("stateorprovince"),
        post_code: in_address("postcode"),
        country: in_address("country"),
        voice_telephone: owned_text(element, "contactvoicetelephone"),
        facsimile_telephone: owned_text(element, "contactfacsimiletelephone"),
        email: owned_text(element, "contactelectronicmailaddress"),
    }
}
