//! Loading service and dataset configuration documents
//!
//! A service document lists layers; each layer references one or more
//! dataset documents by path. Loading a service parses the service document,
//! then loads every referenced dataset document in turn. The result is an
//! immutable [`ServiceConfig`].
//!
//! ```xml
//! <geoquadtreeserver>
//!   <service><title>Demo</title></service>
//!   <layer name="roads" title="Road network">
//!     <srs name="EPSG:4326" path="/srs/4326.prj"/>
//!     <geoquadtree path="/data/roads/gqt.xml" webpath="/tiles/roads/"/>
//!   </layer>
//! </geoquadtreeserver>
//! ```

mod dataset;
mod service;

pub use dataset::{dataset_from_element, load_dataset, parse_dataset_document};
pub use service::{load_service, load_service_with_config, parse_service_document};

use crate::error::{Error, Result};
use crate::model::Element;
use std::path::Path;
use std::str::FromStr;

/// Read a whole document from disk
fn read_document(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
        path: path.to_path_buf(),
        source,
    })
}

fn required_attribute<'a>(element: &'a Element, attribute: &str) -> Result<&'a str> {
    element
        .attribute(attribute)
        .ok_or_else(|| Error::missing_attribute(element.name(), attribute))
}

fn parse_value<T: FromStr>(element: &Element, attribute: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::invalid_number(element.name(), attribute, value))
}

fn numeric_attribute<T: FromStr>(element: &Element, attribute: &str) -> Result<T> {
    let value = required_attribute(element, attribute)?;
    parse_value(element, attribute, value)
}

fn optional_numeric<T: FromStr>(element: &Element, attribute: &str) -> Result<Option<T>> {
    element
        .attribute(attribute)
        .map(|value| parse_value(element, attribute, value))
        .transpose()
}
