//! Data structures for markup trees and service configuration

mod config;
mod dataset;
mod element;
mod service;

pub use config::{DuplicateLayerPolicy, LoaderConfig};
pub use dataset::{BoundingBox, DatasetDescriptor, ResolutionRange};
pub use element::{Element, RESERVED_NAMES, is_reserved_name};
pub use service::{
    ContactInfo, DEFAULT_MAX_IMAGE_SIZE, LayerDescriptor, ServiceConfig, ServiceInfo, SrsRef,
};
