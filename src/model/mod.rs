//! Symbol descriptor model.
//!
//! Plain data records describing how logical (script-side) names map onto
//! binary (compiled-side) names and shapes. The [`Registry`] is the root
//! aggregate: a [`Metadata`] envelope, the receiver-less [`GlobalData`]
//! bucket and a two-level map `logical name -> binary full name ->`
//! [`TypeDescriptor`], since one logical type can have several binary
//! variants.

pub mod members;
pub mod registry;
pub mod types;

pub use members::{
    ConstantDescriptor, EnumDescriptor, EnumMember, MethodDescriptor, ParameterDescriptor,
    ParameterShape, PropertyDescriptor, SignalDescriptor, TypeProxy, TypeReference,
};
pub use registry::{GlobalData, Metadata, Registry, SnapshotOrigin, DATA_FORMAT_VERSION};
pub use types::{TypeDescriptor, TypeVariants};
