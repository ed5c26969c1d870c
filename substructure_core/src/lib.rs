//! # substructure_core - Parametric Bridge Substructure Engine
//!
//! `substructure_core` derives the 3D geometry of a multi-span bridge
//! substructure (piles, pile caps, columns, pier caps) from a small set of
//! dimensional and alignment parameters, and reports material quantities.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: every derived value is a pure function of the parameters
//! - **JSON-First**: parameters and results implement Serialize/Deserialize
//! - **Validate once**: the parameter record is checked at the boundary; the
//!   geometry functions are total over valid input
//! - **Renderer-agnostic**: output is boxes, cylinders and polygons, never meshes
//!
//! ## Quick Start
//!
//! ```rust
//! use substructure_core::{SubstructureModel, SubstructureParams};
//!
//! let mut model = SubstructureModel::new(SubstructureParams::default()).unwrap();
//!
//! let quantities = model.quantities();
//! assert_eq!(quantities.total_piles, 54);
//!
//! let geometry = model.geometry();
//! assert_eq!(geometry.piers.len(), 3);
//! ```
//!
//! ## Modules
//!
//! - [`params`] - Parameter record, defaults and boundary validation
//! - [`layout`] - Pier-local layouts (pier-cap profile, pile grid, columns)
//! - [`alignment`] - Pier stations along a straight or curved alignment
//! - [`assembly`] - Per-station world geometry for renderers and exporters
//! - [`quantities`] - Material quantities per station and in total
//! - [`model`] - Memoized model tying the derivations together
//! - [`report`] - PDF quantity report
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod alignment;
pub mod assembly;
pub mod errors;
pub mod layout;
pub mod model;
pub mod params;
pub mod quantities;
pub mod report;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use errors::{GeometryError, GeometryResult};
pub use model::SubstructureModel;
pub use params::SubstructureParams;
