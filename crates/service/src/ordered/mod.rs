//! Ordered collections: one generic engine for every admin-sorted list.
//!
//! `repository` persists records and their `display_order`, `ordering` holds
//! the pure list arithmetic, `coordinator` drives drag-and-drop reorders and
//! `form` drives create/edit submissions.

pub mod domain;
pub mod ordering;
pub mod repository;
pub mod repo;
pub mod coordinator;
pub mod form;

pub use coordinator::{DragState, DropOutcome, ReorderCoordinator};
pub use domain::{OrderedRecord, RecordPatch};
pub use form::{FormController, FormMode};
pub use repository::OrderedRepository;
