//! Projfields – a typed field-value store for project schedules.
//!
//! A schedule is a set of entities (tasks, resources), each of which may
//! hold a value for any of a fixed set of fields:
//! * A [`catalog::FieldCatalog`] is the ordered universe of fields for one
//!   entity kind, each tagged with a [`datatype::DeclaredType`].
//! * An [`record::EntityRecord`] is one entity's sparse mapping from
//!   [`catalog::FieldId`] to [`datatype::Value`]. Absent means null.
//! * A [`record::RecordCollection`] holds the records of one catalog.
//! * A [`index::PopulatedFieldIndex`] is the set of fields holding a value in
//!   at least one record of a collection.
//! * A [`present::ValuePresenter`] renders values as text by declared type
//!   under a [`settings::Locale`].
//!
//! ## Loading and writing
//! [`reader::load_project`] reads a JSON schedule into a [`project::Project`];
//! [`writer::write_project`] writes its report in a named character set.
//! [`report`] builds the listings both the binary and the writer use.
//!
//! ## Quick Start
//! ```
//! use projfields::catalog::{EntityKind, FieldCatalog};
//! use projfields::datatype::{DeclaredType, Value};
//! use projfields::record::{EntityRecord, RecordCollection};
//! use std::sync::Arc;
//!
//! let catalog = Arc::new(
//!     FieldCatalog::builder(EntityKind::Task)
//!         .field("ID", DeclaredType::Number)
//!         .field("Name", DeclaredType::String)
//!         .field("Start", DeclaredType::Date)
//!         .identity("ID", "Name")
//!         .build()
//!         .unwrap(),
//! );
//! let record = EntityRecord::builder(&catalog)
//!     .set_by_name("ID", Value::Number(1.0)).unwrap()
//!     .set_by_name("Name", Value::String("Task A".into())).unwrap()
//!     .build();
//! let mut tasks = RecordCollection::new(Arc::clone(&catalog));
//! tasks.push(record).unwrap();
//! assert_eq!(tasks.populated_fields().len(), 2);
//! ```

pub mod catalog;
pub mod datatype;
pub mod error;
pub mod index;
pub mod present;
pub mod project;
pub mod reader;
pub mod record;
pub mod report;
pub mod settings;
pub mod writer;

pub use error::{ProjfieldsError, Result};
