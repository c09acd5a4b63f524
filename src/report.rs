//! Line-oriented listings of a schedule's fields and values.
//!
//! Every listing is a plain `Vec<String>`; printing or writing the lines is
//! left to the caller. A record is introduced by `"{id}:\t{name}"` and each
//! of its values follows as `"\t{field}:\t{text}"`.

use tracing::debug;

use crate::catalog::FieldCatalog;
use crate::error::{ProjfieldsError, Result};
use crate::present::ValuePresenter;
use crate::project::Project;
use crate::record::{EntityRecord, RecordCollection};

/// The name of every field in the catalog, in catalog order.
pub fn field_listing(catalog: &FieldCatalog) -> Vec<String> {
    catalog.definitions().map(|d| d.name().to_owned()).collect()
}

/// Every non-null value of every record in its raw textual form.
pub fn raw_listing(collection: &RecordCollection) -> Vec<String> {
    let mut lines = Vec::new();
    for record in collection {
        lines.push(header(record));
        for definition in collection.catalog().definitions() {
            if let Some(value) = record.get(definition.id()) {
                lines.push(format!("\t{}:\t{}", definition.name(), value));
            }
        }
    }
    lines
}

/// Every non-null value rendered by `presenter`. Values of types the
/// presenter has no rule for are left out.
pub fn typed_listing(collection: &RecordCollection, presenter: &ValuePresenter) -> Result<Vec<String>> {
    let catalog = collection.catalog();
    let mut lines = Vec::new();
    for record in collection {
        lines.push(header(record));
        for definition in catalog.definitions() {
            let Some(value) = record.get(definition.id()) else {
                continue;
            };
            match presenter.render_field(catalog, definition.id(), value) {
                Ok(text) => lines.push(format!("\t{}:\t{}", definition.name(), text)),
                Err(ProjfieldsError::UnsupportedPresentationType(declared_type)) => {
                    debug!(field = definition.name(), %declared_type, "no presentation rule, skipped");
                }
                Err(e) => return Err(e),
            }
        }
    }
    Ok(lines)
}

/// Values restricted to the fields populated somewhere in the collection.
/// A field populated elsewhere may still be null in a given record, in
/// which case it is skipped for that record.
pub fn populated_listing(collection: &RecordCollection) -> Vec<String> {
    let populated = collection.populated_fields();
    let mut lines = Vec::new();
    for record in collection {
        lines.push(header(record));
        for definition in collection.catalog().definitions() {
            if !populated.contains(definition.id()) {
                continue;
            }
            if let Some(value) = record.get(definition.id()) {
                lines.push(format!("\t{}:\t{}", definition.name(), value));
            }
        }
    }
    lines
}

/// All four listings for the project's tasks, separated by blank lines,
/// followed by the populated resource values when there are resources.
pub fn project_report(project: &Project, presenter: &ValuePresenter) -> Result<Vec<String>> {
    let tasks = project.tasks();
    let mut lines = field_listing(tasks.catalog());
    lines.push(String::new());
    lines.extend(raw_listing(tasks));
    lines.push(String::new());
    lines.extend(typed_listing(tasks, presenter)?);
    lines.push(String::new());
    lines.extend(populated_listing(tasks));
    if !project.resources().is_empty() {
        lines.push(String::new());
        lines.extend(populated_listing(project.resources()));
    }
    Ok(lines)
}

fn header(record: &EntityRecord) -> String {
    let id = record.id().map(|id| id.to_string()).unwrap_or_default();
    format!("{}:\t{}", id, record.name().unwrap_or_default())
}
