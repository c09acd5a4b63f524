use crate::catalog::{FieldCatalog, FieldId};
use crate::error::Result;
use crate::record::{EntityRecord, RecordCollection};

/// A loaded schedule: its tasks and its resources, each against the
/// built-in catalog for that entity kind.
#[derive(Debug)]
pub struct Project {
    tasks: RecordCollection,
    resources: RecordCollection,
}

impl Project {
    pub fn new() -> Self {
        Self {
            tasks: RecordCollection::new(FieldCatalog::tasks()),
            resources: RecordCollection::new(FieldCatalog::resources()),
        }
    }
    pub fn tasks(&self) -> &RecordCollection {
        &self.tasks
    }
    pub fn resources(&self) -> &RecordCollection {
        &self.resources
    }
    pub fn push_task(&mut self, task: EntityRecord) -> Result<()> {
        self.tasks.push(task)
    }
    pub fn push_resource(&mut self, resource: EntityRecord) -> Result<()> {
        self.resources.push(resource)
    }
    /// Fields populated in any entity of the project, task fields first,
    /// each group in catalog order.
    pub fn populated_fields(&self) -> Vec<FieldId> {
        self.tasks
            .populated_fields()
            .iter()
            .chain(self.resources.populated_fields().iter())
            .collect()
    }
}

impl Default for Project {
    fn default() -> Self {
        Self::new()
    }
}
