use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

// used to keep the one-to-one mapping between field names and their identifiers
use bimap::BiMap;
use lazy_static::lazy_static;

// used to print out readable forms of identifiers
use std::fmt;

// our own stuff that we need
use crate::datatype::DeclaredType;
use crate::error::{ProjfieldsError, Result};

// every catalog gets its own identity, so identifiers cannot leak between them
static NEXT_CATALOG: AtomicU32 = AtomicU32::new(1);

lazy_static! {
    static ref TASKS: Arc<FieldCatalog> =
        Arc::new(FieldCatalog::assemble(EntityKind::Task, TASK_FIELDS, Some("ID"), Some("Name")));
    static ref RESOURCES: Arc<FieldCatalog> =
        Arc::new(FieldCatalog::assemble(EntityKind::Resource, RESOURCE_FIELDS, Some("ID"), Some("Name")));
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Task,
    Resource,
    Custom,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::Resource => "resource",
            Self::Custom => "custom",
        }
    }
}
impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CatalogId(u32);

// ------------- FieldId -------------
/// Opaque identifier of a field. Only meaningful together with the catalog
/// that issued it; its ordinal is the field's position in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId {
    catalog: CatalogId,
    ordinal: u32,
}
impl FieldId {
    pub fn catalog(&self) -> CatalogId {
        self.catalog
    }
    pub fn ordinal(&self) -> u32 {
        self.ordinal
    }
}
impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}.{}", self.catalog.0, self.ordinal)
    }
}

#[derive(Debug)]
pub struct FieldDefinition {
    id: FieldId,
    name: String,
    declared_type: DeclaredType,
}
impl FieldDefinition {
    pub fn id(&self) -> FieldId {
        self.id
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn declared_type(&self) -> DeclaredType {
        self.declared_type
    }
}

// ------------- FieldCatalog -------------
/// The fixed universe of fields for one entity kind, in a stable order.
///
/// Catalogs are read-only once built. The built-in [`FieldCatalog::tasks`]
/// and [`FieldCatalog::resources`] catalogs are shared singletons; other
/// catalogs are defined with [`FieldCatalog::builder`].
#[derive(Debug)]
pub struct FieldCatalog {
    id: CatalogId,
    kind: EntityKind,
    fields: Vec<FieldDefinition>,
    names: BiMap<String, FieldId>,
    id_field: Option<FieldId>,
    name_field: Option<FieldId>,
}

impl FieldCatalog {
    pub fn builder(kind: EntityKind) -> CatalogBuilder {
        CatalogBuilder {
            kind,
            fields: Vec::new(),
            identity: None,
        }
    }
    pub fn tasks() -> Arc<FieldCatalog> {
        Arc::clone(&TASKS)
    }
    pub fn resources() -> Arc<FieldCatalog> {
        Arc::clone(&RESOURCES)
    }
    // Assumes names are unique; the builder checks that before calling.
    fn assemble(
        kind: EntityKind,
        table: &[(&str, DeclaredType)],
        id_name: Option<&str>,
        name_name: Option<&str>,
    ) -> Self {
        let id = CatalogId(NEXT_CATALOG.fetch_add(1, Ordering::Relaxed));
        let mut fields = Vec::with_capacity(table.len());
        let mut names = BiMap::new();
        for (ordinal, (name, declared_type)) in table.iter().enumerate() {
            let field = FieldId { catalog: id, ordinal: ordinal as u32 };
            names.insert(name.to_string(), field);
            fields.push(FieldDefinition {
                id: field,
                name: name.to_string(),
                declared_type: *declared_type,
            });
        }
        let id_field = id_name.and_then(|n| names.get_by_left(n).copied());
        let name_field = name_name.and_then(|n| names.get_by_left(n).copied());
        Self { id, kind, fields, names, id_field, name_field }
    }
    pub fn id(&self) -> CatalogId {
        self.id
    }
    pub fn kind(&self) -> EntityKind {
        self.kind
    }
    pub fn len(&self) -> usize {
        self.fields.len()
    }
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
    /// Every field of the catalog in catalog order. Each call starts over.
    pub fn all_fields(&self) -> impl Iterator<Item = FieldId> + '_ {
        self.fields.iter().map(|d| d.id)
    }
    pub fn definitions(&self) -> impl Iterator<Item = &FieldDefinition> + '_ {
        self.fields.iter()
    }
    pub fn contains(&self, field: FieldId) -> bool {
        field.catalog == self.id && (field.ordinal as usize) < self.fields.len()
    }
    pub fn definition(&self, field: FieldId) -> Result<&FieldDefinition> {
        if !self.contains(field) {
            return Err(self.foreign(field));
        }
        Ok(&self.fields[field.ordinal as usize])
    }
    pub fn declared_type(&self, field: FieldId) -> Result<DeclaredType> {
        Ok(self.definition(field)?.declared_type)
    }
    pub fn name(&self, field: FieldId) -> Result<&str> {
        self.names
            .get_by_right(&field)
            .map(String::as_str)
            .ok_or_else(|| self.foreign(field))
    }
    fn foreign(&self, field: FieldId) -> ProjfieldsError {
        ProjfieldsError::UnknownField(format!("{} is not a {} field", field, self.kind))
    }
    /// Looks a field up by its exact name, e.g. `"Start"` or `"% Complete"`.
    pub fn field(&self, name: &str) -> Result<FieldId> {
        self.names
            .get_by_left(name)
            .copied()
            .ok_or_else(|| ProjfieldsError::UnknownField(format!("no {} field named '{}'", self.kind, name)))
    }
    /// The field holding an entity's integer ID, if the catalog has one.
    pub fn id_field(&self) -> Option<FieldId> {
        self.id_field
    }
    /// The field holding an entity's name, if the catalog has one.
    pub fn name_field(&self) -> Option<FieldId> {
        self.name_field
    }
}

pub struct CatalogBuilder {
    kind: EntityKind,
    fields: Vec<(String, DeclaredType)>,
    identity: Option<(String, String)>,
}

impl CatalogBuilder {
    pub fn field(mut self, name: &str, declared_type: DeclaredType) -> Self {
        self.fields.push((name.to_owned(), declared_type));
        self
    }
    /// Designates the fields that identify an entity: an Integer or Number
    /// field for its ID and a String field for its name.
    pub fn identity(mut self, id_name: &str, name_name: &str) -> Self {
        self.identity = Some((id_name.to_owned(), name_name.to_owned()));
        self
    }
    pub fn build(self) -> Result<FieldCatalog> {
        for (i, (name, _)) in self.fields.iter().enumerate() {
            if self.fields[..i].iter().any(|(other, _)| other == name) {
                return Err(ProjfieldsError::Config(format!("duplicate field '{}'", name)));
            }
        }
        let table: Vec<(&str, DeclaredType)> = self
            .fields
            .iter()
            .map(|(name, declared_type)| (name.as_str(), *declared_type))
            .collect();
        let (id_name, name_name) = match &self.identity {
            Some((id_name, name_name)) => (Some(id_name.as_str()), Some(name_name.as_str())),
            None => (None, None),
        };
        let catalog = FieldCatalog::assemble(self.kind, &table, id_name, name_name);
        if let Some((id_name, name_name)) = &self.identity {
            let id_field = catalog.field(id_name)?;
            check_identity(&catalog, id_field, &[DeclaredType::Integer, DeclaredType::Number])?;
            let name_field = catalog.field(name_name)?;
            check_identity(&catalog, name_field, &[DeclaredType::String])?;
        }
        Ok(catalog)
    }
}

fn check_identity(catalog: &FieldCatalog, field: FieldId, allowed: &[DeclaredType]) -> Result<()> {
    let definition = catalog.definition(field)?;
    if allowed.contains(&definition.declared_type) {
        Ok(())
    } else {
        Err(ProjfieldsError::TypeMismatch {
            field: definition.name.clone(),
            expected: allowed[0],
            found: definition.declared_type,
        })
    }
}

// ------------- Built-in catalogs -------------
const TASK_FIELDS: &[(&str, DeclaredType)] = &[
    ("ID", DeclaredType::Integer),
    ("Unique ID", DeclaredType::Integer),
    ("Name", DeclaredType::String),
    ("WBS", DeclaredType::String),
    ("Outline Level", DeclaredType::Integer),
    ("Outline Number", DeclaredType::String),
    ("Start", DeclaredType::Date),
    ("Finish", DeclaredType::Date),
    ("Duration", DeclaredType::Duration),
    ("Work", DeclaredType::Duration),
    ("Actual Start", DeclaredType::Date),
    ("Actual Finish", DeclaredType::Date),
    ("Actual Duration", DeclaredType::Duration),
    ("Remaining Duration", DeclaredType::Duration),
    ("Cost", DeclaredType::Currency),
    ("Fixed Cost", DeclaredType::Currency),
    ("Actual Cost", DeclaredType::Currency),
    ("Remaining Cost", DeclaredType::Currency),
    ("% Complete", DeclaredType::Percentage),
    ("Physical % Complete", DeclaredType::Percentage),
    ("Milestone", DeclaredType::Boolean),
    ("Critical", DeclaredType::Boolean),
    ("Summary", DeclaredType::Boolean),
    ("Active", DeclaredType::Boolean),
    ("Priority", DeclaredType::Opaque),
    ("Constraint Type", DeclaredType::Opaque),
    ("Constraint Date", DeclaredType::Date),
    ("Deadline", DeclaredType::Date),
    ("Baseline Start", DeclaredType::Date),
    ("Baseline Finish", DeclaredType::Date),
    ("Baseline Duration", DeclaredType::Duration),
    ("Baseline Cost", DeclaredType::Currency),
    ("Free Slack", DeclaredType::Duration),
    ("Total Slack", DeclaredType::Duration),
    ("Notes", DeclaredType::String),
    ("Hyperlink", DeclaredType::String),
    ("Text1", DeclaredType::String),
    ("Text2", DeclaredType::String),
    ("Number1", DeclaredType::Number),
    ("Number2", DeclaredType::Number),
    ("Flag1", DeclaredType::Boolean),
    ("Date1", DeclaredType::Date),
    ("Cost1", DeclaredType::Currency),
];

const RESOURCE_FIELDS: &[(&str, DeclaredType)] = &[
    ("ID", DeclaredType::Integer),
    ("Unique ID", DeclaredType::Integer),
    ("Name", DeclaredType::String),
    ("Initials", DeclaredType::String),
    ("Group", DeclaredType::String),
    ("Type", DeclaredType::Opaque),
    ("Email Address", DeclaredType::String),
    ("Max Units", DeclaredType::Percentage),
    ("Standard Rate", DeclaredType::Opaque),
    ("Overtime Rate", DeclaredType::Opaque),
    ("Cost Per Use", DeclaredType::Currency),
    ("Cost", DeclaredType::Currency),
    ("Actual Cost", DeclaredType::Currency),
    ("Work", DeclaredType::Duration),
    ("Actual Work", DeclaredType::Duration),
    ("Overallocated", DeclaredType::Boolean),
    ("Notes", DeclaredType::String),
    ("Text1", DeclaredType::String),
    ("Number1", DeclaredType::Number),
];
