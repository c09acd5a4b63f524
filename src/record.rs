use std::cell::OnceCell;
use std::sync::Arc;

// the sparse field maps use SeaHash
use core::hash::BuildHasherDefault;
use std::collections::HashMap;
use seahash::SeaHasher;

use tracing::debug;

// our own stuff that we need
use crate::catalog::{CatalogId, FieldCatalog, FieldId};
use crate::datatype::Value;
use crate::error::{ProjfieldsError, Result};
use crate::index::PopulatedFieldIndex;

pub type FieldHasher = BuildHasherDefault<SeaHasher>;

// ------------- EntityRecord -------------
/// One entity's field values. The mapping is sparse: a field that was never
/// set is simply absent, which is the same thing as null.
#[derive(Debug, Clone)]
pub struct EntityRecord {
    catalog: CatalogId,
    values: HashMap<FieldId, Value, FieldHasher>,
    id_field: Option<FieldId>,
    name_field: Option<FieldId>,
}

impl EntityRecord {
    pub fn builder(catalog: &FieldCatalog) -> RecordBuilder<'_> {
        RecordBuilder {
            catalog,
            values: HashMap::default(),
        }
    }
    pub fn catalog(&self) -> CatalogId {
        self.catalog
    }
    /// The value held for `field`, or `None` when it is not populated.
    /// Identifiers from other catalogs are reported as not populated.
    pub fn get(&self, field: FieldId) -> Option<&Value> {
        self.values.get(&field)
    }
    pub fn id(&self) -> Option<i64> {
        match self.id_field.and_then(|f| self.values.get(&f)) {
            Some(Value::Integer(i)) => Some(*i),
            Some(Value::Number(n)) if n.is_finite() && n.fract() == 0.0 => Some(*n as i64),
            _ => None,
        }
    }
    pub fn name(&self) -> Option<&str> {
        match self.name_field.and_then(|f| self.values.get(&f)) {
            Some(Value::String(s)) => Some(s.as_str()),
            _ => None,
        }
    }
    /// Populated fields with their values, in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldId, &Value)> + '_ {
        let mut populated: Vec<(FieldId, &Value)> = self.values.iter().map(|(f, v)| (*f, v)).collect();
        populated.sort_by_key(|(f, _)| f.ordinal());
        populated.into_iter()
    }
    pub fn populated_len(&self) -> usize {
        self.values.len()
    }
}

pub struct RecordBuilder<'c> {
    catalog: &'c FieldCatalog,
    values: HashMap<FieldId, Value, FieldHasher>,
}

impl<'c> RecordBuilder<'c> {
    /// Sets `field` to `value`. The field must belong to the builder's
    /// catalog and the value must carry the field's declared type.
    pub fn set(mut self, field: FieldId, value: Value) -> Result<Self> {
        let definition = self.catalog.definition(field)?;
        if definition.declared_type() != value.declared_type() {
            return Err(ProjfieldsError::TypeMismatch {
                field: definition.name().to_owned(),
                expected: definition.declared_type(),
                found: value.declared_type(),
            });
        }
        self.values.insert(field, value);
        Ok(self)
    }
    pub fn set_by_name(self, name: &str, value: Value) -> Result<Self> {
        let field = self.catalog.field(name)?;
        self.set(field, value)
    }
    /// Sets the field to null.
    pub fn clear(mut self, field: FieldId) -> Self {
        self.values.remove(&field);
        self
    }
    pub fn build(self) -> EntityRecord {
        EntityRecord {
            catalog: self.catalog.id(),
            values: self.values,
            id_field: self.catalog.id_field(),
            name_field: self.catalog.name_field(),
        }
    }
}

// ------------- RecordCollection -------------
/// An ordered collection of records that all share one catalog.
#[derive(Debug)]
pub struct RecordCollection {
    catalog: Arc<FieldCatalog>,
    records: Vec<EntityRecord>,
    // dropped on every push, so it can never describe fewer records than are held
    populated: OnceCell<PopulatedFieldIndex>,
}

impl RecordCollection {
    pub fn new(catalog: Arc<FieldCatalog>) -> Self {
        Self {
            catalog,
            records: Vec::new(),
            populated: OnceCell::new(),
        }
    }
    pub fn catalog(&self) -> &Arc<FieldCatalog> {
        &self.catalog
    }
    pub fn push(&mut self, record: EntityRecord) -> Result<()> {
        if record.catalog() != self.catalog.id() {
            return Err(ProjfieldsError::UnknownField(format!(
                "record was built against another catalog than this {} collection",
                self.catalog.kind()
            )));
        }
        self.records.push(record);
        self.populated = OnceCell::new();
        Ok(())
    }
    pub fn records(&self) -> &[EntityRecord] {
        &self.records
    }
    pub fn iter(&self) -> std::slice::Iter<'_, EntityRecord> {
        self.records.iter()
    }
    pub fn len(&self) -> usize {
        self.records.len()
    }
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
    /// The first record with the given ID.
    pub fn find(&self, id: i64) -> Option<&EntityRecord> {
        self.records.iter().find(|r| r.id() == Some(id))
    }
    /// Fields with a value in at least one record, computed on first use.
    pub fn populated_fields(&self) -> &PopulatedFieldIndex {
        self.populated.get_or_init(|| {
            let index = PopulatedFieldIndex::compute(self);
            debug!(kind = %self.catalog.kind(), records = self.records.len(), populated = index.len(), "computed populated fields");
            index
        })
    }
}

impl<'a> IntoIterator for &'a RecordCollection {
    type Item = &'a EntityRecord;
    type IntoIter = std::slice::Iter<'a, EntityRecord>;
    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
