use std::sync::Arc;

// populated fields are kept as a bitset over field ordinals
use roaring::RoaringBitmap;

// our own stuff that we need
use crate::catalog::{FieldCatalog, FieldId};
use crate::error::{ProjfieldsError, Result};
use crate::record::RecordCollection;

/// What counts as "populated" when building a [`PopulatedFieldIndex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PopulationPolicy {
    /// Any non-null value.
    #[default]
    NonNull,
    /// Non-null values that also differ from the type's default, so `false`,
    /// zero amounts and empty strings do not count.
    NonDefault,
}

/// The set of fields that hold a value in at least one record of a
/// collection. Derived, never edited directly.
///
/// The set has no order of its own; [`PopulatedFieldIndex::iter`] walks it in
/// catalog order since that is how fields are presented.
#[derive(Debug, Clone)]
pub struct PopulatedFieldIndex {
    catalog: Arc<FieldCatalog>,
    ordinals: RoaringBitmap,
}

impl PopulatedFieldIndex {
    pub fn compute(collection: &RecordCollection) -> Self {
        Self::compute_with(collection, PopulationPolicy::NonNull)
    }
    pub fn compute_with(collection: &RecordCollection, policy: PopulationPolicy) -> Self {
        let mut ordinals = RoaringBitmap::new();
        for record in collection {
            for (field, value) in record.iter() {
                if policy == PopulationPolicy::NonDefault && value.is_default() {
                    continue;
                }
                ordinals.insert(field.ordinal());
            }
        }
        Self {
            catalog: Arc::clone(collection.catalog()),
            ordinals,
        }
    }
    pub fn catalog(&self) -> &Arc<FieldCatalog> {
        &self.catalog
    }
    pub fn contains(&self, field: FieldId) -> bool {
        self.catalog.contains(field) && self.ordinals.contains(field.ordinal())
    }
    pub fn len(&self) -> usize {
        self.ordinals.len() as usize
    }
    pub fn is_empty(&self) -> bool {
        self.ordinals.is_empty()
    }
    /// Populated fields in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = FieldId> + '_ {
        self.catalog
            .all_fields()
            .filter(|field| self.ordinals.contains(field.ordinal()))
    }
    pub fn to_vec(&self) -> Vec<FieldId> {
        self.iter().collect()
    }
    /// Fields populated in either index. Both must come from the same catalog.
    pub fn union(&self, other: &PopulatedFieldIndex) -> Result<PopulatedFieldIndex> {
        if self.catalog.id() != other.catalog.id() {
            return Err(ProjfieldsError::UnknownField(format!(
                "cannot combine populated {} fields with populated {} fields of another catalog",
                self.catalog.kind(),
                other.catalog.kind()
            )));
        }
        Ok(Self {
            catalog: Arc::clone(&self.catalog),
            ordinals: &self.ordinals | &other.ordinals,
        })
    }
}
