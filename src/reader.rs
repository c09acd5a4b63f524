//! Reads schedules stored as JSON.
//!
//! The file holds a `tasks` and a `resources` array. Each entity is an
//! object keyed by catalog field name:
//!
//! ```json
//! { "tasks": [ { "ID": 1, "Name": "Task A", "Start": "2024-01-05T08:00:00",
//!                "Duration": "5d", "Cost": "1234.50" } ] }
//! ```
//!
//! `null` is the same as leaving a field out.

use std::io::ErrorKind;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use serde_json::{Map, Value as Json};
use tracing::{debug, info};

use crate::catalog::FieldCatalog;
use crate::datatype::{Decimal, DeclaredType, Duration, Value};
use crate::error::{ProjfieldsError, Result};
use crate::project::Project;
use crate::record::EntityRecord;

#[derive(Deserialize)]
struct ScheduleFile {
    #[serde(default)]
    tasks: Vec<Map<String, Json>>,
    #[serde(default)]
    resources: Vec<Map<String, Json>>,
}

pub fn load_project<P: AsRef<Path>>(path: P) -> Result<Project> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ProjfieldsError::FileNotFound(path.display().to_string()),
        _ => ProjfieldsError::UnreadableFormat { message: format!("{}: {}", path.display(), e) },
    })?;
    let project = parse_project(&text)?;
    info!(
        path = %path.display(),
        tasks = project.tasks().len(),
        resources = project.resources().len(),
        "loaded project"
    );
    Ok(project)
}

/// Builds a project from the JSON text of a schedule file.
pub fn parse_project(text: &str) -> Result<Project> {
    let file: ScheduleFile = serde_json::from_str(text)?;
    let mut project = Project::new();
    for (index, entity) in file.tasks.iter().enumerate() {
        let task = read_entity(&FieldCatalog::tasks(), index, entity)?;
        project.push_task(task)?;
    }
    for (index, entity) in file.resources.iter().enumerate() {
        let resource = read_entity(&FieldCatalog::resources(), index, entity)?;
        project.push_resource(resource)?;
    }
    Ok(project)
}

fn read_entity(catalog: &FieldCatalog, index: usize, entity: &Map<String, Json>) -> Result<EntityRecord> {
    let mut builder = EntityRecord::builder(catalog);
    for (name, json) in entity {
        if json.is_null() {
            continue;
        }
        let field = catalog.field(name).map_err(|_| ProjfieldsError::UnreadableFormat {
            message: format!("{} {}: unknown field '{}'", catalog.kind(), index, name),
        })?;
        let declared_type = catalog.declared_type(field)?;
        let value = convert(declared_type, json).ok_or_else(|| ProjfieldsError::UnreadableFormat {
            message: format!(
                "{} {}: {} is not a valid {} value for '{}'",
                catalog.kind(),
                index,
                json,
                declared_type,
                name
            ),
        })?;
        builder = builder.set(field, value)?;
    }
    let record = builder.build();
    debug!(kind = %catalog.kind(), index, populated = record.populated_len(), "read entity");
    Ok(record)
}

fn convert(declared_type: DeclaredType, json: &Json) -> Option<Value> {
    match declared_type {
        DeclaredType::Date => json.as_str().and_then(parse_date).map(Value::Date),
        DeclaredType::Currency => match json {
            Json::String(s) => Decimal::from_str(s).map(Value::Currency),
            _ => json.as_f64().and_then(Value::currency),
        },
        DeclaredType::Number => json.as_f64().map(Value::Number),
        DeclaredType::Integer => json.as_i64().map(Value::Integer),
        DeclaredType::Percentage => json.as_f64().map(Value::Percentage),
        DeclaredType::String => json.as_str().map(|s| Value::String(s.to_owned())),
        DeclaredType::Boolean => json.as_bool().map(Value::Boolean),
        DeclaredType::Duration => json.as_str().and_then(Duration::from_str).map(Value::Duration),
        DeclaredType::Opaque => match json {
            Json::String(s) => Some(Value::Opaque(s.clone())),
            Json::Number(n) => Some(Value::Opaque(n.to_string())),
            Json::Bool(b) => Some(Value::Opaque(b.to_string())),
            _ => None,
        },
    }
}

// full timestamps, or plain dates taken as midnight
fn parse_date(s: &str) -> Option<NaiveDateTime> {
    s.parse::<NaiveDateTime>()
        .ok()
        .or_else(|| s.parse::<NaiveDate>().ok().and_then(|d| d.and_hms_opt(0, 0, 0)))
}
