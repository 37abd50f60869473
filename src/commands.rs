//! Subcommand handlers for metricsctx.

use serde::Serialize;
use tracing::warn;

use metricsctx_core::{BackendCatalog, ContextRegistry};
use metricsctx_protocols::{AttributeValue, ReportingBackend};

#[derive(Debug, Serialize)]
struct AttributeRow {
    name: String,
    value: AttributeValue,
}

#[derive(Debug, Serialize)]
struct ContextRow {
    name: String,
    context: String,
    class: String,
    monitoring: bool,
}

impl ContextRow {
    fn new(name: &str, backend: &dyn ReportingBackend) -> Self {
        Self {
            name: name.to_string(),
            context: backend.context_name().to_string(),
            class: backend.class_name().to_string(),
            monitoring: backend.is_monitoring(),
        }
    }
}

/// Print all registry attributes.
pub(crate) fn list_attributes(
    registry: &ContextRegistry,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut names = registry.attribute_names();
    names.sort();

    let rows: Vec<AttributeRow> = names
        .into_iter()
        .filter_map(|name| {
            registry
                .attribute(&name)
                .map(|value| AttributeRow { name, value })
        })
        .collect();

    if rows.is_empty() {
        println!("No attributes configured.");
        return Ok(());
    }

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&rows)?),
        _ => {
            println!("{:<40} {}", "ATTRIBUTE", "VALUE");
            println!("{}", "-".repeat(80));
            for row in rows {
                let value = match row.value {
                    AttributeValue::String(s) => s,
                    other => other.to_string(),
                };
                println!("{:<40} {}", row.name, value);
            }
        }
    }
    Ok(())
}

/// Resolve each name and print the backend serving it.
///
/// Every name is attempted; the first failure is returned after the rest
/// have been printed.
pub(crate) fn resolve(
    registry: &ContextRegistry,
    names: &[String],
    context: Option<&str>,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut rows = Vec::new();
    let mut first_error = None;

    for name in names {
        let context_name = context.unwrap_or(name);
        match registry.resolve(name, context_name) {
            Ok(backend) => rows.push(ContextRow::new(name, backend.as_ref())),
            Err(e) => {
                warn!("Could not resolve {}: {}", name, e);
                first_error.get_or_insert(e);
            }
        }
    }

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&rows)?),
        _ => {
            println!("{:<20} {:<20} {:<40} {}", "NAME", "CONTEXT", "CLASS", "MONITORING");
            println!("{}", "-".repeat(90));
            for row in &rows {
                println!(
                    "{:<20} {:<20} {:<40} {}",
                    row.name, row.context, row.class, row.monitoring
                );
            }
        }
    }

    match first_error {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}

/// Print the backend classes available for `<name>.class`.
pub(crate) fn list_classes(
    catalog: &BackendCatalog,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut classes = catalog.class_names();
    classes.sort();

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&classes)?),
        _ => {
            for class in classes {
                println!("{}", class);
            }
        }
    }
    Ok(())
}
