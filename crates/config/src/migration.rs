use super::errors::ConfigError;
use std::path::Path;
use std::sync::Arc;
use toml_edit::{Array, DocumentMut, Item, Table, Value};

/// Key names used by the JSON `ui.context` configuration this file replaces
const LEGACY_UI_KEYS: [(&str, &str); 3] = [
    ("urlContextRoot", "url_context_root"),
    ("defaultDir", "default_dir"),
    ("extensionDir", "extension_dir"),
];

/// Migrates config file to latest format if needed
pub async fn migrate_config_if_needed<P: AsRef<Path>>(
    path: P,
    events: Option<&Arc<gatehouse_events::EventBus>>,
) -> anyhow::Result<()> {
    let content = tokio::fs::read_to_string(path.as_ref())
        .await
        .map_err(ConfigError::IoError)?;
    let mut doc = content
        .parse::<DocumentMut>()
        .map_err(ConfigError::TomlEditError)?;

    let added_fields = migrate_document(&mut doc)?;

    // Only write if something changed
    if !added_fields.is_empty() {
        tokio::fs::write(path.as_ref(), doc.to_string()).await?;

        if let Some(event_bus) = events {
            event_bus.emit(gatehouse_events::AppEvent::ConfigMigrated {
                added_fields: added_fields.clone(),
            });
        }
    }

    Ok(())
}

fn migrate_document(doc: &mut DocumentMut) -> anyhow::Result<Vec<String>> {
    let mut added_fields = Vec::new();

    migrate_server_section(doc, &mut added_fields)?;
    migrate_ui_section(doc, &mut added_fields)?;

    Ok(added_fields)
}

fn migrate_server_section(
    doc: &mut DocumentMut,
    added_fields: &mut Vec<String>,
) -> anyhow::Result<()> {
    if !doc.contains_key("server") {
        let mut table = Table::new();
        table.set_implicit(true);
        doc["server"] = Item::Table(table);
        added_fields.push("server".to_string());
    }

    let server = doc["server"]
        .as_table_mut()
        .ok_or_else(|| anyhow::anyhow!("Invalid [server] section in config"))?;
    ensure_field(server, "host", Value::from("0.0.0.0"), added_fields);
    ensure_field(server, "port", Value::from(8080), added_fields);
    ensure_field(server, "tcp_nodelay", Value::from(true), added_fields);
    ensure_field(server, "timeout_secs", Value::from(60), added_fields);
    ensure_field(
        server,
        "max_concurrent_requests",
        Value::from(1000),
        added_fields,
    );
    ensure_field(
        server,
        "config_watch_debounce_ms",
        Value::from(500),
        added_fields,
    );

    Ok(())
}

fn migrate_ui_section(
    doc: &mut DocumentMut,
    added_fields: &mut Vec<String>,
) -> anyhow::Result<()> {
    if !doc.contains_key("ui") {
        let mut table = Table::new();
        table.set_implicit(true);
        doc["ui"] = Item::Table(table);
        added_fields.push("ui".to_string());
    }

    let ui = doc["ui"]
        .as_table_mut()
        .ok_or_else(|| anyhow::anyhow!("Invalid [ui] section in config"))?;

    // Rename camelCase keys, keeping the value when both spellings exist
    for (legacy, current) in LEGACY_UI_KEYS {
        if let Some(value) = ui.remove(legacy) {
            if !ui.contains_key(current) {
                ui.insert(current, value);
            }
            added_fields.push(format!("ui.{} (renamed from {})", current, legacy));
        }
    }

    ensure_field(ui, "enabled", Value::from(true), added_fields);
    ensure_field(ui, "default_document", Value::from("index.html"), added_fields);
    ensure_field(ui, "copy_chunk_size", Value::from(1024), added_fields);
    ensure_field(ui, "streaming_threshold_kb", Value::from(256), added_fields);

    if !ui.contains_key("excluded_prefixes") {
        let mut arr = Array::new();
        arr.push("/system/console");
        ui["excluded_prefixes"] = Item::Value(Value::Array(arr));
        added_fields.push("ui.excluded_prefixes".to_string());
    }

    Ok(())
}

fn ensure_field(
    table: &mut Table,
    key: &str,
    default_value: Value,
    added_fields: &mut Vec<String>,
) {
    if !table.contains_key(key) {
        table[key] = Item::Value(default_value);
        added_fields.push(key.to_string());
    }
}
