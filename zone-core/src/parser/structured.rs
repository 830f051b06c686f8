use serde::Deserialize;
use serde_yaml::Value;

use crate::model::{Alias, InitiatorEndpoint, TargetEndpoint};
use crate::warning::{Position, Warning};

use super::{checked_fields, FirstSeen, ParseError, Parsed};

/// Top-level structured document. Records stay untyped until each one is
/// converted so a single bad record cannot fail the whole document.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct Document {
    #[serde(default)]
    pub(crate) initiators: Option<Vec<Value>>,
    #[serde(default)]
    pub(crate) targets: Option<Vec<Value>>,
}

// Optional fields stay untyped so numeric scalars still read as text.
#[derive(Debug, Deserialize)]
struct InitiatorRecord {
    alias: Value,
    wwpn: Value,
    host: Option<Value>,
    fabric: Option<Value>,
    vsan_id: Option<Value>,
    description: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct TargetRecord {
    alias: Value,
    wwpn: Value,
    group: Option<Value>,
    storage_array: Option<Value>,
    port: Option<Value>,
    fabric: Option<Value>,
    vsan_id: Option<Value>,
    description: Option<Value>,
}

pub(crate) fn read_document(text: &str) -> Result<Document, ParseError> {
    if text.trim().is_empty() {
        return Ok(Document::default());
    }
    let doc: Option<Document> = serde_yaml::from_str(text)?;
    Ok(doc.unwrap_or_default())
}

/// Render a YAML scalar as text. WWPNs written without quotes may arrive as
/// numbers.
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

pub(crate) fn parse_initiators(text: &str) -> Result<Parsed<InitiatorEndpoint>, ParseError> {
    let doc = read_document(text)?;
    let mut parsed = Parsed::default();
    let mut seen = FirstSeen::default();

    for (idx, value) in doc.initiators.unwrap_or_default().into_iter().enumerate() {
        let position = Position::Record(idx + 1);
        let record: InitiatorRecord = match serde_yaml::from_value(value) {
            Ok(record) => record,
            Err(err) => {
                parsed.warnings.push(invalid_record(position, err.to_string()));
                continue;
            }
        };
        let Some((alias_raw, wwpn_raw)) = identity(&record.alias, &record.wwpn) else {
            parsed
                .warnings
                .push(invalid_record(position, "alias and wwpn must be scalars".into()));
            continue;
        };
        let Some((alias, wwpn)) =
            checked_fields(position, &alias_raw, &wwpn_raw, &mut parsed.warnings)
        else {
            continue;
        };
        if !seen.admit(position, &alias, &wwpn, &mut parsed.warnings) {
            continue;
        }
        let mut extras = Extras::new(position, &alias, &mut parsed.warnings);
        let endpoint = InitiatorEndpoint {
            host: extras.text("host", record.host),
            fabric: extras.text("fabric", record.fabric),
            vsan_id: extras.vsan(record.vsan_id),
            description: extras.text("description", record.description),
            ..InitiatorEndpoint::new(alias, wwpn)
        };
        parsed.entries.push(endpoint);
    }

    Ok(parsed)
}

pub(crate) fn parse_targets(text: &str) -> Result<Parsed<TargetEndpoint>, ParseError> {
    let doc = read_document(text)?;
    let mut parsed = Parsed::default();
    let mut seen = FirstSeen::default();

    for (idx, value) in doc.targets.unwrap_or_default().into_iter().enumerate() {
        let position = Position::Record(idx + 1);
        let record: TargetRecord = match serde_yaml::from_value(value) {
            Ok(record) => record,
            Err(err) => {
                parsed.warnings.push(invalid_record(position, err.to_string()));
                continue;
            }
        };
        let Some((alias_raw, wwpn_raw)) = identity(&record.alias, &record.wwpn) else {
            parsed
                .warnings
                .push(invalid_record(position, "alias and wwpn must be scalars".into()));
            continue;
        };
        let Some((alias, wwpn)) =
            checked_fields(position, &alias_raw, &wwpn_raw, &mut parsed.warnings)
        else {
            continue;
        };
        if !seen.admit(position, &alias, &wwpn, &mut parsed.warnings) {
            continue;
        }
        let mut extras = Extras::new(position, &alias, &mut parsed.warnings);
        let endpoint = TargetEndpoint {
            group: extras.text("group", record.group),
            storage_array: extras.text("storage_array", record.storage_array),
            port: extras.text("port", record.port),
            fabric: extras.text("fabric", record.fabric),
            vsan_id: extras.vsan(record.vsan_id),
            description: extras.text("description", record.description),
            ..TargetEndpoint::new(alias, wwpn)
        };
        parsed.entries.push(endpoint);
    }

    Ok(parsed)
}

/// Converts optional fields of one admitted record, warning about any that
/// cannot be used.
struct Extras<'a> {
    position: Position,
    alias: String,
    warnings: &'a mut Vec<Warning>,
}

impl<'a> Extras<'a> {
    fn new(position: Position, alias: &Alias, warnings: &'a mut Vec<Warning>) -> Self {
        Self {
            position,
            alias: alias.to_string(),
            warnings,
        }
    }

    fn text(&mut self, field: &str, value: Option<Value>) -> Option<String> {
        match value? {
            Value::Null => None,
            value => match scalar_text(&value) {
                Some(text) => Some(text),
                None => {
                    self.reject(field, "expected a scalar value".into());
                    None
                }
            },
        }
    }

    fn vsan(&mut self, value: Option<Value>) -> Option<u16> {
        let value = value?;
        if value.is_null() {
            return None;
        }
        let text = scalar_text(&value).unwrap_or_default();
        match text.trim().parse::<u16>() {
            Ok(vsan) => Some(vsan),
            Err(_) => {
                self.reject("vsan_id", format!("{text:?} is not a VSAN number"));
                None
            }
        }
    }

    fn reject(&mut self, field: &str, reason: String) {
        tracing::debug!(position = %self.position, field, %reason, "ignoring optional field");
        self.warnings.push(Warning::InvalidField {
            position: self.position,
            alias: self.alias.clone(),
            field: field.to_string(),
            reason,
        });
    }
}

fn identity(alias: &Value, wwpn: &Value) -> Option<(String, String)> {
    Some((scalar_text(alias)?, scalar_text(wwpn)?))
}

fn invalid_record(position: Position, reason: String) -> Warning {
    tracing::debug!(%position, %reason, "dropping structured record");
    Warning::InvalidRecord { position, reason }
}
