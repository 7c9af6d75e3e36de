//! Structural validation for imported checklist documents. Collects every
//! violation instead of failing fast so the user sees all problems at once.

use serde_json::Value;

use sf_core::checklist::Section;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl Validation {
    fn from_errors(errors: Vec<String>) -> Self {
        Validation { valid: errors.is_empty(), errors }
    }
}

pub fn validate_checklist_json(data: &Value) -> Validation {
    let Some(map) = data.as_object() else {
        return Validation::from_errors(vec![
            "top level must be a JSON object keyed by section name".to_string(),
        ]);
    };

    let mut errors = Vec::new();
    for key in map.keys() {
        if !Section::ALL.iter().any(|s| s.as_str() == key) {
            errors.push(format!("unknown section \"{key}\""));
        }
    }
    for section in Section::ALL {
        let name = section.as_str();
        let Some(entry) = map.get(name) else {
            errors.push(format!("missing required section \"{name}\""));
            continue;
        };
        let Some(items) = entry.as_array() else {
            errors.push(format!("section \"{name}\" must be an array of items"));
            continue;
        };
        for (idx, item) in items.iter().enumerate() {
            let n = idx + 1;
            let Some(obj) = item.as_object() else {
                errors.push(format!("section \"{name}\" item {n} is not an object"));
                continue;
            };
            match obj.get("item") {
                Some(Value::String(s)) if !s.trim().is_empty() => {}
                _ => errors.push(format!(
                    "section \"{name}\" item {n}: \"item\" must be a non-empty string"
                )),
            }
            if !matches!(obj.get("checked"), Some(Value::Bool(_))) {
                errors.push(format!(
                    "section \"{name}\" item {n}: \"checked\" must be a boolean"
                ));
            }
        }
    }
    Validation::from_errors(errors)
}
