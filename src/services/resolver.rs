//! Configuration resolution for `init`.
//!
//! Four sources merge into the locals map, later overriding earlier:
//! manifest defaults, an external configuration file, the questionnaire,
//! and explicit locals.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use crate::domain::{AppError, Locals, TemplateManifest, locals};
use crate::ports::QuestionnairePort;

pub fn resolve(
    manifest: &TemplateManifest,
    config_path: Option<&Path>,
    questionnaire: Option<&dyn QuestionnairePort>,
    explicit: &Locals,
) -> Result<Locals, AppError> {
    let mut resolved = manifest.config.clone();

    if let Some(path) = config_path {
        locals::merge(&mut resolved, load_config_file(path)?);
    }

    if let Some(questionnaire) = questionnaire
        && !manifest.prompts.is_empty()
    {
        let skip: BTreeSet<String> = explicit.keys().cloned().collect();
        locals::merge(&mut resolved, questionnaire.ask(&manifest.prompts, &skip)?);
    }

    locals::merge(&mut resolved, explicit.clone());
    Ok(resolved)
}

/// Parse a configuration file into a locals map by extension: YAML for
/// `.yaml`/`.yml`, TOML for `.toml`, JSON otherwise.
fn load_config_file(path: &Path) -> Result<Locals, AppError> {
    let invalid = |details: String| AppError::InvalidConfigFile {
        path: path.display().to_string(),
        details,
    };

    let content = fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let value: serde_json::Value = match extension {
        "yaml" | "yml" => serde_yaml::from_str(&content).map_err(|e| invalid(e.to_string()))?,
        "toml" => toml::from_str(&content).map_err(|e| invalid(e.to_string()))?,
        _ => serde_json::from_str(&content).map_err(|e| invalid(e.to_string()))?,
    };

    match value {
        serde_json::Value::Object(map) => Ok(map),
        _ => Err(invalid("expected a top-level mapping".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::{Value, json};
    use tempfile::TempDir;

    struct StubQuestionnaire(Locals);

    impl QuestionnairePort for StubQuestionnaire {
        fn ask(&self, _: &[crate::domain::PromptSpec], _: &BTreeSet<String>) -> Result<Locals, AppError> {
            Ok(self.0.clone())
        }
    }

    fn manifest_with(config: serde_json::Value, prompts: usize) -> TemplateManifest {
        let mut manifest = TemplateManifest::default();
        manifest.config = config.as_object().cloned().unwrap();
        for i in 0..prompts {
            manifest.prompts.push(crate::domain::PromptSpec {
                key: format!("q{i}"),
                message: String::new(),
                default: None,
            });
        }
        manifest
    }

    #[test]
    fn precedence_defaults_config_questionnaire_explicit() {
        let dir = TempDir::new().unwrap();
        let config_file = dir.path().join("conf.json");
        fs::write(&config_file, r#"{"a": 2, "b": 2}"#).unwrap();

        let manifest = manifest_with(json!({"a": 1}), 1);
        let questionnaire = StubQuestionnaire(json!({"b": 3, "c": 3}).as_object().cloned().unwrap());
        let explicit = json!({"c": 4}).as_object().cloned().unwrap();

        let resolved =
            resolve(&manifest, Some(&config_file), Some(&questionnaire), &explicit).unwrap();

        assert_eq!(resolved.get("a"), Some(&Value::Number(2.into())));
        assert_eq!(resolved.get("b"), Some(&Value::Number(3.into())));
        assert_eq!(resolved.get("c"), Some(&Value::Number(4.into())));
    }

    #[test]
    fn every_stage_is_optional() {
        let resolved = resolve(&TemplateManifest::default(), None, None, &Locals::new()).unwrap();
        assert!(resolved.is_empty());
    }

    #[test]
    fn yaml_config_file_by_extension() {
        let dir = TempDir::new().unwrap();
        let config_file = dir.path().join("conf.yaml");
        fs::write(&config_file, "foo: bar\ncount: 3\n").unwrap();

        let resolved =
            resolve(&TemplateManifest::default(), Some(&config_file), None, &Locals::new()).unwrap();
        assert_eq!(resolved.get("foo").and_then(Value::as_str), Some("bar"));
        assert_eq!(resolved.get("count").and_then(Value::as_i64), Some(3));
    }

    #[test]
    fn toml_config_file_by_extension() {
        let dir = TempDir::new().unwrap();
        let config_file = dir.path().join("conf.toml");
        fs::write(&config_file, "foo = \"bar\"\n").unwrap();

        let resolved =
            resolve(&TemplateManifest::default(), Some(&config_file), None, &Locals::new()).unwrap();
        assert_eq!(resolved.get("foo").and_then(Value::as_str), Some("bar"));
    }

    #[test]
    fn unreadable_or_invalid_config_file_fails() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.json");
        let err =
            resolve(&TemplateManifest::default(), Some(&missing), None, &Locals::new()).unwrap_err();
        assert!(matches!(err, AppError::InvalidConfigFile { .. }));

        let invalid = dir.path().join("broken.json");
        fs::write(&invalid, "{not json").unwrap();
        let err =
            resolve(&TemplateManifest::default(), Some(&invalid), None, &Locals::new()).unwrap_err();
        assert!(matches!(err, AppError::InvalidConfigFile { .. }));
    }

    #[test]
    fn questionnaire_skipped_without_prompts() {
        struct PanickingQuestionnaire;
        impl QuestionnairePort for PanickingQuestionnaire {
            fn ask(&self, _: &[crate::domain::PromptSpec], _: &BTreeSet<String>) -> Result<Locals, AppError> {
                panic!("must not be asked");
            }
        }

        let resolved =
            resolve(&TemplateManifest::default(), None, Some(&PanickingQuestionnaire), &Locals::new())
                .unwrap();
        assert!(resolved.is_empty());
    }
}
