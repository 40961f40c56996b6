use std::{str::FromStr, sync::Arc};

use derive_more::Deref;
use inflector::cases::pascalcase::to_pascal_case;
use serde_json::Value;
use strum_macros::{Display, EnumString};

use crate::FieldMap;

#[derive(Deref, Clone)]
#[deref(forward)]
pub struct DocumentParser(Arc<dyn IDocumentParser>);

pub trait IDocumentParser: Send + Sync {
    fn deserialize(&self, data: &str) -> eyre::Result<FieldMap>;
    fn serialize(&self, data: &FieldMap) -> eyre::Result<String>;
    fn file_extension(&self) -> &'static str;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumString, Display)]
pub enum FileFormatType {
    Json,
    Yaml,
    Toml,
}

impl FileFormatType {
    pub fn try_from_str_lowercase(s: &str) -> eyre::Result<Self> {
        Self::from_str(&to_pascal_case(s)).map_err(|_| {
            eyre::eyre!(
                "Invalid file format type specified, please select one of `toml`, `yaml`, `json`"
            )
        })
    }

    pub fn parser(self) -> DocumentParser {
        match self {
            Self::Json => JsonParser::get(),
            Self::Yaml => YamlParser::get(),
            Self::Toml => TomlParser::get(),
        }
    }
}

fn into_field_map(value: Value) -> eyre::Result<FieldMap> {
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(eyre::eyre!("document root must be a map")),
    }
}

/// TOML has no null, absent keys are read back as `None`
fn strip_nulls(data: &FieldMap) -> Value {
    fn strip(value: &Value) -> Value {
        match value {
            Value::Object(map) => Value::Object(
                map.iter()
                    .filter(|(_, v)| !v.is_null())
                    .map(|(k, v)| (k.clone(), strip(v)))
                    .collect(),
            ),
            Value::Array(items) => Value::Array(items.iter().map(strip).collect()),
            other => other.clone(),
        }
    }
    strip(&Value::Object(data.clone()))
}

macro_rules! impl_file_parser {
    ($FormatType:ident, $deserialize:expr, $serialize:expr, $file_extension:expr) => {
        pub struct $FormatType;
        impl $FormatType {
            pub fn get() -> DocumentParser {
                DocumentParser(Arc::new($FormatType {}))
            }
        }
        impl IDocumentParser for $FormatType {
            fn deserialize(&self, data: &str) -> eyre::Result<FieldMap> {
                let data: Value = $deserialize(data)?;
                into_field_map(data)
            }

            fn serialize(&self, data: &FieldMap) -> eyre::Result<String> {
                Ok($serialize(data)?)
            }

            fn file_extension(&self) -> &'static str {
                $file_extension
            }
        }
    };
}

impl_file_parser!(
    JsonParser,
    serde_json::from_str,
    serde_json::to_string_pretty,
    "json"
);

impl_file_parser!(
    TomlParser,
    toml::from_str,
    |data: &FieldMap| toml::to_string(&strip_nulls(data)),
    "toml"
);

impl_file_parser!(
    YamlParser,
    serde_yaml::from_str,
    serde_yaml::to_string,
    "yaml"
);
