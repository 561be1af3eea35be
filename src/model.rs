//! Domain types: the persisted AAS entity, its enums, and the inbound forms.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Whether the described asset is a type (template) or a concrete instance.
/// Wire and storage representation is the variant name (`"Type"`/`"Instance"`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
pub enum AssetKind {
    Type,
    Instance,
}

impl Default for AssetKind {
    fn default() -> Self {
        AssetKind::Instance
    }
}

/// Selector for example-id generation: AAS identifier or asset identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ModelType {
    Aas,
    Asset,
}

impl ModelType {
    pub fn as_str(self) -> &'static str {
        match self {
            ModelType::Aas => "aas",
            ModelType::Asset => "asset",
        }
    }
}

/// One row of `asset_administration_shell`. `id` is the store-assigned
/// surrogate key (`pk_aas` column); `aas_id` is the business identifier.
#[derive(Clone, Debug, sqlx::FromRow)]
pub struct AssetAdministrationShell {
    #[sqlx(rename = "pk_aas")]
    pub id: i64,
    pub aas_id: String,
    pub id_short: String,
    pub asset_kind: AssetKind,
    pub global_asset_id: String,
    pub version: Option<String>,
    pub revision: Option<String>,
    pub description: Option<String>,
    pub creation_date: DateTime<Utc>,
}

/// Create/update request body. Every field carries a serde default so a
/// missing required field reaches the explicit validation pass (which turns
/// it into a 400) instead of a framework rejection.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, ToSchema)]
pub struct ShellForm {
    #[schema(example = "something_10293DWSds")]
    #[serde(default)]
    pub aas_id: String,
    #[schema(example = "Air_Central_023_AAS")]
    #[serde(default)]
    pub id_short: String,
    #[serde(default)]
    pub asset_kind: AssetKind,
    #[schema(example = "https://example.com/id/assets/")]
    #[serde(default)]
    pub global_asset_id: String,
    #[schema(example = "1.0")]
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub version: Option<String>,
    #[schema(example = "1.3")]
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub revision: Option<String>,
    #[schema(example = "Description or comments on the element")]
    #[serde(default)]
    pub description: Option<String>,
}

/// Update body: the regular form plus an optional replacement `aas_id`.
/// `aas_id` identifies the target record; `update_aas_id` renames it.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, ToSchema)]
pub struct ShellUpdateForm {
    #[serde(flatten)]
    pub shell: ShellForm,
    #[serde(default)]
    pub update_aas_id: Option<String>,
}

/// Accepts a JSON string or number and stores its string form; clients send
/// numeric `version`/`revision` values like `1.0`.
fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(serde_json::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected string or number, got {}",
            json_type_name(&other)
        ))),
    }
}

fn json_type_name(v: &serde_json::Value) -> &'static str {
    match v {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
