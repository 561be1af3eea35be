//! Response shaping: the wire views of an AAS record and the fixed bodies of
//! the non-record endpoints.

use crate::model::{AssetAdministrationShell, AssetKind};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// Record view returned by create, get, list, and update.
#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct ShellView {
    pub id: i64,
    #[schema(example = "something_10293DWSds")]
    pub aas_id: String,
    #[schema(example = "Air_Central_023_AAS")]
    pub id_short: String,
    pub asset_kind: AssetKind,
    #[schema(example = "https://example.com/id/assets/")]
    pub global_asset_id: String,
    pub version: Option<String>,
    pub revision: Option<String>,
    pub description: Option<String>,
    pub creation_date: DateTime<Utc>,
}

impl From<AssetAdministrationShell> for ShellView {
    fn from(shell: AssetAdministrationShell) -> Self {
        ShellView {
            id: shell.id,
            aas_id: shell.aas_id,
            id_short: shell.id_short,
            asset_kind: shell.asset_kind,
            global_asset_id: shell.global_asset_id,
            version: shell.version,
            revision: shell.revision,
            description: shell.description,
            creation_date: shell.creation_date,
        }
    }
}

/// Body of `GET /aas_list`.
#[derive(Serialize, ToSchema)]
pub struct ShellListBody {
    #[serde(rename = "Asset Administration Shells")]
    pub shells: Vec<ShellView>,
}

impl ShellListBody {
    pub fn new(shells: Vec<AssetAdministrationShell>) -> Self {
        ShellListBody {
            shells: shells.into_iter().map(ShellView::from).collect(),
        }
    }
}

/// Body of a successful `DELETE /aas`.
#[derive(Serialize, ToSchema)]
pub struct DeletedBody {
    #[schema(example = "Asset Administration Shell deleted")]
    pub message: String,
    pub aas_id: String,
}

/// Body of `GET /generate_id`: the synthesized identifier in both forms.
/// `decode_aas_id` is the result of decoding `encode_aas_id` back.
#[derive(Serialize, ToSchema)]
pub struct GeneratedIdBody {
    #[schema(example = "https://example.com/ids/aas/0001_0203_4567_8901")]
    pub decode_aas_id: String,
    pub encode_aas_id: String,
}
