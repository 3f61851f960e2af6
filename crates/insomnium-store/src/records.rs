//! Record shapes of the `insomnia.*.db` files.
//!
//! Every field is optional on the wire: a missing field or an explicit `null`
//! decodes to the field type's default value, and unknown fields are ignored.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::kind::RecordKind;

/// Common surface of every record decoded from an Insomnia database file.
pub trait Record {
    /// Kind whose database file holds this record.
    const KIND: RecordKind;

    /// The `_id` carried in the payload.
    fn id(&self) -> &str;

    /// Creation time in Unix epoch milliseconds.
    fn created(&self) -> i64;

    /// Last modification time in Unix epoch milliseconds.
    fn modified(&self) -> i64;

    fn created_at(&self) -> Option<DateTime<Utc>> {
        millis_to_datetime(self.created())
    }

    fn modified_at(&self) -> Option<DateTime<Utc>> {
        millis_to_datetime(self.modified())
    }
}

/// Convert epoch milliseconds to a UTC timestamp. Zero means "unset".
pub fn millis_to_datetime(millis: i64) -> Option<DateTime<Utc>> {
    if millis == 0 {
        return None;
    }
    Utc.timestamp_millis_opt(millis).single()
}

/// Treat a JSON `null` as the type's default value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

macro_rules! impl_record {
    ($ty:ty, $kind:expr) => {
        impl Record for $ty {
            const KIND: RecordKind = $kind;

            fn id(&self) -> &str {
                &self.id
            }

            fn created(&self) -> i64 {
                self.created
            }

            fn modified(&self) -> i64 {
                self.modified
            }
        }
    };
}

/// A record of `insomnia.Workspace.db`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Workspace {
    #[serde(rename = "_id", deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub created: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub modified: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub parent_id: String,
    /// `collection` or `design`.
    #[serde(deserialize_with = "null_as_default")]
    pub scope: String,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub record_type: String,
}

/// A record of `insomnia.RequestGroup.db` (a folder of requests).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RequestGroup {
    #[serde(rename = "_id", deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub created: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    pub environment: Value,
    pub environment_property_order: Value,
    #[serde(deserialize_with = "null_as_default")]
    pub meta_sort_key: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub modified: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub parent_id: String,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub record_type: String,
}

/// A name/value header captured on a response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseHeader {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub value: String,
}

/// A record of `insomnia.Response.db`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Response {
    #[serde(rename = "_id", deserialize_with = "null_as_default")]
    pub id: String,
    pub body_compression: Value,
    #[serde(deserialize_with = "null_as_default")]
    pub body_path: String,
    #[serde(deserialize_with = "null_as_default")]
    pub bytes_content: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub bytes_read: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub content_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub created: i64,
    /// Milliseconds.
    #[serde(deserialize_with = "null_as_default")]
    pub elapsed_time: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub environment_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub error: String,
    #[serde(deserialize_with = "null_as_default")]
    pub headers: Vec<ResponseHeader>,
    #[serde(deserialize_with = "null_as_default")]
    pub http_version: String,
    #[serde(deserialize_with = "null_as_default")]
    pub modified: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub parent_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub request_version_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub setting_send_cookies: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub setting_store_cookies: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub status_code: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub status_message: String,
    #[serde(deserialize_with = "null_as_default")]
    pub timeline_path: String,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub record_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
}

impl Response {
    /// Whether the request failed before any response was received.
    pub fn is_error(&self) -> bool {
        !self.error.is_empty()
    }
}

/// A record of `insomnia.Project.db`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Project {
    #[serde(rename = "_id", deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub created: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub modified: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    pub parent_id: Value,
    /// Set for projects synced to a remote team.
    pub remote_id: Value,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub record_type: String,
}

/// Authentication settings of a request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Authentication {
    #[serde(deserialize_with = "null_as_default")]
    pub disabled: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub password: String,
    #[serde(
        rename = "type",
        skip_serializing_if = "String::is_empty",
        deserialize_with = "null_as_default"
    )]
    pub auth_type: String,
    #[serde(rename = "useISO88591", deserialize_with = "null_as_default")]
    pub use_iso_8859_1: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub username: String,
}

/// Body of a request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RequestBody {
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub mime_type: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub text: String,
}

/// A header configured on a request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestHeader {
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub value: String,
}

/// A query parameter configured on a request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameter {
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub disabled: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub value: String,
}

/// A record of `insomnia.Request.db`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Request {
    #[serde(rename = "_id", deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub authentication: Authentication,
    #[serde(deserialize_with = "null_as_default")]
    pub body: RequestBody,
    #[serde(deserialize_with = "null_as_default")]
    pub created: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub headers: Vec<RequestHeader>,
    #[serde(deserialize_with = "null_as_default")]
    pub is_private: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub meta_sort_key: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub method: String,
    #[serde(deserialize_with = "null_as_default")]
    pub modified: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub parameters: Vec<Parameter>,
    #[serde(deserialize_with = "null_as_default")]
    pub parent_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub segment_params: Vec<Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub setting_disable_render_request_body: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub setting_encode_url: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub setting_follow_redirects: String,
    #[serde(deserialize_with = "null_as_default")]
    pub setting_rebuild_path: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub setting_send_cookies: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub setting_store_cookies: bool,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub record_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
}

impl_record!(Workspace, RecordKind::Workspace);
impl_record!(RequestGroup, RecordKind::RequestGroup);
impl_record!(Response, RecordKind::Response);
impl_record!(Project, RecordKind::Project);
impl_record!(Request, RecordKind::Request);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_insomnia_field_names() {
        let line = r#"{"_id":"req_1","type":"Request","parentId":"wrk_1","method":"POST","url":"https://api.example.com/users","authentication":{"type":"basic","username":"u","password":"p","useISO88591":true},"body":{"mimeType":"application/json","text":"{}"},"headers":[{"id":"pair_1","name":"Accept","value":"*/*"}],"settingEncodeUrl":true,"metaSortKey":-1700000000000.5,"created":1700000000000,"modified":1700000001000}"#;
        let request: Request = serde_json::from_str(line).unwrap();

        assert_eq!(request.id, "req_1");
        assert_eq!(request.record_type, "Request");
        assert_eq!(request.parent_id, "wrk_1");
        assert_eq!(request.authentication.auth_type, "basic");
        assert!(request.authentication.use_iso_8859_1);
        assert_eq!(request.body.mime_type, "application/json");
        assert_eq!(request.headers[0].name, "Accept");
        assert!(request.setting_encode_url);
        assert_eq!(request.meta_sort_key, -1700000000000.5);
    }

    #[test]
    fn missing_fields_take_zero_values_and_unknown_fields_are_ignored() {
        let project: Project =
            serde_json::from_str(r#"{"_id":"proj_1","somethingNew":[1,2,3]}"#).unwrap();

        assert_eq!(project.id, "proj_1");
        assert_eq!(project.name, "");
        assert_eq!(project.created, 0);
        assert_eq!(project.parent_id, Value::Null);
    }

    #[test]
    fn null_fields_take_zero_values() {
        let workspace: Workspace =
            serde_json::from_str(r#"{"_id":"wrk_1","parentId":null,"description":null}"#).unwrap();
        assert_eq!(workspace.id, "wrk_1");
        assert_eq!(workspace.parent_id, "");

        let group: RequestGroup = serde_json::from_str(
            r#"{"_id":"fld_1","metaSortKey":null,"environment":null,"name":null}"#,
        )
        .unwrap();
        assert_eq!(group.meta_sort_key, 0.0);
        assert_eq!(group.environment, Value::Null);

        let response: Response = serde_json::from_str(
            r#"{"_id":"res_1","environmentId":null,"requestVersionId":null,"headers":null,"statusCode":null}"#,
        )
        .unwrap();
        assert_eq!(response.environment_id, "");
        assert_eq!(response.request_version_id, "");
        assert!(response.headers.is_empty());
        assert_eq!(response.status_code, 0);

        let project: Project =
            serde_json::from_str(r#"{"_id":"proj_1","name":null,"created":null}"#).unwrap();
        assert_eq!(project.name, "");
        assert_eq!(project.created, 0);

        let request: Request = serde_json::from_str(
            r#"{"_id":"req_1","authentication":null,"body":{"mimeType":null},"headers":[{"name":"X","value":null}],"settingFollowRedirects":null}"#,
        )
        .unwrap();
        assert_eq!(request.authentication, Authentication::default());
        assert_eq!(request.body.mime_type, "");
        assert_eq!(request.headers[0].value, "");
        assert_eq!(request.setting_follow_redirects, "");
    }

    #[test]
    fn wrong_field_type_is_rejected() {
        let result = serde_json::from_str::<Workspace>(r#"{"_id":"wrk_1","created":"yesterday"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn timestamps_convert_from_epoch_millis() {
        let workspace = Workspace {
            created: 1_700_000_000_000,
            ..Default::default()
        };

        let created = workspace.created_at().unwrap();
        assert_eq!(created.to_rfc3339(), "2023-11-14T22:13:20+00:00");
        assert!(workspace.modified_at().is_none());
    }

    #[test]
    fn serialized_request_omits_empty_optional_fields() {
        let json = serde_json::to_value(Request::default()).unwrap();
        assert!(json["authentication"].get("type").is_none());
        assert!(json["body"].get("mimeType").is_none());
        assert_eq!(json["_id"], "");
    }
}
