use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Outcome marker placed in every response envelope.
#[derive(Serialize, Deserialize, ToSchema, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StatusType {
    Success,
    Error,
}

/// A single failed validation rule.
#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq, Eq)]
pub struct FieldErrorDto {
    /// Name of the request field that failed.
    pub param: String,
    pub msg: String,
    /// Submitted value, omitted when the field was absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Envelope message: either plain text or the list of validation failures.
#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq, Eq)]
#[serde(untagged)]
pub enum StatusMessage {
    Text(String),
    Fields(Vec<FieldErrorDto>),
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq, Eq)]
pub struct StatusDto {
    #[serde(rename = "type")]
    pub kind: StatusType,
    pub message: StatusMessage,
}

/// Response envelope with the payload fields flattened next to `status`.
///
/// ```json
/// { "status": { "type": "success", "message": "success" }, "profile": { ... } }
/// ```
#[derive(Serialize, Debug)]
pub struct ApiResponse<T: Serialize> {
    pub status: StatusDto,
    #[serde(flatten)]
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            status: StatusDto {
                kind: StatusType::Success,
                message: StatusMessage::Text(message.into()),
            },
            data,
        }
    }
}

/// Envelope returned for every failed request.
#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq, Eq)]
pub struct ErrorDto {
    pub status: StatusDto,
}

impl ErrorDto {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status: StatusDto {
                kind: StatusType::Error,
                message: StatusMessage::Text(message.into()),
            },
        }
    }

    pub fn fields(errors: Vec<FieldErrorDto>) -> Self {
        Self {
            status: StatusDto {
                kind: StatusType::Error,
                message: StatusMessage::Fields(errors),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_envelope_flattens_data() {
        #[derive(Serialize)]
        struct Data {
            id: i32,
        }

        let value = serde_json::to_value(ApiResponse::success("success", Data { id: 7 })).unwrap();

        assert_eq!(
            value,
            json!({ "status": { "type": "success", "message": "success" }, "id": 7 })
        );
    }

    #[test]
    fn field_errors_serialize_as_array() {
        let dto = ErrorDto::fields(vec![FieldErrorDto {
            param: "email".to_string(),
            msg: "Email cannot be blank.".to_string(),
            value: None,
        }]);

        let value = serde_json::to_value(dto).unwrap();

        assert_eq!(
            value,
            json!({ "status": { "type": "error", "message": [
                { "param": "email", "msg": "Email cannot be blank." }
            ] } })
        );
    }
}
