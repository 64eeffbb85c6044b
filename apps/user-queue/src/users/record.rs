use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use tracing::error;

pub const EMAIL_DOMAIN: &str = "gmail.com";

/// A synthetic user as carried on the queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "user")]
    pub username: String,
    pub email: String,
    pub password: String,
}

impl User {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        let username = username.into();
        let email = format!("{}@{}", username, EMAIL_DOMAIN);
        Self {
            username,
            email,
            password: password.into(),
        }
    }

    /// Encodes the record as tab-indented JSON.
    pub fn to_message(&self) -> Result<Vec<u8>, SerializationError> {
        let mut body = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut body, PrettyFormatter::with_indent(b"\t"));

        self.serialize(&mut serializer).map_err(|e| {
            error!(error = %e, "Failed to serialize user record");
            SerializationError::Encode(e)
        })?;

        Ok(body)
    }

    pub fn from_message(body: &[u8]) -> Result<Self, SerializationError> {
        serde_json::from_slice(body).map_err(|e| {
            let preview: String = String::from_utf8_lossy(body).chars().take(100).collect();
            error!(
                error = %e,
                payload_preview = %preview,
                "Failed to deserialize message into a user record"
            );
            SerializationError::Decode(e)
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    #[error("Failed to encode user record: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Failed to decode user record: {0}")]
    Decode(#[source] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_is_derived_from_username() {
        let user = User::new("qwertyuiop", "abc123def4");
        assert_eq!(user.email, "qwertyuiop@gmail.com");
        assert_eq!(user.password, "abc123def4");
    }

    #[test]
    fn message_is_tab_indented_with_wire_field_names() {
        let user = User::new("qwertyuiop", "abc123def4");
        let body = String::from_utf8(user.to_message().unwrap()).unwrap();

        assert_eq!(
            body,
            "{\n\t\"user\": \"qwertyuiop\",\n\t\"email\": \"qwertyuiop@gmail.com\",\n\t\"password\": \"abc123def4\"\n}"
        );
    }

    #[test]
    fn decodes_what_it_encodes() {
        let user = User::new("zxcvbnmasd", "0a9b8c7d6e");
        let decoded = User::from_message(&user.to_message().unwrap()).unwrap();
        assert_eq!(decoded, user);
    }

    #[test]
    fn decodes_compact_json_and_ignores_extra_fields() {
        let body = br#"{"user":"abc","email":"abc@gmail.com","password":"p1","role":"admin"}"#;
        let user = User::from_message(body).unwrap();
        assert_eq!(user.username, "abc");
        assert_eq!(user.email, "abc@gmail.com");
        assert_eq!(user.password, "p1");
    }

    #[test]
    fn rejects_non_conforming_messages() {
        for body in [
            &b"not json at all"[..],
            br#"{"username":"abc","email":"abc@gmail.com","password":"p1"}"#,
            br#"{"user":"abc","email":"abc@gmail.com"}"#,
            br#"{"user":7,"email":"abc@gmail.com","password":"p1"}"#,
            br#"[]"#,
        ] {
            let err = User::from_message(body).unwrap_err();
            assert!(matches!(err, SerializationError::Decode(_)));
        }
    }
}
