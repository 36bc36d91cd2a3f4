use serde::Deserialize;

/// How message bodies are interpreted before reaching the handler. Fixed per
/// consumer instance at construction, never per message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeMode {
    /// The body is passed to the handler verbatim. No parsing, no poison
    /// path: every non-empty body reaches the handler.
    Raw,

    /// The body is a notification envelope (SNS → SQS fan-out); only the
    /// inner `Message` string reaches the handler. A body that fails to
    /// parse is a poison message.
    Wrapped,
}

/// The notification wrapper placed around the real payload by SNS delivery.
/// `Timestamp` is informational and currently unused beyond parse validation.
/// Both fields default to empty: any JSON object is a valid envelope, and
/// only an unparseable body is poison.
#[derive(Debug, Deserialize)]
pub struct NotificationEnvelope {
    #[serde(rename = "Message", default)]
    pub message: String,

    #[serde(rename = "Timestamp", default)]
    pub timestamp: String,
}

/// Outcome of applying the envelope mode to one message body.
#[derive(Debug)]
pub enum Decoded {
    /// The payload to hand to the handler.
    Payload(String),

    /// Wrapped-mode body that failed to parse. Poison messages are deleted
    /// without invoking the handler so a malformed payload cannot loop
    /// through redelivery forever.
    Poison { error: String },
}

/// Applies the envelope mode to a message body.
pub fn decode(mode: EnvelopeMode, body: &str) -> Decoded {
    match mode {
        EnvelopeMode::Raw => Decoded::Payload(body.to_string()),
        EnvelopeMode::Wrapped => match serde_json::from_str::<NotificationEnvelope>(body) {
            Ok(envelope) => Decoded::Payload(envelope.message),
            Err(err) => Decoded::Poison {
                error: err.to_string(),
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_mode_passes_body_through() {
        let body = "not json at all {{";
        match decode(EnvelopeMode::Raw, body) {
            Decoded::Payload(payload) => assert_eq!(payload, body),
            Decoded::Poison { .. } => panic!("raw mode has no poison path"),
        }
    }

    #[test]
    fn wrapped_mode_extracts_inner_message() {
        let body = r#"{"Message":"order-created","Timestamp":"2024-05-01T00:00:00Z"}"#;
        match decode(EnvelopeMode::Wrapped, body) {
            Decoded::Payload(payload) => assert_eq!(payload, "order-created"),
            Decoded::Poison { .. } => panic!("valid envelope decoded as poison"),
        }
    }

    #[test]
    fn wrapped_mode_tolerates_missing_timestamp() {
        let body = r#"{"Message":"order-created"}"#;
        match decode(EnvelopeMode::Wrapped, body) {
            Decoded::Payload(payload) => assert_eq!(payload, "order-created"),
            Decoded::Poison { .. } => panic!("missing timestamp is not poison"),
        }
    }

    #[test]
    fn wrapped_mode_classifies_unparseable_body_as_poison() {
        match decode(EnvelopeMode::Wrapped, "plain text") {
            Decoded::Poison { error } => assert!(!error.is_empty()),
            Decoded::Payload(_) => panic!("unparseable body decoded as payload"),
        }
    }

    #[test]
    fn wrapped_mode_defaults_missing_message_to_empty() {
        match decode(EnvelopeMode::Wrapped, r#"{"Timestamp":"now"}"#) {
            Decoded::Payload(payload) => assert_eq!(payload, ""),
            Decoded::Poison { .. } => panic!("object without Message is not poison"),
        }
    }

    #[test]
    fn wrapped_mode_rejects_non_object_json() {
        match decode(EnvelopeMode::Wrapped, r#"[1, 2, 3]"#) {
            Decoded::Poison { .. } => {}
            Decoded::Payload(_) => panic!("array decoded as envelope"),
        }
    }
}
