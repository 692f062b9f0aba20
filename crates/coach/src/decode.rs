//! Decoding helpers for model output.
//!
//! JSON-mode calls are supposed to return one strict JSON object as the
//! message content, but models occasionally wrap it in prose or a markdown
//! fence. Direct parse is tried first; the fallback extracts the first
//! balanced `{...}` substring and parses that instead.

use serde::de::DeserializeOwned;

use crate::{Error, Result, messages::ChatResponse};

/// Parse a non-streaming response body and return the first choice's content.
pub(crate) fn message_content(body: &str) -> Result<String> {
    let response: ChatResponse =
        sonic_rs::from_str(body).map_err(|e| Error::Decode(format!("invalid completion response: {e}")))?;

    Ok(response.into_text())
}

/// Parse the message content into the expected payload type, with the
/// balanced-object extraction fallback.
pub(crate) fn json_payload<T: DeserializeOwned>(content: &str) -> Result<T> {
    match sonic_rs::from_str(content) {
        Ok(payload) => Ok(payload),
        Err(direct) => {
            let Some(object) = first_balanced_object(content) else {
                return Err(Error::Decode(format!("no JSON object in model output: {direct}")));
            };

            sonic_rs::from_str(object).map_err(|e| Error::Decode(format!("malformed JSON object in model output: {e}")))
        }
    }
}

/// The first balanced `{...}` substring, tracking strings and escapes so
/// braces inside quoted text don't confuse the depth count.
fn first_balanced_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Payload {
        items: Vec<String>,
    }

    #[test]
    fn direct_parse_wins() {
        let payload: Payload = json_payload(r#"{"items":["a","b"]}"#).unwrap();
        assert_eq!(payload.items, ["a", "b"]);
    }

    #[test]
    fn object_embedded_in_prose_parses_the_same() {
        let bare: Payload = json_payload(r#"{"items":["a","b"]}"#).unwrap();
        let wrapped: Payload =
            json_payload("Sure, here you go:\n```json\n{\"items\":[\"a\",\"b\"]}\n```\nEnjoy!").unwrap();

        assert_eq!(bare, wrapped);
    }

    #[test]
    fn braces_inside_strings_do_not_end_the_object() {
        let payload: Payload = json_payload(r#"prefix {"items":["curly } brace","\"quoted\""]} suffix"#).unwrap();
        assert_eq!(payload.items[0], "curly } brace");
    }

    #[test]
    fn nested_objects_extract_fully() {
        #[derive(Deserialize)]
        struct Outer {
            inner: Payload,
        }

        let outer: Outer = json_payload(r#"note: {"inner":{"items":["x"]}} done"#).unwrap();
        assert_eq!(outer.inner.items, ["x"]);
    }

    #[test]
    fn no_object_is_a_decode_error() {
        let result = json_payload::<Payload>("plain text only");
        assert!(matches!(result, Err(Error::Decode(_))));
    }

    #[test]
    fn unbalanced_object_is_a_decode_error() {
        let result = json_payload::<Payload>(r#"{"items":["a""#);
        assert!(matches!(result, Err(Error::Decode(_))));
    }

    #[test]
    fn response_body_content_is_extracted() {
        let content =
            message_content(r#"{"choices":[{"message":{"role":"assistant","content":"hello"}}]}"#).unwrap();
        assert_eq!(content, "hello");
    }

    #[test]
    fn invalid_response_body_is_a_decode_error() {
        assert!(matches!(message_content("not json"), Err(Error::Decode(_))));
    }
}
