use super::*;
use crate::error::ErrorCode;

fn response(content: Vec<ContentBlock>) -> ChatResponse {
    ChatResponse { content, model: "m".into(), stop_reason: "end_turn".into(), input_tokens: 0, output_tokens: 0 }
}

// =============================================================================
// LlmError::error_code
// =============================================================================

#[test]
fn error_codes_are_stable() {
    let cases = [
        (LlmError::ConfigParse("bad".into()), "E_CONFIG_PARSE"),
        (LlmError::MissingApiKey { var: "KEY".into() }, "E_MISSING_API_KEY"),
        (LlmError::ApiRequest("timeout".into()), "E_API_REQUEST"),
        (LlmError::ApiResponse { status: 500, body: "oops".into() }, "E_API_RESPONSE"),
        (LlmError::ApiParse("json".into()), "E_API_PARSE"),
        (LlmError::HttpClientBuild("tls".into()), "E_HTTP_CLIENT_BUILD"),
    ];
    for (err, code) in cases {
        assert_eq!(err.error_code(), code);
    }
}

// =============================================================================
// LlmError::retryable
// =============================================================================

#[test]
fn transport_and_server_errors_are_retryable() {
    assert!(LlmError::ApiRequest("conn refused".into()).retryable());
    assert!(LlmError::ApiResponse { status: 429, body: "rate limited".into() }.retryable());
    assert!(LlmError::ApiResponse { status: 503, body: "unavailable".into() }.retryable());
}

#[test]
fn client_errors_are_not_retryable() {
    assert!(!LlmError::ApiResponse { status: 400, body: "bad request".into() }.retryable());
    assert!(!LlmError::ApiResponse { status: 401, body: "unauthorized".into() }.retryable());
    assert!(!LlmError::ConfigParse("bad".into()).retryable());
    assert!(!LlmError::MissingApiKey { var: "K".into() }.retryable());
    assert!(!LlmError::ApiParse("json".into()).retryable());
}

#[test]
fn display_missing_api_key_names_the_var() {
    let err = LlmError::MissingApiKey { var: "MY_KEY".into() };
    assert!(err.to_string().contains("MY_KEY"));
}

// =============================================================================
// ContentBlock serde
// =============================================================================

#[test]
fn content_block_text_deserializes() {
    let block: ContentBlock = serde_json::from_str(r#"{"type": "text", "text": "hello"}"#).unwrap();
    assert_eq!(block, ContentBlock::Text { text: "hello".into() });
}

#[test]
fn content_block_unknown_variant() {
    let block: ContentBlock = serde_json::from_str(r#"{"type": "tool_use", "id": "x"}"#).unwrap();
    assert_eq!(block, ContentBlock::Unknown);
}

#[test]
fn thinking_block_is_unknown() {
    let block: ContentBlock = serde_json::from_str(r#"{"type": "thinking", "thinking": "hmm"}"#).unwrap();
    assert_eq!(block, ContentBlock::Unknown);
}

// =============================================================================
// ChatResponse::text
// =============================================================================

#[test]
fn text_joins_text_blocks_in_order() {
    let resp = response(vec![
        ContentBlock::Text { text: "```mermaid\n".into() },
        ContentBlock::Unknown,
        ContentBlock::Text { text: "graph TD\n```".into() },
    ]);
    assert_eq!(resp.text(), "```mermaid\ngraph TD\n```");
}

#[test]
fn text_of_empty_response_is_empty() {
    assert_eq!(response(vec![]).text(), "");
}

#[test]
fn user_message_constructor() {
    let msg = Message::user("describe a system");
    assert_eq!(msg.role, "user");
    assert_eq!(msg.content, "describe a system");
    let json = serde_json::to_value(&msg).unwrap();
    assert_eq!(json, serde_json::json!({ "role": "user", "content": "describe a system" }));
}
