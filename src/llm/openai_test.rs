use super::*;

// ===== chat completions =====

#[test]
fn cc_parse_text_response() {
    let json = serde_json::json!({
        "model": "gpt-4o",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": "```mermaid\ngraph TD\n```" },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 10, "completion_tokens": 5 }
    })
    .to_string();
    let resp = parse_chat_completions_response(&json).unwrap();
    assert_eq!(resp.content.len(), 1);
    assert_eq!(resp.text(), "```mermaid\ngraph TD\n```");
    assert_eq!(resp.model, "gpt-4o");
    assert_eq!(resp.stop_reason, "end_turn");
    assert_eq!(resp.input_tokens, 10);
    assert_eq!(resp.output_tokens, 5);
}

#[test]
fn cc_parse_length_is_max_tokens() {
    let json = serde_json::json!({
        "model": "gpt-4o",
        "choices": [{ "message": { "content": "graph TD\n    A[Sta" }, "finish_reason": "length" }]
    })
    .to_string();
    let resp = parse_chat_completions_response(&json).unwrap();
    assert_eq!(resp.stop_reason, "max_tokens");
    assert_eq!(resp.input_tokens, 0);
}

#[test]
fn cc_parse_null_content_is_empty() {
    let json = serde_json::json!({
        "model": "gpt-4o",
        "choices": [{ "message": { "role": "assistant", "content": null }, "finish_reason": "stop" }]
    })
    .to_string();
    let resp = parse_chat_completions_response(&json).unwrap();
    assert!(resp.content.is_empty());
}

#[test]
fn cc_parse_missing_choices() {
    let json = serde_json::json!({ "model": "gpt-4o", "choices": [] }).to_string();
    assert!(matches!(parse_chat_completions_response(&json), Err(LlmError::ApiParse(_))));
}

#[test]
fn cc_messages_prepend_system() {
    let messages = [Message::user("a web app")];
    let built = build_chat_completions_messages("be terse", &messages);
    let json = serde_json::to_value(&built).unwrap();
    assert_eq!(
        json,
        serde_json::json!([
            { "role": "system", "content": "be terse" },
            { "role": "user", "content": "a web app" }
        ])
    );
}

#[test]
fn cc_messages_skip_blank_system() {
    let messages = [Message::user("x")];
    assert_eq!(build_chat_completions_messages("  ", &messages).len(), 1);
}

// ===== responses API =====

#[test]
fn resp_parse_text_response() {
    let json = serde_json::json!({
        "model": "gpt-4o",
        "output": [{
            "type": "message",
            "content": [{ "type": "output_text", "text": "Done!" }]
        }],
        "usage": { "input_tokens": 15, "output_tokens": 8 }
    })
    .to_string();
    let resp = parse_responses_response(&json).unwrap();
    assert_eq!(resp.content.len(), 1);
    assert!(matches!(&resp.content[0], ContentBlock::Text { text } if text == "Done!"));
    assert_eq!(resp.stop_reason, "end_turn");
    assert_eq!(resp.input_tokens, 15);
}

#[test]
fn resp_parse_ignores_function_calls() {
    let json = serde_json::json!({
        "model": "gpt-4o",
        "output": [
            { "type": "reasoning", "summary": [] },
            { "type": "function_call", "call_id": "fc_1", "name": "x", "arguments": "{}" },
            { "type": "message", "content": [{ "type": "output_text", "text": "graph LR" }] }
        ]
    })
    .to_string();
    let resp = parse_responses_response(&json).unwrap();
    assert_eq!(resp.text(), "graph LR");
}

#[test]
fn resp_parse_output_text_fallback() {
    let json = serde_json::json!({
        "model": "gpt-4o",
        "output_text": "Fallback text",
        "usage": { "input_tokens": 5, "output_tokens": 3 }
    })
    .to_string();
    let resp = parse_responses_response(&json).unwrap();
    assert_eq!(resp.content.len(), 1);
    assert!(matches!(&resp.content[0], ContentBlock::Text { text } if text == "Fallback text"));
}

#[test]
fn resp_parse_incomplete_is_max_tokens() {
    let json = serde_json::json!({
        "model": "gpt-4o",
        "output": [],
        "incomplete_details": { "reason": "max_output_tokens" }
    })
    .to_string();
    assert_eq!(parse_responses_response(&json).unwrap().stop_reason, "max_tokens");
}

#[test]
fn resp_parse_invalid_json() {
    assert!(matches!(parse_responses_response("{"), Err(LlmError::ApiParse(_))));
}

#[test]
fn resp_input_shape() {
    let messages = [Message::user("hello")];
    let input = build_responses_input(&messages);
    let json = serde_json::to_value(&input).unwrap();
    assert_eq!(
        json,
        serde_json::json!([
            { "type": "message", "role": "user", "content": [{ "type": "input_text", "text": "hello" }] }
        ])
    );
}
