use serde_json::json;
use wayfarer_llm::{Message, TokenUsage, Tool};

#[test]
fn test_message_system() {
    let msg = Message::system("You are helpful");
    assert_eq!(msg.role(), "system");
}

#[test]
fn test_message_human() {
    let msg = Message::human("Hello");
    assert_eq!(msg.role(), "user");
}

#[test]
fn test_message_ai() {
    let msg = Message::ai("Hi there!");
    assert_eq!(msg.role(), "assistant");
}

#[test]
fn test_message_image() {
    let msg = Message::image("What is in this screenshot?", "data:image/png;base64,AAAA");
    assert_eq!(msg.role(), "user");
}

#[test]
fn test_message_tool() {
    let msg = Message::tool("call_123", "click", json!({"selector": "#submit"}));
    assert_eq!(msg.role(), "tool");
}

#[test]
fn test_system_payload_shape() {
    let payload = Message::system("Instructions").to_payload();
    assert_eq!(payload["role"], "system");
    assert_eq!(payload["content"], "Instructions");
}

#[test]
fn test_human_payload_shape() {
    let payload = Message::human("Hello").to_payload();
    assert_eq!(payload["role"], "user");
    assert_eq!(payload["content"], "Hello");
}

#[test]
fn test_ai_payload_shape() {
    let payload = Message::ai("Response").to_payload();
    assert_eq!(payload["role"], "assistant");
    assert_eq!(payload["content"], "Response");
}

#[test]
fn test_image_payload_is_multipart() {
    let payload = Message::image("Describe this", "https://example.com/cat.png").to_payload();
    assert_eq!(payload["role"], "user");
    let parts = payload["content"].as_array().unwrap();
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0]["type"], "text");
    assert_eq!(parts[0]["text"], "Describe this");
    assert_eq!(parts[1]["type"], "image_url");
    assert_eq!(parts[1]["image_url"]["url"], "https://example.com/cat.png");
}

#[test]
fn test_tool_payload_shape() {
    let payload = Message::tool("call_1", "click", json!({"selector": "#btn"})).to_payload();
    assert_eq!(payload["role"], "tool");
    assert_eq!(payload["tool_call_id"], "call_1");
    assert_eq!(payload["name"], "click");
    assert_eq!(payload["content"], r##"{"selector":"#btn"}"##);
}

#[test]
fn test_payload_is_idempotent() {
    let messages = vec![
        Message::system("sys"),
        Message::human("hi"),
        Message::ai("hello"),
        Message::image("look", "https://example.com/a.png"),
        Message::tool("id", "name", json!({"k": "v"})),
    ];
    for msg in &messages {
        assert_eq!(msg.to_payload(), msg.to_payload());
    }
}

#[test]
fn test_message_serde_roundtrip() {
    let msg = Message::human("Test");
    let encoded = serde_json::to_string(&msg).unwrap();
    let decoded: Message = serde_json::from_str(&encoded).unwrap();
    assert_eq!(msg, decoded);
}

#[test]
fn test_tool_descriptor_payload() {
    let tool = Tool::new(
        "get_weather",
        "Get weather for location",
        json!({
            "type": "object",
            "properties": {
                "location": {"type": "string"}
            }
        }),
    );

    let payload = tool.to_payload();
    assert_eq!(payload["type"], "function");
    assert_eq!(payload["function"]["name"], "get_weather");
    assert_eq!(payload["function"]["description"], "Get weather for location");
    assert_eq!(payload["function"]["parameters"]["type"], "object");
}

#[test]
fn test_token_usage_equality() {
    let usage = TokenUsage {
        input: 10,
        output: 5,
        total: 15,
    };
    assert_eq!(
        usage,
        TokenUsage {
            input: 10,
            output: 5,
            total: 15
        }
    );
}
