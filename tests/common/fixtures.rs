//! Message fixtures

use chatcast::shared::Message;

/// A message from user `u1` ("Alice") with a fixed id
pub fn message(id: &str, content: &str) -> Message {
    Message::with_id(id, "u1", "Alice", content)
}

/// JSON payload as a browser would publish it
pub fn payload(id: &str, content: &str) -> String {
    serde_json::json!({
        "id": id,
        "userId": "u1",
        "username": "Alice",
        "content": content,
        "date": "2024-01-01T10:30:00.000Z",
    })
    .to_string()
}
