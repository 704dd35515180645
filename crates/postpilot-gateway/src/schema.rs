//! Response schemas sent with structured text requests.
//!
//! Written in the OpenAPI subset `generateContent` accepts (upper-case type
//! names). Each schema mirrors one shape the pipeline parses.

use serde_json::{json, Value};

/// `{headline, body, hashtags[], cta}`: one drafted post.
#[must_use]
pub fn generated_content() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "headline": { "type": "STRING", "description": "Viral hook. Make it punchy." },
            "body": { "type": "STRING", "description": "Post content." },
            "hashtags": { "type": "ARRAY", "items": { "type": "STRING" } },
            "cta": { "type": "STRING" }
        },
        "required": ["headline", "body", "hashtags", "cta"]
    })
}

/// `{topics: [string]}`: broad industry pillars.
#[must_use]
pub fn topic_list() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "topics": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "List of 15-20 single-word or two-word high-level industry domains (e.g., 'SaaS', 'Growth Marketing')."
            }
        }
    })
}

/// List of weekly plan items.
#[must_use]
pub fn strategy_list() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "day": { "type": "STRING" },
                "topic": { "type": "STRING" },
                "tone": { "type": "STRING" },
                "format": { "type": "STRING" },
                "rationale": { "type": "STRING" },
                "newsContext": { "type": "STRING" },
                "language": { "type": "STRING", "description": "Must be 'ES' or 'EN'" }
            },
            "required": ["day", "topic", "tone", "format", "rationale", "language"]
        }
    })
}

/// List of `{title, description}` content ideas.
#[must_use]
pub fn idea_list() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "title": { "type": "STRING" },
                "description": { "type": "STRING" }
            },
            "required": ["title", "description"]
        }
    })
}
