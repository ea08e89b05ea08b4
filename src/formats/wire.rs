//! Structural transform between the nested and flattened wire shapes.
//!
//! The codec only ever reads and writes the nested shape. The flattened
//! shape is produced from it, and read back into it, by moving fields around
//! on plain JSON values:
//!
//! ```text
//! nested                                    flattened
//! { type, content: { text, spans } }   <->  { type, text, spans }
//! { type: image, content, data: {          { type: image,
//!     origin: { url, id },                    url, id,
//!     width, height,                          dimensions: { width, height },
//!     edit: { crop: { x, y }, .. },           edit: { x, y, .. },
//!     .. } }                                  .. }
//! { type: embed, content, data }        <->  { type: embed, oembed }
//! hyperlink span data { url }           <->  { url, link_type: Web }
//!   url = wio://documents/..            <->  { wioUrl, link_type: Document }
//!   url = wio://medias/..               <->  { wioUrl, link_type: Media }
//! ```
//!
//! Both directions are total: anything not listed passes through untouched,
//! and non-object input is returned as is.

use serde_json::{Map, Value};

const DOCUMENT_PREFIX: &str = "wio://documents/";
const MEDIA_PREFIX: &str = "wio://medias/";
const CROP_KEYS: [&str; 2] = ["x", "y"];

/// Flatten every block of a nested document array.
pub fn flatten(document: Value) -> Value {
    match document {
        Value::Array(blocks) => Value::Array(blocks.into_iter().map(flatten_block).collect()),
        other => other,
    }
}

/// Nest every block of a flattened document array.
pub fn nest(document: Value) -> Value {
    match document {
        Value::Array(blocks) => Value::Array(blocks.into_iter().map(nest_block).collect()),
        other => other,
    }
}

pub fn flatten_block(block: Value) -> Value {
    let Value::Object(mut block) = block else {
        return block;
    };
    let kind = block_type(&block);

    let content = block.remove("content");
    match kind.as_deref() {
        Some("image") => {
            if let Some(Value::Object(data)) = block.remove("data") {
                block.extend(flatten_image_data(data));
            }
        }
        Some("embed") => {
            if let Some(data) = block.remove("data") {
                block.insert("oembed".into(), data);
            }
        }
        _ => {
            if let Some(Value::Object(content)) = content {
                block.extend(content);
            }
        }
    }

    if let Some(Value::Array(spans)) = block.get_mut("spans") {
        for span in spans.iter_mut() {
            flatten_span(span);
        }
    }

    Value::Object(block)
}

pub fn nest_block(block: Value) -> Value {
    let Value::Object(mut block) = block else {
        return block;
    };
    let kind = block_type(&block);

    if let Some(Value::Array(spans)) = block.get_mut("spans") {
        for span in spans.iter_mut() {
            nest_span(span);
        }
    }

    match kind.as_deref() {
        Some("image") => {
            let mut nested = Map::new();
            if let Some(kind) = block.remove("type") {
                nested.insert("type".into(), kind);
            }
            nested.insert("content".into(), empty_content());
            nested.insert("data".into(), Value::Object(nest_image_data(block)));
            Value::Object(nested)
        }
        Some("embed") => {
            if let Some(data) = block.remove("oembed") {
                block.insert("data".into(), data);
            }
            block.insert("content".into(), empty_content());
            Value::Object(block)
        }
        _ => {
            let mut content = Map::new();
            for key in ["text", "spans"] {
                if let Some(value) = block.remove(key) {
                    content.insert(key.into(), value);
                }
            }
            if !content.is_empty() {
                block.insert("content".into(), Value::Object(content));
            }
            Value::Object(block)
        }
    }
}

fn block_type(block: &Map<String, Value>) -> Option<String> {
    block.get("type").and_then(Value::as_str).map(str::to_string)
}

fn empty_content() -> Value {
    let mut content = Map::new();
    content.insert("text".into(), Value::String(String::new()));
    content.insert("spans".into(), Value::Array(Vec::new()));
    Value::Object(content)
}

fn flatten_image_data(mut data: Map<String, Value>) -> Map<String, Value> {
    if let Some(Value::Object(origin)) = data.remove("origin") {
        for key in ["id", "url"] {
            if let Some(value) = origin.get(key).filter(|v| !v.is_null()) {
                data.insert(key.into(), value.clone());
            }
        }
    }

    let mut dimensions = Map::new();
    for key in ["height", "width"] {
        if let Some(value) = data.remove(key).filter(|v| !v.is_null()) {
            dimensions.insert(key.into(), value);
        }
    }
    if !dimensions.is_empty() {
        data.insert("dimensions".into(), Value::Object(dimensions));
    }

    if let Some(Value::Object(edit)) = data.get_mut("edit") {
        if let Some(Value::Object(crop)) = edit.remove("crop") {
            edit.extend(crop);
        }
    }

    data
}

fn nest_image_data(mut data: Map<String, Value>) -> Map<String, Value> {
    let mut origin = Map::new();
    for key in ["id", "url"] {
        if let Some(value) = data.remove(key) {
            origin.insert(key.into(), value);
        }
    }
    if !origin.is_empty() {
        data.insert("origin".into(), Value::Object(origin));
    }

    if let Some(Value::Object(dimensions)) = data.remove("dimensions") {
        data.extend(dimensions);
    }

    if let Some(Value::Object(edit)) = data.get_mut("edit") {
        let mut crop = Map::new();
        for key in CROP_KEYS {
            if let Some(value) = edit.remove(key) {
                crop.insert(key.into(), value);
            }
        }
        if !crop.is_empty() {
            edit.insert("crop".into(), Value::Object(crop));
        }
    }

    data
}

fn is_hyperlink(span: &Map<String, Value>) -> bool {
    span.get("type").and_then(Value::as_str) == Some("hyperlink")
}

fn flatten_span(span: &mut Value) {
    let Value::Object(span) = span else {
        return;
    };
    if !is_hyperlink(span) {
        return;
    }
    let Some(Value::Object(data)) = span.get_mut("data") else {
        return;
    };

    let url = data.remove("url");
    let link = url.as_ref().and_then(Value::as_str).unwrap_or_default();
    let (key, link_type) = if link.starts_with(DOCUMENT_PREFIX) {
        ("wioUrl", "Document")
    } else if link.starts_with(MEDIA_PREFIX) {
        ("wioUrl", "Media")
    } else {
        ("url", "Web")
    };

    if let Some(url) = url {
        data.insert(key.into(), url);
    }
    data.insert("link_type".into(), Value::String(link_type.into()));
}

fn nest_span(span: &mut Value) {
    let Value::Object(span) = span else {
        return;
    };
    if !is_hyperlink(span) {
        return;
    }
    let Some(Value::Object(data)) = span.get_mut("data") else {
        return;
    };

    data.remove("link_type");
    if let Some(url) = data.remove("wioUrl") {
        data.insert("url".into(), url);
    }
}
