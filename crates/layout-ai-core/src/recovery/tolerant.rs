//! Pattern-based fallback parser for text that is not valid JSON
//!
//! Pulls `id` + `position` pairs straight out of the text. Used as the last
//! resort when structural parsing cannot recover anything, so it never
//! fails: the worst case is a layout without objects.

use super::scanner::unescape;
use layout_ai_config::types::{LayoutData, LayoutObject, Vec3};
use regex::Regex;
use std::sync::OnceLock;

/// How far past an `id` the scanner looks for the object's `position`
const MAX_OBJECT_WINDOW: usize = 2048;

struct Patterns {
    game_type: Regex,
    theme: Regex,
    id: Regex,
    position: Regex,
    rotation: Regex,
    scale: Regex,
    axis: Regex,
}

impl Patterns {
    fn compile() -> Option<Self> {
        Some(Self {
            game_type: Regex::new(r#""gameType"\s*:\s*"((?:[^"\\]|\\.)*)""#).ok()?,
            theme: Regex::new(r#""theme"\s*:\s*"((?:[^"\\]|\\.)*)""#).ok()?,
            id: Regex::new(r#"\{\s*"id"\s*:\s*"((?:[^"\\]|\\.)*)""#).ok()?,
            position: Regex::new(r#""position"\s*:\s*\{([^{}]*)\}"#).ok()?,
            rotation: Regex::new(r#""(?:rotation|rotationEuler)"\s*:\s*\{([^{}]*)\}"#).ok()?,
            scale: Regex::new(r#""scale"\s*:\s*\{([^{}]*)\}"#).ok()?,
            axis: Regex::new(r#""([xyz])"\s*:\s*(-?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)"#)
                .ok()?,
        })
    }
}

fn patterns() -> Option<&'static Patterns> {
    static PATTERNS: OnceLock<Option<Patterns>> = OnceLock::new();
    PATTERNS.get_or_init(Patterns::compile).as_ref()
}

/// Extract whatever objects can be found in `text`.
///
/// Each object must start with `{ "id": "..."`; its `position` is the first
/// `"position": {...}` following the id within a bounded window, with axes
/// keyed by name in any order. `rotation` (or `rotationEuler`) and `scale`
/// are picked up from the same object when present. Objects with a blank id
/// are dropped. No count limits are applied.
pub fn parse_tolerant(text: &str) -> LayoutData {
    let mut layout = LayoutData::default();
    let Some(p) = patterns() else {
        tracing::warn!("Tolerant parser patterns failed to compile");
        return layout;
    };

    layout.game_type = capture_string(&p.game_type, text).unwrap_or_default();
    layout.theme = capture_string(&p.theme, text).unwrap_or_default();

    let mut cursor = 0;
    while let Some(id_caps) = p.id.captures_at(text, cursor) {
        let (Some(whole), Some(id_match)) = (id_caps.get(0), id_caps.get(1)) else {
            break;
        };
        let id_end = whole.end();
        let window_end = char_floor(text, id_end.saturating_add(MAX_OBJECT_WINDOW));

        let Some(pos_caps) = p.position.captures(&text[id_end..window_end]) else {
            cursor = id_end;
            continue;
        };
        let (Some(pos_whole), Some(pos_body)) = (pos_caps.get(0), pos_caps.get(1)) else {
            cursor = id_end;
            continue;
        };

        let object_end = id_end + pos_whole.end();
        cursor = object_end;

        let id = unescape(id_match.as_str());
        if id.trim().is_empty() {
            tracing::debug!("Skipping object with blank id at offset {}", whole.start());
            continue;
        }

        let extras_end = p
            .id
            .find_at(text, object_end)
            .map(|m| m.start())
            .unwrap_or(text.len())
            .min(window_end)
            .max(object_end);
        let object_text = &text[id_end..extras_end];

        let mut object = LayoutObject::new(
            id,
            parse_vector(&p.axis, pos_body.as_str()).unwrap_or_default(),
        );
        object.rotation = capture_vector(p, &p.rotation, object_text);
        object.scale = capture_vector(p, &p.scale, object_text);
        layout.objects.push(object);
    }

    tracing::debug!(
        "Tolerant parser recovered {} objects (gameType '{}')",
        layout.objects.len(),
        layout.game_type
    );
    layout
}

fn capture_string(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| unescape(m.as_str()))
}

fn capture_vector(p: &Patterns, re: &Regex, text: &str) -> Option<Vec3> {
    let caps = re.captures(text)?;
    parse_vector(&p.axis, caps.get(1)?.as_str())
}

/// Read `"x"`, `"y"` and `"z"` numbers from the body of a vector object.
/// Missing axes are 0; a body without any axis yields `None`.
fn parse_vector(axis: &Regex, body: &str) -> Option<Vec3> {
    let mut vector = Vec3::ZERO;
    let mut found = false;

    for caps in axis.captures_iter(body) {
        let (Some(name), Some(value)) = (caps.get(1), caps.get(2)) else {
            continue;
        };
        let Ok(value) = value.as_str().parse::<f32>() else {
            continue;
        };
        match name.as_str() {
            "x" => vector.x = value,
            "y" => vector.y = value,
            _ => vector.z = value,
        }
        found = true;
    }

    found.then_some(vector)
}

fn char_floor(text: &str, index: usize) -> usize {
    let mut index = index.min(text.len());
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_game_type_and_objects() {
        let text = r#"{"gameType":"td", objects: [
            {"id":"Spawner","position":{"x":0,"y":0,"z":4}}
            {"id": "Tower" , "kind": "basic", "position": { "z": -2.5, "x": 3 }}
        "#;

        let layout = parse_tolerant(text);
        assert_eq!(layout.game_type, "td");
        assert_eq!(layout.objects.len(), 2);
        assert_eq!(layout.objects[0].id, "Spawner");
        assert_eq!(layout.objects[0].position, Vec3::new(0.0, 0.0, 4.0));
        assert_eq!(layout.objects[1].id, "Tower");
        assert_eq!(layout.objects[1].position, Vec3::new(3.0, 0.0, -2.5));
    }

    #[test]
    fn test_dangling_comma_and_extra_brace() {
        let text = r#"{"gameType":"td","objects":[{"id":"A","position":{"x":1,"y":0,"z":2}},]}}"#;
        let layout = parse_tolerant(text);
        assert_eq!(layout.objects.len(), 1);
        assert_eq!(layout.objects[0].id, "A");
        assert_eq!(layout.objects[0].position, Vec3::new(1.0, 0.0, 2.0));
    }

    #[test]
    fn test_rotation_and_scale() {
        let text = r#"{"id":"Crate","position":{"x":1,"y":0,"z":1},"rotationEuler":{"x":0,"y":45,"z":0},"scale":{"x":2,"y":2,"z":2}}
                      {"id":"Rock","position":{"x":5,"y":0,"z":5}}"#;
        let layout = parse_tolerant(text);
        assert_eq!(layout.objects.len(), 2);
        assert_eq!(layout.objects[0].rotation, Some(Vec3::new(0.0, 45.0, 0.0)));
        assert_eq!(layout.objects[0].scale, Some(Vec3::new(2.0, 2.0, 2.0)));
        assert!(layout.objects[1].rotation.is_none());
        assert!(layout.objects[1].scale.is_none());
    }

    #[test]
    fn test_number_formats() {
        let text = r#"{"id":"A","position":{"x":-1.25,"y":1e1,"z":.5}}"#;
        let layout = parse_tolerant(text);
        assert_eq!(layout.objects[0].position, Vec3::new(-1.25, 10.0, 0.5));
    }

    #[test]
    fn test_blank_ids_discarded() {
        let text = r#"{"id":"  ","position":{"x":1,"y":0,"z":1}} {"id":"B","position":{"x":2,"y":0,"z":2}}"#;
        let layout = parse_tolerant(text);
        assert_eq!(layout.objects.len(), 1);
        assert_eq!(layout.objects[0].id, "B");
    }

    #[test]
    fn test_garbage_yields_empty_layout() {
        let layout = parse_tolerant("the model refused to answer");
        assert!(layout.objects.is_empty());
        assert_eq!(layout.game_type, "");
    }

    #[test]
    fn test_escaped_id_unescaped() {
        let layout = parse_tolerant(r#"{"id":"Sign \"A\"","position":{"x":0,"y":0,"z":0}}"#);
        assert_eq!(layout.objects[0].id, "Sign \"A\"");
    }
}
