//! Key path lookup into nested configuration records.
//!
//! Paths use dot and bracket notation: `output.path`, `module.rules[0].test`,
//! `resolve.alias["@"]`, `entry['app']`. Numeric dot segments also index
//! arrays (`plugins.0`).

use serde_json::Value;

/// One step of a key path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Object key.
    Key(String),
    /// Array index.
    Index(usize),
}

/// Split a key path into segments.
///
/// Returns `None` for an empty path or malformed brackets.
pub fn parse_path(path: &str) -> Option<Vec<Segment>> {
    let mut segments = Vec::new();
    let mut chars = path.chars().peekable();
    let mut current = String::new();

    while let Some(c) = chars.next() {
        match c {
            '.' => {
                if !current.is_empty() {
                    segments.push(Segment::Key(std::mem::take(&mut current)));
                }
            }
            '[' => {
                if !current.is_empty() {
                    segments.push(Segment::Key(std::mem::take(&mut current)));
                }
                let quote = match chars.peek() {
                    Some('"') | Some('\'') => chars.next(),
                    _ => None,
                };
                let mut inner = String::new();
                loop {
                    match chars.next() {
                        Some(q) if Some(q) == quote => {
                            if chars.next() != Some(']') {
                                return None;
                            }
                            segments.push(Segment::Key(inner));
                            break;
                        }
                        Some(']') if quote.is_none() => {
                            let trimmed = inner.trim();
                            if trimmed.is_empty() {
                                return None;
                            }
                            segments.push(match trimmed.parse::<usize>() {
                                Ok(i) => Segment::Index(i),
                                Err(_) => Segment::Key(trimmed.to_string()),
                            });
                            break;
                        }
                        Some(other) => inner.push(other),
                        None => return None,
                    }
                }
            }
            other => current.push(other),
        }
    }

    if !current.is_empty() {
        segments.push(Segment::Key(current));
    }

    if segments.is_empty() {
        None
    } else {
        Some(segments)
    }
}

/// Look up a nested value by key path.
pub fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let segments = parse_path(path)?;
    segments.iter().try_fold(value, |node, segment| match (segment, node) {
        (Segment::Key(key), Value::Object(map)) => map.get(key),
        (Segment::Key(key), Value::Array(items)) => {
            key.parse::<usize>().ok().and_then(|i| items.get(i))
        }
        (Segment::Index(i), Value::Array(items)) => items.get(*i),
        (Segment::Index(i), Value::Object(map)) => map.get(&i.to_string()),
        _ => None,
    })
}
