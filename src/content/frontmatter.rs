//! Front-matter parsing

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::path::Path;

use super::error::{ContentError, Result};

/// Custom deserializer that accepts any scalar and keeps it as a string.
///
/// Authors write `date: 2024-01-15` unquoted, or `title: 2024` as a number;
/// both should load the same as their quoted forms.
fn scalar_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct Scalar;

    impl<'de> Visitor<'de> for Scalar {
        type Value = Option<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string, number or boolean")
        }

        fn visit_str<E>(self, value: &str) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_string<E>(self, value: String) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value))
        }

        fn visit_bool<E>(self, value: bool) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_i64<E>(self, value: i64) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_u64<E>(self, value: u64) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_f64<E>(self, value: f64) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_none<E>(self) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_some<D>(self, deserializer: D) -> std::result::Result<Self::Value, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_any(Scalar)
        }
    }

    deserializer.deserialize_any(Scalar)
}

/// Front-matter data from a post
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    #[serde(deserialize_with = "scalar_string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub date: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub author: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub excerpt: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub category: Option<String>,
    pub featured: Option<bool>,

    /// Additional custom fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse<'a>(content: &'a str, path: &Path) -> Result<(Self, &'a str)> {
        let content = content.trim_start();

        // YAML front-matter (---)
        if let Some((yaml, body)) = split_yaml(content, path)? {
            if yaml.trim().is_empty() {
                return Ok((FrontMatter::default(), body));
            }
            let fm = serde_yaml::from_str::<FrontMatter>(yaml)
                .map_err(|e| ContentError::front_matter(path, e.to_string()))?;
            return Ok((fm, body));
        }

        // JSON front-matter (;;; or {"key":)
        if content.starts_with(";;;") || content.starts_with('{') {
            return Self::parse_json(content, path);
        }

        // No front-matter found
        Ok((FrontMatter::default(), content))
    }

    fn parse_json<'a>(content: &'a str, path: &Path) -> Result<(Self, &'a str)> {
        // JSON front-matter ends with ;;;
        if let Some(rest) = content.strip_prefix(";;;") {
            let end_pos = rest
                .find(";;;")
                .ok_or_else(|| ContentError::front_matter(path, "unterminated `;;;` block"))?;
            let json_content = &rest[..end_pos];
            let remaining = rest[end_pos + 3..].trim_start_matches(['\n', '\r']);

            let fm: FrontMatter = serde_json::from_str(json_content)
                .map_err(|e| ContentError::front_matter(path, e.to_string()))?;

            return Ok((fm, remaining));
        }

        // Bare JSON object at the start; find the matching closing brace,
        // ignoring braces inside strings
        let mut depth = 0usize;
        let mut in_string = false;
        let mut escaped = false;
        let mut end_pos = None;
        for (i, c) in content.char_indices() {
            if in_string {
                match c {
                    _ if escaped => escaped = false,
                    '\\' => escaped = true,
                    '"' => in_string = false,
                    _ => {}
                }
                continue;
            }
            match c {
                '"' => in_string = true,
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        end_pos = Some(i + 1);
                        break;
                    }
                }
                _ => {}
            }
        }

        let end_pos =
            end_pos.ok_or_else(|| ContentError::front_matter(path, "unterminated JSON object"))?;
        let json_content = &content[..end_pos];
        let remaining = content[end_pos..].trim_start_matches(['\n', '\r']);

        let fm: FrontMatter = serde_json::from_str(json_content)
            .map_err(|e| ContentError::front_matter(path, e.to_string()))?;

        Ok((fm, remaining))
    }
}

/// Split a `---` delimited block off the start of `content`.
///
/// Returns `None` when the content does not open with a bare `---` line.
/// The closing delimiter must be a line of its own.
fn split_yaml<'a>(content: &'a str, path: &Path) -> Result<Option<(&'a str, &'a str)>> {
    let Some(rest) = content.strip_prefix("---") else {
        return Ok(None);
    };
    let (opening, block) = match rest.find('\n') {
        Some(pos) => (&rest[..pos], &rest[pos + 1..]),
        None => (rest, ""),
    };
    if !opening.trim().is_empty() {
        // `----` thematic break or `---lang` hint, not a YAML block
        return Ok(None);
    }

    let mut offset = 0;
    for line in block.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let yaml = &block[..offset];
            let body = block[offset + line.len()..].trim_start_matches(['\n', '\r']);
            return Ok(Some((yaml, body)));
        }
        offset += line.len();
    }

    Err(ContentError::front_matter(
        path,
        "front-matter block is not closed with `---`",
    ))
}
