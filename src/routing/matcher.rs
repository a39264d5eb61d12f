//! URL template matching logic.
//!
//! # Responsibilities
//! - Compile a route's URL template into literal and parameter segments
//! - Match request path segments positionally
//! - Bind `{name}` segments to the request's literal values
//!
//! # Design Decisions
//! - Literal segments are case-sensitive
//! - `{name}` matches exactly one non-empty segment, unconditionally
//! - Segment counts must be equal; no prefix or catch-all matching
//! - No regex, O(n) in the number of segments

/// Split a path into its non-empty segments.
pub fn split_segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// One compiled template segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Param(String),
}

impl Segment {
    fn parse(raw: &str) -> Self {
        match raw.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
            Some(name) => Segment::Param(name.to_string()),
            None => Segment::Literal(raw.to_string()),
        }
    }
}

/// Parameters bound by a match, in template order.
///
/// A generated template can hold several `{id}` segments (one per nesting
/// level), so bindings are kept positionally rather than in a map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams {
    bindings: Vec<(String, String)>,
}

impl PathParams {
    /// The innermost binding for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.bindings
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.bindings.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// A compiled URL template, relative to the API prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlTemplate {
    segments: Vec<Segment>,
}

impl UrlTemplate {
    /// Compile a template. `prefix` is stripped first when the template
    /// carries it.
    pub fn compile(template: &str, prefix: &str) -> Self {
        let relative = template.strip_prefix(prefix).unwrap_or(template);
        Self {
            segments: split_segments(relative).into_iter().map(Segment::parse).collect(),
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns true if every segment fits the request path.
    pub fn matches(&self, path: &[&str]) -> bool {
        if self.segments.len() != path.len() {
            return false;
        }

        self.segments
            .iter()
            .zip(path)
            .all(|(segment, actual)| match segment {
                Segment::Param(_) => true,
                Segment::Literal(expected) => expected == actual,
            })
    }

    /// Bind each parameter segment to the path segment at its position.
    /// Callers must have checked [`UrlTemplate::matches`] first.
    pub fn extract(&self, path: &[&str]) -> PathParams {
        let bindings = self
            .segments
            .iter()
            .zip(path)
            .filter_map(|(segment, actual)| match segment {
                Segment::Param(name) => Some((name.clone(), actual.to_string())),
                Segment::Literal(_) => None,
            })
            .collect();
        PathParams { bindings }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_and_param_segments() {
        let template = UrlTemplate::compile("/api/users/{id}", "/api");
        assert_eq!(
            template.segments(),
            &[
                Segment::Literal("users".into()),
                Segment::Param("id".into())
            ]
        );

        assert!(template.matches(&["users", "42"]));
        assert!(template.matches(&["users", "abc"]));
        assert!(!template.matches(&["posts", "42"]));
        assert!(!template.matches(&["users"]));
        assert!(!template.matches(&["users", "42", "extra"]));
    }

    #[test]
    fn test_literal_match_is_case_sensitive() {
        let template = UrlTemplate::compile("/api/Users", "/api");
        assert!(template.matches(&["Users"]));
        assert!(!template.matches(&["users"]));
    }

    #[test]
    fn test_root_template() {
        let template = UrlTemplate::compile("/api", "/api");
        assert!(template.segments().is_empty());
        assert!(template.matches(&[]));
        assert!(!template.matches(&["users"]));
    }

    #[test]
    fn test_extract_keeps_every_binding() {
        let template = UrlTemplate::compile("/api/users/{id}/posts/{id}", "/api");
        let path = split_segments("/users/7/posts/3");
        assert!(template.matches(&path));

        let params = template.extract(&path);
        assert_eq!(params.len(), 2);
        assert_eq!(params.get("id"), Some("3"));
        let all: Vec<_> = params.iter().collect();
        assert_eq!(all, vec![("id", "7"), ("id", "3")]);
    }

    #[test]
    fn test_split_segments_drops_empty() {
        assert_eq!(split_segments("//users///1/"), vec!["users", "1"]);
        assert!(split_segments("").is_empty());
    }
}
