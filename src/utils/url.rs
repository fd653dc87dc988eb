//! Query string construction for API endpoints.

/// Percent-encode a query component (RFC 3986 unreserved characters pass through).
pub fn encode_component(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

/// Ordered `key=value` pairs rendered as `?k1=v1&k2=v2`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryString {
    pairs: Vec<(String, String)>,
}

impl QueryString {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.pairs.push((key.into(), value.to_string()));
        self
    }

    pub fn extend<'a>(mut self, pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        self.pairs
            .extend(pairs.into_iter().map(|(k, v)| (k.to_string(), v.to_string())));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Append to `path`; an empty query leaves the path untouched.
    pub fn append_to(&self, path: &str) -> String {
        if self.pairs.is_empty() {
            return path.to_string();
        }
        let query = self
            .pairs
            .iter()
            .map(|(k, v)| format!("{}={}", encode_component(k), encode_component(v)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", path, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_component() {
        assert_eq!(encode_component("abc-_.~123"), "abc-_.~123");
        assert_eq!(encode_component("a b&c=d"), "a%20b%26c%3Dd");
        assert_eq!(encode_component("São"), "S%C3%A3o");
    }

    #[test]
    fn test_query_string() {
        let q = QueryString::new().push("page", 2).push("limit", 20);
        assert_eq!(q.append_to("/admin/users"), "/admin/users?page=2&limit=20");

        let q = QueryString::new()
            .push("format", "csv")
            .extend([("role", "Student"), ("search", "dr. chen")]);
        assert_eq!(
            q.append_to("/admin/export/users"),
            "/admin/export/users?format=csv&role=Student&search=dr.%20chen"
        );

        assert_eq!(QueryString::new().append_to("/admin/courses"), "/admin/courses");
    }
}
