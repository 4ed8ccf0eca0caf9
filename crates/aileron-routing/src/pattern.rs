//! URL pattern compilation.
//!
//! A pattern string is compiled once, at route registration, into an
//! anchored regex plus an ordered parameter-name list. Matching consumes
//! the entire request path; a trailing slash on either side is tolerated.

use aileron_core::{Error, Result};

/// Maximum allowed length for a pattern string in bytes.
const MAX_PATTERN_LENGTH: usize = 1024;

/// Maximum allowed size for the compiled regex (in bytes).
const MAX_REGEX_SIZE: usize = 1 << 20; // 1 MiB

/// Capture-group name reserved for the wildcard remainder.
const SPLAT_GROUP: &str = "__splat";

/// A compiled path pattern.
///
/// Supports patterns like:
/// - `/users/` — exact match
/// - `/users/@id` — single named parameter
/// - `/users/@id:[0-9]+` — parameter with a custom capture expression
/// - `/blog(/@year(/@month))` — nested optional segments
/// - `/files/*` — wildcard capturing the rest of the path
///
/// Parameters inside an unmatched optional group bind to `None`, which is
/// distinguishable from a parameter that matched the empty string.
#[derive(Debug, Clone)]
pub struct PathPattern {
	/// The original pattern string.
	pattern: String,
	/// Compiled regex.
	regex: regex::Regex,
	/// Parameter names in declaration order.
	param_names: Vec<String>,
	/// Whether the pattern contains a wildcard segment.
	has_wildcard: bool,
}

/// The outcome of a successful match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMatch {
	/// Parameter bindings in declaration order. `None` means the
	/// parameter sat inside an optional group that did not participate
	/// in the match.
	pub params: Vec<(String, Option<String>)>,
	/// Wildcard capture, split into path segments.
	pub splat: Vec<String>,
}

impl PathMatch {
	/// Look up a bound parameter value. Returns `None` both for unknown
	/// names and for parameters that were absent from the match; inspect
	/// [`PathMatch::params`] directly when the distinction matters.
	pub fn get(&self, name: &str) -> Option<&str> {
		self.params
			.iter()
			.find(|(n, _)| n == name)
			.and_then(|(_, v)| v.as_deref())
	}
}

impl PathPattern {
	/// Compile a pattern string.
	///
	/// # Errors
	///
	/// Returns [`Error::Pattern`] if the pattern is too long, has
	/// unbalanced optional groups, declares more than one wildcard, uses
	/// an empty or parenthesized custom expression, or compiles to an
	/// invalid regex.
	///
	/// # Examples
	///
	/// ```
	/// use aileron_routing::PathPattern;
	///
	/// let pattern = PathPattern::compile("/users/@id", true).unwrap();
	/// let matched = pattern.matches("/users/42").unwrap();
	/// assert_eq!(matched.get("id"), Some("42"));
	/// assert!(pattern.matches("/users").is_none());
	/// ```
	pub fn compile(pattern: &str, case_sensitive: bool) -> Result<Self> {
		if pattern.len() > MAX_PATTERN_LENGTH {
			return Err(Error::Pattern(format!(
				"pattern length {} exceeds maximum of {} bytes",
				pattern.len(),
				MAX_PATTERN_LENGTH
			)));
		}

		let (regex_str, param_names, has_wildcard) = Self::build_regex(pattern)?;

		let regex = regex::RegexBuilder::new(&regex_str)
			.case_insensitive(!case_sensitive)
			.size_limit(MAX_REGEX_SIZE)
			.build()
			.map_err(|e| Error::Pattern(format!("`{}` failed to compile: {}", pattern, e)))?;

		Ok(Self {
			pattern: pattern.to_string(),
			regex,
			param_names,
			has_wildcard,
		})
	}

	/// Translate the pattern into a regex source string and collect
	/// parameter names in declaration order.
	fn build_regex(pattern: &str) -> Result<(String, Vec<String>, bool)> {
		let mut regex_str = String::from("^");
		let mut param_names = Vec::new();
		let mut depth = 0usize;
		let mut has_wildcard = false;
		let mut chars = pattern.chars().peekable();

		while let Some(c) = chars.next() {
			match c {
				'(' => {
					depth += 1;
					regex_str.push_str("(?:");
				}
				')' => {
					if depth == 0 {
						return Err(Error::Pattern(format!(
							"`{}` has an unmatched `)`",
							pattern
						)));
					}
					depth -= 1;
					// Optional group: the whole sub-sequence may be absent.
					regex_str.push_str(")?");
				}
				'@' => {
					let mut name = String::new();
					while let Some(&next) = chars.peek() {
						if next.is_ascii_alphanumeric() || next == '_' {
							name.push(next);
							chars.next();
						} else {
							break;
						}
					}
					if name.is_empty() {
						return Err(Error::Pattern(format!(
							"`{}` has a parameter with no name",
							pattern
						)));
					}
					if param_names.contains(&name) {
						return Err(Error::Pattern(format!(
							"`{}` declares parameter `{}` twice",
							pattern, name
						)));
					}

					if chars.peek() == Some(&':') {
						chars.next();
						if chars.peek() == Some(&'(') {
							return Err(Error::Pattern(format!(
								"`{}`: parentheses are reserved for optional groups and \
								 cannot start the expression of `@{}`",
								pattern, name
							)));
						}
						let mut expr = String::new();
						while let Some(&next) = chars.peek() {
							if next == '/' || next == '(' || next == ')' {
								break;
							}
							expr.push(next);
							chars.next();
						}
						if expr.is_empty() {
							return Err(Error::Pattern(format!(
								"`{}` has an empty expression for parameter `@{}`",
								pattern, name
							)));
						}
						regex_str.push_str(&format!("(?P<{}>{})", name, expr));
					} else {
						regex_str.push_str(&format!("(?P<{}>[^/]+)", name));
					}
					param_names.push(name);
				}
				'*' => {
					if has_wildcard {
						return Err(Error::Pattern(format!(
							"`{}` declares more than one wildcard",
							pattern
						)));
					}
					has_wildcard = true;
					if regex_str.ends_with('/') {
						// `/...​/*` also matches with the final segment list
						// empty, so `/blog/*` accepts `/blog`.
						regex_str.pop();
						regex_str.push_str(&format!("(?:/(?P<{}>.*))?", SPLAT_GROUP));
					} else {
						regex_str.push_str(&format!("(?P<{}>.*)", SPLAT_GROUP));
					}
				}
				'.' | '+' | '?' | '[' | ']' | '{' | '}' | '^' | '$' | '|' | '\\' => {
					regex_str.push('\\');
					regex_str.push(c);
				}
				_ => {
					regex_str.push(c);
				}
			}
		}

		if depth != 0 {
			return Err(Error::Pattern(format!(
				"`{}` has an unclosed `(`",
				pattern
			)));
		}

		// Tolerate a trailing slash on the request path.
		if regex_str.ends_with('/') {
			regex_str.push('?');
		} else {
			regex_str.push_str("/?");
		}
		regex_str.push('$');

		Ok((regex_str, param_names, has_wildcard))
	}

	/// The original pattern string.
	pub fn pattern(&self) -> &str {
		&self.pattern
	}

	/// Parameter names in declaration order.
	pub fn param_names(&self) -> &[String] {
		&self.param_names
	}

	/// Whether the pattern contains a wildcard segment.
	pub fn has_wildcard(&self) -> bool {
		self.has_wildcard
	}

	/// Source of the compiled regex, exposed in route-info values.
	pub fn regex_source(&self) -> &str {
		self.regex.as_str()
	}

	/// Attempt to match a request path.
	///
	/// Returns `None` when the path does not match; never an error.
	pub fn matches(&self, path: &str) -> Option<PathMatch> {
		let caps = self.regex.captures(path)?;

		let params = self
			.param_names
			.iter()
			.map(|name| {
				(
					name.clone(),
					caps.name(name).map(|m| m.as_str().to_string()),
				)
			})
			.collect();

		let splat = caps
			.name(SPLAT_GROUP)
			.map(|m| {
				m.as_str()
					.split('/')
					.filter(|s| !s.is_empty())
					.map(String::from)
					.collect()
			})
			.unwrap_or_default();

		Some(PathMatch { params, splat })
	}
}

impl std::fmt::Display for PathPattern {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.pattern)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn compile(pattern: &str) -> PathPattern {
		PathPattern::compile(pattern, true).unwrap()
	}

	#[test]
	fn test_literal_round_trip() {
		let pattern = compile("/about/team");
		let matched = pattern.matches("/about/team").unwrap();
		assert!(matched.params.is_empty());
		assert!(matched.splat.is_empty());
	}

	#[test]
	fn test_literal_rejects_other_paths() {
		let pattern = compile("/about");
		assert!(pattern.matches("/about/team").is_none());
		assert!(pattern.matches("/abou").is_none());
	}

	#[test]
	fn test_trailing_slash_tolerated() {
		let pattern = compile("/users");
		assert!(pattern.matches("/users/").is_some());
		let pattern = compile("/users/");
		assert!(pattern.matches("/users").is_some());
	}

	#[test]
	fn test_named_parameter() {
		let pattern = compile("/users/@id");
		let matched = pattern.matches("/users/42").unwrap();
		assert_eq!(matched.get("id"), Some("42"));
		assert!(pattern.matches("/users").is_none());
		assert!(pattern.matches("/users/42/posts").is_none());
	}

	#[test]
	fn test_multiple_parameters_keep_order() {
		let pattern = compile("/users/@user_id/posts/@post_id");
		let matched = pattern.matches("/users/7/posts/99").unwrap();
		assert_eq!(
			matched.params,
			vec![
				("user_id".to_string(), Some("7".to_string())),
				("post_id".to_string(), Some("99".to_string())),
			]
		);
	}

	#[test]
	fn test_custom_expression() {
		let pattern = compile("/@id:[0-9]{3}");
		assert!(pattern.matches("/123").is_some());
		assert!(pattern.matches("/12345").is_none());
		assert!(pattern.matches("/abc").is_none());
	}

	#[test]
	fn test_custom_expression_rejects_leading_group() {
		let err = PathPattern::compile("/@id:([0-9]+)", true).unwrap_err();
		assert!(matches!(err, Error::Pattern(_)));
	}

	#[test]
	fn test_custom_expression_rejects_empty() {
		let err = PathPattern::compile("/@id:/edit", true).unwrap_err();
		assert!(matches!(err, Error::Pattern(_)));
	}

	#[test]
	fn test_custom_expression_followed_by_optional_group() {
		let pattern = compile("/@id:[0-9]+(/edit)");
		assert!(pattern.matches("/42").is_some());
		assert!(pattern.matches("/42/edit").is_some());
		assert!(pattern.matches("/abc/edit").is_none());
	}

	#[test]
	fn test_nested_optional_absent_binds_none() {
		let pattern = compile("/blog(/@year(/@month))");

		let matched = pattern.matches("/blog").unwrap();
		assert_eq!(
			matched.params,
			vec![("year".to_string(), None), ("month".to_string(), None)]
		);

		let matched = pattern.matches("/blog/2012").unwrap();
		assert_eq!(
			matched.params,
			vec![
				("year".to_string(), Some("2012".to_string())),
				("month".to_string(), None),
			]
		);

		let matched = pattern.matches("/blog/2012/12").unwrap();
		assert_eq!(matched.get("month"), Some("12"));
	}

	#[test]
	fn test_unbalanced_groups_rejected() {
		assert!(PathPattern::compile("/blog(/@year", true).is_err());
		assert!(PathPattern::compile("/blog/@year)", true).is_err());
	}

	#[test]
	fn test_wildcard_captures_segments() {
		let pattern = compile("/blog/*");
		let matched = pattern.matches("/blog/2000/02/01").unwrap();
		assert_eq!(matched.splat, vec!["2000", "02", "01"]);
	}

	#[test]
	fn test_wildcard_matches_empty_remainder() {
		let pattern = compile("/blog/*");
		let matched = pattern.matches("/blog").unwrap();
		assert!(matched.splat.is_empty());
	}

	#[test]
	fn test_bare_wildcard_matches_everything() {
		let pattern = compile("*");
		assert!(pattern.matches("/").is_some());
		assert!(pattern.matches("/a/b/c").is_some());
	}

	#[test]
	fn test_second_wildcard_rejected() {
		let err = PathPattern::compile("/a/*/b/*", true).unwrap_err();
		assert!(matches!(err, Error::Pattern(_)));
	}

	#[test]
	fn test_duplicate_parameter_rejected() {
		let err = PathPattern::compile("/@id/@id", true).unwrap_err();
		assert!(matches!(err, Error::Pattern(_)));
	}

	#[test]
	fn test_case_insensitive_literals() {
		let pattern = PathPattern::compile("/About", false).unwrap();
		assert!(pattern.matches("/about").is_some());

		let pattern = PathPattern::compile("/About", true).unwrap();
		assert!(pattern.matches("/about").is_none());
	}

	#[test]
	fn test_literal_regex_chars_escaped() {
		let pattern = compile("/api/v1.0");
		assert!(pattern.matches("/api/v1.0").is_some());
		assert!(pattern.matches("/api/v1X0").is_none());
	}

	#[test]
	fn test_overlong_pattern_rejected() {
		let long = "/".to_string() + &"a".repeat(MAX_PATTERN_LENGTH + 1);
		assert!(PathPattern::compile(&long, true).is_err());
	}

	#[test]
	fn test_matched_empty_differs_from_absent() {
		let pattern = compile("/files(/@rest:.*)");
		let matched = pattern.matches("/files/").unwrap();
		// `/files/` enters the optional group with an empty capture.
		assert_eq!(matched.params, vec![("rest".to_string(), Some(String::new()))]);

		let matched = pattern.matches("/files").unwrap();
		assert_eq!(matched.params, vec![("rest".to_string(), None)]);
	}
}
