//! Pattern matching behavior through the public routing API.

use aileron_core::Callback;
use aileron_http::Request;
use aileron_routing::{PathPattern, Router};
use hyper::Method;
use serde_json::json;

fn noop() -> Callback {
	Callback::function(|_| Ok(json!(null)))
}

#[test]
fn test_anchored_matching_consumes_whole_path() {
	let pattern = PathPattern::compile("/users/@id", true).unwrap();
	assert!(pattern.matches("/users/42").is_some());
	assert!(pattern.matches("/users/42/posts").is_none());
	assert!(pattern.matches("/prefix/users/42").is_none());
}

#[test]
fn test_optional_group_chain() {
	let pattern = PathPattern::compile("/archive(/@year:[0-9]{4}(/@month:[0-9]{2}))", true).unwrap();

	let matched = pattern.matches("/archive/2024/06").unwrap();
	assert_eq!(matched.get("year"), Some("2024"));
	assert_eq!(matched.get("month"), Some("06"));

	let matched = pattern.matches("/archive/2024").unwrap();
	assert_eq!(matched.get("year"), Some("2024"));
	assert_eq!(matched.get("month"), None);

	assert!(pattern.matches("/archive/24").is_none());
}

#[test]
fn test_wildcard_and_params_combined() {
	let pattern = PathPattern::compile("/docs/@section/*", true).unwrap();
	let matched = pattern.matches("/docs/guide/install/linux").unwrap();
	assert_eq!(matched.get("section"), Some("guide"));
	assert_eq!(matched.splat, vec!["install", "linux"]);
}

#[test]
fn test_regex_source_is_exposed() {
	let pattern = PathPattern::compile("/users/@id", true).unwrap();
	let source = pattern.regex_source();
	assert!(source.starts_with('^'));
	assert!(source.ends_with('$'));
	assert!(source.contains("(?P<id>"));
}

#[test]
fn test_router_passing_over_three_routes() {
	let mut router = Router::new();
	router.register("/item/@id:[0-9]+", noop(), false).unwrap();
	router.register("/item/@slug", noop(), false).unwrap();
	router.register("/item/*", noop(), false).unwrap();

	let request = Request::get("/item/42");
	let first = router.find_next(&request).unwrap();
	assert_eq!(first.route.pattern, "/item/@id:[0-9]+");

	router.advance();
	let second = router.find_next(&request).unwrap();
	assert_eq!(second.route.pattern, "/item/@slug");

	router.advance();
	let third = router.find_next(&request).unwrap();
	assert_eq!(third.route.pattern, "/item/*");

	router.advance();
	assert!(router.find_next(&request).is_none());
}

#[test]
fn test_method_set_scanning_mid_list() {
	let mut router = Router::new();
	router.register("GET /resource", noop(), false).unwrap();
	router.register("PUT|PATCH /resource", noop(), false).unwrap();
	router.register("/resource", noop(), false).unwrap();

	let request = Request::new(Method::PATCH, "/resource");
	let matched = router.find_next(&request).unwrap();
	assert_eq!(matched.route.methods.tokens(), vec!["PUT", "PATCH"]);

	router.advance();
	let fallback = router.find_next(&request).unwrap();
	assert_eq!(fallback.route.methods.tokens(), vec!["*"]);
}

#[test]
fn test_case_insensitive_default() {
	let mut router = Router::new();
	router.register("/About/Team", noop(), false).unwrap();
	assert!(router.find_next(&Request::get("/about/team")).is_some());
}

#[test]
fn test_malformed_pattern_is_a_registration_error() {
	let mut router = Router::new();
	assert!(router.register("/broken(", noop(), false).is_err());
	assert!(router.register("/@id:([0-9])", noop(), false).is_err());
	assert!(router.routes().is_empty());
}
