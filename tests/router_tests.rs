//! Router behaviour, run against both encodings.

use dfa_router::{Error, RouteInput, VarValue, Variables};
use url::Url;

mod common;
use common::{sample_router, single_router, ENGINES};

fn url(s: &str) -> Url {
    Url::parse(s).unwrap()
}

#[test]
fn test_non_string_inputs_are_rejected() {
    for value in [
        serde_json::json!(null),
        serde_json::json!(123),
        serde_json::json!({}),
        serde_json::json!([]),
        serde_json::json!({ "pathname": "/" }),
    ] {
        assert!(matches!(RouteInput::try_from(&value), Err(Error::Input(_))), "{value}");
    }

    let router = sample_router(false);
    let value = serde_json::json!("/foo");
    let input = RouteInput::try_from(&value).unwrap();
    assert_eq!(router.route(input), Some(&2));
}

#[test]
fn test_returns_matching_value() {
    for (name, compress) in ENGINES {
        let router = sample_router(compress);
        assert_eq!(router.route("/"), Some(&1), "{name}");
        assert_eq!(router.route("/foo"), Some(&2), "{name}");
        assert_eq!(router.route(&url("http://test/foo/bar")), Some(&3), "{name}");
        assert_eq!(router.route(&url("http://test/foo/bar/baz?lol")), Some(&4), "{name}");
    }
}

#[test]
fn test_returns_none_without_match() {
    for (name, compress) in ENGINES {
        let router = sample_router(compress);
        assert_eq!(router.route("/FOO"), None, "{name}");
        assert_eq!(router.route("/foo/barz"), None, "{name}");
        assert_eq!(router.route(&url("http://test/foo/barz")), None, "{name}");
    }
}

#[test]
fn test_opaque_paths_never_match() {
    for (name, compress) in ENGINES {
        let router = sample_router(compress);
        assert_eq!(router.route("mailto:foobarbaz"), None, "{name}");
        assert_eq!(router.route(&url("mailto:foobarbaz")), None, "{name}");
    }
}

#[test]
fn test_empty_segments_and_trailing_slashes_never_match() {
    for (name, compress) in ENGINES {
        let router = sample_router(compress);
        for path in ["/foo/", "/foo/bar/baz/", "/foo//bar/baz"] {
            assert_eq!(router.route(path), None, "{name} {path}");
        }
        for raw in [
            "http://test//foo/bar/baz",
            "http://test//",
            "http://test//BAR/",
            "http://test//BAR/x",
            "http://test/x/BAR/",
        ] {
            assert_eq!(router.route(&url(raw)), None, "{name} {raw}");
        }
    }
}

#[test]
fn test_percent_encodings_are_normalized() {
    for (name, compress) in ENGINES {
        let router = sample_router(compress);
        assert_eq!(router.route("/fo%6f"), Some(&2), "{name}");
        assert_eq!(router.route("/fo%6F"), Some(&2), "{name}");
        assert_eq!(router.route("/enc%6fded&"), Some(&9), "{name}");
        assert_eq!(router.route("/enc%6fded%26"), Some(&9), "{name}");
        assert_eq!(router.route("/encoded%26"), Some(&9), "{name}");
        assert_eq!(router.route("/encoded&"), Some(&9), "{name}");
        assert_eq!(router.route("/%00weird%2f"), Some(&10), "{name}");
        assert_eq!(router.route("/\u{0}weird%2f"), Some(&10), "{name}");
        assert_eq!(router.route("/\u{0}weird/"), None, "{name}");
    }
}

#[test]
fn test_undecodable_paths_do_not_match() {
    for (name, compress) in ENGINES {
        let router = single_router("/{x}", compress);
        assert_eq!(router.route("/%FF"), None, "{name}");
        assert_eq!(router.route("/%C3%A9"), Some(&-1), "{name}");
    }
}

#[test]
fn test_variable_segments_need_a_character() {
    for (name, compress) in ENGINES {
        let router = sample_router(compress);
        assert_eq!(router.route("/123/BAR/456"), Some(&5), "{name}");
        assert_eq!(router.route("/1/BAR/23"), Some(&5), "{name}");
        assert_eq!(router.route("//BAR/23"), None, "{name}");
        assert_eq!(router.route("/1/BAR/"), None, "{name}");
    }
}

#[test]
fn test_quantified_variables_match_non_empty_segments() {
    for (name, compress) in ENGINES {
        let router = sample_router(compress);
        for prefix in ["/x/a", "/x/b"] {
            let expected = if prefix == "/x/a" { 6 } else { 7 };
            for tail in ["/123/456", "/1/2/3/4/5/6", "/0"] {
                let path = format!("{prefix}{tail}");
                assert_eq!(router.route(&path), Some(&expected), "{name} {path}");
            }
            for tail in ["/", "/1/", "/1//2", "/1/2//3", "/1/2/3/", "//1/2"] {
                let path = format!("{prefix}{tail}");
                assert_eq!(router.route(&path), None, "{name} {path}");
            }
        }
    }
}

#[test]
fn test_star_variable_may_be_omitted() {
    for (name, compress) in ENGINES {
        assert_eq!(sample_router(compress).route("/x/a"), Some(&6), "{name}");

        let router = single_router("/{var}*", compress);
        assert_eq!(router.route("/1"), Some(&-1), "{name}");
        assert_eq!(router.route("/1/2/3"), Some(&-1), "{name}");
        assert_eq!(router.route("/"), Some(&-1), "{name}");
        assert_eq!(router.route("/1/"), None, "{name}");
        assert_eq!(router.route("/1//2"), None, "{name}");
        assert_eq!(router.route(&url("http://test//")), None, "{name}");
        assert_eq!(router.route(&url("http://test//1")), None, "{name}");
    }
}

#[test]
fn test_plus_variable_may_not_be_omitted() {
    for (name, compress) in ENGINES {
        assert_eq!(sample_router(compress).route("/x/b"), None, "{name}");

        let router = single_router("/{var}+", compress);
        assert_eq!(router.route("/1"), Some(&-1), "{name}");
        assert_eq!(router.route("/1/2/3"), Some(&-1), "{name}");
        assert_eq!(router.route("/"), None, "{name}");
        assert_eq!(router.route("/1/"), None, "{name}");
        assert_eq!(router.route("/1//2"), None, "{name}");
        assert_eq!(router.route(&url("http://test//")), None, "{name}");
        assert_eq!(router.route(&url("http://test//1")), None, "{name}");
    }
}

#[test]
fn test_variable_values() {
    for (name, compress) in ENGINES {
        let router = sample_router(compress);

        let mut vars = Variables::new();
        assert_eq!(router.route_with("/123/BAR/456", &mut vars), Some(&5), "{name}");
        assert_eq!(vars.len(), 2);
        assert_eq!(vars["var1"], VarValue::from("123"));
        assert_eq!(vars["var2"], VarValue::from("456"));

        let mut vars = Variables::new();
        assert_eq!(router.route_with("/1/BAR/23", &mut vars), Some(&5), "{name}");
        assert_eq!(vars["var1"].as_str(), Some("1"));
        assert_eq!(vars["var2"].as_str(), Some("23"));

        let mut vars = Variables::new();
        assert_eq!(router.route_with("//BAR/23", &mut vars), None, "{name}");
        assert!(vars.is_empty());

        let mut vars = Variables::new();
        assert_eq!(router.route_with("/foo", &mut vars), Some(&2), "{name}");
        assert!(vars.is_empty());
    }
}

#[test]
fn test_quantified_variable_values() {
    for (name, compress) in ENGINES {
        let router = sample_router(compress);
        let cases: [(&str, i32, &str, Vec<&str>); 5] = [
            ("/x/a/123", 6, "optionalPath", vec!["123"]),
            ("/x/a/123/456/789", 6, "optionalPath", vec!["123", "456", "789"]),
            ("/x/a", 6, "optionalPath", vec![]),
            ("/x/b/123", 7, "requiredPath", vec!["123"]),
            ("/x/b/123/456/789", 7, "requiredPath", vec!["123", "456", "789"]),
        ];
        for (path, route, var, expected) in cases {
            let mut vars = Variables::new();
            assert_eq!(router.route_with(path, &mut vars), Some(&route), "{name} {path}");
            assert_eq!(vars.len(), 1);
            assert_eq!(vars[var], VarValue::from(expected), "{name} {path}");
        }

        let router = single_router("/{foobar}*", compress);
        let mut vars = Variables::new();
        assert_eq!(router.route_with("/", &mut vars), Some(&-1), "{name}");
        assert_eq!(vars["foobar"], VarValue::Multi(vec![]));
    }
}

#[test]
fn test_variable_values_are_decoded() {
    for (name, compress) in ENGINES {
        let router = sample_router(compress);
        let mut vars = Variables::new();
        assert_eq!(router.route_with("/a%20b/BAR/%C3%A9", &mut vars), Some(&5), "{name}");
        assert_eq!(vars["var1"].as_str(), Some("a b"));
        assert_eq!(vars["var2"].as_str(), Some("é"));

        let mut vars = Variables::new();
        assert_eq!(router.route_with("/x/b/a%2Fb/c", &mut vars), Some(&7), "{name}");
        assert_eq!(vars["requiredPath"].as_slice().map(<[String]>::len), Some(2));
        assert_eq!(vars["requiredPath"], VarValue::from(vec!["a/b", "c"]));
    }
}

#[test]
fn test_literal_routes_treat_special_characters_literally() {
    for (name, compress) in ENGINES {
        let router = sample_router(compress);
        assert_eq!(router.route("/x/%2562/%7BrequiredPath%7D%2B"), Some(&8), "{name}");
        assert_eq!(router.route("/x/%2562/%7BrequiredPath%7D+"), Some(&8), "{name}");
        assert_eq!(router.route("/x/%62/anything"), Some(&7), "{name}");
    }
}

#[test]
fn test_empty_router_never_matches() {
    for (name, compress) in ENGINES {
        let router = dfa_router::RouterBuilder::<i32>::new()
            .build(common::options(compress))
            .unwrap();
        assert_eq!(router.route_count(), 0);
        assert_eq!(router.route("/"), None, "{name}");
        assert_eq!(router.route("/foo"), None, "{name}");
    }
}
