use htmpl::{Config, Engine, ErrorKind, FileSystemLoader, Source};

fn compile(location: &str, config: Config) -> htmpl::Result<htmpl::Template> {
    let engine = Engine::with_config(FileSystemLoader::new("tests/templates"), config);
    engine.compile(Source::Location(location.to_string()), None)
}

#[test]
fn test_error_missing_template() {
    let err = compile("does_not_exist.tmpl", Config::default()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::MissingTemplate(Some(_))));
    assert_eq!(
        err.to_string(),
        "No template supplied: could not load `does_not_exist.tmpl`"
    );
}

#[test]
fn test_error_missing_include() {
    let err = compile("broken_include.tmpl", Config::default()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::MissingTemplate(Some(ref l)) if l == "missing.tmpl"));
}

#[test]
fn test_error_unbalanced_blocks() {
    let err = compile("unbalanced.tmpl", Config::default()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnbalancedBlock(_)));
    assert_eq!(err.to_string(), "`<tmpl_if>` is never closed");
}

#[test]
fn test_error_unbalanced_blocks_strict() {
    let config = Config::from_json(r#"{"strict_blocks": true}"#).unwrap();
    let err = compile("unbalanced.tmpl", config).unwrap_err();
    assert_eq!(err.to_string(), "Expected `</tmpl_loop>` but found `</tmpl_if>`");
}
