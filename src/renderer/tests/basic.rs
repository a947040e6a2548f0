use pretty_assertions::assert_eq;
use serde_json::json;

use crate::context::Context;

use super::{render_template, Review};

#[test]
fn render_simple_string() {
    let result = render_template("<h1>Hello world</h1>", &Context::new());
    assert_eq!(result.unwrap(), "<h1>Hello world</h1>".to_owned());
}

#[test]
fn render_text_without_tags_as_is() {
    let inputs = vec![
        "line 1\nline 2\n\nline 4",
        "  indented\n\ttabbed  ",
        "quotes \" and backslashes \\ stay",
        "<tmpl_nope> and <tmpl_var> are not tags",
        "",
    ];

    for input in inputs {
        assert_eq!(render_template(input, &Context::new()).unwrap(), input);
    }
}

#[test]
fn render_unknown_tags_as_nothing() {
    let mut context = Context::new();
    context.insert("x", &"value");
    let inputs = vec![
        (r#"a<tmpl_foo name="x">b"#, "ab"),
        (r#"<tmpl_foo x><tmpl_var x>"#, "value"),
    ];

    for (input, expected) in inputs {
        assert_eq!(render_template(input, &context).unwrap(), expected);
    }
}

#[test]
fn render_normalizes_newlines() {
    let result = render_template("a\r\nb\rc", &Context::new()).unwrap();
    assert_eq!(result, "a\nb\nc");
}

#[test]
fn render_variable_block_ident() {
    let mut context = Context::new();
    context.insert("name", &"john");
    context.insert("malicious", &"<html>");
    context.insert("a", &2);
    context.insert("pi", &3.5);
    context.insert("yes", &true);
    context.insert("numbers", &vec![1, 2, 3]);
    context.insert("review", &Review::new());
    context.insert("nothing", &());

    let inputs = vec![
        (r#"<tmpl_var name="name">"#, "john"),
        (r#"<tmpl_var name="malicious">"#, "<html>"),
        (r#"<tmpl_var name="a">"#, "2"),
        (r#"<tmpl_var name="pi">"#, "3.5"),
        (r#"<tmpl_var name="yes">"#, "true"),
        (r#"<tmpl_var name="numbers">"#, "1,2,3"),
        (r#"<tmpl_var name="numbers.1">"#, "2"),
        (r#"<tmpl_var name="review.title">"#, "My review"),
        (r#"<tmpl_var name="review.paragraphs">"#, "A,B,C"),
        (r#"<tmpl_var name="nothing">"#, ""),
        (r#"<tmpl_var name="missing">"#, ""),
        (r#"<tmpl_var name="review.missing.deeper">"#, ""),
        (r#"Hi <TMPL_VAR NAME="name">!"#, "Hi john!"),
    ];

    for (input, expected) in inputs {
        println!("{:?} -> {:?}", input, expected);
        assert_eq!(render_template(input, &context).unwrap(), expected);
    }
}

#[test]
fn render_escaped_variables() {
    let mut context = Context::new();
    context.insert("x", &"<b>");
    context.insert("q", &"a b");
    context.insert("n", &5);

    let inputs = vec![
        (r#"<tmpl_var name="x" escape="html">"#, "&lt;b&gt;"),
        (r#"<tmpl_var name="x" escape="HTML">"#, "&lt;b&gt;"),
        (r#"<tmpl_var name="q" escape="url">"#, "a%20b"),
        (r#"<tmpl_var name="x" escape="url">"#, "%3Cb%3E"),
        (r#"<tmpl_var name="n" escape="html">"#, "5"),
        (r#"<tmpl_var name="missing" escape="url">"#, ""),
    ];

    for (input, expected) in inputs {
        assert_eq!(render_template(input, &context).unwrap(), expected);
    }
}

#[test]
fn render_against_a_non_object_root() {
    let context = Context::from_value(json!(["a", "b"]));
    assert_eq!(render_template(r#"<tmpl_var name="1">"#, &context).unwrap(), "b");
}

#[test]
fn compiled_programs_are_reusable() {
    let program = {
        let empty = Context::new();
        let loader = crate::loader::MemoryLoader::new();
        let config = crate::config::Config::default();
        crate::compiler::Compiler::new(&loader, &config, &empty)
            .compile(r#"Hello <tmpl_var name="name">"#)
            .unwrap()
    };

    let mut context = Context::new();
    context.insert("name", &"Bob");
    assert_eq!(program.render(&context), "Hello Bob");
    context.insert("name", &"Alice");
    assert_eq!(program.render(&context), "Hello Alice");
    assert_eq!(program.render(&context), "Hello Alice");
}

#[test]
fn compiling_twice_renders_the_same() {
    let template = "<tmpl_loop rows><tmpl_if v><tmpl_var v><tmpl_else>-</tmpl_if></tmpl_loop>";
    let context = Context::from_value(json!({"rows": [{"v": 1}, {"v": 0}, {"v": "x"}]}));
    let first = render_template(template, &context).unwrap();
    let second = render_template(template, &context).unwrap();
    assert_eq!(first, "1-x");
    assert_eq!(first, second);
}
