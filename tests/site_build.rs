use std::fs;
use std::path::Path;

use serde_json::{json, Map};
use tempfile::TempDir;

use liquid::model::ValueView;

use isleweave::config::load_config;
use isleweave::{IsleError, RegistryBuilder, Site};

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn sample_site() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    write(root, "_config.yml", "default_layout: default\n");
    write(root, "data/nav/main.json", r#"{"items": ["Home", "Blog"]}"#);
    write(root, "data/site.json", r#"{"title": "Isles"}"#);
    write(root, "partials/nav.html", "<nav>{% for item in nav.main.items %}[{{ item }}]{% endfor %}</nav>");
    write(root, "helpers/shout.liquid", "{{ args[0] | upcase }}{{ options.mark }}\n");
    write(
        root,
        "layouts/default.html",
        "<html><title>{{ site.title }}</title>{% include 'nav' %}{{ body }}{% if script %}{{ script }}{% endif %}</html>",
    );
    write(
        root,
        "layouts/post.html",
        "<template data-template>{\"parent\": \"default\", \"kind\": \"post\"}</template><article class=\"{{ template.kind }}\">{{ body }}</article>",
    );
    write(
        root,
        "pages/index.html",
        concat!(
            "<script type=\"application/json\" data-page>{\"heading\": \"welcome\"}</script>",
            "<h1>{{ heading | shout: mark: \"!\" }}</h1>",
            "<div data-script><script>start()</script></div>",
        ),
    );
    write(root, "pages/about.html", "<p>About {{ path }}</p>");
    write(
        root,
        "collections/blog.json",
        r#"{"source": "posts", "single-path": "blog", "single-layout": "post", "content-fields": {"title": {}}}"#,
    );
    write(
        root,
        "posts/hello.html",
        "<h2 data-field-title>Hello</h2><i data-item>{\"date\": \"2024-01-01\"}</i><p>{{ title }} on {{ date }}</p>",
    );

    dir
}

#[test]
fn builds_every_page_into_the_output_directory() {
    let dir = sample_site();
    let out = TempDir::new().unwrap();

    let site = Site::setup_from(dir.path(), Map::new()).unwrap();
    assert!(site.report().is_clean());

    let written = site.compile_site(out.path()).unwrap();
    assert_eq!(written, 3);

    let index = fs::read_to_string(out.path().join("index.html")).unwrap();
    assert_eq!(
        index,
        "<html><title>Isles</title><nav>[Home][Blog]</nav><h1>WELCOME!</h1><script>start()</script></html>"
    );

    let about = fs::read_to_string(out.path().join("about.html")).unwrap();
    assert!(about.contains("<p>About /about.html</p>"));

    let post = fs::read_to_string(out.path().join("blog/hello.html")).unwrap();
    assert!(post.contains("<article class=\"post\"><p>Hello on 2024-01-01</p></article>"));
}

#[test]
fn compile_page_layers_caller_data_last() {
    let dir = sample_site();
    let setup_data = json!({"heading": "setup"}).as_object().cloned().unwrap();
    let site = Site::setup_from(dir.path(), setup_data).unwrap();

    let page = site.compile_page("index", &Map::new()).unwrap();
    assert!(page.html.contains("<h1>SETUP!</h1>"));

    let caller = json!({"heading": "caller"}).as_object().cloned().unwrap();
    let page = site.compile_page("index", &caller).unwrap();
    assert!(page.html.contains("<h1>CALLER!</h1>"));
    assert_eq!(page.canonical_path, "/");
}

#[test]
fn unknown_pages_are_lookup_errors() {
    let dir = sample_site();
    let site = Site::setup_from(dir.path(), Map::new()).unwrap();

    let err = site.compile_page("missing", &Map::new()).unwrap_err();
    assert!(matches!(err, IsleError::PageNotFound(_)));
}

#[test]
fn a_broken_page_aborts_the_build() {
    let dir = sample_site();
    write(dir.path(), "pages/broken.html", "{{ title | no_such_filter }}");
    let out = TempDir::new().unwrap();

    let site = Site::setup_from(dir.path(), Map::new()).unwrap();
    let err = site.compile_site(out.path()).unwrap_err();

    assert!(matches!(err, IsleError::Template { .. }));
}

#[test]
fn native_helpers_can_be_registered_before_setup() {
    let dir = sample_site();
    write(dir.path(), "pages/native.html", "{{ \"a\" | pair: \"b\", sep: \"+\" }}");

    let mut builder = RegistryBuilder::new();
    builder.register_helper_fn("pair", |values, options| {
        let sep = options.get("sep").map(|v| v.to_kstr().to_string()).unwrap_or_default();
        let parts: Vec<String> = values.iter().map(|v| v.to_kstr().to_string()).collect();
        Ok(parts.join(&sep))
    });

    let config = load_config(dir.path(), None).unwrap();
    let site = Site::setup_with(config, Map::new(), builder).unwrap();

    let page = site.compile_page("native", &Map::new()).unwrap();
    assert!(page.html.contains("a+b"));
}
