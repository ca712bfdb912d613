use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, run};

const ADDON: &str = "src/addons/Foo";

fn phrases_xml(titles: &[&str]) -> String {
    let body: String = titles
        .iter()
        .map(|t| format!("  <phrase title=\"{}\" version_id=\"1\"><![CDATA[{}]]></phrase>\n", t, t))
        .collect();
    format!("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<phrases>\n{}</phrases>\n", body)
}

fn templates_xml(templates: &[(&str, &str, &str)]) -> String {
    let body: String = templates
        .iter()
        .map(|(t, title, content)| {
            format!(
                "  <template type=\"{}\" title=\"{}\" version_id=\"1\"><![CDATA[{}]]></template>\n",
                t, title, content
            )
        })
        .collect();
    format!("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<templates>\n{}</templates>\n", body)
}

#[test]
fn test_phrase_not_found() -> Result<()> {
    let test = CliTest::with_file(
        "src/addons/Foo/Pub/Controller/Index.php",
        "<?php\n\nnamespace Foo\\Pub\\Controller;\n\nclass Index\n{\n    public function actionIndex()\n    {\n        return\n            \\XF::phrase('hello_world');\n    }\n}\n",
    )?;

    let output = run(test.validate_command("Foo"))?;

    assert_eq!(output.code, Some(1));
    assert_eq!(
        output.stdout,
        "Phrases not found:\n  hello_world\n    Used in: src/addons/Foo/Pub/Controller/Index.php::10\n\nPlease fix all above issues.\n"
    );

    Ok(())
}

#[test]
fn test_reflected_phrase_is_not_unused() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "src/addons/Foo/_data/phrases.xml",
        &phrases_xml(&["permission.manage_foo"]),
    )?;
    test.write_file("src/addons/Foo/Setup.php", "<?php\n")?;

    let output = run(test.validate_command("Foo"))?;

    assert_eq!(output.code, Some(0));
    assert_eq!(output.stdout, "\u{2713} Checked 1 file - no issues found\n");

    Ok(())
}

#[test]
fn test_unused_phrase() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "src/addons/Foo/_data/phrases.xml",
        &phrases_xml(&["foo_used", "foo_orphan"]),
    )?;
    test.write_file("src/addons/Foo/Setup.php", "<?php\n\\XF::phrase('foo_used');\n")?;

    let output = run(test.validate_command("Foo"))?;

    assert_eq!(output.code, Some(1));
    assert!(output.stdout.contains("Phrases not used any where:\n  foo_orphan\n"));

    Ok(())
}

#[test]
fn test_shared_phrase_is_advisory() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "src/addons/Vendor/Bar/_data/phrases.xml",
        &phrases_xml(&["bar_title"]),
    )?;
    test.write_file("src/addons/XF/_data/phrases.xml", &phrases_xml(&["save"]))?;
    test.write_file(
        "src/addons/Foo/Setup.php",
        "<?php\n\\XF::phrase('bar_title');\n\\XF::phrase('save');\n",
    )?;

    let output = run(test.validate_command("Foo"))?;

    assert_eq!(output.code, Some(0));
    assert_eq!(
        output.stdout,
        "Phrases shared by add-on:\n  bar_title - Vendor/Bar\n\n\u{2713} Checked 1 file - no issues found\n"
    );

    Ok(())
}

#[test]
fn test_template_not_synced() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "src/addons/Foo/_data/templates.xml",
        &templates_xml(&[("public", "index", "Hello")]),
    )?;
    test.write_file("src/addons/Foo/_output/templates/public/index.html", "Hello!")?;

    let output = run(test.validate_command("Foo"))?;

    assert_eq!(output.code, Some(1));
    assert_eq!(
        output.stdout,
        "Templates not updated:\n  public:index\n\nPlease fix all above issues.\n"
    );

    Ok(())
}

#[test]
fn test_missing_output_file_is_not_synced() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "src/addons/Foo/_data/templates.xml",
        &templates_xml(&[("admin", "foo_tools", "Tools")]),
    )?;

    let output = run(test.validate_command("Foo"))?;

    assert_eq!(output.code, Some(1));
    assert!(output.stdout.contains("Templates not updated:\n  admin:foo_tools\n"));

    Ok(())
}

#[test]
fn test_wildcard_template_is_satisfied() -> Result<()> {
    let test = CliTest::new()?;
    let view = r#"<xf:include template="widget_*" />"#;
    test.write_file(
        "src/addons/Foo/_data/templates.xml",
        &templates_xml(&[("public", "foo_view", view), ("public", "widget_foo", "Widget")]),
    )?;
    test.write_file(&format!("{ADDON}/_output/templates/public/foo_view.html"), view)?;
    test.write_file(
        &format!("{ADDON}/_output/templates/public/widget_foo.html"),
        "Widget",
    )?;

    let output = run(test.validate_command("Foo"))?;

    assert_eq!(output.stderr, "");
    assert_eq!(output.code, Some(0));
    assert_eq!(output.stdout, "\u{2713} Checked 2 files - no issues found\n");

    Ok(())
}

#[test]
fn test_template_not_found_and_recommendation() -> Result<()> {
    let test = CliTest::with_file(
        "src/addons/Foo/Pub/Controller/Index.php",
        "<?php\nreturn $this->view('Foo:Index', 'public:foo_missing');\n$this->view('Foo:Row', 'public:foo_row_' . $type);\n",
    )?;

    let output = run(test.validate_command("Foo"))?;

    assert_eq!(output.code, Some(1));
    assert_eq!(
        output.stdout,
        "Templates not found:\n  public:foo_missing\n    Used in: src/addons/Foo/Pub/Controller/Index.php::2\n\n\
         Recommend to use wildcard template:\n  public:foo_row_ => public:foo_row_*\n    Used in: src/addons/Foo/Pub/Controller/Index.php::3\n\n\
         Please fix all above issues.\n"
    );

    Ok(())
}

#[test]
fn test_missing_addon_is_fatal() -> Result<()> {
    let test = CliTest::new()?;

    let output = run(test.validate_command("Missing"))?;

    assert_eq!(output.code, Some(2));
    assert_eq!(output.stdout, "");
    assert!(output.stderr.starts_with("Error: Add-on (Missing) not exists"));

    Ok(())
}

#[test]
fn test_generic_template_outside_output_is_fatal() -> Result<()> {
    let test = CliTest::with_file(
        "src/addons/Foo/Setup.php",
        "<?php\n$html = '<xf:include template=\"foo_macros\" />';\n",
    )?;

    let output = run(test.validate_command("Foo"))?;

    assert_eq!(output.code, Some(2));
    assert_eq!(output.stdout, "");
    assert!(output.stderr.contains("Unknown template type"));
    assert!(output.stderr.contains("Setup.php"));

    Ok(())
}

#[test]
fn test_check_flag_limits_validators() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "src/addons/Foo/_data/templates.xml",
        &templates_xml(&[("public", "index", "Hello")]),
    )?;

    let mut cmd = test.validate_command("Foo");
    cmd.args(["--check", "phrases"]);
    let output = run(cmd)?;

    assert_eq!(output.code, Some(0));

    Ok(())
}

#[test]
fn test_json_catalog_and_config_file() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".addonauditrc.json",
        r#"{
          "addOnsRoot": "addons",
          "catalogPath": "build/catalog.json"
        }"#,
    )?;
    test.write_file(
        "build/catalog.json",
        r#"{
          "phrases": [
            { "title": "foo_title", "addonId": "Vendor/Foo" },
            { "title": "bar_title", "addonId": "Vendor/Bar" }
          ]
        }"#,
    )?;
    test.write_file(
        "addons/Vendor/Foo/Setup.php",
        "<?php\n\\XF::phrase('foo_title');\n\\XF::phrase('bar_title');\n",
    )?;

    let output = run(test.validate_command("Vendor/Foo"))?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("  bar_title - Vendor/Bar\n"));

    Ok(())
}

#[test]
fn test_addons_root_flag_overrides_config() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".addonauditrc.json", r#"{ "addOnsRoot": "elsewhere" }"#)?;
    test.write_file("addons/Foo/Setup.php", "<?php\n")?;

    let mut cmd = test.validate_command("Foo");
    cmd.args(["--addons-root", "addons"]);
    let output = run(cmd)?;

    assert_eq!(output.code, Some(0));
    assert!(test.root().join("addons/Foo").is_dir());

    Ok(())
}

#[test]
fn test_invalid_config_is_fatal() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".addonauditrc.json", r#"{ "ignores": ["[invalid"] }"#)?;
    test.write_file("src/addons/Foo/Setup.php", "<?php\n")?;

    let output = run(test.validate_command("Foo"))?;

    assert_eq!(output.code, Some(2));
    assert!(output.stderr.starts_with("Error:"));

    Ok(())
}

#[test]
fn test_wildcard_usage_does_not_mark_phrases_used() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "src/addons/Foo/_data/phrases.xml",
        &phrases_xml(&["foo_status_open", "foo_status_closed"]),
    )?;
    test.write_file(
        "src/addons/Foo/Entity/Thread.php",
        "<?php\nreturn \\XF::phrase('foo_status_*');\n",
    )?;

    let output = run(test.validate_command("Foo"))?;

    assert_eq!(output.code, Some(1));
    assert_eq!(
        output.stdout,
        "Phrases not used any where:\n  foo_status_open\n  foo_status_closed\n\nPlease fix all above issues.\n"
    );

    Ok(())
}

#[test]
fn test_wildcard_template_matches_other_type() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "src/addons/Foo/_data/templates.xml",
        &templates_xml(&[("public", "widget_foo", "Widget")]),
    )?;
    test.write_file(
        &format!("{ADDON}/_output/templates/public/widget_foo.html"),
        "Widget",
    )?;
    test.write_file(
        "src/addons/Foo/Admin/Controller/Widget.php",
        "<?php\nreturn $this->view('Foo:Widget', 'admin:widget_*');\n",
    )?;

    let output = run(test.validate_command("Foo"))?;

    assert_eq!(output.code, Some(0));
    assert_eq!(output.stdout, "\u{2713} Checked 2 files - no issues found\n");

    Ok(())
}
