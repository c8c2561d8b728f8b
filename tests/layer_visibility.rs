use dhtml_layers::{Page, Result, Visibility};

const LAYERS_HTML: &str = r#"
<body>
  <div id='a' style='visibility: hidden'>A</div>
  <div id='b' style='visibility: hidden'>B</div>
  <div id='c' style='visibility: hidden'>C</div>
  <div id='d' style='visibility: hidden'>D</div>
</body>
"#;

#[test]
fn showing_a_group_hides_its_previous_members() -> Result<()> {
    let mut page = Page::from_html(LAYERS_HTML)?;

    assert_eq!(page.show_layers(0, &["a", "b"]), 2);
    page.assert_visible("a")?;
    page.assert_visible("b")?;
    page.assert_hidden("c")?;

    assert_eq!(page.show_layers(0, &["c"]), 1);
    page.assert_hidden("a")?;
    page.assert_hidden("b")?;
    page.assert_visible("c")?;
    assert_eq!(page.group_members(0), vec!["c".to_string()]);
    Ok(())
}

#[test]
fn groups_do_not_interfere() -> Result<()> {
    let mut page = Page::from_html(LAYERS_HTML)?;
    page.show_layers(0, &["a"]);
    page.show_layers(1, &["b"]);
    page.show_layers(1, &["c"]);

    page.assert_visible("a")?;
    page.assert_hidden("b")?;
    page.assert_visible("c")?;
    assert!(page.group_members(7).is_empty());
    Ok(())
}

#[test]
fn reshowing_a_member_keeps_it_visible() -> Result<()> {
    let mut page = Page::from_html(LAYERS_HTML)?;
    page.show_layers(2, &["a", "b"]);
    page.show_layers(2, &["b", "b", "missing"]);

    page.assert_hidden("a")?;
    page.assert_visible("b")?;
    assert_eq!(page.group_members(2), vec!["b".to_string()]);
    Ok(())
}

#[test]
fn explicit_visibility_changes_skip_unknown_names() -> Result<()> {
    let mut page = Page::from_html(LAYERS_HTML)?;
    let applied = page.show_hide_layers(&[
        ("a", Visibility::Visible),
        ("ghost", Visibility::Hidden),
        ("d", Visibility::Other("inherit".into())),
    ]);
    assert_eq!(applied, 2);
    page.assert_visible("a")?;
    assert_eq!(page.visibility("d").as_deref(), Some("inherit"));
    Ok(())
}

#[test]
fn failed_assertions_report_the_element() -> Result<()> {
    let page = Page::from_html(LAYERS_HTML)?;
    match page.assert_visible("a") {
        Err(dhtml_layers::Error::AssertionFailed {
            name,
            expected,
            actual,
            dom_snippet,
        }) => {
            assert_eq!(name, "a");
            assert_eq!(expected, "visible");
            assert_eq!(actual, "hidden");
            assert!(dom_snippet.starts_with("<div id=\"a\""), "{dom_snippet}");
        }
        other => panic!("expected assertion failure, got: {other:?}"),
    }
    assert!(matches!(
        page.assert_hidden("ghost"),
        Err(dhtml_layers::Error::ElementNotFound(_))
    ));
    Ok(())
}
