use dhtml_layers::{Page, PointerEvent, Result};

const MENU_HTML: &str = r#"
<body>
  <div id='menu' style='visibility: visible'>
    <ul id='items'>
      <li id='first'><a id='first-link'>One</a></li>
      <li id='second'>Two</li>
    </ul>
  </div>
  <div id='sibling'>elsewhere</div>
</body>
"#;

fn at(x: i64, y: i64) -> PointerEvent {
    PointerEvent::new(x, y)
}

#[test]
fn moving_into_a_descendant_keeps_the_layer() -> Result<()> {
    let mut page = Page::from_html(MENU_HTML)?;
    assert_eq!(page.auto_hide(&["menu"]), 1);
    assert!(page.is_auto_hide("menu"));

    page.hover(Some("menu"), "first-link", at(10, 10))?;
    page.assert_visible("menu")?;

    // Moving between children bubbles a mouseout whose destination is still inside.
    page.hover(Some("first-link"), "second", at(10, 30))?;
    page.assert_visible("menu")?;
    Ok(())
}

#[test]
fn moving_to_a_sibling_hides_the_layer() -> Result<()> {
    let mut page = Page::from_html(MENU_HTML)?;
    page.auto_hide(&["menu"]);

    page.hover(Some("menu"), "sibling", at(300, 10))?;
    page.assert_hidden("menu")?;
    Ok(())
}

#[test]
fn leaving_from_a_deep_child_hides_the_enabled_ancestor() -> Result<()> {
    let mut page = Page::from_html(MENU_HTML)?;
    page.auto_hide(&["menu"]);

    page.hover(Some("first-link"), "sibling", at(300, 10))?;
    page.assert_hidden("menu")?;
    Ok(())
}

#[test]
fn leaving_the_document_hides() -> Result<()> {
    let mut page = Page::from_html(MENU_HTML)?;
    page.auto_hide(&["menu"]);
    page.leave("second", at(-1, -1))?;
    page.assert_hidden("menu")?;
    Ok(())
}

#[test]
fn nested_auto_hide_layers_hide_independently() -> Result<()> {
    let mut nested = Page::from_html(
        "<div id='outer'><div id='inner'><i id='leaf'></i></div><b id='gap'></b></div>",
    )?;
    nested.auto_hide(&["outer", "inner"]);

    // Out of the inner layer but still inside the outer one.
    nested.hover(Some("leaf"), "gap", at(1, 1))?;
    nested.assert_hidden("inner")?;
    nested.assert_visible("outer")?;

    let mut page = Page::from_html(MENU_HTML)?;
    page.auto_hide(&["menu", "items"]);
    page.hover(Some("second"), "sibling", at(1, 1))?;
    page.assert_hidden("items")?;
    page.assert_hidden("menu")?;
    Ok(())
}

#[test]
fn unknown_names_are_skipped_and_registration_is_idempotent() -> Result<()> {
    let mut page = Page::from_html(MENU_HTML)?;
    assert_eq!(page.auto_hide(&["menu", "ghost", "menu"]), 2);
    assert!(!page.is_auto_hide("ghost"));
    assert!(!page.is_auto_hide("sibling"));

    page.hover(Some("menu"), "sibling", at(0, 0))?;
    page.assert_hidden("menu")?;
    Ok(())
}

#[test]
fn tracked_pointer_moves_use_the_last_hovered_element() -> Result<()> {
    let mut page = Page::from_html(MENU_HTML)?;
    page.auto_hide(&["menu"]);

    page.move_to("first", at(5, 5))?;
    page.move_to("second", at(5, 25))?;
    page.assert_visible("menu")?;

    page.move_to("sibling", at(200, 5))?;
    page.assert_hidden("menu")?;

    page.move_out(at(-1, -1));
    page.assert_hidden("menu")?;
    Ok(())
}

#[test]
fn pointer_events_for_unknown_elements_are_errors() -> Result<()> {
    let mut page = Page::from_html(MENU_HTML)?;
    assert!(matches!(
        page.hover(None, "ghost", at(0, 0)),
        Err(dhtml_layers::Error::ElementNotFound(name)) if name == "ghost"
    ));
    assert!(page.leave("ghost", at(0, 0)).is_err());
    Ok(())
}

#[test]
fn inline_mouseout_runs_alongside_auto_hide() -> Result<()> {
    let mut page = Page::from_html(
        "<div id='menu' onmouseout=\"showLayers(0,'note')\"></div>\
         <div id='note' style='visibility: hidden'></div><div id='away'></div>",
    )?;
    page.auto_hide(&["menu"]);

    page.hover(Some("menu"), "away", at(0, 0))?;
    page.assert_hidden("menu")?;
    page.assert_visible("note")?;
    Ok(())
}
