use dhtml_layers::{Page, Result, ShimOptions};

#[test]
fn ids_resolve_to_the_same_handle_as_direct_lookup() -> Result<()> {
    let page = Page::from_html(
        "<body><div id='nav'><span id='label'>x</span></div><p id='note'></p></body>",
    )?;
    let top = page.top_document();
    for id in ["nav", "label", "note"] {
        assert_eq!(page.resolve(id), page.element_by_id(top, id), "{id}");
        assert!(page.resolve(id).is_some());
    }
    Ok(())
}

#[test]
fn absent_names_are_not_found() -> Result<()> {
    let page = Page::from_html("<div id='present'></div>")?;
    for name in ["absent", "", "present?0", "?", "PRESENT"] {
        assert_eq!(page.resolve(name), None, "{name}");
    }
    Ok(())
}

#[test]
fn named_images_and_forms_resolve_by_name() -> Result<()> {
    let page = Page::from_html(
        r#"<body>
             <img name='logo' id='logo-img' src='logo.gif'>
             <form name='search' id='search-form'><input name='q' id='query'></form>
           </body>"#,
    )?;
    let top = page.top_document();
    assert_eq!(page.resolve("logo"), page.element_by_id(top, "logo-img"));
    assert_eq!(page.resolve("search"), page.element_by_id(top, "search-form"));
    assert_eq!(page.resolve("q"), page.element_by_id(top, "query"));
    Ok(())
}

#[test]
fn form_fields_resolve_without_the_all_index() -> Result<()> {
    let html = "<form><select name='topic' id='topic-select'></select></form><p name='para'></p>";
    let page = Page::from_html_with_options(html, ShimOptions::default().expose_all_collection(false))?;
    let top = page.top_document();
    assert_eq!(page.resolve("topic"), page.element_by_id(top, "topic-select"));
    // Name-only elements outside the named kinds need the all index.
    assert_eq!(page.resolve("para"), None);

    let page = Page::from_html(html)?;
    assert!(page.resolve("para").is_some());
    Ok(())
}

#[test]
fn frame_suffix_resolves_inside_the_frame() -> Result<()> {
    let mut page = Page::from_html("<div id='tip'>top</div>")?;
    let nav = page.add_frame("nav", "<div id='tip'>nav</div>")?;
    let main = page.add_frame("main", "<div id='tip'>main</div><div id='only-main'></div>")?;

    assert_eq!(page.resolve("tip").map(|h| h.document()), Some(page.top_document()));
    assert_eq!(page.resolve("tip?0"), page.element_by_id(nav, "tip"));
    assert_eq!(page.resolve("tip?main"), page.element_by_id(main, "tip"));
    assert_eq!(page.resolve("only-main?1"), page.element_by_id(main, "only-main"));
    assert_eq!(page.resolve("only-main"), None);
    assert_eq!(page.resolve("tip?9"), None);
    assert_eq!(page.frame("main")?, main);
    assert!(matches!(page.frame("side"), Err(dhtml_layers::Error::FrameNotFound(_))));
    Ok(())
}

#[test]
fn nested_layer_documents_are_searched_recursively() -> Result<()> {
    let mut page = Page::from_html("<div id='host'></div>")?;
    let top = page.top_document();
    let outer = page.add_layer_document(top, "<div id='outer-item'></div>")?;
    let inner = page.add_layer_document(outer, "<div id='inner-item'></div>")?;

    assert_eq!(page.resolve("outer-item"), page.element_by_id(outer, "outer-item"));
    assert_eq!(page.resolve("inner-item"), page.element_by_id(inner, "inner-item"));
    assert_eq!(page.resolve_in("host", inner), None);
    Ok(())
}

#[test]
fn layer_documents_require_an_existing_host() -> Result<()> {
    let mut page = Page::from_html("<div></div>")?;
    let frame = page.add_frame("f", "<p></p>")?;
    // A frame document is a valid host; an id from another page is not.
    assert!(page.add_layer_document(frame, "<p></p>").is_ok());

    let mut other = Page::from_html("<div></div>")?;
    assert!(matches!(
        other.add_layer_document(frame, "<p></p>"),
        Err(dhtml_layers::Error::DocumentNotFound(_))
    ));
    Ok(())
}
