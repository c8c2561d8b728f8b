use crate::auto_hide;
use crate::document::{Document, DocumentId, ElementHandle, Frame};
use crate::dom::truncate_chars;
use crate::events::{EventState, EventType, Listener, ListenerStore, PointerEvent};
use crate::host::LayerHost;
use crate::html::parse_html;
use crate::inline_handler::{HandlerArg, HandlerCall, HandlerKind, HandlerParser};
use crate::options::ShimOptions;
use crate::positioner::{self, SnapOutcome, SnapRequest};
use crate::resolver::Resolver;
use crate::trace::TraceState;
use crate::visibility::{self, LayerGroupRegistry, Visibility};
use crate::{Error, Result};

const TOP_DOCUMENT: DocumentId = DocumentId(0);

/// One page context: the top document with its frames and nested layer
/// documents, plus the layer state the shim keeps for it.
#[derive(Debug)]
pub struct Page {
    documents: Vec<Document>,
    frames: Vec<Frame>,
    listeners: ListenerStore,
    registry: LayerGroupRegistry,
    pointer: Option<PointerEvent>,
    hovered: Option<ElementHandle>,
    /// Root document for name resolution; the document whose handler runs.
    scope: DocumentId,
    options: ShimOptions,
    parser: HandlerParser,
    trace: TraceState,
}

impl Page {
    pub fn from_html(html: &str) -> Result<Self> {
        Self::from_html_with_options(html, ShimOptions::default())
    }

    pub fn from_html_with_options(html: &str, options: ShimOptions) -> Result<Self> {
        let dom = parse_html(html)?;
        Ok(Self {
            documents: vec![Document::new(dom)],
            frames: Vec::new(),
            listeners: ListenerStore::default(),
            registry: LayerGroupRegistry::default(),
            pointer: None,
            hovered: None,
            scope: TOP_DOCUMENT,
            parser: HandlerParser::new()?,
            trace: TraceState::new(options.trace_log_limit),
            options,
        })
    }

    pub fn top_document(&self) -> DocumentId {
        TOP_DOCUMENT
    }

    /// Adds a frame; `name?<frame>` names resolve into it by index or name.
    pub fn add_frame(&mut self, name: &str, html: &str) -> Result<DocumentId> {
        let document = self.push_document(html)?;
        self.frames.push(Frame {
            name: name.to_string(),
            document,
        });
        Ok(document)
    }

    pub fn frame(&self, key: &str) -> Result<DocumentId> {
        let by_index = key
            .parse::<usize>()
            .ok()
            .and_then(|index| self.frames.get(index));
        by_index
            .or_else(|| self.frames.iter().find(|frame| frame.name == key))
            .map(|frame| frame.document)
            .ok_or_else(|| Error::FrameNotFound(key.to_string()))
    }

    /// Nests a layer document inside `host`; the resolver searches it after
    /// the host's own collections and before lookup by id.
    pub fn add_layer_document(&mut self, host: DocumentId, html: &str) -> Result<DocumentId> {
        self.document(host)?;
        let document = self.push_document(html)?;
        self.documents[host.0].layers.push(document);
        Ok(document)
    }

    fn push_document(&mut self, html: &str) -> Result<DocumentId> {
        let dom = parse_html(html)?;
        let id = DocumentId(self.documents.len());
        self.documents.push(Document::new(dom));
        Ok(id)
    }

    fn document(&self, id: DocumentId) -> Result<&Document> {
        self.documents
            .get(id.0)
            .ok_or(Error::DocumentNotFound(id))
    }

    pub fn resolve(&self, name: &str) -> Option<ElementHandle> {
        self.resolve_in(name, TOP_DOCUMENT)
    }

    pub fn resolve_in(&self, name: &str, root: DocumentId) -> Option<ElementHandle> {
        Resolver {
            documents: &self.documents,
            frames: &self.frames,
            expose_all_collection: self.options.expose_all_collection,
        }
        .resolve(name, root)
    }

    /// Direct lookup by id in `document`, bypassing the legacy paths.
    pub fn element_by_id(&self, document: DocumentId, id: &str) -> Option<ElementHandle> {
        self.documents
            .get(document.0)?
            .dom
            .by_id(id)
            .map(|node| ElementHandle::new(document, node))
    }

    pub fn snap(&mut self, reference: &str, target: &str, dx: i64, dy: i64) -> SnapOutcome {
        self.snap_request(&SnapRequest::new(reference, target, dx, dy))
    }

    pub fn snap_all(&mut self, requests: &[SnapRequest]) -> Vec<SnapOutcome> {
        requests
            .iter()
            .map(|request| self.snap_request(request))
            .collect()
    }

    fn snap_request(&mut self, request: &SnapRequest) -> SnapOutcome {
        let outcome = positioner::snap(self, request);
        let line = match &outcome {
            SnapOutcome::Placed { left, top, anchor } => format!(
                "[snap] placed {} left={left} top={top} anchor={anchor:?}",
                request.target
            ),
            SnapOutcome::Skipped(reason) => {
                format!("[snap] skipped {} reason={reason:?}", request.target)
            }
        };
        self.trace.line(line);
        outcome
    }

    pub fn show_layers(&mut self, group: usize, names: &[&str]) -> usize {
        let names = names.iter().map(|name| name.to_string()).collect::<Vec<_>>();
        self.show_layer_group(group, &names)
    }

    fn show_layer_group(&mut self, group: usize, names: &[String]) -> usize {
        let mut registry = std::mem::take(&mut self.registry);
        let shown = visibility::show_layers(self, &mut registry, group, names);
        self.registry = registry;
        self.trace.line(format!(
            "[layers] group={group} shown={shown} requested={}",
            names.len()
        ));
        shown
    }

    pub fn show_hide_layers(&mut self, changes: &[(&str, Visibility)]) -> usize {
        let changes = changes
            .iter()
            .map(|(name, visibility)| (name.to_string(), visibility.clone()))
            .collect::<Vec<_>>();
        self.apply_visibility(&changes)
    }

    fn apply_visibility(&mut self, changes: &[(String, Visibility)]) -> usize {
        let applied = visibility::show_hide_layers(self, changes);
        self.trace.line(format!(
            "[layers] visibility applied={applied} requested={}",
            changes.len()
        ));
        applied
    }

    pub fn auto_hide(&mut self, names: &[&str]) -> usize {
        let names = names.iter().map(|name| name.to_string()).collect::<Vec<_>>();
        self.enable_auto_hide(&names)
    }

    fn enable_auto_hide(&mut self, names: &[String]) -> usize {
        let enabled = auto_hide::auto_hide(self, names);
        self.trace.line(format!(
            "[auto-hide] enabled={enabled} requested={}",
            names.len()
        ));
        enabled
    }

    pub fn is_auto_hide(&self, name: &str) -> bool {
        self.resolve(name).is_some_and(|element| {
            self.listeners
                .has(element, EventType::MouseOut, Listener::AutoHide)
        })
    }

    pub fn group_members(&self, group: usize) -> Vec<String> {
        self.registry.members(group).to_vec()
    }

    /// Sets the mock `offsetLeft`/`offsetTop` of the named element.
    pub fn set_offset(&mut self, name: &str, left: i64, top: i64) -> Result<()> {
        let element = self.require(name)?;
        self.documents[element.document.0]
            .dom
            .set_offset(element.node, left, top);
        Ok(())
    }

    pub fn set_scroll(&mut self, left: i64, top: i64) {
        let document = &mut self.documents[TOP_DOCUMENT.0];
        document.scroll_left = left;
        document.scroll_top = top;
    }

    pub fn set_scroll_in(&mut self, document: DocumentId, left: i64, top: i64) -> Result<()> {
        self.document(document)?;
        let document = &mut self.documents[document.0];
        document.scroll_left = left;
        document.scroll_top = top;
        Ok(())
    }

    /// Moves the pointer from `from` (if any) onto `to`: `mouseout` on `from`,
    /// then `mouseover` on `to`.
    pub fn hover(&mut self, from: Option<&str>, to: &str, pointer: PointerEvent) -> Result<()> {
        let from = from.map(|name| self.require(name)).transpose()?;
        let to = self.require(to)?;
        self.pointer_transition(from, Some(to), pointer);
        Ok(())
    }

    /// Moves the pointer from `from` out of the document.
    pub fn leave(&mut self, from: &str, pointer: PointerEvent) -> Result<()> {
        let from = self.require(from)?;
        self.pointer_transition(Some(from), None, pointer);
        Ok(())
    }

    /// Like [`Page::hover`], leaving whatever element the pointer is over.
    pub fn move_to(&mut self, to: &str, pointer: PointerEvent) -> Result<()> {
        let to = self.require(to)?;
        self.pointer_transition(self.hovered, Some(to), pointer);
        Ok(())
    }

    /// Like [`Page::leave`], leaving whatever element the pointer is over.
    pub fn move_out(&mut self, pointer: PointerEvent) {
        self.pointer_transition(self.hovered, None, pointer);
    }

    fn pointer_transition(
        &mut self,
        from: Option<ElementHandle>,
        to: Option<ElementHandle>,
        pointer: PointerEvent,
    ) {
        self.pointer = Some(pointer);
        if let Some(from) = from {
            self.dispatch(EventType::MouseOut, from, to);
        }
        if let Some(to) = to {
            self.dispatch(EventType::MouseOver, to, from);
        }
        self.hovered = to;
    }

    /// Runs the `onload` handlers of the top document and then of each frame.
    pub fn load(&mut self) {
        let mut documents = vec![TOP_DOCUMENT];
        documents.extend(self.frames.iter().map(|frame| frame.document));
        for document in documents {
            if let Some(body) = self.documents[document.0].dom.body() {
                self.dispatch(EventType::Load, ElementHandle::new(document, body), None);
            }
        }
    }

    fn dispatch(
        &mut self,
        event_type: EventType,
        target: ElementHandle,
        related: Option<ElementHandle>,
    ) {
        let mut event = EventState::new(event_type, target, related, self.pointer);
        let related_label = related
            .map(|element| self.trace_label(element))
            .unwrap_or_else(|| "none".to_string());
        let target_label = self.trace_label(event.target);
        self.trace.event_line(format!(
            "[event] {} target={target_label} related={related_label} pointer={:?}",
            event_type.as_str(),
            event.pointer
        ));

        let mut path = vec![target];
        if event_type.bubbles() {
            let mut cursor = self.parent_element(target);
            while let Some(element) = cursor {
                path.push(element);
                cursor = self.parent_element(element);
            }
        }

        for current in path {
            event.current_target = current;
            self.run_inline_handler(&event);
            for listener in self.listeners.get(current, event_type) {
                self.invoke_listener(listener, &event);
            }
        }
    }

    fn invoke_listener(&mut self, listener: Listener, event: &EventState) {
        match listener {
            Listener::AutoHide => {
                let left = auto_hide::pointer_left(
                    event.current_target,
                    event.related_target,
                    |element| self.parent_element(element),
                );
                if left {
                    self.set_style_value(
                        event.current_target,
                        "visibility",
                        Visibility::Hidden.as_css(),
                    );
                    let label = self.trace_label(event.current_target);
                    self.trace.line(format!("[auto-hide] hid {label}"));
                }
            }
        }
    }

    fn run_inline_handler(&mut self, event: &EventState) {
        let current = event.current_target;
        let Some(source) = self.documents[current.document.0]
            .dom
            .attr(current.node, event.event_type.handler_attr())
            .map(str::to_string)
        else {
            return;
        };

        let calls = match self.parser.parse(&source) {
            Ok(calls) => calls,
            Err(err) => {
                self.trace.line(format!("[handler] skipped: {err}"));
                return;
            }
        };

        let previous_scope = self.scope;
        self.scope = current.document;
        for call in calls {
            self.run_handler_call(&call);
        }
        self.scope = previous_scope;
    }

    fn run_handler_call(&mut self, call: &HandlerCall) {
        let Some(kind) = self.options.handler_kind(&call.function) else {
            self.trace
                .line(format!("[handler] unsupported call {}", call.function));
            return;
        };

        match kind {
            HandlerKind::ShowLayers => {
                let group = call
                    .args
                    .first()
                    .map(HandlerArg::as_int)
                    .unwrap_or(0)
                    .max(0);
                let group = usize::try_from(group).unwrap_or(0);
                let names = names_of(call.args.iter().skip(1));
                self.show_layer_group(group, &names);
            }
            HandlerKind::Snap => {
                for chunk in call.args.chunks_exact(4) {
                    let request = SnapRequest {
                        reference: chunk[0].as_name().unwrap_or_default(),
                        target: chunk[1].as_name().unwrap_or_default(),
                        dx: chunk[2].as_int(),
                        dy: chunk[3].as_int(),
                    };
                    self.snap_request(&request);
                }
            }
            HandlerKind::AutoHide => {
                let names = names_of(call.args.iter());
                self.enable_auto_hide(&names);
            }
            HandlerKind::ShowHideLayers => {
                let changes = call
                    .args
                    .chunks_exact(3)
                    .filter_map(|chunk| {
                        let name = chunk[0].as_name()?;
                        Some((name, Visibility::from_token(&chunk[2].as_text())))
                    })
                    .collect::<Vec<_>>();
                self.apply_visibility(&changes);
            }
        }
    }

    fn parent_element(&self, element: ElementHandle) -> Option<ElementHandle> {
        let dom = &self.documents.get(element.document.0)?.dom;
        let parent = dom.parent(element.node)?;
        dom.element(parent)?;
        Some(ElementHandle::new(element.document, parent))
    }

    fn require(&self, name: &str) -> Result<ElementHandle> {
        self.resolve(name)
            .ok_or_else(|| Error::ElementNotFound(name.to_string()))
    }

    pub fn style(&self, name: &str, property: &str) -> Option<String> {
        let element = self.resolve(name)?;
        self.style_value(element, property)
    }

    /// Inline `visibility`, `None` when unset.
    pub fn visibility(&self, name: &str) -> Option<String> {
        self.style(name, "visibility")
    }

    /// Inline `left`/`top` as integers.
    pub fn position(&self, name: &str) -> Option<(i64, i64)> {
        let element = self.resolve(name)?;
        let dom = &self.documents[element.document.0].dom;
        Some((
            dom.style_int(element.node, "left")?,
            dom.style_int(element.node, "top")?,
        ))
    }

    /// Passes unless the element's inline visibility is `hidden`.
    pub fn assert_visible(&self, name: &str) -> Result<()> {
        let element = self.require(name)?;
        let actual = self.style_value(element, "visibility").unwrap_or_default();
        if actual == "hidden" {
            return Err(self.assertion_failed(name, element, "visible", actual));
        }
        Ok(())
    }

    pub fn assert_hidden(&self, name: &str) -> Result<()> {
        let element = self.require(name)?;
        let actual = self.style_value(element, "visibility").unwrap_or_default();
        if actual != "hidden" {
            return Err(self.assertion_failed(name, element, "hidden", actual));
        }
        Ok(())
    }

    pub fn assert_position(&self, name: &str, left: i64, top: i64) -> Result<()> {
        let element = self.require(name)?;
        let unit = &self.options.length_unit;
        let expected = format!("{left}{unit},{top}{unit}");
        let actual = format!(
            "{},{}",
            self.style_value(element, "left").unwrap_or_default(),
            self.style_value(element, "top").unwrap_or_default()
        );
        if actual != expected {
            return Err(self.assertion_failed(name, element, &expected, actual));
        }
        Ok(())
    }

    fn assertion_failed(
        &self,
        name: &str,
        element: ElementHandle,
        expected: &str,
        actual: String,
    ) -> Error {
        Error::AssertionFailed {
            name: name.to_string(),
            expected: expected.to_string(),
            actual,
            dom_snippet: truncate_chars(
                &self.documents[element.document.0].dom.dump_node(element.node),
                200,
            ),
        }
    }

    pub fn enable_trace(&mut self, enabled: bool) {
        self.trace.enabled = enabled;
    }

    pub fn take_trace_logs(&mut self) -> Vec<String> {
        self.trace.take()
    }

    /// Toggles forwarding of trace lines to `tracing`; the in-memory buffer
    /// is unaffected.
    pub fn set_trace_forwarding(&mut self, enabled: bool) {
        self.trace.forward = enabled;
    }

    pub fn set_trace_events(&mut self, enabled: bool) {
        self.trace.events = enabled;
    }

    pub fn set_trace_log_limit(&mut self, max_entries: usize) -> Result<()> {
        if max_entries == 0 {
            return Err(Error::InvalidOption(
                "set_trace_log_limit requires at least 1 entry".into(),
            ));
        }
        self.trace.set_limit(max_entries);
        Ok(())
    }

    fn trace_label(&self, element: ElementHandle) -> String {
        let dom = &self.documents[element.document.0].dom;
        if let Some(id) = dom.attr(element.node, "id") {
            return format!("#{id}");
        }
        if let Some(name) = dom.attr(element.node, "name") {
            return format!("[name={name}]");
        }
        format!("<{}>", dom.tag_name(element.node).unwrap_or("?"))
    }
}

fn names_of<'a>(args: impl Iterator<Item = &'a HandlerArg>) -> Vec<String> {
    args.filter_map(HandlerArg::as_name).collect()
}

impl LayerHost for Page {
    fn resolve(&self, name: &str) -> Option<ElementHandle> {
        self.resolve_in(name, self.scope)
    }

    fn absolute_position(&self, element: ElementHandle) -> (i64, i64) {
        let Some(document) = self.documents.get(element.document.0) else {
            return (0, 0);
        };
        let dom = &document.dom;
        let (mut x, mut y) = (dom.offset_left(element.node), dom.offset_top(element.node));
        let mut cursor = dom.offset_parent(element.node);
        while let Some(ancestor) = cursor {
            x = x.saturating_add(dom.offset_left(ancestor));
            y = y.saturating_add(dom.offset_top(ancestor));
            cursor = dom.offset_parent(ancestor);
        }
        (x, y)
    }

    fn set_style_position(&mut self, element: ElementHandle, left: i64, top: i64) {
        let unit = self.options.length_unit.clone();
        self.set_style_value(element, "left", &format!("{left}{unit}"));
        self.set_style_value(element, "top", &format!("{top}{unit}"));
    }

    fn watch_pointer_leave(&mut self, element: ElementHandle) -> bool {
        self.listeners
            .add(element, EventType::MouseOut, Listener::AutoHide)
    }

    fn style_value(&self, element: ElementHandle, property: &str) -> Option<String> {
        self.documents
            .get(element.document.0)?
            .dom
            .style_get(element.node, property)
    }

    fn set_style_value(&mut self, element: ElementHandle, property: &str, value: &str) {
        if let Some(document) = self.documents.get_mut(element.document.0) {
            document.dom.style_set(element.node, property, value);
        }
    }

    fn scroll_offset(&self, document: DocumentId) -> (i64, i64) {
        self.documents
            .get(document.0)
            .map(|document| (document.scroll_left, document.scroll_top))
            .unwrap_or((0, 0))
    }

    fn pointer(&self) -> Option<PointerEvent> {
        self.pointer
    }
}
