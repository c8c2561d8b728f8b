use std::collections::HashMap;

use crate::document::ElementHandle;

/// Client (viewport) coordinates of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerEvent {
    pub client_x: i64,
    pub client_y: i64,
}

impl PointerEvent {
    pub fn new(client_x: i64, client_y: i64) -> Self {
        Self { client_x, client_y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum EventType {
    MouseOver,
    MouseOut,
    Load,
}

impl EventType {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::MouseOver => "mouseover",
            Self::MouseOut => "mouseout",
            Self::Load => "load",
        }
    }

    pub(crate) fn handler_attr(self) -> &'static str {
        match self {
            Self::MouseOver => "onmouseover",
            Self::MouseOut => "onmouseout",
            Self::Load => "onload",
        }
    }

    pub(crate) fn bubbles(self) -> bool {
        !matches!(self, Self::Load)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Listener {
    AutoHide,
}

#[derive(Debug, Default, Clone)]
pub(crate) struct ListenerStore {
    map: HashMap<ElementHandle, HashMap<EventType, Vec<Listener>>>,
}

impl ListenerStore {
    /// Adds `listener` unless the same one is already registered. Returns
    /// whether it was added.
    pub(crate) fn add(&mut self, target: ElementHandle, event: EventType, listener: Listener) -> bool {
        let listeners = self.map.entry(target).or_default().entry(event).or_default();
        if listeners.contains(&listener) {
            return false;
        }
        listeners.push(listener);
        true
    }

    pub(crate) fn get(&self, target: ElementHandle, event: EventType) -> Vec<Listener> {
        self.map
            .get(&target)
            .and_then(|events| events.get(&event))
            .cloned()
            .unwrap_or_default()
    }

    pub(crate) fn has(&self, target: ElementHandle, event: EventType, listener: Listener) -> bool {
        self.map
            .get(&target)
            .and_then(|events| events.get(&event))
            .is_some_and(|listeners| listeners.contains(&listener))
    }
}

#[derive(Debug, Clone)]
pub(crate) struct EventState {
    pub(crate) event_type: EventType,
    pub(crate) target: ElementHandle,
    pub(crate) current_target: ElementHandle,
    pub(crate) related_target: Option<ElementHandle>,
    pub(crate) pointer: Option<PointerEvent>,
}

impl EventState {
    pub(crate) fn new(
        event_type: EventType,
        target: ElementHandle,
        related_target: Option<ElementHandle>,
        pointer: Option<PointerEvent>,
    ) -> Self {
        Self {
            event_type,
            target,
            current_target: target,
            related_target,
            pointer,
        }
    }
}
