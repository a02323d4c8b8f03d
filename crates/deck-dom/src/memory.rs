//! Headless DOM implementation.
//!
//! Elements live in an arena indexed by slot; ids map to slots. Freed slots
//! are recycled so long running panels with churning alerts stay bounded.

use crate::error::DomError;
use crate::node::{InsertPosition, Node};
use crate::{Dom, EventKind, ROOT_ID};
use log::debug;
use std::collections::{HashMap, HashSet};

/// An action produced by dispatching an event, with the element's value at
/// dispatch time (after any native value update).
#[derive(Clone, Debug, PartialEq)]
pub struct Fired<A> {
    pub action: A,
    pub value: Option<String>,
}

#[derive(Debug)]
struct Element {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    style: Option<String>,
    attrs: Vec<(String, String)>,
    html: Option<String>,
    value: Option<String>,
    opacity: Option<f64>,
    parent: Option<usize>,
    children: Vec<usize>,
}

/// In-memory rendering backend.
pub struct MemoryDom<A> {
    slots: Vec<Option<Element>>,
    free: Vec<usize>,
    ids: HashMap<String, usize>,
    listeners: HashMap<usize, Vec<(EventKind, A)>>,
}

impl<A> Default for MemoryDom<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> MemoryDom<A> {
    /// Create a document holding only the root element.
    pub fn new() -> Self {
        let root = Element {
            tag: "body".to_string(),
            id: Some(ROOT_ID.to_string()),
            classes: Vec::new(),
            style: None,
            attrs: Vec::new(),
            html: None,
            value: None,
            opacity: None,
            parent: None,
            children: Vec::new(),
        };
        let mut ids = HashMap::new();
        ids.insert(ROOT_ID.to_string(), 0);
        Self {
            slots: vec![Some(root)],
            free: Vec::new(),
            ids,
            listeners: HashMap::new(),
        }
    }

    /// Number of live elements, root included.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        // The root is never removed.
        false
    }

    /// Ids of the direct children of `parent`, in document order.
    /// Children without an id are skipped.
    pub fn child_ids(&self, parent: &str) -> Vec<String> {
        self.element_by_id(parent)
            .map(|el| {
                el.children
                    .iter()
                    .filter_map(|&slot| self.element(slot).and_then(|c| c.id.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn opacity(&self, id: &str) -> Option<f64> {
        self.element_by_id(id).and_then(|el| el.opacity)
    }

    pub fn has_class(&self, id: &str, class: &str) -> bool {
        self.element_by_id(id)
            .map(|el| el.classes.iter().any(|c| c == class))
            .unwrap_or(false)
    }

    /// Number of actions bound to an element.
    pub fn listener_count(&self, id: &str) -> usize {
        self.ids
            .get(id)
            .and_then(|slot| self.listeners.get(slot))
            .map(Vec::len)
            .unwrap_or(0)
    }

    /// Serialize the whole document.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(0, &mut out);
        out
    }

    fn element(&self, slot: usize) -> Option<&Element> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    fn element_mut(&mut self, slot: usize) -> Option<&mut Element> {
        self.slots.get_mut(slot).and_then(Option::as_mut)
    }

    fn element_by_id(&self, id: &str) -> Option<&Element> {
        self.ids.get(id).and_then(|&slot| self.element(slot))
    }

    fn element_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        let slot = *self.ids.get(id)?;
        self.element_mut(slot)
    }

    fn alloc(&mut self, element: Element) -> usize {
        match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(element);
                slot
            }
            None => {
                self.slots.push(Some(element));
                self.slots.len() - 1
            }
        }
    }

    fn build(&mut self, node: Node, parent: usize) -> usize {
        let Node {
            tag,
            id,
            classes,
            style,
            attrs,
            html,
            children,
        } = node;
        let value = attrs
            .iter()
            .find(|(k, _)| k == "value")
            .map(|(_, v)| v.clone());

        let slot = self.alloc(Element {
            tag,
            id: id.clone(),
            classes,
            style,
            attrs,
            html,
            value,
            opacity: None,
            parent: Some(parent),
            children: Vec::new(),
        });
        if let Some(id) = id {
            self.ids.insert(id, slot);
        }

        let child_slots: Vec<usize> = children
            .into_iter()
            .map(|child| self.build(child, slot))
            .collect();
        if let Some(el) = self.element_mut(slot) {
            el.children = child_slots;
        }
        slot
    }

    fn free_subtree(&mut self, slot: usize) {
        let Some(el) = self.slots.get_mut(slot).and_then(Option::take) else {
            return;
        };
        if let Some(id) = &el.id {
            self.ids.remove(id);
        }
        self.listeners.remove(&slot);
        self.free.push(slot);
        for child in el.children {
            self.free_subtree(child);
        }
    }

    fn write_html(&self, slot: usize, out: &mut String) {
        let Some(el) = self.element(slot) else {
            return;
        };
        out.push('<');
        out.push_str(&el.tag);
        if let Some(id) = &el.id {
            out.push_str(&format!(" id=\"{}\"", id));
        }
        if !el.classes.is_empty() {
            out.push_str(&format!(" class=\"{}\"", el.classes.join(" ")));
        }
        let style = match (&el.style, el.opacity) {
            (Some(s), Some(o)) => Some(format!("{};opacity:{}", s.trim_end_matches(';'), o)),
            (Some(s), None) => Some(s.clone()),
            (None, Some(o)) => Some(format!("opacity:{}", o)),
            (None, None) => None,
        };
        if let Some(style) = style {
            out.push_str(&format!(" style=\"{}\"", style));
        }
        for (name, value) in &el.attrs {
            if name == "value" {
                continue;
            }
            out.push_str(&format!(" {}=\"{}\"", name, value));
        }
        if let Some(value) = &el.value {
            out.push_str(&format!(" value=\"{}\"", value));
        }
        out.push('>');
        if el.tag == "input" {
            return;
        }
        if let Some(html) = &el.html {
            out.push_str(html);
        }
        for &child in &el.children {
            self.write_html(child, out);
        }
        out.push_str(&format!("</{}>", el.tag));
    }
}

impl<A: Clone> MemoryDom<A> {
    /// Simulate a user event on `id`.
    ///
    /// Input and change events carrying a value first update the element's
    /// value, the way a native form control would, then every action bound
    /// to `kind` is returned in registration order.
    pub fn dispatch(&mut self, id: &str, kind: EventKind, value: Option<&str>) -> Vec<Fired<A>> {
        let Some(&slot) = self.ids.get(id) else {
            debug!("Event {} on missing element '{}'", kind.as_str(), id);
            return Vec::new();
        };

        if let (EventKind::Input | EventKind::Change, Some(v)) = (kind, value) {
            if let Some(el) = self.element_mut(slot) {
                el.value = Some(v.to_string());
            }
        }

        let current = self.element(slot).and_then(|el| el.value.clone());
        self.listeners
            .get(&slot)
            .map(|bound| {
                bound
                    .iter()
                    .filter(|(k, _)| *k == kind)
                    .map(|(_, action)| Fired {
                        action: action.clone(),
                        value: current.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl<A> Dom<A> for MemoryDom<A> {
    fn insert(&mut self, parent: &str, at: InsertPosition, node: Node) -> Result<(), DomError> {
        let parent_slot = *self
            .ids
            .get(parent)
            .ok_or_else(|| DomError::UnknownParent(parent.to_string()))?;

        let mut seen = HashSet::new();
        for id in node.ids() {
            if self.ids.contains_key(id) || !seen.insert(id) {
                return Err(DomError::DuplicateId(id.to_string()));
            }
        }

        let slot = self.build(node, parent_slot);
        if let Some(parent) = self.element_mut(parent_slot) {
            match at {
                InsertPosition::AfterBegin => parent.children.insert(0, slot),
                InsertPosition::BeforeEnd => parent.children.push(slot),
            }
        }
        Ok(())
    }

    fn remove(&mut self, id: &str) -> bool {
        let Some(&slot) = self.ids.get(id) else {
            return false;
        };
        if slot == 0 {
            debug!("Refusing to remove the document root");
            return false;
        }
        let parent = self.element(slot).and_then(|el| el.parent);
        if let Some(parent) = parent.and_then(|p| self.element_mut(p)) {
            parent.children.retain(|&c| c != slot);
        }
        self.free_subtree(slot);
        true
    }

    fn clear_children(&mut self, parent: &str) -> usize {
        let Some(el) = self.element_by_id_mut(parent) else {
            return 0;
        };
        let children = std::mem::take(&mut el.children);
        let count = children.len();
        for child in children {
            self.free_subtree(child);
        }
        count
    }

    fn contains(&self, id: &str) -> bool {
        self.ids.contains_key(id)
    }

    fn value(&self, id: &str) -> Option<String> {
        self.element_by_id(id).and_then(|el| el.value.clone())
    }

    fn set_value(&mut self, id: &str, value: &str) -> bool {
        match self.element_by_id_mut(id) {
            Some(el) => {
                el.value = Some(value.to_string());
                true
            }
            None => false,
        }
    }

    fn set_opacity(&mut self, id: &str, opacity: f64) -> bool {
        match self.element_by_id_mut(id) {
            Some(el) => {
                el.opacity = Some(opacity);
                true
            }
            None => false,
        }
    }

    fn set_class(&mut self, id: &str, class: &str, enabled: bool) -> bool {
        let Some(el) = self.element_by_id_mut(id) else {
            return false;
        };
        let present = el.classes.iter().any(|c| c == class);
        if enabled && !present {
            el.classes.push(class.to_string());
        } else if !enabled && present {
            el.classes.retain(|c| c != class);
        }
        true
    }

    fn listen(&mut self, id: &str, kind: EventKind, action: A) -> bool {
        let Some(&slot) = self.ids.get(id) else {
            return false;
        };
        self.listeners.entry(slot).or_default().push((kind, action));
        true
    }
}
