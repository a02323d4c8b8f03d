//! Bounded alert queue with frame-driven decay.
//!
//! Alerts are kept in insertion order. Overflow evicts the least recently
//! added alert, which is also the one rendered first in the container.

use crate::config::AlertConfig;
use crate::{Dismiss, close_id};
use deck_dom::{Dom, EventKind, InsertPosition, Node, id};
use indexmap::IndexMap;
use log::{debug, error};

/// An active alert.
#[derive(Clone, Debug, PartialEq)]
pub struct Alert {
    pub name: String,
    /// w3 color suffix, e.g. "green".
    pub color: String,
    /// Body markup.
    pub text: String,
    /// Seconds until removal.
    pub remaining: f64,
}

pub const ALERT_SCOPE: &str = "alert";

/// Element id of the alert called `name`.
pub fn alert_id(name: &str) -> String {
    id::scoped(ALERT_SCOPE, name)
}

impl Alert {
    pub fn element_id(&self) -> String {
        alert_id(&self.name)
    }
}

fn render(alert: &Alert) -> Node {
    let id = alert.element_id();
    Node::new("div")
        .id(id.clone())
        .class(&format!("w3-bar w3-animate-bottom w3-{}", alert.color))
        .style("padding: 2px 15px 2px 15px;")
        .child(
            Node::new("span")
                .id(close_id(&id))
                .class("w3-closebtn")
                .html("&times;"),
        )
        .child(Node::new("span").html(alert.text.clone()))
}

/// Keyed collection of alerts rendered into one container element.
pub struct NotificationStore {
    container: String,
    config: AlertConfig,
    alerts: IndexMap<String, Alert>,
}

impl NotificationStore {
    pub fn new(container: impl Into<String>, config: AlertConfig) -> Self {
        Self {
            container: container.into(),
            config,
            alerts: IndexMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.alerts.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Alert> {
        self.alerts.get(name)
    }

    pub fn remaining(&self, name: &str) -> Option<f64> {
        self.alerts.get(name).map(|a| a.remaining)
    }

    /// Active alert names, oldest first.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.alerts.keys().map(String::as_str)
    }

    /// Show an alert, replacing any alert with the same name (its timer
    /// restarts). Returns the name of the alert evicted to stay within
    /// capacity, if any.
    pub fn upsert<A, D>(&mut self, dom: &mut D, name: &str, color: &str, text: &str) -> Option<String>
    where
        A: From<Dismiss>,
        D: Dom<A> + ?Sized,
    {
        self.remove::<A, D>(dom, name);

        let alert = Alert {
            name: name.to_string(),
            color: color.to_string(),
            text: text.to_string(),
            remaining: self.config.lifetime_secs,
        };
        let id = alert.element_id();
        if let Err(e) = dom.insert(&self.container, InsertPosition::BeforeEnd, render(&alert)) {
            error!("Failed to render alert '{}': {}", name, e);
            return None;
        }
        dom.listen(
            &close_id(&id),
            EventKind::Click,
            A::from(Dismiss::Alert(name.to_string())),
        );
        self.alerts.insert(name.to_string(), alert);

        if self.alerts.len() > self.config.capacity.max(1) {
            let oldest = self.alerts.get_index(0).map(|(k, _)| k.clone())?;
            debug!("Alert queue full, evicting '{}'", oldest);
            self.remove::<A, D>(dom, &oldest);
            return Some(oldest);
        }
        None
    }

    /// Remove an alert and its rendering. Absent names are ignored.
    pub fn remove<A, D>(&mut self, dom: &mut D, name: &str) -> bool
    where
        D: Dom<A> + ?Sized,
    {
        match self.alerts.shift_remove(name) {
            Some(alert) => {
                dom.remove(&alert.element_id());
                true
            }
            None => false,
        }
    }

    /// Advance every alert by `delta_secs`. Alerts inside the fade window
    /// get an opacity proportional to their remaining time; alerts at or
    /// below zero are removed. Returns the removed names, oldest first.
    pub fn tick<A, D>(&mut self, dom: &mut D, delta_secs: f64) -> Vec<String>
    where
        D: Dom<A> + ?Sized,
    {
        let fade = self.config.fade_window_secs;
        let mut expired = Vec::new();

        for alert in self.alerts.values_mut() {
            alert.remaining -= delta_secs;
            if alert.remaining <= 0.0 {
                expired.push(alert.name.clone());
            } else if alert.remaining <= fade {
                let opacity = (alert.remaining / fade).clamp(0.0, 1.0);
                dom.set_opacity(&alert.element_id(), opacity);
            }
        }

        for name in &expired {
            debug!("Alert '{}' expired", name);
            self.remove::<A, D>(dom, name);
        }
        expired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_dom::{MemoryDom, ROOT_ID};

    fn setup() -> (MemoryDom<Dismiss>, NotificationStore) {
        let mut dom: MemoryDom<Dismiss> = MemoryDom::new();
        dom.insert(ROOT_ID, InsertPosition::BeforeEnd, Node::new("div").id("alerts"))
            .unwrap();
        (dom, NotificationStore::new("alerts", AlertConfig::default()))
    }

    fn close(x: f64, y: f64) -> bool {
        (x - y).abs() < 1e-9
    }

    #[test]
    fn test_upsert_renders_and_binds_dismiss() {
        let (mut dom, mut store) = setup();
        assert_eq!(store.upsert(&mut dom, "gamelog_loaded", "green", "Gamelog loaded!"), None);

        assert_eq!(dom.child_ids("alerts"), vec![alert_id("gamelog_loaded")]);
        assert!(dom.has_class("alert_gamelog_loaded", "w3-green"));
        let fired = dom.dispatch(&close_id(&alert_id("gamelog_loaded")), EventKind::Click, None);
        assert_eq!(fired[0].action, Dismiss::Alert("gamelog_loaded".into()));
    }

    #[test]
    fn test_same_name_replaces_and_resets_timer() {
        let (mut dom, mut store) = setup();
        store.upsert(&mut dom, "loading", "blue", "Loading...");
        store.upsert(&mut dom, "other", "blue", "Other");
        store.tick(&mut dom, 3.5);
        store.upsert(&mut dom, "loading", "green", "Done");

        assert_eq!(store.len(), 2);
        assert!(close(store.remaining("loading").unwrap(), 4.0));
        assert_eq!(store.get("loading").unwrap().color, "green");
        // Replacement counts as the newest alert.
        assert_eq!(store.names().collect::<Vec<_>>(), vec!["other", "loading"]);
        assert_eq!(dom.child_ids("alerts"), vec![alert_id("other"), alert_id("loading")]);
        assert_eq!(dom.opacity(&alert_id("loading")), None);
    }

    #[test]
    fn test_names_stay_unique_under_repeated_upserts() {
        let (mut dom, mut store) = setup();
        for i in 0..30 {
            let name = format!("a{}", i % 4);
            store.upsert(&mut dom, &name, "blue", "x");
            let mut names: Vec<&str> = store.names().collect();
            let before = names.len();
            names.sort();
            names.dedup();
            assert_eq!(names.len(), before);
        }
        assert_eq!(store.len(), 4);
        assert_eq!(dom.child_ids("alerts").len(), 4);
    }

    #[test]
    fn test_overflow_evicts_oldest_surviving() {
        let (mut dom, mut store) = setup();
        for i in 0..10 {
            assert_eq!(store.upsert(&mut dom, &format!("n{}", i), "blue", "x"), None);
        }
        store.remove(&mut dom, "n0");
        assert_eq!(store.upsert(&mut dom, "n10", "blue", "x"), None);

        let evicted = store.upsert(&mut dom, "n11", "blue", "x");
        assert_eq!(evicted.as_deref(), Some("n1"));
        assert_eq!(store.len(), 10);
        assert!(!dom.contains(&alert_id("n1")));
        assert_eq!(dom.child_ids("alerts").first().map(String::as_str), Some(alert_id("n2").as_str()));
        assert_eq!(dom.child_ids("alerts").last().map(String::as_str), Some(alert_id("n11").as_str()));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let (mut dom, mut store) = setup();
        store.upsert(&mut dom, "x", "red", "x");
        assert!(store.remove(&mut dom, "x"));
        assert!(!store.remove(&mut dom, "x"));
        assert!(!store.remove(&mut dom, "never"));
        assert!(store.is_empty());
        assert!(dom.child_ids("alerts").is_empty());
    }

    #[test]
    fn test_zero_tick_changes_nothing() {
        let (mut dom, mut store) = setup();
        store.upsert(&mut dom, "a", "blue", "x");
        store.upsert(&mut dom, "b", "blue", "x");
        store.tick(&mut dom, 1.25);
        let before: Vec<f64> = store.alerts.values().map(|a| a.remaining).collect();

        assert!(store.tick(&mut dom, 0.0).is_empty());
        let after: Vec<f64> = store.alerts.values().map(|a| a.remaining).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_decay_fades_then_removes() {
        let (mut dom, mut store) = setup();
        store.upsert(&mut dom, "low-battery", "red", "Battery low");

        store.tick(&mut dom, 3.0);
        assert!(close(store.remaining("low-battery").unwrap(), 1.0));
        assert!(close(dom.opacity(&alert_id("low-battery")).unwrap(), 1.0));

        store.tick(&mut dom, 0.6);
        assert!(close(store.remaining("low-battery").unwrap(), 0.4));
        assert!(close(dom.opacity(&alert_id("low-battery")).unwrap(), 0.4));

        let expired = store.tick(&mut dom, 0.5);
        assert_eq!(expired, vec!["low-battery"]);
        assert!(!store.contains("low-battery"));
        assert_eq!(store.names().count(), 0);
        assert!(!dom.contains(&alert_id("low-battery")));
    }

    #[test]
    fn test_no_fade_before_window() {
        let (mut dom, mut store) = setup();
        store.upsert(&mut dom, "a", "blue", "x");
        store.tick(&mut dom, 2.0);
        assert_eq!(dom.opacity(&alert_id("a")), None);
    }

    #[test]
    fn test_configured_lifetime_and_window() {
        let (mut dom, _) = setup();
        let mut store = NotificationStore::new(
            "alerts",
            AlertConfig {
                lifetime_secs: 2.5,
                fade_window_secs: 2.0,
                capacity: 2,
            },
        );
        store.upsert(&mut dom, "a", "blue", "x");
        store.tick(&mut dom, 1.5);
        assert!(close(dom.opacity(&alert_id("a")).unwrap(), 0.5));

        store.upsert(&mut dom, "b", "blue", "x");
        assert_eq!(store.upsert(&mut dom, "c", "blue", "x").as_deref(), Some("a"));
    }

    #[test]
    fn test_name_matching_another_close_control_is_kept() {
        let (mut dom, mut store) = setup();
        store.upsert(&mut dom, "x", "blue", "x");
        assert_eq!(store.upsert(&mut dom, "x_close", "blue", "x"), None);
        store.upsert(&mut dom, "x.close", "blue", "x");

        assert_eq!(store.names().collect::<Vec<_>>(), vec!["x", "x_close", "x.close"]);
        assert_eq!(dom.child_ids("alerts").len(), 3);
        let fired = dom.dispatch(&close_id(&alert_id("x")), EventKind::Click, None);
        assert_eq!(fired[0].action, Dismiss::Alert("x".into()));
    }

    #[test]
    fn test_missing_container_leaves_store_unchanged() {
        let mut dom: MemoryDom<Dismiss> = MemoryDom::new();
        let mut store = NotificationStore::new("alerts", AlertConfig::default());
        assert_eq!(store.upsert(&mut dom, "a", "blue", "x"), None);
        assert!(store.is_empty());
    }
}
