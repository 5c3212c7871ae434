//! Hover/focus spotlight: delayed caption reveal with document dimming.
//!
//! DESIGN
//! ======
//! `SpotlightCore` is a pure state machine over candidate indices. Every input
//! (pointer, touch, focus, key, timer) is a `SpotlightEvent`; the core answers
//! with `SpotlightCommand`s that either mutate the document or ask the host to
//! schedule/cancel a reveal timer. The browser adapter owns one timer per
//! candidate and never decides anything itself.
//!
//! INVARIANTS
//! ==========
//! - At most one candidate is active. Activating another releases the previous
//!   one in the same command batch.
//! - A candidate has at most one pending reveal. Re-entering replaces it.
//! - A reveal only fires if it is still pending when the timer reports back.

#[cfg(test)]
#[path = "spotlight_test.rs"]
mod spotlight_test;

use std::collections::BTreeSet;

use crate::config::SpotlightConfig;
use crate::consts::MAX_TIMER_DELAY_MS;
use crate::effect::{Effect, Node};

/// Inputs to the spotlight state machine. Indices address candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpotlightEvent {
    PointerEnter(usize),
    PointerLeave(usize),
    Click(usize),
    TouchEnd(usize),
    TouchCancel(usize),
    FocusIn(usize),
    FocusOut(usize),
    /// The global cancel key was pressed.
    CancelKey,
    /// A reveal timer scheduled for this candidate elapsed.
    RevealDue(usize),
}

/// Work the host must carry out after an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpotlightCommand {
    Apply(Effect),
    /// Start (or restart) the reveal timer for a candidate.
    Schedule { candidate: usize, delay_ms: u32 },
    /// Stop the reveal timer for a candidate.
    Cancel { candidate: usize },
}

#[derive(Debug, Clone)]
pub struct SpotlightCore {
    candidates: usize,
    delay_ms: u32,
    active_class: String,
    dim_class: String,
    active: Option<usize>,
    pending: BTreeSet<usize>,
}

impl SpotlightCore {
    #[must_use]
    pub fn new(candidates: usize, delay_ms: u32, active_class: &str, dim_class: &str) -> Self {
        Self {
            candidates,
            delay_ms,
            active_class: active_class.to_owned(),
            dim_class: dim_class.to_owned(),
            active: None,
            pending: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn from_config(candidates: usize, delay_ms: u32, config: &SpotlightConfig) -> Self {
        Self::new(candidates, delay_ms, &config.active_class, &config.dim_class)
    }

    /// The currently spotlit candidate.
    #[must_use]
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// Whether the document is dimmed. True exactly when a candidate is active.
    #[must_use]
    pub fn is_dimmed(&self) -> bool {
        self.active.is_some()
    }

    #[must_use]
    pub fn is_pending(&self, candidate: usize) -> bool {
        self.pending.contains(&candidate)
    }

    #[must_use]
    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    /// Advance the state machine by one event.
    pub fn handle(&mut self, event: SpotlightEvent) -> Vec<SpotlightCommand> {
        let mut out = Vec::new();
        match event {
            SpotlightEvent::PointerEnter(i) if self.in_range(i) => {
                if self.pending.contains(&i) {
                    out.push(SpotlightCommand::Cancel { candidate: i });
                }
                if self.active != Some(i) {
                    self.pending.insert(i);
                    out.push(SpotlightCommand::Schedule { candidate: i, delay_ms: self.delay_ms });
                }
            }
            SpotlightEvent::RevealDue(i) if self.in_range(i) => {
                if self.pending.remove(&i) {
                    self.activate(i, &mut out);
                }
            }
            SpotlightEvent::FocusIn(i) if self.in_range(i) => {
                self.cancel_pending(i, &mut out);
                self.activate(i, &mut out);
            }
            SpotlightEvent::PointerLeave(i)
            | SpotlightEvent::Click(i)
            | SpotlightEvent::TouchEnd(i)
            | SpotlightEvent::TouchCancel(i)
            | SpotlightEvent::FocusOut(i)
                if self.in_range(i) =>
            {
                self.cancel_pending(i, &mut out);
                self.release(i, &mut out);
            }
            SpotlightEvent::CancelKey => {
                let pending = std::mem::take(&mut self.pending);
                out.extend(pending.into_iter().map(|candidate| SpotlightCommand::Cancel { candidate }));
                if let Some(i) = self.active {
                    self.release(i, &mut out);
                }
            }
            _ => {}
        }
        out
    }

    fn in_range(&self, candidate: usize) -> bool {
        candidate < self.candidates
    }

    fn cancel_pending(&mut self, candidate: usize, out: &mut Vec<SpotlightCommand>) {
        if self.pending.remove(&candidate) {
            out.push(SpotlightCommand::Cancel { candidate });
        }
    }

    fn activate(&mut self, candidate: usize, out: &mut Vec<SpotlightCommand>) {
        match self.active {
            Some(current) if current == candidate => return,
            Some(current) => {
                out.push(SpotlightCommand::Apply(Effect::remove_class(Node::Candidate(current), &self.active_class)));
            }
            None => {
                out.push(SpotlightCommand::Apply(Effect::add_class(Node::Body, &self.dim_class)));
            }
        }
        out.push(SpotlightCommand::Apply(Effect::add_class(Node::Candidate(candidate), &self.active_class)));
        self.active = Some(candidate);
    }

    fn release(&mut self, candidate: usize, out: &mut Vec<SpotlightCommand>) {
        if self.active != Some(candidate) {
            return;
        }
        self.active = None;
        out.push(SpotlightCommand::Apply(Effect::remove_class(Node::Candidate(candidate), &self.active_class)));
        out.push(SpotlightCommand::Apply(Effect::remove_class(Node::Body, &self.dim_class)));
    }
}

/// Parse the reveal delay custom property.
///
/// Accepts `3400`, `3400ms` and `3.4s`. Anything absent, negative or
/// non-numeric yields `default_ms`. Values beyond what a browser timeout can
/// hold are clamped to `MAX_TIMER_DELAY_MS`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn parse_delay_ms(raw: Option<&str>, default_ms: u32) -> u32 {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return default_ms;
    };
    let (number, scale) = if let Some(ms) = raw.strip_suffix("ms") {
        (ms, 1.0)
    } else if let Some(secs) = raw.strip_suffix('s') {
        (secs, 1000.0)
    } else {
        (raw, 1.0)
    };
    match number.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => (value * scale).round().min(f64::from(MAX_TIMER_DELAY_MS)) as u32,
        _ => default_ms,
    }
}

#[cfg(feature = "hydrate")]
pub use browser::install;

#[cfg(feature = "hydrate")]
mod browser {
    use std::cell::RefCell;
    use std::rc::Rc;

    use gloo_events::EventListener;
    use wasm_bindgen::JsCast;
    use web_sys::{Document, Element, KeyboardEvent, Window};

    use super::{SpotlightCommand, SpotlightCore, SpotlightEvent, parse_delay_ms};
    use crate::config::SpotlightConfig;
    use crate::dom;
    use crate::effect::Node;
    use crate::error::PageError;
    use crate::timers::TimerSlot;

    const BINDINGS: [(&str, fn(usize) -> SpotlightEvent); 7] = [
        ("mouseenter", SpotlightEvent::PointerEnter),
        ("mouseleave", SpotlightEvent::PointerLeave),
        ("click", SpotlightEvent::Click),
        ("touchend", SpotlightEvent::TouchEnd),
        ("touchcancel", SpotlightEvent::TouchCancel),
        ("focusin", SpotlightEvent::FocusIn),
        ("focusout", SpotlightEvent::FocusOut),
    ];

    struct Spotlight {
        core: RefCell<SpotlightCore>,
        candidates: Vec<Element>,
        body: Element,
        timers: Vec<TimerSlot>,
    }

    impl Spotlight {
        fn resolve(&self, node: Node) -> Option<Element> {
            match node {
                Node::Candidate(i) => self.candidates.get(i).cloned(),
                Node::Body => Some(self.body.clone()),
                _ => None,
            }
        }
    }

    fn dispatch(spotlight: &Rc<Spotlight>, event: SpotlightEvent) {
        let commands = spotlight.core.borrow_mut().handle(event);
        let mut effects = Vec::new();
        for command in commands {
            match command {
                SpotlightCommand::Apply(effect) => effects.push(effect),
                SpotlightCommand::Schedule { candidate, delay_ms } => {
                    let Some(slot) = spotlight.timers.get(candidate) else {
                        continue;
                    };
                    let handle = Rc::clone(spotlight);
                    slot.arm(delay_ms, move || dispatch(&handle, SpotlightEvent::RevealDue(candidate)));
                }
                SpotlightCommand::Cancel { candidate } => {
                    if let Some(slot) = spotlight.timers.get(candidate) {
                        slot.clear();
                    }
                }
            }
        }
        dom::apply_all(&effects, |node| spotlight.resolve(node));
    }

    /// Wire every candidate in `document`. Returns the number of candidates.
    pub fn install(window: &Window, document: &Document, config: &SpotlightConfig) -> Result<usize, PageError> {
        let candidates = dom::query_all(document, &config.selector)?;
        if candidates.is_empty() {
            return Err(PageError::MissingElement { selector: config.selector.clone() });
        }
        let root = dom::root(document)?;
        let delay_ms = parse_delay_ms(
            dom::css_variable(window, &root, &config.delay_var).as_deref(),
            config.default_delay_ms,
        );
        let count = candidates.len();
        let spotlight = Rc::new(Spotlight {
            core: RefCell::new(SpotlightCore::from_config(count, delay_ms, config)),
            body: dom::body(document)?,
            timers: (0..count).map(|_| TimerSlot::default()).collect(),
            candidates,
        });

        for (index, element) in spotlight.candidates.iter().enumerate() {
            for (kind, event) in BINDINGS {
                let handle = Rc::clone(&spotlight);
                EventListener::new(element, kind, move |_| dispatch(&handle, event(index))).forget();
            }
        }

        let handle = Rc::clone(&spotlight);
        let cancel_key = config.cancel_key.clone();
        EventListener::new(document, "keydown", move |event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            if event.key() == cancel_key {
                dispatch(&handle, SpotlightEvent::CancelKey);
            }
        })
        .forget();

        log::debug!("spotlight: {count} candidates, reveal after {delay_ms}ms");
        Ok(count)
    }
}
