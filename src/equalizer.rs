//! Two-column height equalizer.
//!
//! Each layout group pairs a measured column with a stretched one. The
//! measured column's rendered height becomes the stretched column's
//! `min-height`, so the shorter side grows and nothing is ever cropped.
//!
//! The decision logic works against the `ColumnGroup` trait; the browser
//! adapter implements it over two `HtmlElement`s and a breakpoint query.

#[cfg(test)]
#[path = "equalizer_test.rs"]
mod equalizer_test;

/// A column within a layout group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Which column is measured; the other one stretches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    MeasureLeft,
    #[default]
    MeasureRight,
}

impl Direction {
    /// Parse the group's direction attribute. Anything but `left` means right.
    #[must_use]
    pub fn from_attr(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("left") => Self::MeasureLeft,
            _ => Self::MeasureRight,
        }
    }

    #[must_use]
    pub fn measured(self) -> Side {
        match self {
            Self::MeasureLeft => Side::Left,
            Self::MeasureRight => Side::Right,
        }
    }

    #[must_use]
    pub fn stretched(self) -> Side {
        self.measured().opposite()
    }
}

/// How the group is currently laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    SingleColumn,
    TwoColumn,
}

/// What `equalize` did to a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Columns are stacked; any stretch height was cleared.
    Stacked,
    /// The stretched side received `min-height: px`.
    Stretched { side: Side, px: u32 },
    /// The measured column had no height; the stretch height stays cleared.
    Unmeasured,
}

/// Access to one rendered layout group.
pub trait ColumnGroup {
    fn direction(&self) -> Direction;
    fn mode(&self) -> LayoutMode;
    /// Rendered outer height of a column in CSS pixels.
    fn outer_height(&self, side: Side) -> f64;
    fn clear_min_height(&mut self, side: Side);
    fn set_min_height(&mut self, side: Side, px: u32);
}

/// Equalize one group.
///
/// The stretch height is always cleared before measuring so a previous pass
/// never feeds into the next one. The measured column is never written to.
pub fn equalize<G: ColumnGroup + ?Sized>(group: &mut G) -> Outcome {
    let direction = group.direction();
    let stretched = direction.stretched();
    group.clear_min_height(stretched);
    if group.mode() == LayoutMode::SingleColumn {
        return Outcome::Stacked;
    }
    match rounded_px(group.outer_height(direction.measured())) {
        Some(px) => {
            group.set_min_height(stretched, px);
            Outcome::Stretched { side: stretched, px }
        }
        None => Outcome::Unmeasured,
    }
}

/// Round a measured height to whole pixels. `None` unless strictly positive.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn rounded_px(height: f64) -> Option<u32> {
    if !height.is_finite() {
        return None;
    }
    let px = height.round();
    if px < 1.0 {
        return None;
    }
    Some(px.min(f64::from(u32::MAX)) as u32)
}

/// Counts images until every one has loaded or failed.
///
/// Each image settles at most once, whether it reports `load`, `error` or
/// both, so a broken image can never hold recomputation back.
#[derive(Debug, Clone)]
pub struct SettleTracker {
    settled: Vec<bool>,
    remaining: usize,
    done: bool,
}

impl SettleTracker {
    #[must_use]
    pub fn new(total: usize) -> Self {
        Self { settled: vec![false; total], remaining: total, done: false }
    }

    /// Whether nothing is outstanding at construction. The caller should
    /// recompute immediately in that case.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.remaining == 0
    }

    /// Mark image `index` settled. Returns `true` exactly once, when the last
    /// outstanding image settles.
    pub fn settle(&mut self, index: usize) -> bool {
        let Some(flag) = self.settled.get_mut(index) else {
            return false;
        };
        if *flag {
            return false;
        }
        *flag = true;
        self.remaining -= 1;
        if self.remaining == 0 && !self.done {
            self.done = true;
            return true;
        }
        false
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
    use web_sys::{Document, Element, HtmlElement, HtmlImageElement, Window};

    use super::{ColumnGroup, Direction, LayoutMode, Outcome, SettleTracker, Side, equalize};
    use crate::config::EqualizerConfig;
    use crate::dom;
    use crate::error::PageError;
    use crate::timers::TimerSlot;

    /// A group's elements, resolved once at install.
    struct GroupElements {
        left: HtmlElement,
        right: HtmlElement,
        direction: Direction,
    }

    /// One group as seen during a single recomputation.
    struct DomGroup<'a> {
        elements: &'a GroupElements,
        mode: LayoutMode,
    }

    impl DomGroup<'_> {
        fn column(&self, side: Side) -> &HtmlElement {
            match side {
                Side::Left => &self.elements.left,
                Side::Right => &self.elements.right,
            }
        }
    }

    impl ColumnGroup for DomGroup<'_> {
        fn direction(&self) -> Direction {
            self.elements.direction
        }

        fn mode(&self) -> LayoutMode {
            self.mode
        }

        fn outer_height(&self, side: Side) -> f64 {
            self.column(side).get_bounding_client_rect().height()
        }

        fn clear_min_height(&mut self, side: Side) {
            if let Err(err) = self.column(side).style().remove_property("min-height") {
                log::warn!("clearing min-height failed: {err:?}");
            }
        }

        fn set_min_height(&mut self, side: Side, px: u32) {
            if let Err(err) = self.column(side).style().set_property("min-height", &format!("{px}px")) {
                log::warn!("setting min-height failed: {err:?}");
            }
        }
    }

    struct Equalizer {
        window: Window,
        groups: Vec<GroupElements>,
        single_column_query: String,
        resize_timer: TimerSlot,
        images: RefCell<SettleTracker>,
    }

    impl Equalizer {
        fn recompute(&self) {
            let mode = if dom::media_matches(&self.window, &self.single_column_query) {
                LayoutMode::SingleColumn
            } else {
                LayoutMode::TwoColumn
            };
            for elements in &self.groups {
                let mut group = DomGroup { elements, mode };
                if equalize(&mut group) == Outcome::Unmeasured {
                    log::debug!("equalizer: measured column has no height");
                }
            }
        }
    }

    fn column(group: &Element, selector: &str) -> Result<HtmlElement, PageError> {
        dom::query_within(group, selector)?
            .and_then(|el| el.dyn_ref::<HtmlElement>().cloned())
            .ok_or_else(|| PageError::MissingElement { selector: selector.to_owned() })
    }

    fn collect_groups(document: &Document, config: &EqualizerConfig) -> Result<Vec<GroupElements>, PageError> {
        let mut groups = Vec::new();
        for group in dom::query_all(document, &config.group_selector)? {
            let (left, right) = match (column(&group, &config.left_selector), column(&group, &config.right_selector)) {
                (Ok(left), Ok(right)) => (left, right),
                (Err(err), _) | (_, Err(err)) => {
                    log::debug!("equalizer: skipping group: {err}");
                    continue;
                }
            };
            let direction = Direction::from_attr(group.get_attribute(&config.direction_attr).as_deref());
            groups.push(GroupElements { left, right, direction });
        }
        Ok(groups)
    }

    fn on_resize(equalizer: &Rc<Equalizer>, delay_ms: u32) {
        let handle = Rc::clone(equalizer);
        equalizer.resize_timer.arm(delay_ms, move || handle.recompute());
    }

    fn track_images(equalizer: &Rc<Equalizer>, images: &[HtmlImageElement]) {
        for (index, image) in images.iter().enumerate() {
            if image.complete() {
                equalizer.images.borrow_mut().settle(index);
                continue;
            }
            for kind in ["load", "error"] {
                let handle = Rc::clone(equalizer);
                EventListener::once(image, kind, move |_| {
                    let all_settled = handle.images.borrow_mut().settle(index);
                    if all_settled {
                        handle.recompute();
                    }
                })
                .forget();
            }
        }
    }

    /// Wire every layout group. Returns the number of groups.
    pub fn install(window: &Window, document: &Document, config: &EqualizerConfig) -> Result<usize, PageError> {
        let groups = collect_groups(document, config)?;
        if groups.is_empty() {
            return Err(PageError::MissingElement { selector: config.group_selector.clone() });
        }
        let images: Vec<HtmlImageElement> = dom::query_all(document, "img")?
            .into_iter()
            .filter_map(|el| el.dyn_ref::<HtmlImageElement>().cloned())
            .collect();

        let count = groups.len();
        let equalizer = Rc::new(Equalizer {
            window: window.clone(),
            groups,
            single_column_query: config.single_column_query.clone(),
            resize_timer: TimerSlot::default(),
            images: RefCell::new(SettleTracker::new(images.len())),
        });

        track_images(&equalizer, &images);
        if equalizer.images.borrow().is_complete() {
            equalizer.recompute();
        }

        for kind in ["resize", "orientationchange"] {
            let handle = Rc::clone(&equalizer);
            let delay_ms = config.debounce_ms;
            EventListener::new(window, kind, move |_| on_resize(&handle, delay_ms)).forget();
        }

        let handle = Rc::clone(&equalizer);
        dom::after_load(window, document, move || handle.recompute());

        log::debug!("equalizer: {count} groups, {} images tracked", images.len());
        Ok(count)
    }
}
