//! Lazy image loading.
//!
//! Images carrying a deferred-source attribute get their real `src` only once
//! they intersect the viewport. Each image loads at most once; after that it is
//! forgotten by the observer and ignored by the core.

#[cfg(test)]
#[path = "lazy_images_test.rs"]
mod lazy_images_test;

use crate::effect::{Effect, Node};

/// How deferred images are revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Wait for viewport intersection.
    Observe,
    /// No intersection observation available: load everything now.
    Eager,
}

impl Strategy {
    #[must_use]
    pub fn detect(has_intersection_observer: bool) -> Self {
        if has_intersection_observer { Self::Observe } else { Self::Eager }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LazyCommand {
    Apply(Effect),
    Observe(usize),
    Unobserve(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ImageState {
    Deferred(String),
    Loaded,
    /// Empty deferred source; nothing to load.
    Skipped,
}

#[derive(Debug, Clone)]
pub struct LazyImages {
    source_attr: String,
    images: Vec<ImageState>,
}

impl LazyImages {
    /// Track images by their deferred sources, in document order.
    pub fn new<I, S>(source_attr: &str, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let images = sources
            .into_iter()
            .map(|src| {
                let src = src.into();
                if src.trim().is_empty() { ImageState::Skipped } else { ImageState::Deferred(src) }
            })
            .collect();
        Self { source_attr: source_attr.to_owned(), images }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    #[must_use]
    pub fn is_loaded(&self, index: usize) -> bool {
        matches!(self.images.get(index), Some(ImageState::Loaded))
    }

    /// Images still waiting for a source.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.images.iter().filter(|s| matches!(s, ImageState::Deferred(_))).count()
    }

    /// Initial commands for the chosen strategy.
    pub fn start(&mut self, strategy: Strategy) -> Vec<LazyCommand> {
        match strategy {
            Strategy::Observe => self
                .images
                .iter()
                .enumerate()
                .filter(|(_, state)| matches!(state, ImageState::Deferred(_)))
                .map(|(index, _)| LazyCommand::Observe(index))
                .collect(),
            Strategy::Eager => {
                let mut out = Vec::new();
                for index in 0..self.images.len() {
                    self.load(index, &mut out);
                }
                out
            }
        }
    }

    /// React to an intersection report for image `index`.
    pub fn on_intersection(&mut self, index: usize, intersecting: bool) -> Vec<LazyCommand> {
        let mut out = Vec::new();
        if intersecting && self.load(index, &mut out) {
            out.push(LazyCommand::Unobserve(index));
        }
        out
    }

    fn load(&mut self, index: usize, out: &mut Vec<LazyCommand>) -> bool {
        let Some(state) = self.images.get_mut(index) else {
            return false;
        };
        let ImageState::Deferred(src) = std::mem::replace(state, ImageState::Loaded) else {
            return false;
        };
        out.push(LazyCommand::Apply(Effect::set_attribute(Node::Image(index), "src", &src)));
        out.push(LazyCommand::Apply(Effect::remove_attribute(Node::Image(index), &self.source_attr)));
        true
    }
}

#[cfg(feature = "hydrate")]
pub use browser::install;

#[cfg(feature = "hydrate")]
mod browser {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::Closure;
    use web_sys::{
        Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, Window,
    };

    use super::{LazyCommand, LazyImages, Strategy};
    use crate::config::LazyImagesConfig;
    use crate::dom;
    use crate::effect::Node;
    use crate::error::PageError;

    struct Lazy {
        core: RefCell<LazyImages>,
        images: Vec<Element>,
    }

    impl Lazy {
        fn index_of(&self, target: &Element) -> Option<usize> {
            self.images.iter().position(|image| image == target)
        }

        fn run(&self, commands: Vec<LazyCommand>, observer: Option<&IntersectionObserver>) {
            let mut effects = Vec::new();
            for command in commands {
                match command {
                    LazyCommand::Apply(effect) => effects.push(effect),
                    LazyCommand::Observe(index) => {
                        if let (Some(observer), Some(image)) = (observer, self.images.get(index)) {
                            observer.observe(image);
                        }
                    }
                    LazyCommand::Unobserve(index) => {
                        if let (Some(observer), Some(image)) = (observer, self.images.get(index)) {
                            observer.unobserve(image);
                        }
                    }
                }
            }
            dom::apply_all(&effects, |node| match node {
                Node::Image(index) => self.images.get(index).cloned(),
                _ => None,
            });
        }
    }

    fn observer(lazy: &Rc<Lazy>, root_margin: &str) -> Result<IntersectionObserver, PageError> {
        let handle = Rc::clone(lazy);
        let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            move |entries: js_sys::Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Some(entry) = entry.dyn_ref::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    let Some(index) = handle.index_of(&entry.target()) else {
                        continue;
                    };
                    let commands = handle.core.borrow_mut().on_intersection(index, entry.is_intersecting());
                    handle.run(commands, Some(&observer));
                }
            },
        );
        let options = IntersectionObserverInit::new();
        options.set_root_margin(root_margin);
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
        callback.forget();
        Ok(observer)
    }

    /// Start deferring images. Returns the number of deferred images.
    pub fn install(window: &Window, document: &Document, config: &LazyImagesConfig) -> Result<usize, PageError> {
        let selector = format!("img[{}]", config.source_attr);
        let images = dom::query_all(document, &selector)?;
        if images.is_empty() {
            return Err(PageError::MissingElement { selector });
        }
        let sources: Vec<String> = images
            .iter()
            .map(|image| image.get_attribute(&config.source_attr).unwrap_or_default())
            .collect();
        let lazy = Rc::new(Lazy {
            core: RefCell::new(LazyImages::new(&config.source_attr, sources)),
            images,
        });

        let (strategy, observer) = match Strategy::detect(dom::has_property(window, "IntersectionObserver")) {
            Strategy::Observe => match observer(&lazy, &config.root_margin) {
                Ok(observer) => (Strategy::Observe, Some(observer)),
                Err(err) => {
                    log::warn!("lazy images: observer unavailable, loading eagerly: {err}");
                    (Strategy::Eager, None)
                }
            },
            Strategy::Eager => (Strategy::Eager, None),
        };
        let commands = lazy.core.borrow_mut().start(strategy);
        lazy.run(commands, observer.as_ref());

        let count = lazy.core.borrow().len();
        log::debug!("lazy images: {count} deferred, strategy {strategy:?}");
        Ok(count)
    }
}
