//! In-memory catalog pages for exercising the scraping core without Chrome.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::config::Selectors;
use super::driver::{Driver, Element};
use crate::error::ScrapeError;

type ClickHook = Arc<dyn Fn() + Send + Sync>;
type ListingFactory = Arc<dyn Fn(usize) -> FakeElement + Send + Sync>;

/// A static element tree. Children are keyed by the exact selector string
/// used to look them up.
#[derive(Clone)]
pub struct FakeElement {
    text: String,
    attributes: HashMap<String, String>,
    children: HashMap<String, Vec<FakeElement>>,
    displayed: bool,
    enabled: bool,
    on_click: Option<ClickHook>,
}

impl FakeElement {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            attributes: HashMap::new(),
            children: HashMap::new(),
            displayed: true,
            enabled: true,
            on_click: None,
        }
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn child(mut self, selector: &str, child: FakeElement) -> Self {
        self.children
            .entry(selector.to_string())
            .or_default()
            .push(child);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.displayed = false;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    fn on_click(mut self, hook: ClickHook) -> Self {
        self.on_click = Some(hook);
        self
    }

    /// A product listing laid out the way the default selectors expect.
    pub fn listing(title: &str, description: &str, price: &str, stars: usize, reviews: &str) -> Self {
        let sel = Selectors::default();
        let mut node = FakeElement::new()
            .child(&sel.title, FakeElement::new().with_text(title).attr("title", title))
            .child(&sel.description, FakeElement::new().with_text(description))
            .child(&sel.price, FakeElement::new().with_text(price))
            .child(&sel.review_count, FakeElement::new().with_text(reviews));
        for _ in 0..stars {
            node = node.child(&sel.rating_star, FakeElement::new());
        }
        node
    }
}

#[async_trait]
impl Element for FakeElement {
    async fn find_one(&self, selector: &str) -> Result<Option<Self>, ScrapeError> {
        Ok(self
            .children
            .get(selector)
            .and_then(|c| c.first())
            .cloned())
    }

    async fn find_many(&self, selector: &str) -> Result<Vec<Self>, ScrapeError> {
        Ok(self.children.get(selector).cloned().unwrap_or_default())
    }

    async fn text(&self) -> Result<String, ScrapeError> {
        Ok(self.text.clone())
    }

    async fn attribute(&self, name: &str) -> Result<Option<String>, ScrapeError> {
        Ok(self.attributes.get(name).cloned())
    }

    async fn is_displayed(&self) -> Result<bool, ScrapeError> {
        Ok(self.displayed)
    }

    async fn is_interactable(&self) -> Result<bool, ScrapeError> {
        Ok(self.displayed && self.enabled)
    }

    async fn click(&self) -> Result<(), ScrapeError> {
        if let Some(hook) = &self.on_click {
            hook();
        }
        Ok(())
    }
}

/// What the reveal control does once its content runs out.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Exhausted {
    Hidden,
    Removed,
}

#[derive(Clone, Copy)]
enum Reveal {
    Absent,
    Finite {
        clicks: usize,
        per_click: usize,
        exhausted: Exhausted,
    },
    Stuck,
}

#[derive(Clone, Copy)]
enum Banner {
    None,
    Accept,
    /// Banner markup without an accept button.
    Bare,
}

/// One catalog page as served by [`FakeDriver`].
#[derive(Clone)]
pub struct FakePage {
    banner: Banner,
    initial: usize,
    reveal: Reveal,
    listing: ListingFactory,
}

impl FakePage {
    pub fn new() -> Self {
        Self {
            banner: Banner::None,
            initial: 0,
            reveal: Reveal::Absent,
            listing: Arc::new(|i| {
                FakeElement::listing(&format!("Item {}", i), "A product", "$10.00", 3, "4 reviews")
            }),
        }
    }

    pub fn with_banner(mut self) -> Self {
        self.banner = Banner::Accept;
        self
    }

    pub fn with_bare_banner(mut self) -> Self {
        self.banner = Banner::Bare;
        self
    }

    pub fn with_listings(mut self, initial: usize) -> Self {
        self.initial = initial;
        self
    }

    pub fn revealing(mut self, clicks: usize, per_click: usize, exhausted: Exhausted) -> Self {
        self.reveal = Reveal::Finite {
            clicks,
            per_click,
            exhausted,
        };
        self
    }

    /// Reveal control that is visible but never becomes clickable.
    pub fn stuck_reveal(mut self) -> Self {
        self.reveal = Reveal::Stuck;
        self
    }

    pub fn listing_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(usize) -> FakeElement + Send + Sync + 'static,
    {
        self.listing = Arc::new(f);
        self
    }

    fn visible_listings(&self, clicks: usize) -> usize {
        match self.reveal {
            Reveal::Finite {
                clicks: max,
                per_click,
                ..
            } => self.initial + clicks.min(max) * per_click,
            _ => self.initial,
        }
    }
}

#[derive(Default)]
struct FakeState {
    pages: HashMap<String, FakePage>,
    current: Option<String>,
    clicks: usize,
    banner_accepted: bool,
    navigations: Vec<String>,
    closes: usize,
}

/// Driver over a set of fake pages keyed by absolute URL.
///
/// Clones share state, so a test can keep one to inspect after handing
/// another to the code under test.
#[derive(Clone, Default)]
pub struct FakeDriver {
    state: Arc<Mutex<FakeState>>,
    selectors: Selectors,
}

impl FakeDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(self, url: &str, page: FakePage) -> Self {
        self.state
            .lock()
            .unwrap()
            .pages
            .insert(url.to_string(), page);
        self
    }

    pub fn clicks(&self) -> usize {
        self.state.lock().unwrap().clicks
    }

    pub fn banner_accepted(&self) -> bool {
        self.state.lock().unwrap().banner_accepted
    }

    pub fn navigations(&self) -> Vec<String> {
        self.state.lock().unwrap().navigations.clone()
    }

    pub fn closes(&self) -> usize {
        self.state.lock().unwrap().closes
    }

    fn current_page(&self) -> Option<FakePage> {
        let state = self.state.lock().unwrap();
        let url = state.current.as_ref()?;
        state.pages.get(url).cloned()
    }

    fn banner(&self) -> FakeElement {
        let state = Arc::clone(&self.state);
        let accept = FakeElement::new().on_click(Arc::new(move || {
            state.lock().unwrap().banner_accepted = true;
        }));
        FakeElement::new().child(&self.selectors.cookie_accept, accept)
    }

    fn reveal_control(&self, page: &FakePage) -> Option<FakeElement> {
        let clicks = self.clicks();
        match page.reveal {
            Reveal::Absent => None,
            Reveal::Stuck => Some(FakeElement::new().disabled()),
            Reveal::Finite {
                clicks: max,
                exhausted,
                ..
            } => {
                if clicks < max {
                    let state = Arc::clone(&self.state);
                    Some(FakeElement::new().on_click(Arc::new(move || {
                        state.lock().unwrap().clicks += 1;
                    })))
                } else {
                    match exhausted {
                        Exhausted::Hidden => Some(FakeElement::new().hidden()),
                        Exhausted::Removed => None,
                    }
                }
            }
        }
    }
}

#[async_trait]
impl Driver for FakeDriver {
    type Element = FakeElement;

    async fn navigate(&self, url: &str) -> Result<(), ScrapeError> {
        let mut state = self.state.lock().unwrap();
        state.navigations.push(url.to_string());
        if !state.pages.contains_key(url) {
            return Err(ScrapeError::Browser(format!("net::ERR_NAME_NOT_RESOLVED at {}", url)));
        }
        state.current = Some(url.to_string());
        state.clicks = 0;
        state.banner_accepted = false;
        Ok(())
    }

    async fn find_one(&self, selector: &str) -> Result<Option<FakeElement>, ScrapeError> {
        let Some(page) = self.current_page() else {
            return Ok(None);
        };
        if selector == self.selectors.cookie_banner {
            return Ok(match page.banner {
                Banner::None => None,
                Banner::Bare => Some(FakeElement::new()),
                Banner::Accept if self.banner_accepted() => None,
                Banner::Accept => Some(self.banner()),
            });
        }
        if selector == self.selectors.reveal_more {
            return Ok(self.reveal_control(&page));
        }
        Ok(None)
    }

    async fn find_many(&self, selector: &str) -> Result<Vec<FakeElement>, ScrapeError> {
        let Some(page) = self.current_page() else {
            return Ok(Vec::new());
        };
        if selector != self.selectors.listing {
            return Ok(Vec::new());
        }
        let count = page.visible_listings(self.clicks());
        Ok((0..count).map(|i| (page.listing)(i)).collect())
    }

    async fn close(&mut self) -> Result<(), ScrapeError> {
        self.state.lock().unwrap().closes += 1;
        Ok(())
    }
}
