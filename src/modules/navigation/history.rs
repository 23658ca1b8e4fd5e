use serde::Serialize;

pub const HOME_PAGE: &str = "index.html";

/// Back-stack of visited pages. Presentation state only: nothing in the
/// watchlist or review stores reads it, and it is never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationHistory {
    home: String,
    pages: Vec<String>,
}

impl Default for NavigationHistory {
    fn default() -> Self {
        Self::new(HOME_PAGE)
    }
}

impl NavigationHistory {
    pub fn new(home: impl Into<String>) -> Self {
        let home = home.into();
        Self {
            pages: vec![home.clone()],
            home,
        }
    }

    pub fn current(&self) -> &str {
        self.pages.last().map(String::as_str).unwrap_or(&self.home)
    }

    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    /// Pushes `page` unless it is already the current page.
    pub fn navigate_to(&mut self, page: &str) -> &str {
        if self.current() != page {
            self.pages.push(page.to_string());
        }
        self.current()
    }

    /// Leaves the current page. With nothing to go back to, resets to home.
    pub fn go_back(&mut self) -> &str {
        if self.pages.len() > 1 {
            self.pages.pop();
        } else {
            self.reset();
        }
        self.current()
    }

    pub fn go_home(&mut self) -> &str {
        self.reset();
        self.current()
    }

    fn reset(&mut self) {
        self.pages.clear();
        self.pages.push(self.home.clone());
    }
}
