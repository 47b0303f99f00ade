/// 1-based current page, kept inside `[1, page_count]`. Before the
/// document reports its page count both directions are disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageNavigator {
    current: usize,
    page_count: usize,
}

impl Default for PageNavigator {
    fn default() -> Self {
        Self::new(0)
    }
}

impl PageNavigator {
    pub fn new(page_count: usize) -> Self {
        Self {
            current: 1,
            page_count,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn set_page_count(&mut self, page_count: usize) {
        self.page_count = page_count;
        self.current = self.current.clamp(1, page_count.max(1));
    }

    pub fn can_go_previous(&self) -> bool {
        self.current > 1
    }

    pub fn can_go_next(&self) -> bool {
        self.current < self.page_count
    }

    /// Returns true when the page changed.
    pub fn previous(&mut self) -> bool {
        if !self.can_go_previous() {
            return false;
        }
        self.current -= 1;
        true
    }

    pub fn next(&mut self) -> bool {
        if !self.can_go_next() {
            return false;
        }
        self.current += 1;
        true
    }

    pub fn go_to(&mut self, page: usize) -> bool {
        let target = page.clamp(1, self.page_count.max(1));
        let changed = target != self.current;
        self.current = target;
        changed
    }
}
