use crate::model::RecordId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Home,
    Profile,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Tab(Tab),
    Detail(RecordId),
}

/// Tab bar with a modal stack of candidate detail screens on top.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Navigator {
    tab: Tab,
    stack: Vec<RecordId>,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Screen {
        match self.stack.last() {
            Some(id) => Screen::Detail(id.clone()),
            None => Screen::Tab(self.tab),
        }
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn push_detail(&mut self, id: RecordId) {
        self.stack.push(id);
    }

    /// Pops the top modal. Returns false when already at a tab root.
    pub fn back(&mut self) -> bool {
        self.stack.pop().is_some()
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.stack.clear();
        self.tab = tab;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_sits_on_top_of_current_tab() {
        let mut nav = Navigator::new();
        assert_eq!(nav.current(), Screen::Tab(Tab::Home));

        nav.push_detail(RecordId::Int(4));
        assert_eq!(nav.current(), Screen::Detail(RecordId::Int(4)));

        assert!(nav.back());
        assert_eq!(nav.current(), Screen::Tab(Tab::Home));
        assert!(!nav.back());
    }

    #[test]
    fn selecting_a_tab_dismisses_modals() {
        let mut nav = Navigator::new();
        nav.push_detail(RecordId::Int(1));
        nav.push_detail(RecordId::Int(2));
        nav.select_tab(Tab::Profile);
        assert_eq!(nav.current(), Screen::Tab(Tab::Profile));
        assert_eq!(nav.tab(), Tab::Profile);
    }
}
