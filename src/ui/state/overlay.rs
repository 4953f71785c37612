#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DateField {
    RangeStart,
    RangeEnd,
    EventStart,
    EventEnd,
}

/// Every dropdown, picker and menu that closes on an outside click.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OverlayId {
    Sort,
    Facet(&'static str),
    Association,
    DatePicker(DateField),
    Category,
    RowMenu,
}

/// At most one overlay is open at a time. The shell's root click handler
/// calls [`OverlayState::close`]; overlay content stops propagation so
/// clicks inside it do not count as outside.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OverlayState {
    open: Option<OverlayId>,
}

impl OverlayState {
    pub fn is_open(&self, id: OverlayId) -> bool {
        self.open == Some(id)
    }

    pub fn current(&self) -> Option<OverlayId> {
        self.open
    }

    pub fn toggle(&mut self, id: OverlayId) {
        self.open = if self.open == Some(id) { None } else { Some(id) };
    }

    pub fn open(&mut self, id: OverlayId) {
        self.open = Some(id);
    }

    pub fn close(&mut self) {
        self.open = None;
    }
}
