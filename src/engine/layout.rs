use crate::{
    domain::Failure,
    platform::{Host, LayoutSlot},
};

/// The two OS layout identifiers the engine toggles between.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LayoutPair {
    primary: String,
    secondary: String,
}

impl LayoutPair {
    pub fn new(primary: &str, secondary: &str) -> Self {
        Self {
            primary: primary.to_owned(),
            secondary: secondary.to_owned(),
        }
    }

    pub fn id(&self, slot: LayoutSlot) -> &str {
        match slot {
            LayoutSlot::Primary => &self.primary,
            LayoutSlot::Secondary => &self.secondary,
        }
    }

    pub fn slot_of(&self, id: &str) -> Option<LayoutSlot> {
        if id == self.primary {
            Some(LayoutSlot::Primary)
        } else if id == self.secondary {
            Some(LayoutSlot::Secondary)
        } else {
            None
        }
    }
}

pub fn current_slot(host: &mut dyn Host, layouts: &LayoutPair) -> Option<LayoutSlot> {
    host.current_layout().and_then(|id| layouts.slot_of(&id))
}

pub fn select(
    host: &mut dyn Host,
    layouts: &LayoutPair,
    slot: LayoutSlot,
) -> Result<LayoutSlot, Failure> {
    host.select_layout(layouts.id(slot))?;
    host.show_layout(slot);
    tracing::trace!(layout = layouts.id(slot), "layout selected");
    Ok(slot)
}

/// Selects the secondary layout when the primary is active, otherwise the primary.
///
/// An unknown current layout counts as "not primary".
pub fn toggle(host: &mut dyn Host, layouts: &LayoutPair) -> Result<LayoutSlot, Failure> {
    let target = match current_slot(host, layouts) {
        Some(LayoutSlot::Primary) => LayoutSlot::Secondary,
        Some(LayoutSlot::Secondary) | None => LayoutSlot::Primary,
    };
    select(host, layouts, target)
}

pub fn refresh_indicator(host: &mut dyn Host, layouts: &LayoutPair) {
    if let Some(slot) = current_slot(host, layouts) {
        host.show_layout(slot);
    }
}
