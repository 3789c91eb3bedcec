use std::fmt;

use kernel::model::slot::Slot;

pub struct SlotView(pub Slot);

impl fmt::Display for SlotView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.0;
        write!(
            f,
            "Slot {:<4} {:<16} {:<10} ${:.2}/hour",
            s.slot_id,
            s.slot_type.label(),
            s.status(),
            s.slot_type.hourly_rate()
        )
    }
}
