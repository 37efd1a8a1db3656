pub mod navigation;
pub mod panel;

pub use navigation::{NavigationState, SubscriptionId};
pub use panel::{NavItem, Panel, SECTIONS, SectionId};
