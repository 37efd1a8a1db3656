//! Per-panel interactive state.

pub mod cheese;
pub mod faith;
pub mod finale;
pub mod gallery;
pub mod intro;
pub mod marcus;
pub mod nerd;

pub use cheese::{CheeseScene, CheeseView, DealAnswer};
pub use faith::FaithScene;
pub use finale::{FinaleScene, SuccessOverlay};
pub use gallery::{GALLERY_ITEMS, GalleryItem, GalleryScene, VideoCard};
pub use intro::IntroOverlay;
pub use marcus::MarcusScene;
pub use nerd::{NerdScene, SceneKind, Stage};
