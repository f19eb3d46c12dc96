pub mod anchors;
pub mod forms;
pub mod lazy_images;
pub mod menu;
pub mod navbar;
pub mod page;
pub mod reveal;
pub mod scroll_top;
pub mod tabs;
pub mod video;
