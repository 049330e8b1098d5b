mod modal_overlay;
pub use modal_overlay::ModalOverlay;

mod admin;
pub use admin::AdminDashboard;

mod notices_admin;
pub use notices_admin::NoticesAdmin;

mod events_admin;
pub use events_admin::EventsAdmin;

mod gallery_admin;
pub use gallery_admin::GalleryAdmin;
