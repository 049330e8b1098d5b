mod layout;
pub use layout::SiteLayout;

mod home;
pub use home::Home;

mod about;
pub use about::{About, Documents};

mod notices;
pub use notices::Notices;

mod events;
pub use events::Events;

mod membership;
pub use membership::Membership;

mod gallery;
pub use gallery::Gallery;

mod contact;
pub use contact::Contact;

mod admin;
pub use admin::Admin;

mod login;
pub use login::Login;
