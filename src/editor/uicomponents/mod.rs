mod messagebar;
mod statusbar;
mod view;

pub use messagebar::MessageBar;
pub use statusbar::StatusBar;
pub use view::View;
