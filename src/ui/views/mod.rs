//! View rendering functions for the UI components.
//!
//! - `layout`: Main window composition
//! - `track_list`: The library table
//! - `player`: Player bar
//! - `edit_dialog`: Edit track modal
//! - `toast`: Toast notifications

mod edit_dialog;
mod layout;
mod player;
mod track_list;
pub mod toast;

pub use layout::loaded_view;
pub use toast::ToastQueue;
