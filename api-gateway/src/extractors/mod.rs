mod current_user;

pub use current_user::{AuthenticatedUser, CurrentUser};
