mod loading;
mod notice;
mod record;
mod session;
mod stage;
mod step;

pub use loading::LoadingState;
pub use notice::{DEFAULT_DISMISS_AFTER, Notice};
pub use record::{ContentStrategy, EXPORT_FILE_NAME};
pub use session::{Rejection, Session, Transition};
pub use step::Step;
