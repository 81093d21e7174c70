mod session;
mod subject;

pub use session::{SessionDraft, SessionRecord};
pub use subject::{Profile, Subject};
