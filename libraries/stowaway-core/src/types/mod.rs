mod condition;
mod genre;
mod record;
mod user;

pub use condition::{Condition, ConditionId};
pub use genre::{Genre, GenreId};
pub use record::{NewRecord, Record, RecordFields, RecordId};
pub use user::{CreateUser, User, UserId};
