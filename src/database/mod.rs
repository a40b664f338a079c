pub mod calendars;
pub mod events;
pub mod manager;
pub mod models;
pub mod projects;
pub mod tasks;
pub mod users;

pub use calendars::{CalendarRepository, PgCalendarRepository};
pub use events::{EventRepository, PgEventRepository};
pub use manager::DatabaseError;
pub use projects::{PgProjectRepository, ProjectRepository};
pub use tasks::{PgTaskRepository, TaskRepository};
pub use users::{PgUserRepository, UserRepository};
