pub mod task;
pub mod user;

pub use task::{CreateTask, Task, TaskPriority, TaskStatus, UpdateTask};
pub use user::{AuthUser, User, UserSummary};
