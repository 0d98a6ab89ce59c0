pub mod patch;
pub mod task;
pub mod task_list;
pub mod timestamp;
pub mod user;

pub use task::{Priority, Task, TaskCreate, TaskQuery, TaskUpdate, TASK_COLUMNS};
pub use task_list::{
    TaskList, TaskListCreate, TaskListQuery, TaskListUpdate, DEFAULT_LIST_EMOJI,
    DEFAULT_LIST_NAME, DEFAULT_LIST_WELCOME_EMOJI, TASK_LIST_COLUMNS,
};
pub use user::{User, UserCreate, UserRecord, USER_COLUMNS};
