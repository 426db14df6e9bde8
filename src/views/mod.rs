pub mod calendar;
pub mod chat;
pub mod login;
pub mod settings;
pub mod shared;
pub mod tasks;

pub use calendar::CalendarView;
pub use chat::ChatView;
pub use login::AuthView;
pub use settings::SettingsView;
pub use tasks::TasksView;
