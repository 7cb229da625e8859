pub mod export;
pub mod notify;
pub mod save;

pub use export::{export_fields, export_file_name, export_json, write_export};
pub use notify::{Notification, NotificationCenter, NotificationKind};
pub use save::{SaveDecision, find_duplicate, plan_save, save_title, save_unique};
