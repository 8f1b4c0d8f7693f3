pub mod audio;
pub mod template_type;
pub mod toast_template;

pub use audio::{AudioOption, AudioSystemFile, Scenario, ToastDuration};
pub use template_type::{TemplateType, TextField, ALL_TEMPLATE_TYPES};
pub use toast_template::ToastTemplate;
