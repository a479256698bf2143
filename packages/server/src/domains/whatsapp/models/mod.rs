pub mod whatsapp_template;

pub use whatsapp_template::{
    CreateTemplate, TemplateCategory, TemplateFilter, UpdateTemplate, WhatsAppTemplate,
};
