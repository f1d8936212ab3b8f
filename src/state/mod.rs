pub mod flash;
pub mod lead_form;
pub mod admin_panel;
