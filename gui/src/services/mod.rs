// Services the components call outside the engine
pub mod file_dialog;
