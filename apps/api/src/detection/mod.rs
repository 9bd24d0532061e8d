// Disease detection: upload → classify → persist → optional SMS alert.

pub mod detector;
pub mod handlers;
