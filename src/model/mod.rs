pub mod form;
pub mod issue;
