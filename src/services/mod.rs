pub mod form;
pub mod query_string;
pub mod search;
pub mod time_slots;
pub mod validation;
