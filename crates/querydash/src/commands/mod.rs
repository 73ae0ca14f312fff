pub mod ask;
pub mod history;
pub mod mode;
pub mod status;
pub mod suggest;
pub mod version;
