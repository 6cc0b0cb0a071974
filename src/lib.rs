pub mod boot;
pub mod content;
pub mod log;
pub mod motion;
pub mod routes;
pub mod scroll;
pub mod sections;
pub mod timeline;
pub mod view_state;
