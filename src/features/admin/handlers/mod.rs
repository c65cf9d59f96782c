pub mod admin_handlers;

pub use admin_handlers::{
    __path_get_stats, __path_update_design_status, get_stats, update_design_status,
};
