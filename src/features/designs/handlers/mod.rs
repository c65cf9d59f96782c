pub mod design_handler;

pub use design_handler::{
    __path_list_designs, __path_submit_design, __path_top_designs, __path_vote_design,
    list_designs, submit_design, top_designs, vote_design,
};
