pub mod category;
pub mod config;
pub mod error;
pub mod lister;
pub mod web;
pub mod gallery {
    pub mod carousel;
    pub mod controller;
    pub mod dry_run;
    pub mod join;
    pub mod pagination;

    pub use join::join_settled;
}
