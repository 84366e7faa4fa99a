pub mod banner;
pub mod consts;
pub mod engine;
pub mod events;
pub mod sorters;
