pub mod adapter;
pub mod filter;
pub mod pager;
pub mod sort;
