//! Reusable view components

pub mod call_list;
pub mod category_select;
pub mod loading;
pub mod pagination;
