pub mod armor_item;
pub mod armor_list;
pub mod armor_type_selector;
pub mod character_selector;
pub mod job_selector;
