// src/gui/components/mod.rs
pub mod address_bar;
pub mod error_notice;
pub mod ipn_modal;
pub mod part_table;
pub mod status_pill;
pub mod sync_actions;
