//! Service layer: external music info client and catalog operations

pub mod catalog;
pub mod music_info;
