pub mod media_types;
