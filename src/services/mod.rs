pub mod copy_service;
pub mod locator_service;
pub mod platform;
pub mod scan_service;
pub mod thumbnail_service;
pub mod volume_service;
