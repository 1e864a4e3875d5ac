pub mod config_dto;
pub mod reservation_dto;
