pub mod application_dto;
pub mod certificate_dto;
pub mod internship_dto;
pub mod user_dto;
