pub mod images;
pub mod promotions;
