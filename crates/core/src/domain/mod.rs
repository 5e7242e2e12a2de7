pub mod breakdown;
pub mod marketplace;
pub mod product;
pub mod request;
