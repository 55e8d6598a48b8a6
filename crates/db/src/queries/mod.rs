pub mod channels;
pub mod items;
