pub mod cell;
pub mod column;
pub mod row;
pub mod table;
