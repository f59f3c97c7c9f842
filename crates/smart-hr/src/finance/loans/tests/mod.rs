mod common;
mod table;
