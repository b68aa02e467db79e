pub mod database;
pub mod lib_sqlite_impl;
pub mod records;
