pub mod assist;
pub mod dast10;
