pub mod app;
pub mod figure;
