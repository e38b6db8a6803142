pub mod app;
pub mod catalog;
pub mod clients;
pub mod config;
pub mod filters;
pub mod modal;
pub mod models;
pub mod preview;
pub mod session;
pub mod storage;
pub mod view;
