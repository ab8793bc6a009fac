pub mod backtest;
pub mod commands;
pub mod config;
pub mod context;
pub mod live;
pub mod models;
pub mod provider;
pub mod reference;
pub mod report;
pub mod simulator;
pub mod vwap;
pub mod yahoo;
