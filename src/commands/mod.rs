pub mod backtest;
pub mod dashboard;
pub mod live;
pub mod universe;
