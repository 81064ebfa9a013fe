pub mod history;
pub mod live;
pub mod trend;
