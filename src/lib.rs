//! 핵심 계산 로직과 저장소를 라이브러리로 분리하여 CLI 외의 화면에서도 그대로 쓸 수 있게 한다.

pub mod app;
pub mod config;
pub mod conversion;
pub mod displacement;
pub mod format;
pub mod import;
pub mod records;
pub mod state;
pub mod store;
pub mod ui_cli;
pub mod units;
