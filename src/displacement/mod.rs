//! 배수 체적 계산 모듈 모음.
//! 무게→물 체적 환산, 박스 체적, 박스 대비 잔여 체적/효율 분석으로 구성한다.

pub mod box_volume;
pub mod remaining;
pub mod weight_volume;

pub use box_volume::*;
pub use remaining::*;
pub use weight_volume::*;
