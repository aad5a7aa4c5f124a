//! 무게·길이·체적 단위 정의 및 환산 계수 모음.

pub mod length;
pub mod mass;
pub mod volume;

pub use length::{length_to_mm, DimensionUnit};
pub use mass::{VolumeFactors, WeightUnit};
pub use volume::{volume_from_mm3, VolumeUnit};
