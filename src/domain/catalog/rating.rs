//! Catalog Context - Rating

use serde::{Deserialize, Serialize};

use super::CatalogError;

/// 没有任何评分时的平均分
pub const DEFAULT_AVERAGE_RATING: &str = "0";

/// 单条评分（1 到 5 分）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: i64) -> Result<Self, CatalogError> {
        if !(Self::MIN as i64..=Self::MAX as i64).contains(&value) {
            return Err(CatalogError::InvalidRating(value));
        }
        Ok(Self(value as u8))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 计算平均评分
///
/// 空集合返回 `"0"`；否则四舍五入保留至多两位小数，并去掉末尾的 0，
/// 例如 `[5, 5, 5]` -> `"5"`，`[4, 5]` -> `"4.5"`，`[1, 2, 2]` -> `"1.67"`。
pub fn average_rating(ratings: &[Rating]) -> String {
    if ratings.is_empty() {
        return DEFAULT_AVERAGE_RATING.to_string();
    }

    let sum: u64 = ratings.iter().map(|r| r.value() as u64).sum();
    let mean = sum as f64 / ratings.len() as f64;

    let formatted = format!("{:.2}", mean);
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ratings(values: &[i64]) -> Vec<Rating> {
        values.iter().map(|v| Rating::new(*v).unwrap()).collect()
    }

    #[test]
    fn test_empty_ratings_default_to_zero() {
        assert_eq!(average_rating(&[]), "0");
    }

    #[test]
    fn test_uniform_ratings() {
        assert_eq!(average_rating(&ratings(&[5, 5, 5])), "5");
        assert_eq!(average_rating(&ratings(&[1])), "1");
    }

    #[test]
    fn test_fractional_mean() {
        assert_eq!(average_rating(&ratings(&[4, 5])), "4.5");
        assert_eq!(average_rating(&ratings(&[1, 2, 2])), "1.67");
        assert_eq!(average_rating(&ratings(&[3, 4, 4])), "3.67");
        assert_eq!(average_rating(&ratings(&[1, 2, 2, 2])), "1.75");
    }

    #[test]
    fn test_rating_range() {
        assert!(Rating::new(0).is_err());
        assert!(Rating::new(6).is_err());
        assert_eq!(Rating::new(3).unwrap().value(), 3);
    }
}
