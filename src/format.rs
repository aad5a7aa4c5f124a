//! 화면 표시용 숫자 포맷. 계산 결과 자체는 반올림하지 않고 표시할 때만 자른다.

/// 천 단위 구분 기호를 넣어 소수점 `decimals` 자리로 표시한다.
pub fn format_volume(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let raw = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match raw.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (raw.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    // 반올림 후 0이 되는 음수는 부호를 붙이지 않는다
    let is_zero = raw.chars().all(|c| c == '0' || c == '.');
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };
    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

/// 백분율을 소수 첫째 자리로 표시한다.
pub fn format_pct(pct: f64) -> String {
    format!("{pct:.1}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_volume(1234567.891, 2), "1,234,567.89");
        assert_eq!(format_volume(999.0, 2), "999.00");
        assert_eq!(format_volume(1000.0, 0), "1,000");
    }

    #[test]
    fn keeps_sign_for_overflow() {
        assert_eq!(format_volume(-1500.5, 2), "-1,500.50");
        assert_eq!(format_volume(-0.001, 2), "0.00");
    }

    #[test]
    fn pct_has_one_decimal() {
        assert_eq!(format_pct(66.666), "66.7%");
    }
}
