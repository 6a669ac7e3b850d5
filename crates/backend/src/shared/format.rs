/// Размер ответа для лога: байты с разделителями тысяч (точками),
/// например `1.234.567 B`
pub fn format_size(bytes: usize) -> String {
    format!("{} B", group_thousands(bytes))
}

fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut result = String::new();
    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push('.');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1.000");
        assert_eq!(group_thousands(1234567890), "1.234.567.890");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(42), "42 B");
        assert_eq!(format_size(20480), "20.480 B");
    }
}
