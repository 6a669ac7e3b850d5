use uuid::Uuid;

/// Форма (DTO) создания или изменения сущности
pub trait EntityForm {
    /// Бизнес-код из формы
    fn code(&self) -> &str;

    /// Валидация данных формы
    fn validate(&self) -> Result<(), Vec<String>>;
}

/// Форма изменения: может нести ID записи
pub trait UpdateForm: EntityForm {
    /// ID из тела запроса, если он передан
    fn target_id(&self) -> Option<Uuid>;
}

/// Проверка обязательного строкового поля с ограничением длины
pub fn check_required(errors: &mut Vec<String>, field: &str, value: &str, max_len: usize) {
    if value.trim().is_empty() {
        errors.push(format!("{} is required", field));
    } else if value.trim().chars().count() > max_len {
        errors.push(format!("{} must not exceed {} characters", field, max_len));
    }
}

/// Сегменты маршрутов API, которые не могут быть кодом записи:
/// `GET /{code}` их не достанет
pub const RESERVED_CODES: &[&str] = &["Count", "GetNewCode", "Filter", "ListByIds"];

/// Проверка бизнес-кода: обязательный, с ограничением длины и не совпадает
/// с зарезервированным сегментом маршрута
pub fn check_code(errors: &mut Vec<String>, field: &str, value: &str, max_len: usize) {
    let code = value.trim();
    check_required(errors, field, code, max_len);
    if RESERVED_CODES.iter().any(|reserved| reserved.eq_ignore_ascii_case(code)) {
        errors.push(format!("{} '{}' is reserved", field, code));
    }
}

/// Проверка необязательного строкового поля
pub fn check_optional(errors: &mut Vec<String>, field: &str, value: Option<&str>, max_len: usize) {
    if let Some(v) = value {
        if v.chars().count() > max_len {
            errors.push(format!("{} must not exceed {} characters", field, max_len));
        }
    }
}

/// Итог валидации
pub fn finish(errors: Vec<String>) -> Result<(), Vec<String>> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_field_rules() {
        let mut errors = Vec::new();
        check_required(&mut errors, "DepartmentCode", "  ", 20);
        check_required(&mut errors, "DepartmentName", &"x".repeat(21), 20);
        check_required(&mut errors, "Other", "ok", 20);
        assert_eq!(
            errors,
            vec![
                "DepartmentCode is required".to_string(),
                "DepartmentName must not exceed 20 characters".to_string(),
            ]
        );
    }

    #[test]
    fn test_reserved_codes_are_rejected() {
        let mut errors = Vec::new();
        check_code(&mut errors, "DepartmentCode", " Count ", 20);
        check_code(&mut errors, "DepartmentCode", "filter", 20);
        check_code(&mut errors, "DepartmentCode", "D01", 20);
        assert_eq!(
            errors,
            vec![
                "DepartmentCode 'Count' is reserved".to_string(),
                "DepartmentCode 'filter' is reserved".to_string(),
            ]
        );
    }

    #[test]
    fn test_finish() {
        assert!(finish(Vec::new()).is_ok());
        assert_eq!(finish(vec!["e".into()]), Err(vec!["e".to_string()]));
    }
}
