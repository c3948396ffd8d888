//! 注册表单校验模块
//!
//! 提交前的本地检查与口令强度评估，全部是纯函数，
//! 不触碰 DOM，可在宿主机上直接测试。
//! 这些检查只拦截明显的格式问题，权威校验在服务端。

/// 提交前校验的输入快照
pub struct RegisterInput<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub confirm_password: &'a str,
    pub accept_terms: bool,
}

/// 各自独立的校验失败原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterFieldError {
    InvalidEmail,
    PasswordTooShort,
    PasswordMismatch,
    TermsNotAccepted,
}

impl RegisterFieldError {
    pub fn message(&self) -> &'static str {
        match self {
            RegisterFieldError::InvalidEmail => "请输入有效的邮箱地址",
            RegisterFieldError::PasswordTooShort => "密码长度至少为 6 个字符",
            RegisterFieldError::PasswordMismatch => "两次输入的密码不一致",
            RegisterFieldError::TermsNotAccepted => "请先同意服务条款",
        }
    }
}

/// 全部检查通过才允许发起网络请求，任一失败立即返回
pub fn validate(input: &RegisterInput) -> Result<(), RegisterFieldError> {
    if !is_valid_email(input.email) {
        return Err(RegisterFieldError::InvalidEmail);
    }
    if input.password.chars().count() < 6 {
        return Err(RegisterFieldError::PasswordTooShort);
    }
    if input.password != input.confirm_password {
        return Err(RegisterFieldError::PasswordMismatch);
    }
    if !input.accept_terms {
        return Err(RegisterFieldError::TermsNotAccepted);
    }
    Ok(())
}

/// 宽松的邮箱形状检查：`local@domain.tld`，不含空白
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && !tld.is_empty() && !email.chars().any(char::is_whitespace)
}

/// 口令强度档位（仅作提示，从不阻止提交）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordStrength {
    Weak,
    Medium,
    Strong,
}

impl PasswordStrength {
    pub fn label(&self) -> &'static str {
        match self {
            PasswordStrength::Weak => "弱",
            PasswordStrength::Medium => "中等",
            PasswordStrength::Strong => "强",
        }
    }

    /// 强度条的样式类
    pub fn meter_class(&self) -> &'static str {
        match self {
            PasswordStrength::Weak => "progress-error",
            PasswordStrength::Medium => "progress-warning",
            PasswordStrength::Strong => "progress-success",
        }
    }
}

/// 5 分制评分：长度 ≥6、长度 ≥10、大小写混合、数字、符号各计一分
pub fn password_score(password: &str) -> u8 {
    let mut score = 0u8;
    let len = password.chars().count();
    if len >= 6 {
        score += 1;
    }
    if len >= 10 {
        score += 1;
    }
    if password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
    {
        score += 1;
    }
    if password.chars().any(|c| c.is_ascii_digit()) {
        score += 1;
    }
    if password.chars().any(|c| !c.is_ascii_alphanumeric()) {
        score += 1;
    }
    score
}

pub fn password_strength(password: &str) -> PasswordStrength {
    match password_score(password) {
        0..=2 => PasswordStrength::Weak,
        3..=4 => PasswordStrength::Medium,
        _ => PasswordStrength::Strong,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> RegisterInput<'static> {
        RegisterInput {
            email: "user@lab.example",
            password: "abcdef",
            confirm_password: "abcdef",
            accept_terms: true,
        }
    }

    #[test]
    fn test_valid_input_passes() {
        assert_eq!(validate(&valid_input()), Ok(()));
    }

    #[test]
    fn test_rejects_malformed_email() {
        let input = RegisterInput {
            email: "not-an-email",
            ..valid_input()
        };
        assert_eq!(validate(&input), Err(RegisterFieldError::InvalidEmail));
    }

    #[test]
    fn test_rejects_short_password() {
        let input = RegisterInput {
            password: "abc",
            confirm_password: "abc",
            ..valid_input()
        };
        assert_eq!(validate(&input), Err(RegisterFieldError::PasswordTooShort));
    }

    #[test]
    fn test_rejects_mismatched_confirmation() {
        let input = RegisterInput {
            password: "abcdef",
            confirm_password: "abcxyz",
            ..valid_input()
        };
        assert_eq!(validate(&input), Err(RegisterFieldError::PasswordMismatch));
    }

    #[test]
    fn test_rejects_unaccepted_terms() {
        let input = RegisterInput {
            accept_terms: false,
            ..valid_input()
        };
        assert_eq!(validate(&input), Err(RegisterFieldError::TermsNotAccepted));
    }

    #[test]
    fn test_email_shape() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last@sub.domain.org"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("@b.co"));
        assert!(!is_valid_email("a@.co"));
        assert!(!is_valid_email("a@b."));
        assert!(!is_valid_email("a b@c.de"));
        assert!(!is_valid_email("a@b@c.de"));
    }

    #[test]
    fn test_strength_tiers() {
        // len>=6 只有一分
        assert_eq!(password_strength("abcdef"), PasswordStrength::Weak);
        // len + 大小写 + 数字 = 3 分
        assert_eq!(password_strength("Abcde1"), PasswordStrength::Medium);
        // 全部五项命中
        assert_eq!(password_strength("Abcdefghi1!"), PasswordStrength::Strong);
        assert_eq!(password_score("Abcdefghi1!"), 5);
        assert_eq!(password_score(""), 0);
    }
}
