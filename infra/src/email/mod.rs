//! Outbound email delivery.

mod smtp;

pub use smtp::SmtpEmailSender;

/// Mask an email address for logs: keep the first character and the domain
pub(crate) fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let first = local.chars().next().unwrap_or('*');
            format!("{}***@{}", first, domain)
        }
        _ => "***".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::mask_email;

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("buyer@example.com"), "b***@example.com");
        assert_eq!(mask_email("x@shop.io"), "x***@shop.io");
        assert_eq!(mask_email("not-an-email"), "***");
    }
}
